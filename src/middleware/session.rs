use std::convert::Infallible;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderName, header},
};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "bb_session";

/// Body paired with the re-issued session cookie. Every cart-touching
/// response carries one so the session's lifetime slides.
pub type SessionReply<T> = ([(HeaderName, String); 1], Json<T>);

/// Anonymous cart session, read from the `bb_session` cookie or minted on
/// the spot. Extraction never fails; a visitor without a cookie simply
/// gets an empty cart under a fresh id.
#[derive(Debug, Clone, Copy)]
pub struct CartSession {
    pub session_id: Uuid,
    /// True when the id was minted for this request instead of read from
    /// the cookie.
    pub fresh: bool,
}

impl CartSession {
    /// `Set-Cookie` value re-issuing the session cookie with a full
    /// lifetime, which is how the sliding TTL slides.
    pub fn cookie(&self, ttl: chrono::Duration) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            self.session_id,
            ttl.num_seconds()
        )
    }

    pub fn reply<T>(&self, ttl: chrono::Duration, body: T) -> SessionReply<T> {
        ([(header::SET_COOKIE, self.cookie(ttl))], Json(body))
    }
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(session_from_cookie_header);

        Ok(match existing {
            Some(session_id) => CartSession {
                session_id,
                fresh: false,
            },
            None => CartSession {
                session_id: Uuid::new_v4(),
                fresh: true,
            },
        })
    }
}

/// Picks the session id out of a `Cookie` header. Malformed pairs and
/// non-uuid values are skipped rather than rejected.
pub fn session_from_cookie_header(header: &str) -> Option<Uuid> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}
