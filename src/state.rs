use crate::{
    db::{DbPool, OrmConn},
    mailer::Mailer,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub mailer: Mailer,
    /// Sliding cart-session lifetime; also drives the `Max-Age` of the session cookie.
    pub cart_ttl: chrono::Duration,
}
