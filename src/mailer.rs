use serde::Serialize;
use uuid::Uuid;

/// Body of the completion e-mail when staff do not supply their own.
pub const DEFAULT_COMPLETION_MESSAGE: &str =
    "Your order is ready for pickup. Thank you for choosing Brew Bloom Coffee!";

/// Thin client for a transactional-mail HTTP API. The service runs fine
/// without one; an unset endpoint turns every send into a debug log line.
#[derive(Debug, Clone)]
pub struct Mailer {
    client: reqwest::Client,
    endpoint: Option<String>,
    from: String,
}

#[derive(Debug, Serialize)]
struct OutboundMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl Mailer {
    pub fn new(endpoint: Option<String>, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            from,
        }
    }

    /// Notify a customer that their order is ready for pickup. Best-effort:
    /// failures are logged and swallowed, never surfaced to the caller.
    pub async fn send_order_completed(&self, to: &str, order_id: Uuid, message: &str) {
        let Some(endpoint) = self.endpoint.as_deref() else {
            tracing::debug!(%order_id, "MAIL_API_URL not set, skipping completion mail");
            return;
        };

        let subject = format!("Your Brew Bloom order {order_id} is ready");
        let text =
            format!("{message}\n\nOrder reference: {order_id}\nThe Brew Bloom Coffee team");
        let mail = OutboundMail {
            from: &self.from,
            to,
            subject: &subject,
            text: &text,
        };

        match self.client.post(endpoint).json(&mail).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(%order_id, "completion mail sent");
            }
            Ok(resp) => {
                tracing::warn!(%order_id, status = %resp.status(), "mail API rejected completion mail");
            }
            Err(err) => {
                tracing::warn!(%order_id, error = %err, "completion mail failed");
            }
        }
    }
}
