use serde::Deserialize;

pub const USER_UPGRADED: &str = "user.upgraded";

/// Polka webhook payload.
///
/// `user_id` is kept as a string so a malformed id is a 400 from the handler
/// rather than a generic JSON rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct PolkaWebhook {
    pub event: String,
    pub data: PolkaWebhookData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolkaWebhookData {
    pub user_id: String,
}
