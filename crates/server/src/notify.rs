//! Outbound transactional email.
//!
//! Delivery goes through a Brevo-style JSON endpoint. Every send is
//! fire-and-forget from the caller's point of view: persistence success
//! alone determines the user-visible outcome of an operation, so failures
//! here are logged and dropped, never propagated.

use serde_json::json;

/// Provider configuration; absent settings disable delivery entirely.
#[derive(Clone, Debug)]
pub struct EmailSettings {
    pub api_url: String,
    pub api_key: String,
    pub sender_name: String,
    pub sender_email: String,
}

pub struct Notifier {
    client: reqwest::Client,
    settings: Option<EmailSettings>,
}

impl Notifier {
    pub fn new(settings: Option<EmailSettings>) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    /// A notifier that logs instead of sending. Used when no email settings
    /// are configured, and by tests.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    async fn send(&self, to: &str, subject: &str, html_content: &str) {
        let Some(settings) = &self.settings else {
            tracing::debug!("email delivery disabled, skipping \"{subject}\" to {to}");
            return;
        };

        let payload = json!({
            "sender": {
                "name": settings.sender_name,
                "email": settings.sender_email,
            },
            "to": [{ "email": to }],
            "subject": subject,
            "htmlContent": html_content,
        });

        let response = self
            .client
            .post(&settings.api_url)
            .header("api-key", &settings.api_key)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(res) if res.status().is_success() => {}
            Ok(res) => tracing::warn!("email provider rejected \"{subject}\": {}", res.status()),
            Err(err) => tracing::warn!("email delivery failed for \"{subject}\": {err}"),
        }
    }

    /// Confirmation to the pledger, when their account has an email.
    pub async fn pledge_confirmation(&self, pledger_email: &str, quantity: &str, item: &str) {
        let html = format!(
            "<html><body><h2>Pledge Confirmation</h2>\
             <p>Thank you for pledging <strong>{quantity}</strong> towards the request \
             for <strong>{item}</strong>.</p>\
             <p>Your support makes a difference.</p></body></html>"
        );
        self.send(pledger_email, "Thanks for your pledge on HopeHUB", &html)
            .await;
    }

    /// Notification to the requester's declared contact email.
    pub async fn pledge_received(&self, requester_email: &str, quantity: &str, item: &str) {
        let html = format!(
            "<html><body><h2>You have a new pledge</h2>\
             <p>A community member pledged <strong>{quantity}</strong> towards your \
             request for <strong>{item}</strong>.</p>\
             <p>We will keep aggregating pledges until your need is met.</p></body></html>"
        );
        self.send(
            requester_email,
            "Good news! Someone pledged to your request on HopeHUB",
            &html,
        )
        .await;
    }

    /// Broadcast a newly created request to registered users with an email.
    pub async fn request_created(
        &self,
        requester_name: &str,
        item: &str,
        quantity: &str,
        organization: &str,
        recipients: &[String],
    ) {
        let html = format!(
            "<html><body><h2>New Food Request Received</h2>\
             <p>A new food request has been submitted on HopeHUB.</p>\
             <p><strong>Requester:</strong> {requester_name}</p>\
             <p><strong>Requested Item:</strong> {item}</p>\
             <p><strong>Quantity:</strong> {quantity}</p>\
             <p><strong>Organization:</strong> {organization}</p></body></html>"
        );
        for recipient in recipients {
            self.send(recipient, "New Food Request Received - HopeHUB", &html)
                .await;
        }
    }
}
