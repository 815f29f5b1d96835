use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;

use crate::config::{ConfigSnapshot, MAIL_API_KEY, MAIL_ENDPOINT, MAIL_FROM};
use crate::errors::BookingError;

/// One outbound templated email.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    #[serde(rename = "templateId")]
    pub template: String,
    pub data: Map<String, Value>,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            template: template.into(),
            data: Map::new(),
        }
    }

    pub fn with_datum(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// The email capability: deliver a templated message or fail.
///
/// Failures should be reported as `BookingError::email_delivery`.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<()>;
}

/// Keeps every message in memory instead of delivering it.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        tracing::debug!(to = %message.to, template = %message.template, "mail.captured");
        self.sent.lock().await.push(message);
        Ok(())
    }
}

/// Delivers messages by POSTing them as JSON to a mail relay endpoint.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    api_key: Option<String>,
    from: Option<String>,
}

impl HttpMailer {
    pub fn new(endpoint: reqwest::Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: None,
            from: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Build from `mail.*` keys.
    ///
    /// `Ok(None)` when no endpoint is set; an error when it is not a URL.
    pub fn from_config(config: &ConfigSnapshot) -> Result<Option<Self>> {
        let Some(endpoint) = config
            .get(MAIL_ENDPOINT)
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return Ok(None);
        };

        let endpoint = reqwest::Url::parse(endpoint).map_err(|e| {
            BookingError::bad_request(format!("Invalid {MAIL_ENDPOINT} '{endpoint}': {e}"))
                .into_anyhow()
        })?;

        let mut mailer = Self::new(endpoint);
        if let Some(key) = config.get_string(MAIL_API_KEY).filter(|s| !s.is_empty()) {
            mailer = mailer.with_api_key(key);
        }
        if let Some(from) = config.get_string(MAIL_FROM).filter(|s| !s.is_empty()) {
            mailer = mailer.with_from(from);
        }
        Ok(Some(mailer))
    }

    fn payload(&self, message: &EmailMessage) -> Result<Value> {
        let mut body = serde_json::to_value(message)?;
        if let Some(from) = &self.from {
            body["from"] = json!(from);
        }
        Ok(body)
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        let mut req = self
            .client
            .post(self.endpoint.clone())
            .json(&self.payload(&message)?);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let res = req.send().await.map_err(|e| {
            BookingError::email_delivery(format!("Failed to reach mail relay: {e}"))
                .with_data(json!({ "endpoint": self.endpoint.as_str() }))
                .with_source(e.into())
                .into_anyhow()
        })?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(BookingError::email_delivery(format!(
                "Mail relay rejected message ({status})"
            ))
            .with_data(json!({ "status": status.as_u16(), "body": text }))
            .into_anyhow());
        }

        tracing::info!(to = %message.to, template = %message.template, "mail.send");
        Ok(())
    }
}
