// services/fcm_service.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::notification::NotificationPayload;
use crate::services::jwt_service::{create_service_assertion, ServiceAccountKey};
use crate::services::push_service::{PushError, PushMessenger};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Firebase Cloud Messaging HTTP v1 client.
///
/// Created once per process and shared between requests; the OAuth access
/// token obtained from the service account is cached until shortly before
/// it expires.
pub struct FcmClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    credentials: ServiceAccountKey,
    token: Mutex<Option<AccessToken>>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize)]
struct SendResponse {
    name: String,
}

#[derive(Serialize, Debug)]
struct SendRequest<'a> {
    message: FcmMessage<'a>,
}

#[derive(Serialize, Debug)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: FcmNotification<'a>,
    data: &'a BTreeMap<String, String>,
    android: AndroidConfig<'a>,
    apns: ApnsConfig<'a>,
}

#[derive(Serialize, Debug)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Serialize, Debug)]
struct AndroidConfig<'a> {
    notification: AndroidNotification<'a>,
}

#[derive(Serialize, Debug)]
struct AndroidNotification<'a> {
    sound: &'a str,
}

#[derive(Serialize, Debug)]
struct ApnsConfig<'a> {
    payload: ApnsPayload<'a>,
}

#[derive(Serialize, Debug)]
struct ApnsPayload<'a> {
    aps: Aps<'a>,
}

#[derive(Serialize, Debug)]
struct Aps<'a> {
    sound: &'a str,
}

impl<'a> From<&'a NotificationPayload> for SendRequest<'a> {
    fn from(payload: &'a NotificationPayload) -> Self {
        let sound = payload.notification.sound.as_str();
        SendRequest {
            message: FcmMessage {
                token: &payload.token,
                notification: FcmNotification {
                    title: &payload.notification.title,
                    body: &payload.notification.body,
                },
                data: &payload.data,
                android: AndroidConfig {
                    notification: AndroidNotification { sound },
                },
                apns: ApnsConfig {
                    payload: ApnsPayload { aps: Aps { sound } },
                },
            },
        }
    }
}

#[derive(Deserialize, Default)]
struct ErrorEnvelope {
    #[serde(default)]
    error: GoogleError,
}

#[derive(Deserialize, Default)]
struct GoogleError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    #[serde(default)]
    error_code: Option<String>,
}

// FCM puts the specific reason (UNREGISTERED, INVALID_ARGUMENT...) in the details.
fn parse_rejection(status: u16, body: &str) -> PushError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let error = envelope.error;

    let code = error
        .details
        .into_iter()
        .find_map(|detail| detail.error_code)
        .unwrap_or(error.status);
    let message = if error.message.is_empty() {
        body.to_string()
    } else {
        error.message
    };

    PushError::Rejected { status, code, message }
}

impl FcmClient {
    pub fn new(
        credentials: ServiceAccountKey,
        project_id: Option<String>,
        endpoint: &str,
    ) -> Result<Self, PushError> {
        let http = reqwest::Client::builder().build()?;
        let project_id = project_id.unwrap_or_else(|| credentials.project_id.clone());

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id,
            credentials,
            token: Mutex::new(None),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn send_url(&self) -> String {
        format!("{}/v1/projects/{}/messages:send", self.endpoint, self.project_id)
    }

    async fn access_token(&self) -> Result<String, PushError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let token = self.fetch_access_token(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn fetch_access_token(&self, now: DateTime<Utc>) -> Result<AccessToken, PushError> {
        debug!("Requesting FCM access token for {}", self.credentials.client_email);

        let assertion = create_service_assertion(&self.credentials, now)?;
        let response = self
            .http
            .post(&self.credentials.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PushError::TokenExchange { status: status.as_u16(), body });
        }

        let token: TokenResponse = response.json().await?;
        info!("Obtained FCM access token valid for {}s", token.expires_in);

        Ok(AccessToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl PushMessenger for FcmClient {
    async fn send(&self, payload: &NotificationPayload) -> Result<String, PushError> {
        let access_token = self.access_token().await?;

        let response = self
            .http
            .post(self.send_url())
            .bearer_auth(access_token)
            .json(&SendRequest::from(payload))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_rejection(status.as_u16(), &body));
        }

        let sent: SendResponse = response.json().await?;
        Ok(sent.name)
    }
}
