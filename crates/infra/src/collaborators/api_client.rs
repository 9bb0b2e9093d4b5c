//! Collaborator API client
//!
//! Talks to the job tracker, interview, reminder and integrations services
//! behind one base URL. Transport retries live in [`HttpClient`]; this layer
//! builds endpoints, maps non-success statuses and decodes bodies.

use std::time::Duration;

use async_trait::async_trait;
use careerdeck_core::{
    DeadlineSource, ExternalEventSource, IntegrationSource, InterviewSource, JobUpdater,
    ReminderSource,
};
use careerdeck_domain::{
    ApiConfig, CareerDeckError, ConnectResponse, DeadlineRecord, ExternalFetchResponse,
    ExternalFetchWindow, IntegrationRecord, InterviewRecord, RecordId, ReminderRecord,
    ReminderType, Result,
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};
use url::Url;

use crate::errors::conversions::status_error;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// List payloads arrive either bare or wrapped in an envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "items", alias = "results")]
        data: Vec<T>,
    },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// HTTP implementation of the collaborator ports.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .max_attempts(config.max_attempts)
            .bearer_token(config.bearer_token.clone())
            .user_agent(concat!("careerdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_http(http, &config.base_url)
    }

    /// Use a preconfigured transport.
    pub fn with_http(http: HttpClient, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| CareerDeckError::Config(format!("invalid API base URL {base_url:?}: {err}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(CareerDeckError::Config(format!("API base URL must be http(s): {base_url}")));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL plus escaped path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CareerDeckError::Config(format!("API base URL cannot take a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.http.send(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%status, body = %body, "collaborator returned an error status");
        Err(status_error(status, Some(&body)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.execute(self.http.request(Method::GET, url)).await?;
        decode(response).await
    }

    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let body: ListBody<T> = self.get_json(url).await?;
        Ok(body.into_vec())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    decode_optional(response).await?.ok_or_else(|| {
        CareerDeckError::Network("collaborator returned an empty response body".into())
    })
}

/// Decode a body that may legitimately be absent (204/205 or zero bytes).
async fn decode_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    if matches!(response.status(), StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT) {
        return Ok(None);
    }
    let bytes = response.bytes().await.map_err(InfraError::from)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(&bytes).map(Some).map_err(|err| {
        CareerDeckError::Network(format!("unexpected response body from collaborator: {err}"))
    })
}

#[async_trait]
impl DeadlineSource for ApiClient {
    #[instrument(skip(self))]
    async fn list_deadlines(&self, limit: usize) -> Result<Vec<DeadlineRecord>> {
        let mut url = self.endpoint(&["jobs", "deadlines"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        self.get_list(url).await
    }
}

#[async_trait]
impl InterviewSource for ApiClient {
    #[instrument(skip(self))]
    async fn list_interviews(&self, include_past: bool) -> Result<Vec<InterviewRecord>> {
        let mut url = self.endpoint(&["interviews"])?;
        url.query_pairs_mut().append_pair("includePast", if include_past { "true" } else { "false" });
        self.get_list(url).await
    }

    #[instrument(skip(self), fields(interview_id = %id))]
    async fn delete_interview(&self, id: &RecordId) -> Result<()> {
        let url = self.endpoint(&["interviews", id.as_str()])?;
        self.execute(self.http.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

#[async_trait]
impl ReminderSource for ApiClient {
    #[instrument(skip(self))]
    async fn list_active_reminders(&self) -> Result<Vec<ReminderRecord>> {
        let url = self.endpoint(&["interviews", "reminders", "active"])?;
        self.get_list(url).await
    }

    #[instrument(skip(self), fields(interview_id = %interview_id, reminder_type = %reminder_type))]
    async fn dismiss_reminder(
        &self,
        interview_id: &RecordId,
        reminder_type: ReminderType,
    ) -> Result<()> {
        let url = self.endpoint(&[
            "interviews",
            interview_id.as_str(),
            "reminders",
            reminder_type.as_str(),
            "dismiss",
        ])?;
        self.execute(self.http.request(Method::POST, url)).await?;
        Ok(())
    }
}

#[async_trait]
impl IntegrationSource for ApiClient {
    #[instrument(skip(self))]
    async fn list_integrations(&self) -> Result<Vec<IntegrationRecord>> {
        let url = self.endpoint(&["integrations"])?;
        self.get_list(url).await
    }

    #[instrument(skip(self))]
    async fn start_connect(&self, return_url: &str) -> Result<ConnectResponse> {
        let url = self.endpoint(&["integrations", "google", "connect"])?;
        let request = self.http.request(Method::POST, url).json(&json!({ "returnUrl": return_url }));
        let response = self.execute(request).await?;
        // No body means no redirect; the registry reports that as a failed start.
        Ok(decode_optional(response).await?.unwrap_or_default())
    }

    #[instrument(skip(self), fields(integration_id = %id))]
    async fn disconnect_integration(&self, id: &RecordId, reason: Option<&str>) -> Result<()> {
        let url = self.endpoint(&["integrations", id.as_str(), "disconnect"])?;
        let request = self.http.request(Method::POST, url).json(&json!({ "reason": reason }));
        self.execute(request).await?;
        Ok(())
    }
}

#[async_trait]
impl ExternalEventSource for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_external_events(
        &self,
        window: ExternalFetchWindow,
    ) -> Result<ExternalFetchResponse> {
        let mut url = self.endpoint(&["integrations", "google", "events"])?;
        url.query_pairs_mut()
            .append_pair("daysPast", &window.days_past.to_string())
            .append_pair("daysFuture", &window.days_future.to_string());
        self.get_json(url).await
    }
}

#[async_trait]
impl JobUpdater for ApiClient {
    #[instrument(skip(self), fields(job_id = %job_id))]
    async fn clear_application_deadline(&self, job_id: &RecordId) -> Result<()> {
        let url = self.endpoint(&["jobs", job_id.as_str()])?;
        let request =
            self.http.request(Method::PATCH, url).json(&json!({ "applicationDeadline": null }));
        self.execute(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_http(HttpClient::new().unwrap(), base).unwrap()
    }

    #[test]
    fn endpoint_keeps_base_path_and_escapes_ids() {
        let api = client("http://localhost:8000/api/");
        let url = api.endpoint(&["interviews", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/interviews/a%2Fb%20c");

        let api = client("http://localhost:8000/api");
        let url = api.endpoint(&["jobs", "deadlines"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/jobs/deadlines");
    }

    #[test]
    fn rejects_non_http_base_urls() {
        for base in ["not a url", "mailto:someone@example.com", "ftp://files.example"] {
            let result = ApiClient::with_http(HttpClient::new().unwrap(), base);
            assert!(matches!(result, Err(CareerDeckError::Config(_))), "{base}");
        }
    }

    #[test]
    fn list_body_accepts_bare_and_wrapped() {
        let bare: ListBody<u8> = serde_json::from_str("[1,2]").unwrap();
        let wrapped: ListBody<u8> = serde_json::from_str(r#"{"data":[3]}"#).unwrap();
        let items: ListBody<u8> = serde_json::from_str(r#"{"items":[4]}"#).unwrap();

        assert_eq!(bare.into_vec(), vec![1, 2]);
        assert_eq!(wrapped.into_vec(), vec![3]);
        assert_eq!(items.into_vec(), vec![4]);
    }
}
