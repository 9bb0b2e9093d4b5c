//! External calendar integrations and the events they sync

use serde::{Deserialize, Serialize};

use super::records::RecordId;
use crate::impl_domain_status_conversions;

/// Connection state of an external calendar account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Connected,
    Pending,
    Disconnected,
    /// Unknown statuses from the collaborator are treated as errors so they
    /// show up inline instead of being silently dropped.
    #[serde(other)]
    Error,
}

impl_domain_status_conversions!(IntegrationStatus {
    Connected => "connected",
    Pending => "pending",
    Error => "error",
    Disconnected => "disconnected",
});

/// Integration as listed by the integrations collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationRecord {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub provider: String,
    pub status: IntegrationStatus,
    #[serde(default)]
    pub external_email: Option<String>,
    #[serde(default)]
    pub external_account_id: Option<String>,
    /// Last error reported by the provider for this account, if any.
    #[serde(default)]
    pub last_error: Option<String>,
}

/// Integration tracked by the registry, with its canonical client key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    #[serde(flatten)]
    pub record: IntegrationRecord,
    pub client_key: String,
}

impl Integration {
    pub fn id(&self) -> &RecordId {
        &self.record.id
    }

    pub fn status(&self) -> IntegrationStatus {
        self.record.status
    }

    pub fn is_connected(&self) -> bool {
        self.record.status == IntegrationStatus::Connected
    }

    /// Case-insensitive provider comparison.
    pub fn is_provider(&self, provider: &str) -> bool {
        self.record.provider.trim().eq_ignore_ascii_case(provider.trim())
    }
}

/// Response to a connect request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    #[serde(default)]
    pub auth_url: Option<String>,
}

/// Bounded fetch window around "now", in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalFetchWindow {
    pub days_past: u32,
    pub days_future: u32,
}

/// Raw third-party event as returned by the external events collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEventRecord {
    pub id: RecordId,
    #[serde(default)]
    pub integration_id: Option<String>,
    #[serde(default)]
    pub external_email: Option<String>,
    #[serde(default)]
    pub external_account_id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Option<Vec<String>>,
    #[serde(default)]
    pub hangout_link: Option<String>,
    #[serde(default)]
    pub html_link: Option<String>,
}

/// Per-account failure reported alongside successful events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderError {
    pub message: String,
    #[serde(default)]
    pub integration_id: Option<String>,
}

/// Envelope returned by the external events collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalFetchResponse {
    #[serde(default)]
    pub events: Vec<ExternalEventRecord>,
    #[serde(default)]
    pub errors: Vec<ProviderError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_treated_as_error() {
        let record: IntegrationRecord =
            serde_json::from_str(r#"{"id":"a","provider":"google","status":"expired"}"#).unwrap();
        assert_eq!(record.status, IntegrationStatus::Error);
    }

    #[test]
    fn status_parses_known_values() {
        let record: IntegrationRecord =
            serde_json::from_str(r#"{"id":7,"provider":"Google","status":"disconnected"}"#)
                .unwrap();
        assert_eq!(record.status, IntegrationStatus::Disconnected);
        assert_eq!(record.id.as_str(), "7");
    }

    #[test]
    fn disconnected_and_unknown_statuses_parse_side_by_side() {
        let statuses: Vec<IntegrationStatus> =
            serde_json::from_str(r#"["disconnected","revoked","connected"]"#).unwrap();
        assert_eq!(
            statuses,
            vec![
                IntegrationStatus::Disconnected,
                IntegrationStatus::Error,
                IntegrationStatus::Connected,
            ]
        );
    }

    #[test]
    fn fetch_response_errors_are_optional() {
        let response: ExternalFetchResponse =
            serde_json::from_str(r#"{"events":[{"id":"e1","start":"2025-11-20T10:00:00Z"}]}"#)
                .unwrap();
        assert_eq!(response.events.len(), 1);
        assert!(response.errors.is_empty());
        assert!(!response.events[0].all_day);
    }

    #[test]
    fn provider_match_ignores_case() {
        let integration = Integration {
            record: IntegrationRecord {
                id: RecordId::from("1"),
                provider: "Google ".into(),
                status: IntegrationStatus::Connected,
                external_email: None,
                external_account_id: None,
                last_error: None,
            },
            client_key: "1".into(),
        };
        assert!(integration.is_provider("google"));
        assert!(integration.is_connected());
    }
}
