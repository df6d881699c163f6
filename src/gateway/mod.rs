//! Client side of the generation backend.
//!
//! A finished record is shaped into a [`ResumeRequest`], posted to one of the
//! generation endpoints, and the reply is normalised into a
//! [`GenerationResult`] so callers never see transport errors directly.

pub mod http;
pub mod request;

pub use http::HttpGateway;
pub use request::{ResumeRequest, StudentInfo};

use crate::core::FormRecord;
use crate::error::GatewayError;
use crate::resume::{ResumeData, ResumeProfile};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationKind {
    #[default]
    Resume,
    CoverLetter,
    Advice,
}

impl GenerationKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Resume => "/api/generate-resume",
            Self::CoverLetter => "/api/generate-cover-letter",
            Self::Advice => "/api/generate-resume-advice",
        }
    }

    /// Key holding the generated text in the backend reply.
    pub fn response_field(self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::CoverLetter => "cover_letter",
            Self::Advice => "advice",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::CoverLetter => "cover letter",
            Self::Advice => "resume advice",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResumeProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn succeeded(content: String, data: ResumeProfile) -> Self {
        Self {
            success: true,
            data: Some(data),
            content: Some(content),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

pub trait ResumeGateway: Send + Sync {
    /// Returns the generated text for `kind`.
    fn generate(&self, kind: GenerationKind, request: &ResumeRequest)
    -> Result<String, GatewayError>;
}

impl<G: ResumeGateway + ?Sized> ResumeGateway for std::sync::Arc<G> {
    fn generate(
        &self,
        kind: GenerationKind,
        request: &ResumeRequest,
    ) -> Result<String, GatewayError> {
        (**self).generate(kind, request)
    }
}

/// Shapes `record`, calls the backend and folds every failure into the result.
pub fn generate(
    gateway: &dyn ResumeGateway,
    kind: GenerationKind,
    record: &FormRecord,
) -> GenerationResult {
    let data = match ResumeData::from_record(record) {
        Ok(data) => data,
        Err(error) => {
            tracing::warn!(%error, "record does not decode as a resume");
            return GenerationResult::failed(format!("Invalid resume data: {error}"));
        }
    };
    let request = ResumeRequest::from_resume(&data);
    match gateway.generate(kind, &request) {
        Ok(content) => {
            tracing::info!(kind = kind.label(), chars = content.len(), "generation finished");
            GenerationResult::succeeded(content, data.profile())
        }
        Err(error) => {
            tracing::warn!(kind = kind.label(), %error, "generation failed");
            GenerationResult::failed(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        seen: Mutex<Vec<(GenerationKind, ResumeRequest)>>,
        reply: fn() -> Result<String, GatewayError>,
    }

    impl ResumeGateway for Recording {
        fn generate(
            &self,
            kind: GenerationKind,
            request: &ResumeRequest,
        ) -> Result<String, GatewayError> {
            self.seen
                .lock()
                .expect("lock")
                .push((kind, request.clone()));
            (self.reply)()
        }
    }

    fn record() -> FormRecord {
        FormRecord::new()
            .with("fullName", "Jane Doe")
            .with("email", "jane@example.com")
            .with("jobDescription", "Rust role")
    }

    #[test]
    fn success_carries_content_and_profile() {
        let gateway = Recording {
            seen: Mutex::new(Vec::new()),
            reply: || Ok("# Jane Doe".to_string()),
        };
        let result = generate(&gateway, GenerationKind::CoverLetter, &record());
        assert!(result.success);
        assert_eq!(result.content.as_deref(), Some("# Jane Doe"));
        assert_eq!(result.data.map(|d| d.full_name), Some("Jane Doe".to_string()));

        let seen = gateway.seen.lock().expect("lock");
        assert_eq!(seen[0].0, GenerationKind::CoverLetter);
        assert_eq!(seen[0].1.job_description, "Rust role");
    }

    #[test]
    fn gateway_errors_become_failed_results() {
        let gateway = Recording {
            seen: Mutex::new(Vec::new()),
            reply: || {
                Err(GatewayError::Status {
                    status: 502,
                    body: "bad gateway".to_string(),
                })
            },
        };
        let result = generate(&gateway, GenerationKind::Resume, &record());
        assert!(!result.success);
        assert!(result.content.is_none());
        assert!(result.error.unwrap_or_default().contains("502"));
    }

    #[test]
    fn undecodable_record_never_reaches_the_backend() {
        let gateway = Recording {
            seen: Mutex::new(Vec::new()),
            reply: || Ok(String::new()),
        };
        let record = FormRecord::new().with("education", "oops");
        let result = generate(&gateway, GenerationKind::Advice, &record);
        assert!(!result.success);
        assert!(gateway.seen.lock().expect("lock").is_empty());
    }

    #[test]
    fn kinds_map_to_endpoints() {
        assert_eq!(GenerationKind::Advice.endpoint(), "/api/generate-resume-advice");
        assert_eq!(GenerationKind::CoverLetter.response_field(), "cover_letter");
    }
}
