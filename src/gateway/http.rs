use crate::error::GatewayError;
use crate::gateway::{GenerationKind, ResumeGateway, ResumeRequest};
use std::time::Duration;

/// Blocking JSON client for the generation backend.
pub struct HttpGateway {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, kind: GenerationKind) -> String {
        format!("{}{}", self.base_url, kind.endpoint())
    }
}

impl ResumeGateway for HttpGateway {
    fn generate(
        &self,
        kind: GenerationKind,
        request: &ResumeRequest,
    ) -> Result<String, GatewayError> {
        let url = self.url_for(kind);
        tracing::debug!(%url, "posting generation request");

        let response = match self.agent.post(&url).send_json(request) {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                tracing::warn!(%url, status, "backend returned an error status");
                return Err(GatewayError::Status { status, body });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(GatewayError::Transport {
                    url,
                    message: transport.to_string(),
                });
            }
        };

        let body: serde_json::Value = response
            .into_json()
            .map_err(|error| GatewayError::Decode(error.to_string()))?;
        extract_content(kind, &body)
    }
}

/// Pulls the generated text out of a `{success, <field>?, error?}` reply.
pub fn extract_content(
    kind: GenerationKind,
    body: &serde_json::Value,
) -> Result<String, GatewayError> {
    let success = body
        .get("success")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    if !success {
        let message = body
            .get("error")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("Unknown error");
        return Err(GatewayError::Rejected(message.to_string()));
    }
    body.get(kind.response_field())
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            GatewayError::Decode(format!("reply has no `{}` text", kind.response_field()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_the_field_for_the_requested_kind() {
        let body = json!({"success": true, "cover_letter": "Dear team"});
        let text = extract_content(GenerationKind::CoverLetter, &body).expect("content");
        assert_eq!(text, "Dear team");
        assert!(matches!(
            extract_content(GenerationKind::Resume, &body),
            Err(GatewayError::Decode(_))
        ));
    }

    #[test]
    fn unsuccessful_reply_is_rejected_with_backend_message() {
        let body = json!({"success": false, "error": "quota exceeded"});
        match extract_content(GenerationKind::Resume, &body) {
            Err(GatewayError::Rejected(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let gateway = HttpGateway::new("http://localhost:8000/", Duration::from_secs(5));
        assert_eq!(
            gateway.url_for(GenerationKind::Resume),
            "http://localhost:8000/api/generate-resume"
        );
    }
}
