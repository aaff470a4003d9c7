use crate::domain::ports::{ConfigProvider, TextGenerator};
use crate::utils::error::{ArchitectError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);
const GENERATION_TIMEOUT: Duration = Duration::from_secs(45);
const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    decoding_method: &'static str,
    max_new_tokens: u32,
    min_new_tokens: u32,
    repetition_penalty: f64,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model_id: &'a str,
    input: &'a str,
    parameters: GenerationParameters,
    project_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResult {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GenerationResult>,
}

/// watsonx.ai text generation, authenticated through IBM Cloud IAM.
pub struct WatsonxClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> WatsonxClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Exchange the API key for a short-lived bearer token.
    pub async fn fetch_token(&self) -> Result<String> {
        tracing::debug!("Requesting IAM token from: {}", self.config.iam_endpoint());

        let response = self
            .client
            .post(self.config.iam_endpoint())
            .timeout(TOKEN_TIMEOUT)
            .form(&[
                ("grant_type", APIKEY_GRANT_TYPE),
                ("apikey", self.config.api_key()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("🔐 IAM endpoint unreachable: {}", e);
                ArchitectError::AuthenticationError {
                    message: format!("IAM request failed: {}", e),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("🔐 IAM token request failed ({}): {}", status, body);
            return Err(ArchitectError::AuthenticationError {
                message: format!("IAM returned {}: {}", status, body),
            });
        }

        let token: TokenResponse =
            response
                .json()
                .await
                .map_err(|e| ArchitectError::AuthenticationError {
                    message: format!("Unreadable IAM token response: {}", e),
                })?;
        Ok(token.access_token)
    }

    async fn request_generation(&self, token: &str, prompt: &str) -> Result<String> {
        let body = GenerationRequest {
            model_id: self.config.model_id(),
            input: prompt,
            parameters: GenerationParameters {
                decoding_method: "greedy",
                max_new_tokens: self.config.max_new_tokens(),
                min_new_tokens: 50,
                repetition_penalty: 1.1,
            },
            project_id: self.config.project_id(),
        };

        tracing::debug!(
            "Calling generation endpoint {} with model {}",
            self.config.generation_endpoint(),
            self.config.model_id()
        );

        let response = self
            .client
            .post(self.config.generation_endpoint())
            .timeout(GENERATION_TIMEOUT)
            .header("Accept", "application/json")
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Generation response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("watsonx API error ({}): {}", status, body);
            return Err(ArchitectError::ProviderError {
                status: status.as_u16(),
                body,
            });
        }

        let generation: GenerationResponse = response.json().await?;
        generation
            .results
            .into_iter()
            .next()
            .map(|r| r.generated_text.trim().to_string())
            .ok_or_else(|| ArchitectError::ProcessingError {
                message: "Generation response contained no results".to_string(),
            })
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> TextGenerator for WatsonxClient<C> {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let token = self.fetch_token().await?;
        self.request_generation(&token, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct TestConfig {
        iam: String,
        generation: String,
    }

    impl ConfigProvider for TestConfig {
        fn iam_endpoint(&self) -> &str {
            &self.iam
        }

        fn generation_endpoint(&self) -> &str {
            &self.generation
        }

        fn api_key(&self) -> &str {
            "test-api-key"
        }

        fn project_id(&self) -> &str {
            "project-123"
        }

        fn model_id(&self) -> &str {
            "ibm/granite-13b-instruct-v2"
        }

        fn max_new_tokens(&self) -> u32 {
            1500
        }
    }

    fn client_for(server: &MockServer) -> WatsonxClient<TestConfig> {
        WatsonxClient::new(TestConfig {
            iam: server.url("/identity/token"),
            generation: server.url("/ml/v1/text/generation"),
        })
    }

    #[tokio::test]
    async fn test_generate_happy_path() {
        let server = MockServer::start();

        let token_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/identity/token")
                .header("content-type", "application/x-www-form-urlencoded")
                .body_contains("apikey=test-api-key");
            then.status(200)
                .json_body(serde_json::json!({"access_token": "tok-1", "expires_in": 3600}));
        });

        let generation_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/ml/v1/text/generation")
                .header("authorization", "Bearer tok-1")
                .json_body_partial(
                    r#"{"model_id": "ibm/granite-13b-instruct-v2", "project_id": "project-123",
                        "parameters": {"decoding_method": "greedy", "max_new_tokens": 1500, "min_new_tokens": 50}}"#,
                );
            then.status(200).json_body(serde_json::json!({
                "results": [{"generated_text": "  Strategic Restructuring Report\n"}]
            }));
        });

        let text = client_for(&server).generate("prompt").await.unwrap();

        token_mock.assert();
        generation_mock.assert();
        assert_eq!(text, "Strategic Restructuring Report");
    }

    #[tokio::test]
    async fn test_iam_failure_is_authentication_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/identity/token");
            then.status(400).body("invalid apikey");
        });

        let err = client_for(&server).generate("prompt").await.unwrap_err();
        assert!(matches!(err, ArchitectError::AuthenticationError { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_iam_is_authentication_error() {
        // nothing listens on the discard port
        let client = WatsonxClient::new(TestConfig {
            iam: "http://127.0.0.1:9/identity/token".to_string(),
            generation: "http://127.0.0.1:9/ml/v1/text/generation".to_string(),
        });

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, ArchitectError::AuthenticationError { .. }));
    }

    #[tokio::test]
    async fn test_token_response_without_access_token_is_authentication_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/identity/token");
            then.status(200).json_body(serde_json::json!({"expires_in": 3600}));
        });
        let generation_mock = server.mock(|when, then| {
            when.method(POST).path("/ml/v1/text/generation");
            then.status(200).json_body(serde_json::json!({"results": []}));
        });

        let err = client_for(&server).generate("prompt").await.unwrap_err();
        assert!(matches!(err, ArchitectError::AuthenticationError { .. }));
        generation_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_provider_error_carries_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/identity/token");
            then.status(200).json_body(serde_json::json!({"access_token": "tok"}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/ml/v1/text/generation");
            then.status(500).body("model unavailable");
        });

        let err = client_for(&server).generate("prompt").await.unwrap_err();
        match err {
            ArchitectError::ProviderError { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "model unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_results_is_processing_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/identity/token");
            then.status(200).json_body(serde_json::json!({"access_token": "tok"}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/ml/v1/text/generation");
            then.status(200).json_body(serde_json::json!({"results": []}));
        });

        let err = client_for(&server).generate("prompt").await.unwrap_err();
        assert!(matches!(err, ArchitectError::ProcessingError { .. }));
    }
}
