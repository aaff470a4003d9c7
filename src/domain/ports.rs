use crate::utils::error::Result;
use async_trait::async_trait;

/// Connection settings for the hosted text-generation provider.
pub trait ConfigProvider: Send + Sync {
    fn iam_endpoint(&self) -> &str;
    fn generation_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn project_id(&self) -> &str;
    fn model_id(&self) -> &str;
    fn max_new_tokens(&self) -> u32;
}

/// Anything that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
