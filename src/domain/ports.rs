use crate::domain::model::{Listing, NewListing};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ListingRepository: Send + Sync {
    fn list_all(&self) -> Result<Vec<Listing>>;
    fn get_by_id(&self, id: &str) -> Result<Option<Listing>>;
    fn search(&self, query: &str, city: Option<&str>) -> Result<Vec<Listing>>;
    fn create(&self, listing: NewListing) -> Result<Listing>;
    /// Returns `true` when a listing was removed. Unknown ids are not an error.
    fn delete(&self, id: &str) -> Result<bool>;
}

/// One prompt sent to a hosted generative model.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// When set, the model is asked to answer with JSON matching this schema.
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    pub fn json(prompt: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Returns the raw response text.
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn ai_endpoint(&self) -> &str;
    fn ai_model(&self) -> &str;
    fn ai_api_key(&self) -> Option<&str>;
    fn ai_timeout(&self) -> Duration;
    fn default_nights(&self) -> u32;
    fn cleaning_fee(&self) -> f64;
    fn service_fee(&self) -> f64;
    fn currency(&self) -> &str;
    fn processing_delay(&self) -> Duration;
    fn success_linger(&self) -> Duration;
}
