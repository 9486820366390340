use crate::core::{GenerationRequest, GenerativeModel, Listing, ListingType};
use crate::utils::error::{HomestayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const FALLBACK_PRICE_REASON: &str = "Could not calculate price.";
pub const FALLBACK_DESCRIPTION: &str = "An amazing place to stay!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRequest {
    pub city: String,
    pub listing_type: ListingType,
    pub amenities: Vec<String>,
    pub bedrooms: u32,
}

impl From<&Listing> for PriceRequest {
    fn from(listing: &Listing) -> Self {
        Self {
            city: listing.location.city.clone(),
            listing_type: listing.listing_type,
            amenities: listing.amenities.clone(),
            bedrooms: listing.bedrooms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionRequest {
    pub title: String,
    pub amenities: Vec<String>,
    pub vibe: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSuggestion {
    pub suggested_price: f64,
    pub reason: String,
}

impl PriceSuggestion {
    pub fn fallback() -> Self {
        Self {
            suggested_price: 0.0,
            reason: FALLBACK_PRICE_REASON.to_string(),
        }
    }
}

pub fn price_prompt(req: &PriceRequest) -> String {
    format!(
        "Act as a real estate pricing expert for vacation rentals.\n\
         Given these details: City: {}, Type: {}, Bedrooms: {}, Amenities: {}.\n\
         Suggest a daily price in USD and a brief reason.",
        req.city,
        req.listing_type,
        req.bedrooms,
        req.amenities.join(", ")
    )
}

pub fn price_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestedPrice": { "type": "NUMBER" },
            "reason": { "type": "STRING" }
        },
        "required": ["suggestedPrice", "reason"]
    })
}

pub fn description_prompt(req: &DescriptionRequest) -> String {
    format!(
        "Write a compelling Airbnb-style listing description for a place titled \"{}\".\n\
         It has these amenities: {}.\n\
         The desired vibe is {}. Keep it under 150 words.",
        req.title,
        req.amenities.join(", "),
        req.vibe
    )
}

/// Pricing and copywriting helpers backed by a hosted model.
///
/// Neither call ever fails: any error is logged and replaced by a fixed value.
pub struct AiAssistant<M: GenerativeModel> {
    model: M,
}

impl<M: GenerativeModel> AiAssistant<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub async fn suggest_smart_price(&self, req: &PriceRequest) -> PriceSuggestion {
        match self.try_suggest_price(req).await {
            Ok(suggestion) => {
                tracing::info!(
                    "💡 Suggested {:.2}/night for {} {} in {}",
                    suggestion.suggested_price,
                    req.bedrooms,
                    req.listing_type,
                    req.city
                );
                suggestion
            }
            Err(e) => {
                tracing::error!("AI pricing error: {}", e);
                PriceSuggestion::fallback()
            }
        }
    }

    pub async fn suggest_price_for(&self, listing: &Listing) -> PriceSuggestion {
        self.suggest_smart_price(&PriceRequest::from(listing)).await
    }

    pub async fn generate_description(&self, req: &DescriptionRequest) -> String {
        let request = GenerationRequest::text(description_prompt(req));
        match self.model.generate(request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::error!("AI description error: empty response");
                FALLBACK_DESCRIPTION.to_string()
            }
            Err(e) => {
                tracing::error!("AI description error: {}", e);
                FALLBACK_DESCRIPTION.to_string()
            }
        }
    }

    async fn try_suggest_price(&self, req: &PriceRequest) -> Result<PriceSuggestion> {
        let request = GenerationRequest::json(price_prompt(req), price_schema());
        let text = self.model.generate(request).await?;
        let suggestion: PriceSuggestion = serde_json::from_str(text.trim())?;
        if !suggestion.suggested_price.is_finite() {
            return Err(HomestayError::AiResponseError {
                message: format!("non-finite price {}", suggestion.suggested_price),
            });
        }
        Ok(suggestion)
    }
}
