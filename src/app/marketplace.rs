use crate::adapters::GeminiClient;
use crate::core::assistant::{AiAssistant, DescriptionRequest, PriceSuggestion};
use crate::core::booking::{BookingPolicy, BookingQuote, BookingRequest, BookingService};
use crate::core::listing_repo::InMemoryListingRepository;
use crate::core::{
    Amenity, Booking, ConfigProvider, GenerativeModel, Listing, ListingRepository, NewListing,
    Result, User,
};
use crate::domain::seed;
use crate::utils::error::HomestayError;
use serde::Serialize;
use std::sync::Arc;

/// Everything the detail view needs for one listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail {
    pub listing: Listing,
    pub amenities: Vec<Amenity>,
    pub host: Option<User>,
    pub quote: BookingQuote,
}

/// The facade over any listing store and any generative model.
pub struct Marketplace<R: ListingRepository, M: GenerativeModel> {
    listings: Arc<R>,
    bookings: BookingService<R>,
    assistant: AiAssistant<M>,
    amenities: Vec<Amenity>,
    users: Vec<User>,
}

/// The process-local store wired to the hosted model, as the CLI runs it.
pub type DefaultMarketplace = Marketplace<InMemoryListingRepository, GeminiClient>;

impl DefaultMarketplace {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = GeminiClient::from_config(config)?;
        if !client.has_api_key() {
            tracing::warn!("No AI API key configured, AI features will return fallbacks");
        }
        Ok(Self::new(
            InMemoryListingRepository::seeded(),
            BookingPolicy::from_config(config),
            client,
        ))
    }
}

impl<R: ListingRepository, M: GenerativeModel> Marketplace<R, M> {
    pub fn new(listings: R, policy: BookingPolicy, model: M) -> Self {
        let listings = Arc::new(listings);
        Self {
            bookings: BookingService::new(Arc::clone(&listings), policy),
            listings,
            assistant: AiAssistant::new(model),
            amenities: seed::amenities(),
            users: seed::users(),
        }
    }

    pub fn listings(&self) -> &R {
        &self.listings
    }

    pub fn bookings(&self) -> &BookingService<R> {
        &self.bookings
    }

    pub fn assistant(&self) -> &AiAssistant<M> {
        &self.assistant
    }

    /// The signed-in guest. There is no authentication, so it is always the first mock user.
    pub fn current_user(&self) -> Option<&User> {
        self.users.first()
    }

    pub fn list_all(&self) -> Result<Vec<Listing>> {
        self.listings.list_all()
    }

    pub fn get_listing(&self, id: &str) -> Result<Listing> {
        self.listings
            .get_by_id(id)?
            .ok_or_else(|| HomestayError::NotFound {
                entity: "listing",
                id: id.to_string(),
            })
    }

    pub fn listing_detail(&self, id: &str) -> Result<ListingDetail> {
        let listing = self.get_listing(id)?;
        Ok(ListingDetail {
            amenities: self.resolve_amenities(&listing.amenities),
            host: self.users.iter().find(|u| u.id == listing.host_id).cloned(),
            quote: self.bookings.quote(&listing, None),
            listing,
        })
    }

    /// Unknown amenity ids are skipped.
    pub fn resolve_amenities(&self, ids: &[String]) -> Vec<Amenity> {
        ids.iter()
            .filter_map(|id| self.amenities.iter().find(|a| &a.id == id).cloned())
            .collect()
    }

    pub fn search(&self, query: &str, city: Option<&str>) -> Result<Vec<Listing>> {
        self.listings.search(query, city)
    }

    pub fn create_listing(&self, listing: NewListing) -> Result<Listing> {
        self.listings.create(listing)
    }

    /// Creates a listing, drafting the description with the AI when it is blank.
    pub async fn create_listing_with_ai_description(
        &self,
        mut listing: NewListing,
        vibe: &str,
    ) -> Result<Listing> {
        if listing.description.trim().is_empty() {
            let names = self
                .resolve_amenities(&listing.amenities)
                .into_iter()
                .map(|a| a.name)
                .collect();
            listing.description = self
                .assistant
                .generate_description(&DescriptionRequest {
                    title: listing.title.clone(),
                    amenities: names,
                    vibe: vibe.to_string(),
                })
                .await;
        }
        self.listings.create(listing)
    }

    pub fn delete_listing(&self, id: &str) -> Result<bool> {
        self.listings.delete(id)
    }

    pub async fn book(&self, request: BookingRequest) -> Result<Booking> {
        self.bookings.request_booking(request).await
    }

    pub async fn suggest_price(&self, listing_id: &str) -> Result<PriceSuggestion> {
        let listing = self.get_listing(listing_id)?;
        Ok(self.assistant.suggest_price_for(&listing).await)
    }

    pub async fn describe(&self, request: &DescriptionRequest) -> String {
        self.assistant.generate_description(request).await
    }
}
