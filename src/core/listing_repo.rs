use crate::core::{Listing, ListingRepository, NewListing, Result};
use crate::domain::seed;
use crate::utils::error::HomestayError;
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use std::sync::RwLock;

impl Validate for NewListing {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("title", &self.title)
            .map_err(|_| HomestayError::validation("A listing needs a title"))?;
        if !self.price_per_night.is_finite() || self.price_per_night <= 0.0 {
            return Err(HomestayError::validation(format!(
                "Price per night must be positive, got {}",
                self.price_per_night
            )));
        }
        validate_positive_number("max_guests", self.max_guests, 1)
            .map_err(|_| HomestayError::validation("A listing must host at least one guest"))?;
        Ok(())
    }
}

/// Listings held in a plain vector. Lost when the process exits.
#[derive(Debug)]
pub struct InMemoryListingRepository {
    listings: RwLock<Vec<Listing>>,
}

impl InMemoryListingRepository {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings: RwLock::new(listings),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::listings())
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Back to the seed state, as a page reload would do.
    pub fn reset(&self) -> Result<()> {
        let mut listings = self
            .listings
            .write()
            .map_err(|_| HomestayError::poisoned("listings"))?;
        *listings = seed::listings();
        tracing::debug!("Listing store reset to {} seed listings", listings.len());
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Listing>>> {
        self.listings
            .read()
            .map_err(|_| HomestayError::poisoned("listings"))
    }
}

impl Default for InMemoryListingRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

fn next_id(listings: &[Listing]) -> String {
    let mut n = listings.len() + 1;
    loop {
        let candidate = format!("l{}", n);
        if !listings.iter().any(|l| l.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

impl ListingRepository for InMemoryListingRepository {
    fn list_all(&self) -> Result<Vec<Listing>> {
        Ok(self.read()?.clone())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Listing>> {
        Ok(self.read()?.iter().find(|l| l.id == id).cloned())
    }

    fn search(&self, query: &str, city: Option<&str>) -> Result<Vec<Listing>> {
        let query = query.to_lowercase();
        // an empty city means no city filter
        let city = city.filter(|c| !c.is_empty()).map(str::to_lowercase);

        let matches: Vec<Listing> = self
            .read()?
            .iter()
            .filter(|l| {
                let matches_query = l.title.to_lowercase().contains(&query)
                    || l.description.to_lowercase().contains(&query);
                let matches_city = city
                    .as_deref()
                    .map_or(true, |c| l.location.city.to_lowercase() == c);
                matches_query && matches_city
            })
            .cloned()
            .collect();

        tracing::debug!(
            "Search '{}' (city: {:?}) matched {} listings",
            query,
            city,
            matches.len()
        );
        Ok(matches)
    }

    fn create(&self, listing: NewListing) -> Result<Listing> {
        listing.validate()?;

        let mut listings = self
            .listings
            .write()
            .map_err(|_| HomestayError::poisoned("listings"))?;
        let id = next_id(&listings);
        let created = listing.into_listing(id);
        listings.push(created.clone());

        tracing::info!("Created listing {} ({})", created.id, created.title);
        Ok(created)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut listings = self
            .listings
            .write()
            .map_err(|_| HomestayError::poisoned("listings"))?;
        let before = listings.len();
        listings.retain(|l| l.id != id);
        let removed = listings.len() < before;

        if removed {
            tracing::info!("Deleted listing {}", id);
        } else {
            tracing::debug!("Delete ignored, no listing {}", id);
        }
        Ok(removed)
    }
}
