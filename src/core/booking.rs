use crate::core::{Booking, BookingStatus, ConfigProvider, Listing, ListingRepository, Result};
use crate::utils::error::HomestayError;
use crate::utils::validation::Validate;
use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::{watch, Mutex};

/// Fees and timings applied to every booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingPolicy {
    pub default_nights: u32,
    pub cleaning_fee: f64,
    pub service_fee: f64,
    pub currency: String,
    pub processing_delay: Duration,
    /// How long `Success` stays up before the flow drops back to `Idle`.
    pub success_linger: Duration,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            default_nights: 5,
            cleaning_fee: 85.0,
            service_fee: 120.0,
            currency: "RM".to_string(),
            processing_delay: Duration::from_millis(1500),
            success_linger: Duration::from_millis(2000),
        }
    }
}

impl BookingPolicy {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            default_nights: config.default_nights(),
            cleaning_fee: config.cleaning_fee(),
            service_fee: config.service_fee(),
            currency: config.currency().to_string(),
            processing_delay: config.processing_delay(),
            success_linger: config.success_linger(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuote {
    pub nightly_rate: f64,
    pub nights: u32,
    pub subtotal: f64,
    pub cleaning_fee: f64,
    pub service_fee: f64,
    pub total: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub listing_id: String,
    pub guest_id: String,
    pub check_in: NaiveDate,
    pub nights: Option<u32>,
    pub guest_count: u32,
}

impl Validate for BookingRequest {
    fn validate(&self) -> Result<()> {
        if self.nights == Some(0) {
            return Err(HomestayError::validation("A stay must last at least one night"));
        }
        if self.guest_count == 0 {
            return Err(HomestayError::validation("At least one guest is required"));
        }
        Ok(())
    }
}

/// What a booking screen shows while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFlowState {
    Idle,
    Processing,
    Success,
}

pub struct BookingService<R: ListingRepository> {
    listings: Arc<R>,
    policy: BookingPolicy,
    bookings: RwLock<Vec<Booking>>,
    /// One screen, one flow: the state tracks a single booking at a time.
    flow: watch::Sender<BookingFlowState>,
    in_flight: Mutex<()>,
}

impl<R: ListingRepository> BookingService<R> {
    pub fn new(listings: Arc<R>, policy: BookingPolicy) -> Self {
        let (flow, _) = watch::channel(BookingFlowState::Idle);
        Self {
            listings,
            policy,
            bookings: RwLock::new(Vec::new()),
            flow,
            in_flight: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    /// Overlapping `request_booking` calls take turns, so a receiver sees
    /// `Processing -> Success -> Idle` for each booking in order.
    pub fn subscribe(&self) -> watch::Receiver<BookingFlowState> {
        self.flow.subscribe()
    }

    pub fn flow_state(&self) -> BookingFlowState {
        *self.flow.borrow()
    }

    pub fn quote(&self, listing: &Listing, nights: Option<u32>) -> BookingQuote {
        let nights = nights.unwrap_or(self.policy.default_nights);
        let subtotal = listing.price_per_night * f64::from(nights);
        BookingQuote {
            nightly_rate: listing.price_per_night,
            nights,
            subtotal,
            cleaning_fee: self.policy.cleaning_fee,
            service_fee: self.policy.service_fee,
            total: subtotal + self.policy.cleaning_fee + self.policy.service_fee,
            currency: self.policy.currency.clone(),
        }
    }

    /// Records a pending booking, waits out the simulated processing time, then confirms it.
    /// `Success` is held for `success_linger` before the flow returns to `Idle`.
    pub async fn request_booking(&self, request: BookingRequest) -> Result<Booking> {
        request.validate()?;

        let listing = self
            .listings
            .get_by_id(&request.listing_id)?
            .ok_or_else(|| HomestayError::NotFound {
                entity: "listing",
                id: request.listing_id.clone(),
            })?;

        if request.guest_count > listing.max_guests {
            return Err(HomestayError::validation(format!(
                "{} hosts at most {} guests, requested {}",
                listing.title, listing.max_guests, request.guest_count
            )));
        }

        let quote = self.quote(&listing, request.nights);
        let check_out = request
            .check_in
            .checked_add_days(Days::new(u64::from(quote.nights)))
            .ok_or_else(|| HomestayError::validation("Check-out date is out of range"))?;

        let booking = {
            let mut bookings = self
                .bookings
                .write()
                .map_err(|_| HomestayError::poisoned("bookings"))?;
            let booking = Booking {
                id: format!("b{}", bookings.len() + 1),
                listing_id: listing.id.clone(),
                guest_id: request.guest_id.clone(),
                check_in: request.check_in,
                check_out,
                total_price: quote.total,
                status: BookingStatus::Pending,
                guest_count: request.guest_count,
                created_at: Utc::now(),
            };
            bookings.push(booking.clone());
            booking
        };

        tracing::info!(
            "📝 Booking {} pending: {} for {} nights, total {}{:.2}",
            booking.id,
            listing.id,
            quote.nights,
            quote.currency,
            quote.total
        );

        let _turn = self.in_flight.lock().await;
        self.flow.send_replace(BookingFlowState::Processing);
        tokio::time::sleep(self.policy.processing_delay).await;
        let confirmed = self.transition(&booking.id, BookingStatus::Confirmed);
        match &confirmed {
            Ok(_) => {
                self.flow.send_replace(BookingFlowState::Success);
                tokio::time::sleep(self.policy.success_linger).await;
            }
            Err(e) => {
                tracing::error!("Booking {} could not be confirmed: {}", booking.id, e);
            }
        }
        self.flow.send_replace(BookingFlowState::Idle);
        confirmed
    }

    pub fn transition(&self, id: &str, next: BookingStatus) -> Result<Booking> {
        let mut bookings = self
            .bookings
            .write()
            .map_err(|_| HomestayError::poisoned("bookings"))?;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| HomestayError::NotFound {
                entity: "booking",
                id: id.to_string(),
            })?;

        if !booking.status.can_transition_to(next) {
            return Err(HomestayError::InvalidTransition {
                id: id.to_string(),
                from: booking.status.to_string(),
                to: next.to_string(),
            });
        }

        tracing::debug!("Booking {}: {} -> {}", id, booking.status, next);
        booking.status = next;
        Ok(booking.clone())
    }

    pub fn cancel(&self, id: &str) -> Result<Booking> {
        self.transition(id, BookingStatus::Cancelled)
    }

    pub fn get(&self, id: &str) -> Result<Option<Booking>> {
        let bookings = self
            .bookings
            .read()
            .map_err(|_| HomestayError::poisoned("bookings"))?;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    pub fn bookings_for_guest(&self, guest_id: &str) -> Result<Vec<Booking>> {
        let bookings = self
            .bookings
            .read()
            .map_err(|_| HomestayError::poisoned("bookings"))?;
        Ok(bookings
            .iter()
            .filter(|b| b.guest_id == guest_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::listing_repo::InMemoryListingRepository;

    fn service() -> BookingService<InMemoryListingRepository> {
        let policy = BookingPolicy {
            processing_delay: Duration::ZERO,
            success_linger: Duration::ZERO,
            ..Default::default()
        };
        BookingService::new(Arc::new(InMemoryListingRepository::seeded()), policy)
    }

    #[test]
    fn test_quote_uses_default_nights_and_fees() {
        let service = service();
        let listing = service.listings.get_by_id("l2").unwrap().unwrap();
        let quote = service.quote(&listing, None);

        assert_eq!(quote.nights, 5);
        assert_eq!(quote.subtotal, listing.price_per_night * 5.0);
        assert_eq!(quote.total, listing.price_per_night * 5.0 + 85.0 + 120.0);
        assert_eq!(quote.currency, "RM");
    }

    #[test]
    fn test_request_validation() {
        let mut req = BookingRequest {
            listing_id: "l1".to_string(),
            guest_id: "u1".to_string(),
            check_in: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            nights: Some(0),
            guest_count: 1,
        };
        assert!(req.validate().is_err());
        req.nights = None;
        req.guest_count = 0;
        assert!(req.validate().is_err());
        req.guest_count = 2;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_unknown_booking_transition_is_not_found() {
        let service = service();
        let err = service.cancel("b99").unwrap_err();
        assert!(matches!(err, HomestayError::NotFound { entity: "booking", .. }));
    }
}
