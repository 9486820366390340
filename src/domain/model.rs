use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Guest,
    Host,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub is_verified: bool,
    pub joined_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_image: String,
    pub rating: f32,
    pub comment: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingType {
    #[default]
    EntireHome,
    PrivateRoom,
    SharedRoom,
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ListingType::EntireHome => "ENTIRE_HOME",
            ListingType::PrivateRoom => "PRIVATE_ROOM",
            ListingType::SharedRoom => "SHARED_ROOM",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub host_id: String,
    pub title: String,
    pub description: String,
    pub price_per_night: f64,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub location: Location,
    pub images: Vec<String>,
    /// Amenity ids, resolved against the catalogue for display.
    pub amenities: Vec<String>,
    pub max_guests: u32,
    pub bedrooms: u32,
    pub beds: u32,
    pub bathrooms: f32,
    pub rating: f32,
    pub review_count: u32,
    pub reviews: Vec<Review>,
    pub house_rules: Vec<String>,
}

/// Partial listing accepted by `create`. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewListing {
    pub host_id: String,
    pub title: String,
    pub description: String,
    pub price_per_night: f64,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub location: Location,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub max_guests: u32,
    pub bedrooms: u32,
    pub beds: u32,
    pub bathrooms: f32,
    pub house_rules: Vec<String>,
}

impl NewListing {
    pub(crate) fn into_listing(self, id: String) -> Listing {
        Listing {
            id,
            host_id: self.host_id,
            title: self.title,
            description: self.description,
            price_per_night: self.price_per_night,
            listing_type: self.listing_type,
            location: self.location,
            images: self.images,
            amenities: self.amenities,
            max_guests: self.max_guests,
            bedrooms: self.bedrooms,
            beds: self.beds,
            bathrooms: self.bathrooms,
            rating: 0.0,
            review_count: 0,
            reviews: Vec::new(),
            house_rules: self.house_rules,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Declined,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Declined)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Confirmed, Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Declined => "DECLINED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub listing_id: String,
    pub guest_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
    pub status: BookingStatus,
    pub guest_count: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_serializes_with_original_field_names() {
        let listing = NewListing {
            title: "Loft".to_string(),
            price_per_night: 120.0,
            listing_type: ListingType::PrivateRoom,
            ..Default::default()
        }
        .into_listing("l9".to_string());

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["type"], "PRIVATE_ROOM");
        assert_eq!(json["pricePerNight"], 120.0);
        assert_eq!(json["reviewCount"], 0);
        assert!(json["reviews"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_new_listing_accepts_partial_json() {
        let partial: NewListing =
            serde_json::from_str(r#"{"title":"Cabin","pricePerNight":90}"#).unwrap();
        assert_eq!(partial.title, "Cabin");
        assert_eq!(partial.listing_type, ListingType::EntireHome);
        assert!(partial.amenities.is_empty());
    }

    #[test]
    fn test_booking_status_transitions() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(!Declined.can_transition_to(Confirmed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Pending));
    }
}
