pub mod assistant;
pub mod booking;
pub mod listing_repo;

pub use crate::domain::model::{
    Amenity, Booking, BookingStatus, Listing, ListingType, Location, NewListing, User,
};
pub use crate::domain::ports::{
    ConfigProvider, GenerationRequest, GenerativeModel, ListingRepository,
};
pub use crate::utils::error::Result;
