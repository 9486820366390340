pub mod marketplace;

pub use marketplace::{DefaultMarketplace, ListingDetail, Marketplace};
