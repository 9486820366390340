//! Mock data the in-memory store starts from on every launch.

use crate::domain::model::{Amenity, Listing, ListingType, Location, Review, User, UserRole};

fn amenity(id: &str, name: &str, icon: &str) -> Amenity {
    Amenity {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

pub fn amenities() -> Vec<Amenity> {
    vec![
        amenity("wifi", "Wifi", "📶"),
        amenity("kitchen", "Kitchen", "🍳"),
        amenity("pool", "Pool", "🏊"),
        amenity("ac", "Air conditioning", "❄️"),
        amenity("parking", "Free parking", "🚗"),
        amenity("workspace", "Dedicated workspace", "💻"),
        amenity("washer", "Washer", "🧺"),
        amenity("tv", "TV", "📺"),
        amenity("beach", "Beach access", "🏖️"),
        amenity("bbq", "BBQ grill", "🍖"),
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "u1".to_string(),
            name: "Aisyah Rahman".to_string(),
            email: "aisyah@example.com".to_string(),
            role: UserRole::Guest,
            profile_image: Some("https://i.pravatar.cc/150?u=u1".to_string()),
            bio: Some("Weekend traveller, always hunting for sea views.".to_string()),
            is_verified: true,
            joined_date: "2021-03-14".to_string(),
        },
        User {
            id: "u2".to_string(),
            name: "Daniel Tan".to_string(),
            email: "daniel@example.com".to_string(),
            role: UserRole::Host,
            profile_image: Some("https://i.pravatar.cc/150?u=u2".to_string()),
            bio: Some("Superhost in Penang and Langkawi.".to_string()),
            is_verified: true,
            joined_date: "2019-07-02".to_string(),
        },
        User {
            id: "u3".to_string(),
            name: "Priya Nair".to_string(),
            email: "priya@example.com".to_string(),
            role: UserRole::Admin,
            profile_image: None,
            bio: None,
            is_verified: true,
            joined_date: "2018-01-20".to_string(),
        },
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    host_id: &str,
    title: &str,
    description: &str,
    price_per_night: f64,
    listing_type: ListingType,
    location: Location,
    amenities: &[&str],
    (max_guests, bedrooms, beds, bathrooms): (u32, u32, u32, f32),
    rating: f32,
    reviews: Vec<Review>,
) -> Listing {
    Listing {
        id: id.to_string(),
        host_id: host_id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price_per_night,
        listing_type,
        location,
        images: vec![format!("https://picsum.photos/seed/{}/800/600", id)],
        amenities: strings(amenities),
        max_guests,
        bedrooms,
        beds,
        bathrooms,
        rating,
        review_count: reviews.len() as u32,
        reviews,
        house_rules: strings(&["No smoking", "No parties or events", "Check-in after 3pm"]),
    }
}

fn location(address: &str, city: &str, lat: f64, lng: f64) -> Location {
    Location {
        address: address.to_string(),
        city: city.to_string(),
        country: "Malaysia".to_string(),
        lat,
        lng,
    }
}

fn review(id: &str, rating: f32, comment: &str, date: &str) -> Review {
    Review {
        id: id.to_string(),
        user_id: "u1".to_string(),
        user_name: "Aisyah Rahman".to_string(),
        user_image: "https://i.pravatar.cc/150?u=u1".to_string(),
        rating,
        comment: comment.to_string(),
        date: date.to_string(),
    }
}

pub fn listings() -> Vec<Listing> {
    vec![
        listing(
            "l1",
            "u2",
            "Seaview Villa with Infinity Pool",
            "Wake up to the Andaman Sea from a private villa with an infinity pool and a short walk to Pantai Cenang.",
            650.0,
            ListingType::EntireHome,
            location("Jalan Pantai Cenang", "Langkawi", 6.2925, 99.7289),
            &["wifi", "pool", "ac", "kitchen", "beach", "bbq"],
            (6, 3, 3, 3.0),
            4.9,
            vec![review("r1", 5.0, "The sunset from the pool was unreal.", "2024-02-11")],
        ),
        listing(
            "l2",
            "u2",
            "Heritage Shophouse in George Town",
            "Restored 1920s shophouse steps from the street art trail, with an airy courtyard and original tiles.",
            280.0,
            ListingType::EntireHome,
            location("Lebuh Armenian", "George Town", 5.4145, 100.3380),
            &["wifi", "ac", "kitchen", "washer"],
            (4, 2, 2, 1.5),
            4.8,
            vec![review("r2", 4.5, "Great base for exploring the food scene.", "2024-01-05")],
        ),
        listing(
            "l3",
            "u2",
            "Misty Highlands Cabin",
            "Cosy timber cabin among tea plantations, with a fireplace for cool Cameron Highlands evenings.",
            220.0,
            ListingType::EntireHome,
            location("Jalan Besar, Tanah Rata", "Cameron Highlands", 4.4722, 101.3801),
            &["wifi", "kitchen", "parking", "tv"],
            (4, 2, 3, 1.0),
            4.7,
            Vec::new(),
        ),
        listing(
            "l4",
            "u2",
            "KLCC Skyline Studio",
            "Modern studio with a workspace and a view of the Petronas Towers, five minutes from the LRT.",
            190.0,
            ListingType::PrivateRoom,
            location("Jalan Ampang", "Kuala Lumpur", 3.1579, 101.7116),
            &["wifi", "ac", "workspace", "pool", "tv"],
            (2, 1, 1, 1.0),
            4.6,
            vec![review("r3", 4.0, "Perfect for a work trip.", "2023-11-19")],
        ),
        listing(
            "l5",
            "u2",
            "Riverside Loft near Jonker Street",
            "Bright loft overlooking the Melaka river, a short stroll from the Jonker Street night market.",
            160.0,
            ListingType::PrivateRoom,
            location("Jalan Kampung Pantai", "Melaka", 2.1960, 102.2480),
            &["wifi", "ac", "washer"],
            (2, 1, 1, 1.0),
            4.5,
            Vec::new(),
        ),
        listing(
            "l6",
            "u2",
            "Kinabalu Backpacker Bunk",
            "Shared dorm bed for trekkers heading up Mount Kinabalu, with lockers and a communal kitchen.",
            45.0,
            ListingType::SharedRoom,
            location("Jalan Gaya", "Kota Kinabalu", 5.9804, 116.0735),
            &["wifi", "kitchen"],
            (1, 1, 1, 1.0),
            4.2,
            Vec::new(),
        ),
    ]
}
