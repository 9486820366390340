use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "myhomestay")]
#[command(about = "Browse, book and price vacation rentals from the terminal")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every listing
    List,
    /// Show one listing with its amenities and price breakdown
    Show { id: String },
    /// Search titles and descriptions, optionally within a city
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        city: Option<String>,
    },
    /// Create a listing
    Create(CreateArgs),
    /// Delete a listing
    Delete { id: String },
    /// Book a listing for the current guest
    Book {
        id: String,
        #[arg(long)]
        nights: Option<u32>,
        #[arg(long, default_value = "1")]
        guests: u32,
        /// Check-in date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        check_in: Option<chrono::NaiveDate>,
    },
    /// Ask the AI for a nightly price for a listing
    SuggestPrice { id: String },
    /// Ask the AI to draft a listing description
    Describe {
        #[arg(long)]
        title: String,
        #[arg(long, value_delimiter = ',')]
        amenities: Vec<String>,
        #[arg(long, default_value = "relaxing")]
        vibe: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long)]
    pub city: String,
    #[arg(long, default_value = "Malaysia")]
    pub country: String,
    #[arg(long, default_value = "")]
    pub address: String,
    /// entire-home, private-room or shared-room
    #[arg(long = "type", default_value = "entire-home")]
    pub listing_type: ListingTypeArg,
    #[arg(long, default_value = "1")]
    pub bedrooms: u32,
    #[arg(long, default_value = "1")]
    pub beds: u32,
    #[arg(long, default_value = "1")]
    pub bathrooms: f32,
    #[arg(long, default_value = "2")]
    pub max_guests: u32,
    #[arg(long, value_delimiter = ',')]
    pub amenities: Vec<String>,
    /// Ask the AI to write the description when none is given
    #[arg(long)]
    pub ai_description: bool,
    #[arg(long, default_value = "relaxing")]
    pub vibe: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListingTypeArg {
    EntireHome,
    PrivateRoom,
    SharedRoom,
}

impl From<ListingTypeArg> for crate::core::ListingType {
    fn from(arg: ListingTypeArg) -> Self {
        match arg {
            ListingTypeArg::EntireHome => crate::core::ListingType::EntireHome,
            ListingTypeArg::PrivateRoom => crate::core::ListingType::PrivateRoom,
            ListingTypeArg::SharedRoom => crate::core::ListingType::SharedRoom,
        }
    }
}
