use clap::Parser;
use myhomestay::app::{DefaultMarketplace, ListingDetail};
use myhomestay::config::cli::CreateArgs;
use myhomestay::config::{CliConfig, Command, TomlConfig};
use myhomestay::core::assistant::{DescriptionRequest, PriceSuggestion};
use myhomestay::core::booking::{BookingFlowState, BookingRequest};
use myhomestay::core::{Booking, Listing, Location, NewListing};
use myhomestay::utils::{logger, validation::Validate};
use myhomestay::HomestayError;
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI args: {:?}", cli);

    let config = match TomlConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let market = match DefaultMarketplace::from_config(&config) {
        Ok(market) => market,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = run(&market, cli.command, cli.json).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(&e);
    }

    Ok(())
}

fn exit_with(e: &HomestayError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code())
}

async fn run(market: &DefaultMarketplace, command: Command, json: bool) -> myhomestay::Result<()> {
    match command {
        Command::List => {
            let listings = market.list_all()?;
            emit(json, &listings, || print_listings(&listings, market))?;
        }
        Command::Show { id } => {
            let detail = market.listing_detail(&id)?;
            emit(json, &detail, || print_detail(&detail))?;
        }
        Command::Search { query, city } => {
            let listings = market.search(&query, city.as_deref())?;
            emit(json, &listings, || print_listings(&listings, market))?;
        }
        Command::Create(args) => {
            let vibe = args.vibe.clone();
            let use_ai = args.ai_description;
            let new_listing = new_listing_from(args, market);
            let created = if use_ai {
                market
                    .create_listing_with_ai_description(new_listing, &vibe)
                    .await?
            } else {
                market.create_listing(new_listing)?
            };
            emit(json, &created, || {
                println!("✅ Created {} ({})", created.id, created.title);
                println!("{}", created.description);
            })?;
        }
        Command::Delete { id } => {
            let removed = market.delete_listing(&id)?;
            let remaining = market.list_all()?.len();
            emit(
                json,
                &serde_json::json!({ "id": id, "removed": removed, "remaining": remaining }),
                || {
                    if removed {
                        println!("🗑️  Deleted {}, {} listings left", id, remaining);
                    } else {
                        println!("Nothing to delete for {}", id);
                    }
                },
            )?;
        }
        Command::Book {
            id,
            nights,
            guests,
            check_in,
        } => {
            let guest_id = market
                .current_user()
                .map(|u| u.id.clone())
                .unwrap_or_default();
            let request = BookingRequest {
                listing_id: id,
                guest_id,
                check_in: check_in.unwrap_or_else(|| chrono::Local::now().date_naive()),
                nights,
                guest_count: guests,
            };

            let mut flow = market.bookings().subscribe();
            let watcher = tokio::spawn(async move {
                while flow.changed().await.is_ok() {
                    match *flow.borrow_and_update() {
                        BookingFlowState::Processing => tracing::info!("⏳ Processing booking..."),
                        BookingFlowState::Success => tracing::info!("🎉 Booking confirmed"),
                        BookingFlowState::Idle => {}
                    }
                }
            });
            let result = market.book(request).await;
            watcher.abort();

            let booking = result?;
            emit(json, &booking, || print_booking(&booking, market))?;
        }
        Command::SuggestPrice { id } => {
            let suggestion = market.suggest_price(&id).await?;
            let currency = market.bookings().policy().currency.clone();
            emit(json, &suggestion, || print_suggestion(&suggestion, &currency))?;
        }
        Command::Describe {
            title,
            amenities,
            vibe,
        } => {
            let description = market
                .describe(&DescriptionRequest {
                    title,
                    amenities,
                    vibe,
                })
                .await;
            emit(
                json,
                &serde_json::json!({ "description": description }),
                || println!("{}", description),
            )?;
        }
    }
    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce()) -> myhomestay::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human();
    }
    Ok(())
}

fn new_listing_from(args: CreateArgs, market: &DefaultMarketplace) -> NewListing {
    NewListing {
        host_id: market
            .current_user()
            .map(|u| u.id.clone())
            .unwrap_or_default(),
        title: args.title,
        description: args.description,
        price_per_night: args.price,
        listing_type: args.listing_type.into(),
        location: Location {
            address: args.address,
            city: args.city,
            country: args.country,
            ..Default::default()
        },
        amenities: args.amenities,
        max_guests: args.max_guests,
        bedrooms: args.bedrooms,
        beds: args.beds,
        bathrooms: args.bathrooms,
        ..Default::default()
    }
}

fn print_listings(listings: &[Listing], market: &DefaultMarketplace) {
    if listings.is_empty() {
        println!("No listings found.");
        return;
    }
    let currency = &market.bookings().policy().currency;
    for l in listings {
        println!(
            "{:<4} {:<40} {:<18} {}{:.0}/night  ★ {:.1}",
            l.id, l.title, l.location.city, currency, l.price_per_night, l.rating
        );
    }
}

fn print_detail(detail: &ListingDetail) {
    let l = &detail.listing;
    let q = &detail.quote;
    println!("{} ({})", l.title, l.id);
    println!("{}, {}", l.location.city, l.location.country);
    println!(
        "{} · {} guests · {} bedrooms · {} beds · {} baths",
        l.listing_type, l.max_guests, l.bedrooms, l.beds, l.bathrooms
    );
    if let Some(host) = &detail.host {
        println!("Hosted by {}", host.name);
    }
    println!();
    println!("{}", l.description);
    println!();
    println!("What this place offers:");
    for a in &detail.amenities {
        println!("  {} {}", a.icon, a.name);
    }
    println!();
    println!(
        "{}{:.0} x {} nights   {}{:.0}",
        q.currency, q.nightly_rate, q.nights, q.currency, q.subtotal
    );
    println!("Cleaning fee        {}{:.0}", q.currency, q.cleaning_fee);
    println!("Service fee         {}{:.0}", q.currency, q.service_fee);
    println!("Total               {}{:.0}", q.currency, q.total);
}

fn print_booking(booking: &Booking, market: &DefaultMarketplace) {
    let currency = &market.bookings().policy().currency;
    println!("🎉 Booking {} {}", booking.id, booking.status);
    println!(
        "{} → {} for {} guest(s), total {}{:.2}",
        booking.check_in, booking.check_out, booking.guest_count, currency, booking.total_price
    );
}

fn print_suggestion(suggestion: &PriceSuggestion, currency: &str) {
    println!(
        "Recommended: {}{:.0}/night",
        currency, suggestion.suggested_price
    );
    println!("{}", suggestion.reason);
}
