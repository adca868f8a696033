use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hostel_scout::geo::GeoPoint;
use hostel_scout::{
    init_logging, AppConfig, FixtureSource, Focus, HttpListingSource, ListingSource,
    SearchParameters, SearchSession, SessionStatus, ViewSync,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "hostel-scout")]
#[command(about = "Find hostels near a point, as a ranked list and map markers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the list and map projections
    Search {
        /// Free-text query matched against name and address
        #[arg(long, default_value = "")]
        query: String,

        /// Search center latitude (defaults to the configured center)
        #[arg(long, requires = "long", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Search center longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        long: Option<f64>,

        /// Radius in meters (defaults to the configured radius)
        #[arg(long)]
        radius: Option<f64>,

        /// Search everywhere instead of around a point
        #[arg(long, conflicts_with_all = ["lat", "long", "radius"])]
        anywhere: bool,

        /// Use built-in sample listings instead of the listing service
        #[arg(long)]
        fixture: bool,

        /// Write the ranked results to this file as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Panel to emphasize on narrow screens
        #[arg(long, value_enum, default_value_t = FocusArg::List)]
        focus: FocusArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FocusArg {
    List,
    Map,
}

impl From<FocusArg> for Focus {
    fn from(arg: FocusArg) -> Self {
        match arg {
            FocusArg::List => Focus::List,
            FocusArg::Map => Focus::Map,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(Level::INFO);

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Search {
            query,
            lat,
            long,
            radius,
            anywhere,
            fixture,
            json,
            focus,
        } => {
            let mut params = SearchParameters::new().with_query(query);
            if !anywhere {
                let center = match (lat, long) {
                    (Some(lat), Some(long)) => {
                        GeoPoint::new(lat, long).context("Invalid search center")?
                    }
                    _ => config.default_center,
                };
                let radius = radius.unwrap_or(config.default_radius_m);
                params = params.within(center, radius).context("Invalid radius")?;
            }

            let source: Arc<dyn ListingSource> = if fixture {
                Arc::new(FixtureSource::ahmedabad())
            } else {
                Arc::new(HttpListingSource::new(&config)?)
            };

            run_search(&config, source, params, json, focus.into()).await
        }
    }
}

async fn run_search(
    config: &AppConfig,
    source: Arc<dyn ListingSource>,
    params: SearchParameters,
    json: Option<PathBuf>,
    focus: Focus,
) -> Result<()> {
    info!("🏠 Hostel Scout - {} source", source.source_name());

    let mut session = SearchSession::new(source, config.geo_strategy);
    let mut view = ViewSync::new(config.default_center);
    view.set_focus(focus);

    session.search(params);
    session.settle().await;
    view.publish(session.results());

    match session.status() {
        SessionStatus::Failed { kind, showing } => {
            warn!("Search failed ({:?}); {} earlier results shown", kind, showing);
        }
        SessionStatus::NoMatches => {
            info!("No hostels found. Try adjusting your search criteria");
        }
        _ => info!("✅ {}", session.results().summary()),
    }

    for ranked in view.list() {
        let listing = &ranked.listing;
        let distance = ranked
            .distance_meters
            .map(|d| format!(" · {:.0} m", d))
            .unwrap_or_default();
        let verified = if listing.is_verified { " ✔ Verified" } else { "" };
        println!("{}. {}{}{}", ranked.rank, listing.name, distance, verified);
        println!("   {}", listing.address);
        println!(
            "   from ₹{}/mo · rating {}",
            listing.price_min,
            listing.rating_summary()
        );

        let (shown, more) = listing.amenity_preview(3);
        if !shown.is_empty() {
            let tags: Vec<String> = shown.iter().map(ToString::to_string).collect();
            let suffix = if more > 0 { format!(" +{} more", more) } else { String::new() };
            println!("   {}{}", tags.join(", "), suffix);
        }
        println!();
    }

    let center = view.map_center();
    println!(
        "Map ({:.4}, {:.4}) zoom {} · focus {:?}",
        center.latitude(),
        center.longitude(),
        view.zoom(),
        view.focus()
    );
    for marker in view.markers() {
        println!(
            "  #{} {} @ ({:.5}, {:.5})",
            marker.rank, marker.id, marker.latitude, marker.longitude
        );
    }

    if let Some(path) = json {
        let json = serde_json::to_string_pretty(view.list())?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved {} results to {}", view.list().len(), path.display());
    }

    session.teardown();
    Ok(())
}
