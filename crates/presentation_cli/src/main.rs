//! Trip cost planner CLI
//!
//! Computes trip costs locally with the shared cost engine and talks to a
//! running server for address search and driving routes.

#![allow(clippy::print_stdout)]

mod client;
mod output;

use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use domain::{GeoPoint, TripParameters, calculate};
use infrastructure::{LogFormat, init_logging};

use crate::client::ApiClient;

/// Trip cost planner CLI
#[derive(Debug, Parser)]
#[command(name = "tripcost-cli")]
#[command(author, version, about = "Trip cost planner CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Server URL
    #[arg(
        short,
        long,
        global = true,
        env = "TRIPCOST_URL",
        default_value = "http://localhost:3000"
    )]
    url: String,

    /// API key sent as a Bearer token
    #[arg(long, global = true, env = "TRIPCOST_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 15)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute trip costs locally
    Calculate {
        /// Driving distance in kilometres
        #[arg(short, long)]
        distance_km: f64,

        #[command(flatten)]
        costs: CostArgs,
    },

    /// Search for an address
    Geocode {
        /// Free-text address
        query: String,
    },

    /// Compute a driving route between two `lat,lng` points
    ///
    /// Example: tripcost-cli route --from 52.4064,16.9252 --to=-33.92,18.42
    Route {
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: GeoPoint,

        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: GeoPoint,
    },

    /// Resolve two addresses, route between them and compute the costs
    ///
    /// The first match of each address is used.
    Plan {
        /// Start address
        #[arg(long)]
        from: String,

        /// Destination address
        #[arg(long)]
        to: String,

        /// Count the distance twice
        #[arg(long)]
        round_trip: bool,

        #[command(flatten)]
        costs: CostArgs,
    },

    /// Check server health
    Health,
}

/// Cost inputs shared by `calculate` and `plan`
#[derive(Debug, Args)]
struct CostArgs {
    /// Fuel price per litre
    #[arg(short = 'p', long)]
    fuel_price: f64,

    /// Fuel consumption in litres per 100 km
    #[arg(short = 'c', long)]
    consumption: f64,

    /// Travelers sharing the cost
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    people: i64,

    /// Tolls, vignettes, parking
    #[arg(long, default_value_t = 0.0)]
    route_cost: f64,

    #[arg(long, default_value_t = 0.0)]
    lodging_cost: f64,

    #[arg(long, default_value_t = 0.0)]
    food_cost: f64,

    #[arg(long, default_value_t = 0.0)]
    other_cost: f64,

    /// Currency label for the output
    #[arg(long, default_value = "PLN")]
    currency: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl CostArgs {
    fn parameters(&self, distance_km: f64) -> TripParameters {
        TripParameters::new(distance_km, self.fuel_price, self.consumption)
            .with_people_count(self.people)
            .with_route_cost(self.route_cost)
            .with_lodging_cost(self.lodging_cost)
            .with_food_cost(self.food_cost)
            .with_other_cost(self.other_cost)
    }

    fn print(&self, distance_km: f64) -> anyhow::Result<()> {
        let result = calculate(&self.parameters(distance_km));
        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", output::format_cost(&result, &self.currency));
        }
        Ok(())
    }
}

/// Parse `lat,lng`
fn parse_point(value: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{value}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lng.trim()))?;
    GeoPoint::new(lat, lng).map_err(|e| e.to_string())
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(LogFormat::Text, log_filter_from_verbosity(cli.verbose))?;

    let client = ApiClient::new(
        &cli.url,
        cli.api_key.clone(),
        Duration::from_secs(cli.timeout_secs),
    )?;

    match cli.command {
        Commands::Calculate { distance_km, costs } => costs.print(distance_km)?,

        Commands::Geocode { query } => {
            let items = client.geocode(&query).await?;
            println!("{}", output::format_candidates(&items));
        },

        Commands::Route { from, to } => {
            let route = client.route(&from, &to).await?;
            println!("{}", output::format_route(&route));
        },

        Commands::Plan {
            from,
            to,
            round_trip,
            costs,
        } => {
            let start = first_match(&client, &from).await?;
            let destination = first_match(&client, &to).await?;
            let route = client.route(&start, &destination).await?;

            let distance_km = if round_trip {
                route.distance_km * 2.0
            } else {
                route.distance_km
            };
            println!("{}", output::format_route(&route));
            costs.print(distance_km)?;
        },

        Commands::Health => {
            let status = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        },
    }

    Ok(())
}

async fn first_match(client: &ApiClient, address: &str) -> anyhow::Result<GeoPoint> {
    let candidates = client.geocode(address).await?;
    let candidate = candidates
        .iter()
        .find_map(|c| c.point().map(|p| (c, p)))
        .with_context(|| format!("No position found for '{address}'"))?;
    println!("{} -> {}", address, candidate.0.display_name);
    Ok(candidate.1)
}
