use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flight-agent-cli")]
#[command(about = "Flight search agent CLI - verify connectivity, search flights, plan itineraries", long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config_path: Option<std::path::PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the end-to-end verification checks (the default when no
    /// subcommand is given)
    Verify {
        /// Origin airport code
        #[arg(long, default_value = "LHR")]
        origin: String,

        /// Destination airport code
        #[arg(long, default_value = "BCN")]
        destination: String,

        /// Destination city for the itinerary step; set it whenever
        /// --destination points somewhere other than Barcelona
        #[arg(long, default_value = "Barcelona")]
        city: String,

        /// Departure date (YYYY-MM-DD)
        #[arg(long, default_value = "2025-03-01")]
        date: NaiveDate,

        /// Flexible window length in days
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// One-off flight search
    Search {
        /// Origin airport code
        origin: String,

        /// Destination airport code
        destination: String,

        /// Departure date (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Generate an itinerary for a destination
    Itinerary {
        /// Destination city
        destination: String,

        /// Comma-separated interests
        #[arg(long, value_delimiter = ',', default_value = "food,architecture,beach")]
        keywords: Vec<String>,

        /// Trip budget, excluding flights
        #[arg(long, default_value_t = 500.0)]
        budget: f64,

        /// Trip length in days
        #[arg(long, default_value_t = 3)]
        days: u32,
    },

    /// Show version
    Version,
}
