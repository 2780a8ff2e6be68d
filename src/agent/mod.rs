pub mod anthropic;
pub mod client;
pub mod types;

pub use client::SearchAgent;
pub use types::{FlightOption, FlightSearchResults};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::utils::Result;

/// The flight agent capability set. The verification runner and the CLI
/// handlers talk to this trait; [`SearchAgent`] is the live implementation.
#[async_trait]
pub trait FlightAgent: Send + Sync {
    /// One-way search for a single departure date.
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<FlightSearchResults>;

    /// Generate an itinerary text for the destination.
    async fn create_itinerary_with_ai(
        &self,
        destination: &str,
        keywords: &[String],
        budget: f64,
        duration_days: u32,
    ) -> Result<String>;

    /// Search each departure date in `start_date .. start_date + num_days`
    /// and return every collected option stamped with its date.
    async fn analyze_flexible_dates(
        &self,
        origin: &str,
        destination: &str,
        start_date: NaiveDate,
        num_days: u32,
    ) -> Result<Vec<FlightOption>>;

    /// Rank options best value first.
    fn find_best_value_flights(&self, options: &[FlightOption]) -> Vec<FlightOption>;
}
