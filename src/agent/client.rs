use std::cmp::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use serde_json::Value;

use crate::agent::anthropic::AnthropicClient;
use crate::agent::types::{FlightOption, FlightSearchResults};
use crate::agent::FlightAgent;
use crate::config::{Config, Credentials};
use crate::utils::{AppError, Result};

/// Live [`FlightAgent`] backed by SerpApi's Google Flights engine for
/// pricing and the Anthropic Messages API for itinerary text.
pub struct SearchAgent {
    client: reqwest::Client,
    serpapi_key: String,
    serpapi_url: String,
    currency: String,
    timeout: Duration,
    anthropic: AnthropicClient,
}

impl SearchAgent {
    pub fn new(credentials: Credentials, config: &Config) -> Self {
        let client = reqwest::Client::new();
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let anthropic = AnthropicClient::new(
            client.clone(),
            credentials.anthropic_key,
            config.anthropic_url.clone(),
            config.anthropic_model.clone(),
            config.max_tokens,
            timeout,
        );

        Self {
            client,
            serpapi_key: credentials.serpapi_key,
            serpapi_url: config.serpapi_url.clone(),
            currency: config.currency.clone(),
            timeout,
            anthropic,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

#[async_trait]
impl FlightAgent for SearchAgent {
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<FlightSearchResults> {
        let url = format!("{}/search.json", self.serpapi_url);
        let outbound_date = date.to_string();

        log::debug!("Searching {} -> {} on {}", origin, destination, outbound_date);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("engine", "google_flights"),
                ("departure_id", origin),
                ("arrival_id", destination),
                ("outbound_date", outbound_date.as_str()),
                // one-way
                ("type", "2"),
                ("currency", self.currency.as_str()),
                ("hl", "en"),
                ("api_key", self.serpapi_key.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(AppError::Network)?;

        let status = response.status();
        let body: Value = response.json().await.map_err(AppError::Network)?;

        // The engine reports "no results", bad dates and quota problems
        // through an error string in the body, on both 2xx and 4xx.
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Ok(FlightSearchResults::from_error(message));
        }

        if !status.is_success() {
            return Err(AppError::Agent(format!(
                "Flight search request failed ({})",
                status
            )));
        }

        serde_json::from_value(body).map_err(AppError::Serialization)
    }

    async fn create_itinerary_with_ai(
        &self,
        destination: &str,
        keywords: &[String],
        budget: f64,
        duration_days: u32,
    ) -> Result<String> {
        let prompt = build_itinerary_prompt(destination, keywords, budget, duration_days, &self.currency);
        log::debug!("Generating itinerary with {}", self.anthropic.model());
        self.anthropic.complete(&prompt).await
    }

    async fn analyze_flexible_dates(
        &self,
        origin: &str,
        destination: &str,
        start_date: NaiveDate,
        num_days: u32,
    ) -> Result<Vec<FlightOption>> {
        let mut options = Vec::new();

        // Sequential on purpose: one query per candidate date, and SerpApi
        // rate limits burst traffic.
        for offset in 0..num_days {
            let date = start_date
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or_else(|| {
                    AppError::Agent(format!("Date out of range: {} + {} days", start_date, offset))
                })?;

            let results = self.search_flights(origin, destination, date).await?;

            if let Some(message) = results.error {
                log::warn!("No results for {}: {}", date, message);
                continue;
            }

            options.extend(results.best_flights.into_iter().map(|mut option| {
                option.date = Some(date);
                option
            }));
        }

        Ok(options)
    }

    fn find_best_value_flights(&self, options: &[FlightOption]) -> Vec<FlightOption> {
        rank_by_value(options)
    }
}

/// Priced options ascending by price, shorter flights first on ties.
/// Options without a price can't be ranked and are dropped.
pub fn rank_by_value(options: &[FlightOption]) -> Vec<FlightOption> {
    let mut ranked: Vec<FlightOption> = options
        .iter()
        .filter(|option| option.price.is_some())
        .cloned()
        .collect();

    ranked.sort_by(|a, b| {
        a.price
            .partial_cmp(&b.price)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.total_duration.cmp(&b.total_duration))
    });

    ranked
}

pub fn build_itinerary_prompt(
    destination: &str,
    keywords: &[String],
    budget: f64,
    duration_days: u32,
    currency: &str,
) -> String {
    format!(
        "You are a travel planning assistant. Create a {duration_days}-day itinerary for {destination}.\n\
         The traveller is interested in: {interests}.\n\
         Total budget: {budget} {currency}, excluding flights.\n\
         Give a day-by-day plan with specific places and rough costs.",
        interests = keywords.join(", "),
    )
}
