use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One priced flight result from the Google Flights engine. `date` is only
/// populated by flexible-date searches, which stamp each option with the
/// departure date that produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightOption {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub total_duration: Option<u32>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub flights: Vec<FlightLeg>,
}

impl FlightOption {
    /// Price formatted for the report, `N/A` when the engine returned none.
    pub fn display_price(&self) -> String {
        match self.price {
            Some(price) => format!("{price}"),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightLeg {
    #[serde(default)]
    pub airline: Option<String>,
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub departure_airport: Option<Airport>,
    #[serde(default)]
    pub arrival_airport: Option<Airport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Airport {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

/// Result of a single-date search. The engine reports application failures
/// through `error` in the body rather than the HTTP status, so the field is
/// part of the result instead of an `Err`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightSearchResults {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub best_flights: Vec<FlightOption>,
    #[serde(default)]
    pub other_flights: Vec<FlightOption>,
}

impl FlightSearchResults {
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_best_flights_payload() {
        let payload = json!({
            "best_flights": [
                {
                    "price": 104.0,
                    "total_duration": 135,
                    "flights": [
                        {
                            "airline": "Vueling",
                            "flight_number": "VY 7821",
                            "departure_airport": {"name": "Heathrow Airport", "id": "LHR"},
                            "arrival_airport": {"name": "Josep Tarradellas Barcelona-El Prat", "id": "BCN"}
                        }
                    ]
                }
            ],
            "other_flights": []
        });

        let results: FlightSearchResults = serde_json::from_value(payload).unwrap();
        assert!(results.error.is_none());
        assert_eq!(results.best_flights.len(), 1);
        assert_eq!(results.best_flights[0].price, Some(104.0));
        assert_eq!(
            results.best_flights[0].flights[0].departure_airport.as_ref().unwrap().id,
            Some("LHR".to_string())
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let results: FlightSearchResults =
            serde_json::from_value(json!({"search_metadata": {"status": "Success"}})).unwrap();
        assert!(results.error.is_none());
        assert!(results.best_flights.is_empty());
        assert!(results.other_flights.is_empty());
    }

    #[test]
    fn error_payload_surfaces_message() {
        let results: FlightSearchResults = serde_json::from_value(
            json!({"error": "Google Flights hasn't returned any results for this query."}),
        )
        .unwrap();
        assert!(results.error.is_some());
        assert!(results.best_flights.is_empty());
    }

    #[test]
    fn display_price_falls_back_when_unpriced() {
        let option = FlightOption::default();
        assert_eq!(option.display_price(), "N/A");

        let option = FlightOption {
            price: Some(150.0),
            ..FlightOption::default()
        };
        assert_eq!(option.display_price(), "150");
    }
}
