use chrono::NaiveDate;

use crate::agent::FlightAgent;
use crate::config::{CredentialStatus, Credentials};
use crate::utils::AppError;

/// Fixed example parameters for a verification run. The defaults are the
/// canonical London -> Barcelona smoke test.
#[derive(Debug, Clone)]
pub struct VerifyParams {
    pub origin: String,
    pub destination: String,
    pub destination_city: String,
    pub date: NaiveDate,
    pub keywords: Vec<String>,
    pub budget: f64,
    pub duration_days: u32,
    pub window_days: u32,
    pub currency: String,
}

impl Default for VerifyParams {
    fn default() -> Self {
        Self {
            origin: "LHR".to_string(),
            destination: "BCN".to_string(),
            destination_city: "Barcelona".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid example date"),
            keywords: vec![
                "food".to_string(),
                "architecture".to_string(),
                "beach".to_string(),
            ],
            budget: 500.0,
            duration_days: 3,
            window_days: 7,
            currency: "GBP".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    /// Something went wrong but the run kept going.
    Warned,
    Failed,
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: &'static str,
    pub status: StepStatus,
    pub detail: String,
}

impl StepReport {
    fn passed(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, status: StepStatus::Passed, detail: detail.into() }
    }

    fn warned(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, status: StepStatus::Warned, detail: detail.into() }
    }

    fn failed(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, status: StepStatus::Failed, detail: detail.into() }
    }
}

/// Outcome of a whole verification run. `passed` mirrors the printed
/// verdict; callers that want per-step detail read `steps`.
#[derive(Debug, Default)]
pub struct VerificationReport {
    pub steps: Vec<StepReport>,
    pub passed: bool,
}

/// Whether a fault in a step ends the run: the two single-call steps
/// abort, flexible-date search warns and keeps going.
struct StepSpec {
    name: &'static str,
    label: &'static str,
    abort_on_fault: bool,
}

const FLIGHT_SEARCH: StepSpec = StepSpec {
    name: "flight search",
    label: "Flight search",
    abort_on_fault: true,
};
const ITINERARY: StepSpec = StepSpec {
    name: "itinerary generation",
    label: "Itinerary generation",
    abort_on_fault: true,
};
const FLEXIBLE: StepSpec = StepSpec {
    name: "flexible date search",
    label: "Flexible search",
    abort_on_fault: false,
};

/// Runs the five verification checks in order against any [`FlightAgent`],
/// printing a human-readable report and returning the step-by-step record.
pub struct VerificationRunner {
    params: VerifyParams,
}

impl VerificationRunner {
    pub fn new(params: VerifyParams) -> Self {
        Self { params }
    }

    /// `make_agent` is only invoked once both credentials are present, so a
    /// missing key never triggers any collaborator work.
    pub async fn run<A, F>(&self, credentials: &CredentialStatus, make_agent: F) -> VerificationReport
    where
        A: FlightAgent,
        F: FnOnce(Credentials) -> A,
    {
        let mut report = VerificationReport::default();
        let p = &self.params;

        println!("🧪 Testing Flight Search AI Agent\n");
        println!("{}", "=".repeat(50));

        println!("\n1. Checking environment variables...");
        let creds = match check_credentials(credentials, &mut report) {
            Some(creds) => creds,
            None => return report,
        };

        println!("\n2. Initializing agent...");
        let agent = make_agent(creds);
        println!("✅ Agent initialized");
        report.steps.push(StepReport::passed("agent construction", "agent initialized"));

        println!("\n3. Testing flight search...");
        println!("   Searching: {} → {}", p.origin, p.destination);
        println!("   Date: {}", p.date);
        match agent.search_flights(&p.origin, &p.destination, p.date).await {
            Ok(results) => {
                if let Some(message) = results.error {
                    println!("❌ Flight search error: {}", message);
                    report.steps.push(StepReport::failed(FLIGHT_SEARCH.name, message));
                    return report;
                }
                if results.best_flights.is_empty() {
                    println!("⚠️  No flights found (this is normal if the date is in the past or there are no results)");
                    report.steps.push(StepReport::warned(FLIGHT_SEARCH.name, "no flights found"));
                } else {
                    let count = results.best_flights.len();
                    let price = results.best_flights[0].display_price();
                    println!("✅ Found {} flight options", count);
                    println!("   Best option: {} {}", price, p.currency);
                    report.steps.push(StepReport::passed(
                        FLIGHT_SEARCH.name,
                        format!("{} options, best {}", count, price),
                    ));
                }
            }
            Err(err) => {
                if self.record_fault(&FLIGHT_SEARCH, &err, &mut report) {
                    return report;
                }
            }
        }

        println!("\n4. Testing AI itinerary generation...");
        println!("   Destination: {}", p.destination_city);
        println!("   Keywords: {}", p.keywords.join(", "));
        match agent
            .create_itinerary_with_ai(&p.destination_city, &p.keywords, p.budget, p.duration_days)
            .await
        {
            Ok(itinerary) => {
                let chars = itinerary.chars().count();
                let preview: String = itinerary.chars().take(200).collect();
                println!("✅ Itinerary generated ({} characters)", chars);
                println!("\n   Preview:");
                println!("   {}...", preview);
                report.steps.push(StepReport::passed(
                    ITINERARY.name,
                    format!("{} characters", chars),
                ));
            }
            Err(err) => {
                if self.record_fault(&ITINERARY, &err, &mut report) {
                    return report;
                }
            }
        }

        println!("\n5. Testing flexible date search...");
        println!("   Searching {} days from {}...", p.window_days, p.date);
        match agent
            .analyze_flexible_dates(&p.origin, &p.destination, p.date, p.window_days)
            .await
        {
            Ok(options) => {
                println!("✅ Flexible search complete");
                println!("   Found {} flight options across dates", options.len());
                let mut detail = format!("{} options", options.len());
                if !options.is_empty() {
                    let best = agent.find_best_value_flights(&options);
                    if let Some(first) = best.first() {
                        let date = first
                            .date
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "unknown date".to_string());
                        println!(
                            "   Best value option: {} - {} {}",
                            date,
                            first.display_price(),
                            p.currency
                        );
                        detail = format!(
                            "{} options, best value {} at {}",
                            options.len(),
                            first.display_price(),
                            date
                        );
                    }
                }
                report.steps.push(StepReport::passed(FLEXIBLE.name, detail));
            }
            Err(err) => {
                if self.record_fault(&FLEXIBLE, &err, &mut report) {
                    return report;
                }
            }
        }

        println!("\n{}", "=".repeat(50));
        println!("✅ All tests passed!");
        println!("\n💡 Next steps:");
        println!(
            "   1. Run a one-off search:  flight-agent-cli search {} {} {}",
            p.origin, p.destination, p.date
        );
        println!(
            "   2. Generate an itinerary: flight-agent-cli itinerary {} --keywords {}",
            p.destination_city,
            p.keywords.join(",")
        );

        report.passed = true;
        report
    }

    /// Returns true when the run must stop.
    fn record_fault(&self, step: &StepSpec, err: &AppError, report: &mut VerificationReport) -> bool {
        println!("❌ {} failed: {}", step.label, err);
        let status = if step.abort_on_fault {
            StepStatus::Failed
        } else {
            println!("   This might be due to rate limits or API issues");
            StepStatus::Warned
        };
        report.steps.push(StepReport {
            name: step.name,
            status,
            detail: err.to_string(),
        });
        step.abort_on_fault
    }
}

fn check_credentials(
    status: &CredentialStatus,
    report: &mut VerificationReport,
) -> Option<Credentials> {
    match &status.anthropic_key {
        Some(key) => println!("✅ ANTHROPIC_API_KEY found: {}...", preview(key)),
        None => {
            println!("❌ ANTHROPIC_API_KEY not found!");
            println!("   Set it in a .env file or export ANTHROPIC_API_KEY=your_key");
            report.steps.push(StepReport::failed(
                "environment check",
                "ANTHROPIC_API_KEY not set",
            ));
            return None;
        }
    }

    match &status.serpapi_key {
        Some(key) => println!("✅ SERPAPI_KEY found: {}...", preview(key)),
        None => {
            println!("❌ SERPAPI_KEY not found!");
            println!("   Set it in a .env file or export SERPAPI_KEY=your_key");
            report.steps.push(StepReport::failed(
                "environment check",
                "SERPAPI_KEY not set",
            ));
            return None;
        }
    }

    let creds = status.validated()?;
    report.steps.push(StepReport::passed("environment check", "credentials present"));
    Some(creds)
}

fn preview(key: &str) -> String {
    key.chars().take(20).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{FlightOption, FlightSearchResults};
    use crate::utils::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct ScriptedAgent {
        search_result: Option<FlightSearchResults>,
        itinerary_result: Option<String>,
        flexible_result: Option<Vec<FlightOption>>,
        best_value: Vec<FlightOption>,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl FlightAgent for ScriptedAgent {
        async fn search_flights(
            &self,
            _origin: &str,
            _destination: &str,
            _date: NaiveDate,
        ) -> Result<FlightSearchResults> {
            self.calls.lock().unwrap().push("search");
            self.search_result
                .clone()
                .ok_or_else(|| AppError::Agent("search exploded".to_string()))
        }

        async fn create_itinerary_with_ai(
            &self,
            _destination: &str,
            _keywords: &[String],
            _budget: f64,
            _duration_days: u32,
        ) -> Result<String> {
            self.calls.lock().unwrap().push("itinerary");
            self.itinerary_result
                .clone()
                .ok_or_else(|| AppError::Agent("itinerary exploded".to_string()))
        }

        async fn analyze_flexible_dates(
            &self,
            _origin: &str,
            _destination: &str,
            _start_date: NaiveDate,
            _num_days: u32,
        ) -> Result<Vec<FlightOption>> {
            self.calls.lock().unwrap().push("flexible");
            self.flexible_result
                .clone()
                .ok_or_else(|| AppError::Agent("flexible exploded".to_string()))
        }

        fn find_best_value_flights(&self, _options: &[FlightOption]) -> Vec<FlightOption> {
            self.calls.lock().unwrap().push("best_value");
            self.best_value.clone()
        }
    }

    fn creds_present() -> CredentialStatus {
        CredentialStatus {
            anthropic_key: Some("sk-ant-test".to_string()),
            serpapi_key: Some("serp-test".to_string()),
        }
    }

    fn priced_option(price: f64, date: Option<NaiveDate>) -> FlightOption {
        FlightOption {
            price: Some(price),
            date,
            ..FlightOption::default()
        }
    }

    fn happy_agent() -> ScriptedAgent {
        ScriptedAgent {
            search_result: Some(FlightSearchResults {
                best_flights: vec![priced_option(150.0, None)],
                ..FlightSearchResults::default()
            }),
            itinerary_result: Some("Day 1: explore the Gothic Quarter.".to_string()),
            flexible_result: Some(vec![priced_option(150.0, date(2025, 3, 1))]),
            best_value: vec![priced_option(150.0, date(2025, 3, 1))],
            ..ScriptedAgent::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn step<'a>(report: &'a VerificationReport, name: &str) -> Option<&'a StepReport> {
        report.steps.iter().find(|step| step.name == name)
    }

    #[tokio::test]
    async fn missing_credential_stops_before_agent_construction() {
        let status = CredentialStatus {
            anthropic_key: Some("sk-ant-test".to_string()),
            serpapi_key: None,
        };
        let constructed = AtomicBool::new(false);

        let runner = VerificationRunner::new(VerifyParams::default());
        let report = runner
            .run(&status, |_creds| {
                constructed.store(true, Ordering::SeqCst);
                ScriptedAgent::default()
            })
            .await;

        assert!(!report.passed);
        assert!(!constructed.load(Ordering::SeqCst));
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.steps[0].status, StepStatus::Failed);
        assert!(report.steps[0].detail.contains("SERPAPI_KEY"));
    }

    #[tokio::test]
    async fn search_error_field_aborts_before_itinerary() {
        let agent = ScriptedAgent {
            search_result: Some(FlightSearchResults::from_error("quota exhausted")),
            itinerary_result: Some("unused".to_string()),
            ..ScriptedAgent::default()
        };

        let runner = VerificationRunner::new(VerifyParams::default());
        let report = runner.run(&creds_present(), |_creds| agent).await;

        assert!(!report.passed);
        let search = step(&report, "flight search").unwrap();
        assert_eq!(search.status, StepStatus::Failed);
        assert!(search.detail.contains("quota exhausted"));
        assert!(step(&report, "itinerary generation").is_none());
    }

    #[tokio::test]
    async fn search_report_carries_count_and_first_price() {
        let agent = ScriptedAgent {
            search_result: Some(FlightSearchResults {
                best_flights: vec![priced_option(104.0, None), priced_option(131.0, None)],
                ..FlightSearchResults::default()
            }),
            ..happy_agent()
        };

        let runner = VerificationRunner::new(VerifyParams::default());
        let report = runner.run(&creds_present(), |_creds| agent).await;

        let search = step(&report, "flight search").unwrap();
        assert_eq!(search.status, StepStatus::Passed);
        assert!(search.detail.starts_with("2 options"));
        assert!(search.detail.contains("104"));
    }

    #[tokio::test]
    async fn unpriced_first_option_reports_fallback_marker() {
        let agent = ScriptedAgent {
            search_result: Some(FlightSearchResults {
                best_flights: vec![FlightOption::default()],
                ..FlightSearchResults::default()
            }),
            ..happy_agent()
        };

        let runner = VerificationRunner::new(VerifyParams::default());
        let report = runner.run(&creds_present(), |_creds| agent).await;

        assert!(step(&report, "flight search").unwrap().detail.contains("N/A"));
    }

    #[tokio::test]
    async fn empty_search_is_a_warning_not_a_failure() {
        let agent = ScriptedAgent {
            search_result: Some(FlightSearchResults::default()),
            ..happy_agent()
        };

        let runner = VerificationRunner::new(VerifyParams::default());
        let report = runner.run(&creds_present(), |_creds| agent).await;

        assert!(report.passed);
        assert_eq!(step(&report, "flight search").unwrap().status, StepStatus::Warned);
        assert!(step(&report, "itinerary generation").is_some());
    }

    #[tokio::test]
    async fn itinerary_fault_is_fatal() {
        let agent = ScriptedAgent {
            itinerary_result: None,
            ..happy_agent()
        };

        let runner = VerificationRunner::new(VerifyParams::default());
        let report = runner.run(&creds_present(), |_creds| agent).await;

        assert!(!report.passed);
        assert_eq!(
            step(&report, "itinerary generation").unwrap().status,
            StepStatus::Failed
        );
        assert!(step(&report, "flexible date search").is_none());
    }

    #[tokio::test]
    async fn flexible_fault_is_not_fatal() {
        let agent = ScriptedAgent {
            flexible_result: None,
            ..happy_agent()
        };

        let runner = VerificationRunner::new(VerifyParams::default());
        let report = runner.run(&creds_present(), |_creds| agent).await;

        assert!(report.passed);
        assert_eq!(
            step(&report, "flexible date search").unwrap().status,
            StepStatus::Warned
        );
    }

    #[tokio::test]
    async fn full_scenario_passes_with_best_value_detail() {
        let flexible: Vec<FlightOption> = (1u32..=5)
            .map(|day| priced_option(120.0 + f64::from(day), date(2025, 3, day)))
            .collect();
        let agent = ScriptedAgent {
            search_result: Some(FlightSearchResults {
                best_flights: vec![priced_option(150.0, None)],
                ..FlightSearchResults::default()
            }),
            itinerary_result: Some("x".repeat(350)),
            flexible_result: Some(flexible),
            best_value: vec![priced_option(120.0, date(2025, 3, 3))],
            ..ScriptedAgent::default()
        };

        let runner = VerificationRunner::new(VerifyParams::default());
        let report = runner.run(&creds_present(), |_creds| agent).await;

        assert!(report.passed);
        assert!(step(&report, "itinerary generation")
            .unwrap()
            .detail
            .contains("350 characters"));
        let flexible = step(&report, "flexible date search").unwrap();
        assert_eq!(flexible.status, StepStatus::Passed);
        assert!(flexible.detail.contains("5 options"));
        assert!(flexible.detail.contains("120"));
        assert!(flexible.detail.contains("2025-03-03"));
    }

    #[tokio::test]
    async fn happy_path_invokes_each_operation_once() {
        let agent = happy_agent();
        let calls = Arc::clone(&agent.calls);

        let runner = VerificationRunner::new(VerifyParams::default());
        let report = runner.run(&creds_present(), |_creds| agent).await;

        assert!(report.passed);
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["search", "itinerary", "flexible", "best_value"]
        );
    }
}
