use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use cafe_core::testing::InMemoryBackend;

use crate::common::scenario::{CombinedScenario, RunCtx};
use crate::transport::{HttpTransport, TesterTransport};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    /// Where the scenario ran: `logic`, `api` or a browser name.
    pub target: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

impl ScenarioResult {
    /// Result of a single run that either passed or failed with `failure`.
    pub fn single(
        scenario_name: &str,
        target: &str,
        duration: Duration,
        failure: Option<String>,
    ) -> Self {
        let passed = failure.is_none();
        Self {
            scenario_name: scenario_name.to_string(),
            target: target.to_string(),
            passed,
            iterations_run: 1,
            successful_iterations: usize::from(passed),
            failures: failure.into_iter().collect(),
            average_duration: duration,
            performance_data: vec![duration],
        }
    }
}

/// Backend the storefront scenarios talk to.
#[derive(Debug, Clone)]
pub enum Backend {
    /// A fresh in-process backend per iteration.
    Scripted,
    Live(HttpTransport),
}

impl Backend {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Scripted => "logic",
            Self::Live(_) => "api",
        }
    }

    fn transport(&self) -> TesterTransport {
        match self {
            Self::Scripted => TesterTransport::Scripted(InMemoryBackend::new()),
            Self::Live(http) => TesterTransport::Http(http.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogicTester {
    backend: Backend,
    delivery_secs: u32,
    realtime: bool,
    verbose: bool,
    run_stamp: String,
}

impl LogicTester {
    pub fn new(backend: Backend, delivery_secs: u32, realtime: bool, verbose: bool) -> Self {
        Self {
            backend,
            delivery_secs,
            realtime,
            verbose,
            run_stamp: crate::common::run_stamp(),
        }
    }

    pub const fn backend(&self) -> &Backend {
        &self.backend
    }

    fn run_ctx(&self, scenario_key: &str, iteration: usize) -> RunCtx {
        RunCtx {
            username: format!("qa-{scenario_key}-{}-{iteration}", self.run_stamp),
            password: format!("pw-{}", self.run_stamp),
            delivery_secs: self.delivery_secs,
            realtime: self.realtime,
            verbose: self.verbose,
        }
    }

    pub async fn run_scenario(
        &self,
        key: &str,
        scenario: &dyn CombinedScenario,
        iterations: usize,
    ) -> ScenarioResult {
        if self.verbose {
            println!(
                "🧪 Testing scenario: {} (target: {})",
                scenario.name().bright_white(),
                self.backend.label()
            );
        }

        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let ctx = self.run_ctx(key, i);
            let mut store = ctx.open(self.backend.transport());
            let start_time = Instant::now();

            let outcome = scenario.run_storefront(&mut store, &ctx).await;
            match outcome {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!("  ✅ Iteration {}/{} passed ({duration:?})", i + 1, iterations);
                    }
                }
                Err(err) => {
                    let context = store.context();
                    failures.push(format!(
                        "Iteration {} (user {}, section {:?}, stage {}, cart {} items): {err:#}",
                        i + 1,
                        ctx.username,
                        context.section(),
                        context.stage().key(),
                        context.cart().len(),
                    ));
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            format!("{err:#}").red()
                        );
                    }
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name().to_string(),
            target: self.backend.label().to_string(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::scenario::get_scenario;

    #[test]
    fn scripted_iterations_get_fresh_accounts() {
        let tester = LogicTester::new(Backend::Scripted, 5, false, false);
        let scenario = get_scenario("checkout").unwrap();
        let result = tokio_test::block_on(tester.run_scenario("checkout", scenario.as_ref(), 3));
        assert!(result.passed, "{:?}", result.failures);
        assert_eq!(result.successful_iterations, 3);
        assert_eq!(result.target, "logic");
        assert_eq!(result.performance_data.len(), 3);
    }

    #[test]
    fn failures_carry_storefront_context() {
        let unreachable = HttpTransport::new(cafe_core::ApiConfig::new("http://127.0.0.1:9")).unwrap();
        let tester = LogicTester::new(Backend::Live(unreachable), 5, false, false);
        let scenario = get_scenario("checkout").unwrap();
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let result = rt.block_on(tester.run_scenario("checkout", scenario.as_ref(), 1));
        assert!(!result.passed);
        assert_eq!(result.target, "api");
        assert!(result.failures[0].contains("Iteration 1"));
        assert!(result.failures[0].contains("registration failed"));
    }

    #[test]
    fn single_results_count_one_iteration() {
        let ok = ScenarioResult::single("Smoke Test", "chrome", Duration::from_millis(5), None);
        assert!(ok.passed);
        assert_eq!(ok.successful_iterations, 1);
        let failed = ScenarioResult::single("Smoke Test", "chrome", Duration::ZERO, Some("boom".into()));
        assert!(!failed.passed);
        assert_eq!(failed.failures, ["boom"]);
    }

    #[test]
    fn durations_serialize_as_millis() {
        let result = ScenarioResult::single("Smoke Test", "logic", Duration::from_millis(42), None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 42);
        assert_eq!(json["performance_data"][0], 42);
    }
}
