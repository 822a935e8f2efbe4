mod browser;
mod common;
mod logic;
mod transport;

use anyhow::{Context, Result};
use cafe_core::{ApiConfig, MemorySessionStore, SessionClient};
use cafe_core::constants::DELIVERY_COUNTDOWN_SECS;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use browser::{BrowserConfig, BrowserKind, StorefrontPage, new_session};
use common::scenario::{ScenarioCtx, get_scenario, list_scenarios};
use common::{artifacts_dir, capture_artifacts, split_csv};
use logic::{Backend, LogicTester, ScenarioResult};
use transport::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// Storefront scenarios against the in-process backend (fast, no network)
    Logic,
    /// Storefront scenarios against a running backend
    Api,
    /// Browser automation against the served frontend
    Browser,
    /// Run every mode
    All,
}

impl TestMode {
    const fn runs_logic(self) -> bool {
        matches!(self, Self::Logic | Self::All)
    }

    const fn runs_api(self) -> bool {
        matches!(self, Self::Api | Self::All)
    }

    const fn runs_browser(self) -> bool {
        matches!(self, Self::Browser | Self::All)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Parser)]
#[command(name = "cafe-tester", version)]
#[command(about = "Automated QA for the Cafe.com storefront - core logic, backend API and browser")]
struct Args {
    /// Test mode: logic (fast), api (live backend), browser (visual), or all
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario (logic and api modes)
    #[arg(long, default_value_t = 3)]
    iterations: usize,

    /// Countdown length for the delivery stage in seconds
    #[arg(long, default_value_t = DELIVERY_COUNTDOWN_SECS)]
    delivery_secs: u32,

    /// Tick countdowns once per second instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Base URL of the cafe backend (api mode)
    #[arg(long, default_value = "http://localhost:5000")]
    api_url: String,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// Base URL of the served storefront
    #[arg(long, default_value = "http://localhost:8080/")]
    base_url: String,

    /// Artifacts directory for screenshots and logs
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Connect to a Selenium Grid/Appium hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);

    let mut all_results = Vec::new();
    if args.mode.runs_logic() {
        let tester = LogicTester::new(
            Backend::Scripted,
            args.delivery_secs,
            args.realtime,
            args.verbose,
        );
        all_results.extend(run_storefront_scenarios(&args, &scenarios, &tester).await);
    }
    if args.mode.runs_api() {
        all_results.extend(run_api_scenarios(&args, &scenarios).await?);
    }
    all_results.extend(run_browser_scenarios(&args, &scenarios).await);

    write_reports(&args, &all_results, start_time)?;

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "☕ Cafe.com Automated Tester".bright_cyan().bold());
    println!("{}", "============================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for (key, _) in list_scenarios() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn parse_browser_kind(name: &str) -> Option<BrowserKind> {
    match name {
        "chrome" => Some(BrowserKind::Chrome),
        "edge" => Some(BrowserKind::Edge),
        "firefox" => Some(BrowserKind::Firefox),
        "safari" => Some(BrowserKind::Safari),
        _ => None,
    }
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

fn browser_label(kind: BrowserKind) -> String {
    format!("{kind:?}").to_lowercase()
}

fn scenario_artifacts_dir(args: &Args, kind: BrowserKind, scenario: &str) -> String {
    artifacts_dir(&args.artifacts_dir, &browser_label(kind), scenario)
}

async fn run_storefront_scenarios(
    args: &Args,
    scenarios: &[String],
    tester: &LogicTester,
) -> Vec<ScenarioResult> {
    let live = matches!(tester.backend(), Backend::Live(_));
    if live {
        println!("{}", "🔌 Running API Tests".bright_magenta().bold());
        println!("{}", "-".repeat(30).magenta());
    } else {
        println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
        println!("{}", "-".repeat(30).yellow());
    }

    let mut results = Vec::new();
    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        if live && scenario.requires_scripted_backend() {
            eprintln!(
                "⚠️  Scenario {} needs a scripted backend; skipped in api mode",
                scenario_name.yellow()
            );
            continue;
        }
        results.push(
            tester
                .run_scenario(scenario_name, scenario.as_ref(), args.iterations)
                .await,
        );
    }
    results
}

async fn run_api_scenarios(args: &Args, scenarios: &[String]) -> Result<Vec<ScenarioResult>> {
    let config = ApiConfig::new(&args.api_url);
    let http = HttpTransport::new(config).context("building HTTP client")?;
    let tester = LogicTester::new(
        Backend::Live(http.clone()),
        args.delivery_secs,
        args.realtime,
        args.verbose,
    );

    let probe = SessionClient::new(http, MemorySessionStore::default());
    let started = Instant::now();
    match probe.health().await {
        Ok(health) if health.is_ok() => {
            println!("💓 Backend at {} is healthy", args.api_url.green());
            Ok(run_storefront_scenarios(args, scenarios, &tester).await)
        }
        Ok(health) => Ok(vec![ScenarioResult::single(
            "Backend Health",
            "api",
            started.elapsed(),
            Some(format!("backend at {} reports {:?}", args.api_url, health.status)),
        )]),
        Err(err) => Ok(vec![ScenarioResult::single(
            "Backend Health",
            "api",
            started.elapsed(),
            Some(format!("backend at {} unreachable: {err}", args.api_url)),
        )]),
    }
}

async fn run_browser_scenarios(args: &Args, scenarios: &[String]) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    if !args.mode.runs_browser() {
        return results;
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    for browser_name in split_csv(&args.browsers) {
        let Some(kind) = parse_browser_kind(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let cfg = build_browser_config(args);
        let driver = match new_session(kind, &cfg).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {kind:?}: {e}");
                continue;
            }
        };

        results.extend(run_browser_scenarios_for_driver(args, scenarios, kind, &driver).await);
        let _ = driver.quit().await;
    }

    results
}

async fn run_browser_scenarios_for_driver(
    args: &Args,
    scenarios: &[String],
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
) -> Vec<ScenarioResult> {
    let label = browser_label(kind);
    let mut results = Vec::new();
    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            continue;
        };
        let ctx = ScenarioCtx {
            base_url: args.base_url.clone(),
            page: StorefrontPage::new(driver),
            verbose: args.verbose,
        };

        let scenario_start = Instant::now();
        let outcome = scenario.run_browser(driver, &ctx).await;
        let duration = scenario_start.elapsed();
        match outcome {
            Ok(()) => {
                println!("✅ [{}] {} - {:?}", label.green(), scenario_name, duration);
                results.push(ScenarioResult::single(scenario.name(), &label, duration, None));
            }
            Err(e) => {
                eprintln!(
                    "❌ [{}] {} - {:?}: {:#}",
                    label.red(),
                    scenario_name,
                    duration,
                    e
                );
                let dir = scenario_artifacts_dir(args, kind, scenario_name);
                let _ = capture_artifacts(driver, &dir, &e).await;
                results.push(ScenarioResult::single(
                    scenario.name(),
                    &label,
                    duration,
                    Some(format!("{e:#}")),
                ));
            }
        }
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                logic::reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Cafe.com Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(&mut output_target, results, duration)?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
