use anyhow::Result;
use cafe_core::{
    ImmediateTicker, IntervalTicker, MemorySessionStore, OrderFlow, SessionClient, Storefront,
    Ticker,
};
use thirtyfour::prelude::*;

use crate::browser::StorefrontPage;
use crate::transport::TesterTransport;

pub mod catalog;
pub mod smoke;

pub type CafeStorefront = Storefront<TesterTransport, MemorySessionStore>;

/// Everything a storefront scenario needs besides the storefront itself.
#[derive(Debug, Clone)]
pub struct RunCtx {
    /// Unique per iteration so live backends never see a reused account.
    pub username: String,
    pub password: String,
    pub delivery_secs: u32,
    /// Tick the countdown on the wall clock instead of as fast as possible.
    pub realtime: bool,
    pub verbose: bool,
}

impl RunCtx {
    pub fn ticker(&self) -> Box<dyn Ticker> {
        if self.realtime {
            Box::new(IntervalTicker::every_second())
        } else {
            Box::new(ImmediateTicker)
        }
    }

    pub fn open(&self, transport: TesterTransport) -> CafeStorefront {
        self.open_with_store(transport, MemorySessionStore::default())
    }

    /// Open a storefront that shares `store` with an earlier visit.
    pub fn open_with_store(
        &self,
        transport: TesterTransport,
        store: MemorySessionStore,
    ) -> CafeStorefront {
        Storefront::open_with_flow(
            SessionClient::new(transport, store),
            OrderFlow::with_delivery_secs(self.delivery_secs),
        )
    }

    pub fn note(&self, message: &str) {
        if self.verbose {
            println!("  {message}");
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub page: StorefrontPage<'a>,
    pub verbose: bool,
}

/// A scripted visit to the storefront, run against any backend.
#[async_trait::async_trait(?Send)]
pub trait StorefrontScenario {
    async fn run_storefront(&self, store: &mut CafeStorefront, ctx: &RunCtx) -> Result<()>;
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

/// Scenario that can run in every mode.
pub trait CombinedScenario: StorefrontScenario + BrowserScenario {
    fn name(&self) -> &'static str;

    /// Needs a backend the tester can take offline.
    fn requires_scripted_backend(&self) -> bool {
        false
    }
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "guest-checkout" | "guest" => Some(Box::new(catalog::GuestCheckout)),
        "checkout" => Some(Box::new(catalog::Checkout)),
        "delivery" => Some(Box::new(catalog::Delivery)),
        "cancelled-delivery" | "cancel" => Some(Box::new(catalog::CancelledDelivery)),
        "offline-order" | "offline" => Some(Box::new(catalog::OfflineOrder)),
        "auth-errors" | "auth" => Some(Box::new(catalog::AuthErrors)),
        "session-restore" | "restore" => Some(Box::new(catalog::SessionRestore)),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("guest-checkout", "Guest Checkout Is Blocked"),
        ("checkout", "Register, Order and Review History"),
        ("delivery", "Delivery Countdown"),
        ("cancelled-delivery", "Leaving On The Way Cancels The Countdown"),
        ("offline-order", "Order With Backend Offline"),
        ("auth-errors", "Authentication Errors"),
        ("session-restore", "Session Survives A Reload"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, description) in list_scenarios() {
            let scenario = get_scenario(key).unwrap_or_else(|| panic!("{key} resolves"));
            assert_eq!(scenario.name(), description);
        }
    }

    #[test]
    fn aliases_and_case_are_accepted() {
        assert!(get_scenario("SMOKE").is_some());
        assert!(get_scenario("offline").is_some());
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn only_offline_order_needs_a_scripted_backend() {
        let scripted: Vec<_> = list_scenarios()
            .into_iter()
            .filter(|(key, _)| get_scenario(key).is_some_and(|s| s.requires_scripted_backend()))
            .map(|(key, _)| key)
            .collect();
        assert_eq!(scripted, ["offline-order"]);
    }
}
