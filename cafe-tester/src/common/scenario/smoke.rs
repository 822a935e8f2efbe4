use anyhow::{Result, ensure};
use cafe_core::{Menu, Section};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CafeStorefront, CombinedScenario, RunCtx, ScenarioCtx, StorefrontScenario};

pub struct SmokeScenario;

#[async_trait::async_trait(?Send)]
impl StorefrontScenario for SmokeScenario {
    async fn run_storefront(&self, store: &mut CafeStorefront, ctx: &RunCtx) -> Result<()> {
        let health = store.health().await?;
        ensure!(health.is_ok(), "backend health is {:?}", health.status);
        ctx.note("💓 backend healthy");

        let menu = Menu::default_menu();
        ensure!(menu.items().count() > 0, "menu should not be empty");

        let context = store.context_mut();
        ensure!(context.section() == Section::Home, "visits start at home");
        context.show(Section::Menu);
        let picks: Vec<_> = menu.items().take(2).collect();
        for item in &picks {
            context.add_item(&item.name, item.price);
        }
        context.show(Section::Orders);

        let expected: u64 = picks.iter().map(|item| u64::from(item.price)).sum();
        let bill = context.bill_view();
        ensure!(bill.lines().len() == picks.len(), "bill should list every item");
        ensure!(bill.total() == expected, "bill total {} != {expected}", bill.total());
        ensure!(bill.has_place_action(), "placed bill should offer checkout");

        context.remove_item(0);
        ensure!(context.bill_view().lines().len() == picks.len() - 1);
        ctx.note(&format!("🛒 bill checked ({} items)", picks.len()));
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let page = &ctx.page;
        page.open(&ctx.base_url).await?;
        driver.find(By::Css("header[role='banner']")).await?;
        if ctx.verbose {
            println!("  🌐 Storefront loaded");
        }

        page.show(Section::Menu).await?;
        page.add_item("coffee").await?;
        let label = page.text("[data-item='coffee'] .add-btn").await?;
        ensure!(label.contains("Added"), "add button should confirm, shows {label:?}");

        page.show(Section::Orders).await?;
        let bill = page.text("#bill").await?;
        ensure!(bill.contains("Coffee"), "bill should list Coffee: {bill:?}");
        ensure!(bill.contains("₹100"), "bill should show the price: {bill:?}");
        if ctx.verbose {
            println!("  🛒 Bill shows the added item");
        }
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn name(&self) -> &'static str {
        "Smoke Test"
    }
}
