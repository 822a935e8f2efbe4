use anyhow::{Context, Result, bail, ensure};
use cafe_core::constants::PREPARING_MESSAGE;
use cafe_core::{
    AuthError, AuthForm, FormStatus, HistoryStatus, Menu, OrderError, OrderStage, OrderStatus,
    Section, StageView, format_clock,
};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CafeStorefront, CombinedScenario, RunCtx, ScenarioCtx, StorefrontScenario};

/// Scenarios without a browser script.
macro_rules! storefront_only {
    ($ty:ident, $name:literal) => {
        #[async_trait::async_trait]
        impl BrowserScenario for $ty {
            async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
                bail!("Browser testing not implemented for {}", $name)
            }
        }
    };
}

/// First `count` menu items as (name, price).
fn menu_picks(count: usize) -> Vec<(String, u32)> {
    Menu::default_menu()
        .items()
        .take(count)
        .map(|item| (item.name.clone(), item.price))
        .collect()
}

fn fill_cart(store: &mut CafeStorefront, picks: &[(String, u32)]) {
    let ctx = store.context_mut();
    ctx.show(Section::Menu);
    for (name, price) in picks {
        ctx.add_item(name, *price);
    }
    ctx.show(Section::Orders);
}

async fn sign_up(store: &mut CafeStorefront, ctx: &RunCtx) -> Result<()> {
    ensure!(
        store.register(&ctx.username, &ctx.password).await,
        "registration failed: {:?}",
        store.context().form_status(AuthForm::Register)
    );
    ensure!(
        store.context().section() == Section::Home,
        "signing in should return to the home section"
    );
    ctx.note(&format!("🔐 registered {}", ctx.username));
    Ok(())
}

pub struct GuestCheckout;

#[async_trait::async_trait(?Send)]
impl StorefrontScenario for GuestCheckout {
    async fn run_storefront(&self, store: &mut CafeStorefront, ctx: &RunCtx) -> Result<()> {
        fill_cart(store, &menu_picks(2));
        let status = store.place_order().await;
        ensure!(
            status == OrderStatus::Failed(OrderError::NotAuthenticated),
            "guest order should be refused, got {status:?}"
        );
        let context = store.context();
        ensure!(context.stage() == OrderStage::Placed, "guest order must not advance the flow");
        ensure!(context.cart().len() == 2, "guest order must keep the cart");
        ctx.note("🔒 guest checkout refused locally");
        Ok(())
    }
}

storefront_only!(GuestCheckout, "Guest Checkout Is Blocked");

impl CombinedScenario for GuestCheckout {
    fn name(&self) -> &'static str {
        "Guest Checkout Is Blocked"
    }
}

pub struct Checkout;

#[async_trait::async_trait(?Send)]
impl StorefrontScenario for Checkout {
    async fn run_storefront(&self, store: &mut CafeStorefront, ctx: &RunCtx) -> Result<()> {
        sign_up(store, ctx).await?;
        let picks = menu_picks(2);
        let expected_total: u64 = picks.iter().map(|(_, price)| u64::from(*price)).sum();
        fill_cart(store, &picks);
        let bill = store.context().bill_view();
        ensure!(
            bill.total() == expected_total,
            "bill total {} != {expected_total}",
            bill.total()
        );

        let status = store.place_order().await;
        ensure!(
            matches!(status, OrderStatus::Saved(_)),
            "order should be saved, got {status:?}"
        );
        ensure!(store.context().stage() == OrderStage::Preparing);
        let StageView::Bill(bill) = store.context().stage_view() else {
            bail!("preparing stage should still show the bill");
        };
        ensure!(!bill.has_place_action(), "preparing bill must be read-only");
        ensure!(
            matches!(&bill, cafe_core::BillView::Items { message: Some(m), .. } if m == PREPARING_MESSAGE),
            "preparing bill should carry the kitchen message"
        );
        ctx.note(&format!("🧾 order of ₹{expected_total} saved"));

        let history = store.load_history().await;
        let HistoryStatus::Loaded(rows) = history else {
            bail!("history should load, got {history:?}");
        };
        for (name, _) in &picks {
            ensure!(
                rows.iter().any(|row| &row.item_name == name),
                "history is missing {name}"
            );
        }
        ctx.note(&format!("📜 history lists {} rows", rows.len()));
        Ok(())
    }
}

storefront_only!(Checkout, "Register, Order and Review History");

impl CombinedScenario for Checkout {
    fn name(&self) -> &'static str {
        "Register, Order and Review History"
    }
}

pub struct Delivery;

#[async_trait::async_trait(?Send)]
impl StorefrontScenario for Delivery {
    async fn run_storefront(&self, store: &mut CafeStorefront, ctx: &RunCtx) -> Result<()> {
        fill_cart(store, &menu_picks(1));
        store
            .context_mut()
            .select_stage(OrderStage::OnTheWay)
            .context("selecting On the way")?;
        let StageView::OnTheWay { clock, .. } = store.context().stage_view() else {
            bail!("On the way should show the countdown");
        };
        ensure!(
            clock == format_clock(ctx.delivery_secs),
            "countdown should start at {}, shows {clock}",
            format_clock(ctx.delivery_secs)
        );
        ensure!(
            store.context_mut().select_stage(OrderStage::Delivered).is_err(),
            "Delivered must not be reachable by hand"
        );

        let mut ticker = ctx.ticker();
        let transition = store
            .run_countdown(ticker.as_mut())
            .await
            .context("countdown ended without delivering")?;
        ensure!(transition.to == OrderStage::Delivered);
        ensure!(store.context().cart().is_empty(), "delivery should clear the cart");
        ensure!(
            store.context().flow().ticker_key().is_none(),
            "no countdown may survive delivery"
        );
        ctx.note("🚴 delivered");
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserScenario for Delivery {
    async fn run_browser(&self, _driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let page = &ctx.page;
        page.open(&ctx.base_url).await?;
        page.show(Section::Menu).await?;
        page.add_item("coffee").await?;
        page.show(Section::Orders).await?;
        page.select_stage(OrderStage::OnTheWay).await?;

        let first = page.countdown_secs().await?;
        tokio::time::sleep(std::time::Duration::from_millis(2_100)).await;
        let later = page.countdown_secs().await?;
        ensure!(
            later < first,
            "countdown should run down ({first}s then {later}s)"
        );
        ensure!(
            page.is_disabled(OrderStage::Delivered).await?,
            "Delivered control should be disabled during delivery"
        );
        if ctx.verbose {
            println!("  ⏳ countdown {first}s -> {later}s");
        }
        Ok(())
    }
}

impl CombinedScenario for Delivery {
    fn name(&self) -> &'static str {
        "Delivery Countdown"
    }
}

pub struct CancelledDelivery;

#[async_trait::async_trait(?Send)]
impl StorefrontScenario for CancelledDelivery {
    async fn run_storefront(&self, store: &mut CafeStorefront, ctx: &RunCtx) -> Result<()> {
        fill_cart(store, &menu_picks(1));
        let transition = store
            .context_mut()
            .select_stage(OrderStage::OnTheWay)
            .context("selecting On the way")?;
        store
            .context_mut()
            .select_stage(OrderStage::Preparing)
            .context("selecting Preparing")?;

        ensure!(store.context().flow().ticker_key().is_none());
        let outcome = store.context_mut().tick(transition.generation);
        ensure!(
            outcome == cafe_core::TickOutcome::Ignored,
            "a tick from the abandoned countdown must be ignored, got {outcome:?}"
        );
        let mut ticker = ctx.ticker();
        ensure!(store.run_countdown(ticker.as_mut()).await.is_none());
        ensure!(store.context().stage() == OrderStage::Preparing);
        ensure!(!store.context().cart().is_empty(), "cancelling must keep the cart");
        ctx.note("🛑 countdown cancelled cleanly");
        Ok(())
    }
}

storefront_only!(CancelledDelivery, "Leaving On The Way Cancels The Countdown");

impl CombinedScenario for CancelledDelivery {
    fn name(&self) -> &'static str {
        "Leaving On The Way Cancels The Countdown"
    }
}

pub struct OfflineOrder;

#[async_trait::async_trait(?Send)]
impl StorefrontScenario for OfflineOrder {
    async fn run_storefront(&self, store: &mut CafeStorefront, ctx: &RunCtx) -> Result<()> {
        sign_up(store, ctx).await?;
        fill_cart(store, &menu_picks(2));
        ensure!(
            store.client().transport().set_online(false),
            "offline-order needs a scripted backend"
        );
        let status = store.place_order().await;
        store.client().transport().set_online(true);

        ensure!(
            status == OrderStatus::NotSaved,
            "unreachable backend should give NotSaved, got {status:?}"
        );
        ensure!(
            store.context().stage() == OrderStage::Preparing,
            "the order continues locally while offline"
        );
        ctx.note("📴 offline order continued locally");
        Ok(())
    }
}

storefront_only!(OfflineOrder, "Order With Backend Offline");

impl CombinedScenario for OfflineOrder {
    fn name(&self) -> &'static str {
        "Order With Backend Offline"
    }

    fn requires_scripted_backend(&self) -> bool {
        true
    }
}

pub struct AuthErrors;

#[async_trait::async_trait(?Send)]
impl StorefrontScenario for AuthErrors {
    async fn run_storefront(&self, store: &mut CafeStorefront, ctx: &RunCtx) -> Result<()> {
        ensure!(!store.login("  ", &ctx.password).await);
        ensure!(
            matches!(
                store.context().form_status(AuthForm::Login),
                FormStatus::Failed(AuthError::Validation(_))
            ),
            "blank username should fail validation"
        );

        sign_up(store, ctx).await?;
        ensure!(
            !store.register(&ctx.username, &ctx.password).await,
            "duplicate registration should be refused"
        );
        let FormStatus::Failed(AuthError::Rejected(message)) =
            store.context().form_status(AuthForm::Register)
        else {
            bail!("duplicate registration should carry the backend message");
        };
        ensure!(!message.is_empty());
        ctx.note(&format!("🚫 duplicate registration: {message}"));

        let wrong = format!("{}-wrong", ctx.password);
        ensure!(!store.login(&ctx.username, &wrong).await);
        ensure!(
            matches!(
                store.context().form_status(AuthForm::Login),
                FormStatus::Failed(AuthError::Rejected(_))
            ),
            "wrong password should be rejected by the backend"
        );
        ensure!(store.login(&ctx.username, &ctx.password).await, "correct password should sign in");
        Ok(())
    }
}

storefront_only!(AuthErrors, "Authentication Errors");

impl CombinedScenario for AuthErrors {
    fn name(&self) -> &'static str {
        "Authentication Errors"
    }
}

pub struct SessionRestore;

#[async_trait::async_trait(?Send)]
impl StorefrontScenario for SessionRestore {
    async fn run_storefront(&self, store: &mut CafeStorefront, ctx: &RunCtx) -> Result<()> {
        sign_up(store, ctx).await?;
        ensure!(store.login(&ctx.username, &ctx.password).await);

        let reloaded = ctx.open_with_store(
            store.client().transport().clone(),
            store.client().store().clone(),
        );
        ensure!(
            reloaded.context().session().current_user() == Some(ctx.username.as_str()),
            "reload should restore {}",
            ctx.username
        );
        ensure!(reloaded.context().cart().is_empty(), "the cart is not persisted");
        ctx.note("♻️ session restored after reload");
        Ok(())
    }
}

storefront_only!(SessionRestore, "Session Survives A Reload");

impl CombinedScenario for SessionRestore {
    fn name(&self) -> &'static str {
        "Session Survives A Reload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::testing::InMemoryBackend;

    use crate::transport::TesterTransport;

    fn ctx() -> RunCtx {
        RunCtx {
            username: "tester-1".to_string(),
            password: "secret".to_string(),
            delivery_secs: 3,
            realtime: false,
            verbose: false,
        }
    }

    fn run(scenario: &dyn StorefrontScenario) -> Result<()> {
        let ctx = ctx();
        let mut store = ctx.open(TesterTransport::Scripted(InMemoryBackend::new()));
        tokio_test::block_on(scenario.run_storefront(&mut store, &ctx))
    }

    #[test]
    fn catalog_passes_against_the_scripted_backend() {
        run(&GuestCheckout).unwrap();
        run(&Checkout).unwrap();
        run(&Delivery).unwrap();
        run(&CancelledDelivery).unwrap();
        run(&OfflineOrder).unwrap();
        run(&AuthErrors).unwrap();
        run(&SessionRestore).unwrap();
    }

    #[test]
    fn menu_picks_come_from_the_bundled_menu() {
        let picks = menu_picks(2);
        assert_eq!(picks.len(), 2);
        assert!(picks.iter().all(|(name, price)| !name.is_empty() && *price > 0));
    }
}
