//! Order stage state machine.
//!
//! The flow moves through `Placed → Preparing → OnTheWay → Delivered`. Every
//! transition drops any live countdown before running the entry action of the
//! new stage, so at most one countdown exists at a time. Each transition also
//! bumps a generation counter which tags ticks and in-flight requests; work
//! issued under an older generation is discarded.
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bill::{self, BillView};
use crate::cart::Cart;
use crate::constants::{CAFE_MAP_EMBED_URL, DELIVERY_COUNTDOWN_SECS, PREPARING_MESSAGE};
use crate::countdown::{Countdown, CountdownTick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStage {
    Placed,
    Preparing,
    OnTheWay,
    Delivered,
}

impl OrderStage {
    pub const ALL: [Self; 4] = [
        Self::Placed,
        Self::Preparing,
        Self::OnTheWay,
        Self::Delivered,
    ];

    /// Stable identifier used for DOM ids and translation keys.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Preparing => "preparing",
            Self::OnTheWay => "ontheway",
            Self::Delivered => "delivered",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("delivery is completed by the countdown, not by hand")]
    DeliveredIsTimerOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: OrderStage,
    pub to: OrderStage,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick belonged to a cancelled countdown or arrived with none running.
    Ignored,
    Running { remaining: u32 },
    Delivered(Transition),
}

/// What the orders panel shows for the current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageView {
    Bill(BillView),
    OnTheWay { remaining: u32, clock: String },
    Delivered { map_embed_url: &'static str },
}

/// One of the four stage-advance controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageControl {
    pub stage: OrderStage,
    pub active: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFlow {
    stage: OrderStage,
    countdown: Option<Countdown>,
    generation: u64,
    delivery_secs: u32,
}

impl Default for OrderFlow {
    fn default() -> Self {
        Self::with_delivery_secs(DELIVERY_COUNTDOWN_SECS)
    }
}

impl OrderFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flow whose countdown runs for `delivery_secs` instead of twenty minutes.
    #[must_use]
    pub const fn with_delivery_secs(delivery_secs: u32) -> Self {
        Self {
            stage: OrderStage::Placed,
            countdown: None,
            generation: 0,
            delivery_secs,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> OrderStage {
        self.stage
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Identity of the live countdown, if any. A tick source should live
    /// exactly as long as this value stays the same.
    #[must_use]
    pub const fn ticker_key(&self) -> Option<u64> {
        match self.countdown {
            Some(_) => Some(self.generation),
            None => None,
        }
    }

    /// Enter `stage` unconditionally, running exit and entry actions.
    pub fn enter(&mut self, stage: OrderStage, cart: &mut Cart) -> Transition {
        self.countdown = None;
        self.generation += 1;
        let from = self.stage;
        self.stage = stage;

        match stage {
            OrderStage::OnTheWay => {
                self.countdown = Some(Countdown::start(self.delivery_secs));
            }
            OrderStage::Delivered => cart.clear(),
            OrderStage::Placed | OrderStage::Preparing => {}
        }

        debug!(
            "order stage {} -> {} (generation {})",
            from.key(),
            stage.key(),
            self.generation
        );
        Transition {
            from,
            to: stage,
            generation: self.generation,
        }
    }

    /// User-requested transition from a stage control.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::DeliveredIsTimerOnly`] when asked to jump to
    /// `Delivered` before the countdown has finished.
    pub fn navigate(
        &mut self,
        stage: OrderStage,
        cart: &mut Cart,
    ) -> Result<Transition, StageError> {
        if stage == OrderStage::Delivered && self.stage != OrderStage::Delivered {
            return Err(StageError::DeliveredIsTimerOnly);
        }
        Ok(self.enter(stage, cart))
    }

    /// Apply one countdown tick issued under `generation`.
    pub fn tick(&mut self, generation: u64, cart: &mut Cart) -> TickOutcome {
        if generation != self.generation {
            return TickOutcome::Ignored;
        }
        let Some(countdown) = self.countdown.as_mut() else {
            return TickOutcome::Ignored;
        };
        match countdown.tick() {
            CountdownTick::Remaining(remaining) => TickOutcome::Running { remaining },
            CountdownTick::Expired => {
                self.countdown = None;
                TickOutcome::Delivered(self.enter(OrderStage::Delivered, cart))
            }
        }
    }

    #[must_use]
    pub fn view(&self, cart: &Cart) -> StageView {
        match self.stage {
            OrderStage::Placed => StageView::Bill(bill::render(cart, true, true, "")),
            OrderStage::Preparing => {
                StageView::Bill(bill::render(cart, false, false, PREPARING_MESSAGE))
            }
            OrderStage::OnTheWay => {
                let remaining = self.countdown.map_or(0, |c| c.remaining());
                StageView::OnTheWay {
                    remaining,
                    clock: crate::countdown::format_clock(remaining),
                }
            }
            OrderStage::Delivered => StageView::Delivered {
                map_embed_url: CAFE_MAP_EMBED_URL,
            },
        }
    }

    #[must_use]
    pub fn controls(&self) -> [StageControl; 4] {
        OrderStage::ALL.map(|stage| StageControl {
            stage,
            active: stage == self.stage,
            enabled: stage != OrderStage::Delivered || self.stage == OrderStage::Delivered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with_items() -> Cart {
        let mut cart = Cart::new();
        cart.add("Coffee", 100);
        cart.add("Sandwich", 150);
        cart
    }

    #[test]
    fn only_on_the_way_holds_a_countdown() {
        let mut cart = cart_with_items();
        let mut flow = OrderFlow::new();
        for stage in [
            OrderStage::Placed,
            OrderStage::Preparing,
            OrderStage::OnTheWay,
            OrderStage::Placed,
            OrderStage::OnTheWay,
            OrderStage::OnTheWay,
            OrderStage::Delivered,
        ] {
            flow.enter(stage, &mut cart);
            assert_eq!(flow.countdown().is_some(), stage == OrderStage::OnTheWay);
        }
    }

    #[test]
    fn reentering_on_the_way_restarts_the_countdown() {
        let mut cart = cart_with_items();
        let mut flow = OrderFlow::with_delivery_secs(10);
        let first = flow.enter(OrderStage::OnTheWay, &mut cart);
        flow.tick(first.generation, &mut cart);
        assert_eq!(flow.countdown().map(Countdown::remaining), Some(9));

        let second = flow.enter(OrderStage::OnTheWay, &mut cart);
        assert_eq!(flow.countdown().map(Countdown::remaining), Some(10));
        assert_eq!(flow.tick(first.generation, &mut cart), TickOutcome::Ignored);
        assert_eq!(
            flow.tick(second.generation, &mut cart),
            TickOutcome::Running { remaining: 9 }
        );
    }

    #[test]
    fn countdown_expiry_delivers_once_and_clears_cart() {
        let mut cart = cart_with_items();
        let mut flow = OrderFlow::new();
        let generation = flow.enter(OrderStage::OnTheWay, &mut cart).generation;
        let mut deliveries = 0;
        for _ in 0..DELIVERY_COUNTDOWN_SECS {
            if let TickOutcome::Delivered(transition) = flow.tick(generation, &mut cart) {
                deliveries += 1;
                assert_eq!(transition.from, OrderStage::OnTheWay);
            }
        }
        assert_eq!(deliveries, 1);
        assert_eq!(flow.stage(), OrderStage::Delivered);
        assert!(flow.countdown().is_none());
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
        assert_eq!(flow.tick(generation, &mut cart), TickOutcome::Ignored);
    }

    #[test]
    fn manual_delivery_is_rejected() {
        let mut cart = cart_with_items();
        let mut flow = OrderFlow::new();
        flow.enter(OrderStage::OnTheWay, &mut cart);
        let before = flow.generation();
        assert_eq!(
            flow.navigate(OrderStage::Delivered, &mut cart),
            Err(StageError::DeliveredIsTimerOnly)
        );
        assert_eq!(flow.generation(), before);
        assert_eq!(flow.stage(), OrderStage::OnTheWay);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn delivered_can_be_reentered() {
        let mut cart = cart_with_items();
        let mut flow = OrderFlow::with_delivery_secs(1);
        let generation = flow.enter(OrderStage::OnTheWay, &mut cart).generation;
        flow.tick(generation, &mut cart);
        assert!(flow.navigate(OrderStage::Delivered, &mut cart).is_ok());
        assert_eq!(flow.stage(), OrderStage::Delivered);
    }

    #[test]
    fn placed_after_delivery_shows_empty_bill() {
        let mut cart = cart_with_items();
        let mut flow = OrderFlow::new();
        flow.enter(OrderStage::Delivered, &mut cart);
        flow.enter(OrderStage::Placed, &mut cart);
        assert_eq!(flow.view(&cart), StageView::Bill(BillView::Empty));
    }

    #[test]
    fn views_follow_entry_actions() {
        let mut cart = cart_with_items();
        let mut flow = OrderFlow::new();

        let StageView::Bill(placed) = flow.view(&cart) else {
            panic!("placed renders a bill");
        };
        assert!(placed.has_place_action());
        assert!(placed.lines().iter().all(|l| l.removable));

        flow.enter(OrderStage::Preparing, &mut cart);
        let StageView::Bill(BillView::Items {
            message,
            place_action,
            ..
        }) = flow.view(&cart)
        else {
            panic!("preparing renders a bill");
        };
        assert!(!place_action);
        assert_eq!(message.as_deref(), Some(PREPARING_MESSAGE));

        flow.enter(OrderStage::OnTheWay, &mut cart);
        assert_eq!(
            flow.view(&cart),
            StageView::OnTheWay {
                remaining: 1200,
                clock: "20:00".to_string()
            }
        );
    }

    #[test]
    fn delivered_control_enabled_only_once_delivered() {
        let mut cart = cart_with_items();
        let mut flow = OrderFlow::new();
        let delivered = |flow: &OrderFlow| flow.controls()[3];

        assert!(!delivered(&flow).enabled);
        assert!(flow.controls()[..3].iter().all(|c| c.enabled));
        flow.enter(OrderStage::OnTheWay, &mut cart);
        assert!(!delivered(&flow).enabled);
        assert!(flow.controls()[2].active);
        flow.enter(OrderStage::Delivered, &mut cart);
        assert!(delivered(&flow).enabled);
        assert!(delivered(&flow).active);
    }

    #[test]
    fn ticker_key_tracks_live_countdown() {
        let mut cart = Cart::new();
        let mut flow = OrderFlow::new();
        assert_eq!(flow.ticker_key(), None);
        let t = flow.enter(OrderStage::OnTheWay, &mut cart);
        assert_eq!(flow.ticker_key(), Some(t.generation));
        flow.enter(OrderStage::Preparing, &mut cart);
        assert_eq!(flow.ticker_key(), None);
    }

    #[test]
    fn stage_keys_round_trip() {
        for stage in OrderStage::ALL {
            assert_eq!(OrderStage::from_key(stage.key()), Some(stage));
        }
        assert_eq!(OrderStage::from_key("shipped"), None);
    }
}
