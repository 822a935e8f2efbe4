use cafe_core::testing::{InMemoryBackend, MockTransport};
use cafe_core::{
    AuthError, BillView, Cart, ImmediateTicker, MemorySessionStore, OrderContext, OrderError,
    OrderFlow, OrderStage, OrderStatus, Section, SessionClient, SessionState, SessionStore,
    StageError, StageView, Storefront, TickOutcome, render_bill,
};
use futures::executor::block_on;
use serde_json::json;

fn shop(
    backend: InMemoryBackend,
    delivery_secs: u32,
) -> Storefront<InMemoryBackend, MemorySessionStore> {
    Storefront::open_with_flow(
        SessionClient::new(backend, MemorySessionStore::default()),
        OrderFlow::with_delivery_secs(delivery_secs),
    )
}

#[test]
fn coffee_and_sandwich_bill() {
    let mut cart = Cart::new();
    cart.add("Coffee", 100);
    cart.add("Sandwich", 150);

    let bill = render_bill(&cart, true, true, "");
    assert_eq!(bill.lines().len(), 2);
    assert_eq!(bill.total(), 250);
    assert!(bill.has_place_action());

    cart.remove(0);
    let bill = render_bill(&cart, true, true, "");
    assert_eq!(bill.lines().len(), 1);
    assert_eq!(bill.lines()[0].name, "Sandwich");
    assert_eq!(bill.total(), 150);
}

#[test]
fn empty_bill_ignores_every_flag() {
    let cart = Cart::new();
    for removable in [false, true] {
        for place in [false, true] {
            for message in ["", "hello"] {
                assert_eq!(render_bill(&cart, removable, place, message), BillView::Empty);
            }
        }
    }
}

#[test]
fn full_countdown_delivers_exactly_once() {
    let mut ctx = OrderContext::new(SessionState::default());
    ctx.add_item("Coffee", 100);
    let generation = ctx
        .select_stage(OrderStage::OnTheWay)
        .expect("on the way is selectable")
        .generation;

    let mut deliveries = 0;
    let mut last_remaining = u32::MAX;
    for _ in 0..1200 {
        match ctx.tick(generation) {
            TickOutcome::Running { remaining } => {
                assert!(remaining < last_remaining);
                last_remaining = remaining;
            }
            TickOutcome::Delivered(_) => deliveries += 1,
            TickOutcome::Ignored => panic!("live countdown ignored a tick"),
        }
    }
    assert_eq!(deliveries, 1);
    assert_eq!(ctx.stage(), OrderStage::Delivered);
    assert!(ctx.cart().is_empty());
    assert_eq!(ctx.tick(generation), TickOutcome::Ignored);
}

#[test]
fn leaving_on_the_way_cancels_delivery() {
    let mut ctx = OrderContext::new(SessionState::default());
    ctx.add_item("Coffee", 100);
    let generation = ctx.select_stage(OrderStage::OnTheWay).unwrap().generation;
    ctx.tick(generation);
    ctx.select_stage(OrderStage::Preparing).unwrap();
    for _ in 0..1200 {
        assert_eq!(ctx.tick(generation), TickOutcome::Ignored);
    }
    assert_eq!(ctx.stage(), OrderStage::Preparing);
    assert_eq!(ctx.cart().len(), 1);
}

#[test]
fn delivered_cannot_be_chosen_by_hand() {
    let mut ctx = OrderContext::new(SessionState::default());
    ctx.add_item("Coffee", 100);
    assert_eq!(
        ctx.select_stage(OrderStage::Delivered),
        Err(StageError::DeliveredIsTimerOnly)
    );
    assert_eq!(ctx.cart().len(), 1);
    assert!(matches!(ctx.stage_view(), StageView::Bill(_)));
}

#[test]
fn login_persists_and_restores() {
    let store = MemorySessionStore::default();
    let client = SessionClient::new(
        MockTransport::replying(json!({"success": true, "message": "Login successful"})),
        store.clone(),
    );
    let mut front = Storefront::open(client);
    assert!(!front.context().session().is_signed_in());
    assert!(block_on(front.login("asha", "pw")));
    assert_eq!(front.context().session().current_user(), Some("asha"));
    assert_eq!(store.load_user().as_deref(), Some("asha"));

    let reopened = Storefront::open(SessionClient::new(MockTransport::offline(), store));
    assert_eq!(reopened.context().session().current_user(), Some("asha"));
}

#[test]
fn backend_message_is_shown_verbatim() {
    let client = SessionClient::new(
        MockTransport::replying(json!({"success": false, "message": "bad credentials"})),
        MemorySessionStore::default(),
    );
    let err = block_on(client.login("asha", "nope")).unwrap_err();
    assert_eq!(err.to_string(), "bad credentials");
}

#[test]
fn guest_checkout_sends_nothing() {
    let transport = MockTransport::replying(json!({"success": true}));
    let mut front = Storefront::open(SessionClient::new(
        transport.clone(),
        MemorySessionStore::default(),
    ));
    front.context_mut().add_item("Coffee", 100);
    assert_eq!(
        block_on(front.place_order()),
        OrderStatus::Failed(OrderError::NotAuthenticated)
    );
    assert!(transport.requests().is_empty());
    assert_eq!(front.context().stage(), OrderStage::Placed);
}

#[test]
fn duplicate_registration_is_rejected() {
    let backend = InMemoryBackend::new().with_account("asha", "pw");
    let mut front = shop(backend, 3);
    assert!(!block_on(front.register("asha", "other")));
    assert_eq!(
        block_on(front.client().register("asha", "other")).unwrap_err(),
        AuthError::Rejected("Username already taken".into())
    );
}

#[test]
fn whole_visit_from_menu_to_delivery() {
    let backend = InMemoryBackend::new();
    let mut front = shop(backend.clone(), 3);
    assert!(block_on(front.register("ravi", "chai")));

    front.context_mut().show(Section::Menu);
    front.context_mut().add_item("Masala Chai", 60);
    front.context_mut().add_item("Vada Pav", 40);
    front.context_mut().show(Section::Orders);
    assert_eq!(front.context().bill_view().total(), 100);

    assert!(matches!(block_on(front.place_order()), OrderStatus::Saved(_)));
    front
        .context_mut()
        .select_stage(OrderStage::OnTheWay)
        .unwrap();
    let delivered = block_on(front.run_countdown(&mut ImmediateTicker));
    assert!(delivered.is_some());
    assert!(matches!(
        front.context().stage_view(),
        StageView::Delivered { .. }
    ));

    front.context_mut().show(Section::Orders);
    assert_eq!(front.context().bill_view(), BillView::Empty);
    assert_eq!(backend.order_rows(), 2);
}
