//! Customer-facing text for order and form outcomes.
use std::collections::BTreeMap;

use cafe_core::{
    AuthError, AuthForm, FormStatus, OrderContext, OrderError, OrderStatus, Section,
    ValidationError,
};

use crate::i18n::{t, tr};

fn with_message(key: &str, message: &str) -> String {
    let mut args = BTreeMap::new();
    args.insert("message", message);
    tr(key, Some(&args))
}

#[must_use]
pub fn order_status_text(status: &OrderStatus) -> Option<String> {
    let text = match status {
        OrderStatus::Idle => return None,
        OrderStatus::Pending => t("order.pending"),
        OrderStatus::Saved(Some(message)) => format!("✅ {message}"),
        OrderStatus::Saved(None) => t("order.saved"),
        OrderStatus::NotSaved => t("order.not_saved"),
        OrderStatus::Failed(OrderError::NotAuthenticated) => t("order.login_required"),
        OrderStatus::Failed(OrderError::Validation(ValidationError::EmptyCart)) => {
            t("order.empty")
        }
        OrderStatus::Failed(err) => with_message("order.failed", &err.to_string()),
    };
    Some(text)
}

#[must_use]
pub fn form_status_text(form: AuthForm, status: &FormStatus) -> Option<String> {
    let text = match (form, status) {
        (_, FormStatus::Idle) => return None,
        (AuthForm::Login, FormStatus::Pending) => t("auth.logging_in"),
        (AuthForm::Register, FormStatus::Pending) => t("auth.creating"),
        (AuthForm::Login, FormStatus::Succeeded) => t("auth.login_ok"),
        (AuthForm::Register, FormStatus::Succeeded) => t("auth.register_ok"),
        (_, FormStatus::Failed(AuthError::Validation(_))) => t("auth.empty_fields"),
        (_, FormStatus::Failed(AuthError::ServerUnreachable)) => t("auth.unreachable"),
        (_, FormStatus::Failed(AuthError::Rejected(message))) => {
            with_message("auth.rejected", message)
        }
    };
    Some(text)
}

/// The message the live region should carry for the current state.
#[must_use]
pub fn announcement(ctx: &OrderContext) -> Option<String> {
    match ctx.section() {
        Section::Account => {
            let form = ctx.active_form();
            form_status_text(form, ctx.form_status(form))
        }
        Section::Orders => order_status_text(ctx.order_status()),
        Section::Home | Section::Menu => None,
    }
}
