//! Route wrappers that redirect based on the session

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::guard::{self, RouteAccess};
use crate::state::AppState;

fn guarded(
    token: RwSignal<Option<String>>,
    rule: fn(Option<&str>) -> RouteAccess,
    children: ChildrenFn,
) -> impl IntoView {
    move || match token.with(|t| rule(t.as_deref())) {
        RouteAccess::Allow => children().into_any(),
        RouteAccess::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
    }
}

/// Renders its children only with a session, otherwise sends to `/login`
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppState>();
    guarded(state.auth.token, guard::protected, children)
}

/// Renders its children only without a session, otherwise sends to `/chat`
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppState>();
    guarded(state.auth.token, guard::public_only, children)
}
