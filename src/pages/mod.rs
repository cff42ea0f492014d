//! Routed pages

use leptos::prelude::*;

pub mod chat;
pub mod login;
pub mod signup;

/// Claim a form's submitting flag. Returns `false` if a submit is already
/// running. The flag is set before the request task is spawned, so a second
/// submit event in the same tick is rejected.
pub(crate) fn begin_submit(is_submitting: RwSignal<bool>) -> bool {
    if is_submitting.get_untracked() {
        return false;
    }
    is_submitting.set(true);
    true
}
