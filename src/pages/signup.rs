//! Signup page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;

use crate::actions::signup;
use crate::api::HttpApi;
use crate::components::{FormField, LoadingSpinner};
use crate::guard::{CHAT_PATH, LOGIN_PATH};
use crate::pages::begin_submit;
use crate::state::AppState;
use crate::types::SignupCredentials;
use crate::validation::{Field, FieldErrors};

/// Signup page
#[component]
pub fn SignupPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let is_submitting = RwSignal::new(false);

    let field_error = move |field: Field| {
        Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let credentials = SignupCredentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        if let Err(field_errors) = credentials.validate() {
            errors.set(field_errors);
            return;
        }
        errors.set(FieldErrors::default());
        if !begin_submit(is_submitting) {
            return;
        }

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let api = HttpApi::from_state(&state);
            let result = signup(&api, &state.auth, &credentials).await;
            is_submitting.set(false);

            match result {
                Ok(()) => navigate(CHAT_PATH, Default::default()),
                Err(e) => tracing::error!("Signup failed: {}", e),
            }
        });
    };

    view! {
        <Title text="Create account - Brain" />
        <div class="min-h-screen flex items-center justify-center bg-gray-900 px-4">
            <div class="max-w-md w-full space-y-8">
                <div class="text-center">
                    <div class="mx-auto text-5xl">"🧠"</div>
                    <h2 class="mt-6 text-3xl font-extrabold">"Create your account"</h2>
                    <p class="mt-2 text-gray-400">"Start asking questions about your documents"</p>
                </div>

                <form on:submit=on_submit class="mt-8 space-y-6">
                    <div class="space-y-4">
                        <FormField
                            label="Email address"
                            input_type="email"
                            value=email
                            error=field_error(Field::Email)
                            placeholder="Email address"
                            autocomplete="email"
                        />
                        <FormField
                            label="Password"
                            input_type="password"
                            value=password
                            error=field_error(Field::Password)
                            placeholder="Password"
                            autocomplete="new-password"
                        />
                        <FormField
                            label="Confirm password"
                            input_type="password"
                            value=confirm_password
                            error=field_error(Field::ConfirmPassword)
                            placeholder="Confirm password"
                            autocomplete="new-password"
                        />
                    </div>

                    <button
                        type="submit"
                        disabled=move || is_submitting.get()
                        class="w-full flex justify-center items-center gap-2 py-2 px-4 text-sm font-medium rounded-lg
                               text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed"
                    >
                        <Show when=move || is_submitting.get()>
                            <LoadingSpinner size="w-4 h-4" />
                        </Show>
                        {move || if is_submitting.get() { "Creating account..." } else { "Sign up" }}
                    </button>

                    <p class="text-center text-sm text-gray-400">
                        "Already have an account? "
                        <a href=LOGIN_PATH class="font-medium text-blue-500 hover:text-blue-400">
                            "Sign in"
                        </a>
                    </p>
                </form>
            </div>
        </div>
    }
}
