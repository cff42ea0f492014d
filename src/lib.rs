//! Brain UI - Leptos frontend
//!
//! Sign in, upload a PDF or Word document, and ask questions about it.

pub mod actions;
pub mod api;
pub mod components;
pub mod config;
pub mod document;
pub mod guard;
pub mod pages;
pub mod state;
pub mod types;
pub mod validation;

use leptos::prelude::*;
use leptos_meta::provide_meta_context;
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    path,
};

use components::{ProtectedRoute, PublicRoute};
use config::ClientConfig;
use guard::CHAT_PATH;
use pages::{chat::ChatPage, login::LoginPage, signup::SignupPage};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Initialize global state
    let app_state = AppState::new(ClientConfig::from_build_env());
    provide_context(app_state);

    view! {
        <Router>
            <main class="min-h-screen bg-gray-900 text-white">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route
                        path=path!("/login")
                        view=|| view! { <PublicRoute><LoginPage /></PublicRoute> }
                    />
                    <Route
                        path=path!("/signup")
                        view=|| view! { <PublicRoute><SignupPage /></PublicRoute> }
                    />
                    <Route
                        path=path!("/chat")
                        view=|| view! { <ProtectedRoute><ChatPage /></ProtectedRoute> }
                    />
                    <Route path=path!("/") view=|| view! { <Redirect path=CHAT_PATH /> } />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-gray-500 mb-4">"404"</h1>
                <p class="text-xl text-gray-400 mb-8">"Page not found"</p>
                <a
                    href=CHAT_PATH
                    class="px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition-colors"
                >
                    "Back to chat"
                </a>
            </div>
        </div>
    }
}
