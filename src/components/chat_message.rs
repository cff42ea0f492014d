//! Chat message component

use leptos::prelude::*;
use crate::types;

/// Render a single transcript entry
#[component]
pub fn ChatMessage(message: types::ChatMessage) -> impl IntoView {
    let is_user = message.is_user();

    view! {
        <div class=format!(
            "flex flex-col gap-1 message-appear {}",
            if is_user { "items-end" } else { "items-start" }
        )>
            <div class=format!(
                "max-w-2xl p-4 rounded-lg whitespace-pre-wrap break-words {}",
                if is_user {
                    "bg-blue-600 text-white"
                } else {
                    "bg-gray-800 text-gray-100"
                }
            )>
                {message.content}
            </div>
            <span class="text-xs text-gray-500">
                {message.timestamp.format("%H:%M").to_string()}
            </span>
        </div>
    }
}
