//! Chat page - questions about the uploaded document

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::actions::{ask_question, refresh_status};
use crate::api::HttpApi;
use crate::components::{ChatInput, ChatMessage, Header, TypingIndicator};
use crate::state::AppState;

/// Main chat page
#[component]
pub fn ChatPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let chat = state.chat;

    let input = RwSignal::new(String::new());
    let messages_end_ref = NodeRef::<leptos::html::Div>::new();

    // Pick up a document uploaded in an earlier session
    let state_for_load = state.clone();
    Effect::new(move |_| {
        let state = state_for_load.clone();
        spawn_local(async move {
            let api = HttpApi::from_state(&state);
            if let Err(e) = refresh_status(&api, &state.chat).await {
                tracing::error!("Failed to get chat status: {}", e);
            }
        });
    });

    // Keep the newest message in view
    Effect::new(move |_| {
        chat.session.track();
        chat.is_loading.track();
        if let Some(el) = messages_end_ref.get() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    let state_for_send = state.clone();
    let send_question = move || {
        let question = input.get_untracked();
        let state = state_for_send.clone();
        let submittable = state
            .chat
            .session
            .with_untracked(|s| s.submittable_question(&question, state.chat.is_loading.get_untracked()))
            .is_some();
        if !submittable {
            return;
        }
        input.set(String::new());

        spawn_local(async move {
            let api = HttpApi::from_state(&state);
            if let Err(e) = ask_question(&api, &state.chat, &question).await {
                tracing::error!("Failed to send message: {}", e);
            }
        });
    };

    let input_disabled = Signal::derive(move || !chat.has_document() || chat.is_loading.get());
    let placeholder = Signal::derive(move || {
        if chat.has_document() {
            "Ask a question about your document...".to_string()
        } else {
            "Upload a document to start chatting".to_string()
        }
    });

    view! {
        <Title text="Chat - Brain" />
        <div class="flex flex-col h-screen bg-gray-900">
            <Header />

            <div class="flex-1 overflow-y-auto px-6 py-4 space-y-4">
                <For
                    each=move || chat.session.with(|s| s.messages().to_vec())
                    key=|msg| msg.id.clone()
                    let:msg
                >
                    <ChatMessage message=msg />
                </For>

                <Show when=move || chat.is_loading.get()>
                    <TypingIndicator />
                </Show>

                // Scroll anchor
                <div node_ref=messages_end_ref></div>
            </div>

            <ChatInput
                value=input
                on_submit=send_question
                disabled=input_disabled
                placeholder=placeholder
            />
        </div>
    }
}
