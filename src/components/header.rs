//! Header component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use web_sys::HtmlInputElement;

use crate::actions::{logout, remove_document, upload_document};
use crate::api::HttpApi;
use crate::document::ACCEPT_ATTR;
use crate::guard::LOGIN_PATH;
use crate::state::AppState;
use crate::types::ClientError;

/// Chat header with upload, active document and logout controls
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();
    let chat = state.chat;

    let has_file = Signal::derive(move || chat.session.with(|s| s.document().present));
    let file_name = Signal::derive(move || {
        chat.session.with(|s| s.document().display_name.clone())
    });

    let state_for_upload = state.clone();
    let on_file_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Let the same file be picked again
        input.set_value("");

        let state = state_for_upload.clone();
        spawn_local(async move {
            let api = HttpApi::from_state(&state);
            match upload_document(&api, &state.chat, &file).await {
                Ok(()) => {}
                Err(ClientError::UnsupportedFileType(kind)) => {
                    tracing::warn!("Rejected upload of type {}", kind);
                    let _ = window().alert_with_message("Please upload only PDF or Word documents");
                }
                Err(e) => tracing::error!("File upload failed: {}", e),
            }
        });
    };

    let state_for_delete = state.clone();
    let on_delete = move |_| {
        let state = state_for_delete.clone();
        spawn_local(async move {
            let api = HttpApi::from_state(&state);
            if let Err(e) = remove_document(&api, &state.chat).await {
                tracing::error!("Failed to delete file: {}", e);
            }
        });
    };

    let state_for_logout = state.clone();
    let on_logout = move |_| {
        logout(&state_for_logout.auth, &state_for_logout.chat);
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <header class="flex items-center justify-between px-6 py-4 bg-gray-800 border-b border-gray-700">
            <div class="flex items-center gap-2">
                <span class="text-3xl">"🧠"</span>
                <h1 class="text-xl font-bold">"Brain"</h1>
            </div>

            <nav class="flex items-center gap-4">
                <Show when=move || !has_file.get()>
                    <label class="flex items-center px-4 py-2 bg-blue-600 text-white rounded-lg cursor-pointer hover:bg-blue-700 transition-colors">
                        <span class="mr-2">"⬆"</span>
                        "Upload File"
                        <input
                            type="file"
                            accept=ACCEPT_ATTR
                            class="hidden"
                            on:change=on_file_change.clone()
                            disabled=move || chat.is_loading.get()
                        />
                    </label>
                </Show>

                {move || file_name.get().map(|name| {
                    let on_delete = on_delete.clone();
                    view! {
                        <div class="flex items-center px-3 py-1.5 bg-gray-700 rounded-lg">
                            <span class="mr-2 text-gray-400">"📄"</span>
                            <span class="text-sm text-gray-300 max-w-[150px] truncate">{name}</span>
                            <button
                                on:click=on_delete
                                disabled=move || chat.is_loading.get()
                                class="ml-2 text-gray-400 hover:text-red-500 transition-colors"
                                title="Remove document"
                            >
                                "🗑"
                            </button>
                        </div>
                    }
                })}

                <button
                    on:click=on_logout
                    class="flex items-center px-4 py-2 text-gray-300 hover:text-white transition-colors"
                >
                    "Logout"
                </button>
            </nav>
        </header>
    }
}
