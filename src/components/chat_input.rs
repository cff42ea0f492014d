//! Question input component

use leptos::prelude::*;
use web_sys::HtmlTextAreaElement;

/// Question box with auto-resize textarea
#[component]
pub fn ChatInput(
    /// Current input value
    value: RwSignal<String>,
    /// Called when user submits
    on_submit: impl Fn() + 'static + Clone,
    /// Whether input is disabled
    #[prop(into)]
    disabled: Signal<bool>,
    /// Placeholder text
    #[prop(into)]
    placeholder: Signal<String>,
) -> impl IntoView {
    let textarea_ref = NodeRef::<leptos::html::Textarea>::new();

    let resize_textarea = move || {
        if let Some(textarea) = textarea_ref.get() {
            let el: &HtmlTextAreaElement = textarea.as_ref();
            let new_height = el.scroll_height().min(200);
            let _ = el.set_attribute("style", &format!("height: {}px; max-height: 200px;", new_height));
        }
    };

    let on_input = move |ev: web_sys::Event| {
        value.set(event_target_value(&ev));
        resize_textarea();
    };

    // Enter submits, Shift+Enter inserts a newline
    let on_keydown = {
        let on_submit = on_submit.clone();
        move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Enter" && !ev.shift_key() {
                ev.prevent_default();
                if !disabled.get_untracked() && !value.get_untracked().trim().is_empty() {
                    on_submit();
                }
            }
        }
    };

    let on_form_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !disabled.get_untracked() {
            on_submit();
        }
    };

    let is_empty = Signal::derive(move || value.get().trim().is_empty());

    view! {
        <form
            on:submit=on_form_submit
            class="px-6 py-4 bg-gray-800 border-t border-gray-700"
        >
            <div class="flex items-end gap-4">
                <textarea
                    node_ref=textarea_ref
                    prop:value=move || value.get()
                    on:input=on_input
                    on:keydown=on_keydown
                    placeholder=move || placeholder.get()
                    disabled=move || disabled.get()
                    rows="1"
                    class="flex-1 px-4 py-2 bg-gray-700 text-white rounded-lg resize-none
                           placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-blue-500
                           disabled:opacity-50 disabled:cursor-not-allowed"
                    style="max-height: 200px;"
                ></textarea>
                <button
                    type="submit"
                    disabled=move || disabled.get() || is_empty.get()
                    class="flex items-center px-4 py-2 bg-blue-600 text-white rounded-lg
                           disabled:opacity-50 disabled:cursor-not-allowed hover:bg-blue-700 transition-colors"
                >
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        class="w-5 h-5"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    >
                        <line x1="22" y1="2" x2="11" y2="13"></line>
                        <polygon points="22 2 15 22 11 13 2 9 22 2"></polygon>
                    </svg>
                </button>
            </div>
        </form>
    }
}
