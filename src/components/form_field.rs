//! Labelled input with an inline validation message

use leptos::prelude::*;

#[component]
pub fn FormField(
    label: &'static str,
    value: RwSignal<String>,
    /// Message shown under the input
    #[prop(into)]
    error: Signal<Option<String>>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] autocomplete: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label class="sr-only">{label}</label>
            <input
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                placeholder=placeholder
                autocomplete=autocomplete
                class=move || format!(
                    "appearance-none rounded-lg relative block w-full px-3 py-2 border bg-gray-800 text-white
                     placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-transparent {}",
                    if error.get().is_some() { "border-red-500" } else { "border-gray-700" }
                )
            />
            {move || error.get().map(|msg| view! {
                <p class="mt-1 text-sm text-red-500">{msg}</p>
            })}
        </div>
    }
}
