//! Export links, shown once a search has results to export.

use leptos::*;

use crate::config::CSV_FILE_NAME;

#[component]
pub fn DownloadLinks(
    /// Server-regenerated CSV.
    server_csv: RwSignal<Option<String>>,
    /// Object URL of the CSV built in the browser.
    local_csv: RwSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="downloads">
            <Show
                when=move || server_csv.with(Option::is_some)
                fallback=|| view! { }
            >
                <a
                    class="download-link"
                    href=move || server_csv.get().unwrap_or_default()
                    target="_blank"
                >
                    "⬇️ Baixar CSV (servidor)"
                </a>
            </Show>
            <Show
                when=move || local_csv.with(Option::is_some)
                fallback=|| view! { }
            >
                <a
                    class="download-link"
                    href=move || local_csv.get().unwrap_or_default()
                    download=CSV_FILE_NAME
                >
                    "⬇️ Baixar CSV (local)"
                </a>
            </Show>
        </div>
    }
}
