//! Status messages for the current page session.

use leptos::*;

use crate::types::Notice;

#[component]
pub fn NoticePanel(notices: RwSignal<Vec<Notice>>) -> impl IntoView {
    view! {
        <Show
            when=move || !notices.with(Vec::is_empty)
            fallback=|| view! { }
        >
            <div class="notices-panel">
                <div class="notices-header">
                    <span class="notices-title">"📋 Mensagens"</span>
                    <button
                        class="notices-clear"
                        on:click=move |_| notices.set(Vec::new())
                    >
                        "Limpar"
                    </button>
                </div>
                <div class="notices-content">
                    <For
                        each=move || notices.get().into_iter().enumerate()
                        key=|(i, notice)| (*i, notice.timestamp.clone(), notice.message.clone())
                        children=move |(_, notice)| {
                            view! {
                                <div class=format!("notice-entry {}", notice.level.css_class())>
                                    <span class="notice-time">"[" {notice.timestamp} "] "</span>
                                    {notice.message}
                                </div>
                            }
                        }
                    />
                </div>
            </div>
        </Show>
    }
}
