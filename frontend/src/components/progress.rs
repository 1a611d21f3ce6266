//! Streaming progress bar.

use leptos::*;

use crate::aggregator::ProgressView;

#[component]
pub fn ProgressPanel(progress: RwSignal<Option<ProgressView>>) -> impl IntoView {
    view! {
        <Show
            when=move || progress.with(Option::is_some)
            fallback=|| view! { }
        >
            <div class="progress-section">
                <div class="progress-bar">
                    <div
                        class="progress-fill"
                        style=move || {
                            let percent = progress.with(|p| p.as_ref().map(|p| p.percent).unwrap_or(0));
                            format!("width: {}%;", percent)
                        }
                    ></div>
                </div>
                <div class="progress-text">
                    {move || progress.with(|p| {
                        p.as_ref()
                            .map(|p| format!("{}% ({})", p.percent, p.label))
                            .unwrap_or_default()
                    })}
                </div>
            </div>
        </Show>
    }
}
