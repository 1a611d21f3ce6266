//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Smart Leads"</h1>
            <p class="subtitle">
                "Encontre contatos com WhatsApp por categoria e cidade. "
                "Os resultados aparecem conforme são encontrados."
            </p>
        </div>
    }
}
