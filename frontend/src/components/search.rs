//! Search form and results area.
//!
//! Reads the form, normalizes it into a [`SearchRequest`] and hands it to
//! the [`Orchestrator`], which drives everything else on the page.

use leptos::html::Input;
use leptos::*;
use leptos::ev::SubmitEvent;

use crate::components::{DownloadLinks, NoticePanel, ProgressPanel, ResultsTable};
use crate::config::Endpoints;
use crate::orchestrator::{Orchestrator, SearchUi};
use crate::types::SearchRequest;

#[component]
pub fn SearchSection() -> impl IntoView {
    let endpoints = match Endpoints::production() {
        Ok(endpoints) => endpoints,
        Err(e) => {
            log::error!("❌ {}", e);
            return view! { <div class="error-message">{e.to_string()}</div> }.into_view();
        }
    };

    let ui = SearchUi::new();
    let orchestrator = Orchestrator::new(ui, endpoints);

    let category_input = create_node_ref::<Input>();
    let location_input = create_node_ref::<Input>();
    let limit_input = create_node_ref::<Input>();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let read = |input: NodeRef<Input>| input.get().map(|el| el.value()).unwrap_or_default();
        let request = SearchRequest::from_form(
            &read(category_input),
            &read(location_input),
            &read(limit_input),
        );

        orchestrator.submit(request);
    };

    view! {
        <form class="search-form" on:submit=on_submit>
            <label for="category">"Categoria"</label>
            <input
                type="text"
                id="category"
                placeholder="ex: dentista"
                required
                node_ref=category_input
            />

            <label for="location">"Localização"</label>
            <input
                type="text"
                id="location"
                placeholder="ex: São Paulo"
                required
                node_ref=location_input
            />

            <label for="limit">"Quantidade"</label>
            <input type="number" id="limit" min="1" value="20" node_ref=limit_input/>

            <button type="submit" class="btn btn-primary" disabled=move || ui.busy.get()>
                "Buscar"
            </button>
        </form>

        <Show
            when=move || ui.busy.get()
            fallback=|| view! { }
        >
            <div class="loading">"⏳ Buscando contatos..."</div>
        </Show>

        <ProgressPanel progress=ui.progress/>
        <DownloadLinks server_csv=ui.server_csv local_csv=ui.local_csv/>
        <ResultsTable rows=ui.rows/>
        <NoticePanel notices=ui.notices/>
    }
    .into_view()
}
