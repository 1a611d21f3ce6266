//! Contacts table.
//!
//! Rows are keyed by position, so appending a contact mounts exactly one
//! new `<tr>` and leaves the existing ones alone.

use leptos::*;

use crate::types::ContactEntry;

#[component]
pub fn ResultsTable(rows: RwSignal<Vec<ContactEntry>>) -> impl IntoView {
    view! {
        <table
            class="results-table"
            style=move || if rows.with(Vec::is_empty) { "display: none;" } else { "" }
        >
            <thead>
                <tr>
                    <th>"Nome"</th>
                    <th>"Telefone"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || rows.get().into_iter().enumerate()
                    key=|(i, _)| *i
                    children=move |(_, entry)| {
                        view! {
                            <tr>
                                <td>{entry.name}</td>
                                <td>{entry.phone}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
