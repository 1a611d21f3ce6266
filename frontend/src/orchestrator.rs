//! Request orchestration.
//!
//! Turns a submitted form into a streamed session, applies every
//! [`RenderOp`] to the page signals and publishes both exports once the
//! stream completes. Falls back to the single-shot endpoint when the
//! browser cannot open an `EventSource`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use leptos::*;

use crate::aggregator::{ProgressView, RenderOp};
use crate::config::{Endpoints, MAX_NOTICES, NO_RESULTS_MESSAGE};
use crate::export::LocalExport;
use crate::services::{fetch_contacts, EventSourceTransport, SignalSink};
use crate::session::{SessionController, SessionId, TransportSignal};
use crate::types::{ContactEntry, Notice, NoticeLevel, SearchRequest};

type Controller = SessionController<EventSourceTransport>;

/// Page state touched by a search. All fields are `Copy` signals.
#[derive(Clone, Copy)]
pub struct SearchUi {
    pub rows: RwSignal<Vec<ContactEntry>>,
    pub progress: RwSignal<Option<ProgressView>>,
    pub busy: RwSignal<bool>,
    pub notices: RwSignal<Vec<Notice>>,
    /// Server-side export link.
    pub server_csv: RwSignal<Option<String>>,
    /// Object URL of the locally built export.
    pub local_csv: RwSignal<Option<String>>,
}

impl SearchUi {
    pub fn new() -> Self {
        Self {
            rows: create_rw_signal(Vec::new()),
            progress: create_rw_signal(None),
            busy: create_rw_signal(false),
            notices: create_rw_signal(Vec::new()),
            server_csv: create_rw_signal(None),
            local_csv: create_rw_signal(None),
        }
    }

    /// Clear everything scoped to the previous search.
    fn reset(&self, request: &SearchRequest) {
        self.rows.set(Vec::new());
        self.progress.set(Some(ProgressView::pending(request)));
        self.server_csv.set(None);
        self.local_csv.set(None);
        self.busy.set(true);
    }

    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice::new(level, message);
        match level {
            NoticeLevel::Error => log::error!("{}", notice.message),
            NoticeLevel::Warning => log::warn!("{}", notice.message),
            _ => log::info!("{}", notice.message),
        }
        self.notices.update(|notices| {
            notices.push(notice);
            if notices.len() > MAX_NOTICES {
                notices.remove(0);
            }
        });
    }

    /// Notice that must interrupt the user.
    fn alert(&self, level: NoticeLevel, message: &str) {
        self.notify(level, message);
        if let Err(e) = gloo_utils::window().alert_with_message(message) {
            log::warn!("Failed to show alert: {:?}", e);
        }
    }

    fn render(&self, op: RenderOp) {
        match op {
            RenderOp::Progress(view) => self.progress.set(Some(view)),
            RenderOp::AppendRow(entry) => self.rows.update(|rows| rows.push(entry)),
            RenderOp::Completed(view) => {
                self.progress.set(Some(view));
                self.busy.set(false);
            }
            RenderOp::Failed { message } => {
                self.busy.set(false);
                self.alert(NoticeLevel::Error, &message);
            }
        }
    }
}

impl Default for SearchUi {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the session controller and the current local export.
#[derive(Clone)]
pub struct Orchestrator {
    ui: SearchUi,
    endpoints: Rc<Endpoints>,
    controller: Rc<RefCell<Controller>>,
    local_export: Rc<RefCell<Option<LocalExport>>>,
    /// Bumped on every submit so a stale single-shot response is dropped.
    generation: Rc<Cell<u64>>,
}

impl Orchestrator {
    pub fn new(ui: SearchUi, endpoints: Endpoints) -> Self {
        Self {
            ui,
            endpoints: Rc::new(endpoints),
            controller: Rc::new(RefCell::new(SessionController::new())),
            local_export: Rc::new(RefCell::new(None)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Start a new search, superseding whatever is in flight.
    pub fn submit(&self, request: SearchRequest) {
        self.generation.set(self.generation.get() + 1);
        self.local_export.borrow_mut().take();
        self.ui.reset(&request);

        let sink_target = StreamSink {
            ui: self.ui,
            endpoints: self.endpoints.clone(),
            controller: Rc::downgrade(&self.controller),
            local_export: self.local_export.clone(),
        };
        let endpoints = self.endpoints.clone();

        let started = self.controller.borrow_mut().start(request.clone(), move |id, request| {
            let sink: SignalSink = Rc::new(move |signal| sink_target.deliver(id, signal));
            EventSourceTransport::open(&endpoints.stream_url(request), sink)
        });

        match started {
            Ok(id) => log::debug!("Session #{} started", id),
            Err(e) => {
                log::warn!("⚠️  Streaming unavailable ({}), falling back to single-shot search", e);
                self.run_single_shot(request);
            }
        }
    }

    fn run_single_shot(&self, request: SearchRequest) {
        let this = self.clone();
        let generation = self.generation.get();

        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_contacts(&this.endpoints, &request).await;
            if this.generation.get() != generation {
                log::debug!("Dropping single-shot result for a superseded search");
                return;
            }

            match result {
                Ok(entries) => {
                    // Full redraw, unlike the streamed path.
                    this.ui.rows.set(entries.clone());
                    this.ui.progress.set(None);
                    if entries.is_empty() {
                        this.ui.alert(NoticeLevel::Warning, NO_RESULTS_MESSAGE);
                    } else {
                        publish_exports(this.ui, &this.endpoints, &this.local_export, &request, &entries);
                    }
                }
                Err(e) => this.ui.alert(NoticeLevel::Error, &format!("Erro: {}", e)),
            }

            this.ui.busy.set(false);
        });
    }
}

/// Everything a transport callback needs, without keeping the controller alive.
struct StreamSink {
    ui: SearchUi,
    endpoints: Rc<Endpoints>,
    controller: Weak<RefCell<Controller>>,
    local_export: Rc<RefCell<Option<LocalExport>>>,
}

impl StreamSink {
    fn deliver(&self, id: SessionId, signal: TransportSignal) {
        let Some(controller) = self.controller.upgrade() else {
            return;
        };

        let update = controller.borrow_mut().handle(id, signal);
        let Some(update) = update else {
            return;
        };

        self.ui.render(update.render);

        if let Some(plan) = update.export {
            self.ui.notify(
                NoticeLevel::Success,
                format!("✅ {} contatos encontrados", plan.entries.len()),
            );
            publish_exports(self.ui, &self.endpoints, &self.local_export, &plan.request, &plan.entries);
        }
    }
}

/// Expose the server link and a freshly built local CSV.
fn publish_exports(
    ui: SearchUi,
    endpoints: &Endpoints,
    local_export: &RefCell<Option<LocalExport>>,
    request: &SearchRequest,
    entries: &[ContactEntry],
) {
    ui.server_csv.set(Some(endpoints.csv_url(request)));

    match LocalExport::from_entries(entries) {
        Ok(export) => {
            ui.local_csv.set(Some(export.url().to_string()));
            // Replacing the previous export revokes its object URL.
            *local_export.borrow_mut() = Some(export);
        }
        Err(e) => ui.notify(NoticeLevel::Warning, format!("CSV local indisponível: {}", e)),
    }
}
