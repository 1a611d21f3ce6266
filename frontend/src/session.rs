//! Stream session lifecycle.
//!
//! A session is one search streamed over Server-Sent Events. The
//! [`SessionController`] owns at most one session at a time together with
//! its transport, decodes every inbound message into a [`StreamEvent`] and
//! hands it to the [`aggregator`](crate::aggregator).
//!
//! ```text
//! Idle ──start──▶ Connecting ──open/message──▶ Streaming ──done──▶ Completed
//!                     │                            │
//!                     └──────────error─────────────┴──────────────▶ Failed
//! ```
//!
//! Transports call back with the [`SessionId`] they were opened for, so
//! anything still in flight from a superseded session is dropped.

use serde_json::Value;
use thiserror::Error;

use crate::aggregator::{self, RenderOp};
use crate::types::{AppResult, ContactEntry, ProgressSnapshot, SearchRequest};

/// Identifies one `start` call. Monotonic for the controller's lifetime.
pub type SessionId = u64;

// =============================================================================
// Events
// =============================================================================

/// A decoded stream event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamEvent {
    Progress(ProgressSnapshot),
    Contact(ContactEntry),
    Done,
    TransportError,
}

/// Error for a single message that could not be decoded.
///
/// Never terminates the session.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed stream message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unrecognized stream message: {0}")]
    Unrecognized(String),
}

/// Decode one SSE `data` payload.
///
/// The payload must be an object carrying `progress`, `contact` or `done`,
/// checked in that order. Other keys next to it are ignored.
pub fn decode_event(data: &str) -> Result<StreamEvent, DecodeError> {
    let mut value: Value = serde_json::from_str(data)?;
    let Some(fields) = value.as_object_mut() else {
        return Err(DecodeError::Unrecognized(data.to_string()));
    };

    if let Some(progress) = fields.remove("progress") {
        return Ok(StreamEvent::Progress(serde_json::from_value(progress)?));
    }
    if let Some(contact) = fields.remove("contact") {
        return Ok(StreamEvent::Contact(serde_json::from_value(contact)?));
    }
    if fields.contains_key("done") {
        return Ok(StreamEvent::Done);
    }

    Err(DecodeError::Unrecognized(data.to_string()))
}

// =============================================================================
// Session state
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Connecting,
    Streaming,
    Completed,
    Failed,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Completed | SessionPhase::Failed)
    }
}

/// Everything accumulated for one search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamSession {
    pub request: SearchRequest,
    pub phase: SessionPhase,
    /// Arrival order, duplicates included.
    pub entries: Vec<ContactEntry>,
    /// Last snapshot from the server. Not reconciled with `entries`.
    pub progress: ProgressSnapshot,
}

impl StreamSession {
    pub fn new(request: SearchRequest) -> Self {
        Self {
            request,
            phase: SessionPhase::Idle,
            entries: Vec::new(),
            progress: ProgressSnapshot::default(),
        }
    }
}

/// What the page must do with a finished session's results.
///
/// Only a completed session has one; a failed session never exports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportPlan {
    pub request: SearchRequest,
    pub entries: Vec<ContactEntry>,
}

/// Outcome of one handled signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUpdate {
    pub render: RenderOp,
    pub export: Option<ExportPlan>,
}

// =============================================================================
// Transport seam
// =============================================================================

/// What a transport reports back to the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportSignal {
    Opened,
    Message(String),
    /// Explicit end-of-stream event, separate from a `done` message.
    Done,
    Error,
}

/// A server-initiated event channel.
pub trait StreamTransport {
    /// Stop delivering signals. Safe to call more than once.
    fn close(&mut self);
}

struct ActiveSession<T> {
    id: SessionId,
    session: StreamSession,
    transport: T,
    closed: bool,
}

impl<T: StreamTransport> ActiveSession<T> {
    fn close(&mut self) {
        if !self.closed {
            self.transport.close();
            self.closed = true;
            log::debug!("🔌 Session #{} transport closed", self.id);
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Owns the single active session and its transport.
pub struct SessionController<T: StreamTransport> {
    last_id: SessionId,
    active: Option<ActiveSession<T>>,
}

impl<T: StreamTransport> Default for SessionController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StreamTransport> SessionController<T> {
    pub fn new() -> Self {
        Self { last_id: 0, active: None }
    }

    /// Tear down any previous session, then open a transport for `request`.
    ///
    /// `open` receives the id the transport must tag its signals with. If it
    /// fails no session is active afterwards.
    pub fn start<F>(&mut self, request: SearchRequest, open: F) -> AppResult<SessionId>
    where
        F: FnOnce(SessionId, &SearchRequest) -> AppResult<T>,
    {
        if let Some(mut previous) = self.active.take() {
            if !previous.session.phase.is_terminal() {
                log::info!("⏹️  Session #{} superseded", previous.id);
            }
            previous.close();
        }

        self.last_id += 1;
        let id = self.last_id;
        let mut session = StreamSession::new(request);
        let transport = open(id, &session.request)?;
        session.phase = SessionPhase::Connecting;

        log::info!(
            "📡 Session #{} connecting: {} in {} (limit {})",
            id,
            session.request.category,
            session.request.location,
            session.request.limit
        );

        self.active = Some(ActiveSession { id, session, transport, closed: false });
        Ok(id)
    }

    /// Feed one transport signal for session `id`.
    ///
    /// Returns the render step to apply, plus the export plan once the
    /// session completes. Signals for a stale or terminated session are
    /// ignored.
    pub fn handle(&mut self, id: SessionId, signal: TransportSignal) -> Option<SessionUpdate> {
        let active = match self.active.as_mut() {
            Some(active) if active.id == id && !active.session.phase.is_terminal() => active,
            _ => {
                log::debug!("Ignoring {:?} for inactive session #{}", signal, id);
                return None;
            }
        };

        let event = match signal {
            TransportSignal::Opened => {
                if active.session.phase == SessionPhase::Connecting {
                    active.session.phase = SessionPhase::Streaming;
                    log::info!("📡 Session #{} streaming", id);
                }
                return None;
            }
            TransportSignal::Message(data) => match decode_event(&data) {
                Ok(event) => event,
                Err(e) => {
                    log::warn!("⚠️  Session #{}: {} ({})", id, e, data);
                    return None;
                }
            },
            TransportSignal::Done => StreamEvent::Done,
            TransportSignal::Error => StreamEvent::TransportError,
        };

        if active.session.phase == SessionPhase::Connecting {
            active.session.phase = SessionPhase::Streaming;
        }

        log::debug!("Session #{} event: {:?}", id, event);
        let render = aggregator::reduce(&mut active.session, &event)?;
        let mut export = None;

        match active.session.phase {
            SessionPhase::Completed => {
                export = Some(ExportPlan {
                    request: active.session.request.clone(),
                    entries: active.session.entries.clone(),
                });
                log::info!(
                    "✅ Session #{} completed with {} contacts",
                    id,
                    active.session.entries.len()
                );
                active.close();
            }
            SessionPhase::Failed => {
                log::error!(
                    "❌ Session #{} failed after {} contacts",
                    id,
                    active.session.entries.len()
                );
                active.close();
            }
            _ => {}
        }

        Some(SessionUpdate { render, export })
    }

    /// Close the active transport, if any. Idempotent.
    pub fn close(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.close();
        }
    }

    /// The current session, including a finished one until superseded.
    pub fn session(&self) -> Option<&StreamSession> {
        self.active.as_ref().map(|active| &active.session)
    }

    pub fn current_id(&self) -> Option<SessionId> {
        self.active.as_ref().map(|active| active.id)
    }
}
