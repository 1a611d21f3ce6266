//! Folds stream events into a [`StreamSession`].
//!
//! [`reduce`] mutates the session and returns the matching [`RenderOp`];
//! applying that op to the page is the view layer's job.

use crate::config::STREAM_FAILED_MESSAGE;
use crate::session::{SessionPhase, StreamEvent, StreamSession};
use crate::types::{ContactEntry, ProgressSnapshot, SearchRequest};

/// What the progress bar shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressView {
    pub percent: u64,
    pub label: String,
}

impl ProgressView {
    /// Shown between submitting and the first progress event.
    pub fn pending(request: &SearchRequest) -> Self {
        Self { percent: 0, label: format!("0 / {}", request.limit) }
    }
}

impl From<&ProgressSnapshot> for ProgressView {
    fn from(snapshot: &ProgressSnapshot) -> Self {
        Self { percent: snapshot.percent(), label: snapshot.label() }
    }
}

/// A single UI update produced by one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOp {
    /// Replace the progress bar.
    Progress(ProgressView),
    /// Append one row; earlier rows are untouched.
    AppendRow(ContactEntry),
    /// Stream finished. Exports can be built from the session entries.
    Completed(ProgressView),
    /// Stream dropped. Entries stay on screen, no exports.
    Failed { message: String },
}

/// Apply `event` to `session`.
///
/// Once the session is terminal every further event is a no-op.
pub fn reduce(session: &mut StreamSession, event: &StreamEvent) -> Option<RenderOp> {
    if session.phase.is_terminal() {
        return None;
    }

    match event {
        StreamEvent::Progress(snapshot) => {
            session.progress = *snapshot;
            Some(RenderOp::Progress(ProgressView::from(snapshot)))
        }
        StreamEvent::Contact(contact) => {
            session.entries.push(contact.clone());
            Some(RenderOp::AppendRow(contact.clone()))
        }
        StreamEvent::Done => {
            session.phase = SessionPhase::Completed;
            // Saturate regardless of the last snapshot.
            Some(RenderOp::Completed(ProgressView {
                percent: 100,
                label: format!("{} / {}", session.entries.len(), session.request.limit),
            }))
        }
        StreamEvent::TransportError => {
            session.phase = SessionPhase::Failed;
            Some(RenderOp::Failed { message: STREAM_FAILED_MESSAGE.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::build_csv;

    fn session(limit: u32) -> StreamSession {
        let mut session =
            StreamSession::new(SearchRequest::from_form("dentista", "São Paulo", &limit.to_string()));
        session.phase = SessionPhase::Streaming;
        session
    }

    fn progress(found: u64, total: u64) -> StreamEvent {
        StreamEvent::Progress(ProgressSnapshot::new(found, total))
    }

    fn contact(name: &str, phone: &str) -> StreamEvent {
        StreamEvent::Contact(ContactEntry::new(name, phone))
    }

    #[test]
    fn test_progress_replaces_snapshot() {
        let mut session = session(10);

        reduce(&mut session, &progress(9, 10));
        let op = reduce(&mut session, &progress(1, 3));

        assert_eq!(session.progress, ProgressSnapshot::new(1, 3));
        assert_eq!(
            op,
            Some(RenderOp::Progress(ProgressView { percent: 33, label: "1 / 3".to_string() }))
        );
    }

    #[test]
    fn test_progress_with_zero_total_is_zero_percent() {
        let mut session = session(10);
        let op = reduce(&mut session, &progress(4, 0));
        assert_eq!(
            op,
            Some(RenderOp::Progress(ProgressView { percent: 0, label: "4 / 0".to_string() }))
        );
    }

    #[test]
    fn test_contacts_append_in_arrival_order_with_duplicates() {
        let mut session = session(10);

        for event in [contact("B", "2"), contact("A", "1"), contact("B", "2")] {
            let op = reduce(&mut session, &event);
            assert!(matches!(op, Some(RenderOp::AppendRow(_))));
        }

        let names: Vec<&str> = session.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "B"]);
    }

    #[test]
    fn test_counters_are_not_reconciled() {
        let mut session = session(10);
        reduce(&mut session, &progress(7, 10));
        reduce(&mut session, &contact("A", "1"));

        assert_eq!(session.progress.found, 7);
        assert_eq!(session.entries.len(), 1);
    }

    #[test]
    fn test_done_overrides_last_snapshot() {
        let mut session = session(20);
        reduce(&mut session, &contact("A", "1"));
        reduce(&mut session, &progress(9, 12));

        let op = reduce(&mut session, &StreamEvent::Done);

        assert_eq!(
            op,
            Some(RenderOp::Completed(ProgressView { percent: 100, label: "1 / 20".to_string() }))
        );
        assert_eq!(session.phase, SessionPhase::Completed);
    }

    #[test]
    fn test_done_label_keeps_limit_as_typed() {
        let mut session =
            StreamSession::new(SearchRequest::from_form("dentista", "São Paulo", ""));
        session.phase = SessionPhase::Streaming;
        reduce(&mut session, &contact("A", "1"));

        let op = reduce(&mut session, &StreamEvent::Done);

        assert_eq!(
            op,
            Some(RenderOp::Completed(ProgressView { percent: 100, label: "1 / ".to_string() }))
        );
    }

    #[test]
    fn test_pending_view_shows_requested_limit() {
        let request = SearchRequest::from_form("dentista", "São Paulo", "20");
        assert_eq!(
            ProgressView::pending(&request),
            ProgressView { percent: 0, label: "0 / 20".to_string() }
        );
    }

    #[test]
    fn test_entries_frozen_after_done() {
        let mut session = session(5);
        reduce(&mut session, &StreamEvent::Done);

        assert_eq!(reduce(&mut session, &contact("late", "0")), None);
        assert_eq!(reduce(&mut session, &progress(5, 5)), None);
        assert!(session.entries.is_empty());
    }

    #[test]
    fn test_transport_error_keeps_entries() {
        let mut session = session(5);
        reduce(&mut session, &contact("A", "1"));

        let op = reduce(&mut session, &StreamEvent::TransportError);

        assert!(matches!(op, Some(RenderOp::Failed { .. })));
        assert_eq!(session.phase, SessionPhase::Failed);
        assert_eq!(session.entries.len(), 1);
        assert_eq!(reduce(&mut session, &contact("B", "2")), None);
    }

    #[test]
    fn test_end_to_end_sequence() {
        let mut session = session(5);
        let events = [
            progress(1, 5),
            contact("A", "111"),
            progress(3, 5),
            contact("B", "222"),
            contact("C", "333"),
            StreamEvent::Done,
        ];

        let ops: Vec<RenderOp> = events.iter().filter_map(|e| reduce(&mut session, e)).collect();

        assert_eq!(
            ops.last(),
            Some(&RenderOp::Completed(ProgressView { percent: 100, label: "3 / 5".to_string() }))
        );
        assert_eq!(
            build_csv(&session.entries).unwrap(),
            "Nome,Telefone\n\"A\",\"111\"\n\"B\",\"222\"\n\"C\",\"333\""
        );
    }
}
