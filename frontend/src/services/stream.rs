//! `EventSource` transport for streamed searches.
//!
//! Forwards every browser callback to a single sink as a
//! [`TransportSignal`]. The handler closures live as long as the transport,
//! so dropping it (when a newer session replaces it) releases them.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventSource, MessageEvent};

use crate::session::{StreamTransport, TransportSignal};
use crate::types::{AppError, AppResult};

/// Named SSE event the server may send instead of a `done` message.
const DONE_EVENT: &str = "done";

/// Receives every signal from one transport.
pub type SignalSink = Rc<dyn Fn(TransportSignal)>;

pub struct EventSourceTransport {
    source: EventSource,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    on_done: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

impl EventSourceTransport {
    /// Connect to `url` and start forwarding signals to `sink`.
    pub fn open(url: &str, sink: SignalSink) -> AppResult<Self> {
        let source = EventSource::new(url)
            .map_err(|e| AppError::Transport(format!("Failed to create EventSource: {:?}", e)))?;

        let open_sink = sink.clone();
        let on_open = Closure::wrap(Box::new(move |_: Event| {
            open_sink(TransportSignal::Opened);
        }) as Box<dyn FnMut(Event)>);

        let message_sink = sink.clone();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            match event.data().as_string() {
                Some(data) => message_sink(TransportSignal::Message(data)),
                None => log::warn!("⚠️  Ignoring non-text SSE payload"),
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        let done_sink = sink.clone();
        let on_done = Closure::wrap(Box::new(move |_: MessageEvent| {
            done_sink(TransportSignal::Done);
        }) as Box<dyn FnMut(MessageEvent)>);

        let on_error = Closure::wrap(Box::new(move |_: Event| {
            sink(TransportSignal::Error);
        }) as Box<dyn FnMut(Event)>);

        source.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        source
            .add_event_listener_with_callback(DONE_EVENT, on_done.as_ref().unchecked_ref())
            .map_err(|e| AppError::Transport(format!("Failed to listen for '{}': {:?}", DONE_EVENT, e)))?;

        log::info!("📡 EventSource opened: {}", url);

        Ok(Self {
            source,
            _on_open: on_open,
            _on_message: on_message,
            on_done,
            _on_error: on_error,
        })
    }
}

impl StreamTransport for EventSourceTransport {
    fn close(&mut self) {
        // Closing also stops the browser's automatic reconnect.
        self.source.close();
        self.source.set_onopen(None);
        self.source.set_onmessage(None);
        self.source.set_onerror(None);
        if let Err(e) = self
            .source
            .remove_event_listener_with_callback(DONE_EVENT, self.on_done.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove '{}' listener: {:?}", DONE_EVENT, e);
        }
    }
}

impl Drop for EventSourceTransport {
    fn drop(&mut self) {
        self.close();
    }
}
