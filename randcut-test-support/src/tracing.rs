//! Recording layer for asserting on spans and events in tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

/// Layer that keeps closed spans and emitted events for later assertions.
///
/// Clones share storage, so a test can hand one clone to the subscriber and
/// inspect the other afterwards.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Runs `body` with a fresh recording subscriber as the thread default and
    /// returns its output together with the layer.
    ///
    /// # Examples
    /// ```
    /// use randcut_test_support::tracing::RecordingLayer;
    ///
    /// let (value, layer) = RecordingLayer::capture(|| {
    ///     tracing::info!(answer = 42, "computed");
    ///     7
    /// });
    /// assert_eq!(value, 7);
    /// assert_eq!(layer.events_with_message("computed").len(), 1);
    /// ```
    pub fn capture<T>(body: impl FnOnce() -> T) -> (T, Self) {
        let layer = Self::default();
        let subscriber = Registry::default().with(layer.clone());
        let value = tracing::subscriber::with_default(subscriber, body);
        (value, layer)
    }

    /// Returns the closed spans in completion order.
    ///
    /// # Examples
    /// ```
    /// use randcut_test_support::tracing::RecordingLayer;
    ///
    /// let layer = RecordingLayer::default();
    /// assert!(layer.spans().is_empty());
    /// ```
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the emitted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the closed spans called `name`.
    #[must_use]
    pub fn spans_named(&self, name: &str) -> Vec<SpanRecord> {
        self.spans()
            .into_iter()
            .filter(|span| span.name == name)
            .collect()
    }

    /// Returns the events whose `message` field equals `message`.
    #[must_use]
    pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
        self.events()
            .into_iter()
            .filter(|event| event.message() == Some(message))
            .collect()
    }
}

/// Snapshot of a closed span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name captured from the tracing metadata.
    pub name: String,
    /// Structured fields recorded against the span.
    pub fields: HashMap<String, String>,
}

impl SpanRecord {
    /// Returns the rendered value of `field`, if recorded.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Snapshot of an emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Log level associated with the event.
    pub level: Level,
    /// Event target extracted from the metadata.
    pub target: String,
    /// Structured fields attached to the event.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the rendered value of `field`, if recorded.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Returns the event's message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

struct SpanData {
    name: String,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = HashMap::new();
        attrs.record(&mut FieldRecorder(&mut fields));
        span.extensions_mut().insert(SpanData {
            name: attrs.metadata().name().to_owned(),
            fields,
        });
    }

    fn on_record(
        &self,
        id: &tracing::span::Id,
        values: &tracing::span::Record<'_>,
        ctx: Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(data) = extensions.get_mut::<SpanData>() {
            values.record(&mut FieldRecorder(&mut data.fields));
        }
    }

    fn on_close(&self, id: tracing::span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(data) = span.extensions_mut().remove::<SpanData>() else {
            return;
        };
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SpanRecord {
                name: data.name,
                fields: data.fields,
            });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(EventRecord {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                fields,
            });
    }
}

struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

impl FieldRecorder<'_> {
    fn insert(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldRecorder<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.to_string());
    }
}
