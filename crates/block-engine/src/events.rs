//! Event types for streaming pipeline progress
//!
//! Events are sent from the pipeline to whoever started the run, through a
//! sink passed into that run. There is no process-wide listener registry:
//! each invocation owns its sink and drops it when the run ends.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::PipelineStage;
use crate::resolver::Resolution;
use crate::types::{Intent, TemplateId};

/// Trait for sending pipeline events
///
/// This abstracts over the transport mechanism (mpsc channel, stderr,
/// WebSocket adapter, test collector).
pub trait EventSink: Send + Sync {
    /// Send an event
    ///
    /// Returns an error if the event could not be sent (e.g., channel closed)
    fn send(&self, event: PipelineEvent) -> Result<(), EventError>;
}

/// Error when sending events fails
#[derive(Debug, Clone)]
pub struct EventError {
    pub message: String,
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event error: {}", self.message)
    }
}

impl std::error::Error for EventError {}

impl EventError {
    pub fn channel_closed() -> Self {
        Self {
            message: "Channel closed".to_string(),
        }
    }
}

/// Events emitted during a pipeline run, in pipeline order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PipelineEvent {
    /// The run started
    #[serde(rename_all = "camelCase")]
    Start {
        execution_id: String,
        command: String,
    },

    /// The model response could not be parsed; continuing with the empty intent
    #[serde(rename_all = "camelCase")]
    IntentParseDegraded {
        execution_id: String,
        raw_response: String,
        reason: String,
    },

    /// Intent extraction finished
    #[serde(rename_all = "camelCase")]
    IntentExtracted {
        execution_id: String,
        intent: Intent,
    },

    /// A template was reused, updated or generated
    #[serde(rename_all = "camelCase")]
    TemplateSelected {
        execution_id: String,
        template_id: TemplateId,
        template_name: String,
        resolution: Resolution,
    },

    /// Dependencies for the selected template are known
    #[serde(rename_all = "camelCase")]
    DependenciesResolved {
        execution_id: String,
        dependencies: Vec<String>,
    },

    /// The UI block was assembled
    #[serde(rename_all = "camelCase")]
    Generated {
        execution_id: String,
        length: usize,
    },

    /// The block was handed to the injector
    #[serde(rename_all = "camelCase")]
    InjectionComplete {
        execution_id: String,
        injected: bool,
    },

    /// A stage failed and the run was aborted
    #[serde(rename_all = "camelCase")]
    Failed {
        execution_id: String,
        stage: PipelineStage,
        error: String,
    },
}

impl PipelineEvent {
    /// Execution id carried by every event
    pub fn execution_id(&self) -> &str {
        match self {
            Self::Start { execution_id, .. }
            | Self::IntentParseDegraded { execution_id, .. }
            | Self::IntentExtracted { execution_id, .. }
            | Self::TemplateSelected { execution_id, .. }
            | Self::DependenciesResolved { execution_id, .. }
            | Self::Generated { execution_id, .. }
            | Self::InjectionComplete { execution_id, .. }
            | Self::Failed { execution_id, .. } => execution_id,
        }
    }

    /// Short name of the event, matching its serialized `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::IntentParseDegraded { .. } => "intentParseDegraded",
            Self::IntentExtracted { .. } => "intentExtracted",
            Self::TemplateSelected { .. } => "templateSelected",
            Self::DependenciesResolved { .. } => "dependenciesResolved",
            Self::Generated { .. } => "generated",
            Self::InjectionComplete { .. } => "injectionComplete",
            Self::Failed { .. } => "failed",
        }
    }
}

/// A no-op event sink that discards all events
///
/// Useful for testing or when events aren't needed.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: PipelineEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// A vector-based event sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
pub struct VecEventSink {
    events: parking_lot::Mutex<Vec<PipelineEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().clone()
    }

    /// Names of all collected events, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(PipelineEvent::name).collect()
    }

    /// Clear all collected events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: PipelineEvent) -> Result<(), EventError> {
        self.events.lock().push(event);
        Ok(())
    }
}

/// Sink forwarding events into an unbounded tokio channel
///
/// One channel per run: the receiver side (a WebSocket task, an SSE
/// response, a CLI printer) stops getting events when it is dropped, and the
/// pipeline keeps going.
pub struct ChannelEventSink {
    sender: mpsc::UnboundedSender<PipelineEvent>,
}

impl ChannelEventSink {
    /// Create a sink and the receiver for its events
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PipelineEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl EventSink for ChannelEventSink {
    fn send(&self, event: PipelineEvent) -> Result<(), EventError> {
        self.sender
            .send(event)
            .map_err(|_| EventError::channel_closed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(length: usize) -> PipelineEvent {
        PipelineEvent::Generated {
            execution_id: "exec1".to_string(),
            length,
        }
    }

    #[test]
    fn test_vec_event_sink() {
        let sink = VecEventSink::new();

        sink.send(generated(42)).unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);

        match &events[0] {
            PipelineEvent::Generated { execution_id, length } => {
                assert_eq!(execution_id, "exec1");
                assert_eq!(*length, 42);
            }
            _ => panic!("Expected Generated event"),
        }

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_null_event_sink() {
        let sink = NullEventSink;
        // Should not panic
        sink.send(generated(0)).unwrap();
    }

    #[tokio::test]
    async fn test_channel_event_sink() {
        let (sink, mut receiver) = ChannelEventSink::channel();
        sink.send(generated(1)).unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.name(), "generated");
    }

    #[test]
    fn test_channel_closed() {
        let (sink, receiver) = ChannelEventSink::channel();
        drop(receiver);

        let err = sink.send(generated(1)).unwrap_err();
        assert_eq!(err.message, "Channel closed");
    }

    #[test]
    fn test_event_serialization_tag() {
        let event = PipelineEvent::DependenciesResolved {
            execution_id: "exec1".to_string(),
            dependencies: vec!["https://cdn/x.js".to_string()],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "dependenciesResolved");
        assert_eq!(json["executionId"], "exec1");
        assert_eq!(json["dependencies"][0], "https://cdn/x.js");
        assert_eq!(json["type"], event.name());
    }
}
