//! Export progress notification.
//!
//! Exporters report through an [`ExportObserver`] passed into
//! [`Exporter::export`](crate::Exporter::export). Notifications are delivered
//! synchronously, on the exporting thread, in the order they happen.

use std::sync::mpsc;

/// A notification emitted during an export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportEvent {
    /// Human-readable description of the current step.
    Step(String),
    /// Overall progress of the current exporter, 0 to 100.
    Progress(u8),
}

/// Receiver of [`ExportEvent`]s.
///
/// Implemented for closures taking an [`ExportEvent`], so a callback can be
/// passed directly:
///
/// ```
/// use docex_export::{ExportEvent, ExportObserver};
///
/// let mut steps = Vec::new();
/// let mut observer = |event: ExportEvent| {
///     if let ExportEvent::Step(message) = event {
///         steps.push(message);
///     }
/// };
/// observer.step("Rendering".to_owned());
/// observer.progress(50);
/// assert_eq!(steps, ["Rendering"]);
/// ```
pub trait ExportObserver {
    /// Handle one event.
    fn notify(&mut self, event: ExportEvent);

    /// Report a step message.
    fn step(&mut self, message: String) {
        self.notify(ExportEvent::Step(message));
    }

    /// Report progress.
    fn progress(&mut self, percent: u8) {
        self.notify(ExportEvent::Progress(percent));
    }
}

impl<F: FnMut(ExportEvent)> ExportObserver for F {
    fn notify(&mut self, event: ExportEvent) {
        self(event);
    }
}

/// Observer that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl ExportObserver for NullObserver {
    fn notify(&mut self, _event: ExportEvent) {}
}

/// Observer forwarding events to a channel.
///
/// Events sent after the receiver was dropped are discarded.
#[derive(Clone, Debug)]
pub struct ChannelObserver {
    tx: mpsc::Sender<ExportEvent>,
}

impl ChannelObserver {
    /// Create an observer and the receiver its events arrive on.
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<ExportEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl ExportObserver for ChannelObserver {
    fn notify(&mut self, event: ExportEvent) {
        let _ = self.tx.send(event);
    }
}
