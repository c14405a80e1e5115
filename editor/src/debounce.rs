//! Timer-based coalescing for noisy inputs.
//!
//! DESIGN
//! ======
//! Each submitted value supersedes the one before it; the latest value is
//! released only after the input has been quiet for the configured
//! interval. A worker task drains the inbox against a quiet timer, so rapid
//! keystrokes collapse into a single downstream recomputation.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::time::Duration;

use tokio::sync::mpsc;

/// Sender half of a debounced channel.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Debouncer<T> {
    /// Submit a value, superseding any not-yet-released one.
    pub fn submit(&self, value: T) {
        // Send only fails when the worker is gone, i.e. the receiver was
        // dropped; there is nobody left to care about the value.
        let _ = self.tx.send(value);
    }
}

/// Create a debounced channel with the given quiet interval.
///
/// Values pushed into the [`Debouncer`] appear on the returned receiver
/// once per quiet interval, latest value wins. Dropping the `Debouncer`
/// flushes a pending value immediately and ends the stream.
#[must_use]
pub fn channel<T: Send + 'static>(quiet: Duration) -> (Debouncer<T>, mpsc::UnboundedReceiver<T>) {
    let (in_tx, mut in_rx) = mpsc::unbounded_channel::<T>();
    let (out_tx, out_rx) = mpsc::unbounded_channel::<T>();

    tokio::spawn(async move {
        while let Some(mut latest) = in_rx.recv().await {
            loop {
                tokio::select! {
                    next = in_rx.recv() => match next {
                        // A newer value arrived inside the quiet window;
                        // it supersedes and the timer restarts.
                        Some(value) => latest = value,
                        None => {
                            let _ = out_tx.send(latest);
                            return;
                        }
                    },
                    () = tokio::time::sleep(quiet) => {
                        let _ = out_tx.send(latest);
                        break;
                    }
                }
            }
        }
    });

    (Debouncer { tx: in_tx }, out_rx)
}
