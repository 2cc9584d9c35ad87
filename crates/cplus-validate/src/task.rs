//! Background validation thread.
//!
//! Runs a [`DataValidator`] on its own thread with cancellation support and
//! reports through a [`ValidationUpdate`] channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::info;

use crate::runner::DataValidator;
use crate::update::ValidationUpdate;

/// Spawn a background validation thread.
///
/// The thread runs the validator, calls its completion callback and sends
/// [`ValidationUpdate::Finished`]. Returns a handle that can be used to cancel
/// the run or to get the validator back.
pub fn spawn_validation(
    mut validator: DataValidator,
    sender: Sender<ValidationUpdate>,
) -> ValidationHandle {
    validator.set_update_sender(sender.clone());
    let cancel_flag = validator.cancel_flag();

    let thread = std::thread::spawn(move || {
        let success = validator.execute();
        sender
            .send(ValidationUpdate::Finished {
                success,
                result: validator.result().cloned(),
            })
            .ok();
        validator
    });

    ValidationHandle {
        cancel_flag,
        thread,
    }
}

/// Handle to an in-progress validation.
#[derive(Debug)]
pub struct ValidationHandle {
    cancel_flag: Arc<AtomicBool>,
    thread: JoinHandle<DataValidator>,
}

impl ValidationHandle {
    /// Request cancellation.
    pub fn cancel(&self) {
        info!("Validation process has been cancelled.");
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the thread and return the validator, `None` if the thread panicked.
    pub fn join(self) -> Option<DataValidator> {
        self.thread.join().ok()
    }
}
