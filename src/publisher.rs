// Rate-limited publish loop
//
// Owns the shared motion state. The key reader writes through `update` /
// `stop`; the loop snapshots the state once per tick and hands a freshly
// built command to the sink. A repeat rate of zero disables the timer and
// publishes only on explicit updates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tracing::debug;

use crate::error::TeleopError;
use crate::messages::{MotionState, Twist, TwistStamped};

/// Destination for outbound commands. The real transport is Zenoh; tests
/// substitute recording/failing sinks.
pub trait CommandSink {
    async fn send(&self, command: &Twist) -> Result<(), TeleopError>;
}

pub struct PublishLoop {
    state: Mutex<MotionState>,
    wake: Notify,
    done: AtomicBool,
    period: Option<Duration>,
}

impl PublishLoop {
    /// `rate_hz <= 0` means publish only on explicit update
    pub fn new(rate_hz: f64) -> Self {
        Self {
            state: Mutex::new(MotionState::default()),
            wake: Notify::new(),
            done: AtomicBool::new(false),
            period: (rate_hz > 0.0).then(|| Duration::from_secs_f64(1.0 / rate_hz)),
        }
    }

    /// Overwrite the shared state. In timer mode nothing is emitted until
    /// the next tick, decoupling input rate from publish rate.
    pub fn update(&self, next: MotionState) {
        *self.lock_state() = next;
        if self.period.is_none() {
            self.wake.notify_one();
        }
    }

    /// Zero all fields and mark the loop for termination. The loop still
    /// emits one final all-zero command before exiting, so the robot never
    /// keeps moving after shutdown.
    pub fn stop(&self) {
        *self.lock_state() = MotionState::default();
        self.done.store(true, Ordering::Release);
        self.wake.notify_one();
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Run until `stop()` has been observed and the final zero command is
    /// out, or until the sink fails. No retry on failure: a stale velocity
    /// command is more dangerous than a stopped robot.
    pub async fn run<S: CommandSink>(&self, sink: &S) -> Result<(), TeleopError> {
        let mut ticker = self.period.map(tokio::time::interval);

        loop {
            match ticker.as_mut() {
                Some(tick) => {
                    tokio::select! {
                        _ = tick.tick() => {}
                        _ = self.wake.notified() => {}
                    }
                }
                None => self.wake.notified().await,
            }

            // Read the flag before the snapshot: a stop() landing after
            // this point re-wakes the loop, and the zero state goes out on
            // the next iteration instead of being skipped.
            let finishing = self.is_done();
            let command = Twist::from(&*self.lock_state());
            sink.send(&command).await?;

            if finishing {
                debug!("final zero command sent, publish loop exiting");
                return Ok(());
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, MotionState> {
        // Plain-old-data behind the lock; a poisoned guard is still usable
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Zenoh-backed sink publishing JSON payloads on the command topic
pub struct ZenohSink {
    publisher: zenoh::pubsub::Publisher<'static>,
    stamped: bool,
    frame_id: String,
}

impl ZenohSink {
    pub fn new(publisher: zenoh::pubsub::Publisher<'static>, stamped: bool, frame_id: String) -> Self {
        Self {
            publisher,
            stamped,
            frame_id,
        }
    }
}

impl CommandSink for ZenohSink {
    async fn send(&self, command: &Twist) -> Result<(), TeleopError> {
        let payload = if self.stamped {
            serde_json::to_string(&TwistStamped::new(command.clone(), self.frame_id.clone()))?
        } else {
            serde_json::to_string(command)?
        };
        self.publisher.put(payload).await?;
        Ok(())
    }
}
