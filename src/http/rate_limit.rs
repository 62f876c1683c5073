//! Request rate limiting
//!
//! Permit bookkeeping uses the governor crate; permits are handed out
//! through a bounded channel fed by a single dedicated task.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use tokio::sync::{mpsc, Mutex, OnceCell};

type PermitClock = Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Grants at most `rate` permits per second to any number of callers.
///
/// The permit clock lives on its own dedicated task: callers never touch the
/// clock, they only await a channel receive. Waiting on the clock therefore
/// cannot run on an execution context that is itself gated by it, which
/// rules out the self-deadlock a shared-scheduler limiter invites. The
/// channel is bounded to one permit so grants cannot pile up while no
/// request is waiting.
pub struct RateLimiter {
    rate: NonZeroU32,
    permits: OnceCell<Mutex<mpsc::Receiver<()>>>,
}

impl RateLimiter {
    /// Create a limiter granting `rate` permits per second.
    ///
    /// The issuing task is started lazily on first acquisition, so the
    /// limiter itself can be constructed outside a runtime.
    pub fn new(rate: NonZeroU32) -> Self {
        Self {
            rate,
            permits: OnceCell::new(),
        }
    }

    /// Suspend until a permit is available.
    ///
    /// Safe to call from any number of concurrent tasks; acquisition is
    /// serialized on the permit channel.
    pub async fn acquire(&self) {
        let permits = self
            .permits
            .get_or_init(|| async { Mutex::new(spawn_issuer(self.rate)) })
            .await;
        let mut receiver = permits.lock().await;
        // None means the issuing task is gone; leave the gate open rather
        // than wedge every caller
        let _ = receiver.recv().await;
    }
}

/// Start the dedicated permit-issuing task and hand back its channel.
fn spawn_issuer(rate: NonZeroU32) -> mpsc::Receiver<()> {
    let quota = Quota::per_second(rate).allow_burst(NonZeroU32::MIN);
    let clock: PermitClock = Governor::direct(quota);
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        loop {
            clock.until_ready().await;
            if tx.send(()).await.is_err() {
                // limiter dropped, nobody left to serve
                break;
            }
        }
    });

    rx
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").field("rate", &self.rate).finish()
    }
}
