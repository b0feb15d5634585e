//! Debounce and throttle wrappers for event-driven callbacks.
//!
//! Each wrapper owns its own timer/timestamp state and runs deferred
//! invocations as Tokio tasks, so `call` must happen inside a Tokio runtime.
//! Callbacks return `()`; async callbacks go through [`debounce_async`] and
//! [`throttle_async`], which spawn the returned future. Neither wrapper can
//! cancel or flush a pending invocation: once scheduled it fires.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Adapt an async callback: each firing spawns the returned future as its own task.
fn spawning<A, F, Fut>(f: F) -> impl Fn(A) + Send + Sync + 'static
where
    A: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    move |args| {
        tokio::spawn(f(args));
    }
}

/// Wrap `f` so that only the last call of a burst fires, `duration` after that call.
pub fn debounce<A, F>(f: F, duration: Duration) -> Debounce<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounce::with_duration(f, duration)
}

/// Wrap `f` so that it fires at most once per `duration`.
///
/// `immediate = true` fires on the leading edge with the caller's arguments
/// and drops calls inside the window. `immediate = false` fires on the
/// trailing edge with the arguments of the call that opened the window.
pub fn throttle<A, F>(f: F, duration: Duration, immediate: bool) -> Throttle<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Throttle::with_duration(f, duration, ThrottleEdge::from_immediate(immediate))
}

/// [`debounce`] for an async callback. The firing spawns the callback's future.
pub fn debounce_async<A, F, Fut>(f: F, duration: Duration) -> Debounce<A>
where
    A: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Debounce::with_duration(spawning(f), duration)
}

/// [`throttle`] for an async callback. Each firing spawns the callback's future,
/// so the window does not wait for it to complete.
pub fn throttle_async<A, F, Fut>(f: F, duration: Duration, immediate: bool) -> Throttle<A>
where
    A: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Throttle::with_duration(
        spawning(f),
        duration,
        ThrottleEdge::from_immediate(immediate),
    )
}

// ---------------------------------------------------------------------------
// Debounce
// ---------------------------------------------------------------------------

struct DebounceInner<A> {
    f: Callback<A>,
    duration: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Trailing-edge debouncer. Clones share the same pending timer.
pub struct Debounce<A> {
    inner: Arc<DebounceInner<A>>,
}

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Send + 'static> Debounce<A> {
    /// Debounce with the default 500 ms quiet period.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::with_duration(f, config::default_rate_duration())
    }

    pub fn with_duration<F>(f: F, duration: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(DebounceInner {
                f: Arc::new(f),
                duration,
                pending: Mutex::new(None),
            }),
        }
    }

    pub fn duration(&self) -> Duration {
        self.inner.duration
    }

    /// Supersede any pending invocation and schedule `f(args)` after the quiet period.
    pub fn call(&self, args: A) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
            tracing::trace!("Debounced call superseded");
        }

        let f = Arc::clone(&self.inner.f);
        let duration = self.inner.duration;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            tracing::trace!("Debounced call firing");
            f(args);
        }));
    }
}

// ---------------------------------------------------------------------------
// Throttle
// ---------------------------------------------------------------------------

/// Which edge of the window a [`Throttle`] fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleEdge {
    /// Fire at once, then drop calls until `duration` has passed since the last firing.
    Leading,
    /// Start a timer on the first call; fire when it elapses with that call's arguments.
    Trailing,
}

impl ThrottleEdge {
    pub fn from_immediate(immediate: bool) -> Self {
        if immediate {
            ThrottleEdge::Leading
        } else {
            ThrottleEdge::Trailing
        }
    }
}

enum ThrottleState {
    Leading { last_fire: Mutex<Option<Instant>> },
    Trailing { pending: Arc<AtomicBool> },
}

struct ThrottleInner<A> {
    f: Callback<A>,
    duration: Duration,
    state: ThrottleState,
}

/// Rate limiter that lets at most one call through per window. Clones share state.
pub struct Throttle<A> {
    inner: Arc<ThrottleInner<A>>,
}

impl<A> Clone for Throttle<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Send + 'static> Throttle<A> {
    /// Trailing-edge throttle with the default 500 ms window.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::with_duration(f, config::default_rate_duration(), ThrottleEdge::Trailing)
    }

    pub fn with_duration<F>(f: F, duration: Duration, edge: ThrottleEdge) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        let state = match edge {
            ThrottleEdge::Leading => ThrottleState::Leading {
                last_fire: Mutex::new(None),
            },
            ThrottleEdge::Trailing => ThrottleState::Trailing {
                pending: Arc::new(AtomicBool::new(false)),
            },
        };
        Self {
            inner: Arc::new(ThrottleInner {
                f: Arc::new(f),
                duration,
                state,
            }),
        }
    }

    pub fn duration(&self) -> Duration {
        self.inner.duration
    }

    pub fn edge(&self) -> ThrottleEdge {
        match self.inner.state {
            ThrottleState::Leading { .. } => ThrottleEdge::Leading,
            ThrottleState::Trailing { .. } => ThrottleEdge::Trailing,
        }
    }

    /// Offer a call to the throttle. Calls that fall inside an open window are dropped.
    pub fn call(&self, args: A) {
        match &self.inner.state {
            ThrottleState::Leading { last_fire } => self.call_leading(last_fire, args),
            ThrottleState::Trailing { pending } => self.call_trailing(pending, args),
        }
    }

    fn call_leading(&self, last_fire: &Mutex<Option<Instant>>, args: A) {
        let now = Instant::now();
        {
            let mut last = last_fire.lock().unwrap_or_else(PoisonError::into_inner);
            let open = match *last {
                None => true,
                Some(t) => now.duration_since(t) >= self.inner.duration,
            };
            if !open {
                tracing::trace!("Throttled call dropped (leading window open)");
                return;
            }
            // Window is measured from the start of this firing, not its end.
            *last = Some(now);
        }
        // Lock released so `f` may call back into this throttle.
        (self.inner.f)(args);
    }

    fn call_trailing(&self, pending: &Arc<AtomicBool>, args: A) {
        if pending.swap(true, Ordering::AcqRel) {
            tracing::trace!("Throttled call dropped (trailing timer pending)");
            return;
        }

        let f = Arc::clone(&self.inner.f);
        let pending = Arc::clone(pending);
        let duration = self.inner.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            tracing::trace!("Throttled call firing");
            f(args);
            pending.store(false, Ordering::Release);
        });
    }
}
