//! Waker - Synchronization primitive for blocking on device events
//!
//! This module provides the `Waker` struct, which lets thread-context
//! callers suspend until an event is signaled from any execution context,
//! including interrupt handlers that must never suspend themselves.

use spin::Mutex;

/// Primitive invoked once per iteration while a caller is suspended
static PARK_HOOK: Mutex<Option<fn()>> = Mutex::new(None);

/// Install the suspension primitive used by every [`Waker`]
///
/// Until a hook is installed, suspended callers busy-wait with CPU pause
/// hints. An integration should install its scheduler's yield, park, or
/// wait-for-interrupt here during init so suspended threads actually give
/// the CPU up. The hook is called repeatedly while waiting and must return;
/// it runs outside the waker's critical section.
pub fn set_park_hook(hook: fn()) {
    *PARK_HOOK.lock() = Some(hook);
}

fn park() {
    match *PARK_HOOK.lock() {
        Some(hook) => hook(),
        None => core::hint::spin_loop(),
    }
}

struct WakerInner {
    /// Advanced by every wake; waiters suspend until it moves past the
    /// value they captured before checking their condition.
    epoch: u64,
    /// Number of currently suspended callers
    waiters: usize,
}

/// A synchronization primitive for waiting on asynchronous events
///
/// `Waker` pairs a condition re-check loop with an epoch counter protected
/// by a short critical section. The epoch is captured *before* the caller's
/// condition is evaluated, so a wake delivered at any point after the
/// capture - including between a failed condition check and the suspension
/// itself - is observed and the caller retries instead of sleeping through
/// it. Spurious wakes are harmless: the condition is simply re-evaluated.
///
/// The signal path ([`Waker::wake_all`]) takes the critical section once,
/// bumps the epoch and returns; it never suspends and completes in bounded
/// time, making it safe to call from interrupt context.
///
/// # Examples
///
/// ```
/// use iocap::Waker;
///
/// static UART_RX_WAKER: Waker = Waker::new("uart_rx");
///
/// // In an interrupt handler:
/// UART_RX_WAKER.wake_all();
/// ```
pub struct Waker {
    inner: Mutex<WakerInner>,
    /// Human-readable name for diagnostics
    name: &'static str,
}

impl Waker {
    /// Create a new waker
    ///
    /// # Arguments
    ///
    /// * `name` - A human-readable name for diagnostics
    pub const fn new(name: &'static str) -> Self {
        Self {
            inner: Mutex::new(WakerInner {
                epoch: 0,
                waiters: 0,
            }),
            name,
        }
    }

    /// Wait until `cond` yields a result
    ///
    /// Evaluates `cond`; if it returns `Some`, that value is returned
    /// without suspending. Otherwise the caller suspends until the next
    /// wake, then re-evaluates, repeating indefinitely - there is no
    /// timeout. `cond` runs outside the waker's critical section and may
    /// perform its own locking, but must not suspend.
    pub fn wait_until<F, R>(&self, mut cond: F) -> R
    where
        F: FnMut() -> Option<R>,
    {
        loop {
            let since = self.inner.lock().epoch;
            if let Some(result) = cond() {
                return result;
            }
            self.wait(since);
        }
    }

    /// Suspend until the epoch moves past `since`
    ///
    /// Returns immediately if a wake already happened after `since` was
    /// captured. Each suspension iteration runs the installed park hook
    /// (see [`set_park_hook`]), falling back to a spin with pause hints
    /// when none is installed.
    fn wait(&self, since: u64) {
        {
            let mut inner = self.inner.lock();
            if inner.epoch != since {
                return;
            }
            inner.waiters += 1;
        }
        log::trace!("waker {}: suspending", self.name);
        loop {
            {
                let mut inner = self.inner.lock();
                if inner.epoch != since {
                    inner.waiters -= 1;
                    break;
                }
            }
            park();
        }
        log::trace!("waker {}: resumed", self.name);
    }

    /// Wake up all waiting callers
    ///
    /// May be called from any context, including interrupt handlers; never
    /// suspends. Every current waiter is released and independently
    /// re-evaluates its condition; no ordering among them is guaranteed.
    ///
    /// # Returns
    ///
    /// The number of callers that were waiting at the moment of the wake
    pub fn wake_all(&self) -> usize {
        let mut inner = self.inner.lock();
        inner.epoch = inner.epoch.wrapping_add(1);
        inner.waiters
    }

    /// Get the number of callers currently suspended
    pub fn waiting_count(&self) -> usize {
        self.inner.lock().waiters
    }

    /// Get the name of this waker
    pub fn name(&self) -> &'static str {
        self.name
    }
}
