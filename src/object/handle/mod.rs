//! Blocking handle adapter
//!
//! [`BlockingHandle`] implements the full [`FileObject`] contract on top of
//! a [`RawDevice`]'s single-attempt primitives plus an interrupt-side
//! [`BlockingHandle::wake`] signal. It owns the whole concurrency protocol:
//! per-direction wait state, the single-shot wake registration that backs
//! `poll_with_wake`, and the sigio callback registry.

use core::sync::atomic::{AtomicBool, Ordering};

use spin::Mutex;

use crate::device::RawDevice;
use crate::object::capability::{FileObject, SeekFrom, SigioCallback, StreamError, StreamOps};
use crate::poll::PollEvents;
use crate::sync::Waker;


/// Single-shot wake registration and callback registry
///
/// Shared between thread context (`poll_with_wake`, `sigio`) and interrupt
/// context (`wake`); the mutex is held only for bounded bookkeeping and
/// the callback invocation, never across a suspension.
struct WakeRegistration {
    /// Readiness bits whose next occurrence fires the callback; each bit
    /// is consumed the instant it fires (edge trigger)
    armed: PollEvents,
    callback: Option<SigioCallback>,
}

/// Adapter synthesizing blocking file semantics for a non-blocking device
///
/// Construct one per device instance; blocking mode starts enabled, with no
/// wake registration and no callback. The owning device must deliver
/// [`BlockingHandle::wake`] on every readiness transition and must stop
/// once the handle is closed.
///
/// Threads may call every operation concurrently; multiple threads may
/// block on the same direction at once, and a matching wake releases all of
/// them to retry the underlying primitive (any subset may win the race for
/// the data, the rest re-suspend).
pub struct BlockingHandle<D: RawDevice> {
    device: D,
    /// Affects only future read/write calls, never calls already suspended
    blocking: AtomicBool,
    registration: Mutex<WakeRegistration>,
    rx_waker: Waker,
    tx_waker: Waker,
}

impl<D: RawDevice> BlockingHandle<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            blocking: AtomicBool::new(true),
            registration: Mutex::new(WakeRegistration {
                armed: PollEvents::empty(),
                callback: None,
            }),
            rx_waker: Waker::new("handle_rx"),
            tx_waker: Waker::new("handle_tx"),
        }
    }

    /// Borrow the underlying device
    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking.load(Ordering::Relaxed)
    }

    /// Report readiness transitions; the device's asynchronous entry point
    ///
    /// Callable from any context, including interrupt handlers: it never
    /// suspends and completes in bounded time. Receive-relevant events
    /// release blocked readers, transmit-relevant events release blocked
    /// writers, and events matching the armed single-shot registration fire
    /// the sigio callback once, consuming exactly the satisfied bits
    /// (unsatisfied armed bits stay armed). Redundant or unrelated calls
    /// are harmless; readiness itself is only ever established by the
    /// device's own primitives, never fabricated here.
    pub fn wake(&self, events: PollEvents) {
        if events.intersects(PollEvents::RX_WAKE) {
            self.rx_waker.wake_all();
        }
        if events.intersects(PollEvents::TX_WAKE) {
            self.tx_waker.wake_all();
        }
        let mut registration = self.registration.lock();
        let fired = registration.armed & events;
        if !fired.is_empty() {
            registration.armed -= fired;
            if let Some(callback) = &registration.callback {
                callback();
            }
        }
    }
}

impl<D: RawDevice> StreamOps for BlockingHandle<D> {
    /// Read, suspending in blocking mode until the device has anything
    ///
    /// A single successful underlying attempt satisfies the call - any
    /// available data, even one byte, returns immediately, and `Ok(0)` is
    /// end of file. The rx waker epoch is captured before each attempt, so
    /// a wake racing the attempt is never lost; spurious wakes simply
    /// observe not-ready again and re-suspend.
    fn read(&self, buffer: &mut [u8]) -> Result<usize, StreamError> {
        if buffer.is_empty() {
            return Ok(0);
        }
        // Mode is captured once: toggling it cannot cancel a call that is
        // already suspended.
        let blocking = self.is_blocking();
        self.rx_waker
            .wait_until(|| match self.device.read_nonblocking(buffer) {
                Err(StreamError::WouldBlock) if blocking => None,
                result => Some(result),
            })
    }

    /// Write with stream or datagram semantics per the device
    ///
    /// Stream: successful counts accumulate across attempts until the whole
    /// request is accepted; in blocking mode not-ready suspends on the tx
    /// waker and the accumulation continues after the wake, so the call
    /// returns only the full count or a hard error. In non-blocking mode
    /// not-ready returns the partial count if any bytes went out, else the
    /// would-block sentinel.
    ///
    /// Datagram: the first successful attempt ends the call with its result
    /// verbatim; not-ready in blocking mode waits and retries the single
    /// attempt.
    ///
    /// A hard error propagates as-is, discarding any partial count.
    fn write(&self, buffer: &[u8]) -> Result<usize, StreamError> {
        if buffer.is_empty() {
            return Ok(0);
        }
        let blocking = self.is_blocking();
        let mut written = 0;
        self.tx_waker.wait_until(|| {
            loop {
                match self.device.write_nonblocking(&buffer[written..]) {
                    Ok(count) => {
                        written += count;
                        if written >= buffer.len() || !self.device.is_stream() {
                            return Some(Ok(written));
                        }
                    }
                    Err(StreamError::WouldBlock) => {
                        if blocking {
                            return None;
                        }
                        return Some(if written > 0 {
                            Ok(written)
                        } else {
                            Err(StreamError::WouldBlock)
                        });
                    }
                    Err(error) => return Some(Err(error)),
                }
            }
        })
    }
}

impl<D: RawDevice> FileObject for BlockingHandle<D> {
    fn seek(&self, whence: SeekFrom) -> Result<u64, StreamError> {
        self.device.seek(whence)
    }

    fn close(&self) -> Result<(), StreamError> {
        self.device.close()
    }

    fn sync(&self) -> Result<(), StreamError> {
        self.device.sync()
    }

    fn isatty(&self) -> bool {
        self.device.isatty()
    }

    /// Always supported; stores the flag for future calls only
    fn set_blocking(&self, blocking: bool) -> Result<(), StreamError> {
        self.blocking.store(blocking, Ordering::Relaxed);
        Ok(())
    }

    fn poll(&self, events: PollEvents) -> PollEvents {
        self.device.poll(events)
    }

    /// Poll, arming the single-shot registration when nothing is ready yet
    ///
    /// When `arm` is set and the device reports none of the requested bits,
    /// the bits are merged into the armed mask so a later matching wake
    /// fires the sigio callback exactly once per bit.
    ///
    /// The readiness check and the arm run inside the same critical section
    /// `wake` takes before inspecting the armed mask. A transition racing
    /// this call therefore either shows up in the returned mask or finds
    /// the registration armed and fires the callback - never neither, which
    /// would consume the edge unseen and leave the registration armed for a
    /// condition that is already true.
    fn poll_with_wake(&self, events: PollEvents, arm: bool) -> PollEvents {
        let mut registration = self.registration.lock();
        let revents = self.device.poll(events);
        if arm && !revents.intersects(events) {
            registration.armed |= events;
        }
        revents
    }

    /// Register or clear the state-change callback
    ///
    /// Clearing the callback also disarms any pending single-shot bits, so
    /// a registration armed on behalf of a departing consumer can never
    /// fire into a later consumer's callback.
    fn sigio(&self, callback: Option<SigioCallback>) {
        let mut registration = self.registration.lock();
        if callback.is_none() {
            registration.armed = PollEvents::empty();
        }
        registration.callback = callback;
    }
}
