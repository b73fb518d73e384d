//! # iocap
//!
//! Capability abstractions for byte-oriented I/O endpoints (serial lines,
//! sockets, pipes) in interrupt-driven environments, together with a generic
//! adapter that synthesizes full blocking, poll-able, thread-safe handle
//! semantics on top of devices that are natively non-blocking and report
//! readiness changes only from interrupt context.
//!
//! ## Core Components
//!
//! - [`StreamOps`] / [`FileObject`]: the capability contract for handles -
//!   read, write, seek, close, sync, poll, blocking-mode control and
//!   state-change notification, with safe defaults for always-ready handles
//! - [`RawDevice`]: the device-side capability a driver supplies - single
//!   attempt, never-suspend read/write/poll primitives
//! - [`BlockingHandle`]: the adapter that turns a [`RawDevice`] plus an
//!   interrupt-side [`BlockingHandle::wake`] signal into the full
//!   [`FileObject`] contract
//! - [`Waker`]: the wait/wake primitive bridging thread context and
//!   interrupt context without losing wakeups
//! - [`poll`]: readiness masks and blocking multi-handle polling
//!
//! ## Execution Contexts
//!
//! Two contexts are recognized throughout the crate. *Thread context* is the
//! only place suspension is permitted; *interrupt context* (the device's
//! event source) must never suspend and must complete each call in bounded
//! time. [`BlockingHandle::wake`] and [`Waker::wake_all`] are safe to call
//! from either.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod device;
pub mod object;
pub mod poll;
pub mod sync;

pub use device::RawDevice;
pub use object::capability::{FileObject, SeekFrom, SigioCallback, StreamError, StreamOps};
pub use object::handle::BlockingHandle;
pub use poll::{PollEntry, PollEvents};
pub use sync::{Waker, set_park_hook};
