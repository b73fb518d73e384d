//! Device-side capability interface
//!
//! A [`RawDevice`] is what a concrete transport driver (UART, socket, pipe)
//! supplies to the handle layer: single-attempt, never-suspend primitives
//! plus an instantaneous readiness query. The blocking adapter in
//! [`crate::object::handle`] turns this into the full
//! [`crate::object::capability::FileObject`] contract.
//!
//! Uses internal mutability for thread-safe shared access: all operations
//! take `&self` so a driver's interrupt handler and calling threads can
//! share the device behind an `Arc`.

use crate::object::capability::{SeekFrom, StreamError};
use crate::poll::PollEvents;

#[cfg(test)]
pub mod mockraw;

/// Non-blocking device capability consumed by the blocking adapter
///
/// # Wake obligation
///
/// The implementing device must call
/// [`BlockingHandle::wake`](crate::object::handle::BlockingHandle::wake)
/// on its owning handle whenever any readiness bit transitions true, from
/// whatever context detects the condition, before or as soon as the
/// transition becomes observable through [`RawDevice::poll`]. It must stop
/// doing so once the handle is closed; the adapter performs no
/// use-after-close tracking.
pub trait RawDevice: Send + Sync {
    /// Whether writes follow stream or datagram semantics
    ///
    /// For a stream, a blocking write may be satisfied by multiple
    /// successful calls to `write_nonblocking`, summing the counts, until
    /// the full amount is written. For a datagram, a blocking write makes
    /// only one successful call and returns its result verbatim. Read
    /// behaviour is the same in both cases, as reads return as soon as any
    /// data is available.
    fn is_stream(&self) -> bool;

    /// Read without suspending
    ///
    /// Returns immediately in all cases: the bytes transferred, `Ok(0)` at
    /// end of file, `Err(StreamError::WouldBlock)` when no data is
    /// available, or another error.
    fn read_nonblocking(&self, buffer: &mut [u8]) -> Result<usize, StreamError>;

    /// Write without suspending
    ///
    /// Accepts as much as currently possible and returns immediately:
    /// the bytes accepted, `Err(StreamError::WouldBlock)` when nothing can
    /// be accepted, or another error.
    fn write_nonblocking(&self, buffer: &[u8]) -> Result<usize, StreamError>;

    /// Instantaneous readiness state, side-effect free, no false positives
    ///
    /// The input mask may be used or ignored; callers mask the result.
    ///
    /// The adapter invokes this inside the critical section that guards its
    /// wake registration, so the implementation must not suspend, and the
    /// device must not be holding a lock this method acquires when it
    /// delivers a wake.
    fn poll(&self, events: PollEvents) -> PollEvents;

    /// Seek to a position on the device
    ///
    /// Endpoint devices are typically not seekable, hence the default.
    fn seek(&self, whence: SeekFrom) -> Result<u64, StreamError> {
        let _ = whence;
        Err(StreamError::NotSupported)
    }

    /// Release device-side resources for this handle
    fn close(&self) -> Result<(), StreamError> {
        Ok(())
    }

    /// Flush device-side buffers
    fn sync(&self) -> Result<(), StreamError> {
        Ok(())
    }

    /// Check if the device is an interactive terminal
    fn isatty(&self) -> bool {
        false
    }
}
