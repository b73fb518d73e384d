//! File operations capability module
//!
//! This module provides the FileObject capability, which extends StreamOps
//! with the rest of the handle contract: positioning, lifecycle, readiness
//! queries, blocking-mode control and state-change notification. Most
//! operations carry defaults suitable for always-ready handles (regular
//! files); endpoint adapters override them.

use alloc::boxed::Box;

use crate::object::capability::stream::{StreamError, StreamOps};
use crate::poll::PollEvents;

/// Seek operations for file positioning
#[derive(Debug, Clone, Copy)]
pub enum SeekFrom {
    /// Seek from the beginning of the file
    Start(u64),
    /// Seek relative to the current position
    Current(i64),
    /// Seek relative to the end of the file
    End(i64),
}

/// State-change callback registered through [`FileObject::sigio`]
///
/// May be invoked from interrupt context: it must be cheap, must not
/// suspend, and must not re-enter the registration APIs of the handle it
/// was registered on.
pub type SigioCallback = Box<dyn Fn() + Send + Sync>;

/// Trait for file-like handle objects
///
/// This trait represents a handle that supports stream operations plus
/// file-specific operations like seeking, readiness polling and
/// notification registration.
pub trait FileObject: StreamOps {
    /// Seek to a position in the stream
    ///
    /// # Returns
    ///
    /// The new absolute offset, or an error if the handle does not support
    /// positioning
    fn seek(&self, whence: SeekFrom) -> Result<u64, StreamError>;

    /// Close the handle
    ///
    /// After close, the owning device must stop delivering wake events for
    /// this handle; no use-after-close tracking is performed.
    fn close(&self) -> Result<(), StreamError>;

    /// Flush any buffers associated with the handle
    fn sync(&self) -> Result<(), StreamError> {
        Ok(())
    }

    /// Check if the handle is an interactive terminal device
    fn isatty(&self) -> bool {
        false
    }

    /// Get the current position in the stream
    ///
    /// Equivalent to `seek(SeekFrom::Current(0))`.
    fn tell(&self) -> Result<u64, StreamError> {
        self.seek(SeekFrom::Current(0))
    }

    /// Rewind to the beginning of the stream, ignoring the result
    ///
    /// Equivalent to `seek(SeekFrom::Start(0))`.
    fn rewind(&self) {
        let _ = self.seek(SeekFrom::Start(0));
    }

    /// Get the size of the file
    ///
    /// The default remembers the current position, seeks to the end to
    /// learn the length, then restores the saved position. The restore is
    /// attempted even when the end-seek fails; a failed end-seek is
    /// reported first, otherwise a failed restore is the call's error -
    /// a length the caller cannot trust the position after is never a
    /// silent success.
    fn size(&self) -> Result<u64, StreamError> {
        let pos = self.seek(SeekFrom::Current(0))?;
        let size = self.seek(SeekFrom::End(0));
        let restored = self.seek(SeekFrom::Start(pos));
        let size = size?;
        restored?;
        Ok(size)
    }

    /// Set blocking or non-blocking mode for read/write operations
    ///
    /// Blocking is the default mode. The base interface reports the switch
    /// as unsupported; adapters over non-blocking devices override this
    /// with full support. The mode affects only future calls - calls
    /// already suspended are unaffected.
    fn set_blocking(&self, blocking: bool) -> Result<(), StreamError> {
        let _ = blocking;
        Err(StreamError::NotSupported)
    }

    /// Check for poll event flags
    ///
    /// Non-blocking and side-effect free: returns the instantaneous state
    /// of events, with no false positives. The input mask may be used or
    /// ignored - implementations may always report all conditions that
    /// hold. The default suits always-ready handles such as regular files.
    fn poll(&self, events: PollEvents) -> PollEvents {
        let _ = events;
        PollEvents::IN | PollEvents::OUT
    }

    /// Check for poll event flags, optionally arming a single-shot wake
    ///
    /// Same as [`FileObject::poll`], except that when `arm` is true and
    /// none of the requested bits are currently set, the handle must arm a
    /// single-shot registration so that the next matching readiness
    /// transition fires the sigio callback. The registration is an edge
    /// trigger, consumed per-bit as it fires.
    ///
    /// # Returns
    ///
    /// The occurred events, or [`PollEvents::NVAL`] if the handle does not
    /// support wake registration
    fn poll_with_wake(&self, events: PollEvents, arm: bool) -> PollEvents {
        let _ = (events, arm);
        PollEvents::NVAL
    }

    /// True when there is something available to read
    ///
    /// Derived strictly from [`FileObject::poll`].
    fn readable(&self) -> bool {
        self.poll(PollEvents::IN).contains(PollEvents::IN)
    }

    /// True when the handle will accept at least one byte
    ///
    /// Derived strictly from [`FileObject::poll`].
    fn writable(&self) -> bool {
        self.poll(PollEvents::OUT).contains(PollEvents::OUT)
    }

    /// Register (or with `None`, clear) the state-change callback
    ///
    /// At most one callback per handle. This is not an attach-like
    /// asynchronous API but a building block for one: the callback is a cue
    /// to make read/write/poll calls to find the current state. Always-ready
    /// handles have no state changes to report, hence the no-op default.
    ///
    /// Clearing the callback cancels any single-shot registration still
    /// armed for it; [`poll`](crate::poll::poll) relies on this to retire
    /// the registrations its scans armed.
    fn sigio(&self, callback: Option<SigioCallback>) {
        let _ = callback;
    }
}
