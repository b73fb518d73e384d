//! Stream operations capability module
//!
//! This module provides the base trait for StreamOps capability, which
//! enables read and write operations on I/O endpoints, and the error type
//! shared by all fallible operations in the crate.

/// Represents errors that can occur during stream I/O operations
///
/// `WouldBlock` is not an error in the ordinary sense: it is the expected
/// transient "not ready" condition of a non-blocking endpoint, escaped
/// either by returning it to the caller (non-blocking mode) or by
/// suspension-and-retry (blocking mode). End of file is *not* an error
/// either - it is a successful zero-byte read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// I/O error occurred
    IoError,
    /// Operation would block (for non-blocking streams)
    WouldBlock,
    /// Stream was closed or is invalid
    Closed,
    /// Invalid arguments provided (e.g., bad offset)
    InvalidArgument,
    /// Operation not supported by this stream type
    NotSupported,
    /// No space left for write operations
    NoSpace,
    /// Broken pipe/connection
    BrokenPipe,
    /// Device-specific error
    DeviceError,
}

/// Stream operations capability
///
/// This trait represents the ability to perform stream-like read and write
/// operations on a resource. Implementations follow POSIX semantics:
///
/// * `read` returns immediately once *any* data is available, even a single
///   byte; it never accumulates across multiple underlying transfers. A
///   return of `Ok(0)` means end of file. Non-blocking endpoints report an
///   empty device as `Err(StreamError::WouldBlock)`; blocking endpoints
///   suspend until data exists.
/// * `write` on a blocking endpoint does not return until all requested
///   bytes are accepted or a hard error occurs; on a non-blocking endpoint
///   it may accept fewer bytes than requested.
pub trait StreamOps: Send + Sync {
    /// Read data from the stream
    fn read(&self, buffer: &mut [u8]) -> Result<usize, StreamError>;

    /// Write data to the stream
    fn write(&self, buffer: &[u8]) -> Result<usize, StreamError>;
}
