//! Capability traits for I/O handle resources
//!
//! This module defines capability traits that represent the operations
//! that can be performed on byte-oriented I/O endpoints.

pub mod file;
pub mod stream;


// Re-export stream types
pub use stream::{StreamError, StreamOps};

// Re-export file types
pub use file::{FileObject, SeekFrom, SigioCallback};
