//! Handle objects and their capability traits
//!
//! The capability layer declares the contracts callers program against;
//! the handle layer provides the generic blocking adapter that implements
//! those contracts on top of a raw device.

pub mod capability;
pub mod handle;
