//! Synchronization primitives module
//!
//! This module provides the wait/wake primitives used to bridge thread
//! context and interrupt context, most importantly the [`Waker`] used by
//! blocking handles to suspend until a device event arrives.

pub mod waker;

pub use waker::{Waker, set_park_hook};
