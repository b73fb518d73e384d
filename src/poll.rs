//! Readiness masks and multi-handle polling.
//!
//! [`PollEvents`] is the instantaneous readiness bitset shared by the whole
//! crate; it is never stored as state, only recomputed on demand through
//! [`FileObject::poll`]. The [`poll`] function waits on any number of
//! handles at once, built on the single-shot wake registration that
//! [`FileObject::poll_with_wake`] provides.

use alloc::boxed::Box;
use alloc::sync::Arc;

use bitflags::bitflags;

use crate::object::capability::FileObject;
use crate::sync::Waker;

bitflags! {
    /// Poll event bitset, POSIX `poll(2)` encoding.
    ///
    /// `ERR`, `HUP` and `NVAL` are reported whether or not they were asked
    /// for; devices never raise them speculatively.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PollEvents: u16 {
        /// Data available to read
        const IN = 0x001;
        /// Writing will accept at least one byte
        const OUT = 0x004;
        /// Error condition on the device
        const ERR = 0x008;
        /// Hangup (peer or carrier gone)
        const HUP = 0x010;
        /// Handle is invalid or the operation is unsupported
        const NVAL = 0x020;

        /// Events that release blocked readers
        const RX_WAKE = Self::IN.bits() | Self::ERR.bits() | Self::HUP.bits();
        /// Events that release blocked writers
        const TX_WAKE = Self::OUT.bits() | Self::ERR.bits() | Self::HUP.bits();
        /// Events reported regardless of the requested mask
        const ALWAYS = Self::ERR.bits() | Self::HUP.bits() | Self::NVAL.bits();
    }
}

/// One handle's slot in a [`poll`] call: the requested event mask going in,
/// the occurred events coming out.
pub struct PollEntry<'a> {
    pub handle: &'a dyn FileObject,
    pub events: PollEvents,
    pub revents: PollEvents,
}

impl<'a> PollEntry<'a> {
    pub fn new(handle: &'a dyn FileObject, events: PollEvents) -> Self {
        Self {
            handle,
            events,
            revents: PollEvents::empty(),
        }
    }
}

/// Block until at least one entry has a non-empty result mask, and return
/// how many do.
///
/// Each scan asks every handle for its instantaneous state via
/// `poll_with_wake`, arming the single-shot wake registration while the scan
/// has found nothing; the wakeup channel is a sigio callback registered on
/// every handle for the duration of the call. Because the sigio registry
/// holds at most one callback per handle, a handle taking part in `poll`
/// must not carry its own sigio callback. Before returning, every handle's
/// sigio registration is cleared, which also disarms any single-shot bits
/// the scans left armed - those bits belong to this call's wakeup channel
/// and must not fire into a callback registered afterwards.
///
/// A handle that does not support wake registration (its `poll_with_wake`
/// reports [`PollEvents::NVAL`]) shows up with `NVAL` in its `revents` and
/// therefore ends the call immediately, rather than being silently spun on.
///
/// There is no timeout: the call returns only when a requested (or
/// always-reported) condition holds on some handle. Instantaneous status of
/// a single handle is available through [`FileObject::poll`] directly.
pub fn poll(entries: &mut [PollEntry<'_>]) -> usize {
    let waker = Arc::new(Waker::new("poll"));

    for entry in entries.iter() {
        let waker = Arc::clone(&waker);
        entry.handle.sigio(Some(Box::new(move || {
            waker.wake_all();
        })));
    }

    let count = waker.wait_until(|| {
        let mut count = 0;
        for entry in entries.iter_mut() {
            let mask = entry.events | PollEvents::ALWAYS;
            // Arm only while this scan has found nothing; once an entry is
            // ready the call completes without waiting.
            entry.revents = entry.handle.poll_with_wake(mask, count == 0) & mask;
            if !entry.revents.is_empty() {
                count += 1;
            }
        }
        (count > 0).then_some(count)
    });

    for entry in entries.iter() {
        entry.handle.sigio(None);
    }

    count
}
