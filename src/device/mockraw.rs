//! Mock raw device for testing
//!
//! Scripted [`RawDevice`] with byte-level control over readiness, a
//! per-call transmit budget that can model a FIFO filling up, error
//! injection, and attempt counters for asserting how often the adapter
//! touched the primitives.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use spin::Mutex;

use super::RawDevice;
use crate::object::capability::StreamError;
use crate::poll::PollEvents;

struct MockState {
    rx_data: VecDeque<u8>,
    rx_eof: bool,
    rx_error: Option<StreamError>,
    /// Bytes a single write attempt will accept; 0 means not ready
    tx_budget: usize,
    /// Drop the budget to 0 after every successful write, modelling a
    /// FIFO that fills and needs a transmit wake to drain
    tx_auto_exhaust: bool,
    tx_error: Option<StreamError>,
    written: Vec<u8>,
    read_attempts: usize,
    write_attempts: usize,
}

pub struct MockRawDevice {
    state: Mutex<MockState>,
    stream: bool,
}

impl MockRawDevice {
    fn new(stream: bool) -> Self {
        Self {
            state: Mutex::new(MockState {
                rx_data: VecDeque::new(),
                rx_eof: false,
                rx_error: None,
                tx_budget: usize::MAX,
                tx_auto_exhaust: false,
                tx_error: None,
                written: Vec::new(),
                read_attempts: 0,
                write_attempts: 0,
            }),
            stream,
        }
    }

    /// A device with stream write semantics
    pub fn stream() -> Self {
        Self::new(true)
    }

    /// A device with datagram write semantics
    pub fn datagram() -> Self {
        Self::new(false)
    }

    /// Queue data for read operations
    pub fn push_rx(&self, data: &[u8]) {
        self.state.lock().rx_data.extend(data.iter().copied());
    }

    /// Mark end of file once the queued data is drained
    pub fn set_eof(&self) {
        self.state.lock().rx_eof = true;
    }

    /// Make the next read attempt fail with `error`
    pub fn fail_next_read(&self, error: StreamError) {
        self.state.lock().rx_error = Some(error);
    }

    /// Set how many bytes a single write attempt accepts (0 = not ready)
    pub fn set_tx_budget(&self, budget: usize) {
        self.state.lock().tx_budget = budget;
    }

    /// Exhaust the transmit budget after every successful write
    pub fn set_tx_auto_exhaust(&self, auto_exhaust: bool) {
        self.state.lock().tx_auto_exhaust = auto_exhaust;
    }

    /// Make the next write attempt fail with `error`
    pub fn fail_next_write(&self, error: StreamError) {
        self.state.lock().tx_error = Some(error);
    }

    /// Get the data written to the device so far
    pub fn written(&self) -> Vec<u8> {
        self.state.lock().written.clone()
    }

    pub fn read_attempts(&self) -> usize {
        self.state.lock().read_attempts
    }

    pub fn write_attempts(&self) -> usize {
        self.state.lock().write_attempts
    }
}

impl RawDevice for MockRawDevice {
    fn is_stream(&self) -> bool {
        self.stream
    }

    fn read_nonblocking(&self, buffer: &mut [u8]) -> Result<usize, StreamError> {
        let mut state = self.state.lock();
        state.read_attempts += 1;
        if let Some(error) = state.rx_error.take() {
            return Err(error);
        }
        if state.rx_data.is_empty() {
            return if state.rx_eof {
                Ok(0)
            } else {
                Err(StreamError::WouldBlock)
            };
        }
        let mut count = 0;
        while count < buffer.len() {
            match state.rx_data.pop_front() {
                Some(byte) => {
                    buffer[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }

    fn write_nonblocking(&self, buffer: &[u8]) -> Result<usize, StreamError> {
        let mut state = self.state.lock();
        state.write_attempts += 1;
        if let Some(error) = state.tx_error.take() {
            return Err(error);
        }
        if state.tx_budget == 0 {
            return Err(StreamError::WouldBlock);
        }
        let count = buffer.len().min(state.tx_budget);
        let accepted = &buffer[..count];
        state.written.extend_from_slice(accepted);
        if state.tx_auto_exhaust {
            state.tx_budget = 0;
        }
        Ok(count)
    }

    fn poll(&self, events: PollEvents) -> PollEvents {
        let _ = events;
        let state = self.state.lock();
        let mut revents = PollEvents::empty();
        if !state.rx_data.is_empty() || state.rx_eof {
            revents |= PollEvents::IN;
        }
        if state.tx_budget > 0 {
            revents |= PollEvents::OUT;
        }
        revents
    }
}
