//! Transport abstraction for HCI request/response exchanges

use crate::error::HciError;
use crate::hci::packet::{HciCommand, HciEvent};
use std::time::Duration;

/// A channel that can carry one HCI command and the events answering it
pub trait HciTransport {
    /// Get ready to receive the response to `opcode`
    fn prepare(&mut self, opcode: u16) -> Result<(), HciError>;
    /// Write a command to the controller
    fn send_command(&mut self, command: &HciCommand) -> Result<(), HciError>;
    /// Wait up to `timeout` for the next event, `None` if nothing arrived
    fn read_event_timeout(&mut self, timeout: Duration) -> Result<Option<HciEvent>, HciError>;
}
