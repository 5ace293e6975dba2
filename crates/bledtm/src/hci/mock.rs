//! Scripted transport used by the unit tests

use crate::error::HciError;
use crate::hci::constants::*;
use crate::hci::packet::{HciCommand, HciEvent};
use crate::hci::transport::HciTransport;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// Answers each command with the events queued for its opcode
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<u16, VecDeque<Vec<HciEvent>>>,
    pending: VecDeque<HciEvent>,
    pub sent: Vec<HciCommand>,
    pub prepared: Vec<u16>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events delivered after the next send of `opcode`
    pub fn respond(&mut self, opcode: u16, events: Vec<HciEvent>) -> &mut Self {
        self.responses.entry(opcode).or_default().push_back(events);
        self
    }

    /// Queue a Command Complete with the given return parameters
    pub fn complete(&mut self, opcode: u16, return_params: &[u8]) -> &mut Self {
        self.respond(opcode, vec![command_complete(opcode, return_params)])
    }

    pub fn sent_opcodes(&self) -> Vec<u16> {
        self.sent.iter().map(HciCommand::opcode).collect()
    }
}

impl HciTransport for MockTransport {
    fn prepare(&mut self, opcode: u16) -> Result<(), HciError> {
        self.prepared.push(opcode);
        Ok(())
    }

    fn send_command(&mut self, command: &HciCommand) -> Result<(), HciError> {
        command.to_packet()?;
        let opcode = command.opcode();
        if let Some(events) = self.responses.get_mut(&opcode).and_then(VecDeque::pop_front) {
            self.pending.extend(events);
        }
        self.sent.push(command.clone());
        Ok(())
    }

    fn read_event_timeout(&mut self, timeout: Duration) -> Result<Option<HciEvent>, HciError> {
        match self.pending.pop_front() {
            Some(event) => Ok(Some(event)),
            None => {
                std::thread::sleep(timeout.min(Duration::from_millis(1)));
                Ok(None)
            }
        }
    }
}

pub fn command_complete(opcode: u16, return_params: &[u8]) -> HciEvent {
    let mut parameters = vec![1];
    parameters.extend_from_slice(&opcode.to_le_bytes());
    parameters.extend_from_slice(return_params);
    HciEvent {
        event_code: EVT_CMD_COMPLETE,
        parameter_total_length: parameters.len() as u8,
        parameters,
    }
}

pub fn command_status(opcode: u16, status: u8) -> HciEvent {
    let mut parameters = vec![status, 1];
    parameters.extend_from_slice(&opcode.to_le_bytes());
    HciEvent {
        event_code: EVT_CMD_STATUS,
        parameter_total_length: parameters.len() as u8,
        parameters,
    }
}
