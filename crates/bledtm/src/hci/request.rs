//! Single command request/response exchange
//!
//! Sends one command and waits for the Command Complete (or failing Command
//! Status) event carrying the same opcode.

use crate::error::HciError;
use crate::hci::constants::HCI_TIMEOUT_MS;
use crate::hci::packet::HciCommand;
use crate::hci::transport::HciTransport;
use log::{debug, warn};
use std::time::{Duration, Instant};

/// Default deadline for a request
pub const HCI_TIMEOUT: Duration = Duration::from_millis(HCI_TIMEOUT_MS);

/// Send `command` and return the return parameters of its Command Complete
///
/// The returned buffer starts with the status byte. A Command Status event
/// reporting success is treated as an intermediate acknowledgement and the
/// wait continues until the completion arrives or `timeout` elapses.
pub fn send_request<T: HciTransport + ?Sized>(
    transport: &mut T,
    command: &HciCommand,
    timeout: Duration,
) -> Result<Vec<u8>, HciError> {
    let opcode = command.opcode();
    transport.prepare(opcode)?;
    transport.send_command(command)?;
    debug!("sent {} (opcode 0x{:04X})", command.name(), opcode);

    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(HciError::Timeout(opcode));
        }

        let event = match transport.read_event_timeout(remaining)? {
            Some(event) => event,
            None => continue,
        };

        if let Some((status, op)) = event.command_status() {
            if op != opcode {
                continue;
            }
            if status != 0 {
                return Err(HciError::CommandFailed { opcode, status });
            }
            debug!("{} pending", command.name());
            continue;
        }

        if let Some((op, params)) = event.command_complete() {
            if op != opcode {
                continue;
            }
            debug!("{} complete: {}", command.name(), hex::encode(params));
            return Ok(params.to_vec());
        }

        warn!("ignoring unexpected event 0x{:02X}", event.event_code);
    }
}
