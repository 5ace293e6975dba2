//! Error types for the bledtm library
//!
//! This module defines the error types used throughout the library.

use thiserror::Error;

/// Errors that can occur when exchanging commands with an HCI controller
#[derive(Error, Debug)]
pub enum HciError {
    #[error("Failed to open HCI socket: {0}")]
    SocketError(#[from] std::io::Error),

    #[error("Failed to bind to HCI device: {0}")]
    BindError(std::io::Error),

    #[error("Failed to set HCI socket filter: {0}")]
    FilterError(std::io::Error),

    #[error("Failed to send HCI command: {0}")]
    SendError(std::io::Error),

    #[error("Failed to receive HCI event: {0}")]
    ReceiveError(std::io::Error),

    #[error("Timed out waiting for response to opcode 0x{0:04X}")]
    Timeout(u16),

    #[error("Controller rejected opcode 0x{opcode:04X} with status 0x{status:02X}")]
    CommandFailed { opcode: u16, status: u8 },

    #[error("Invalid parameter length: {0}")]
    InvalidParamLength(usize),

    #[error("Invalid HCI packet format")]
    InvalidPacketFormat,
}

/// Errors raised while configuring or running a Direct Test Mode session
#[derive(Error, Debug)]
pub enum DtmError {
    #[error(transparent)]
    Hci(#[from] HciError),

    /// The controller answered, but with a nonzero status byte
    #[error("{command} hci req status = 0x{status:x}")]
    CommandStatus { command: &'static str, status: u8 },

    #[error("Error in channel: max value 39")]
    InvalidChannel(u8),

    #[error("Error in power level: max value 20 dBm")]
    InvalidPower(i16),

    #[error("Error in power level: min value -127 dBm")]
    PowerTooLow(i16),

    #[error("Error! Invalid phy argument, 0x{0:02x}")]
    InvalidPhy(u8),
}

impl DtmError {
    /// Map a nonzero status byte to an error, passing zero through
    pub(crate) fn check(command: &'static str, status: u8) -> Result<(), DtmError> {
        if status == 0 {
            Ok(())
        } else {
            Err(DtmError::CommandStatus { command, status })
        }
    }
}
