//! Bluetooth HCI (Host Controller Interface) implementation
//!
//! This module provides the command codec, the raw socket and the
//! request/response exchange used to drive a controller's test modes.

pub mod constants;
pub mod packet;
pub mod request;
pub mod socket;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use packet::{HciCommand, HciEvent, TestEndReturn, TxPowerConfig, VendorCounters};
pub use request::{send_request, HCI_TIMEOUT};
pub use socket::{HciFilter, HciSocket};
pub use transport::HciTransport;
