//! bledtm - Bluetooth LE Direct Test Mode over HCI
//!
//! This library drives a Bluetooth controller attached through a Linux HCI
//! socket into the RF test modes defined by the Core specification: the
//! transmitter test and the receiver test. It also speaks the Silicon Labs
//! vendor commands used to read packet counters and pin transmit power.

pub mod dtm;
pub mod error;
pub mod hci;

// Re-export common types for convenience
pub use dtm::{Channel, DtmSession, PayloadType, Phy, TestMode, TestParams, TestReport};
pub use error::{DtmError, HciError};
pub use hci::{HciCommand, HciEvent, HciSocket, HciTransport, TxPowerConfig, VendorCounters};
