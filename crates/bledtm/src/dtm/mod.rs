//! Bluetooth LE Direct Test Mode
//!
//! Test parameters, the session that runs a test over HCI, and the vendor
//! commands used to read packet counters and pin transmit power.

pub mod params;
pub mod session;
pub mod vendor;

#[cfg(test)]
mod tests;

pub use params::{tx_power, Channel, PayloadType, Phy, TestMode, TestParams};
pub use session::{wait, DtmSession, TestReport};
