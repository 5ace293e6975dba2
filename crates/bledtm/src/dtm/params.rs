//! Direct Test Mode parameters
//!
//! Typed, range-checked versions of the values a test is configured with.

use crate::error::DtmError;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;
use std::time::Duration;

/// Highest RF channel index; frequency = 2402 MHz + 2 MHz * index
pub const MAX_CHANNEL: u8 = 39;
/// Highest transmit power the test commands accept, in dBm
pub const MAX_TX_POWER_DBM: i16 = 20;
/// Lowest transmit power the test commands accept, in dBm
pub const MIN_TX_POWER_DBM: i16 = -127;

pub const DEFAULT_PACKET_LENGTH: u8 = 25;
pub const DEFAULT_TX_POWER_DBM: i8 = 5;

/// PHY used for test packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Phy {
    Le1M = 0x01,
    Le2M = 0x02,
    /// LE Coded, S=8 (125 kbit/s)
    LeCodedS8 = 0x03,
    /// LE Coded, S=2 (500 kbit/s)
    LeCodedS2 = 0x04,
}

impl Phy {
    pub fn from_raw(value: u8) -> Result<Self, DtmError> {
        Phy::try_from(value).map_err(|_| DtmError::InvalidPhy(value))
    }
}

impl fmt::Display for Phy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phy::Le1M => "1 Mbps",
            Phy::Le2M => "2 Mbps",
            Phy::LeCodedS8 => "125 kbps LR coded (S=8)",
            Phy::LeCodedS2 => "500 kbps LR coded (S=2)",
        };
        f.write_str(name)
    }
}

/// Test packet payload patterns defined by the Core specification
///
/// The transmitter test forwards the raw byte, so values outside this set
/// still reach the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum PayloadType {
    Prbs9 = 0x00,
    Pattern11110000 = 0x01,
    Pattern10101010 = 0x02,
    Prbs15 = 0x03,
    Pattern11111111 = 0x04,
    Pattern00000000 = 0x05,
    Pattern00001111 = 0x06,
    Pattern01010101 = 0x07,
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadType::Prbs9 => "PRBS9",
            PayloadType::Pattern11110000 => "11110000",
            PayloadType::Pattern10101010 => "10101010",
            PayloadType::Prbs15 => "PRBS15",
            PayloadType::Pattern11111111 => "11111111",
            PayloadType::Pattern00000000 => "00000000",
            PayloadType::Pattern00001111 => "00001111",
            PayloadType::Pattern01010101 => "01010101",
        };
        f.write_str(name)
    }
}

/// RF channel index, 0 to 39
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    pub fn new(index: u8) -> Result<Self, DtmError> {
        if index > MAX_CHANNEL {
            return Err(DtmError::InvalidChannel(index));
        }
        Ok(Channel(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Center frequency in MHz
    pub fn frequency_mhz(self) -> u16 {
        2402 + 2 * self.0 as u16
    }
}

/// Validate a transmit power level given in dBm
pub fn tx_power(dbm: i16) -> Result<i8, DtmError> {
    if dbm > MAX_TX_POWER_DBM {
        return Err(DtmError::InvalidPower(dbm));
    }
    if dbm < MIN_TX_POWER_DBM {
        return Err(DtmError::PowerTooLow(dbm));
    }
    Ok(dbm as i8)
}

/// Which test the controller runs
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    #[default]
    Transmit,
    Receive,
}

/// Complete description of one test run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestParams {
    pub mode: TestMode,
    pub channel: Channel,
    pub phy: Phy,
    /// Raw payload type byte, see [`PayloadType`]
    pub payload: u8,
    /// Test packet payload length in bytes
    pub length: u8,
    pub power_dbm: i8,
    /// How long to run; zero runs until stopped
    pub duration: Duration,
}

impl Default for TestParams {
    fn default() -> Self {
        TestParams {
            mode: TestMode::Transmit,
            channel: Channel::default(),
            phy: Phy::Le1M,
            payload: PayloadType::Prbs9.into(),
            length: DEFAULT_PACKET_LENGTH,
            power_dbm: DEFAULT_TX_POWER_DBM,
            duration: Duration::ZERO,
        }
    }
}

impl TestParams {
    pub fn is_infinite(&self) -> bool {
        self.duration.is_zero()
    }

    pub fn payload_type(&self) -> Option<PayloadType> {
        PayloadType::try_from(self.payload).ok()
    }
}
