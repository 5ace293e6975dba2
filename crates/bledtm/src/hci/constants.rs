//! HCI protocol constants
//!
//! This module contains the subset of Bluetooth HCI constants needed to run
//! Direct Test Mode, including the Silicon Labs vendor commands (AN1328).

// HCI packet types
pub const HCI_COMMAND_PKT: u8 = 0x01;
pub const HCI_EVENT_PKT: u8 = 0x04;

// Maximum size of HCI command parameters
pub const HCI_MAX_PARAM_LEN: usize = 255;

// Maximum size of an HCI event packet, including the packet type indicator
pub const HCI_MAX_EVENT_SIZE: usize = 260;

// Common OGF (Opcode Group Field) values
pub const OGF_HOST_CTL: u8 = 0x03;
pub const OGF_LE: u8 = 0x08;
pub const OGF_VENDOR: u8 = 0x3F;

// Host Controller Commands (OGF: 0x03)
pub const OCF_RESET: u16 = 0x0003;

// LE Command OCF values (OGF: 0x08)
pub const OCF_LE_TEST_END: u16 = 0x001F;
// Core spec v5.2, Vol 4, Part E, 7.8.28-29
pub const OCF_LE_RECEIVER_TEST_V2: u16 = 0x0033;
pub const OCF_LE_TRANSMITTER_TEST_V4: u16 = 0x007B;

// Silicon Labs vendor specific commands (OGF: 0x3F)
pub const OCF_VS_GET_COUNTERS: u16 = 0x0012;
pub const OCF_VS_SET_MIN_MAX_TX_POWER: u16 = 0x0014;
pub const OCF_VS_READ_CURRENT_TX_POWER_CONFIG: u16 = 0x0017;

// HCI Events
pub const EVT_CMD_COMPLETE: u8 = 0x0E;
pub const EVT_CMD_STATUS: u8 = 0x0F;
pub const EVT_LE_META_EVENT: u8 = 0x3E;

// Socket options for the raw HCI channel
pub const SOL_HCI: i32 = 0;
pub const HCI_FILTER: i32 = 2;

// Every request in this tool is given the same deadline
pub const HCI_TIMEOUT_MS: u64 = 1000;
