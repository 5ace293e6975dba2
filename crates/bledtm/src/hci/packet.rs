//! HCI packet structures and parsing
//!
//! This module contains the commands this tool sends, the events it reads
//! back and decoders for the fixed-layout return parameters.

use crate::error::HciError;
use crate::hci::constants::*;
use byteorder::{ByteOrder, LittleEndian};

/// Build an opcode from its group and command fields
pub const fn opcode(ogf: u8, ocf: u16) -> u16 {
    ((ogf as u16) << 10) | (ocf & 0x3ff)
}

/// HCI commands used by Direct Test Mode
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HciCommand {
    // Host Controller Commands (OGF: 0x03)
    Reset,

    // LE Commands (OGF: 0x08)
    LeTestEnd,
    LeReceiverTestV2 {
        channel: u8,
        phy: u8,
        modulation_index: u8,
    },
    LeTransmitterTestV4 {
        channel: u8,
        length: u8,
        payload: u8,
        phy: u8,
        tx_power_level: i8,
    },

    // Silicon Labs vendor commands (OGF: 0x3F)
    VsGetCounters { reset: bool },
    VsSetMinMaxTxPower { min_ddbm: i16, max_ddbm: i16 },
    VsReadTxPowerConfig,

    /// Any other command, parameters already encoded
    Raw {
        ogf: u8,
        ocf: u16,
        parameters: Vec<u8>,
    },
}

impl HciCommand {
    /// Create a raw command from its opcode fields and encoded parameters
    pub fn new(ogf: u8, ocf: u16, parameters: Vec<u8>) -> Self {
        Self::Raw {
            ogf,
            ocf,
            parameters,
        }
    }

    /// Get the OGF and OCF for this command
    pub fn opcode_parts(&self) -> (u8, u16) {
        match self {
            Self::Reset => (OGF_HOST_CTL, OCF_RESET),

            Self::LeTestEnd => (OGF_LE, OCF_LE_TEST_END),
            Self::LeReceiverTestV2 { .. } => (OGF_LE, OCF_LE_RECEIVER_TEST_V2),
            Self::LeTransmitterTestV4 { .. } => (OGF_LE, OCF_LE_TRANSMITTER_TEST_V4),

            Self::VsGetCounters { .. } => (OGF_VENDOR, OCF_VS_GET_COUNTERS),
            Self::VsSetMinMaxTxPower { .. } => (OGF_VENDOR, OCF_VS_SET_MIN_MAX_TX_POWER),
            Self::VsReadTxPowerConfig => (OGF_VENDOR, OCF_VS_READ_CURRENT_TX_POWER_CONFIG),

            Self::Raw { ogf, ocf, .. } => (*ogf, *ocf),
        }
    }

    /// The packed 16-bit opcode
    pub fn opcode(&self) -> u16 {
        let (ogf, ocf) = self.opcode_parts();
        opcode(ogf, ocf)
    }

    /// Name used when the controller rejects the command
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reset => "HCI_Reset",
            Self::LeTestEnd => "HCI_LE_Test_End",
            Self::LeReceiverTestV2 { .. } => "HCI_LE_Receiver_Test_v2",
            Self::LeTransmitterTestV4 { .. } => "HCI_LE_Transmitter_Test_v4",
            Self::VsGetCounters { .. } => "HCI_VS_SiliconLabs_Get_Counters",
            Self::VsSetMinMaxTxPower { .. } => "HCI_VS_SiliconLabs_Set_Min_Max_TX_Power",
            Self::VsReadTxPowerConfig => "HCI_VS_SiliconLabs_Read_Current_TX_Power_Configuration",
            Self::Raw { .. } => "HCI_Command",
        }
    }

    /// Convert the command to its raw parameter bytes
    fn parameters(&self) -> Vec<u8> {
        match self {
            Self::Reset | Self::LeTestEnd | Self::VsReadTxPowerConfig => vec![],

            Self::LeReceiverTestV2 {
                channel,
                phy,
                modulation_index,
            } => vec![*channel, *phy, *modulation_index],

            // CTE length, CTE type and switching pattern length are always
            // zero, so the antenna ID array is omitted entirely.
            Self::LeTransmitterTestV4 {
                channel,
                length,
                payload,
                phy,
                tx_power_level,
            } => vec![
                *channel,
                *length,
                *payload,
                *phy,
                0x00,
                0x00,
                0x00,
                *tx_power_level as u8,
            ],

            Self::VsGetCounters { reset } => vec![*reset as u8],

            Self::VsSetMinMaxTxPower { min_ddbm, max_ddbm } => {
                let mut params = vec![0u8; 4];
                LittleEndian::write_i16(&mut params[0..2], *min_ddbm);
                LittleEndian::write_i16(&mut params[2..4], *max_ddbm);
                params
            }

            Self::Raw { parameters, .. } => parameters.clone(),
        }
    }

    /// Convert the command to a raw HCI packet
    pub fn to_packet(&self) -> Result<Vec<u8>, HciError> {
        let params = self.parameters();
        if params.len() > HCI_MAX_PARAM_LEN {
            return Err(HciError::InvalidParamLength(params.len()));
        }

        let mut packet = Vec::with_capacity(4 + params.len());
        packet.push(HCI_COMMAND_PKT);
        packet.extend_from_slice(&self.opcode().to_le_bytes());
        packet.push(params.len() as u8);
        packet.extend_from_slice(&params);
        Ok(packet)
    }
}

/// HCI Event packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HciEvent {
    pub event_code: u8,
    pub parameter_total_length: u8,
    pub parameters: Vec<u8>,
}

impl HciEvent {
    /// Parse an HCI event from raw bytes (without the packet type indicator)
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < 2 {
            return None;
        }

        let event_code = data[0];
        let parameter_total_length = data[1];

        if data.len() < (parameter_total_length as usize + 2) {
            return None;
        }

        let parameters = data[2..(parameter_total_length as usize + 2)].to_vec();

        Some(HciEvent {
            event_code,
            parameter_total_length,
            parameters,
        })
    }

    /// Opcode and return parameters of a Command Complete event
    pub fn command_complete(&self) -> Option<(u16, &[u8])> {
        if self.event_code != EVT_CMD_COMPLETE || self.parameters.len() < 3 {
            return None;
        }
        let opcode = LittleEndian::read_u16(&self.parameters[1..3]);
        Some((opcode, &self.parameters[3..]))
    }

    /// Status and opcode of a Command Status event
    pub fn command_status(&self) -> Option<(u8, u16)> {
        if self.event_code != EVT_CMD_STATUS || self.parameters.len() < 4 {
            return None;
        }
        let opcode = LittleEndian::read_u16(&self.parameters[2..4]);
        Some((self.parameters[0], opcode))
    }
}

/// Read the leading status byte of a set of return parameters
pub fn parse_status(params: &[u8]) -> Result<u8, HciError> {
    params.first().copied().ok_or(HciError::InvalidPacketFormat)
}

/// Return parameters of HCI_LE_Test_End
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestEndReturn {
    pub status: u8,
    /// Packets received; always zero after a transmitter test
    pub num_packets: u16,
}

impl TestEndReturn {
    pub const SIZE: usize = 3;

    pub fn parse(params: &[u8]) -> Result<Self, HciError> {
        if params.len() < Self::SIZE {
            return Err(HciError::InvalidPacketFormat);
        }
        Ok(TestEndReturn {
            status: params[0],
            num_packets: LittleEndian::read_u16(&params[1..3]),
        })
    }
}

/// Return parameters of HCI_VS_SiliconLabs_Get_Counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendorCounters {
    pub status: u8,
    pub tx_packets: u16,
    pub rx_packets: u16,
    pub crc_errors: u16,
    pub failures: u16,
}

impl VendorCounters {
    pub const SIZE: usize = 9;

    pub fn parse(params: &[u8]) -> Result<Self, HciError> {
        if params.len() < Self::SIZE {
            return Err(HciError::InvalidPacketFormat);
        }
        Ok(VendorCounters {
            status: params[0],
            tx_packets: LittleEndian::read_u16(&params[1..3]),
            rx_packets: LittleEndian::read_u16(&params[3..5]),
            crc_errors: LittleEndian::read_u16(&params[5..7]),
            failures: LittleEndian::read_u16(&params[7..9]),
        })
    }
}

/// Return parameters of HCI_VS_SiliconLabs_Read_Current_TX_Power_Configuration
///
/// All power values are in 0.1 dBm units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxPowerConfig {
    pub status: u8,
    pub min_supported: i16,
    pub max_supported: i16,
    pub min_configured: i16,
    pub max_configured: i16,
    pub rf_path_compensation: i16,
}

impl TxPowerConfig {
    pub const SIZE: usize = 11;

    pub fn parse(params: &[u8]) -> Result<Self, HciError> {
        if params.len() < Self::SIZE {
            return Err(HciError::InvalidPacketFormat);
        }
        Ok(TxPowerConfig {
            status: params[0],
            min_supported: LittleEndian::read_i16(&params[1..3]),
            max_supported: LittleEndian::read_i16(&params[3..5]),
            min_configured: LittleEndian::read_i16(&params[5..7]),
            max_configured: LittleEndian::read_i16(&params[7..9]),
            rf_path_compensation: LittleEndian::read_i16(&params[9..11]),
        })
    }
}
