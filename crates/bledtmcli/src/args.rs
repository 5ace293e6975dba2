use bledtm::dtm::params::{DEFAULT_PACKET_LENGTH, DEFAULT_TX_POWER_DBM};
use bledtm::{Channel, Phy, TestMode, TestParams};
use clap::Parser;
use std::time::Duration;

/// Drive a Bluetooth LE controller into Direct Test Mode over HCI.
///
/// Runs the LE transmitter or receiver test on an HCI attached controller,
/// then prints the number of packets sent or received. Packet counters for
/// the transmitter test come from the Silicon Labs vendor commands.
#[derive(Parser, Debug)]
#[command(name = "blehcitest", about)]
pub struct Args {
    /// Print version number
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Test duration in milliseconds, 0 runs until interrupted (control-c)
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub time: u64,

    /// Payload type: 0 PRBS9, 1 11110000, 2 10101010, 3 PRBS15,
    /// 4 11111111, 5 00000000, 6 00001111, 7 01010101
    #[arg(long = "packet_type", value_name = "TYPE", default_value = "0", value_parser = parse_packet_type)]
    pub packet_type: u8,

    /// Transmit power in 1 dBm steps, max 20
    #[arg(long, value_name = "DBM", default_value_t = DEFAULT_TX_POWER_DBM, allow_negative_numbers = true, value_parser = parse_power)]
    pub power: i8,

    /// Channel index, frequency = 2402 MHz + 2 * channel
    #[arg(long, value_name = "INDEX", default_value = "0", value_parser = parse_channel)]
    pub channel: Channel,

    /// Test packet length in bytes
    #[arg(long, value_name = "LEN", default_value_t = DEFAULT_PACKET_LENGTH)]
    pub len: u8,

    /// Run the receiver test and print the number of packets received
    #[arg(long)]
    pub rx: bool,

    /// PHY: 1 1Mbps, 2 2Mbps, 3 125k LR coded (S=8), 4 500k LR coded (S=2)
    #[arg(long, value_name = "PHY", default_value = "1", value_parser = parse_phy)]
    pub phy: Phy,

    /// Index of the controller's HCI device (0 = hci0, 1 = hci1, ...)
    #[arg(long = "hci_port", value_name = "PORT")]
    pub hci_port: Option<u16>,

    /// Print the controller's transmit power configuration after reset
    #[arg(long = "power_config")]
    pub power_config: bool,

    /// Pin the controller's min and max transmit power to --power before a transmit test
    #[arg(long = "limit_power")]
    pub limit_power: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    pub fn test_params(&self) -> TestParams {
        TestParams {
            mode: if self.rx {
                TestMode::Receive
            } else {
                TestMode::Transmit
            },
            channel: self.channel,
            phy: self.phy,
            payload: self.packet_type,
            length: self.len,
            power_dbm: self.power,
            duration: Duration::from_millis(self.time),
        }
    }
}

/// Parse an integer the way `strtoul` does with base 0: `0x` hex, leading
/// `0` octal, decimal otherwise.
fn parse_int(s: &str) -> Result<i64, String> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let parsed = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16)
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8)
    } else {
        digits.parse::<i64>()
    };

    let value = parsed.map_err(|e| format!("'{}' is not a number: {}", s, e))?;
    Ok(if negative { -value } else { value })
}

fn parse_packet_type(s: &str) -> Result<u8, String> {
    let value = parse_int(s)?;
    u8::try_from(value).map_err(|_| format!("packet type {} does not fit in a byte", value))
}

fn parse_power(s: &str) -> Result<i8, String> {
    let value = parse_int(s)?;
    let value = i16::try_from(value).map_err(|_| format!("power level {} out of range", value))?;
    bledtm::dtm::tx_power(value).map_err(|e| e.to_string())
}

fn parse_channel(s: &str) -> Result<Channel, String> {
    let value = parse_int(s)?;
    let index = u8::try_from(value).map_err(|_| "Error in channel: max value 39".to_string())?;
    Channel::new(index).map_err(|e| e.to_string())
}

fn parse_phy(s: &str) -> Result<Phy, String> {
    let value = parse_int(s)?;
    let raw = u8::try_from(value)
        .map_err(|_| format!("Error! Invalid phy argument, {}", value))?;
    Phy::from_raw(raw).map_err(|e| e.to_string())
}
