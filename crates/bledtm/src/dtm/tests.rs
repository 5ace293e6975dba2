//! Unit tests for Direct Test Mode parameters and sessions

use super::params::*;
use super::session::{wait, DtmSession};
use crate::error::{DtmError, HciError};
use crate::hci::mock::{command_status, MockTransport};
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

const RESET: u16 = 0x0C03;
const TEST_END: u16 = 0x201F;
const RX_TEST_V2: u16 = 0x2033;
const TX_TEST_V4: u16 = 0x207B;
const VS_GET_COUNTERS: u16 = 0xFC12;
const VS_SET_TX_POWER: u16 = 0xFC14;
const VS_READ_TX_POWER: u16 = 0xFC17;

fn counters(status: u8, tx_packets: u16) -> Vec<u8> {
    let mut params = vec![status];
    params.extend_from_slice(&tx_packets.to_le_bytes());
    params.extend_from_slice(&[0x00; 6]);
    params
}

#[test]
fn test_channel_range() {
    assert_eq!(Channel::new(0).unwrap().frequency_mhz(), 2402);
    assert_eq!(Channel::new(19).unwrap().frequency_mhz(), 2440);
    assert_eq!(Channel::new(39).unwrap().frequency_mhz(), 2480);

    let err = Channel::new(40).unwrap_err();
    assert!(matches!(err, DtmError::InvalidChannel(40)));
    assert_eq!(err.to_string(), "Error in channel: max value 39");
}

#[test]
fn test_phy_values() {
    assert_eq!(Phy::from_raw(1).unwrap(), Phy::Le1M);
    assert_eq!(Phy::from_raw(4).unwrap(), Phy::LeCodedS2);
    assert_eq!(u8::from(Phy::LeCodedS8), 0x03);

    for bad in [0u8, 5, 0xFF] {
        assert!(matches!(Phy::from_raw(bad), Err(DtmError::InvalidPhy(v)) if v == bad));
    }
    assert_eq!(
        Phy::from_raw(5).unwrap_err().to_string(),
        "Error! Invalid phy argument, 0x05"
    );
}

#[test]
fn test_tx_power_range() {
    assert_eq!(tx_power(20).unwrap(), 20);
    assert_eq!(tx_power(-127).unwrap(), -127);
    assert_eq!(tx_power(0).unwrap(), 0);
    assert!(matches!(tx_power(21), Err(DtmError::InvalidPower(21))));
    assert!(matches!(tx_power(-128), Err(DtmError::PowerTooLow(-128))));
}

#[test]
fn test_default_params() {
    let params = TestParams::default();
    assert_eq!(params.mode, TestMode::Transmit);
    assert_eq!(params.channel.index(), 0);
    assert_eq!(params.phy, Phy::Le1M);
    assert_eq!(params.payload_type(), Some(PayloadType::Prbs9));
    assert_eq!(params.length, 25);
    assert_eq!(params.power_dbm, 5);
    assert!(params.is_infinite());

    let custom = TestParams {
        payload: 0x42,
        ..TestParams::default()
    };
    assert_eq!(custom.payload_type(), None);
}

#[test]
fn test_transmit_session() {
    let mut transport = MockTransport::new();
    transport
        .complete(RESET, &[0x00])
        .complete(VS_GET_COUNTERS, &counters(0, 0))
        .complete(TX_TEST_V4, &[0x00])
        .complete(TEST_END, &[0x00, 0x00, 0x00])
        .complete(VS_GET_COUNTERS, &counters(0, 1234));

    let params = TestParams {
        channel: Channel::new(10).unwrap(),
        phy: Phy::Le2M,
        payload: 0x03,
        length: 37,
        power_dbm: -4,
        duration: Duration::from_millis(5),
        ..TestParams::default()
    };
    let stop = AtomicBool::new(false);

    let mut session = DtmSession::new(&mut transport);
    session.reset().unwrap();
    let report = session.run(&params, &stop).unwrap();

    assert_eq!(report.mode, TestMode::Transmit);
    assert_eq!(report.packets, 1234);
    assert_eq!(report.counters.unwrap().tx_packets, 1234);

    assert_eq!(
        transport.sent_opcodes(),
        vec![RESET, VS_GET_COUNTERS, TX_TEST_V4, TEST_END, VS_GET_COUNTERS]
    );
    assert_eq!(
        transport.sent[2].to_packet().unwrap()[4..],
        [10, 37, 0x03, 0x02, 0, 0, 0, 0xFC]
    );
    // Counters are cleared before the test and only read after it
    assert_eq!(transport.sent[1].to_packet().unwrap()[4], 1);
    assert_eq!(transport.sent[4].to_packet().unwrap()[4], 0);
}

#[test]
fn test_receive_session() {
    let mut transport = MockTransport::new();
    transport
        .complete(RX_TEST_V2, &[0x00])
        .complete(TEST_END, &[0x00, 0xE8, 0x03]);

    let params = TestParams {
        mode: TestMode::Receive,
        channel: Channel::new(39).unwrap(),
        phy: Phy::LeCodedS8,
        ..TestParams::default()
    };
    // Already raised: an infinite test returns straight away
    let stop = AtomicBool::new(true);

    let report = DtmSession::new(&mut transport).run(&params, &stop).unwrap();
    assert_eq!(report.mode, TestMode::Receive);
    assert_eq!(report.packets, 1000);
    assert!(report.counters.is_none());

    assert_eq!(transport.sent_opcodes(), vec![RX_TEST_V2, TEST_END]);
    assert_eq!(transport.sent[0].to_packet().unwrap()[4..], [39, 0x03, 0x00]);
}

#[test]
fn test_reset_failure() {
    let mut transport = MockTransport::new();
    transport.complete(RESET, &[0x03]);

    let err = DtmSession::new(&mut transport).reset().unwrap_err();
    assert!(matches!(
        err,
        DtmError::CommandStatus {
            command: "HCI_Reset",
            status: 0x03
        }
    ));
}

#[test]
fn test_transmit_rejected() {
    let mut transport = MockTransport::new();
    transport
        .complete(VS_GET_COUNTERS, &counters(0, 0))
        .complete(TX_TEST_V4, &[0x12]);

    let stop = AtomicBool::new(true);
    let err = DtmSession::new(&mut transport)
        .run(&TestParams::default(), &stop)
        .unwrap_err();

    assert_eq!(err.to_string(), "HCI_LE_Transmitter_Test_v4 hci req status = 0x12");
    // No test was started, so none is ended
    assert_eq!(transport.sent_opcodes(), vec![VS_GET_COUNTERS, TX_TEST_V4]);
}

#[test]
fn test_counter_reset_rejected() {
    let mut transport = MockTransport::new();
    transport.complete(VS_GET_COUNTERS, &counters(0x01, 0));

    let err = DtmSession::new(&mut transport)
        .start(&TestParams::default())
        .unwrap_err();
    assert!(matches!(
        err,
        DtmError::CommandStatus {
            command: "HCI_VS_SiliconLabs_Get_Counters",
            status: 0x01
        }
    ));
    assert_eq!(transport.sent_opcodes(), vec![VS_GET_COUNTERS]);
}

#[test]
fn test_receiver_command_status_failure() {
    let mut transport = MockTransport::new();
    transport.respond(RX_TEST_V2, vec![command_status(RX_TEST_V2, 0x11)]);

    let params = TestParams {
        mode: TestMode::Receive,
        ..TestParams::default()
    };
    let err = DtmSession::new(&mut transport).start(&params).unwrap_err();
    assert!(matches!(
        err,
        DtmError::Hci(HciError::CommandFailed {
            opcode: RX_TEST_V2,
            status: 0x11
        })
    ));
}

#[test]
fn test_end_failure() {
    let mut transport = MockTransport::new();
    transport.complete(TEST_END, &[0x0C, 0x00, 0x00]);

    let err = DtmSession::new(&mut transport)
        .finish(TestMode::Receive)
        .unwrap_err();
    assert_eq!(err.to_string(), "HCI_LE_Test_End hci req status = 0xc");
}

#[test]
fn test_end_short_response() {
    let mut transport = MockTransport::new();
    transport.complete(TEST_END, &[0x00]);

    let err = DtmSession::new(&mut transport)
        .finish(TestMode::Receive)
        .unwrap_err();
    assert!(matches!(err, DtmError::Hci(HciError::InvalidPacketFormat)));
}

#[test]
fn test_session_timeout() {
    let mut transport = MockTransport::new();

    let err = DtmSession::new(&mut transport)
        .with_timeout(Duration::from_millis(10))
        .reset()
        .unwrap_err();
    assert!(matches!(err, DtmError::Hci(HciError::Timeout(RESET))));
}

#[test]
fn test_tx_power_vendor_commands() {
    let mut transport = MockTransport::new();
    transport
        .complete(VS_SET_TX_POWER, &[0x00])
        .complete(
            VS_READ_TX_POWER,
            &[0x00, 0x9C, 0xFF, 0xC8, 0x00, 0x32, 0x00, 0x32, 0x00, 0x00, 0x00],
        );

    let mut session = DtmSession::new(&mut transport);
    session.set_tx_power_limits(50).unwrap();
    let config = session.read_tx_power_config().unwrap();

    assert_eq!(config.min_supported, -100);
    assert_eq!(config.max_supported, 200);
    assert_eq!(config.min_configured, 50);
    assert_eq!(config.max_configured, 50);
    assert_eq!(config.rf_path_compensation, 0);

    assert_eq!(
        transport.sent[0].to_packet().unwrap()[4..],
        [0x32, 0x00, 0x32, 0x00]
    );
}

#[test]
fn test_tx_power_limits_rejected() {
    let mut transport = MockTransport::new();
    transport.complete(VS_SET_TX_POWER, &[0x12]);

    let err = DtmSession::new(&mut transport)
        .set_tx_power_limits(300)
        .unwrap_err();
    assert!(matches!(err, DtmError::CommandStatus { status: 0x12, .. }));
}

#[test]
fn test_timed_wait() {
    let stop = AtomicBool::new(false);
    let start = Instant::now();
    wait(Duration::from_millis(20), &stop);
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn test_wait_stops_on_flag() {
    let stop = AtomicBool::new(true);
    let start = Instant::now();
    wait(Duration::from_secs(10), &stop);
    assert!(start.elapsed() < Duration::from_secs(1));

    wait(Duration::ZERO, &stop);
}
