//! Direct Test Mode session
//!
//! Drives a controller through reset, test start, the test period and test
//! end, one request at a time.

use crate::dtm::params::{TestMode, TestParams};
use crate::error::DtmError;
use crate::hci::packet::{parse_status, HciCommand, TestEndReturn, VendorCounters};
use crate::hci::request::{send_request, HCI_TIMEOUT};
use crate::hci::transport::HciTransport;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Polling interval while waiting for a test to end
const WAIT_POLL: Duration = Duration::from_millis(1);

/// Outcome of a finished test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestReport {
    pub mode: TestMode,
    /// Packets transmitted (TX) or received (RX)
    pub packets: u16,
    /// Vendor counters, read after a transmitter test
    pub counters: Option<VendorCounters>,
}

/// A controller being driven through Direct Test Mode
pub struct DtmSession<'a, T: HciTransport> {
    transport: &'a mut T,
    timeout: Duration,
}

impl<'a, T: HciTransport> DtmSession<'a, T> {
    pub fn new(transport: &'a mut T) -> Self {
        DtmSession {
            transport,
            timeout: HCI_TIMEOUT,
        }
    }

    /// Override the per-request deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send a command and return its raw return parameters
    pub(crate) fn request(&mut self, command: &HciCommand) -> Result<Vec<u8>, DtmError> {
        Ok(send_request(&mut *self.transport, command, self.timeout)?)
    }

    /// Send a command whose return parameters are a single status byte
    fn request_status(&mut self, command: &HciCommand) -> Result<(), DtmError> {
        let params = self.request(command)?;
        DtmError::check(command.name(), parse_status(&params)?)
    }

    /// Reset the controller
    pub fn reset(&mut self) -> Result<(), DtmError> {
        info!("resetting controller");
        self.request_status(&HciCommand::Reset)
    }

    /// Start the transmitter test described by `params`
    ///
    /// The vendor packet counters are cleared first so the count read back
    /// at the end covers only this test.
    pub fn start_transmit(&mut self, params: &TestParams) -> Result<(), DtmError> {
        self.reset_counters()?;

        info!(
            "starting transmitter test on channel {} ({})",
            params.channel.index(),
            params.phy
        );
        self.request_status(&HciCommand::LeTransmitterTestV4 {
            channel: params.channel.index(),
            length: params.length,
            payload: params.payload,
            phy: params.phy.into(),
            tx_power_level: params.power_dbm,
        })
    }

    /// Start the receiver test described by `params`
    pub fn start_receive(&mut self, params: &TestParams) -> Result<(), DtmError> {
        info!(
            "starting receiver test on channel {} ({})",
            params.channel.index(),
            params.phy
        );
        self.request_status(&HciCommand::LeReceiverTestV2 {
            channel: params.channel.index(),
            phy: params.phy.into(),
            modulation_index: 0,
        })
    }

    /// Start whichever test `params.mode` selects
    pub fn start(&mut self, params: &TestParams) -> Result<(), DtmError> {
        match params.mode {
            TestMode::Transmit => self.start_transmit(params),
            TestMode::Receive => self.start_receive(params),
        }
    }

    /// End the running test and collect its packet count
    pub fn finish(&mut self, mode: TestMode) -> Result<TestReport, DtmError> {
        let command = HciCommand::LeTestEnd;
        let end = TestEndReturn::parse(&self.request(&command)?)?;
        DtmError::check(command.name(), end.status)?;
        debug!("test ended, {} packets reported", end.num_packets);

        match mode {
            TestMode::Transmit => {
                let counters = self.read_counters()?;
                Ok(TestReport {
                    mode,
                    packets: counters.tx_packets,
                    counters: Some(counters),
                })
            }
            TestMode::Receive => Ok(TestReport {
                mode,
                packets: end.num_packets,
                counters: None,
            }),
        }
    }

    /// Start the test, wait for it to run, then end it
    ///
    /// Raising `stop` cuts the wait short; the test is still ended and
    /// reported normally.
    pub fn run(&mut self, params: &TestParams, stop: &AtomicBool) -> Result<TestReport, DtmError> {
        self.start(params)?;
        wait(params.duration, stop);
        self.finish(params.mode)
    }
}

/// Sleep for `duration`, or until `stop` is raised when `duration` is zero
///
/// A raised `stop` also ends a timed wait early.
pub fn wait(duration: Duration, stop: &AtomicBool) {
    let deadline = if duration.is_zero() {
        None
    } else {
        Some(Instant::now() + duration)
    };

    while !stop.load(Ordering::SeqCst) {
        let step = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return;
                }
                remaining.min(WAIT_POLL)
            }
            None => WAIT_POLL,
        };
        thread::sleep(step);
    }
    debug!("wait interrupted");
}
