//! Silicon Labs vendor extension (AN1328)
//!
//! Packet counters and transmit power limits that the standard test
//! commands do not expose.

use crate::dtm::session::DtmSession;
use crate::error::DtmError;
use crate::hci::packet::{parse_status, HciCommand, TxPowerConfig, VendorCounters};
use crate::hci::transport::HciTransport;
use log::debug;

impl<T: HciTransport> DtmSession<'_, T> {
    fn get_counters(&mut self, reset: bool) -> Result<VendorCounters, DtmError> {
        let command = HciCommand::VsGetCounters { reset };
        let counters = VendorCounters::parse(&self.request(&command)?)?;
        DtmError::check(command.name(), counters.status)?;
        Ok(counters)
    }

    /// Clear the controller's packet counters
    pub fn reset_counters(&mut self) -> Result<(), DtmError> {
        debug!("resetting vendor packet counters");
        self.get_counters(true).map(|_| ())
    }

    /// Read the controller's packet counters without clearing them
    pub fn read_counters(&mut self) -> Result<VendorCounters, DtmError> {
        let counters = self.get_counters(false)?;
        debug!("vendor counters: {:?}", counters);
        Ok(counters)
    }

    /// Pin both the minimum and maximum transmit power to `ddbm` (0.1 dBm)
    pub fn set_tx_power_limits(&mut self, ddbm: i16) -> Result<(), DtmError> {
        let command = HciCommand::VsSetMinMaxTxPower {
            min_ddbm: ddbm,
            max_ddbm: ddbm,
        };
        let status = parse_status(&self.request(&command)?)?;
        DtmError::check(command.name(), status)
    }

    /// Read the supported and configured transmit power range
    pub fn read_tx_power_config(&mut self) -> Result<TxPowerConfig, DtmError> {
        let command = HciCommand::VsReadTxPowerConfig;
        let config = TxPowerConfig::parse(&self.request(&command)?)?;
        DtmError::check(command.name(), config.status)?;
        Ok(config)
    }
}
