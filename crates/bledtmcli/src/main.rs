mod args;
mod signal;

use args::Args;
use bledtm::{DtmSession, HciSocket, TestMode, TestParams, TestReport, TxPowerConfig};
use clap::Parser;
use log::{debug, error};
use std::error::Error;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    if args.version {
        println!("blehcitest version {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let stop = match signal::install() {
        Ok(stop) => stop,
        Err(e) => {
            error!("Could not install signal handler: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(port) = args.hci_port else {
        println!("HCI port not specified: use --hci_port to specify the number of the hci port");
        return ExitCode::FAILURE;
    };

    match run(&args, port, stop) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, port: u16, stop: &AtomicBool) -> Result<TestReport, Box<dyn Error>> {
    println!("Opening hci port {}", port);
    let mut socket = HciSocket::open(port)?;
    let mut session = DtmSession::new(&mut socket);

    session.reset()?;

    if args.power_config {
        print_power_config(&session.read_tx_power_config()?);
    }

    let params = args.test_params();
    match params.mode {
        TestMode::Transmit => {
            if args.limit_power {
                debug!("pinning tx power to {} dBm", params.power_dbm);
                session.set_tx_power_limits(params.power_dbm as i16 * 10)?;
            }
            print_transmit_header(&params);
        }
        TestMode::Receive => {
            println!(
                "DTM receive enabled, freq={} MHz, phy=0x{:02X}",
                params.channel.frequency_mhz(),
                u8::from(params.phy)
            );
        }
    }

    if params.is_infinite() {
        println!("Infinite mode. Press control-c to exit...");
    }

    Ok(session.run(&params, stop)?)
}

fn print_transmit_header(params: &TestParams) {
    println!(
        "Outputting modulation type 0x{:02X} for {} ms at {} MHz at {} dBm, phy=0x{:02X}",
        params.payload,
        params.duration.as_millis(),
        params.channel.frequency_mhz(),
        params.power_dbm,
        u8::from(params.phy)
    );
    if let Some(payload) = params.payload_type() {
        debug!("payload {}, {} byte packets, {}", payload, params.length, params.phy);
    }
}

fn print_power_config(config: &TxPowerConfig) {
    println!("min supported tx power = {}", config.min_supported);
    println!("max supported tx power = {}", config.max_supported);
    println!("min configured tx power = {}", config.min_configured);
    println!("max configured tx power = {}", config.max_configured);
    println!("tx RF path compensation = {}", config.rf_path_compensation);
}

fn print_report(report: &TestReport) {
    match report.mode {
        TestMode::Transmit => println!(
            "Test completed successfully. Number of packets transmitted = {}",
            report.packets
        ),
        TestMode::Receive => println!(
            "Test completed successfully. Number of packets received = {}",
            report.packets
        ),
    }
    if let Some(counters) = &report.counters {
        debug!(
            "rx packets {}, crc errors {}, failures {}",
            counters.rx_packets, counters.crc_errors, counters.failures
        );
    }
}
