//! HCI Socket implementation for Bluetooth communication
//!
//! This module provides a wrapper around the raw HCI socket interface,
//! allowing for communication with Bluetooth controllers.

use crate::error::HciError;
use crate::hci::constants::*;
use crate::hci::packet::{HciCommand, HciEvent};
use crate::hci::transport::HciTransport;
use log::trace;
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::Duration;

// Bluetooth socket constants
const AF_BLUETOOTH: i32 = 31;
const BTPROTO_HCI: i32 = 1;
const HCI_CHANNEL_RAW: i32 = 0;

/// Represents an HCI socket
#[derive(Debug)]
pub struct HciSocket {
    fd: RawFd,
    dev_id: u16,
}

// Define the sockaddr_hci structure
#[repr(C)]
struct SockaddrHci {
    hci_family: libc::sa_family_t,
    hci_dev: u16,
    hci_channel: u16,
}

/// Kernel-side event filter for raw HCI sockets (`struct hci_filter`)
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HciFilter {
    pub type_mask: u32,
    pub event_mask: [u32; 2],
    pub opcode: u16,
}

impl HciFilter {
    /// Filter passing the events a command can be answered with
    pub fn for_command(opcode: u16) -> Self {
        let mut filter = HciFilter {
            opcode: opcode.to_le(),
            ..Default::default()
        };
        filter.set_packet_type(HCI_EVENT_PKT);
        filter.set_event(EVT_CMD_STATUS);
        filter.set_event(EVT_CMD_COMPLETE);
        filter.set_event(EVT_LE_META_EVENT);
        filter
    }

    fn set_packet_type(&mut self, ptype: u8) {
        self.type_mask |= 1u32 << (ptype & 31);
    }

    fn set_event(&mut self, event: u8) {
        self.event_mask[(event >> 5) as usize] |= 1u32 << (event & 31);
    }
}

impl HciSocket {
    /// Gets the raw file descriptor for the socket
    pub fn as_raw_fd(&self) -> RawFd {
        self.fd
    }

    /// The controller index this socket is bound to
    pub fn dev_id(&self) -> u16 {
        self.dev_id
    }

    /// Opens a new HCI socket
    ///
    /// # Arguments
    ///
    /// * `dev_id` - The device ID to open (0 for hci0, 1 for hci1, ...)
    ///
    /// # Returns
    ///
    /// A new `HciSocket` instance or an error if the socket could not be opened
    pub fn open(dev_id: u16) -> Result<Self, HciError> {
        // Open a raw HCI socket
        let fd = unsafe {
            libc::socket(
                AF_BLUETOOTH,
                libc::SOCK_RAW | libc::SOCK_CLOEXEC,
                BTPROTO_HCI,
            )
        };

        if fd < 0 {
            return Err(HciError::SocketError(std::io::Error::last_os_error()));
        }

        // Bind to the specified device
        let addr = SockaddrHci {
            hci_family: AF_BLUETOOTH as libc::sa_family_t,
            hci_dev: dev_id,
            hci_channel: HCI_CHANNEL_RAW as u16,
        };

        let result = unsafe {
            libc::bind(
                fd,
                &addr as *const _ as *const libc::sockaddr,
                std::mem::size_of::<SockaddrHci>() as libc::socklen_t,
            )
        };

        if result < 0 {
            let err = std::io::Error::last_os_error();
            unsafe { libc::close(fd) };
            return Err(HciError::BindError(err));
        }

        Ok(HciSocket { fd, dev_id })
    }

    /// Install a kernel event filter on the socket
    pub fn set_filter(&self, filter: &HciFilter) -> Result<(), HciError> {
        let result = unsafe {
            libc::setsockopt(
                self.fd,
                SOL_HCI,
                HCI_FILTER,
                filter as *const _ as *const libc::c_void,
                std::mem::size_of::<HciFilter>() as libc::socklen_t,
            )
        };

        if result < 0 {
            return Err(HciError::FilterError(std::io::Error::last_os_error()));
        }
        Ok(())
    }

    /// Read an HCI event from the socket
    pub fn read_event(&self) -> Result<HciEvent, HciError> {
        let mut buffer = [0u8; HCI_MAX_EVENT_SIZE];

        let bytes_read = unsafe {
            libc::read(
                self.fd,
                buffer.as_mut_ptr() as *mut libc::c_void,
                buffer.len(),
            )
        };

        if bytes_read < 0 {
            return Err(HciError::ReceiveError(std::io::Error::last_os_error()));
        }

        let bytes_read = bytes_read as usize;
        if bytes_read < 3 || buffer[0] != HCI_EVENT_PKT {
            return Err(HciError::InvalidPacketFormat);
        }
        trace!("hci{} < {}", self.dev_id, hex::encode(&buffer[..bytes_read]));

        HciEvent::parse(&buffer[1..bytes_read]).ok_or(HciError::InvalidPacketFormat)
    }

    /// Wait up to `timeout` for an event
    ///
    /// Returns `Ok(None)` when nothing arrived in time or the wait was
    /// interrupted by a signal.
    pub fn read_event_timeout(&self, timeout: Duration) -> Result<Option<HciEvent>, HciError> {
        // Set up the fd_set for select()
        let mut read_fds: libc::fd_set = unsafe { std::mem::zeroed() };
        unsafe {
            libc::FD_ZERO(&mut read_fds);
            libc::FD_SET(self.fd, &mut read_fds);
        }

        let mut timeout_val = libc::timeval {
            tv_sec: timeout.as_secs() as libc::time_t,
            tv_usec: timeout.subsec_micros() as libc::suseconds_t,
        };

        let result = unsafe {
            libc::select(
                self.fd + 1,
                &mut read_fds,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                &mut timeout_val,
            )
        };

        if result < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                return Ok(None);
            }
            return Err(HciError::ReceiveError(err));
        }

        if result == 0 {
            return Ok(None);
        }

        self.read_event().map(Some)
    }

    /// Sends an HCI command to the controller
    pub fn send_command(&self, command: &HciCommand) -> Result<(), HciError> {
        let packet = command.to_packet()?;
        trace!("hci{} > {}", self.dev_id, hex::encode(&packet));
        match unsafe {
            libc::write(
                self.fd,
                packet.as_ptr() as *const libc::c_void,
                packet.len(),
            )
        } {
            -1 => Err(HciError::SendError(std::io::Error::last_os_error())),
            _ => Ok(()),
        }
    }
}

impl HciTransport for HciSocket {
    fn prepare(&mut self, opcode: u16) -> Result<(), HciError> {
        self.set_filter(&HciFilter::for_command(opcode))
    }

    fn send_command(&mut self, command: &HciCommand) -> Result<(), HciError> {
        HciSocket::send_command(self, command)
    }

    fn read_event_timeout(&mut self, timeout: Duration) -> Result<Option<HciEvent>, HciError> {
        HciSocket::read_event_timeout(self, timeout)
    }
}

impl AsRawFd for HciSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl Drop for HciSocket {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}
