//! SIGINT/SIGTERM handling
//!
//! The handlers only raise a flag. The test loop polls it, ends the running
//! test and reports, so an interrupted run still prints its packet count.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::{mem, ptr};

static STOP: AtomicBool = AtomicBool::new(false);

extern "C" fn on_signal(_: libc::c_int) {
    STOP.store(true, Ordering::SeqCst);
}

/// Install the handlers and return the flag they raise
///
/// No SA_RESTART, so a pending `select()` returns EINTR instead of
/// blocking past the signal.
pub fn install() -> io::Result<&'static AtomicBool> {
    for signal in [libc::SIGINT, libc::SIGTERM] {
        let result = unsafe {
            let mut action: libc::sigaction = mem::zeroed();
            action.sa_sigaction = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
            action.sa_flags = 0;
            libc::sigemptyset(&mut action.sa_mask);
            libc::sigaction(signal, &action, ptr::null_mut())
        };
        if result < 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(&STOP)
}
