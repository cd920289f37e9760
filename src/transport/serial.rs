//! # Serial Device Transport
//!
//! Writes to printers exposed as serial-style device nodes: Bluetooth SPP
//! bound to `/dev/rfcommN`, USB-serial adapters at `/dev/ttyUSBN`, or
//! Windows `COMn` ports.
//!
//! ## Bluetooth Setup (Linux)
//!
//! ```bash
//! $ bluetoothctl pair 00:11:62:XX:XX:XX
//! $ sudo rfcomm bind 0 00:11:62:XX:XX:XX
//! # This creates /dev/rfcomm0
//! ```
//!
//! ## TTY Configuration
//!
//! On unix the device is switched to raw mode before writing so every byte
//! reaches the printer untouched: no CR/LF translation, 8-bit characters,
//! no XON/XOFF (QR payloads may contain 0x11 and 0x13).
//!
//! ## Single Write
//!
//! The whole job goes out in one `write_all` followed by a flush. Cheap
//! Bluetooth printers stall between small writes and may feed blank paper
//! if a job arrives in pieces.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{debug, info, instrument};

use super::DeviceTransport;
use crate::error::{CleanlinkError, Result};

/// Default device on this platform.
#[cfg(windows)]
pub const DEFAULT_DEVICE: &str = "COM10";

/// Default device on this platform.
#[cfg(not(windows))]
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Transport for serial-style device nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialTransport;

impl SerialTransport {
    pub fn new() -> Self {
        Self
    }

    /// Open the device write-only and configure it for raw output.
    fn open(device: &str) -> Result<File> {
        let path = device_path(device);
        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|e| CleanlinkError::open_failed(device, e))?;

        configure_tty_raw(&file).map_err(|e| CleanlinkError::open_failed(device, e))?;
        Ok(file)
    }
}

impl DeviceTransport for SerialTransport {
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    fn send(&self, device: &str, data: &[u8]) -> Result<()> {
        let mut file = Self::open(device)?;
        debug!("device opened");

        file.write_all(data)
            .and_then(|()| file.flush())
            .map_err(|e| CleanlinkError::write_failed(device, e))?;

        info!("job written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn probe(&self, device: &str) -> Result<()> {
        let path = device_path(device);
        OpenOptions::new()
            .write(true)
            .open(&path)
            .map(drop)
            .map_err(|e| CleanlinkError::open_failed(device, e))
    }
}

/// Map a device identifier to the path to open.
///
/// Windows only exposes `COM1`-`COM9` under their bare names; the `\\.\`
/// namespace prefix reaches every port number.
pub fn device_path(device: &str) -> PathBuf {
    if cfg!(windows) && is_com_port(device) {
        PathBuf::from(format!(r"\\.\{device}"))
    } else {
        PathBuf::from(device)
    }
}

/// `COM` followed by one or more digits, case-insensitive.
pub fn is_com_port(device: &str) -> bool {
    let upper = device.to_ascii_uppercase();
    upper
        .strip_prefix("COM")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Configure a file for raw TTY mode.
///
/// Regular files and other non-terminals are left alone, so the transport
/// can also write jobs to a plain file.
#[cfg(unix)]
fn configure_tty_raw(file: &File) -> io::Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    if unsafe { libc::isatty(fd) } != 1 {
        return Ok(());
    }

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> io::Result<()> {
    Ok(())
}
