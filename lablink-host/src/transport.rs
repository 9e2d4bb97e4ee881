//! Serial transport on the `serialport` crate
//!
//! The port is opened with a very short read timeout so that reads behave
//! as non-blocking polls; a read that times out reports zero bytes and the
//! link engine's own deadlines decide when to give up.

use std::fmt;
use std::io::{self, Read, Write};
use std::time::Duration;

use lablink_hal::serial::{DataBits, Parity, StopBits};
use lablink_hal::{SerialConfig, SerialRx, SerialTx};
use serialport::{SerialPort, SerialPortType};
use tracing::info;

use crate::error::HostError;

/// Read timeout of the underlying port; one poll waits at most this long
pub const POLL_TIMEOUT: Duration = Duration::from_millis(1);

/// Opened serial port
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialTransport {
    /// Open `name` with the given line settings
    ///
    /// A bare number is taken as a COM port number on Windows.
    pub fn open(name: &str, config: &SerialConfig) -> Result<Self, HostError> {
        let name = resolve_port_name(name);

        let port = serialport::new(&name, config.baudrate)
            .data_bits(match config.data_bits {
                DataBits::Seven => serialport::DataBits::Seven,
                DataBits::Eight => serialport::DataBits::Eight,
            })
            .parity(match config.parity {
                Parity::None => serialport::Parity::None,
                Parity::Even => serialport::Parity::Even,
                Parity::Odd => serialport::Parity::Odd,
            })
            .stop_bits(match config.stop_bits {
                StopBits::One => serialport::StopBits::One,
                StopBits::Two => serialport::StopBits::Two,
            })
            .flow_control(serialport::FlowControl::None)
            .timeout(POLL_TIMEOUT)
            .open()
            .map_err(|source| HostError::PortUnavailable {
                name: name.clone(),
                source,
            })?;

        info!(port = %name, baudrate = config.baudrate, "serial port opened");
        Ok(Self { port, name })
    }

    /// Resolved port name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SerialTx for SerialTransport {
    type Error = io::Error;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush()
    }
}

impl SerialRx for SerialTransport {
    type Error = io::Error;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if is_no_data(&e) => Ok(0),
            Err(e) => Err(e),
        }
    }
}

fn is_no_data(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

/// Map a configured port name onto the OS device name
///
/// `"3"` becomes `COM3` on Windows. COM ports there also get the `\\.\`
/// device prefix, which ports numbered 10 and above require. Other
/// platforms use the name unchanged.
pub fn resolve_port_name(name: &str) -> String {
    let name = name.trim();
    if cfg!(windows) {
        windows_port_name(name)
    } else {
        name.to_string()
    }
}

fn windows_port_name(name: &str) -> String {
    let numbered = !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit());
    let name = if numbered {
        format!("COM{}", name)
    } else {
        name.to_string()
    };
    if name.to_ascii_uppercase().starts_with("COM") {
        format!(r"\\.\{}", name)
    } else {
        name
    }
}

/// USB identity of a port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbDetails {
    pub vid: u16,
    pub pid: u16,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub serial_number: Option<String>,
}

/// One enumerated serial port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub name: String,
    pub usb: Option<UsbDetails>,
}

impl From<serialport::SerialPortInfo> for PortInfo {
    fn from(info: serialport::SerialPortInfo) -> Self {
        let usb = match info.port_type {
            SerialPortType::UsbPort(usb) => Some(UsbDetails {
                vid: usb.vid,
                pid: usb.pid,
                manufacturer: usb.manufacturer,
                product: usb.product,
                serial_number: usb.serial_number,
            }),
            _ => None,
        };
        Self {
            name: info.port_name,
            usb,
        }
    }
}

impl fmt::Display for PortInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        let Some(usb) = &self.usb else {
            return Ok(());
        };
        write!(f, " - USB (VID: 0x{:04x}, PID: 0x{:04x})", usb.vid, usb.pid)?;
        if let Some(product) = &usb.product {
            write!(f, " {}", product)?;
        }
        if let Some(manufacturer) = &usb.manufacturer {
            write!(f, " by {}", manufacturer)?;
        }
        if let Some(serial) = &usb.serial_number {
            write!(f, " [{}]", serial)?;
        }
        Ok(())
    }
}

/// Enumerate the serial ports present on this machine
pub fn list_ports() -> Result<Vec<PortInfo>, HostError> {
    let ports = serialport::available_ports().map_err(HostError::PortList)?;
    Ok(ports.into_iter().map(PortInfo::from).collect())
}
