//! Handlers shared by the unit tests

use core::cell::RefCell;
use core::sync::atomic::{AtomicUsize, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::{String, Vec};

use crate::error::Error;
use crate::handler::{Capabilities, ExportTarget, Handler};
use crate::staged::Staged;
use crate::value::{bytes_from_str, parse_bool, parse_int, str_from_bytes, str_from_value, Value};

/// "net" handler: staged `port` and `dhcp`, counts commits
pub struct NetConfig {
    pub port: Staged<CriticalSectionRawMutex, i32>,
    pub dhcp: Staged<CriticalSectionRawMutex, bool>,
    pub commits: AtomicUsize,
}

impl NetConfig {
    pub const fn new() -> Self {
        Self {
            port: Staged::new(0),
            dhcp: Staged::new(false),
            commits: AtomicUsize::new(0),
        }
    }
}

impl Handler for NetConfig {
    fn name(&self) -> &str {
        "net"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn get<'b>(&self, path: &[&str], buf: &'b mut [u8]) -> Result<&'b str, Error> {
        match path {
            ["port"] => str_from_value(&Value::Int32(self.port.staged()), buf),
            ["dhcp"] => str_from_value(&Value::Bool(self.dhcp.staged()), buf),
            _ => Err(Error::UnknownName),
        }
    }

    fn set(&self, path: &[&str], value: &str) -> Result<(), Error> {
        match path {
            ["port"] => self.port.stage(parse_int(value)?),
            ["dhcp"] => self.dhcp.stage(parse_bool(value)?),
            _ => return Err(Error::UnknownName),
        }
        Ok(())
    }

    fn commit(&self) -> Result<(), Error> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        self.port.apply();
        self.dhcp.apply();
        Ok(())
    }

    fn export(&self, _target: ExportTarget, sink: &mut dyn FnMut(&str, &str)) -> Result<(), Error> {
        let mut buf = [0u8; 12];
        sink("net/port", str_from_value(&Value::Int32(self.port.active()), &mut buf)?);
        sink("net/dhcp", str_from_value(&Value::Bool(self.dhcp.active()), &mut buf)?);
        Ok(())
    }
}

struct Credentials {
    ssid: String<32>,
    key: Vec<u8, 16>,
}

/// "wifi" handler: string ssid and a byte key hidden from display
pub struct WifiConfig {
    creds: Mutex<CriticalSectionRawMutex, RefCell<Credentials>>,
}

impl WifiConfig {
    pub const fn new() -> Self {
        Self {
            creds: Mutex::new(RefCell::new(Credentials {
                ssid: String::new(),
                key: Vec::new(),
            })),
        }
    }
}

impl Handler for WifiConfig {
    fn name(&self) -> &str {
        "wifi"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            commit: false,
            ..Capabilities::ALL
        }
    }

    fn get<'b>(&self, path: &[&str], buf: &'b mut [u8]) -> Result<&'b str, Error> {
        self.creds.lock(move |creds| {
            let creds = creds.borrow();
            match path {
                ["ssid"] => str_from_value(&Value::String(creds.ssid.as_str()), buf),
                ["key"] => str_from_bytes(&creds.key, buf),
                _ => Err(Error::UnknownName),
            }
        })
    }

    fn set(&self, path: &[&str], value: &str) -> Result<(), Error> {
        self.creds.lock(|creds| {
            let mut creds = creds.borrow_mut();
            match path {
                ["ssid"] => {
                    creds.ssid = String::try_from(value).map_err(|_| Error::BufferTooSmall)?;
                }
                ["key"] => {
                    let mut raw = [0u8; 16];
                    let decoded = bytes_from_str(value, &mut raw)?;
                    creds.key = Vec::from_slice(decoded).map_err(|_| Error::BufferTooSmall)?;
                }
                _ => return Err(Error::UnknownName),
            }
            Ok(())
        })
    }

    fn export(&self, target: ExportTarget, sink: &mut dyn FnMut(&str, &str)) -> Result<(), Error> {
        self.creds.lock(|creds| {
            let creds = creds.borrow();
            sink("wifi/ssid", creds.ssid.as_str());
            if target == ExportTarget::Persist {
                let mut buf = [0u8; 24];
                sink("wifi/key", str_from_bytes(&creds.key, &mut buf)?);
            }
            Ok(())
        })
    }
}

/// Commit-only handler with a fixed outcome
pub struct CommitCounter {
    name: &'static str,
    fail: Option<i32>,
    pub commits: AtomicUsize,
}

impl CommitCounter {
    pub const fn new(name: &'static str, fail: Option<i32>) -> Self {
        Self {
            name,
            fail,
            commits: AtomicUsize::new(0),
        }
    }
}

impl Handler for CommitCounter {
    fn name(&self) -> &str {
        self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            commit: true,
            ..Capabilities::default()
        }
    }

    fn commit(&self) -> Result<(), Error> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        match self.fail {
            Some(code) => Err(Error::Handler(code)),
            None => Ok(()),
        }
    }
}
