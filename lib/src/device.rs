use crate::consts::*;
use crate::errors::*;
use crate::util::*;
use crate::value::BrightnessReading;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use smart_default::SmartDefault;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use zbus::Connection;

make_log_macro!(debug, "device");

#[zbus::dbus_proxy(
    interface = "org.freedesktop.login1.Session",
    default_service = "org.freedesktop.login1",
    default_path = "/org/freedesktop/login1/session/auto"
)]
trait Session {
    fn set_brightness(&self, subsystem: &str, name: &str, brightness: u32) -> zbus::Result<()>;
}

/// How resolved brightness values are applied to the device.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Ask logind to apply the value via its `SetBrightness` session call.
    /// Works without write permission on the sysfs files.
    #[default]
    Session,
    /// Write the value straight to the device's `brightness` file.
    Direct,
}

/// A single backlight device under `/sys/class/backlight`.
pub struct Device {
    pub device_name: OsString,
    read_brightness_file: PathBuf,
    max_brightness_file: PathBuf,
    write_brightness_file: PathBuf,
    // Present only for `Backend::Session`.
    dbus_proxy: Option<SessionProxy<'static>>,
}

impl Device {
    pub async fn new(device_name: &str, backend: Backend) -> Result<Self> {
        let device_path = PathBuf::from(DEVICES_PATH).join(device_name);

        let dbus_proxy = match backend {
            Backend::Session => {
                let dbus_conn = Connection::system().await?;
                Some(SessionProxy::new(&dbus_conn).await?)
            }
            Backend::Direct => None,
        };

        Ok(Self {
            read_brightness_file: device_path.join({
                if device_path.ends_with("amdgpu_bl0") {
                    FILE_BRIGHTNESS_AMD
                } else {
                    FILE_BRIGHTNESS
                }
            }),
            max_brightness_file: device_path.join(FILE_MAX_BRIGHTNESS),
            write_brightness_file: device_path.join(FILE_BRIGHTNESS_WRITE),
            device_name: device_name.into(),
            dbus_proxy,
        })
    }

    /// Read an integer attribute from the given path.
    async fn read_attribute(&self, device_file: &Path) -> Result<u32> {
        let contents = read_file(device_file)
            .await
            .map_err(|source| BriteError::Read {
                file: device_file.to_path_buf(),
                source,
            })?;
        contents.parse().map_err(|source| BriteError::Malformed {
            file: device_file.to_path_buf(),
            source,
        })
    }

    /// Take a fresh reading of the current and maximum brightness.
    pub async fn read(&self) -> Result<BrightnessReading> {
        let max = self.read_attribute(&self.max_brightness_file).await?;
        if max == 0 {
            return Err(BriteError::Other(format!(
                "{:?} reports a maximum brightness of zero",
                self.device_name
            )));
        }
        let current = self.read_attribute(&self.read_brightness_file).await?;
        Ok(BrightnessReading::new(current, max))
    }

    /// Apply an already-resolved absolute brightness value.
    pub async fn write(&self, value: u32) -> Result<()> {
        debug!("setting {:?} to {value}", self.device_name);
        match &self.dbus_proxy {
            Some(dbus_proxy) => dbus_proxy
                .set_brightness(SUBSYSTEM, &self.device_name.to_string_lossy(), value)
                .await
                .map_err(BriteError::from),
            None => {
                let mut file = OpenOptions::new()
                    .write(true)
                    .truncate(true)
                    .open(&self.write_brightness_file)
                    .await
                    .map_err(|source| BriteError::Write {
                        file: self.write_brightness_file.clone(),
                        source,
                    })?;
                file.write_all(value.to_string().as_bytes())
                    .await
                    .map_err(|source| BriteError::Write {
                        file: self.write_brightness_file.clone(),
                        source,
                    })
            }
        }
    }
}
