#![warn(clippy::match_same_arms)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::unnecessary_wraps)]

#[macro_use]
mod util;
mod config;
mod consts;
mod device;
mod errors;
mod value;

use std::path::Path;

use tokio::fs::read_dir;

pub use crate::config::BriteConfig;
use crate::consts::*;
pub use crate::device::Backend;
use crate::device::Device;
pub use crate::errors::BriteError;
use crate::errors::*;
pub use crate::value::{BrightnessReading, Direction, Unit, ValueSpec};

make_log_macro!(debug, "brite");

/// Used to construct [`Brite`]
#[derive(Default)]
pub struct BriteBuilder<'a> {
    device: Option<&'a str>,
    backend: Option<Backend>,
    config: Option<BriteConfig>,
}

impl<'a> BriteBuilder<'a> {
    /// Create a new [`BriteBuilder`].
    pub fn new() -> Self {
        BriteBuilder::default()
    }

    /// Target a specific device instead of the first one found.
    pub fn with_device(mut self, device: &'a str) -> Self {
        self.device = Some(device);
        self
    }

    /// Override the backend from the config.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Defaults to [`BriteConfig::new()`].
    pub fn with_config(mut self, config: BriteConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Returns the constructed [`Brite`] instance.
    pub async fn build(self) -> Result<Brite> {
        let config = match self.config {
            Some(config) => config,
            None => BriteConfig::new().await?,
        };

        let device_name = match self.device.map(str::to_owned).or(config.device) {
            Some(name) => {
                if !Path::new(DEVICES_PATH).join(&name).is_dir() {
                    return Err(BriteError::NoDevice);
                }
                name
            }
            None => first_device().await?,
        };
        debug!("using device {device_name:?}");

        let backend = self.backend.unwrap_or(config.backend);
        Ok(Brite {
            device: Device::new(&device_name, backend).await?,
        })
    }
}

/// Name of the first device under [`DEVICES_PATH`], in sorted order so the
/// choice is stable across invocations.
async fn first_device() -> Result<String> {
    let mut sysfs_paths = read_dir(DEVICES_PATH)
        .await
        .map_err(|_| BriteError::NoDevice)?;

    let mut device_names = Vec::new();
    while let Some(sysfs_path) = sysfs_paths.next_entry().await? {
        device_names.push(sysfs_path.file_name().to_string_lossy().to_string());
    }
    device_names.sort();
    device_names.into_iter().next().ok_or(BriteError::NoDevice)
}

/// A handle on one backlight device.
///
/// Reading and writing are deliberately separate steps: a `set` re-reads the
/// live brightness, resolves the requested value against it and only then
/// writes, so nothing is ever computed from stale state.
pub struct Brite {
    device: Device,
}

impl Brite {
    /// Take a fresh reading of the current and maximum brightness.
    pub async fn read(&self) -> Result<BrightnessReading> {
        self.device.read().await
    }

    /// Apply an absolute brightness value, already clamped to the device range.
    pub async fn apply(&self, value: u32) -> Result<()> {
        self.device.write(value).await
    }

    /// Read, resolve and apply in one step. Returns the value written.
    pub async fn set(&self, spec: &ValueSpec) -> Result<u32> {
        let reading = self.read().await?;
        let value = spec.resolve(reading);
        self.apply(value).await?;
        Ok(value)
    }
}
