use crate::device::Backend;
use crate::errors::*;
use crate::util::*;

use serde::Deserialize;
use smart_default::SmartDefault;

make_log_macro!(debug, "config");

/// Loaded from `<config_dir>/brite/config.toml` when present; command line
/// flags take precedence over these values.
#[derive(Deserialize, Clone, Debug, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct BriteConfig {
    /// Name of the backlight device under /sys/class/backlight.
    /// Defaults to the first device found.
    pub device: Option<String>,

    /// How brightness changes are applied.
    pub backend: Backend,
}

impl BriteConfig {
    pub async fn new() -> Result<Self> {
        if let Some(config_path) = find_file("config", Some("brite"), Some("toml")) {
            debug!("loading {}", config_path.display());
            deserialize_toml_file(config_path).await
        } else {
            Ok(BriteConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_session_backend_and_no_device() {
        let config = BriteConfig::default();
        assert_eq!(config.backend, Backend::Session);
        assert!(config.device.is_none());
    }

    #[test]
    fn deserializes_from_toml() {
        let config: BriteConfig =
            toml::from_str("device = \"intel_backlight\"\nbackend = \"direct\"").unwrap();
        assert_eq!(config.device.as_deref(), Some("intel_backlight"));
        assert_eq!(config.backend, Backend::Direct);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<BriteConfig>("brightness = 4").is_err());
    }
}
