use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Load a `.env` file into the process environment.
///
/// Variables already present in the process are never overwritten. The
/// result is returned rather than logged so callers can report it once the
/// tracing subscriber is installed; a missing file is not fatal.
pub fn load_dotenv() -> Result<PathBuf, dotenvy::Error> {
    dotenvy::dotenv()
}

/// Load settings for a service.
///
/// Sources, lowest precedence first: an optional
/// `configuration.{toml,yaml,json}` file, then the process environment.
/// Keys are matched case-insensitively against the target's field names,
/// so `MONGO_URI` fills `mongo_uri`. Empty variables count as unset.
pub fn load_settings<T: DeserializeOwned>() -> Result<T, AppError> {
    let settings = Cfg::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(Environment::default().try_parsing(true).ignore_empty(true))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default = "default_probe_port")]
        core_probe_port: u16,
        #[serde(default)]
        core_probe_name: Option<String>,
    }

    fn default_probe_port() -> u16 {
        8080
    }

    #[test]
    fn defaults_apply_when_unset() {
        let probe: Probe = load_settings().expect("settings should load");
        assert_eq!(probe.core_probe_port, 8080);
        assert!(probe.core_probe_name.is_none());
    }
}
