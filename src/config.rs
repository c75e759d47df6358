use std::env;
use std::ffi::OsString;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clinica";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const ADDR_VAR: &str = "CLINICA_ADDR";
const DB_VAR: &str = "CLINICA_DB";

/// Default `EnvFilter` directive when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,clinica=debug"
}

/// Get the application data directory
/// ~/Clinica/ on all platforms (user-visible, next to the user's files)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Clinica")
}

/// Default database location inside the data directory.
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("clinica.db")
}

/// Rejected `CLINICA_ADDR` value.
#[derive(Debug, thiserror::Error)]
#[error("invalid CLINICA_ADDR '{value}': {source}")]
pub struct InvalidListenAddr {
    pub value: String,
    source: std::net::AddrParseError,
}

/// Runtime settings, read from the environment with defaults that work
/// out of the box.
#[derive(Debug, Clone)]
pub struct Settings {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
}

impl Settings {
    /// Read `CLINICA_ADDR` and `CLINICA_DB`.
    pub fn from_env() -> Result<Self, InvalidListenAddr> {
        Self::from_vars(env::var(ADDR_VAR).ok(), env::var_os(DB_VAR))
    }

    fn from_vars(
        addr: Option<String>,
        db_path: Option<OsString>,
    ) -> Result<Self, InvalidListenAddr> {
        let addr = match addr {
            Some(value) => value
                .parse()
                .map_err(|source| InvalidListenAddr { value, source })?,
            None => SocketAddr::from(([127, 0, 0, 1], 8080)),
        };
        let db_path = db_path.map(PathBuf::from).unwrap_or_else(default_db_path);
        Ok(Self { addr, db_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Clinica"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn settings_default_without_overrides() {
        let settings = Settings::from_vars(None, None).unwrap();
        assert_eq!(settings.addr, "127.0.0.1:8080".parse().unwrap());
        assert!(settings.db_path.ends_with("clinica.db"));
        assert!(settings.db_path.starts_with(app_data_dir()));
    }

    #[test]
    fn settings_honor_overrides() {
        let settings = Settings::from_vars(
            Some("0.0.0.0:9000".to_string()),
            Some(OsString::from("/tmp/clinic-test.db")),
        )
        .unwrap();
        assert_eq!(settings.addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(settings.db_path, PathBuf::from("/tmp/clinic-test.db"));
    }

    #[test]
    fn settings_reject_garbage_addr() {
        let err = Settings::from_vars(Some("not-an-addr".to_string()), None).unwrap_err();
        assert!(err.to_string().contains("not-an-addr"));
    }
}
