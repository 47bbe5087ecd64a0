use std::path::PathBuf;

use tracing::warn;
use tracing_subscriber::EnvFilter;

pub const ZIVID_CAMERA_CONFIG_ENV_NAME: &str = "ZIVID_CAMERA_CONFIG_PATH";

/// Get node config path from input or env ZIVID_CAMERA_CONFIG_PATH
pub fn get_config_path(config: Option<PathBuf>) -> Option<PathBuf> {
    if config.is_some() {
        config
    } else {
        std::env::var(ZIVID_CAMERA_CONFIG_ENV_NAME)
            .map(|s| {
                warn!("### ENV VAR {} is used ###", s);
                PathBuf::from(s)
            })
            .ok()
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (`info` if unset).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_config_path() {
        let path = get_config_path(Some(PathBuf::from("a.toml")));
        assert_eq!(path.unwrap(), PathBuf::from("a.toml"));

        std::env::set_var(ZIVID_CAMERA_CONFIG_ENV_NAME, "b.toml");
        let path = get_config_path(Some(PathBuf::from("a.toml")));
        assert_eq!(path.unwrap(), PathBuf::from("a.toml"));
        let path = get_config_path(None);
        assert_eq!(path.unwrap(), PathBuf::from("b.toml"));
        std::env::remove_var(ZIVID_CAMERA_CONFIG_ENV_NAME);

        assert!(get_config_path(None).is_none());
    }
}
