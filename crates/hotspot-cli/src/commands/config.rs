//! Config command and config file resolution shared by the other commands.

use std::path::{Path, PathBuf};

use hotspot_core::config::default_config_path;
use hotspot_core::HotspotConfig;

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::error::{CliError, ConfigError};
use crate::output::get_formatter;

/// Config file in effect: the explicit one, else the platform default.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(default_config_path)
}

/// Load the effective configuration.
///
/// An explicit path must exist; the default location may be absent, in which
/// case built-in defaults apply.
pub async fn load_config(
    explicit: Option<&Path>,
) -> Result<(HotspotConfig, Option<PathBuf>), CliError> {
    if let Some(path) = explicit {
        let config = HotspotConfig::load(path).await?;
        return Ok((config, Some(path.to_path_buf())));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            let config = HotspotConfig::load(&path).await?;
            Ok((config, Some(path)))
        }
        _ => Ok((HotspotConfig::default(), None)),
    }
}

/// Run the config command
pub async fn run_config(
    args: ConfigArgs,
    explicit: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    match args.command {
        ConfigCommands::Show => {
            let (config, path) = load_config(explicit).await?;
            println!("{}", formatter.format_config(&config, path.as_deref()));
        }
        ConfigCommands::Path => {
            let path = config_path(explicit).ok_or_else(|| {
                CliError::Other("Could not determine a config directory".to_string())
            })?;
            println!("{}", formatter.format_message(&path.display().to_string()));
        }
        ConfigCommands::Init(init) => {
            let path = config_path(explicit).ok_or_else(|| {
                CliError::Other("Could not determine a config directory".to_string())
            })?;
            init_config(&path, init.force).await?;
            println!(
                "{}",
                formatter.format_message(&format!("Wrote default config to {}", path.display()))
            );
        }
    }

    Ok(())
}

async fn init_config(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.display().to_string()).into());
    }

    HotspotConfig::default().save(path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_refuses_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hotspot.json");

        init_config(&path, false).await.unwrap();
        assert!(path.exists());

        let err = init_config(&path, false).await.unwrap_err();
        assert!(format!("{}", err).contains("already exists"));

        init_config(&path, true).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_explicit_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hotspot.json");
        std::fs::write(&path, r#"{"port": 17001, "label": "bench"}"#).unwrap();

        let (config, used) = load_config(Some(&path)).await.unwrap();
        assert_eq!(config.port, 17001);
        assert_eq!(config.label, "bench");
        assert_eq!(used, Some(path));
    }

    #[tokio::test]
    async fn test_missing_explicit_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope.json");

        let err = load_config(Some(&path)).await.unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_codes::CONFIG_ERROR);
    }
}
