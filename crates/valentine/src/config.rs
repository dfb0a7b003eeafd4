use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use keepsake::celebration::CelebrationSettings;
use keepsake::evasion::EvasionSettings;
use keepsake::feedback::FeedbackSettings;
use keepsake::navigator::Screen;
use keepsake::reveal::AssetPath;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub start_screen: Screen,
    /// Directory holding the `images/` folder.
    pub assets_dir: PathBuf,
    pub evasion: EvasionSettings,
    pub feedback: FeedbackSettings,
    pub celebration: CelebrationSettings,
    /// Shown as a link under the final message once every day is revealed.
    pub final_link: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_screen: Screen::Ask,
            assets_dir: PathBuf::from("."),
            evasion: EvasionSettings::default(),
            feedback: FeedbackSettings::default(),
            celebration: CelebrationSettings::default(),
            final_link: None,
        }
    }
}

impl Config {
    pub fn resolve_asset(&self, asset: &AssetPath) -> PathBuf {
        asset
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.assets_dir.clone(), |path, part| path.join(part))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "keepsake", "valentine").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("VALENTINE")
        .prefix_separator("_")
        .separator("__")
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_toml(source: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(source, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    write_default_config_to(&path)?;
    Ok(path)
}

fn write_default_config_to(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_matches_defaults() {
        let parsed = parse_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
        assert_eq!(parsed.evasion.proximity_radius, 80.0);
        assert_eq!(parsed.evasion.cooldown_ms, 150);
        assert_eq!(parsed.feedback.duration_ms, 2500);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let parsed = parse_toml(
            r#"
start_screen = "Calendar"
assets_dir = "/srv/valentine"

[evasion]
proximity_radius = 120.0
"#,
        )
        .unwrap();
        assert_eq!(parsed.start_screen, Screen::Calendar);
        assert_eq!(parsed.assets_dir, PathBuf::from("/srv/valentine"));
        assert_eq!(parsed.evasion.proximity_radius, 120.0);
        assert_eq!(parsed.evasion.cooldown_ms, 150);
        assert_eq!(parsed.celebration, CelebrationSettings::default());
        assert_eq!(parsed.final_link, None);
    }

    #[test]
    fn final_link_is_optional() {
        let parsed = parse_toml("final_link = \"https://example.org/surprise\"").unwrap();
        assert_eq!(
            parsed.final_link.as_deref(),
            Some("https://example.org/surprise")
        );
    }

    #[test]
    fn unknown_screen_is_rejected() {
        assert!(parse_toml("start_screen = \"lobby\"").is_err());
    }

    #[test]
    fn json_deserialization() {
        let parsed: Config =
            serde_json::from_str(r#"{"feedback": {"duration_ms": 1000}}"#).unwrap();
        assert_eq!(parsed.feedback.duration_ms, 1000);
        assert_eq!(parsed.feedback.asset, "images/emoji-disintegrating.gif");
    }

    #[test]
    fn assets_resolve_under_dir() {
        let config = Config {
            assets_dir: PathBuf::from("/srv/v"),
            ..Config::default()
        };
        let day = keepsake::reveal::Day::new(7).unwrap();
        assert_eq!(
            config.resolve_asset(&day.asset_path()),
            PathBuf::from("/srv/v/images/07.jpg")
        );
    }

    #[test]
    fn default_file_is_written_once() {
        let dir = std::env::temp_dir().join(format!("valentine-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        write_default_config_to(&path).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        fs_err::write(&path, "start_screen = \"calendar\"").unwrap();
        write_default_config_to(&path).unwrap();
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            "start_screen = \"calendar\""
        );
        let _ = fs_err::remove_dir_all(&dir);
    }
}
