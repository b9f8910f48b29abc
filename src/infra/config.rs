use crate::domain::DatabaseKind;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "dockdb.toml";
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default_dockdb.toml");
pub const PROFILES_DIR_NAME: &str = "profiles";

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config/dockdb")
}

pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    fs::create_dir_all(config_dir).with_context(|| format!("creating {:?}", config_dir))
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub binary: Option<String>,
}

/// Per-kind image overrides. `custom` always needs an explicit image.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ImagesConfig {
    pub postgres: Option<String>,
    pub mysql: Option<String>,
    pub redis: Option<String>,
    #[serde(alias = "mongo")]
    pub mongodb: Option<String>,
}

impl ImagesConfig {
    pub fn for_kind(&self, kind: DatabaseKind) -> Option<&str> {
        match kind {
            DatabaseKind::Postgres => self.postgres.as_deref(),
            DatabaseKind::Mysql => self.mysql.as_deref(),
            DatabaseKind::Redis => self.redis.as_deref(),
            DatabaseKind::Mongodb => self.mongodb.as_deref(),
            DatabaseKind::Custom => None,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfilesConfig {
    pub dir: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub profiles: ProfilesConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(binary) = other.runtime.binary {
            self.runtime.binary = Some(binary);
        }
        if let Some(image) = other.images.postgres {
            self.images.postgres = Some(image);
        }
        if let Some(image) = other.images.mysql {
            self.images.mysql = Some(image);
        }
        if let Some(image) = other.images.redis {
            self.images.redis = Some(image);
        }
        if let Some(image) = other.images.mongodb {
            self.images.mongodb = Some(image);
        }
        if let Some(dir) = other.profiles.dir {
            self.profiles.dir = Some(dir);
        }
    }

    /// Configured docker binary with `~` and `$VARS` expanded
    pub fn runtime_binary(&self) -> Result<Option<PathBuf>> {
        self.runtime.binary.as_deref().map(expand_path).transpose()
    }

    /// Profiles directory, defaulting to `<config_dir>/profiles`
    pub fn profiles_dir(&self, config_dir: &Path) -> Result<PathBuf> {
        match self.profiles.dir.as_deref() {
            Some(dir) => expand_path(dir),
            None => Ok(config_dir.join(PROFILES_DIR_NAME)),
        }
    }
}

fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(raw).with_context(|| format!("expanding path {raw:?} from config"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("parsing {:?}", path))
}

/// Loads `<config_dir>/dockdb.toml` and merges `./dockdb.toml` on top.
/// Missing files are not an error.
pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    load_app_config_from(config_dir, Path::new("."))
}

pub fn load_app_config_from(config_dir: &Path, working_dir: &Path) -> Result<AppConfig> {
    let global_path = config_dir.join(DEFAULT_CONFIG_FILE_NAME);
    let mut app_config = if global_path.exists() {
        read_config(&global_path)?
    } else {
        AppConfig::default()
    };

    let local_path = working_dir.join(DEFAULT_CONFIG_FILE_NAME);
    if local_path.exists() && !same_file(&local_path, &global_path) {
        app_config.merge(read_config(&local_path)?);
    }

    Ok(app_config)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Writes the commented default config if none exists yet. Returns the
/// path of the config file.
pub fn install_default_config(config_dir: &Path) -> Result<PathBuf> {
    ensure_config_dir(config_dir)?;

    let target = config_dir.join(DEFAULT_CONFIG_FILE_NAME);
    if !target.exists() {
        fs::write(&target, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("writing template to {:?}", target))?;
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let toml = r#"
[runtime]
binary = "/opt/docker/bin/docker"

[images]
postgres = "postgres:17"
mongo = "mongo:8"

[profiles]
dir = "/srv/dockdb/profiles"
"#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.runtime_binary().unwrap(),
            Some(PathBuf::from("/opt/docker/bin/docker"))
        );
        assert_eq!(
            config.images.for_kind(DatabaseKind::Postgres),
            Some("postgres:17")
        );
        assert_eq!(
            config.images.for_kind(DatabaseKind::Mongodb),
            Some("mongo:8")
        );
        assert_eq!(config.images.for_kind(DatabaseKind::Redis), None);
        assert_eq!(config.images.for_kind(DatabaseKind::Custom), None);
        assert_eq!(
            config.profiles_dir(Path::new("/ignored")).unwrap(),
            PathBuf::from("/srv/dockdb/profiles")
        );
    }

    #[test]
    fn default_template_parses_to_defaults() {
        let config: AppConfig = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn rejects_unknown_sections() {
        let result = toml::from_str::<AppConfig>("[container]\nname = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn profiles_dir_defaults_under_config_dir() {
        let config = AppConfig::default();
        assert_eq!(
            config.profiles_dir(Path::new("/home/dev/.config/dockdb")).unwrap(),
            PathBuf::from("/home/dev/.config/dockdb/profiles")
        );
    }

    #[test]
    fn merge_overrides_only_present_values() {
        let mut base: AppConfig = toml::from_str(
            r#"
[runtime]
binary = "/usr/bin/docker"
[images]
postgres = "postgres:16"
redis = "redis:7"
"#,
        )
        .unwrap();
        let local: AppConfig = toml::from_str(
            r#"
[images]
redis = "redis:7-alpine"
"#,
        )
        .unwrap();

        base.merge(local);

        assert_eq!(base.runtime.binary.as_deref(), Some("/usr/bin/docker"));
        assert_eq!(base.images.postgres.as_deref(), Some("postgres:16"));
        assert_eq!(base.images.redis.as_deref(), Some("redis:7-alpine"));
    }

    #[test]
    fn loads_and_merges_local_file() {
        let config_dir = tempfile::tempdir().unwrap();
        let work_dir = tempfile::tempdir().unwrap();

        fs::write(
            config_dir.path().join(DEFAULT_CONFIG_FILE_NAME),
            "[images]\nmysql = \"mysql:8.4\"\n",
        )
        .unwrap();
        fs::write(
            work_dir.path().join(DEFAULT_CONFIG_FILE_NAME),
            "[runtime]\nbinary = \"podman\"\n",
        )
        .unwrap();

        let config = load_app_config_from(config_dir.path(), work_dir.path()).unwrap();
        assert_eq!(config.images.mysql.as_deref(), Some("mysql:8.4"));
        assert_eq!(config.runtime.binary.as_deref(), Some("podman"));
    }

    #[test]
    fn missing_files_give_defaults() {
        let config_dir = tempfile::tempdir().unwrap();
        let work_dir = tempfile::tempdir().unwrap();

        let config = load_app_config_from(config_dir.path(), work_dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn broken_file_reports_path() {
        let config_dir = tempfile::tempdir().unwrap();
        let work_dir = tempfile::tempdir().unwrap();
        fs::write(config_dir.path().join(DEFAULT_CONFIG_FILE_NAME), "[runtime\n").unwrap();

        let err = load_app_config_from(config_dir.path(), work_dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }

    #[test]
    fn installs_default_config_once() {
        let temp = tempfile::tempdir().unwrap();
        let config_dir = temp.path().join("dockdb");

        let path = install_default_config(&config_dir).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TOML);

        fs::write(&path, "[runtime]\nbinary = \"podman\"\n").unwrap();
        install_default_config(&config_dir).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("podman"));
    }
}
