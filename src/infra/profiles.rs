use crate::domain::request::validate_container_name;
use crate::domain::{DatabaseKind, LaunchRequest, ValidationError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PROFILE_EXTENSION: &str = "yaml";
const MASK: &str = "********";

/// A named, persisted launch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "type")]
    pub kind: DatabaseKind,
    #[serde(flatten)]
    pub request: LaunchRequest,
}

impl Profile {
    pub fn new(kind: DatabaseKind, request: LaunchRequest) -> Self {
        Self { kind, request }
    }

    /// Copy safe to print: the password and every `--env` value are masked
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        if masked.request.password.is_some() {
            masked.request.password = Some(MASK.to_string());
        }
        for entry in &mut masked.request.env {
            if let Some((key, _)) = entry.split_once('=') {
                *entry = format!("{key}={MASK}");
            }
        }
        masked
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yml::to_string(self).context("serializing profile")
    }
}

/// Profiles stored as `<dir>/<name>.yaml`
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> Result<PathBuf> {
        validate_container_name(name).context("invalid profile name")?;
        Ok(self.dir.join(format!("{name}.{PROFILE_EXTENSION}")))
    }

    /// Sorted profile names. A missing directory means no profiles.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries =
            fs::read_dir(&self.dir).with_context(|| format!("reading {:?}", self.dir))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.with_context(|| format!("reading {:?}", self.dir))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    pub fn load(&self, name: &str) -> Result<Profile> {
        let path = self.path(name)?;
        if !path.exists() {
            return Err(ValidationError::ProfileNotFound {
                name: name.to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
        serde_yml::from_str(&content).with_context(|| format!("parsing profile {:?}", path))
    }

    /// Writes the profile, replacing any previous one with the same name
    pub fn save(&self, name: &str, profile: &Profile) -> Result<PathBuf> {
        let path = self.path(name)?;
        fs::create_dir_all(&self.dir).with_context(|| format!("creating {:?}", self.dir))?;
        fs::write(&path, profile.to_yaml()?).with_context(|| format!("writing {:?}", path))?;
        Ok(path)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path(name)?;
        if !path.exists() {
            return Err(ValidationError::ProfileNotFound {
                name: name.to_string(),
            }
            .into());
        }
        fs::remove_file(&path).with_context(|| format!("removing {:?}", path))
    }
}
