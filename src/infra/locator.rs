use super::error::RuntimeError;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Install locations checked before falling back to `PATH`
pub const KNOWN_DOCKER_PATHS: &[&str] = &[
    "/usr/bin/docker",
    "/usr/local/bin/docker",
    r"C:\Program Files\Docker\Docker\resources\bin\docker.exe",
];

/// Resolves the docker binary.
///
/// Order: explicit path (flag or env), configured path, known install
/// locations, then `PATH`. An explicit or configured path that does not
/// exist is an error rather than a silent fallback.
pub fn locate_docker(
    explicit: Option<&Path>,
    configured: Option<&Path>,
) -> Result<PathBuf, RuntimeError> {
    let known: Vec<PathBuf> = KNOWN_DOCKER_PATHS.iter().map(PathBuf::from).collect();
    locate_in(explicit.or(configured), &known, env::var_os("PATH"))
}

fn locate_in(
    pinned: Option<&Path>,
    known: &[PathBuf],
    path_var: Option<OsString>,
) -> Result<PathBuf, RuntimeError> {
    if let Some(pinned) = pinned {
        if pinned.is_file() {
            return Ok(pinned.to_path_buf());
        }
        // A bare name like "podman" is looked up on PATH
        if pinned.components().count() == 1 {
            if let Some(found) = search_path(pinned.as_os_str(), path_var.as_ref()) {
                return Ok(found);
            }
        }
        return Err(RuntimeError::MissingBinary {
            binary: pinned.to_path_buf(),
        });
    }

    if let Some(found) = known.iter().find(|p| p.is_file()) {
        debug!("docker found at {}", found.display());
        return Ok(found.clone());
    }

    let exe = if cfg!(windows) { "docker.exe" } else { "docker" };
    if let Some(found) = search_path(OsStr::new(exe), path_var.as_ref()) {
        debug!("docker found on PATH at {}", found.display());
        return Ok(found);
    }

    let mut searched = known.to_vec();
    searched.push(PathBuf::from("$PATH"));
    Err(RuntimeError::NotFound { searched })
}

fn search_path(exe: &OsStr, path_var: Option<&OsString>) -> Option<PathBuf> {
    let path_var = path_var?;
    env::split_paths(path_var)
        .map(|dir| dir.join(exe))
        .find(|candidate| candidate.is_file())
}
