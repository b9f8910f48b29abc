use super::error::RuntimeError;
use crate::domain::{ContainerRuntime, ContainerSpec, ContainerState, remove_args, stop_args};
use anyhow::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Drives the docker CLI. Every call passes an explicit argument vector,
/// no shell is involved.
#[derive(Debug, Clone)]
pub struct DockerAdapter {
    binary: PathBuf,
}

impl DockerAdapter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn docker<I, S>(&self, args: I, context: &str) -> Result<Output, RuntimeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args
            .into_iter()
            .map(|item| item.as_ref().to_os_string())
            .collect();
        debug!("{} {:?}", self.binary.display(), args);

        Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RuntimeError::Spawn {
                binary: self.binary.clone(),
                context: context.to_string(),
                source,
            })
    }

    fn docker_checked<I, S>(&self, args: I, context: &str) -> Result<Output, RuntimeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.docker(args, context)?;
        ensure_success(output, context)
    }
}

impl ContainerRuntime for DockerAdapter {
    fn get_container_state(&self, name: &str) -> Result<ContainerState> {
        let context = format!("checking container {name}");
        let output = self.docker(
            [
                "container",
                "inspect",
                "--format",
                "{{.Name}}|{{.State.Running}}",
                name,
            ],
            &context,
        )?;

        if !output.status.success() {
            if is_missing_container(&output.stderr) {
                return Ok(ContainerState::NotCreated);
            }
            return Err(failure(&output, &context).into());
        }

        Ok(parse_inspect(&output.stdout, name))
    }

    fn stop_container(&self, name: &str) -> Result<()> {
        self.docker_checked(stop_args(name), &format!("stopping container {name}"))?;
        Ok(())
    }

    fn remove_container(&self, name: &str) -> Result<()> {
        self.docker_checked(remove_args(name), &format!("removing container {name}"))?;
        Ok(())
    }

    fn run_container(&self, spec: &ContainerSpec) -> Result<String> {
        let output = self.docker_checked(
            spec.run_args(),
            &format!("running container {} from {}", spec.name, spec.image),
        )?;

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Inspect also resolves ID prefixes, so only an exact name match counts.
/// Docker reports names with a leading `/`.
fn parse_inspect(stdout: &[u8], name: &str) -> ContainerState {
    let stdout = String::from_utf8_lossy(stdout);
    let Some((found, running)) = stdout.trim().split_once('|') else {
        return ContainerState::NotCreated;
    };

    if found.trim_start_matches('/') != name {
        debug!("'{name}' resolved to a different container ({found})");
        return ContainerState::NotCreated;
    }

    if running == "true" {
        ContainerState::Running
    } else {
        ContainerState::Stopped
    }
}

fn is_missing_container(stderr: &[u8]) -> bool {
    let stderr = String::from_utf8_lossy(stderr).to_lowercase();
    stderr.contains("no such container") || stderr.contains("no such object")
}

fn failure(output: &Output, context: &str) -> RuntimeError {
    RuntimeError::Failed {
        context: context.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

fn ensure_success(output: Output, context: &str) -> Result<Output, RuntimeError> {
    if output.status.success() {
        Ok(output)
    } else {
        Err(failure(&output, context))
    }
}
