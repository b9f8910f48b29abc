use crate::domain::{ContainerRuntime, ContainerSpec, ContainerState};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Created { id: String },
    Replaced { id: String, was_running: bool },
}

impl LaunchOutcome {
    pub fn id(&self) -> &str {
        match self {
            Self::Created { id } | Self::Replaced { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Removed,
    NotFound,
}

/// Idempotent container lifecycle on top of a [`ContainerRuntime`]
pub struct ContainerService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl ContainerService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Runs `spec`, first stopping and removing any container with the same name
    pub fn launch(&self, spec: &ContainerSpec) -> Result<LaunchOutcome> {
        let state = self.runtime.get_container_state(&spec.name)?;

        let replaced = match state {
            ContainerState::NotCreated => None,
            ContainerState::Running => {
                warn!(
                    "Container '{}' is running and will be replaced. Data not kept in a volume is lost.",
                    spec.name
                );
                self.stop_and_remove_existing(&spec.name)?;
                Some(true)
            }
            ContainerState::Stopped => {
                info!("Container '{}' already exists. Replacing it...", spec.name);
                self.stop_and_remove_existing(&spec.name)?;
                Some(false)
            }
        };

        info!(
            "Starting container '{}' from image '{}'...",
            spec.name, spec.image
        );
        let id = self.runtime.run_container(spec)?;
        info!(
            "Container '{}' is now running on port {}.",
            spec.name,
            spec.port_mapping()
        );

        Ok(match replaced {
            None => LaunchOutcome::Created { id },
            Some(was_running) => LaunchOutcome::Replaced { id, was_running },
        })
    }

    /// Stops and removes `name`. A container that does not exist is not an error.
    pub fn stop_and_remove(&self, name: &str) -> Result<StopOutcome> {
        if !self.runtime.get_container_state(name)?.exists() {
            info!("Container '{name}' does not exist. Nothing to stop.");
            return Ok(StopOutcome::NotFound);
        }

        self.stop_and_remove_existing(name)?;
        Ok(StopOutcome::Removed)
    }

    fn stop_and_remove_existing(&self, name: &str) -> Result<()> {
        info!("Stopping and removing container '{name}'...");

        if let Err(e) = self.runtime.stop_container(name) {
            self.tolerate_if_gone(name, e)?;
        }
        if let Err(e) = self.runtime.remove_container(name) {
            self.tolerate_if_gone(name, e)?;
        }

        info!("Container '{name}' removed.");
        Ok(())
    }

    // The container may disappear between the state check and the call
    // (e.g. started with --rm). Only a still-present container is a failure.
    fn tolerate_if_gone(&self, name: &str, error: anyhow::Error) -> Result<()> {
        match self.runtime.get_container_state(name) {
            Ok(ContainerState::NotCreated) => {
                debug!("Container '{name}' vanished: {error:#}");
                Ok(())
            }
            _ => Err(error),
        }
    }
}
