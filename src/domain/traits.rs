use super::{ContainerSpec, ContainerState};
use anyhow::Result;
use std::fmt::Debug;

/// Trait for container runtime operations
pub trait ContainerRuntime: Send + Sync + Debug {
    /// Get the current state of a container
    fn get_container_state(&self, name: &str) -> Result<ContainerState>;

    /// Stop a container. Fails if the runtime reports an error.
    fn stop_container(&self, name: &str) -> Result<()>;

    /// Remove a stopped container. Fails if the runtime reports an error.
    fn remove_container(&self, name: &str) -> Result<()>;

    /// Run a new detached container, returning the runtime's container id
    fn run_container(&self, spec: &ContainerSpec) -> Result<String>;
}
