pub mod cli;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{
    ContainerRuntime, ContainerSpec, ContainerState, DatabaseKind, LaunchRequest, ValidationError,
};
pub use infra::{DockerAdapter, ProfileStore, RuntimeError};
pub use services::{ContainerService, LaunchOutcome, StopOutcome};
