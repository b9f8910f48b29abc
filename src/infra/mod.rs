pub mod config;
pub mod docker_adapter;
pub mod error;
pub mod locator;
pub mod profiles;

pub use docker_adapter::DockerAdapter;
pub use error::RuntimeError;
pub use locator::locate_docker;
pub use profiles::{Profile, ProfileStore};
