mod container;
mod error;
mod kind;
pub mod request;
pub mod traits;

pub use container::{ContainerSpec, ContainerState, remove_args, stop_args};
pub use error::ValidationError;
pub use kind::DatabaseKind;
pub use request::LaunchRequest;
pub use traits::ContainerRuntime;
