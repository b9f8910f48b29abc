mod container_service;
pub mod plan;

pub use container_service::{ContainerService, LaunchOutcome, StopOutcome};
pub use plan::{PlannedCommand, plan_launch, plan_stop};
