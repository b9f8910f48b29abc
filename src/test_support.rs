use crate::domain::{ContainerRuntime, ContainerSpec, ContainerState};
use anyhow::{Result, bail};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct MockContainer {
    pub id: String,
    pub state: ContainerState,
    pub run_args: Vec<String>,
}

/// In-memory [`ContainerRuntime`] that records every call as `op:name`
#[derive(Debug, Default)]
pub struct MockRuntime {
    containers: RwLock<HashMap<String, MockContainer>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
    vanish_on_failure: RwLock<bool>,
    next_id: RwLock<u32>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_container(&self, name: &str, state: ContainerState) {
        let id = self.allocate_id(name);
        self.containers.write().unwrap().insert(
            name.to_string(),
            MockContainer {
                id,
                state,
                run_args: Vec::new(),
            },
        );
    }

    /// Makes the operation (`get_state`, `stop`, `remove`, `run`) fail
    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    /// A failing stop/remove also deletes the container, as if it went away concurrently
    pub fn vanish_on_failure(&self) {
        *self.vanish_on_failure.write().unwrap() = true;
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn container_exists(&self, name: &str) -> bool {
        self.containers.read().unwrap().contains_key(name)
    }

    pub fn get_state(&self, name: &str) -> Option<ContainerState> {
        self.containers
            .read()
            .unwrap()
            .get(name)
            .map(|c| c.state.clone())
    }

    pub fn container_id(&self, name: &str) -> Option<String> {
        self.containers
            .read()
            .unwrap()
            .get(name)
            .map(|c| c.id.clone())
    }

    /// Argument vector of the last `run` for `name`
    pub fn run_args(&self, name: &str) -> Option<Vec<String>> {
        self.containers
            .read()
            .unwrap()
            .get(name)
            .filter(|c| !c.run_args.is_empty())
            .map(|c| c.run_args.clone())
    }

    fn allocate_id(&self, name: &str) -> String {
        let mut next = self.next_id.write().unwrap();
        *next += 1;
        format!("mock-{name}-{}", *next)
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str, name: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                if *self.vanish_on_failure.read().unwrap() {
                    self.containers.write().unwrap().remove(name);
                }
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }
}

impl ContainerRuntime for MockRuntime {
    fn get_container_state(&self, name: &str) -> Result<ContainerState> {
        self.record_command(&format!("get_state:{}", name));
        self.check_fail("get_state", name)?;

        Ok(self
            .get_state(name)
            .unwrap_or(ContainerState::NotCreated))
    }

    fn stop_container(&self, name: &str) -> Result<()> {
        self.record_command(&format!("stop:{}", name));
        self.check_fail("stop", name)?;

        if let Some(container) = self.containers.write().unwrap().get_mut(name) {
            container.state = ContainerState::Stopped;
        }
        Ok(())
    }

    fn remove_container(&self, name: &str) -> Result<()> {
        self.record_command(&format!("remove:{}", name));
        self.check_fail("remove", name)?;

        self.containers.write().unwrap().remove(name);
        Ok(())
    }

    fn run_container(&self, spec: &ContainerSpec) -> Result<String> {
        self.record_command(&format!("run:{}", spec.name));
        self.check_fail("run", &spec.name)?;

        if self.container_exists(&spec.name) {
            bail!(
                "Mock conflict: container name \"{}\" is already in use",
                spec.name
            );
        }

        let id = self.allocate_id(&spec.name);
        self.containers.write().unwrap().insert(
            spec.name.clone(),
            MockContainer {
                id: id.clone(),
                state: ContainerState::Running,
                run_args: spec.run_args(),
            },
        );
        Ok(id)
    }
}
