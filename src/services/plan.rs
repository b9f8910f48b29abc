use crate::domain::{ContainerSpec, remove_args, stop_args};
use std::fmt;
use std::path::Path;

/// One docker invocation a command would perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommand {
    pub args: Vec<String>,
    /// Only issued when a container with the name already exists
    pub if_exists: bool,
}

impl PlannedCommand {
    /// Shell-quoted for display. Never fed to a shell.
    pub fn display_with<'a>(&'a self, binary: &'a Path) -> PlannedCommandDisplay<'a> {
        PlannedCommandDisplay {
            command: self,
            binary,
        }
    }
}

pub struct PlannedCommandDisplay<'a> {
    command: &'a PlannedCommand,
    binary: &'a Path,
}

impl fmt::Display for PlannedCommandDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binary = self.binary.to_string_lossy();
        let words =
            std::iter::once(&*binary).chain(self.command.args.iter().map(String::as_str));
        write!(f, "{}", shell_words::join(words))?;
        if self.command.if_exists {
            write!(f, "  # if it exists")?;
        }
        Ok(())
    }
}

pub fn plan_launch(spec: &ContainerSpec) -> Vec<PlannedCommand> {
    let mut plan = plan_stop(&spec.name);
    plan.push(PlannedCommand {
        args: spec.run_args(),
        if_exists: false,
    });
    plan
}

pub fn plan_stop(name: &str) -> Vec<PlannedCommand> {
    vec![
        PlannedCommand {
            args: stop_args(name),
            if_exists: true,
        },
        PlannedCommand {
            args: remove_args(name),
            if_exists: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatabaseKind, LaunchRequest};

    #[test]
    fn launch_plan_removes_then_runs() {
        let request = LaunchRequest {
            name: Some("web".into()),
            image: Some("nginx:alpine".into()),
            port: Some("8080".into()),
            env: vec!["GREETING=hello world".into()],
            ..Default::default()
        };
        let spec = ContainerSpec::from_request(DatabaseKind::Custom, &request, None).unwrap();

        let plan = plan_launch(&spec);
        let lines: Vec<String> = plan
            .iter()
            .map(|c| c.display_with(Path::new("docker")).to_string())
            .collect();

        assert_eq!(lines[0], "docker stop web  # if it exists");
        assert_eq!(lines[1], "docker rm web  # if it exists");
        assert!(lines[2].contains("'GREETING=hello world'"));

        let mut expected = vec!["docker".to_string()];
        expected.extend(spec.run_args());
        assert_eq!(shell_words::split(&lines[2]).unwrap(), expected);
    }

    #[test]
    fn run_args_stay_unquoted() {
        let request = LaunchRequest {
            name: Some("web".into()),
            image: Some("nginx".into()),
            port: Some("80".into()),
            env: vec!["CMD=$(whoami)".into()],
            ..Default::default()
        };
        let spec = ContainerSpec::from_request(DatabaseKind::Custom, &request, None).unwrap();
        let plan = plan_launch(&spec);

        assert!(plan[2].args.contains(&"CMD=$(whoami)".to_string()));
    }

    #[test]
    fn stop_plan_is_conditional() {
        let plan = plan_stop("pg1");
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|c| c.if_exists));
    }
}
