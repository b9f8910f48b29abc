use crate::domain::{ContainerRuntime, ContainerSpec, DatabaseKind, LaunchRequest};
use crate::infra::config::{AppConfig, load_app_config};
use crate::infra::{DockerAdapter, Profile, ProfileStore, locate_docker};
use crate::services::{
    ContainerService, LaunchOutcome, PlannedCommand, StopOutcome, plan_launch, plan_stop,
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Everything a command needs: configuration, profiles and the runtime.
///
/// The docker binary is only resolved when a command actually talks to the
/// runtime, so validation errors and profile commands work without docker.
pub struct AppContext {
    config_dir: PathBuf,
    config: AppConfig,
    docker_override: Option<PathBuf>,
    dry_run: bool,
    runtime: OnceLock<Arc<dyn ContainerRuntime>>,
}

impl AppContext {
    pub fn new(config_dir: &Path, docker_override: Option<PathBuf>, dry_run: bool) -> Result<Self> {
        let config = load_app_config(config_dir)?;
        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            config,
            docker_override,
            dry_run,
            runtime: OnceLock::new(),
        })
    }

    /// Context backed by an already-built runtime
    pub fn with_runtime(
        config_dir: &Path,
        config: AppConfig,
        runtime: Arc<dyn ContainerRuntime>,
    ) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            config,
            docker_override: None,
            dry_run: false,
            runtime: OnceLock::from(runtime),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }

    pub fn profile_store(&self) -> Result<ProfileStore> {
        Ok(ProfileStore::new(self.config.profiles_dir(&self.config_dir)?))
    }

    fn docker_binary(&self) -> Result<PathBuf> {
        let configured = self.config.runtime_binary()?;
        Ok(locate_docker(
            self.docker_override.as_deref(),
            configured.as_deref(),
        )?)
    }

    fn runtime(&self) -> Result<Arc<dyn ContainerRuntime>> {
        if let Some(runtime) = self.runtime.get() {
            return Ok(runtime.clone());
        }

        let binary = self.docker_binary()?;
        debug!("using docker at {}", binary.display());
        let runtime: Arc<dyn ContainerRuntime> = Arc::new(DockerAdapter::new(binary));
        Ok(self.runtime.get_or_init(|| runtime).clone())
    }

    fn container_service(&self) -> Result<ContainerService> {
        Ok(ContainerService::new(self.runtime()?))
    }

    /// Validates `request` for `kind` with the configured image defaults
    pub fn validate(&self, kind: DatabaseKind, request: &LaunchRequest) -> Result<ContainerSpec> {
        Ok(ContainerSpec::from_request(
            kind,
            request,
            self.config.images.for_kind(kind),
        )?)
    }

    /// Validate, optionally save as a profile, then launch.
    /// A dry run only prints the plan and saves nothing. Returns `None` then.
    pub fn launch(
        &self,
        kind: DatabaseKind,
        request: &LaunchRequest,
        save_profile: Option<&str>,
    ) -> Result<Option<LaunchOutcome>> {
        let spec = self.validate(kind, request)?;

        if self.dry_run {
            if let Some(profile_name) = save_profile {
                info!("Dry run: profile '{profile_name}' not saved");
            }
            self.print_plan(&plan_launch(&spec));
            return Ok(None);
        }

        if let Some(profile_name) = save_profile {
            let path = self
                .profile_store()?
                .save(profile_name, &Profile::new(kind, spec.to_request()))?;
            info!("Profile '{profile_name}' saved to {}", path.display());
        }

        self.container_service()?.launch(&spec).map(Some)
    }

    /// Stop and remove. Returns `None` on a dry run.
    pub fn stop(&self, name: &str) -> Result<Option<StopOutcome>> {
        crate::domain::request::validate_container_name(name)?;

        if self.dry_run {
            self.print_plan(&plan_stop(name));
            return Ok(None);
        }

        self.container_service()?.stop_and_remove(name).map(Some)
    }

    pub fn launch_profile(&self, profile_name: &str) -> Result<Option<LaunchOutcome>> {
        let profile = self.profile_store()?.load(profile_name)?;
        info!("Launching profile '{profile_name}' ({})", profile.kind);
        self.launch(profile.kind, &profile.request, None)
    }

    fn print_plan(&self, plan: &[PlannedCommand]) {
        let binary = self
            .docker_binary()
            .unwrap_or_else(|_| PathBuf::from("docker"));
        for command in plan {
            println!("{}", command.display_with(&binary));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContainerState, ValidationError};
    use crate::test_support::MockRuntime;

    fn context(mock: &Arc<MockRuntime>) -> (AppContext, tempfile::TempDir) {
        let temp = tempfile::tempdir().unwrap();
        let ctx = AppContext::with_runtime(temp.path(), AppConfig::default(), mock.clone());
        (ctx, temp)
    }

    fn redis_request(name: &str, port: &str) -> LaunchRequest {
        LaunchRequest {
            name: Some(name.into()),
            port: Some(port.into()),
            ..Default::default()
        }
    }

    #[test]
    fn invalid_request_never_reaches_runtime() {
        let mock = Arc::new(MockRuntime::new());
        let (ctx, _temp) = context(&mock);

        let err = ctx
            .launch(DatabaseKind::Redis, &redis_request("cache", "70000"), None)
            .unwrap_err();

        assert!(err.downcast_ref::<ValidationError>().is_some());
        assert!(mock.get_commands().is_empty());
    }

    #[test]
    fn configured_image_is_used() {
        let mock = Arc::new(MockRuntime::new());
        let temp = tempfile::tempdir().unwrap();
        let config: AppConfig = toml::from_str("[images]\nredis = \"redis:7-alpine\"\n").unwrap();
        let ctx = AppContext::with_runtime(temp.path(), config, mock.clone());

        ctx.launch(DatabaseKind::Redis, &redis_request("cache", "6379"), None)
            .unwrap();

        let args = mock.run_args("cache").unwrap();
        assert_eq!(args.last().map(String::as_str), Some("redis:7-alpine"));
    }

    #[test]
    fn dry_run_does_not_touch_runtime() {
        let mock = Arc::new(MockRuntime::new());
        let (mut ctx, _temp) = context(&mock);
        ctx.set_dry_run(true);

        let outcome = ctx
            .launch(DatabaseKind::Redis, &redis_request("cache", "6379"), None)
            .unwrap();
        assert!(outcome.is_none());

        assert!(ctx.stop("cache").unwrap().is_none());
        assert!(mock.get_commands().is_empty());
    }

    #[test]
    fn saved_profile_launches_identically() {
        let mock = Arc::new(MockRuntime::new());
        let (ctx, _temp) = context(&mock);

        ctx.launch(
            DatabaseKind::Redis,
            &redis_request("cache", "6380"),
            Some("my-cache"),
        )
        .unwrap();
        let first = mock.run_args("cache").unwrap();

        ctx.launch_profile("my-cache").unwrap();
        let second = mock.run_args("cache").unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.get_state("cache"), Some(ContainerState::Running));
    }

    #[test]
    fn invalid_request_is_not_saved() {
        let mock = Arc::new(MockRuntime::new());
        let (ctx, _temp) = context(&mock);

        assert!(
            ctx.launch(
                DatabaseKind::Redis,
                &redis_request("cache", "abc"),
                Some("broken"),
            )
            .is_err()
        );
        assert!(ctx.profile_store().unwrap().list().unwrap().is_empty());
    }

    #[test]
    fn dry_run_does_not_save_profile() {
        let mock = Arc::new(MockRuntime::new());
        let (mut ctx, _temp) = context(&mock);
        ctx.set_dry_run(true);

        ctx.launch(
            DatabaseKind::Redis,
            &redis_request("cache", "6379"),
            Some("my-cache"),
        )
        .unwrap();

        assert!(ctx.profile_store().unwrap().list().unwrap().is_empty());
        assert!(mock.get_commands().is_empty());
    }

    #[test]
    fn stop_rejects_invalid_name() {
        let mock = Arc::new(MockRuntime::new());
        let (ctx, _temp) = context(&mock);

        assert!(ctx.stop("$(reboot)").is_err());
        assert!(mock.get_commands().is_empty());
    }
}
