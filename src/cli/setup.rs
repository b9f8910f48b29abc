use super::context::AppContext;
use crate::infra::config::install_default_config;
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

pub fn install(ctx: &AppContext) -> Result<()> {
    info!("Preparing config in {}", ctx.config_dir().display());

    let config_file = install_default_config(ctx.config_dir())?;

    let profiles_dir = ctx.config().profiles_dir(ctx.config_dir())?;
    fs::create_dir_all(&profiles_dir).with_context(|| format!("creating {:?}", profiles_dir))?;

    info!(
        "Config ready. Adjust {} as needed; profiles live in {}",
        config_file.display(),
        profiles_dir.display()
    );

    Ok(())
}
