use crate::domain::LaunchRequest;
use clap::Args;

/// Flags shared by every launch subcommand
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Container name
    #[arg(long)]
    pub name: String,

    /// Host port to bind (1-65535)
    #[arg(long)]
    pub port: String,

    /// Store these options as a named profile before launching (not with --dry-run)
    #[arg(long, value_name = "PROFILE")]
    pub save_profile: Option<String>,
}

/// postgres, mysql and mongodb
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Database user (root user for mongodb)
    #[arg(long)]
    pub user: String,

    /// Database password (also the root password for mysql)
    #[arg(long)]
    pub password: String,

    /// Database to create
    #[arg(long)]
    pub db: String,

    /// Docker image (default depends on the database)
    #[arg(long)]
    pub image: Option<String>,
}

impl DatabaseArgs {
    pub fn to_request(&self) -> LaunchRequest {
        LaunchRequest {
            name: Some(self.common.name.clone()),
            image: self.image.clone(),
            port: Some(self.common.port.clone()),
            user: Some(self.user.clone()),
            password: Some(self.password.clone()),
            db: Some(self.db.clone()),
            env: Vec::new(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RedisArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Docker image (default: redis:7)
    #[arg(long)]
    pub image: Option<String>,
}

impl RedisArgs {
    pub fn to_request(&self) -> LaunchRequest {
        LaunchRequest {
            name: Some(self.common.name.clone()),
            image: self.image.clone(),
            port: Some(self.common.port.clone()),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CustomArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Docker image
    #[arg(long)]
    pub image: String,

    /// Environment variables (e.g. --env DEBUG=true LOG=info)
    #[arg(long, num_args = 1.., value_name = "KEY=VALUE")]
    pub env: Vec<String>,
}

impl CustomArgs {
    pub fn to_request(&self) -> LaunchRequest {
        LaunchRequest {
            name: Some(self.common.name.clone()),
            image: Some(self.image.clone()),
            port: Some(self.common.port.clone()),
            env: self.env.clone(),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct StopArgs {
    /// Container name
    #[arg(long)]
    pub name: String,
}
