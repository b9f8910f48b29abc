pub mod args;
pub mod context;
pub mod profile;
pub mod setup;

use crate::domain::{DatabaseKind, ValidationError};
use crate::infra::RuntimeError;
use crate::infra::config::default_config_dir;
use anyhow::Result;
use args::{CustomArgs, DatabaseArgs, RedisArgs, StopArgs};
use clap::{ArgAction, Parser, Subcommand};
use profile::ProfileAction;
use std::path::PathBuf;

pub use context::AppContext;

/// Exit code for rejected input, matching clap's own usage errors
pub const EXIT_VALIDATION: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "dockdb",
    version,
    about = "Launch and manage database containers via Docker"
)]
pub struct Cli {
    /// Configuration directory (default: ~/.config/dockdb)
    #[arg(long, global = true, env = "DOCKDB_CONFIG_DIR", default_value_os_t = default_config_dir())]
    pub config_dir: PathBuf,

    /// Docker binary to invoke (path or name on PATH)
    #[arg(long, global = true, env = "DOCKDB_DOCKER")]
    pub docker: Option<PathBuf>,

    /// Print the docker commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch a PostgreSQL container
    Postgres(DatabaseArgs),
    /// Launch a MySQL container
    Mysql(DatabaseArgs),
    /// Launch a Redis container
    Redis(RedisArgs),
    /// Launch a MongoDB container
    #[command(alias = "mongo")]
    Mongodb(DatabaseArgs),
    /// Launch a container from any image
    Custom(CustomArgs),
    /// Stop and remove a container
    Stop(StopArgs),
    /// Manage saved launch profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Write the default config file and create the profiles directory
    Setup,
}

pub fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::new(&cli.config_dir, cli.docker.clone(), cli.dry_run)?;
    dispatch(&cli.command, &ctx)
}

pub fn dispatch(command: &Commands, ctx: &AppContext) -> Result<()> {
    match command {
        Commands::Postgres(args) => launch(ctx, DatabaseKind::Postgres, args),
        Commands::Mysql(args) => launch(ctx, DatabaseKind::Mysql, args),
        Commands::Mongodb(args) => launch(ctx, DatabaseKind::Mongodb, args),
        Commands::Redis(args) => ctx
            .launch(
                DatabaseKind::Redis,
                &args.to_request(),
                args.common.save_profile.as_deref(),
            )
            .map(drop),
        Commands::Custom(args) => ctx
            .launch(
                DatabaseKind::Custom,
                &args.to_request(),
                args.common.save_profile.as_deref(),
            )
            .map(drop),
        Commands::Stop(args) => ctx.stop(&args.name).map(drop),
        Commands::Profile { action } => profile::run(action, ctx),
        Commands::Setup => setup::install(ctx),
    }
}

fn launch(ctx: &AppContext, kind: DatabaseKind, args: &DatabaseArgs) -> Result<()> {
    ctx.launch(kind, &args.to_request(), args.common.save_profile.as_deref())
        .map(drop)
}

/// Process exit code for a failed command
pub fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if cause.downcast_ref::<ValidationError>().is_some() {
            return EXIT_VALIDATION;
        }
        if let Some(runtime_err) = cause.downcast_ref::<RuntimeError>() {
            return u8::try_from(runtime_err.exit_code()).unwrap_or(1);
        }
    }
    1
}
