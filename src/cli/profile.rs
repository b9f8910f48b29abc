use super::context::AppContext;
use anyhow::Result;
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileAction {
    /// List saved profiles
    List,
    /// Print a profile (password masked)
    Show { name: String },
    /// Launch the container described by a profile
    Launch { name: String },
    /// Delete a profile
    Delete { name: String },
}

pub fn run(action: &ProfileAction, ctx: &AppContext) -> Result<()> {
    let store = ctx.profile_store()?;

    match action {
        ProfileAction::List => {
            let names = store.list()?;
            if names.is_empty() {
                info!("No profiles in {}", store.dir().display());
            }
            for name in names {
                println!("{name}");
            }
        }
        ProfileAction::Show { name } => {
            let profile = store.load(name)?;
            print!("{}", profile.masked().to_yaml()?);
        }
        ProfileAction::Launch { name } => {
            ctx.launch_profile(name)?;
        }
        ProfileAction::Delete { name } => {
            store.delete(name)?;
            info!("Profile '{name}' deleted");
        }
    }

    Ok(())
}
