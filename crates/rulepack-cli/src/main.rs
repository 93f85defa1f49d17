use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use rulepack_installer::{default_home_dir, Scope};

mod commands;
mod config;
mod render;
mod select;
mod summary;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "rulepack", version)]
#[command(about = "Install and upgrade Claude workflow rules", long_about = None)]
struct Cli {
    /// Project root for the project scope (defaults to the current directory)
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install rule files from the remote repository
    Add {
        #[arg(long, value_enum, default_value = "project")]
        scope: CliScope,
        /// Core rule files to install, by file name
        #[arg(long = "core", value_name = "NAME")]
        core: Vec<String>,
        /// Language stacks whose rule files to install
        #[arg(long = "stack", value_name = "NAME")]
        stacks: Vec<String>,
        /// Install every core rule and every stack
        #[arg(long)]
        all: bool,
        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        repo: RepoOverrides,
    },
    /// Upgrade installed rule files in both scopes
    Upgrade {
        /// Overwrite locally modified files
        #[arg(long)]
        force: bool,
        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        repo: RepoOverrides,
    },
    /// List installed rule files with their versions
    List,
    /// Show resolved directories and metadata health
    Doctor,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct RepoOverrides {
    /// Repository owner override
    #[arg(long)]
    owner: Option<String>,
    /// Repository name override
    #[arg(long)]
    repo: Option<String>,
    /// Branch override
    #[arg(long)]
    branch: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum CliScope {
    Project,
    Global,
}

impl From<CliScope> for Scope {
    fn from(scope: CliScope) -> Self {
        match scope {
            CliScope::Project => Scope::Project,
            CliScope::Global => Scope::Global,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_root = match &cli.project_root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };

    match cli.command {
        Commands::Add {
            scope,
            core,
            stacks,
            all,
            dry_run,
            repo,
        } => {
            let home_dir = default_home_dir()?;
            let repo_config = config::load_repo_config(&home_dir)?.with_overrides(repo);
            commands::run_add_command(
                scope.into(),
                &project_root,
                &home_dir,
                &repo_config,
                commands::AddSelection { core, stacks, all },
                dry_run,
            )?;
        }
        Commands::Upgrade {
            force,
            dry_run,
            repo,
        } => {
            let home_dir = default_home_dir()?;
            let repo_config = config::load_repo_config(&home_dir)?.with_overrides(repo);
            commands::run_upgrade_command(&project_root, &home_dir, &repo_config, force, dry_run)?;
        }
        Commands::List => {
            let home_dir = default_home_dir()?;
            commands::run_list_command(&project_root, &home_dir)?;
        }
        Commands::Doctor => {
            let home_dir = default_home_dir()?;
            commands::run_doctor_command(&project_root, &home_dir);
        }
        Commands::Completions { shell } => {
            use clap::CommandFactory;

            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "rulepack", &mut std::io::stdout());
        }
    }

    Ok(())
}
