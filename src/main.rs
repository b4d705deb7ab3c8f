//! iconsync - publish design-tool icons to GitHub
//!
//! CLI binary that turns an exported design selection into a pull request.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "iconsync")]
#[command(about = "Publish SVG icons from a design selection to GitHub as a pull request")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $ICON_SYNC_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish the exported selection as a pull request
    Publish {
        /// Scene export written by the design plugin
        #[arg(long)]
        scene: PathBuf,

        /// Repository URL (https://github.com/owner/repo)
        #[arg(long)]
        repo: Option<String>,

        /// Folder in the repository that holds the icons
        #[arg(long)]
        folder: Option<String>,

        /// Pull request title
        #[arg(long)]
        title: Option<String>,

        /// Pull request description
        #[arg(long)]
        body: Option<String>,

        /// Don't append the changed-files list to the description
        #[arg(long)]
        no_summary: bool,

        /// GitHub token (defaults to GITHUB_TOKEN, GH_TOKEN, or `gh auth token`)
        #[arg(long, env = "ICON_SYNC_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Dry run - show what would be published without contacting GitHub
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List the icons a scene export would publish
    Extract {
        /// Scene export written by the design plugin
        #[arg(long)]
        scene: PathBuf,

        /// Folder used to show target paths
        #[arg(long)]
        folder: Option<String>,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test {
        /// GitHub token to test
        #[arg(long, env = "ICON_SYNC_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Repository URL, used to pick a GitHub Enterprise host
        #[arg(long)]
        repo: Option<String>,
    },
    /// Show authentication setup instructions
    Setup,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the config file contents as parsed
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);
    let config_path = cli.config.or_else(icon_sync::config::config_path);

    match cli.command {
        Commands::Publish {
            scene,
            repo,
            folder,
            title,
            body,
            no_summary,
            token,
            dry_run,
            yes,
        } => {
            let overrides = icon_sync::config::Overrides {
                repo_url: repo,
                folder,
                pr_title: title,
                pr_body: body,
                no_summary,
            };
            cli::run_publish(cli::PublishArgs {
                scene: &scene,
                config_path: config_path.as_deref(),
                overrides,
                token: token.as_deref(),
                dry_run,
                assume_yes: yes,
            })
            .await?;
        }
        Commands::Extract { scene, folder } => {
            cli::run_extract(&scene, folder.as_deref()).await?;
        }
        Commands::Auth { action } => match action {
            AuthAction::Test { token, repo } => {
                cli::run_auth_test(token.as_deref(), repo.as_deref()).await?;
            }
            AuthAction::Setup => cli::run_auth_setup(),
        },
        Commands::Config { action } => match action {
            ConfigAction::Path => cli::run_config_path(config_path.as_deref()),
            ConfigAction::Show => cli::run_config_show(config_path.as_deref())?,
        },
    }

    Ok(())
}
