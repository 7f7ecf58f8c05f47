//! CLI for the repo-bump tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use repo_bump::batch::BatchUpdate;
use repo_bump::bitbucket::BitbucketClient;
use repo_bump::credentials::CredentialStore;
use repo_bump::git::GitAuth;
use repo_bump::output;
use repo_bump::resolver::{ArgResolver, ParameterResolver, PromptResolver};

#[derive(Parser)]
#[command(name = "repo-bump")]
#[command(author, version, about = "Batch dependency version updates across Bitbucket repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update a pinned dependency version in every repository with the branch
    Update {
        /// Branch name to check
        #[arg(short, long)]
        branch: Option<String>,

        /// Version to update to
        #[arg(short = 'v', long)]
        newversion: Option<String>,

        /// Library to update
        #[arg(short, long)]
        library: Option<String>,

        /// Fail instead of prompting when a parameter is missing
        #[arg(long)]
        no_input: bool,
    },

    /// Store the Bitbucket username
    SetUsername { username: String },

    /// Store the Bitbucket app password
    SetPassword { app_password: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Update {
            branch,
            newversion,
            library,
            no_input,
        } => cmd_update(branch, newversion, library, no_input),
        Commands::SetUsername { username } => cmd_set_username(username),
        Commands::SetPassword { app_password } => cmd_set_password(app_password),
    }
}

fn credential_store() -> Result<CredentialStore> {
    let path = CredentialStore::default_path().context("Failed to locate the credentials file")?;
    Ok(CredentialStore::new(path))
}

fn cmd_update(
    branch: Option<String>,
    newversion: Option<String>,
    library: Option<String>,
    no_input: bool,
) -> Result<()> {
    let store = credential_store()?;
    let credentials = store.load().merged_with_env();
    credentials.ensure_complete()?;

    let resolver: Box<dyn ParameterResolver> = if no_input {
        Box::new(ArgResolver)
    } else {
        Box::new(PromptResolver)
    };
    let params = resolver.resolve(branch, library, newversion)?;

    let client = BitbucketClient::new(
        credentials.username.as_str(),
        credentials.app_password.as_str(),
    );
    let auth = GitAuth::basic(
        credentials.username.as_str(),
        credentials.app_password.as_str(),
    );

    let reporting = params.clone();
    let result = BatchUpdate::new(&client, params)
        .with_git_auth(auth)
        .execute(|event| output::print_event(&event, &reporting))
        .context("Batch update failed")?;

    output::print_summary(&result.summary);
    Ok(())
}

fn cmd_set_username(username: String) -> Result<()> {
    let store = credential_store()?;
    let mut credentials = store.load();
    credentials.username = username.clone();
    store.save(&credentials).context("Failed to save credentials")?;
    println!("Username set to: {}", username);
    Ok(())
}

fn cmd_set_password(app_password: String) -> Result<()> {
    let store = credential_store()?;
    let mut credentials = store.load();
    credentials.app_password = app_password;
    store.save(&credentials).context("Failed to save credentials")?;
    println!("App password set.");
    Ok(())
}
