/// User Demo - lists and creates users against a REST user API
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_client::{ClientConfig, NewUser, User, UserClient};

mod config;

use crate::config::DemoConfig;

#[derive(Parser)]
#[command(name = "user-demo")]
#[command(about = "List and create users through the user API client", long_about = None)]
struct Cli {
    /// User collection URL (overrides config and environment)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List users, create John Doe, then print the listed users
    Demo,
    /// List all users
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new user
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        /// Avatar URL
        #[arg(short, long)]
        avatar: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_demo=info,user_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        println!("Error: {:#}", e);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = client_config(cli.config.as_deref(), cli.base_url)?;

    let mut client = UserClient::new(config)?;
    tracing::info!(url = %client.base_url(), "Using user API");

    let active = client.enter()?;

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => demo(&active).await?,
        Commands::List { json } => {
            let users = active.list_users().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else {
                for user in &users {
                    println!("{}", describe(user));
                }
            }
        }
        Commands::Create {
            name,
            email,
            avatar,
        } => {
            let mut new_user = NewUser::new(name, email);
            new_user.avatar = avatar;

            let user = active.create_user(&new_user).await?;
            println!("{}", describe(&user));
        }
    }

    Ok(())
}

/// Layered client config: file, then environment, then `--base-url`.
fn client_config(path: Option<&Path>, base_url: Option<String>) -> anyhow::Result<ClientConfig> {
    let mut config = DemoConfig::load(path)?;
    if let Some(base_url) = base_url {
        config.client.base_url = base_url;
    }
    Ok(config.client)
}

async fn demo(client: &UserClient) -> anyhow::Result<()> {
    let users = client.list_users().await?;
    println!("Found {} users", users.len());

    let new_user = NewUser::new("John Doe", "john.doe@example.com")
        .with_avatar("https://example.com/avatars/john.jpg");

    let created = client.create_user(&new_user).await?;
    println!("Created user: {} ({})", created.name(), created.email());

    for user in &users {
        println!("{}", describe(user));
    }

    Ok(())
}

fn describe(user: &User) -> String {
    format!("User {}: {} - {}", user.id(), user.name(), user.email())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_describe() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "Ann", "email": "a@x.com"
        }))
        .unwrap();
        assert_eq!(describe(&user), "User 1: Ann - a@x.com");
    }

    #[test]
    fn test_cli_defaults_to_demo() {
        let cli = Cli::try_parse_from(["user-demo"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn test_cli_create_args() {
        let cli = Cli::try_parse_from([
            "user-demo",
            "--base-url",
            "http://localhost:8080/users",
            "create",
            "--name",
            "Ann",
            "--email",
            "a@x.com",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080/users"));
        match cli.command {
            Some(Commands::Create {
                name,
                email,
                avatar,
            }) => {
                assert_eq!(name, "Ann");
                assert_eq!(email, "a@x.com");
                assert!(avatar.is_none());
            }
            _ => panic!("Expected create command"),
        }
    }

    #[test]
    fn test_base_url_flag_beats_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[client]\nbase_url = \"http://file.example.com/users\"\ntimeout_secs = 7"
        )
        .unwrap();

        let config = client_config(
            Some(file.path()),
            Some("http://flag.example.com/users".to_string()),
        )
        .unwrap();

        assert_eq!(config.base_url, "http://flag.example.com/users");
        // Other settings still come from the lower layers
        assert_eq!(config.timeout_secs, 7);
    }

    #[test]
    fn test_without_flag_keeps_loaded_url() {
        std::env::remove_var("USER_DEMO__CLIENT__BASE_URL");
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[client]\nbase_url = \"http://file.example.com/users\"").unwrap();

        let config = client_config(Some(file.path()), None).unwrap();

        assert_eq!(config.base_url, "http://file.example.com/users");
    }
}
