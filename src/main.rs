use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use second_brain::connector::api::controller::ChatController;
use second_brain::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "second-brain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.second-brain")]
    data_dir: String,

    #[arg(long, global = true)]
    memory_storage: bool,

    #[arg(long, global = true)]
    mock_completion: bool,

    /// Model identifier, e.g. gemini-2.5-flash
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data_dir = expand_tilde(&cli.data_dir);

    let container = Container::new(ContainerConfig {
        data_dir,
        memory_storage: cli.memory_storage,
        mock_completion: cli.mock_completion,
        model: cli.model,
    })
    .await?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => ChatController::new(&container).run().await?,
        command => {
            let output = Router::new(&container).route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_chat() {
        let cli = Cli::try_parse_from(["second-brain"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_send_requires_text() {
        assert!(Cli::try_parse_from(["second-brain", "send"]).is_err());

        let cli = Cli::try_parse_from(["second-brain", "send", "hello", "world"]).expect("parse");
        match cli.command {
            Some(Commands::Send { text }) => assert_eq!(text, vec!["hello", "world"]),
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["second-brain", "clear", "--yes", "--memory-storage"])
            .expect("parse");
        assert!(cli.memory_storage);
        assert!(matches!(cli.command, Some(Commands::Clear { yes: true })));
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/tmp/x"), "/tmp/x");
    }
}
