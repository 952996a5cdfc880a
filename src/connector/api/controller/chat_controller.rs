use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::{SendOutcome, CLEAR_CONFIRMATION};
use crate::connector::adapter::{is_affirmative, AutoConfirm};
use crate::connector::api::presenter::{render_log, render_message};

use super::super::Container;

const HELP: &str = "Commands: /summary (daily summary), /history, /clear, /quit";

const NO_API_KEY_NOTICE: &str =
    "No API key found. Set API_KEY (or GEMINI_API_KEY), or start with --mock-completion.";

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Send(String),
    Summary,
    History,
    Clear,
    Help,
    Quit,
}

impl ReplCommand {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "/summary" => ReplCommand::Summary,
            "/history" => ReplCommand::History,
            "/clear" => ReplCommand::Clear,
            "/help" => ReplCommand::Help,
            "/quit" | "/exit" => ReplCommand::Quit,
            _ => ReplCommand::Send(line.to_string()),
        }
    }
}

/// Interactive terminal chat.
pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn run(&self) -> Result<()> {
        let controller = self.container.controller();

        println!("{}\n", render_log(&controller.messages().await));
        println!("{HELP}\n");
        if self.container.missing_api_key() {
            eprintln!("{NO_API_KEY_NOTICE}\n");
        }

        let mut loading = controller.subscribe_loading();
        let indicator = tokio::spawn(async move {
            while loading.changed().await.is_ok() {
                if *loading.borrow_and_update() {
                    eprintln!("Second Brain is thinking...");
                }
            }
        });

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match ReplCommand::parse(&line) {
                ReplCommand::Quit => break,
                ReplCommand::Help => println!("{HELP}"),
                ReplCommand::History => println!("{}", render_log(&controller.messages().await)),
                ReplCommand::Summary => {
                    let outcome = controller.trigger_daily_summary().await;
                    self.print_outcome(&outcome);
                }
                ReplCommand::Clear => {
                    print!("{CLEAR_CONFIRMATION} [y/N] ");
                    std::io::stdout().flush()?;
                    let answer = lines.next_line().await?.unwrap_or_default();

                    if controller
                        .clear_conversation(&AutoConfirm(is_affirmative(&answer)))
                        .await
                    {
                        println!("{}", render_log(&controller.messages().await));
                    }
                }
                ReplCommand::Send(text) => {
                    let outcome = controller.handle_send_message(&text).await;
                    self.print_outcome(&outcome);
                }
            }
        }

        indicator.abort();
        Ok(())
    }

    fn print_outcome(&self, outcome: &SendOutcome) {
        if let Some(reply) = outcome.reply() {
            println!("\n{}\n", render_message(reply));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_slash_commands() {
        assert_eq!(ReplCommand::parse("/summary"), ReplCommand::Summary);
        assert_eq!(ReplCommand::parse("  /quit "), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
    }

    #[test]
    fn test_everything_else_is_sent_verbatim() {
        assert_eq!(
            ReplCommand::parse(" idea: /summary is neat "),
            ReplCommand::Send(" idea: /summary is neat ".to_string())
        );
        assert_eq!(ReplCommand::parse(""), ReplCommand::Send(String::new()));
    }
}
