use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat session
    Chat,

    /// Send one message and print the reply
    Send {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Ask for the end-of-day summary of today's ideas
    Summary,

    /// Print the stored conversation
    History {
        /// Only show the last N messages
        #[arg(short, long)]
        last: Option<usize>,
    },

    /// Wipe the conversation and start over with a fresh welcome message
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
