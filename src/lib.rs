pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    CompletionClient, CompletionProvider, CompletionRequest, CompletionResponse,
    ConfirmationPrompt, ConversationController, MessageStorage, MessageStore, SendOutcome,
    DAILY_SUMMARY_SENTINEL, DEFAULT_MODEL, EMPTY_RESPONSE_FALLBACK, SYSTEM_INSTRUCTION,
    TEMPERATURE,
};

pub use cli::Commands;

pub use connector::{
    AutoConfirm, Container, ContainerConfig, FileMessageStorage, GeminiProvider,
    InMemoryMessageStorage, MockProvider, Router, StdinConfirmation,
};

pub use domain::{
    format_history, DomainError, HistoryTurn, Message, Role, ERROR_APOLOGY, WELCOME_MESSAGE,
};
