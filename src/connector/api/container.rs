use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{
    CompletionClient, CompletionProvider, ConversationController, MessageStorage,
};
use crate::connector::adapter::{
    FileMessageStorage, GeminiProvider, InMemoryMessageStorage, MockProvider,
};

pub struct ContainerConfig {
    pub data_dir: String,
    /// Keep the conversation in memory only; nothing is read from or written to disk.
    pub memory_storage: bool,
    /// Answer with the offline mock provider instead of calling Gemini.
    pub mock_completion: bool,
    /// Overrides `GEMINI_MODEL` and the built-in default.
    pub model: Option<String>,
}

pub struct Container {
    controller: Arc<ConversationController>,
    storage_location: String,
    missing_api_key: bool,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let (storage, storage_location): (Arc<dyn MessageStorage>, String) =
            if config.memory_storage {
                debug!("Using in-memory conversation storage");
                (Arc::new(InMemoryMessageStorage::new()), "(memory)".to_string())
            } else {
                let storage = FileMessageStorage::in_dir(PathBuf::from(&config.data_dir));
                let location = storage.path().display().to_string();
                debug!("Using conversation file at {}", location);
                (Arc::new(storage), location)
            };

        let (provider, missing_api_key): (Arc<dyn CompletionProvider>, bool) =
            if config.mock_completion {
                debug!("Using mock completion provider");
                (Arc::new(MockProvider::new()), false)
            } else {
                let gemini = GeminiProvider::from_env();
                let missing = !gemini.has_api_key();
                (Arc::new(gemini), missing)
            };

        let mut client = CompletionClient::new(provider);
        if let Some(model) = config
            .model
            .or_else(|| std::env::var("GEMINI_MODEL").ok())
        {
            client = client.with_model(model);
        }
        debug!("Using model {}", client.model());

        let controller = Arc::new(ConversationController::open(storage, client).await);

        Ok(Self {
            controller,
            storage_location,
            missing_api_key,
        })
    }

    pub fn controller(&self) -> Arc<ConversationController> {
        self.controller.clone()
    }

    pub fn storage_location(&self) -> &str {
        &self.storage_location
    }

    /// True when requests will go to Gemini without a key and are bound to fail.
    pub fn missing_api_key(&self) -> bool {
        self.missing_api_key
    }
}
