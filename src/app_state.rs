use std::sync::Arc;

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::fetcher::{AccessPolicy, ExtractionRules, Fetcher};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<Fetcher>,
    pub completions: Arc<CompletionClient>,
    pub sources: Arc<Vec<String>>,
    pub model: String,
}

impl AppState {
    /// Wire up the default state: bundled rule tables plus a completion
    /// client pointed at the configured endpoint.
    pub fn new(config: &Config) -> Self {
        let fetcher = Fetcher::new(AccessPolicy::bundled(), ExtractionRules::bundled());
        let completions = CompletionClient::new(config.openai_api_key())
            .with_base_url(config.openai_base_url());
        Self {
            fetcher: Arc::new(fetcher),
            completions: Arc::new(completions),
            sources: Arc::new(config.source_urls().to_vec()),
            model: config.openai_model().to_string(),
        }
    }
}
