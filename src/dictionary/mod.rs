//! Dictionary tools.
//!
//! Three tools proxying the Free Dictionary API: a plain definitions list, a
//! detailed Markdown entry, and a similar-words lookup that probes
//! morphological variants when the word itself has no definitions.

pub mod entry;
pub mod suggest;

#[cfg(test)]
mod tests;

use crate::client::UpstreamClient;
use crate::dictionary::entry::{WordEntry, render_word_info};
use crate::dictionary::suggest::spelling_variants;
use crate::tools::{Tool, ToolArguments, ToolError, ToolRegistry};
use async_trait::async_trait;
use itertools::Itertools;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;
use url::Url;

const MAX_SUGGESTIONS: usize = 5;

/// Shared upstream access for the dictionary tools.
pub struct Dictionary {
    client: Arc<UpstreamClient>,
    base: Url,
}

impl Dictionary {
    #[inline]
    pub fn new(client: Arc<UpstreamClient>, base: Url) -> Self {
        Self { client, base }
    }

    fn entry_url(&self, word: &str) -> Result<Url, ToolError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ToolError::Fault("base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(["api", "v2", "entries", "en", word]);
        Ok(url)
    }

    pub async fn definitions(&self, word: &str) -> Result<String, ToolError> {
        let response = self.client.get_json(self.entry_url(word)?).await?;

        if !response.is_success() {
            return Err(ToolError::NotFound(no_definitions_message(word)));
        }

        let entry = WordEntry::from_json(&response.body, word);
        let lines = entry.definition_lines();
        if lines.is_empty() {
            return Err(ToolError::NotFound(no_definitions_message(word)));
        }

        let list = lines
            .iter()
            .enumerate()
            .map(|(number, line)| format!("{}. {}", number + 1, line))
            .join("\n");

        Ok(format!(
            "**{}** definitions:\n\n{}",
            word.to_uppercase(),
            list
        ))
    }

    pub async fn word_info(&self, word: &str) -> Result<String, ToolError> {
        let response = self.client.get_json(self.entry_url(word)?).await?;

        if !response.is_success() {
            return Err(ToolError::NotFound(format!(
                "No detailed information found for '{word}'."
            )));
        }

        let entry = WordEntry::from_json(&response.body, word);
        Ok(render_word_info(&entry))
    }

    pub async fn similar_words(&self, word: &str) -> Result<String, ToolError> {
        // The direct lookup repeats what get_definitions does; the early
        // "word exists" reply is observable behavior, so it stays, at the
        // cost of a second upstream call for words that do exist.
        let direct = self.client.get_json(self.entry_url(word)?).await?;
        if direct.is_success() && WordEntry::from_json(&direct.body, word).has_definitions() {
            return Ok(format!(
                "'{word}' exists. Use get_definitions to see its definitions."
            ));
        }

        let mut suggestions = Vec::new();
        for variant in spelling_variants(word) {
            match self.client.get_json(self.entry_url(&variant)?).await {
                Ok(response) if response.is_success() => suggestions.push(variant),
                // Failed probes are skipped, not propagated.
                _ => {}
            }
        }

        if suggestions.is_empty() {
            return Ok(format!(
                "'{word}' and its variations were not found. Check the spelling."
            ));
        }

        Ok(format!(
            "'{word}' not found. Similar words: {}",
            suggestions.iter().take(MAX_SUGGESTIONS).join(", ")
        ))
    }
}

fn no_definitions_message(word: &str) -> String {
    format!("No definitions found for '{word}'.")
}

fn word_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "word": {
                "type": "string",
                "description": "An English word"
            }
        },
        "required": ["word"],
        "additionalProperties": false
    })
}

/// Register the three dictionary tools, in catalog order.
#[inline]
pub fn register_tools(registry: &mut ToolRegistry, dictionary: &Arc<Dictionary>) {
    registry.register(Arc::new(GetDefinitions {
        dictionary: Arc::clone(dictionary),
    }));
    registry.register(Arc::new(GetWordInfo {
        dictionary: Arc::clone(dictionary),
    }));
    registry.register(Arc::new(SearchSimilarWords {
        dictionary: Arc::clone(dictionary),
    }));
}

pub struct GetDefinitions {
    dictionary: Arc<Dictionary>,
}

#[async_trait]
impl Tool for GetDefinitions {
    fn name(&self) -> &'static str {
        "get_definitions"
    }

    fn description(&self) -> &'static str {
        "Get definitions for a word"
    }

    fn input_schema(&self) -> Value {
        word_schema()
    }

    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let word = arguments.required_str("word")?;
        info!("Getting definitions for '{}'", word);
        self.dictionary.definitions(&word).await
    }
}

pub struct GetWordInfo {
    dictionary: Arc<Dictionary>,
}

#[async_trait]
impl Tool for GetWordInfo {
    fn name(&self) -> &'static str {
        "get_word_info"
    }

    fn description(&self) -> &'static str {
        "Get detailed word information including pronunciation, definitions, examples, synonyms, and antonyms"
    }

    fn input_schema(&self) -> Value {
        word_schema()
    }

    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let word = arguments.required_str("word")?.to_lowercase();
        info!("Getting detailed info for '{}'", word);
        self.dictionary.word_info(&word).await
    }
}

pub struct SearchSimilarWords {
    dictionary: Arc<Dictionary>,
}

#[async_trait]
impl Tool for SearchSimilarWords {
    fn name(&self) -> &'static str {
        "search_similar_words"
    }

    fn description(&self) -> &'static str {
        "Search for words similar to the given word"
    }

    fn input_schema(&self) -> Value {
        word_schema()
    }

    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let word = arguments.required_str("word")?.to_lowercase();
        info!("Searching similar words for '{}'", word);
        self.dictionary.similar_words(&word).await
    }
}
