//! Normalized dictionary entries and their Markdown rendering.

use itertools::Itertools;
use serde_json::Value;
use std::fmt::Write;

const TOP_RELATED_WORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub text: String,
    pub example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<Definition>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

impl Meaning {
    fn from_json(value: &Value) -> Self {
        let definitions = value
            .get("definitions")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .map(|definition| Definition {
                        text: definition
                            .get("definition")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        example: definition
                            .get("example")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            part_of_speech: value
                .get("partOfSpeech")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string(),
            definitions,
            synonyms: related_words(value, "synonyms"),
            antonyms: related_words(value, "antonyms"),
        }
    }
}

fn related_words(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|words| {
            words
                .iter()
                .filter_map(Value::as_str)
                .take(TOP_RELATED_WORDS)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// The first entry of a dictionary API response, normalized. Total over any
/// JSON shape; an unexpected body yields an entry with no meanings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub phonetic: Option<String>,
    pub meanings: Vec<Meaning>,
}

impl WordEntry {
    pub fn from_json(body: &Value, requested: &str) -> Self {
        let entry = body.get(0).cloned().unwrap_or(Value::Null);

        let word = entry
            .get("word")
            .and_then(Value::as_str)
            .unwrap_or(requested)
            .to_string();

        let phonetic = entry
            .get("phonetics")
            .and_then(|phonetics| phonetics.get(0))
            .and_then(|first| first.get("text"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let meanings = entry
            .get("meanings")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(Meaning::from_json).collect())
            .unwrap_or_default();

        Self {
            word,
            phonetic,
            meanings,
        }
    }

    pub fn has_definitions(&self) -> bool {
        self.meanings
            .iter()
            .any(|meaning| !meaning.definitions.is_empty())
    }

    /// Every definition across meanings, each tagged with its part of
    /// speech, in upstream order.
    pub fn definition_lines(&self) -> Vec<String> {
        self.meanings
            .iter()
            .flat_map(|meaning| {
                let part = meaning.part_of_speech.to_lowercase();
                meaning
                    .definitions
                    .iter()
                    .map(move |definition| format!("({}) {}", part, definition.text))
            })
            .collect()
    }
}

/// Render the detailed Markdown view: word, pronunciation, then each part
/// of speech with numbered definitions, examples, and related words.
pub fn render_word_info(entry: &WordEntry) -> String {
    let mut out = String::new();
    let _ = write!(out, "**{}**\n\n", entry.word.to_uppercase());

    if let Some(phonetic) = &entry.phonetic {
        let _ = write!(out, "**Pronunciation:** {phonetic}\n\n");
    }

    for (index, meaning) in entry.meanings.iter().enumerate() {
        let _ = writeln!(
            out,
            "**{}. {}**",
            index + 1,
            title_case(&meaning.part_of_speech)
        );

        for (number, definition) in meaning.definitions.iter().enumerate() {
            let _ = writeln!(out, "   {}. {}", number + 1, definition.text);
            if let Some(example) = &definition.example {
                let _ = writeln!(out, "      *Example: {example}*");
            }
        }

        if !meaning.synonyms.is_empty() {
            let _ = writeln!(out, "   **Synonyms:** {}", meaning.synonyms.iter().join(", "));
        }
        if !meaning.antonyms.is_empty() {
            let _ = writeln!(out, "   **Antonyms:** {}", meaning.antonyms.iter().join(", "));
        }

        out.push('\n');
    }

    out
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
