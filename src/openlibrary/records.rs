//! Fixed-shape records for the Open Library endpoints.
//!
//! Each record is built by a total normalizer: every field read follows a
//! get-with-default policy, so arbitrarily missing or mistyped upstream
//! fields come back as sentinels rather than errors. Records are built per
//! request, rendered, and discarded.

use serde::Serialize;
use serde_json::{Value, json};
use url::Url;

pub const UNKNOWN: &str = "Unknown";
const NO_BIOGRAPHY: &str = "No biography available";
const NO_DESCRIPTION: &str = "No description available";

fn string_or(value: &Value, key: &str, fallback: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

fn raw_or(value: &Value, key: &str, fallback: Value) -> Value {
    value.get(key).cloned().unwrap_or(fallback)
}

fn list_or_empty(value: &Value, key: &str) -> Value {
    raw_or(value, key, json!([]))
}

fn raw_or_unknown(value: &Value, key: &str) -> Value {
    raw_or(value, key, Value::String(UNKNOWN.to_string()))
}

/// Extract the `name` of each object in a list field, an empty string per
/// element where the name is absent.
fn names_of(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

/// A book edition as returned by `/books/{olid}.json`. Author and subject
/// lists are passed through as-is; this endpoint returns author references,
/// not names.
#[derive(Debug, Clone, Serialize)]
pub struct BookRecord {
    pub title: String,
    pub authors: Value,
    pub publish_date: String,
    pub publishers: Value,
    pub isbn_10: Value,
    pub isbn_13: Value,
    #[serde(rename = "number_of_pages")]
    pub page_count: Value,
    pub subjects: Value,
    pub url: String,
}

impl BookRecord {
    pub fn from_json(body: &Value, url: String) -> Self {
        Self {
            title: string_or(body, "title", UNKNOWN),
            authors: list_or_empty(body, "authors"),
            publish_date: string_or(body, "publish_date", UNKNOWN),
            publishers: list_or_empty(body, "publishers"),
            isbn_10: list_or_empty(body, "isbn_10"),
            isbn_13: list_or_empty(body, "isbn_13"),
            page_count: raw_or_unknown(body, "number_of_pages"),
            subjects: list_or_empty(body, "subjects"),
            url,
        }
    }
}

/// A book as returned by the `jscmd=data` ISBN endpoint, which nests author
/// and publisher names inside objects. Those are flattened to plain names.
#[derive(Debug, Clone, Serialize)]
pub struct IsbnBookRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub publishers: Vec<String>,
    pub publish_date: String,
    #[serde(rename = "number_of_pages")]
    pub page_count: Value,
    pub subjects: Value,
    pub isbn: String,
    pub url: String,
}

impl IsbnBookRecord {
    pub fn from_json(entry: &Value, isbn: &str) -> Self {
        Self {
            title: string_or(entry, "title", UNKNOWN),
            authors: names_of(entry, "authors"),
            publishers: names_of(entry, "publishers"),
            publish_date: string_or(entry, "publish_date", UNKNOWN),
            page_count: raw_or_unknown(entry, "number_of_pages"),
            subjects: list_or_empty(entry, "subjects"),
            isbn: isbn.to_string(),
            url: string_or(entry, "url", ""),
        }
    }
}

/// One document from a search result page, reduced to the summary fields.
#[derive(Debug, Clone, Serialize)]
pub struct BookSummary {
    pub title: String,
    pub author_name: Value,
    pub first_publish_year: Value,
    pub isbn: Value,
    pub publisher: Value,
    pub key: String,
    pub url: String,
}

impl BookSummary {
    pub fn from_doc(doc: &Value, base: &Url) -> Self {
        let key = string_or(doc, "key", "");
        let url = if key.is_empty() {
            String::new()
        } else {
            format!("{}{}", base.as_str().trim_end_matches('/'), key)
        };

        Self {
            title: string_or(doc, "title", UNKNOWN),
            author_name: list_or_empty(doc, "author_name"),
            first_publish_year: raw_or_unknown(doc, "first_publish_year"),
            isbn: list_or_empty(doc, "isbn"),
            publisher: list_or_empty(doc, "publisher"),
            key,
            url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub found: u64,
    pub showing: usize,
    pub books: Vec<BookSummary>,
}

impl SearchResults {
    pub fn from_json(body: &Value, author: Option<String>, base: &Url) -> Self {
        let books: Vec<BookSummary> = body
            .get("docs")
            .and_then(Value::as_array)
            .map(|docs| docs.iter().map(|doc| BookSummary::from_doc(doc, base)).collect())
            .unwrap_or_default();

        Self {
            author,
            found: body.get("numFound").and_then(Value::as_u64).unwrap_or(0),
            showing: books.len(),
            books,
        }
    }
}

/// An author record. The bio may be a plain string or a typed object
/// upstream; it is passed through untouched either way.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorRecord {
    pub name: String,
    pub birth_date: String,
    pub death_date: String,
    pub bio: Value,
    pub wikipedia: String,
    pub website: String,
    pub url: String,
}

impl AuthorRecord {
    pub fn from_json(body: &Value, url: String) -> Self {
        Self {
            name: string_or(body, "name", UNKNOWN),
            birth_date: string_or(body, "birth_date", UNKNOWN),
            death_date: string_or(body, "death_date", UNKNOWN),
            bio: raw_or(body, "bio", Value::String(NO_BIOGRAPHY.to_string())),
            wikipedia: string_or(body, "wikipedia", ""),
            website: string_or(body, "website", ""),
            url,
        }
    }
}

/// A work record. Description, subject, and author structures vary by
/// record age, so the nested values are passed through rather than
/// flattened.
#[derive(Debug, Clone, Serialize)]
pub struct WorkRecord {
    pub title: String,
    pub description: Value,
    pub subjects: Value,
    pub authors: Value,
    pub first_publish_date: String,
    pub covers: Value,
    pub url: String,
}

impl WorkRecord {
    pub fn from_json(body: &Value, url: String) -> Self {
        Self {
            title: string_or(body, "title", UNKNOWN),
            description: raw_or(body, "description", Value::String(NO_DESCRIPTION.to_string())),
            subjects: list_or_empty(body, "subjects"),
            authors: list_or_empty(body, "authors"),
            first_publish_date: string_or(body, "first_publish_date", UNKNOWN),
            covers: list_or_empty(body, "covers"),
            url,
        }
    }
}
