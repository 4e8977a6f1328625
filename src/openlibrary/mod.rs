//! Open Library tools.
//!
//! Six tools proxying the public Open Library REST API: edition lookup by
//! OLID or ISBN, general and author-scoped search, and author/work records.
//! Each invocation is one upstream GET followed by a normalize-and-render
//! pass; found/not-found is a render outcome, not an exception.

pub mod records;

#[cfg(test)]
mod tests;

use crate::client::UpstreamClient;
use crate::openlibrary::records::{
    AuthorRecord, BookRecord, IsbnBookRecord, SearchResults, WorkRecord,
};
use crate::tools::{Tool, ToolArguments, ToolError, ToolRegistry, render_pretty};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;
use url::Url;

const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Shared upstream access for the Open Library tools.
pub struct OpenLibrary {
    client: Arc<UpstreamClient>,
    base: Url,
}

impl OpenLibrary {
    #[inline]
    pub fn new(client: Arc<UpstreamClient>, base: Url) -> Self {
        Self { client, base }
    }

    /// API endpoint under the base URL. Segments are percent-encoded, so
    /// caller-supplied identifiers cannot rewrite the request path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ToolError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ToolError::Fault("base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Canonical page URL for a resource, `<base>/<kind>/<id>`.
    fn page_url(&self, kind: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base.as_str().trim_end_matches('/'), kind, id)
    }

    pub async fn book_by_olid(&self, olid: &str) -> Result<String, ToolError> {
        let url = self.endpoint(&["books", &format!("{olid}.json")])?;
        let response = self.client.get_json(url).await?;

        if !response.is_success() {
            return Err(ToolError::NotFound(format!(
                "Book not found. Status Code: {}",
                response.status
            )));
        }

        let record = BookRecord::from_json(&response.body, self.page_url("books", olid));
        render_pretty(&record)
    }

    pub async fn book_by_isbn(&self, isbn: &str) -> Result<String, ToolError> {
        let mut url = self.endpoint(&["api", "books"])?;
        url.query_pairs_mut()
            .append_pair("bibkeys", &format!("ISBN:{isbn}"))
            .append_pair("format", "json")
            .append_pair("jscmd", "data");

        let response = self.client.get_json(url).await?;

        if !response.is_success() {
            return Err(ToolError::NotFound(format!(
                "Book lookup failed. Status Code: {}",
                response.status
            )));
        }

        // A 200 with the bibkey absent means the ISBN matched nothing.
        let Some(entry) = response.body.get(format!("ISBN:{isbn}")) else {
            return Err(ToolError::NotFound(
                "No book found matching that ISBN.".to_string(),
            ));
        };

        render_pretty(&IsbnBookRecord::from_json(entry, isbn))
    }

    pub async fn search(&self, query: &str, limit: i64) -> Result<String, ToolError> {
        self.run_search("q", query, limit, false).await
    }

    pub async fn search_by_author(&self, author: &str, limit: i64) -> Result<String, ToolError> {
        self.run_search("author", author, limit, true).await
    }

    async fn run_search(
        &self,
        param: &str,
        term: &str,
        limit: i64,
        echo_author: bool,
    ) -> Result<String, ToolError> {
        let mut url = self.endpoint(&["search.json"])?;
        url.query_pairs_mut()
            .append_pair(param, term)
            .append_pair("limit", &limit.to_string());

        let response = self.client.get_json(url).await?;

        if !response.is_success() {
            return Err(ToolError::NotFound(format!(
                "Search failed. Status Code: {}",
                response.status
            )));
        }

        let author = echo_author.then(|| term.to_string());
        let results = SearchResults::from_json(&response.body, author, &self.base);
        render_pretty(&results)
    }

    pub async fn author(&self, olid: &str) -> Result<String, ToolError> {
        let url = self.endpoint(&["authors", &format!("{olid}.json")])?;
        let response = self.client.get_json(url).await?;

        if !response.is_success() {
            return Err(ToolError::NotFound(format!(
                "Author not found. Status Code: {}",
                response.status
            )));
        }

        let record = AuthorRecord::from_json(&response.body, self.page_url("authors", olid));
        render_pretty(&record)
    }

    pub async fn work(&self, olid: &str) -> Result<String, ToolError> {
        let url = self.endpoint(&["works", &format!("{olid}.json")])?;
        let response = self.client.get_json(url).await?;

        if !response.is_success() {
            return Err(ToolError::NotFound(format!(
                "Work not found. Status Code: {}",
                response.status
            )));
        }

        let record = WorkRecord::from_json(&response.body, self.page_url("works", olid));
        render_pretty(&record)
    }
}

/// Register the six Open Library tools, in catalog order.
#[inline]
pub fn register_tools(registry: &mut ToolRegistry, library: &Arc<OpenLibrary>) {
    registry.register(Arc::new(GetBookByOlid {
        library: Arc::clone(library),
    }));
    registry.register(Arc::new(GetBookByIsbn {
        library: Arc::clone(library),
    }));
    registry.register(Arc::new(SearchBooks {
        library: Arc::clone(library),
    }));
    registry.register(Arc::new(SearchBooksByAuthor {
        library: Arc::clone(library),
    }));
    registry.register(Arc::new(GetAuthorInfo {
        library: Arc::clone(library),
    }));
    registry.register(Arc::new(GetWorkInfo {
        library: Arc::clone(library),
    }));
}

pub struct GetBookByOlid {
    library: Arc<OpenLibrary>,
}

#[async_trait]
impl Tool for GetBookByOlid {
    fn name(&self) -> &'static str {
        "get_book_by_olid"
    }

    fn description(&self) -> &'static str {
        "Look up a book edition by its Open Library ID (OLID), e.g. OL1M"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "olid": {
                    "type": "string",
                    "description": "Open Library edition ID, e.g. OL1M"
                }
            },
            "required": ["olid"],
            "additionalProperties": false
        })
    }

    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let olid = arguments.required_str("olid")?;
        info!("Fetching book {}", olid);
        self.library.book_by_olid(&olid).await
    }
}

pub struct GetBookByIsbn {
    library: Arc<OpenLibrary>,
}

#[async_trait]
impl Tool for GetBookByIsbn {
    fn name(&self) -> &'static str {
        "get_book_by_isbn"
    }

    fn description(&self) -> &'static str {
        "Look up a book by its ISBN-10 or ISBN-13"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "isbn": {
                    "type": "string",
                    "description": "ISBN-10 or ISBN-13, digits only"
                }
            },
            "required": ["isbn"],
            "additionalProperties": false
        })
    }

    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let isbn = arguments.required_str("isbn")?;
        info!("Fetching book by ISBN {}", isbn);
        self.library.book_by_isbn(&isbn).await
    }
}

pub struct SearchBooks {
    library: Arc<OpenLibrary>,
}

#[async_trait]
impl Tool for SearchBooks {
    fn name(&self) -> &'static str {
        "search_books"
    }

    fn description(&self) -> &'static str {
        "Search books by title, author, or general terms"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search terms"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results (default: 10)"
                }
            },
            "required": ["query"],
            "additionalProperties": false
        })
    }

    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let query = arguments.required_str("query")?;
        let limit = arguments.integer_or("limit", DEFAULT_SEARCH_LIMIT).max(1);
        info!("Searching books: '{}' (limit {})", query, limit);
        self.library.search(&query, limit).await
    }
}

pub struct SearchBooksByAuthor {
    library: Arc<OpenLibrary>,
}

#[async_trait]
impl Tool for SearchBooksByAuthor {
    fn name(&self) -> &'static str {
        "search_books_by_author"
    }

    fn description(&self) -> &'static str {
        "Search books written by a specific author"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "author": {
                    "type": "string",
                    "description": "Author name"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results (default: 10)"
                }
            },
            "required": ["author"],
            "additionalProperties": false
        })
    }

    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let author = arguments.required_str("author")?;
        let limit = arguments.integer_or("limit", DEFAULT_SEARCH_LIMIT).max(1);
        info!("Searching books by author: '{}' (limit {})", author, limit);
        self.library.search_by_author(&author, limit).await
    }
}

pub struct GetAuthorInfo {
    library: Arc<OpenLibrary>,
}

#[async_trait]
impl Tool for GetAuthorInfo {
    fn name(&self) -> &'static str {
        "get_author_info"
    }

    fn description(&self) -> &'static str {
        "Look up an author by their Open Library ID, e.g. OL23919A"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "author_olid": {
                    "type": "string",
                    "description": "Open Library author ID, e.g. OL23919A"
                }
            },
            "required": ["author_olid"],
            "additionalProperties": false
        })
    }

    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let olid = arguments.required_str("author_olid")?;
        info!("Fetching author {}", olid);
        self.library.author(&olid).await
    }
}

pub struct GetWorkInfo {
    library: Arc<OpenLibrary>,
}

#[async_trait]
impl Tool for GetWorkInfo {
    fn name(&self) -> &'static str {
        "get_work_info"
    }

    fn description(&self) -> &'static str {
        "Look up a work by its Open Library ID, e.g. OL45883W"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "work_olid": {
                    "type": "string",
                    "description": "Open Library work ID, e.g. OL45883W"
                }
            },
            "required": ["work_olid"],
            "additionalProperties": false
        })
    }

    async fn call(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let olid = arguments.required_str("work_olid")?;
        info!("Fetching work {}", olid);
        self.library.work(&olid).await
    }
}
