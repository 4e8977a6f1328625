use super::records::*;
use serde_json::{Value, json};
use url::Url;

fn base() -> Url {
    Url::parse("https://openlibrary.org").expect("base url")
}

#[test]
fn book_record_substitutes_sentinels_for_missing_fields() {
    let record = BookRecord::from_json(
        &json!({}),
        "https://openlibrary.org/books/OL1M".to_string(),
    );

    assert_eq!(record.title, UNKNOWN);
    assert_eq!(record.publish_date, UNKNOWN);
    assert_eq!(record.authors, json!([]));
    assert_eq!(record.publishers, json!([]));
    assert_eq!(record.isbn_10, json!([]));
    assert_eq!(record.isbn_13, json!([]));
    assert_eq!(record.page_count, json!(UNKNOWN));
    assert_eq!(record.subjects, json!([]));
    assert_eq!(record.url, "https://openlibrary.org/books/OL1M");
}

#[test]
fn book_record_is_total_over_mistyped_fields() {
    // Scalars where lists are expected and vice versa must not panic.
    let record = BookRecord::from_json(
        &json!({
            "title": 42,
            "authors": "not a list",
            "number_of_pages": [1, 2],
        }),
        String::new(),
    );

    assert_eq!(record.title, UNKNOWN);
    assert_eq!(record.authors, json!("not a list"));
    assert_eq!(record.page_count, json!([1, 2]));
}

#[test]
fn book_record_round_trip_has_exactly_nine_fields() {
    let record = BookRecord::from_json(
        &json!({
            "title": "Dune",
            "publish_date": "1965",
            "number_of_pages": 412,
            "isbn_10": ["0441013597"],
        }),
        "https://openlibrary.org/books/OL893415M".to_string(),
    );

    let rendered = serde_json::to_string_pretty(&record).expect("render");
    let parsed: Value = serde_json::from_str(&rendered).expect("parse back");
    let object = parsed.as_object().expect("object");

    assert_eq!(object.len(), 9);
    for field in [
        "title",
        "authors",
        "publish_date",
        "publishers",
        "isbn_10",
        "isbn_13",
        "number_of_pages",
        "subjects",
        "url",
    ] {
        assert!(object.contains_key(field), "missing field {field}");
    }
    assert_eq!(parsed["title"], "Dune");
    assert_eq!(parsed["number_of_pages"], 412);
    assert_eq!(parsed["isbn_10"], json!(["0441013597"]));
}

#[test]
fn isbn_record_flattens_author_and_publisher_names() {
    let record = IsbnBookRecord::from_json(
        &json!({
            "title": "Animal Farm",
            "authors": [{"name": "George Orwell"}, {"url": "no name here"}],
            "publishers": [{"name": "Signet"}],
        }),
        "0451526538",
    );

    assert_eq!(record.authors, vec!["George Orwell", ""]);
    assert_eq!(record.publishers, vec!["Signet"]);
    assert_eq!(record.publish_date, UNKNOWN);
    assert_eq!(record.isbn, "0451526538");
    assert_eq!(record.url, "");
}

#[test]
fn book_summary_builds_url_from_key() {
    let summary = BookSummary::from_doc(
        &json!({"title": "Dune", "key": "/works/OL893415W"}),
        &base(),
    );

    assert_eq!(summary.url, "https://openlibrary.org/works/OL893415W");
    assert_eq!(summary.key, "/works/OL893415W");
}

#[test]
fn book_summary_with_missing_key_has_empty_url() {
    let summary = BookSummary::from_doc(&json!({"title": "Dune"}), &base());

    assert_eq!(summary.key, "");
    assert_eq!(summary.url, "");
    assert_eq!(summary.first_publish_year, json!(UNKNOWN));
}

#[test]
fn search_results_default_to_zero_found() {
    let results = SearchResults::from_json(&json!({}), None, &base());

    assert_eq!(results.found, 0);
    assert_eq!(results.showing, 0);
    assert!(results.books.is_empty());
    assert!(results.author.is_none());
}

#[test]
fn search_results_author_echo_serializes_first() {
    let results = SearchResults::from_json(
        &json!({"numFound": 2, "docs": [{"title": "Emma"}]}),
        Some("Jane Austen".to_string()),
        &base(),
    );

    let rendered = serde_json::to_string_pretty(&results).expect("render");
    let parsed: Value = serde_json::from_str(&rendered).expect("parse back");

    assert_eq!(parsed["author"], "Jane Austen");
    assert_eq!(parsed["found"], 2);
    assert_eq!(parsed["showing"], 1);

    // The plain search variant must not carry the author field at all.
    let plain = SearchResults::from_json(&json!({}), None, &base());
    let rendered = serde_json::to_string(&plain).expect("render");
    assert!(!rendered.contains("author"));
}

#[test]
fn author_record_passes_structured_bio_through() {
    let record = AuthorRecord::from_json(
        &json!({
            "name": "J. R. R. Tolkien",
            "bio": {"type": "/type/text", "value": "English writer"},
        }),
        "https://openlibrary.org/authors/OL26320A".to_string(),
    );

    assert_eq!(record.name, "J. R. R. Tolkien");
    assert_eq!(record.bio["value"], "English writer");
    assert_eq!(record.birth_date, UNKNOWN);
    assert_eq!(record.wikipedia, "");
}

#[test]
fn author_record_defaults_bio_sentinel() {
    let record = AuthorRecord::from_json(&json!({}), String::new());
    assert_eq!(record.bio, json!("No biography available"));
}

#[test]
fn work_record_keeps_nested_author_references() {
    let record = WorkRecord::from_json(
        &json!({
            "title": "The Fellowship of the Ring",
            "authors": [{"author": {"key": "/authors/OL26320A"}}],
            "covers": [9255566],
        }),
        "https://openlibrary.org/works/OL27448W".to_string(),
    );

    assert_eq!(record.authors[0]["author"]["key"], "/authors/OL26320A");
    assert_eq!(record.covers, json!([9255566]));
    assert_eq!(record.description, json!("No description available"));
    assert_eq!(record.first_publish_date, UNKNOWN);
}

#[test]
fn pretty_rendering_preserves_non_ascii() {
    let record = BookRecord::from_json(&json!({"title": "Sömürgecilik Tarihi"}), String::new());
    let rendered = crate::tools::render_pretty(&record).expect("render");

    assert!(rendered.contains("Sömürgecilik"));
    assert!(!rendered.contains("\\u"));
}
