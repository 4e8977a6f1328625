use super::entry::{WordEntry, render_word_info};
use serde_json::json;

fn hello_response() -> serde_json::Value {
    json!([
        {
            "word": "hello",
            "phonetics": [
                {"text": "/həˈləʊ/", "audio": "https://example.com/hello.mp3"},
                {"text": "/hɛˈloʊ/"}
            ],
            "meanings": [
                {
                    "partOfSpeech": "noun",
                    "definitions": [
                        {
                            "definition": "A greeting or an expression of goodwill.",
                            "example": "she was getting polite nods and hellos"
                        }
                    ],
                    "synonyms": ["greeting", "salutation", "salute", "address", "hail", "welcome"],
                    "antonyms": ["farewell"]
                },
                {
                    "partOfSpeech": "verb",
                    "definitions": [
                        {"definition": "To say or shout \"hello\"."}
                    ],
                    "synonyms": [],
                    "antonyms": []
                }
            ]
        }
    ])
}

#[test]
fn entry_normalizes_full_response() {
    let entry = WordEntry::from_json(&hello_response(), "hello");

    assert_eq!(entry.word, "hello");
    assert_eq!(entry.phonetic.as_deref(), Some("/həˈləʊ/"));
    assert_eq!(entry.meanings.len(), 2);
    assert!(entry.has_definitions());

    let noun = &entry.meanings[0];
    assert_eq!(noun.part_of_speech, "noun");
    assert_eq!(noun.definitions.len(), 1);
    assert_eq!(
        noun.definitions[0].example.as_deref(),
        Some("she was getting polite nods and hellos")
    );
    // Related words are capped at five.
    assert_eq!(noun.synonyms.len(), 5);
    assert_eq!(noun.antonyms, vec!["farewell"]);
}

#[test]
fn entry_is_total_over_unexpected_shapes() {
    for body in [
        json!({}),
        json!([]),
        json!(null),
        json!("message"),
        json!([{"word": 42, "meanings": "none"}]),
    ] {
        let entry = WordEntry::from_json(&body, "ghost");
        assert_eq!(entry.word, "ghost");
        assert!(entry.meanings.is_empty());
        assert!(!entry.has_definitions());
    }
}

#[test]
fn phonetic_comes_from_the_first_phonetics_element() {
    // The first element has no text; that is not papered over by scanning
    // ahead, matching the upstream contract callers already rely on.
    let body = json!([
        {"word": "tacit", "phonetics": [{"audio": "x.mp3"}, {"text": "/ˈtæsɪt/"}]}
    ]);
    let entry = WordEntry::from_json(&body, "tacit");
    assert_eq!(entry.phonetic, None);
}

#[test]
fn definition_lines_tag_the_part_of_speech() {
    let entry = WordEntry::from_json(&hello_response(), "hello");
    let lines = entry.definition_lines();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "(noun) A greeting or an expression of goodwill.");
    assert_eq!(lines[1], "(verb) To say or shout \"hello\".");
}

#[test]
fn word_info_rendering() {
    let entry = WordEntry::from_json(&hello_response(), "hello");
    let rendered = render_word_info(&entry);

    assert!(rendered.starts_with("**HELLO**\n\n"));
    assert!(rendered.contains("**Pronunciation:** /həˈləʊ/\n\n"));
    assert!(rendered.contains("**1. Noun**\n"));
    assert!(rendered.contains("   1. A greeting or an expression of goodwill.\n"));
    assert!(rendered.contains("      *Example: she was getting polite nods and hellos*\n"));
    assert!(rendered.contains("   **Synonyms:** greeting, salutation, salute, address, hail\n"));
    assert!(rendered.contains("   **Antonyms:** farewell\n"));
    assert!(rendered.contains("**2. Verb**\n"));
}

#[test]
fn word_info_rendering_without_phonetics_or_meanings() {
    let entry = WordEntry::from_json(&json!([{"word": "xyzzy"}]), "xyzzy");
    let rendered = render_word_info(&entry);

    assert_eq!(rendered, "**XYZZY**\n\n");
}
