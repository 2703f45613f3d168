//! Integration tests for [`assistant_bot::Translator`].

mod common;

use assistant_bot::{BotError, Translator, TranslatorError};
use common::LOCALES_JSON;
use std::io::Write;
use tempfile::NamedTempFile;

/// **Test: Known language and key return the localized text.**
#[test]
fn test_get_message_known_language() {
    let translator = Translator::from_json(LOCALES_JSON).unwrap();
    assert_eq!(
        translator.get_message("en", "start").unwrap(),
        "Hello, I'm an AI assistant"
    );
    assert_eq!(
        translator.get_message("pt-br", "help").unwrap(),
        "É só me escrever."
    );
}

/// **Test: Unknown language fails with a lookup error; there is no fallback.**
#[test]
fn test_unknown_language_is_lookup_error() {
    let translator = Translator::from_json(LOCALES_JSON).unwrap();

    let err = translator.get_message("xx", "start").unwrap_err();
    assert!(matches!(err, TranslatorError::UnknownLanguage(ref l) if l == "xx"));
    assert!(matches!(BotError::from(err), BotError::Lookup(_)));
}

/// **Test: Unknown key fails with a lookup error.**
#[test]
fn test_unknown_key_is_lookup_error() {
    let translator = Translator::from_json(LOCALES_JSON).unwrap();

    let err = translator.get_message("en", "farewell").unwrap_err();
    assert!(matches!(err, TranslatorError::UnknownMessage { .. }));
    assert!(matches!(BotError::from(err), BotError::Lookup(_)));
}

/// **Test: from_file loads the table; bad JSON and missing files are errors.**
#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(LOCALES_JSON.as_bytes()).unwrap();
    let translator = Translator::from_file(file.path()).unwrap();
    assert_eq!(translator.languages().count(), 2);

    assert!(matches!(
        Translator::from_json("{\"en\": {}}"),
        Err(TranslatorError::Parse(_))
    ));
    assert!(matches!(
        Translator::from_file("/nonexistent/locales.json"),
        Err(TranslatorError::Io(_))
    ));
}

/// **Test: The bundled locales file has start and help for every language.**
#[test]
fn test_bundled_locales_are_complete() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/locales/ietf_langs.json");
    let translator = Translator::from_file(path).unwrap();
    let languages: Vec<String> = translator.languages().map(String::from).collect();
    assert!(languages.contains(&"en".to_string()));
    for lang in &languages {
        assert!(translator.get_message(lang, "start").is_ok(), "{} start", lang);
        assert!(translator.get_message(lang, "help").is_ok(), "{} help", lang);
    }
}
