//! Language tables.
//!
//! Each supported wiki language knows the section titles it uses for word
//! classes and translations, and how it writes its own name.

/// Static description of one supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Wiki subdomain, e.g. `en` in `en.wiktionary.org`.
    pub code: &'static str,
    /// The language's name in English.
    pub english_name: &'static str,
    /// The language's name in itself.
    pub native_name: &'static str,
    /// Part-of-speech section titles, in display order.
    pub word_classes: &'static [&'static str],
    /// Title of the translations section.
    pub translations: &'static str,
}

pub const ENGLISH: Language = Language {
    code: "en",
    english_name: "English",
    native_name: "English",
    word_classes: &[
        "Adjective",
        "Adverb",
        "Article",
        "Conjunction",
        "Noun",
        "Numeral",
        "Adposition",
        "Preposition",
        "Postposition",
        "Participle",
        "Pronoun",
        "Verb",
        "Interjection",
        "Proper noun",
    ],
    translations: "Translations",
};

pub const FINNISH: Language = Language {
    code: "fi",
    english_name: "Finnish",
    native_name: "suomi",
    word_classes: &[
        "Adjektiivi",
        "Adverbi",
        "Artikkeli",
        "Konjunktio",
        "Substantiivi",
        "Numeraali",
        "Adpositio",
        "Prepositio",
        "Postpositio",
        "Partisiippi",
        "Pronomini",
        "Verbi",
        "Interjektio",
        "Erisnimi",
    ],
    translations: "Käännökset",
};

pub const SUPPORTED: &[Language] = &[ENGLISH, FINNISH];

impl Language {
    /// Look up a supported language by its code, ignoring case.
    pub fn lookup(code: &str) -> Option<&'static Language> {
        SUPPORTED
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code.trim()))
    }
}

/// Codes of every supported language.
pub fn supported_codes() -> Vec<String> {
    SUPPORTED.iter().map(|lang| lang.code.to_string()).collect()
}

/// Codes treated as language-code template parameters when rendering in
/// `lang_code`: every supported code plus `lang_code` itself.
pub fn template_language_codes(lang_code: &str) -> Vec<String> {
    let mut codes = supported_codes();
    if !codes.iter().any(|code| code == lang_code) {
        codes.push(lang_code.to_string());
    }
    codes
}
