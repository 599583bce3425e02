//! Short language code to canonical locale tag

/// Fixed code table. `ge` is a legacy alias for German.
const LOCALE_TABLE: &[(&str, &str)] = &[
    ("en", "en_US"),
    ("fi", "fi_FI"),
    ("sv", "sv_SE"),
    ("de", "de_DE"),
    ("ge", "de_DE"),
    ("ru", "ru_RU"),
    ("fr", "fr_FR"),
    ("no", "nb_NO"),
    ("da", "da_DK"),
    ("es", "es_ES"),
];

/// Map a trimmed short code to its locale tag. Unknown codes yield `None`.
pub fn normalize_locale(code: &str) -> Option<&'static str> {
    LOCALE_TABLE
        .iter()
        .find(|(short, _)| *short == code)
        .map(|(_, tag)| *tag)
}
