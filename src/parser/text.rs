use deunicode::deunicode;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("hardcoded regex pattern is valid"));

static FILENAME_INVALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("hardcoded regex pattern is valid"));

/// Decodes leftover HTML entities, drops `/`, collapses whitespace and
/// transliterates to ASCII.
pub fn normalize_description(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    let without_slashes = decoded.replace('/', "");
    let collapsed = WHITESPACE_RUN.replace_all(&without_slashes, " ");
    deunicode(collapsed.trim())
}

/// Makes a category name usable as a file or directory name on any platform.
pub fn clean_filename(name: &str) -> String {
    let stripped = FILENAME_INVALID.replace_all(name, "");
    WHITESPACE_RUN.replace_all(&stripped, "_").into_owned()
}
