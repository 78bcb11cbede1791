//! Text canonicalisation shared by skill extraction and text similarity.

use once_cell::sync::Lazy;
use regex::Regex;

static LIST_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n;/]").unwrap());
static CONJUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\band\b").unwrap());
static NON_SKILL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s+#]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Canonical cleaned form of a whole document.
///
/// Separators (`\n`, `;`, `/`) and the word "and" become commas, then every character
/// other than word characters, whitespace, `+` and `#` is replaced by a space and runs of
/// whitespace collapse to one. Replacing rather than deleting keeps `a/b` as two words.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let lower = raw.to_lowercase();
    let delimited = LIST_SEPARATORS.replace_all(&lower, ",");
    let delimited = CONJUNCTION.replace_all(&delimited, ",");
    let stripped = NON_SKILL_CHARS.replace_all(&delimited, " ");
    collapse_whitespace(&stripped)
}

/// Canonical form of a single skill token (`deep-learning` -> `deep learning`).
pub fn normalize_token(token: &str) -> String {
    let lower = token.trim().to_lowercase();
    if lower.is_empty() {
        return String::new();
    }
    let unhyphenated = expand_inner_hyphens(&lower);
    let stripped = NON_SKILL_CHARS.replace_all(&unhyphenated, " ");
    collapse_whitespace(&stripped)
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn expand_inner_hyphens(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let inner = c == '-'
                && i > 0
                && chars.get(i + 1).is_some_and(|&n| is_word_char(n))
                && is_word_char(chars[i - 1]);
            if inner {
                ' '
            } else {
                c
            }
        })
        .collect()
}
