// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Case transformations for {{TITLE:mode}} placeholders.
//
// Supported modes:
// - 'camel'            → camelCase
// - 'pascal'           → PascalCase
// - 'snake'            → snake_case
// - 'kebab'            → kebab-case
// - 'scream_snake'     → SCREAMING_SNAKE_CASE
// - 'scream_kebab'     → SCREAMING-KEBAB-CASE
// - 'train'            → Train-Case
// - 'flat'             → flatcase
// - 'upper_flat'       → UPPERFLATCASE
// - 'camel_snake'      → camel_Snake_Case   (first word lowercase, '_' separator)
// - 'pascal_snake'     → Pascal_Snake_Case  (all capitalized, '_' separator)
// - 'scream_words'     → SCREAMING CASE     (space between words)
// - 'upper'            → UPPERCASE
// - 'lower'            → lowercase
//
// Diacritics are stripped (NFD) before tokenizing so accented titles stay
// stable across modes. Tokenization splits on non-alphanumerics and on
// camelCase / ACRONYMword boundaries; digit runs survive as their own
// tokens. 'upper' and 'lower' skip tokenization and operate on the whole
// deburred string.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("static regex"));

/// Strip diacritics via canonical decomposition.
fn deburr(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Insert word boundaries between camelCase and acronym-word transitions.
/// 'APIResponse' -> 'API Response'; 'userIDValue' -> 'user ID Value'
fn split_camel_and_acronyms(s: &str) -> String {
    let s = CAMEL_BOUNDARY.replace_all(s, "$1 $2");
    ACRONYM_BOUNDARY.replace_all(&s, "$1 $2").into_owned()
}

fn tokenize(input: &str) -> Vec<String> {
    let s = split_camel_and_acronyms(&deburr(input));
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Capitalize the first character, lowercase the rest.
fn cap_first(w: &str) -> String {
    let mut chars = w.chars();
    match chars.next() {
        Some(c) => c.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

fn to_camel(tokens: &[String]) -> String {
    let Some((first, rest)) = tokens.split_first() else {
        return String::new();
    };
    let mut out = first.to_ascii_lowercase();
    for t in rest {
        out.push_str(&cap_first(t));
    }
    out
}

fn to_camel_snake(tokens: &[String]) -> String {
    let Some((first, rest)) = tokens.split_first() else {
        return String::new();
    };
    let mut out = first.to_ascii_lowercase();
    for t in rest {
        out.push('_');
        out.push_str(&cap_first(t));
    }
    out
}

fn join_mapped(tokens: &[String], sep: &str, f: fn(&str) -> String) -> String {
    tokens.iter().map(|t| f(t)).collect::<Vec<_>>().join(sep)
}

/// Transform `text` according to `mode`.
///
/// Unknown modes fall back to the tokens joined by single spaces — this
/// never errors, so a typo in a placeholder format degrades visibly but
/// harmlessly.
pub fn transform(text: &str, mode: &str) -> String {
    let tokens = tokenize(text);
    match mode {
        "camel" => to_camel(&tokens),
        "pascal" => join_mapped(&tokens, "", cap_first),
        "snake" => join_mapped(&tokens, "_", |t| t.to_ascii_lowercase()),
        "kebab" => join_mapped(&tokens, "-", |t| t.to_ascii_lowercase()),
        "scream_snake" => join_mapped(&tokens, "_", |t| t.to_ascii_uppercase()),
        "scream_kebab" => join_mapped(&tokens, "-", |t| t.to_ascii_uppercase()),
        "train" => join_mapped(&tokens, "-", cap_first),
        "flat" => join_mapped(&tokens, "", |t| t.to_ascii_lowercase()),
        "upper_flat" => join_mapped(&tokens, "", |t| t.to_ascii_uppercase()),
        "camel_snake" => to_camel_snake(&tokens),
        "pascal_snake" => join_mapped(&tokens, "_", cap_first),
        "scream_words" => join_mapped(&tokens, " ", |t| t.to_ascii_uppercase()),
        // Whole-string modes skip tokenization on purpose: spacing and
        // punctuation of the input survive.
        "upper" => deburr(text).to_uppercase(),
        "lower" => deburr(text).to_lowercase(),
        _ => tokens.join(" "),
    }
}
