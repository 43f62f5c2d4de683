// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Date and time pattern formatters for {{DATE}} / {{TIME}} placeholders.
// Date tokens: d, dd, ddd, m, mm, mmm, y, yy, yyyy
// Time tokens: h, hh, H, HH, m, mm, s, ss plus AM/PM markers
//
// In format_date(), `mm` always means month (01-12); in format_time(), `mm`
// always means minute (00-59). The two entry points exist precisely so a
// caller can never mix the two meanings in one pattern.
//
// `ddd` and `mmm` use the pt-BR abbreviation tables of the product
// (dom..sáb, jan..dez).
//
// Implementation is a single left-to-right scan trying the longest token at
// each position, so an already-substituted output can never be re-matched
// by a shorter token.

use chrono::{Datelike, NaiveDateTime, Timelike};

const WEEKDAYS_SHORT: [&str; 7] = ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"];
const MONTHS_SHORT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

fn two(n: u32) -> String {
    format!("{n:02}")
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether the single-character token at byte range `[start, end)` of `src`
/// sits on word boundaries (so `m` in "medium" stays literal).
fn at_word_boundary(src: &str, start: usize, end: usize) -> bool {
    let before = src[..start].chars().next_back();
    let after = src[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Format a date according to `pattern`.
///
/// Supported tokens: `ddd` (abbreviated weekday), `yyyy`/`yy`/`y` (year),
/// `mmm`/`mm`/`m` (month), `dd`/`d` (day). Unrecognized characters pass
/// through unchanged.
pub fn format_date(date: &NaiveDateTime, pattern: &str) -> String {
    let day = date.day();
    let dow = date.weekday().num_days_from_sunday() as usize;
    let month = date.month();
    let year = date.year();

    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    while i < pattern.len() {
        let rest = &pattern[i..];
        if rest.starts_with("ddd") {
            out.push_str(WEEKDAYS_SHORT[dow]);
            i += 3;
        } else if rest.starts_with("dd") {
            out.push_str(&two(day));
            i += 2;
        } else if rest.starts_with('d') && at_word_boundary(pattern, i, i + 1) {
            out.push_str(&day.to_string());
            i += 1;
        } else if rest.starts_with("yyyy") {
            out.push_str(&year.to_string());
            i += 4;
        } else if rest.starts_with("yy") {
            let y = year.to_string();
            out.push_str(&y[y.len().saturating_sub(2)..]);
            i += 2;
        } else if rest.starts_with('y') {
            // Bare y renders the full year, matching yyyy.
            out.push_str(&year.to_string());
            i += 1;
        } else if rest.starts_with("mmm") {
            out.push_str(MONTHS_SHORT[(month - 1) as usize]);
            i += 3;
        } else if rest.starts_with("mm") {
            out.push_str(&two(month));
            i += 2;
        } else if rest.starts_with('m') && at_word_boundary(pattern, i, i + 1) {
            out.push_str(&month.to_string());
            i += 1;
        } else {
            let c = rest.chars().next().expect("non-empty remainder");
            out.push(c);
            i += c.len_utf8();
        }
    }
    out
}

/// Format a time of day according to `pattern`.
///
/// Supported tokens: `HH`/`H` (24h hour), `hh`/`h` (12h hour, 1-12),
/// `mm`/`m` (minute), `ss`/`s` (second), and the literal markers `AM/PM`
/// or `am/pm`, replaced by the computed meridiem in matching case.
pub fn format_time(date: &NaiveDateTime, pattern: &str) -> String {
    let h24 = date.hour();
    let h12 = (h24 + 11) % 12 + 1;
    let minute = date.minute();
    let second = date.second();
    let is_pm = h24 >= 12;

    let mut out = String::with_capacity(pattern.len() + 4);
    let mut i = 0;
    while i < pattern.len() {
        let rest = &pattern[i..];
        if rest.starts_with("AM/PM") {
            out.push_str(if is_pm { "PM" } else { "AM" });
            i += 5;
        } else if rest.starts_with("am/pm") {
            out.push_str(if is_pm { "pm" } else { "am" });
            i += 5;
        } else if rest.starts_with("HH") {
            out.push_str(&two(h24));
            i += 2;
        } else if rest.starts_with('H') && at_word_boundary(pattern, i, i + 1) {
            out.push_str(&h24.to_string());
            i += 1;
        } else if rest.starts_with("hh") {
            out.push_str(&two(h12));
            i += 2;
        } else if rest.starts_with('h') && at_word_boundary(pattern, i, i + 1) {
            out.push_str(&h12.to_string());
            i += 1;
        } else if rest.starts_with("mm") {
            out.push_str(&two(minute));
            i += 2;
        } else if rest.starts_with('m') && at_word_boundary(pattern, i, i + 1) {
            out.push_str(&minute.to_string());
            i += 1;
        } else if rest.starts_with("ss") {
            out.push_str(&two(second));
            i += 2;
        } else if rest.starts_with('s') && at_word_boundary(pattern, i, i + 1) {
            out.push_str(&second.to_string());
            i += 1;
        } else {
            let c = rest.chars().next().expect("non-empty remainder");
            out.push(c);
            i += c.len_utf8();
        }
    }
    out
}
