// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Right-aligned digit masks for {{PAGE:mask}} / {{PAGES:mask}}.
// Mask characters:
// - '0' → digit if available, otherwise a literal '0'
// - '_' → digit if available, otherwise a literal '_'
// - '9' → digit if available, otherwise a space
// - '#' → digit if available, otherwise nothing at all
// - anything else → literal, always emitted, consumes no digit
//
// The mask is walked right to left against the digits of the absolute
// value; digits wider than the mask are prepended verbatim (never
// truncated), and a negative sign is prefixed after mask application
// without consuming a mask slot.

/// Format an integer through a right-aligned digit mask.
///
/// An empty mask returns the plain decimal rendering of the value.
///
/// ```
/// use pressmark_format::format_with_mask;
/// assert_eq!(format_with_mask(7, "0000"), "0007");
/// assert_eq!(format_with_mask(7, "####"), "7");
/// assert_eq!(format_with_mask(123, "00-00"), "1-23");
/// ```
pub fn format_with_mask(value: i64, mask: &str) -> String {
    let is_neg = value < 0;
    let digits: Vec<char> = value.unsigned_abs().to_string().chars().collect();

    if mask.is_empty() {
        return value.to_string();
    }

    // Built back to front, reversed once at the end.
    let mut rev: Vec<char> = Vec::with_capacity(mask.len().max(digits.len()) + 1);
    let mut di = digits.len();

    for ch in mask.chars().rev() {
        match ch {
            '0' | '_' | '9' | '#' => {
                if di > 0 {
                    di -= 1;
                    rev.push(digits[di]);
                } else {
                    match ch {
                        '0' => rev.push('0'),
                        '_' => rev.push('_'),
                        '9' => rev.push(' '),
                        _ => {} // '#': nothing emitted
                    }
                }
            }
            other => rev.push(other),
        }
    }

    // Overflow digits, kept to the left of the masked part.
    while di > 0 {
        di -= 1;
        rev.push(digits[di]);
    }

    if is_neg {
        rev.push('-');
    }
    rev.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pads_right_aligned() {
        assert_eq!(format_with_mask(7, "0000"), "0007");
        assert_eq!(format_with_mask(42, "0000"), "0042");
    }

    #[test]
    fn elastic_hash_emits_nothing_for_missing_digits() {
        assert_eq!(format_with_mask(7, "####"), "7");
    }

    #[test]
    fn nine_pads_with_spaces() {
        assert_eq!(format_with_mask(7, "9999"), "   7");
    }

    #[test]
    fn underscore_pads_with_underscores() {
        assert_eq!(format_with_mask(7, "____"), "___7");
    }

    #[test]
    fn literals_pass_through_without_consuming_digits() {
        assert_eq!(format_with_mask(123, "00-00"), "1-23");
    }

    #[test]
    fn overflow_digits_prepended_verbatim() {
        assert_eq!(format_with_mask(12345, "0000"), "12345");
    }

    #[test]
    fn negative_sign_prefixed_after_masking() {
        assert_eq!(format_with_mask(-7, "0000"), "-0007");
        assert_eq!(format_with_mask(-12, "0#0#"), "-012");
    }

    #[test]
    fn empty_mask_is_plain_decimal() {
        assert_eq!(format_with_mask(7, ""), "7");
        assert_eq!(format_with_mask(-12, ""), "-12");
    }

    #[test]
    fn zero_value() {
        assert_eq!(format_with_mask(0, "0000"), "0000");
        assert_eq!(format_with_mask(0, "####"), "0");
    }

    #[test]
    fn mask_is_never_shorter_than_requested_zero_padding() {
        for n in [0i64, 3, 9, 10, 99, 100, 4096] {
            let out = format_with_mask(n, "00000");
            assert!(out.len() >= 5, "{out:?} shorter than mask");
            assert!(out.ends_with(&n.to_string()[n.to_string().len().saturating_sub(5)..]));
        }
    }
}
