//! Locale-aware text comparison for sorting names and interests.
//!
//! Approximates the root collation used by browsers for Latin-script text.
//! Input is decomposed (NFD) so combining marks never count as letters:
//! strings compare first by base letters, ignoring case and accents, then
//! unaccented before accented, then lowercase before uppercase.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Base letters for lowercase Latin letters that have no canonical
/// decomposition. Ligatures and sharp s expand to two letters.
fn fold_undecomposed(c: char) -> Option<&'static str> {
    let base = match c {
        'đ' | 'ð' => "d",
        'ħ' => "h",
        'ı' => "i",
        'ł' | 'ŀ' => "l",
        'ø' => "o",
        'ŧ' => "t",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ĳ' => "ij",
        _ => return None,
    };
    Some(base)
}

/// Primary weight: symbols, then digits, then letters.
fn class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy)]
struct Weight {
    base: char,
    accented: bool,
    upper: bool,
}

fn weights(s: &str) -> Vec<Weight> {
    let mut out: Vec<Weight> = Vec::new();
    for c in s.nfd() {
        let upper = c.is_uppercase();
        for lower in c.to_lowercase() {
            if is_combining_mark(lower) {
                if let Some(last) = out.last_mut() {
                    last.accented = true;
                }
                continue;
            }
            match fold_undecomposed(lower) {
                Some(base) => out.extend(base.chars().map(|base| Weight {
                    base,
                    accented: true,
                    upper,
                })),
                None => out.push(Weight {
                    base: lower,
                    accented: false,
                    upper,
                }),
            }
        }
    }
    out
}

fn compare_level<F, K>(a: &[Weight], b: &[Weight], key: F) -> Ordering
where
    F: Fn(&Weight) -> K,
    K: Ord,
{
    a.iter().map(&key).cmp(b.iter().map(&key))
}

/// Compare two strings the way a user expects a sorted list to read.
///
/// Strings that tie on every level fall back to code point order.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let wa = weights(a);
    let wb = weights(b);

    compare_level(&wa, &wb, |w| (class(w.base), w.base))
        .then_with(|| compare_level(&wa, &wb, |w| w.accented))
        .then_with(|| compare_level(&wa, &wb, |w| w.upper))
        .then_with(|| a.cmp(b))
}
