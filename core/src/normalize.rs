use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Tashkeel, Quranic annotation and pause marks, tatweel and Arabic punctuation.
    static ref MARKS: Regex = Regex::new(
        r"[\u{064B}-\u{065F}\u{0670}\u{06D6}-\u{06ED}\u{08F0}-\u{08FF}\u{060C}\u{061B}\u{061F}\u{0640}]"
    )
    .expect("valid regex");
}

const ALIF: char = '\u{0627}';

fn unify_alif(c: char) -> char {
    match c {
        // madda, hamza above, hamza below, wasla, wavy hamza above/below
        '\u{0622}' | '\u{0623}' | '\u{0625}' | '\u{0671}' | '\u{0672}' | '\u{0673}' => ALIF,
        _ => c,
    }
}

/// Normalize Arabic text for comparison.
///
/// NFKC folds presentation forms back to base letters, every Alif form becomes a
/// bare Alif, diacritics and recitation marks are dropped and whitespace is
/// collapsed to single spaces. The result is stable under a second call.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let folded: String = text.nfkc().map(unify_alif).collect();
    let stripped = MARKS.replace_all(&folded, "");
    // dropping marks can bring composable characters next to each other
    let recomposed: String = stripped.nfkc().collect();
    recomposed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split already-normalized text into words.
pub fn words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(' ').filter(|w| !w.is_empty())
}
