//! Porter stemming algorithm implementation.
//!
//! The Porter stemmer applies a series of rewrite rules in five steps:
//! 1. Plurals and -ed/-ing suffixes, terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! Stems are not guaranteed to be real words (`societies` → `societi`).
//! Words that are not plain ASCII are only lowercased.
//!
//! # Examples
//!
//! ```
//! use collegebot::analysis::token_filter::stem::Stemmer;
//! use collegebot::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("internships"), "internship");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

// Longer suffixes precede the shorter ones they end with.
const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemming algorithm implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    /// Check if the byte at `pos` acts as a consonant.
    fn is_consonant(word: &[u8], pos: usize) -> bool {
        match word[pos] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => pos == 0 || !Self::is_consonant(word, pos - 1),
            _ => true,
        }
    }

    /// Calculate the measure of a word (number of VC sequences).
    fn measure(word: &[u8]) -> usize {
        let n = word.len();
        let mut i = 0;

        // Skip initial consonants
        while i < n && Self::is_consonant(word, i) {
            i += 1;
        }

        let mut m = 0;
        loop {
            while i < n && !Self::is_consonant(word, i) {
                i += 1;
            }
            if i >= n {
                break;
            }
            while i < n && Self::is_consonant(word, i) {
                i += 1;
            }
            m += 1;
        }

        m
    }

    fn contains_vowel(word: &[u8]) -> bool {
        (0..word.len()).any(|i| !Self::is_consonant(word, i))
    }

    fn ends_with_double_consonant(word: &[u8]) -> bool {
        let n = word.len();
        n >= 2 && word[n - 1] == word[n - 2] && Self::is_consonant(word, n - 1)
    }

    /// Consonant-vowel-consonant ending where the last consonant is not w, x or y.
    fn ends_cvc(word: &[u8]) -> bool {
        let n = word.len();
        n >= 3
            && Self::is_consonant(word, n - 3)
            && !Self::is_consonant(word, n - 2)
            && Self::is_consonant(word, n - 1)
            && !matches!(word[n - 1], b'w' | b'x' | b'y')
    }

    /// Replace the first matching suffix from `rules` when the remaining stem
    /// has a measure above `min_measure`. Only the first match is considered.
    fn replace_first(word: &mut Vec<u8>, rules: &[(&str, &str)], min_measure: usize) {
        for (suffix, replacement) in rules {
            if word.ends_with(suffix.as_bytes()) {
                let stem_len = word.len() - suffix.len();
                if Self::measure(&word[..stem_len]) > min_measure {
                    word.truncate(stem_len);
                    word.extend_from_slice(replacement.as_bytes());
                }
                return;
            }
        }
    }

    fn step1a(word: &mut Vec<u8>) {
        if word.ends_with(b"sses") || word.ends_with(b"ies") {
            word.truncate(word.len() - 2);
        } else if word.ends_with(b"ss") {
            // unchanged
        } else if word.ends_with(b"s") {
            word.pop();
        }
    }

    fn step1b(word: &mut Vec<u8>) {
        let n = word.len();
        let stripped = if word.ends_with(b"eed") {
            if Self::measure(&word[..n - 3]) > 0 {
                word.pop();
            }
            false
        } else if word.ends_with(b"ed") && Self::contains_vowel(&word[..n - 2]) {
            word.truncate(n - 2);
            true
        } else if word.ends_with(b"ing") && Self::contains_vowel(&word[..n - 3]) {
            word.truncate(n - 3);
            true
        } else {
            false
        };

        if !stripped {
            return;
        }

        if word.ends_with(b"at") || word.ends_with(b"bl") || word.ends_with(b"iz") {
            word.push(b'e');
        } else if Self::ends_with_double_consonant(word)
            && !matches!(word.last(), Some(b'l' | b's' | b'z'))
        {
            word.pop();
        } else if Self::measure(word) == 1 && Self::ends_cvc(word) {
            word.push(b'e');
        }
    }

    fn step1c(word: &mut [u8]) {
        let n = word.len();
        if word.ends_with(b"y") && Self::contains_vowel(&word[..n - 1]) {
            word[n - 1] = b'i';
        }
    }

    fn step4(word: &mut Vec<u8>) {
        for suffix in STEP4_SUFFIXES {
            if !word.ends_with(suffix.as_bytes()) {
                continue;
            }
            let stem_len = word.len() - suffix.len();
            let stem = &word[..stem_len];
            let allowed = *suffix != "ion" || matches!(stem.last(), Some(b's' | b't'));
            if allowed && Self::measure(stem) > 1 {
                word.truncate(stem_len);
            }
            return;
        }
    }

    fn step5(word: &mut Vec<u8>) {
        if word.ends_with(b"e") {
            let stem = &word[..word.len() - 1];
            let m = Self::measure(stem);
            if m > 1 || (m == 1 && !Self::ends_cvc(stem)) {
                word.pop();
            }
        }

        if word.ends_with(b"ll") && Self::measure(word) > 1 {
            word.pop();
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();
        if word.len() <= 2 || !word.is_ascii() {
            return word;
        }

        let mut bytes = word.into_bytes();
        Self::step1a(&mut bytes);
        Self::step1b(&mut bytes);
        Self::step1c(&mut bytes);
        Self::replace_first(&mut bytes, STEP2_SUFFIXES, 0);
        Self::replace_first(&mut bytes, STEP3_SUFFIXES, 0);
        Self::step4(&mut bytes);
        Self::step5(&mut bytes);

        // Only ASCII bytes were removed or appended.
        String::from_utf8(bytes).unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}
