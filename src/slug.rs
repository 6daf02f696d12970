//! GitHub-compatible heading slugs.
//!
//! [`slugify`] turns text into an anchor fragment; [`Slugger`] additionally
//! keeps track of the slugs it has handed out so repeated headings receive
//! `-1`, `-2`, … suffixes.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Convert text into a lowercase, hyphenated anchor fragment.
///
/// Everything that is not a letter, combining mark, number, connector
/// punctuation, space or hyphen is dropped. Each remaining space becomes a
/// hyphen, so runs of spaces are not collapsed.
///
/// # Examples
///
/// ```
/// use mdtoc::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("C++ & Rust!"), "c--rust");
/// assert_eq!(slugify("snake_case"), "snake_case");
/// ```
pub fn slugify(text: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    let disallowed =
        DISALLOWED.get_or_init(|| Regex::new(r"[^\p{L}\p{M}\p{N}\p{Pc} -]").unwrap());

    disallowed
        .replace_all(&text.to_lowercase(), "")
        .replace(' ', "-")
}

/// Hands out slugs that are unique for the lifetime of the value.
///
/// A `Slugger` is meant to be scoped to one document. Create a new one per
/// extraction instead of sharing it; [`Slugger::reset`] exists for callers
/// that reuse a buffer.
#[derive(Debug, Default, Clone)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text`, appending `-N` when the slug was already produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdtoc::slug::Slugger;
    ///
    /// let mut slugger = Slugger::new();
    /// assert_eq!(slugger.slug("Intro"), "intro");
    /// assert_eq!(slugger.slug("Intro"), "intro-1");
    /// assert_eq!(slugger.slug("intro-1"), "intro-1-1");
    /// ```
    pub fn slug(&mut self, text: &str) -> String {
        let original = slugify(text);
        let mut result = original.clone();

        // A suffixed candidate may itself collide with a literal heading
        // such as "intro-1", so keep counting until a free slot turns up.
        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_insert(0);
            *count += 1;
            result = format!("{original}-{count}");
        }

        self.occurrences.insert(result.clone(), 0);
        result
    }

    /// Forget every slug handed out so far.
    pub fn reset(&mut self) {
        self.occurrences.clear();
    }
}
