//! Sentence splitting over raw lines.
//!
//! Lines are joined and re-split so the output holds one sentence per entry.
//! Sentences may span lines; a fragment that does not end in terminal
//! punctuation is carried into the next line. User-supplied abbreviations
//! (`Mr.`, `e.g.`) are masked before splitting so their periods never end a
//! sentence.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Placeholder left where an abbreviation was masked.
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#ABTAG([0-9]+)#").expect("valid regex"));

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Masks abbreviations with `#ABTAG<i>#` placeholders and restores them.
#[derive(Debug, Clone, Default)]
pub struct AbbreviationGuard {
    abbreviations: Vec<String>,
    /// First index of each distinct entry.
    index: HashMap<String, usize>,
    /// One alternation over every entry, in list order.
    pattern: Option<Regex>,
}

impl AbbreviationGuard {
    /// Build a guard for the given literal strings.
    ///
    /// Entries are trimmed; blank entries keep their index but never match.
    /// If the combined pattern exceeds the regex size limit, protection is
    /// disabled with a warning.
    pub fn new<S: AsRef<str>>(abbreviations: &[S]) -> Self {
        let abbreviations: Vec<String> = abbreviations
            .iter()
            .map(|a| a.as_ref().trim().to_string())
            .collect();

        let mut index = HashMap::new();
        for (i, a) in abbreviations.iter().enumerate() {
            if !a.is_empty() {
                index.entry(a.clone()).or_insert(i);
            }
        }

        let alternatives: Vec<String> = abbreviations
            .iter()
            .filter(|a| !a.is_empty())
            .map(|a| regex::escape(a))
            .collect();
        let pattern = if alternatives.is_empty() {
            None
        } else {
            match Regex::new(&format!(r"\b(?:{})", alternatives.join("|"))) {
                Ok(pattern) => Some(pattern),
                Err(err) => {
                    tracing::warn!(
                        entries = alternatives.len(),
                        error = %err,
                        "abbreviation list too large; abbreviations will not be protected"
                    );
                    None
                }
            }
        };

        Self {
            abbreviations,
            index,
            pattern,
        }
    }

    /// `true` if no entry can ever match.
    pub const fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    /// Replace every abbreviation occurrence starting at a word boundary.
    ///
    /// All entries are matched against the original line in one pass, so a
    /// placeholder is never rewritten by a later entry. At one position the
    /// earliest listed entry wins.
    pub fn protect(&self, line: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return line.to_string();
        };
        pattern
            .replace_all(line, |caps: &Captures<'_>| match self.index.get(&caps[0]) {
                Some(i) => format!("#ABTAG{i}#"),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Put the original abbreviations back.
    pub fn restore(&self, text: &str) -> String {
        if !text.contains("#ABTAG") {
            return text.to_string();
        }
        PLACEHOLDER_PATTERN
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.abbreviations.get(i))
                    .map_or_else(|| caps[0].to_string(), Clone::clone)
            })
            .into_owned()
    }
}

/// Line-joining sentence splitter.
#[derive(Debug, Clone, Default)]
pub struct SentenceSplitter {
    guard: Option<AbbreviationGuard>,
    keep_trailing: bool,
}

impl SentenceSplitter {
    /// A splitter with no abbreviation protection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Protect the given abbreviations from being read as sentence ends.
    pub fn with_abbreviations<S: AsRef<str>>(mut self, abbreviations: &[S]) -> Self {
        let guard = AbbreviationGuard::new(abbreviations);
        self.guard = (!guard.is_empty()).then_some(guard);
        self
    }

    /// Emit an unterminated final fragment instead of discarding it.
    pub const fn keep_trailing(mut self, keep: bool) -> Self {
        self.keep_trailing = keep;
        self
    }

    /// Split `lines` into sentences.
    #[tracing::instrument(skip_all, fields(lines = lines.len()))]
    pub fn split<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let mut out = Vec::new();
        let mut pending = String::new();

        for raw in lines {
            let line = match &self.guard {
                Some(guard) => guard.protect(raw.as_ref()),
                None => raw.as_ref().to_string(),
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let ends_terminated = line.chars().last().is_some_and(is_sentence_terminator);
            let mut fragments = split_keeping_terminators(line);

            if fragments.len() > 1 {
                fragments[0] = join(&pending, &fragments[0]);
                pending.clear();
                if !ends_terminated {
                    pending = fragments.pop().unwrap_or_default().trim().to_string();
                }
                out.extend(
                    fragments
                        .iter()
                        .map(|f| f.trim())
                        .filter(|f| !f.is_empty())
                        .map(str::to_string),
                );
            } else if ends_terminated {
                let sentence = join(&pending, line);
                pending.clear();
                if !sentence.is_empty() {
                    out.push(sentence);
                }
            } else {
                pending = join(&pending, line);
            }
        }

        if self.keep_trailing && !pending.is_empty() {
            out.push(pending);
        }

        match &self.guard {
            Some(guard) => out.iter().map(|s| guard.restore(s)).collect(),
            None => out,
        }
    }
}

/// Split `lines` into sentences, protecting `abbreviations` if given.
///
/// ```
/// use neolo_core::sentences::sentence_split;
///
/// let lines = ["first sentence. second", "sentence."];
/// assert_eq!(
///     sentence_split(&lines, None),
///     vec!["first sentence.", "second sentence."]
/// );
/// ```
pub fn sentence_split<S: AsRef<str>>(lines: &[S], abbreviations: Option<&[String]>) -> Vec<String> {
    let splitter = match abbreviations {
        Some(abbrevs) => SentenceSplitter::new().with_abbreviations(abbrevs),
        None => SentenceSplitter::new(),
    };
    splitter.split(lines)
}

/// Cut `line` after each run of terminal punctuation, keeping the run.
fn split_keeping_terminators(line: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if is_sentence_terminator(ch) && !chars.peek().copied().is_some_and(is_sentence_terminator)
        {
            fragments.push(std::mem::take(&mut current));
        }
    }
    if !current.trim().is_empty() {
        fragments.push(current);
    }
    fragments
}

fn join(pending: &str, fragment: &str) -> String {
    format!("{pending} {fragment}").trim().to_string()
}
