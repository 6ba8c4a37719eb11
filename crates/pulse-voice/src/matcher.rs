//! Transcript normalization and pattern matching.
//!
//! Patterns are whitespace-tokenized; an optional trailing `*` captures
//! the remainder of the utterance as a parameter. Exact mode requires the
//! fixed tokens as a literal prefix of the transcript. Fuzzy mode scores
//! the transcript's fixed-length prefix against the pattern's fixed tokens
//! with a Levenshtein-derived similarity, which tolerates transcription
//! noise around spoken symbol names.

/// Lowercase, trim and collapse internal whitespace.
pub fn normalize(transcript: &str) -> String {
    transcript
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Matching mode for a command pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchMode {
    Exact,
    /// Similarity threshold in [0, 1].
    Fuzzy { threshold: f64 },
}

/// A parsed command pattern: fixed tokens plus an optional trailing
/// wildcard segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPattern {
    fixed: Vec<String>,
    wildcard: bool,
}

impl CommandPattern {
    /// Parse a pattern string such as `"create alert for *"`.
    ///
    /// Tokens before the first `*` are fixed; the `*` (if any) captures
    /// the remaining utterance. Tokens after a `*` are ignored.
    pub fn parse(pattern: &str) -> Self {
        let mut fixed = Vec::new();
        let mut wildcard = false;
        for token in normalize(pattern).split_whitespace() {
            if token == "*" {
                wildcard = true;
                break;
            }
            fixed.push(token.to_string());
        }
        Self { fixed, wildcard }
    }

    pub fn has_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Match an already-normalized transcript against this pattern.
    ///
    /// Returns `Some(capture)` on a hit; the capture is `None` for
    /// patterns without a wildcard. A wildcard pattern requires at least
    /// one remaining token to capture.
    pub fn match_normalized(&self, transcript: &str, mode: MatchMode) -> Option<Option<String>> {
        let tokens: Vec<&str> = transcript.split_whitespace().collect();
        if tokens.len() < self.fixed.len() {
            return None;
        }

        let prefix_hit = match mode {
            MatchMode::Exact => self
                .fixed
                .iter()
                .zip(tokens.iter())
                .all(|(fixed, spoken)| fixed == spoken),
            MatchMode::Fuzzy { threshold } => {
                let spoken_prefix = tokens[..self.fixed.len()].join(" ");
                similarity(&spoken_prefix, &self.fixed.join(" ")) >= threshold
            }
        };
        if !prefix_hit {
            return None;
        }

        if self.wildcard {
            let remainder = tokens[self.fixed.len()..].join(" ");
            if remainder.is_empty() {
                return None;
            }
            Some(Some(remainder))
        } else {
            Some(None)
        }
    }
}

/// Similarity in [0, 1]: 1 − levenshtein / max(len).
///
/// Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Classic two-row Levenshtein distance over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
