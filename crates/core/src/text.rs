//! Text tools: statistics and regular expression testing.

use regex::Regex;
use serde::Serialize;

use crate::error::ToolError;

const WORDS_PER_MINUTE: usize = 200;

/// Shown until both the pattern and the text are filled in.
pub const REGEX_PROMPT: &str = "Enter pattern and text to test";

// ============================================================================
// Text statistics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub lines: usize,
    pub sentences: usize,
    pub avg_word_length: f64,
    pub reading_time_minutes: usize,
}

impl TextStats {
    pub fn render(&self) -> String {
        [
            format!("Characters: {}", self.characters),
            format!("Characters (no spaces): {}", self.characters_no_spaces),
            format!("Words: {}", self.words),
            format!("Lines: {}", self.lines),
            format!("Sentences: {}", self.sentences),
            format!("Avg word length: {}", self.avg_word_length),
            format!("Reading time: {} min", self.reading_time_minutes),
        ]
        .join("\n")
    }
}

/// Count characters, words, lines and sentences of `text`.
///
/// Characters are Unicode scalar values. Only space, tab and newline are
/// excluded from the "no spaces" count. A sentence is a maximal run of
/// `.`, `!` or `?`.
pub fn stats_analyze(text: &str) -> TextStats {
    let characters = text.chars().count();
    let characters_no_spaces = text
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\n'))
        .count();
    let words = text.split_whitespace().count();
    let lines = text.split('\n').count();
    let sentences = count_sentence_terminators(text);

    let avg_word_length = if words > 0 {
        (characters_no_spaces as f64 / words as f64 * 100.0).round_ties_even() / 100.0
    } else {
        0.0
    };

    let reading_time_minutes = if text.is_empty() {
        0
    } else {
        (words / WORDS_PER_MINUTE).max(1)
    };

    TextStats {
        characters,
        characters_no_spaces,
        words,
        lines,
        sentences,
        avg_word_length,
        reading_time_minutes,
    }
}

fn count_sentence_terminators(text: &str) -> usize {
    let mut count = 0;
    let mut in_run = false;
    for c in text.chars() {
        let terminator = matches!(c, '.' | '!' | '?');
        if terminator && !in_run {
            count += 1;
        }
        in_run = terminator;
    }
    count
}

// ============================================================================
// Regex tester
// ============================================================================

/// A single match with character offsets and capture groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegexMatch {
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Capture groups 1..n; `None` when the group did not participate.
    pub groups: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegexReport {
    pub pattern: String,
    pub matches: Vec<RegexMatch>,
}

impl RegexReport {
    pub fn render(&self) -> String {
        if self.matches.is_empty() {
            return "No matches found".to_string();
        }

        let mut lines = vec![format!("Found {} match(es):", self.matches.len()), String::new()];
        for (i, m) in self.matches.iter().enumerate() {
            lines.push(format!(
                "Match {}: '{}' at position {}-{}",
                i + 1,
                m.text,
                m.start,
                m.end
            ));
            for (g, group) in m.groups.iter().enumerate() {
                match group {
                    Some(text) => lines.push(format!("  Group {}: '{}'", g + 1, text)),
                    None => lines.push(format!("  Group {}: <none>", g + 1)),
                }
            }
        }
        lines.join("\n")
    }
}

/// Find every non-overlapping match of `pattern` in `text`.
///
/// Offsets are counted in characters, not bytes.
pub fn regex_test(pattern: &str, text: &str) -> Result<RegexReport, ToolError> {
    let re = Regex::new(pattern)?;

    // Byte offsets arrive in increasing order; count chars incrementally.
    let mut cursor = CharCursor::default();
    let mut matches = Vec::new();
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let start = cursor.advance(text, whole.start());
        let end = cursor.advance(text, whole.end());
        matches.push(RegexMatch {
            text: whole.as_str().to_string(),
            start,
            end,
            groups: caps
                .iter()
                .skip(1)
                .map(|g| g.map(|g| g.as_str().to_string()))
                .collect(),
        });
    }

    Ok(RegexReport {
        pattern: pattern.to_string(),
        matches,
    })
}

/// Converts non-decreasing byte offsets to char offsets in one pass.
#[derive(Default)]
struct CharCursor {
    byte: usize,
    chars: usize,
}

impl CharCursor {
    fn advance(&mut self, text: &str, byte_offset: usize) -> usize {
        self.chars += text[self.byte..byte_offset].chars().count();
        self.byte = byte_offset;
        self.chars
    }
}
