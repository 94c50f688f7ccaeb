//! Converter tools: JSON to YAML, case conversion and number bases.

use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;

// ============================================================================
// JSON to YAML
// ============================================================================

/// Convert a JSON document to a simplified YAML rendering.
///
/// This is not a conformant YAML emitter: strings are never quoted or
/// escaped and multi-line strings are written as-is. Good enough for simple
/// documents.
pub fn json_to_yaml(input: &str) -> Result<String, ToolError> {
    let value: Value = serde_json::from_str(input.trim())?;

    match &value {
        Value::Object(_) | Value::Array(_) => Ok(to_yaml(&value, 0).join("\n")),
        scalar => Ok(scalar_text(scalar)),
    }
}

fn to_yaml(value: &Value, indent: usize) -> Vec<String> {
    let prefix = "  ".repeat(indent);
    let mut lines = Vec::new();

    match value {
        Value::Object(map) => {
            for (key, item) in map {
                match nested_or_inline(item) {
                    Some(inline) => lines.push(format!("{prefix}{key}: {inline}")),
                    None => {
                        lines.push(format!("{prefix}{key}:"));
                        lines.extend(to_yaml(item, indent + 1));
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                match nested_or_inline(item) {
                    Some(inline) => lines.push(format!("{prefix}- {inline}")),
                    None => {
                        lines.push(format!("{prefix}-"));
                        lines.extend(to_yaml(item, indent + 1));
                    }
                }
            }
        }
        _ => {}
    }

    lines
}

/// `Some(text)` when the value fits on its parent's line, `None` when it
/// needs a nested block.
fn nested_or_inline(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) if map.is_empty() => Some("{}".to_string()),
        Value::Array(items) if items.is_empty() => Some("[]".to_string()),
        Value::Object(_) | Value::Array(_) => None,
        scalar => Some(scalar_text(scalar)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Case converter
// ============================================================================

/// Every case variant of a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseVariants {
    pub lowercase: String,
    pub uppercase: String,
    pub title_case: String,
    pub camel_case: String,
    pub pascal_case: String,
    pub snake_case: String,
    pub kebab_case: String,
    pub constant_case: String,
}

impl CaseVariants {
    /// One `label: value` line per variant.
    pub fn render(&self) -> String {
        [
            format!("lowercase: {}", self.lowercase),
            format!("UPPERCASE: {}", self.uppercase),
            format!("Title Case: {}", self.title_case),
            format!("camelCase: {}", self.camel_case),
            format!("PascalCase: {}", self.pascal_case),
            format!("snake_case: {}", self.snake_case),
            format!("kebab-case: {}", self.kebab_case),
            format!("CONSTANT_CASE: {}", self.constant_case),
        ]
        .join("\n")
    }
}

pub fn case_convert(text: &str) -> CaseVariants {
    let normalized = text.replace(['-', '_'], " ");
    let words: Vec<&str> = normalized.split_whitespace().collect();

    let camel_case = match words.split_first() {
        Some((first, rest)) => {
            let mut camel = first.to_lowercase();
            rest.iter().for_each(|w| camel.push_str(&capitalize(w)));
            camel
        }
        None => String::new(),
    };

    CaseVariants {
        lowercase: text.to_lowercase(),
        uppercase: text.to_uppercase(),
        title_case: title_case(text),
        camel_case,
        pascal_case: words.iter().map(|w| capitalize(w)).collect(),
        snake_case: join_mapped(&words, "_", str::to_lowercase),
        kebab_case: join_mapped(&words, "-", str::to_lowercase),
        constant_case: join_mapped(&words, "_", str::to_uppercase),
    }
}

fn join_mapped(words: &[&str], separator: &str, f: fn(&str) -> String) -> String {
    words.iter().map(|w| f(w)).collect::<Vec<_>>().join(separator)
}

/// First character uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Uppercase every letter that follows a non-letter, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}

// ============================================================================
// Number base converter
// ============================================================================

/// A decimal integer in the four supported bases, without prefixes.
///
/// Negative values use a sign-prefixed magnitude in every base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberBases {
    pub binary: String,
    pub octal: String,
    pub decimal: String,
    pub hexadecimal: String,
}

impl NumberBases {
    pub fn render(&self) -> String {
        [
            format!("Binary:      {}", self.binary),
            format!("Octal:       {}", self.octal),
            format!("Decimal:     {}", self.decimal),
            format!("Hexadecimal: {}", self.hexadecimal),
        ]
        .join("\n")
    }
}

pub fn number_base_convert(input: &str) -> Result<NumberBases, ToolError> {
    let value: i128 = input
        .trim()
        .parse()
        .map_err(|_| ToolError::Format("Invalid decimal number".to_string()))?;

    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();

    Ok(NumberBases {
        binary: format!("{sign}{magnitude:b}"),
        octal: format!("{sign}{magnitude:o}"),
        decimal: value.to_string(),
        hexadecimal: format!("{sign}{magnitude:X}"),
    })
}
