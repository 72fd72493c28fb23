//! Solidity argument names to Rust identifiers

use convert_case::{Case, Casing};

/// Words written fully upper-case in exported identifiers
const ACRONYMS: &[&str] = &["id", "url", "uri", "api", "nft"];

/// Rust keywords that need the raw identifier prefix as field names
pub const KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "try", "type", "unsafe", "use", "where",
    "while", "yield",
];

/// Exported identifier: leading underscores dropped, first letter upper-cased,
/// and a leading or trailing acronym upper-cased whole (`tokenId` -> `TokenID`)
pub fn normalize(source_name: &str) -> String {
    let trimmed = source_name.trim_start_matches('_');
    let trimmed = if trimmed.is_empty() { source_name } else { trimmed };

    let mut name = upper_first(trimmed);

    let lower = name.to_ascii_lowercase();
    for acronym in ACRONYMS {
        if lower == *acronym {
            return acronym.to_ascii_uppercase();
        }
        // Only at a word boundary, so "Valid" stays "Valid"
        if lower.ends_with(acronym) {
            let split = name.len() - acronym.len();
            if name[split..].starts_with(|c: char| c.is_ascii_uppercase()) {
                name.replace_range(split.., &acronym.to_ascii_uppercase());
            }
        }
        if lower.starts_with(acronym) {
            let rest = &name[acronym.len()..];
            if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
                name = format!("{}{}", acronym.to_ascii_uppercase(), rest);
            }
        }
    }

    name
}

/// snake_case field name, escaped when it collides with a keyword
pub fn field_name(source_name: &str) -> String {
    let snake = source_name.trim_start_matches('_').to_case(Case::Snake);
    let snake = if snake.is_empty() { "arg".to_string() } else { snake };

    // Not valid even as raw identifiers
    if matches!(snake.as_str(), "self" | "super" | "crate") {
        return format!("{}_", snake);
    }
    if KEYWORDS.contains(&snake.as_str()) {
        return format!("r#{}", snake);
    }
    snake
}

/// Whether `word` cannot be used as a plain Rust identifier
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word) || matches!(word, "self" | "Self" | "super" | "crate")
}

/// Exported and field names for an argument the ABI leaves unnamed
pub fn positional_names(index: usize) -> (String, String) {
    (format!("Arg{}", index), format!("arg{}", index))
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
