//! Presentation helpers: name formatting and fixed user-facing messages.

use crate::model::types::{Record, Tab};

/// Shown when the catalog could not be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar os dados.";

/// Connector words kept lowercase by [`capitalize`] (except as first word).
const LOWERCASE_WORDS: &[&str] = &[
    "de", "da", "do", "das", "dos", "e", "em", "com", "para", "por", "a", "o", "as", "os",
];

/// Informational message for an evaluation without matches.
pub fn no_results_message(tab: Tab) -> &'static str {
    match tab {
        Tab::Patentes => "Nenhuma tecnologia encontrada.",
        Tab::Laboratorios => "Nenhum resultado encontrado.",
    }
}

/// Title-case a catalog name.
///
/// - `"laboratorio de fisica"` → `"Laboratorio de Fisica"`
/// - names with `" - "` only get the part before the first separator
///   formatted; the rest is kept as is
/// - names with an unspaced hyphen (`"lab-geo"`) are returned unchanged
pub fn capitalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    if let Some((before, after)) = text.split_once(" - ") {
        return format!("{} - {}", title_case(before), after);
    }

    if text.contains('-') {
        return text.to_string();
    }

    title_case(text)
}

fn title_case(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 || !LOWERCASE_WORDS.contains(&word) {
                upper_first(word)
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Label rendered for a record in the result list.
pub fn display_label(record: &Record) -> String {
    capitalize(record.display_name())
}
