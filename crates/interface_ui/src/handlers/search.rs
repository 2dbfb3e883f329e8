//! Live filter over the `.filtrable` entries of a page
//!
//! The host debounces keystrokes and sends the query together with the
//! text of each entry. Matching is a case-insensitive substring test.

use serde::Deserialize;

use crate::render::{elements, RenderInstruction};

/// Shortest query that filters anything
pub const MIN_QUERY_CHARS: usize = 2;

/// A filterable entry as the host sees it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterableItem {
    pub key: String,
    pub text: String,
}

impl FilterableItem {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// Instructions for a new value of the search field
///
/// Queries shorter than [`MIN_QUERY_CHARS`] once trimmed only clear the
/// results container and leave the entries as they are.
pub fn on_search_input(query: &str, items: &[FilterableItem]) -> Vec<RenderInstruction> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return vec![RenderInstruction::ClearContent {
            target: elements::SEARCH_RESULTS,
        }];
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .map(|entry| {
            let item = entry.key.clone();
            if entry.text.to_lowercase().contains(&needle) {
                RenderInstruction::ShowItem { item }
            } else {
                RenderInstruction::HideItem { item }
            }
        })
        .collect()
}
