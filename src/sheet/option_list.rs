use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const UNAVAILABLE_NOTE: &str = "Unavailable";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub key: String,
    pub label: String,
}

impl OptionItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChoice {
    pub index: usize,
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow<'a> {
    pub item: &'a OptionItem,
    pub selected: bool,
    pub disabled: bool,
}

impl OptionRow<'_> {
    pub fn note(&self) -> Option<&'static str> {
        self.disabled.then_some(UNAVAILABLE_NOTE)
    }
}

/// Action-sheet list: at most one selected item, some items disabled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSheet {
    items: Vec<OptionItem>,
    selected: Option<usize>,
    disabled: BTreeSet<usize>,
}

impl OptionSheet {
    pub fn new(items: Vec<OptionItem>) -> Self {
        Self {
            items,
            selected: None,
            disabled: BTreeSet::new(),
        }
    }

    pub fn with_selected(mut self, index: usize) -> Self {
        if index < self.items.len() {
            self.selected = Some(index);
        }
        self
    }

    pub fn with_disabled(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.disabled.extend(indices);
        self
    }

    pub fn items(&self) -> &[OptionItem] {
        &self.items
    }

    pub fn selected(&self) -> Option<&OptionItem> {
        self.selected.and_then(|index| self.items.get(index))
    }

    pub fn is_disabled(&self, index: usize) -> bool {
        self.disabled.contains(&index)
    }

    pub fn rows(&self) -> impl Iterator<Item = OptionRow<'_>> {
        self.items.iter().enumerate().map(|(index, item)| OptionRow {
            item,
            selected: self.selected == Some(index),
            disabled: self.is_disabled(index),
        })
    }

    pub fn choose(&mut self, index: usize) -> Option<OptionChoice> {
        let Some(item) = self.items.get(index) else {
            tracing::warn!(index, "option index out of range");
            return None;
        };
        if self.is_disabled(index) {
            return None;
        }
        self.selected = Some(index);
        Some(OptionChoice {
            index,
            key: item.key.clone(),
            label: item.label.clone(),
        })
    }
}
