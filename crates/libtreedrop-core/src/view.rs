//! Render-side projections of a tree: expand/collapse state and visible rows.

use std::collections::HashSet;

use serde::Serialize;

use crate::selection::SelectionSet;
use crate::types::node::DirectoryNode;
use crate::SYNTHETIC_ROOT_PATH;

/// Expanded directories, keyed by node path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl Default for ExpansionState {
    /// Starts with the synthetic root expanded
    fn default() -> Self {
        let mut expanded = HashSet::new();
        expanded.insert(SYNTHETIC_ROOT_PATH.to_string());
        Self { expanded }
    }
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every directory of the tree expanded
    pub fn all_expanded(tree: &DirectoryNode) -> Self {
        let mut state = Self::new();
        state.expand_all(tree);
        state
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Flip a directory; returns whether it is expanded afterwards
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.expanded.remove(path) {
            false
        } else {
            self.expanded.insert(path.to_string());
            true
        }
    }

    pub fn expand_all(&mut self, tree: &DirectoryNode) {
        tree.walk(|node| {
            if node.is_dir() {
                self.expanded.insert(node.path.clone());
            }
        });
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

/// One rendered line of the tree view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleRow {
    pub depth: usize,
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    pub expanded: bool,
    /// Selection indicator; always false for directories
    pub selected: bool,
}

/// Pre-order rows of the tree, skipping children of collapsed directories
pub fn visible_rows(
    tree: &DirectoryNode,
    expansion: &ExpansionState,
    selection: &SelectionSet,
) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    let mut stack = vec![(tree, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        let expanded = node.is_dir() && expansion.is_expanded(&node.path);
        rows.push(VisibleRow {
            depth,
            name: node.name.clone(),
            path: node.path.clone(),
            is_dir: node.is_dir(),
            expanded,
            selected: node.file_ref().map(|f| selection.has(f)).unwrap_or(false),
        });
        if expanded {
            stack.extend(node.children().iter().rev().map(|c| (c, depth + 1)));
        }
    }
    rows
}
