//! Drag-and-drop transfer between the tree and the compose surface.
//!
//! The payload carries identity and type only, never file bytes. The drop
//! side re-resolves the identity against its own known file list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::identity::IdentityIndex;
use crate::selection::SelectionSet;
use crate::types::file::FileHandle;
use crate::types::identity::FileIdentity;

/// Slot of the drag-data channel that carries the payload
pub const JSON_SLOT: &str = "application/json";

/// Drop effect advertised on drag start
pub const EFFECT_COPY: &str = "copy";

/// Wire format: `{"name": string, "size": number, "type": string}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime_type: String,
}

impl DragPayload {
    pub fn from_file(file: &FileHandle) -> Self {
        Self {
            name: file.name().to_string(),
            size: file.size(),
            mime_type: file.mime_type().to_string(),
        }
    }

    pub fn identity(&self) -> FileIdentity {
        FileIdentity::new(self.name.clone(), self.size)
    }
}

/// Generic structured drag-data channel: format slot → string data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    slots: BTreeMap<String, String>,
    pub effect_allowed: Option<String>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        self.slots.insert(format.to_string(), data.into());
    }

    /// Data in a slot; empty string when the slot is unset, as hosts do
    pub fn get_data(&self, format: &str) -> &str {
        self.slots.get(format).map(String::as_str).unwrap_or("")
    }
}

/// Fill the drag channel for a tree leaf
pub fn start_drag(file: &FileHandle) -> DataTransfer {
    let mut transfer = DataTransfer::new();
    let payload = DragPayload::from_file(file);
    // Serializing a struct of strings and integers cannot fail
    if let Ok(json) = serde_json::to_string(&payload) {
        transfer.set_data(JSON_SLOT, json);
    }
    transfer.effect_allowed = Some(EFFECT_COPY.to_string());
    transfer
}

/// Parse the payload; `None` for a missing or malformed slot
pub fn read_payload(transfer: &DataTransfer) -> Option<DragPayload> {
    match serde_json::from_str(transfer.get_data(JSON_SLOT)) {
        Ok(payload) => Some(payload),
        Err(e) => {
            debug!(error = %e, "ignoring malformed drag payload");
            None
        }
    }
}

/// Resolve a dropped payload against the known files and toggle the match.
///
/// Returns the toggled file. A payload that matches nothing, or cannot be
/// parsed, leaves the selection untouched and returns `None`.
pub fn accept_drop(
    transfer: &DataTransfer,
    known: &IdentityIndex,
    selection: &mut SelectionSet,
) -> Option<FileHandle> {
    let payload = read_payload(transfer)?;
    let file = match known.resolve(&payload.identity()) {
        Some(file) => file.clone(),
        None => {
            debug!(name = %payload.name, size = payload.size, "drop matches no known file");
            return None;
        }
    };
    selection.toggle(&file);
    Some(file)
}
