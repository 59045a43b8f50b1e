use std::path::PathBuf;

use libtreedrop_core::transfer::{read_payload, start_drag, JSON_SLOT};
use libtreedrop_core::{DragPayload, TreedropError};
use serde::Serialize;

use crate::cli::Cli;
use crate::context::TreedropContext;
use crate::output::output_success;

#[derive(Serialize)]
struct DragOutput {
    path: String,
    slot: &'static str,
    effect_allowed: Option<String>,
    /// Exact string placed in the slot
    data: String,
    payload: Option<DragPayload>,
}

pub async fn run(cli: &Cli, paths: &[PathBuf], node_path: &str) -> Result<(), TreedropError> {
    let ctx = TreedropContext::resolve(cli)?;
    let ingestion = ctx.ingest(paths).await?;

    let file = ingestion
        .file_at(node_path)
        .ok_or_else(|| TreedropError::node_not_found(node_path))?;
    let transfer = start_drag(file);

    output_success(
        cli,
        DragOutput {
            path: node_path.to_string(),
            slot: JSON_SLOT,
            effect_allowed: transfer.effect_allowed.clone(),
            data: transfer.get_data(JSON_SLOT).to_string(),
            payload: read_payload(&transfer),
        },
        |out| out.data.clone(),
    );
    Ok(())
}
