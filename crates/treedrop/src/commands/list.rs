use std::path::PathBuf;

use comfy_table::{Cell, Table};
use libtreedrop_core::{IngestManifest, TreedropError};

use crate::cli::Cli;
use crate::context::TreedropContext;
use crate::output::{format_size, output_success};

pub async fn run(cli: &Cli, paths: &[PathBuf]) -> Result<(), TreedropError> {
    let ctx = TreedropContext::resolve(cli)?;
    let ingestion = ctx.ingest(paths).await?;

    output_success(cli, ingestion.manifest(), render_table);
    Ok(())
}

fn render_table(manifest: &IngestManifest) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Path", "Name", "Size", "Type"]);
    for file in &manifest.files {
        table.add_row(vec![
            Cell::new(&file.path),
            Cell::new(&file.name),
            Cell::new(format_size(file.size)),
            Cell::new(&file.mime_type),
        ]);
    }
    format!(
        "{}\n{} files, {}",
        table,
        manifest.file_count,
        format_size(manifest.total_bytes)
    )
}
