use std::path::PathBuf;

use libtreedrop_core::{ComposeSession, FileIdentity, SubmitOutcome, TreedropError};
use serde::Serialize;
use tracing::info;

use crate::cli::Cli;
use crate::context::TreedropContext;
use crate::output::output_success;

#[derive(Serialize)]
struct AskOutput {
    query: String,
    attached: Vec<FileIdentity>,
    reply: Option<String>,
}

pub async fn run(
    cli: &Cli,
    paths: &[PathBuf],
    query: &str,
    attach: &[String],
) -> Result<(), TreedropError> {
    let ctx = TreedropContext::resolve(cli)?;
    let ingestion = ctx.ingest(paths).await?;

    let mut session = ComposeSession::new(ctx.backend()?, ingestion.index(), ctx.config.chat.feedback);
    // Repeating --attach names the file once
    let mut picked = Vec::with_capacity(attach.len());
    for node_path in attach {
        let file = ingestion
            .file_at(node_path)
            .ok_or_else(|| TreedropError::node_not_found(node_path))?;
        picked.push(file.clone());
    }
    session.attach_picked(&picked);
    let attached = session.selection().identities();
    info!(attached = attached.len(), "submitting query");

    match session.submit(query).await {
        SubmitOutcome::Skipped => Err(TreedropError::InvalidArgs(
            "Nothing to send: the query is empty and no file is attached".to_string(),
        )),
        SubmitOutcome::Replied { reply } => {
            output_success(
                cli,
                AskOutput {
                    query: query.to_string(),
                    attached,
                    reply,
                },
                |out| out.reply.clone().unwrap_or_default(),
            );
            Ok(())
        }
        SubmitOutcome::Failed(e) => Err(TreedropError::Backend(e)),
    }
}
