use std::path::PathBuf;

use libtreedrop_core::{visible_rows, DirectoryNode, ExpansionState, SelectionSet, TreedropError};
use serde::Serialize;

use crate::cli::Cli;
use crate::context::TreedropContext;
use crate::output::{format_size, output_success};

#[derive(Serialize)]
struct TreeOutput<'a> {
    ingestion_id: String,
    file_count: usize,
    total_bytes: u64,
    tree: &'a DirectoryNode,
}

pub async fn run(cli: &Cli, paths: &[PathBuf]) -> Result<(), TreedropError> {
    let ctx = TreedropContext::resolve(cli)?;
    let ingestion = ctx.ingest(paths).await?;

    output_success(
        cli,
        TreeOutput {
            ingestion_id: ingestion.id.to_string(),
            file_count: ingestion.files.len(),
            total_bytes: ingestion.total_bytes(),
            tree: &ingestion.tree,
        },
        |out| render_tree(out.tree),
    );
    Ok(())
}

/// Indented listing with every directory expanded
fn render_tree(tree: &DirectoryNode) -> String {
    let expansion = ExpansionState::all_expanded(tree);
    visible_rows(tree, &expansion, &SelectionSet::new())
        .iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            if row.is_dir {
                format!("{}{}/", indent, row.name)
            } else {
                let size = tree
                    .find(&row.path)
                    .and_then(|n| n.file_ref())
                    .map(|f| format_size(f.size()))
                    .unwrap_or_default();
                format!("{}{} ({})", indent, row.name, size)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use libtreedrop_core::FileHandle;

    #[test]
    fn test_render_tree() {
        let tree = DirectoryNode::directory(
            "project",
            "/project",
            vec![
                DirectoryNode::file("a.txt", "/project/a.txt", FileHandle::from_bytes("a.txt", "", &[0; 10])),
                DirectoryNode::directory(
                    "b",
                    "/project/b",
                    vec![DirectoryNode::file(
                        "c.txt",
                        "/project/b/c.txt",
                        FileHandle::from_bytes("c.txt", "", &[0; 5]),
                    )],
                ),
            ],
        );
        assert_eq!(
            render_tree(&tree),
            "project/\n  a.txt (10 B)\n  b/\n    c.txt (5 B)"
        );
    }
}
