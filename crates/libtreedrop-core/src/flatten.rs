use crate::types::file::FileHandle;
use crate::types::node::DirectoryNode;

/// Project a tree into its files, depth-first pre-order.
///
/// Directories contribute no file of their own. Every File node appears
/// exactly once, so the result length equals `tree.file_count()`, and the
/// order is the same on every call.
pub fn flatten(tree: &DirectoryNode) -> Vec<FileHandle> {
    let mut files = Vec::new();
    tree.walk(|node| {
        if let Some(file) = node.file_ref() {
            files.push(file.clone());
        }
    });
    files
}
