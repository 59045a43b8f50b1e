//! Reconstructed drop hierarchy.

use serde::Serialize;

use crate::types::file::FileHandle;

/// One entry of the reconstructed hierarchy.
///
/// `path` is unique within one ingestion and keys expand/collapse state.
/// A tree is never mutated after it is built; a new drop builds a new tree.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryNode {
    /// Basename of the file or directory
    pub name: String,
    /// Full slash-delimited path from the drop root
    pub path: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// File or directory payload of a node
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    File { file: FileHandle },
    /// Children in host enumeration order, not sorted
    Directory { children: Vec<DirectoryNode> },
}

impl DirectoryNode {
    pub fn file(name: impl Into<String>, path: impl Into<String>, file: FileHandle) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File { file },
        }
    }

    pub fn directory(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<DirectoryNode>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory { children },
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// File handle of a File node
    pub fn file_ref(&self) -> Option<&FileHandle> {
        match &self.kind {
            NodeKind::File { file } => Some(file),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Children of a Directory node; empty for files
    pub fn children(&self) -> &[DirectoryNode] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// Visit every node depth-first, pre-order.
    /// Uses an explicit stack so deep drops cannot overflow the call stack.
    pub fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a DirectoryNode),
    {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            visit(node);
            // Reverse so the first child is popped first
            stack.extend(node.children().iter().rev());
        }
    }

    /// Number of File nodes reachable from this node
    pub fn file_count(&self) -> usize {
        let mut count = 0;
        self.walk(|node| {
            if !node.is_dir() {
                count += 1;
            }
        });
        count
    }

    /// Sum of file sizes reachable from this node
    pub fn total_size(&self) -> u64 {
        let mut total = 0;
        self.walk(|node| {
            if let Some(file) = node.file_ref() {
                total += file.size();
            }
        });
        total
    }

    /// Find the node with the given path
    pub fn find(&self, path: &str) -> Option<&DirectoryNode> {
        let mut found = None;
        self.walk(|node| {
            if found.is_none() && node.path == path {
                found = Some(node);
            }
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirectoryNode {
        DirectoryNode::directory(
            "root",
            "/",
            vec![
                DirectoryNode::file("a.txt", "/a.txt", FileHandle::from_bytes("a.txt", "", &[0; 10])),
                DirectoryNode::directory(
                    "b",
                    "/b",
                    vec![DirectoryNode::file(
                        "c.txt",
                        "/b/c.txt",
                        FileHandle::from_bytes("c.txt", "", &[0; 5]),
                    )],
                ),
            ],
        )
    }

    #[test]
    fn test_walk_is_pre_order() {
        let tree = sample();
        let mut paths = Vec::new();
        tree.walk(|n| paths.push(n.path.as_str()));
        assert_eq!(paths, vec!["/", "/a.txt", "/b", "/b/c.txt"]);
    }

    #[test]
    fn test_counts_and_sizes() {
        let tree = sample();
        assert_eq!(tree.file_count(), 2);
        assert_eq!(tree.total_size(), 15);
    }

    #[test]
    fn test_find() {
        let tree = sample();
        assert_eq!(tree.find("/b/c.txt").map(|n| n.name.as_str()), Some("c.txt"));
        assert!(tree.find("/missing").is_none());
    }

    #[test]
    fn test_serialize_shape() {
        let tree = sample();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["type"], "directory");
        assert_eq!(json["children"][0]["type"], "file");
        assert_eq!(json["children"][0]["file"]["size"], 10);
        assert_eq!(json["children"][1]["children"][0]["path"], "/b/c.txt");
        assert!(json["children"][0].get("children").is_none());
    }
}
