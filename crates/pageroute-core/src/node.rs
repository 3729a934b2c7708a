//! Scanned file and directory node types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A single scanned page file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// Path relative to the scan root, `/` separated.
    pub path: String,
    /// File name without its extension.
    pub name: CompactString,
    /// Trailing dotted suffix including the dot (`".js"`), or empty.
    pub extension: CompactString,
}

impl FileNode {
    /// Create a file node from its root-relative path.
    ///
    /// The name and extension are derived from the last path segment.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = path.rsplit('/').next().unwrap_or(&path);
        let extension = extension_of(file_name);
        let name = &file_name[..file_name.len() - extension.len()];

        Self {
            name: name.into(),
            extension: extension.into(),
            path,
        }
    }

    /// Path of the parent directory relative to the scan root.
    ///
    /// Files directly under the root return `"."`.
    pub fn parent_dir(&self) -> &str {
        match self.path.rsplit_once('/') {
            Some((parent, _)) if !parent.is_empty() => parent,
            _ => ".",
        }
    }
}

/// A scanned directory and its surviving children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirNode {
    /// Path relative to the scan root, `/` separated.
    pub path: String,
    /// Directory name.
    pub name: CompactString,
    /// Children in directory-listing order.
    pub children: Vec<ScanNode>,
}

impl DirNode {
    /// Create a directory node.
    pub fn new(
        path: impl Into<String>,
        name: impl Into<CompactString>,
        children: Vec<ScanNode>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            children,
        }
    }
}

/// Either a file or a directory in a scanned tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScanNode {
    /// Regular file.
    File(FileNode),
    /// Directory.
    #[serde(rename = "directory")]
    Dir(DirNode),
}

impl ScanNode {
    /// Root-relative path of the node.
    pub fn path(&self) -> &str {
        match self {
            ScanNode::File(file) => &file.path,
            ScanNode::Dir(dir) => &dir.path,
        }
    }

    /// Name of the node (extension stripped for files).
    pub fn name(&self) -> &str {
        match self {
            ScanNode::File(file) => &file.name,
            ScanNode::Dir(dir) => &dir.name,
        }
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, ScanNode::File(_))
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, ScanNode::Dir(_))
    }

    /// Get the file node, if this is a file.
    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            ScanNode::File(file) => Some(file),
            ScanNode::Dir(_) => None,
        }
    }

    /// Get the directory node, if this is a directory.
    pub fn as_dir(&self) -> Option<&DirNode> {
        match self {
            ScanNode::Dir(dir) => Some(dir),
            ScanNode::File(_) => None,
        }
    }
}

impl From<FileNode> for ScanNode {
    fn from(file: FileNode) -> Self {
        ScanNode::File(file)
    }
}

impl From<DirNode> for ScanNode {
    fn from(dir: DirNode) -> Self {
        ScanNode::Dir(dir)
    }
}

/// Extension of a file name, dot included.
///
/// Names whose only dot is the leading one have no extension.
fn extension_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &file_name[idx..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_node_from_path() {
        let node = FileNode::from_path("blog/post.tsx");
        assert_eq!(node.path, "blog/post.tsx");
        assert_eq!(node.name, "post");
        assert_eq!(node.extension, ".tsx");
        assert_eq!(node.parent_dir(), "blog");
    }

    #[test]
    fn test_file_node_multiple_dots() {
        let node = FileNode::from_path("page.test.js");
        assert_eq!(node.name, "page.test");
        assert_eq!(node.extension, ".js");
        assert_eq!(node.parent_dir(), ".");
    }

    #[test]
    fn test_file_node_without_extension() {
        let node = FileNode::from_path("a/Makefile");
        assert_eq!(node.name, "Makefile");
        assert_eq!(node.extension, "");
    }

    #[test]
    fn test_scan_node_accessors() {
        let file: ScanNode = FileNode::from_path("a/index.js").into();
        let dir: ScanNode = DirNode::new("a", "a", vec![file.clone()]).into();

        assert!(file.is_file());
        assert!(dir.is_dir());
        assert_eq!(file.name(), "index");
        assert_eq!(dir.path(), "a");
        assert_eq!(dir.as_dir().map(|d| d.children.len()), Some(1));
        assert!(file.as_dir().is_none());
    }
}
