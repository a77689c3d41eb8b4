use std::{collections::BTreeMap, path::PathBuf};

use async_trait::async_trait;

use crate::error::Error;

/// Whether a store entry holds a single document or a directory of per-fork documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A single documentation file
    Document,
    /// A directory with one file per fork
    Directory,
}

/// A top-level entry of a [`DocumentStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreEntry {
    /// The stored identifier, including any extension, e.g. `ADD.mdx`
    pub name: String,
    /// The kind of entry
    pub kind: EntryKind,
}

impl StoreEntry {
    /// Creates a new document entry.
    pub fn document(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: EntryKind::Document }
    }

    /// Creates a new directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: EntryKind::Directory }
    }
}

/// Read access to a tree of instruction documentation.
///
/// The store is flat at the top: each entry is either a document or a directory whose children
/// are documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists the top-level entries.
    async fn entries(&self) -> Result<Vec<StoreEntry>, Error>;

    /// Lists the names of the documents inside the directory entry `directory`.
    async fn children(&self, directory: &str) -> Result<Vec<String>, Error>;

    /// Reads the top-level document entry `name`.
    async fn read_document(&self, name: &str) -> Result<String, Error>;

    /// Reads the document `name` inside the directory entry `directory`.
    async fn read_child(&self, directory: &str, name: &str) -> Result<String, Error>;
}

/// A [`DocumentStore`] backed by a directory on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn list(path: PathBuf) -> Result<Vec<(String, bool)>, Error> {
        let mut dir = tokio::fs::read_dir(&path).await.map_err(|e| {
            Error::DocumentStore(format!("failed to list '{}': {e}", path.display()))
        })?;

        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            Error::DocumentStore(format!("failed to list '{}': {e}", path.display()))
        })? {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            names.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
        }

        names.sort();
        Ok(names)
    }

    async fn read(path: PathBuf) -> Result<String, Error> {
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::DocumentStore(format!("failed to read '{}': {e}", path.display())))
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn entries(&self) -> Result<Vec<StoreEntry>, Error> {
        Ok(Self::list(self.root.clone())
            .await?
            .into_iter()
            .map(|(name, is_dir)| StoreEntry {
                name,
                kind: if is_dir { EntryKind::Directory } else { EntryKind::Document },
            })
            .collect())
    }

    async fn children(&self, directory: &str) -> Result<Vec<String>, Error> {
        Ok(Self::list(self.root.join(directory)).await?.into_iter().map(|(name, _)| name).collect())
    }

    async fn read_document(&self, name: &str) -> Result<String, Error> {
        Self::read(self.root.join(name)).await
    }

    async fn read_child(&self, directory: &str, name: &str) -> Result<String, Error> {
        Self::read(self.root.join(directory).join(name)).await
    }
}

/// An in-memory [`DocumentStore`].
///
/// ```
/// use opref_reference::{DocumentStore, MemoryDocumentStore};
///
/// let store = MemoryDocumentStore::new()
///     .with_document("ADD.mdx", "---\ngroup: Arithmetic\n---\nAdds two registers.")
///     .with_directory("CALL", [("Beta.mdx", "Costs 21000 gas.")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocumentStore {
    documents: BTreeMap<String, String>,
    directories: BTreeMap<String, BTreeMap<String, String>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level document.
    pub fn with_document(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.documents.insert(name.into(), contents.into());
        self
    }

    /// Adds a directory of documents.
    pub fn with_directory<N, C>(
        mut self,
        name: impl Into<String>,
        documents: impl IntoIterator<Item = (N, C)>,
    ) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        self.directories.insert(
            name.into(),
            documents.into_iter().map(|(name, contents)| (name.into(), contents.into())).collect(),
        );
        self
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn entries(&self) -> Result<Vec<StoreEntry>, Error> {
        Ok(self
            .documents
            .keys()
            .map(StoreEntry::document)
            .chain(self.directories.keys().map(StoreEntry::directory))
            .collect())
    }

    async fn children(&self, directory: &str) -> Result<Vec<String>, Error> {
        self.directories
            .get(directory)
            .map(|documents| documents.keys().cloned().collect())
            .ok_or_else(|| Error::DocumentStore(format!("no directory '{directory}'")))
    }

    async fn read_document(&self, name: &str) -> Result<String, Error> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| Error::DocumentStore(format!("no document '{name}'")))
    }

    async fn read_child(&self, directory: &str, name: &str) -> Result<String, Error> {
        self.directories
            .get(directory)
            .and_then(|documents| documents.get(name))
            .cloned()
            .ok_or_else(|| Error::DocumentStore(format!("no document '{directory}/{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join("opref-store-tests").join(name);
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).expect("failed to create store root");
        root
    }

    #[tokio::test]
    async fn test_fs_store_lists_documents_and_directories() {
        let root = temp_store("entries");
        std::fs::write(root.join("ADD.mdx"), "adds").expect("failed to write document");
        std::fs::create_dir_all(root.join("CALL")).expect("failed to create directory");
        std::fs::write(root.join("CALL").join("Beta.mdx"), "calls").expect("failed to write");

        let store = FsDocumentStore::new(&root);
        let entries = store.entries().await.expect("failed to list entries");

        assert_eq!(entries, vec![StoreEntry::document("ADD.mdx"), StoreEntry::directory("CALL")]);
        assert_eq!(store.children("CALL").await.expect("failed to list"), vec!["Beta.mdx"]);
        assert_eq!(store.read_document("ADD.mdx").await.expect("failed to read"), "adds");
        assert_eq!(store.read_child("CALL", "Beta.mdx").await.expect("failed to read"), "calls");
    }

    #[tokio::test]
    async fn test_fs_store_missing_root() {
        let store = FsDocumentStore::new("/nonexistent/opref/docs");
        assert!(matches!(store.entries().await, Err(Error::DocumentStore(_))));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryDocumentStore::new()
            .with_document("ADD.mdx", "adds")
            .with_directory("CALL", [("Beta.mdx", "calls")]);

        let entries = store.entries().await.expect("failed to list entries");
        assert_eq!(entries, vec![StoreEntry::document("ADD.mdx"), StoreEntry::directory("CALL")]);
        assert_eq!(store.read_child("CALL", "Beta.mdx").await.expect("failed to read"), "calls");
        assert!(store.read_document("SUB.mdx").await.is_err());
        assert!(store.read_child("CALL", "Alpha.mdx").await.is_err());
        assert!(store.children("ADD.mdx").await.is_err());
    }
}
