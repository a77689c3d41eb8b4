use std::{collections::BTreeMap, path::Path};

use futures::future::{join_all, try_join_all};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    core::store::{DocumentStore, EntryKind, StoreEntry},
    error::Error,
};

/// Front matter fields of an instruction's documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    /// The fork the instruction was introduced in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork: Option<String>,
    /// The group the instruction is listed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Any other front matter keys, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The body of a documentation file, ready to be handed to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBody {
    /// The markup source, without front matter
    pub source: String,
}

/// The documentation of a single instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationEntry {
    /// Front matter fields
    pub meta: DocMeta,
    /// Document body
    pub body: DocumentBody,
}

/// Gas cost explanations of a single instruction, keyed by fork.
pub type GasForkDocumentation = BTreeMap<String, String>;

/// All documentation loaded from a [`DocumentStore`], keyed by lowercase instruction name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documentation {
    /// Per-instruction documentation
    pub item_docs: BTreeMap<String, DocumentationEntry>,
    /// Per-instruction, per-fork gas cost documentation
    pub gas_docs: BTreeMap<String, GasForkDocumentation>,
}

/// Result of loading one store entry.
enum LoadedEntry {
    Document(String, DocumentationEntry),
    Forks(String, GasForkDocumentation),
    Skipped,
}

/// Splits `---` delimited YAML front matter from a document.
///
/// A document without front matter yields default metadata and the whole text as content.
///
/// ```
/// use opref_reference::parse_front_matter;
///
/// let (meta, content) = parse_front_matter("---\ngroup: Arithmetic\n---\nAdds.\n").unwrap();
/// assert_eq!(meta.group.as_deref(), Some("Arithmetic"));
/// assert_eq!(content, "Adds.\n");
/// ```
pub fn parse_front_matter(text: &str) -> Result<(DocMeta, &str), Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(rest) = text.strip_prefix("---\n").or_else(|| text.strip_prefix("---\r\n")) else {
        return Ok((DocMeta::default(), text));
    };

    let (yaml, after) = match rest.strip_prefix("---") {
        Some(after) => ("", after),
        None => {
            let end = rest
                .find("\n---")
                .ok_or_else(|| Error::FrontMatter("unterminated front matter".to_string()))?;
            (&rest[..end], &rest[end + 4..])
        }
    };

    // the rest of the closing delimiter line is not content
    let content = after.find('\n').map_or("", |i| &after[i + 1..]);

    if yaml.trim().is_empty() {
        return Ok((DocMeta::default(), content));
    }

    let meta = serde_yaml::from_str(yaml).map_err(|e| Error::FrontMatter(e.to_string()))?;
    Ok((meta, content))
}

/// Returns the key of a store entry: its name without extension, lowercased.
fn entry_key(name: &str) -> String {
    file_stem(name).to_lowercase()
}

fn file_stem(name: &str) -> &str {
    Path::new(name).file_stem().and_then(|stem| stem.to_str()).unwrap_or(name)
}

async fn load_document<S>(store: &S, name: &str) -> Result<DocumentationEntry, Error>
where
    S: DocumentStore + ?Sized,
{
    let text = store.read_document(name).await?;
    let (meta, content) = parse_front_matter(&text)?;
    Ok(DocumentationEntry { meta, body: DocumentBody { source: content.to_string() } })
}

async fn load_forks<S>(store: &S, directory: &str) -> Result<GasForkDocumentation, Error>
where
    S: DocumentStore + ?Sized,
{
    let children = store.children(directory).await?;
    let bodies =
        try_join_all(children.iter().map(|child| store.read_child(directory, child))).await?;

    Ok(children.iter().map(|child| file_stem(child).to_string()).zip(bodies).collect())
}

async fn load_entry<S>(store: &S, entry: &StoreEntry) -> LoadedEntry
where
    S: DocumentStore + ?Sized,
{
    let key = entry_key(&entry.name);
    let loaded = match entry.kind {
        EntryKind::Document => {
            load_document(store, &entry.name).await.map(|doc| LoadedEntry::Document(key, doc))
        }
        EntryKind::Directory => {
            load_forks(store, &entry.name).await.map(|forks| LoadedEntry::Forks(key, forks))
        }
    };

    loaded.unwrap_or_else(|e| {
        debug!("couldn't read the documentation for '{}': {}", entry.name, e);
        LoadedEntry::Skipped
    })
}

/// Loads the documentation of every instruction in `store`.
///
/// All entries are loaded concurrently. An entry that cannot be read or parsed is logged and
/// left out; this function never fails. A directory entry with one unreadable fork file is left
/// out entirely.
pub async fn load_documentation<S>(store: &S) -> Documentation
where
    S: DocumentStore + ?Sized,
{
    let entries = match store.entries().await {
        Ok(entries) => entries,
        Err(e) => {
            debug!("couldn't list the documentation store: {}", e);
            return Documentation::default();
        }
    };

    let loaded = join_all(entries.iter().map(|entry| load_entry(store, entry))).await;

    let mut documentation = Documentation::default();
    for entry in loaded {
        match entry {
            LoadedEntry::Document(key, doc) => {
                documentation.item_docs.insert(key, doc);
            }
            LoadedEntry::Forks(key, forks) => {
                documentation.gas_docs.insert(key, forks);
            }
            LoadedEntry::Skipped => {}
        }
    }

    debug!(
        "loaded documentation for {} instructions and fork gas notes for {}",
        documentation.item_docs.len(),
        documentation.gas_docs.len()
    );
    documentation
}
