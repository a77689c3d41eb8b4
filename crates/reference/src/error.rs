/// Error type for the reference module
///
/// Only [`Error::Retrieval`] and [`Error::ChainSpec`] ever reach the caller of
/// [`build_reference`](crate::build_reference). Missing gas costs and unreadable documentation
/// are absorbed where they happen.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The instruction definition source could not be obtained
    #[error("Retrieval error: {0}")]
    Retrieval(String),
    /// The chain specification could not be read or has no gas cost table at the given path
    #[error("Chain spec error: {0}")]
    ChainSpec(String),
    /// A document store entry could not be listed or read
    #[error("Document store error: {0}")]
    DocumentStore(String),
    /// A documentation file has malformed front matter
    #[error("Front matter error: {0}")]
    FrontMatter(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
