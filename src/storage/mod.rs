//! Persistence and credential backends

pub mod blob;
pub mod documents;

pub use blob::{BlobSasIssuer, SasToken};
pub use documents::{CosmosDocumentStore, DocumentStore, MemoryDocumentStore};
