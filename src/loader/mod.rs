//! File Loader
//!
//! Reads every JSON document in a folder. Read fresh on each call; there
//! is no cache, so files added externally show up on the next render.
//!
//! # Isolation
//!
//! One bad file never costs the others: its slot holds an error record
//! and the batch continues.

mod errors;
mod folder;

pub use errors::{LoaderError, LoaderResult};
pub use folder::{is_document_name, load_file, load_folder, parse_document, DocumentEntry, FolderContents};
