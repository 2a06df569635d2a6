//! Document loader for tokensmith
//!
//! Reads raw, loosely typed token documents (nested JSON groups with
//! `$value`/`$type` leaves), flattens them into token nodes, and merges an
//! ordered document list into one unresolved [`TokenGraph`]. Pure transform
//! apart from the file reads in [`load_files`].

pub mod document;
pub mod error;
pub mod merge;

use std::path::Path;

use tracing::info;

use tokensmith_core::TokenGraph;

pub use document::RawDocument;
pub use error::LoadError;
pub use merge::merge_documents;

/// Read and merge token documents from disk, in the given precedence order.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<TokenGraph, LoadError> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path.display().to_string();
        let root = serde_json::from_str(&content).map_err(|source| LoadError::Json {
            document: name.clone(),
            source,
        })?;
        documents.push(RawDocument::new(name, root));
    }
    let graph = merge_documents(&documents)?;
    info!(documents = documents.len(), tokens = graph.len(), "documents loaded");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_files_reads_and_merges() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.json");
        let semantic = dir.path().join("semantic.json");

        std::fs::write(
            &base,
            r##"{ "color": { "primary": { "$type": "color", "$value": "#3B82F6" } } }"##,
        )
        .unwrap();
        std::fs::write(
            &semantic,
            r##"{ "color": { "accent": { "$value": "{color.primary}" } } }"##,
        )
        .unwrap();

        let graph = load_files(&[&base, &semantic]).unwrap();
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_files(&["definitely/not/here.json"]).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_reported_with_document_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "{{ not json").unwrap();

        match load_files(&[&path]).unwrap_err() {
            LoadError::Json { document, .. } => assert!(document.contains("broken.json")),
            other => panic!("expected json error, got {other}"),
        }
    }
}
