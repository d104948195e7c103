//! Session-scoped dataset memoization
//!
//! A session keeps at most one loaded frame, keyed by the identity of the
//! source it came from. Asking for the same source again returns the cached
//! frame; a different source replaces it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::SystemTime;

use polars::prelude::*;

use super::error::{DashboardError, Result};
use super::loader::{load_dataset, DataSource};

/// Identity of a data source for caching purposes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    File {
        path: PathBuf,
        len: u64,
        modified: Option<SystemTime>,
    },
    Upload {
        name: String,
        len: usize,
        /// `DefaultHasher` digest of the bytes. Process-local, never persist it.
        digest: u64,
    },
}

impl SourceKey {
    /// Identify a source. File sources must exist.
    pub fn of(source: &DataSource) -> Result<Self> {
        match source {
            DataSource::Default(path) | DataSource::File(path) => {
                let metadata = std::fs::metadata(path).map_err(|e| DashboardError::Load {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                Ok(SourceKey::File {
                    path: std::fs::canonicalize(path).unwrap_or_else(|_| path.clone()),
                    len: metadata.len(),
                    modified: metadata.modified().ok(),
                })
            }
            DataSource::Upload { name, bytes } => {
                let mut hasher = DefaultHasher::new();
                bytes.hash(&mut hasher);
                Ok(SourceKey::Upload {
                    name: name.clone(),
                    len: bytes.len(),
                    digest: hasher.finish(),
                })
            }
        }
    }
}

/// One user's dashboard session
#[derive(Debug)]
pub struct Session {
    infer_schema_length: usize,
    cached: Option<(SourceKey, DataFrame)>,
    loads: usize,
}

impl Session {
    pub fn new(infer_schema_length: usize) -> Self {
        Self {
            infer_schema_length,
            cached: None,
            loads: 0,
        }
    }

    /// Return the frame for `source`, reading it only if it is not cached.
    pub fn load(&mut self, source: &DataSource) -> Result<&DataFrame> {
        let key = SourceKey::of(source)?;

        let hit = matches!(&self.cached, Some((cached_key, _)) if *cached_key == key);
        if !hit {
            let df = load_dataset(source, self.infer_schema_length)?;
            self.loads += 1;
            self.cached = Some((key, df));
        }

        self.cached
            .as_ref()
            .map(|(_, df)| df)
            .ok_or_else(|| DashboardError::Load {
                path: source.origin(),
                message: "dataset was not cached after loading".to_string(),
            })
    }

    /// Drop the cached frame so the next load reads from the source again
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn is_cached(&self, source: &DataSource) -> bool {
        match (&self.cached, SourceKey::of(source)) {
            (Some((cached_key, _)), Ok(key)) => *cached_key == key,
            _ => false,
        }
    }

    /// Number of times a source was actually read
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, body: &str) -> DataSource {
        DataSource::Upload {
            name: name.to_string(),
            bytes: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_same_upload_is_cached() {
        let mut session = Session::new(100);
        let source = upload("hr.csv", "Attrition,Age\nYes,30\nNo,40\n");

        assert_eq!(session.load(&source).unwrap().height(), 2);
        assert_eq!(session.load(&source).unwrap().height(), 2);
        assert_eq!(session.load_count(), 1);
        assert!(session.is_cached(&source));
    }

    #[test]
    fn test_new_upload_replaces_cache() {
        let mut session = Session::new(100);
        let first = upload("hr.csv", "Attrition\nYes\n");
        let second = upload("hr.csv", "Attrition\nYes\nNo\n");

        session.load(&first).unwrap();
        assert_eq!(session.load(&second).unwrap().height(), 2);
        assert_eq!(session.load_count(), 2);
        assert!(!session.is_cached(&first));
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let mut session = Session::new(100);
        let source = upload("hr.csv", "Attrition\nYes\n");

        session.load(&source).unwrap();
        session.invalidate();
        assert!(!session.is_cached(&source));
        session.load(&source).unwrap();
        assert_eq!(session.load_count(), 2);
    }

    #[test]
    fn test_switching_back_reloads_previous_upload() {
        let mut session = Session::new(100);
        let first = upload("a.csv", "Attrition\nYes\n");
        let second = upload("b.csv", "Attrition\nYes\nNo\nNo\n");

        assert_eq!(session.load(&first).unwrap().height(), 1);
        assert_eq!(session.load(&second).unwrap().height(), 3);
        assert_eq!(session.load(&first).unwrap().height(), 1);
        assert_eq!(session.load(&first).unwrap().height(), 1);
        assert_eq!(session.load_count(), 3);
        assert!(session.is_cached(&first));
    }

    #[test]
    fn test_failed_load_keeps_nothing() {
        let mut session = Session::new(100);
        let source = DataSource::File(PathBuf::from("/no/such/file.csv"));
        assert!(matches!(
            session.load(&source),
            Err(DashboardError::Load { .. })
        ));
        assert_eq!(session.load_count(), 0);
    }
}
