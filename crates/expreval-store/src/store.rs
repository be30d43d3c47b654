use crate::record::{
    decode_store_json, encode_store_json, NewExpression, StoreDocument, StoredExpression,
    STORE_SCHEMA_0_0_1,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error on `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported store schema `{found}` (expected `{expected}`)")]
    Schema { found: String, expected: &'static str },
    #[error("store contains duplicate expression id {0}")]
    DuplicateId(u64),
}

/// Keyed storage for compiled expressions. Ids are assigned by the store,
/// start at 1 and are never reused.
pub trait ExpressionStore {
    fn insert(&mut self, expression: NewExpression) -> Result<StoredExpression, StoreError>;
    fn get(&self, id: u64) -> Result<Option<StoredExpression>, StoreError>;
    fn list(&self) -> Result<Vec<StoredExpression>, StoreError>;
    fn remove(&mut self, id: u64) -> Result<bool, StoreError>;
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
    next_id: u64,
    expressions: BTreeMap<u64, StoredExpression>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            expressions: BTreeMap::new(),
        }
    }

    fn from_document(document: StoreDocument) -> Result<Self, StoreError> {
        if document.schema != STORE_SCHEMA_0_0_1 {
            return Err(StoreError::Schema {
                found: document.schema,
                expected: STORE_SCHEMA_0_0_1,
            });
        }
        let mut expressions = BTreeMap::new();
        for expression in document.expressions {
            let id = expression.id;
            if expressions.insert(id, expression).is_some() {
                return Err(StoreError::DuplicateId(id));
            }
        }
        let after_last = expressions.keys().next_back().map_or(1, |id| id + 1);
        Ok(Self {
            next_id: document.next_id.max(after_last),
            expressions,
        })
    }

    fn to_document(&self) -> StoreDocument {
        StoreDocument {
            schema: STORE_SCHEMA_0_0_1.to_string(),
            next_id: self.next_id,
            expressions: self.expressions.values().cloned().collect(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionStore for MemoryStore {
    fn insert(&mut self, expression: NewExpression) -> Result<StoredExpression, StoreError> {
        let stored = expression.with_id(self.next_id);
        self.next_id += 1;
        self.expressions.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn get(&self, id: u64) -> Result<Option<StoredExpression>, StoreError> {
        Ok(self.expressions.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<StoredExpression>, StoreError> {
        Ok(self.expressions.values().cloned().collect())
    }

    fn remove(&mut self, id: u64) -> Result<bool, StoreError> {
        Ok(self.expressions.remove(&id).is_some())
    }
}

/// Store persisted as one JSON document, rewritten after every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let inner = match std::fs::read_to_string(&path) {
            Ok(content) => MemoryStore::from_document(decode_store_json(&content)?)?,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => MemoryStore::new(),
            Err(source) => return Err(io_error(&path, source)),
        };
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let encoded = encode_store_json(&self.inner.to_document())?;
        std::fs::write(&self.path, encoded).map_err(|source| io_error(&self.path, source))
    }
}

impl ExpressionStore for FileStore {
    fn insert(&mut self, expression: NewExpression) -> Result<StoredExpression, StoreError> {
        let stored = self.inner.insert(expression)?;
        self.flush()?;
        Ok(stored)
    }

    fn get(&self, id: u64) -> Result<Option<StoredExpression>, StoreError> {
        self.inner.get(id)
    }

    fn list(&self) -> Result<Vec<StoredExpression>, StoreError> {
        self.inner.list()
    }

    fn remove(&mut self, id: u64) -> Result<bool, StoreError> {
        let removed = self.inner.remove(id)?;
        if removed {
            self.flush()?;
        }
        Ok(removed)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
