//! Parameter corpus loading and caching.
//!
//! Each `(function, parameter)` pair maps to an on-disk corpus file named
//! `function.parameter.txt` holding one candidate literal per line. Files
//! are loaded lazily, filtered of numeric-looking lines, and cached for the
//! lifetime of the store (one file read per key per run).

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::constants::config::CORPUS_EXTENSION;
use crate::constants::program::CONTAINS_OPERATOR;
use crate::errors::DatagenError;
use crate::types::{CorpusKey, ParamValue};
use crate::utils::has_numeric_field;

/// Owning function/parameter/operator for one placeholder, derived by the
/// binding pass over a formal program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterKey {
    /// Function name (from the nearest preceding `@function` token).
    pub function: String,
    /// Parameter name (from the nearest preceding `param:name` token).
    pub parameter: String,
    /// Comparison/containment operator in effect.
    pub operator: String,
}

impl ParameterKey {
    /// `function.parameter` key used by the corpus cache and file naming.
    pub fn corpus_key(&self) -> CorpusKey {
        format!("{}.{}", self.function, self.parameter)
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.function, self.parameter, self.operator)
    }
}

/// Lazy, process-lifetime cache of parameter corpora.
pub struct ParameterValueStore {
    root: PathBuf,
    cache: IndexMap<CorpusKey, Arc<[ParamValue]>>,
}

impl ParameterValueStore {
    /// Create a store reading corpus files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: IndexMap::new(),
        }
    }

    /// Candidate values for `key`, loading and caching the backing corpus on
    /// first access.
    ///
    /// The `contains` operator intentionally has no sampled values (substring
    /// sampling is unimplemented); callers treat the empty slice as "no
    /// usable values", not as a store fault. A missing corpus file is also
    /// an empty slice.
    pub fn values(&mut self, key: &ParameterKey) -> Result<Arc<[ParamValue]>, DatagenError> {
        if key.operator == CONTAINS_OPERATOR {
            return Ok(Arc::from([]));
        }
        let corpus_key = key.corpus_key();
        if let Some(values) = self.cache.get(&corpus_key) {
            return Ok(Arc::clone(values));
        }
        let path = self
            .root
            .join(format!("{corpus_key}.{CORPUS_EXTENSION}"));
        let values: Arc<[ParamValue]> = if path.is_file() {
            let file = File::open(&path)?;
            let mut values = Vec::new();
            for line in BufReader::new(file).lines() {
                let line = line?;
                let line = line.trim();
                if line.is_empty() || has_numeric_field(line) {
                    continue;
                }
                values.push(line.to_string());
            }
            debug!(
                corpus = %corpus_key,
                path = %path.display(),
                values = values.len(),
                "loaded parameter corpus"
            );
            Arc::from(values)
        } else {
            Arc::from([])
        };
        self.cache.insert(corpus_key, Arc::clone(&values));
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn key(function: &str, parameter: &str, operator: &str) -> ParameterKey {
        ParameterKey {
            function: function.to_string(),
            parameter: parameter.to_string(),
            operator: operator.to_string(),
        }
    }

    #[test]
    fn loads_and_filters_numeric_lines() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("fn.p.txt"),
            "seattle\n42\nnew york\n3.14 pies\n  trimmed  \n",
        )
        .unwrap();
        let mut store = ParameterValueStore::new(temp.path());
        let values = store.values(&key("fn", "p", "==")).unwrap();
        assert_eq!(&*values, &["seattle", "new york", "trimmed"]);
    }

    #[test]
    fn caches_after_first_read() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("fn.p.txt");
        fs::write(&path, "alpha\n").unwrap();
        let mut store = ParameterValueStore::new(temp.path());
        assert_eq!(&*store.values(&key("fn", "p", "==")).unwrap(), &["alpha"]);
        fs::write(&path, "beta\n").unwrap();
        assert_eq!(&*store.values(&key("fn", "p", "==")).unwrap(), &["alpha"]);
    }

    #[test]
    fn contains_operator_has_no_values() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("fn.p.txt"), "seattle\n").unwrap();
        let mut store = ParameterValueStore::new(temp.path());
        assert!(store.values(&key("fn", "p", "contains")).unwrap().is_empty());
    }

    #[test]
    fn missing_corpus_is_empty() {
        let temp = tempdir().unwrap();
        let mut store = ParameterValueStore::new(temp.path());
        assert!(store.values(&key("fn", "missing", "==")).unwrap().is_empty());
    }

    #[test]
    fn display_joins_with_colons() {
        assert_eq!(key("fn", "p", "==").to_string(), "fn:p:==");
    }
}
