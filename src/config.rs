use std::path::PathBuf;

use crate::constants::config::{CATALOG_URL_SCHEME, DEFAULT_SEED};
use crate::constants::program::AUGMENTED_ID_MARKER;
use crate::constants::tokenizer::{DEFAULT_ADDR, DEFAULT_LANGUAGE};
use crate::errors::DatagenError;
use crate::types::LanguageTag;

/// Top-level run configuration shared by the pipelines.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// RNG seed that makes substitution runs reproducible.
    pub seed: u64,
    /// Address of the tokenizer service.
    pub tokenizer_addr: String,
    /// Language tag sent with every tokenizer request.
    pub language: LanguageTag,
    /// Directory holding `function.parameter.txt` corpus files.
    pub corpus_dir: PathBuf,
    /// Prefix prepended to generated example ids.
    pub augmented_id_marker: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tokenizer_addr: DEFAULT_ADDR.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            corpus_dir: PathBuf::from("."),
            augmented_id_marker: AUGMENTED_ID_MARKER.to_string(),
        }
    }
}

/// Validate a catalog connection URL, returning it unchanged when usable.
///
/// Only the scheme is checked here; the connection itself belongs to the
/// external catalog collaborator. A wrong scheme is a fatal configuration
/// error, never a per-record drop.
pub fn validate_catalog_url(url: &str) -> Result<&str, DatagenError> {
    match url.split_once("://") {
        Some((scheme, rest)) if scheme == CATALOG_URL_SCHEME && !rest.is_empty() => Ok(url),
        _ => Err(DatagenError::Configuration(format!(
            "invalid catalog database url '{url}': expected {CATALOG_URL_SCHEME}:// scheme"
        ))),
    }
}
