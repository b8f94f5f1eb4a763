#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Entity catalog boundary trait and in-memory implementation.
pub mod catalog;
/// Run configuration and catalog URL validation.
pub mod config;
/// Centralized tables and markers used across the pipelines.
pub mod constants;
/// Parameter value store and parameter-key types.
pub mod params;
/// Entity pattern compilation.
pub mod pattern;
/// Streaming per-record pipeline runners.
pub mod pipeline;
/// Placeholder token classification.
pub mod placeholder;
/// Quote and placeholder reconciliation.
pub mod reconcile;
/// Consistent substitution over paired token streams.
pub mod substitute;
/// Tokenizer service client and protocol types.
pub mod tokenizer;
/// Shared type aliases.
pub mod types;
/// Small text helpers shared by the pipelines.
pub mod utils;

mod errors;

pub use catalog::{EntityCatalog, EntityRecord, InMemoryCatalog};
pub use config::{validate_catalog_url, RunConfig};
pub use errors::DatagenError;
pub use params::{ParameterKey, ParameterValueStore};
pub use pattern::{EntityPattern, PatternElement, PatternRecord};
pub use pipeline::{
    run_pattern_compilation, run_quote_removal, run_substitution, run_tokenizer_probe,
};
pub use placeholder::Placeholder;
pub use reconcile::{reconcile_program, reconcile_record, strip_quote_artifacts};
pub use substitute::{bind_parameters, DeterministicRng, SubstitutionEngine};
pub use tokenizer::{RemoteTokenizer, StaticTokenizer, TokenizationResult, Tokenize};
pub use types::{EntityType, LanguageTag, ParamValue, RecordId, Token, ValueKey};
