//! Streaming per-record runners.
//!
//! Each runner reads one record at a time, processes it end-to-end, and
//! writes or drops it before reading the next. Per-record failures are
//! logged with the record id and skipped; only connectivity, IO, and
//! configuration failures abort a run. Runners take `BufRead`/`Write`
//! handles so process wiring (stdin/stdout, files) stays with the caller.

use std::io::{BufRead, Write};

use tracing::warn;

use crate::catalog::EntityCatalog;
use crate::config::RunConfig;
use crate::constants::tokenizer::EXPECT_PREFIX;
use crate::errors::DatagenError;
use crate::pattern::PatternRecord;
use crate::reconcile::reconcile_record;
use crate::substitute::SubstitutionEngine;
use crate::tokenizer::{RemoteTokenizer, Tokenize};
use crate::utils::split_record;

/// True for failures that must abort the whole run rather than drop one
/// record.
fn is_fatal(error: &DatagenError) -> bool {
    matches!(
        error,
        DatagenError::TokenizerUnavailable { .. }
            | DatagenError::Io(_)
            | DatagenError::Configuration(_)
    )
}

/// Batch job over the entity catalog: tokenize each entity name and write
/// one compiled pattern record per entity.
pub fn run_pattern_compilation(
    catalog: &impl EntityCatalog,
    tokenizer: &mut impl Tokenize,
    language: &str,
    output: &mut impl Write,
) -> Result<(), DatagenError> {
    for entity in catalog.entities(language)? {
        let tokenization = match tokenizer.tokenize(language, &entity.name) {
            Ok(tokenization) => tokenization,
            Err(error) if !is_fatal(&error) => {
                warn!(entity_type = %entity.entity_type, name = %entity.name, %error, "skipping entity");
                continue;
            }
            Err(error) => return Err(error),
        };
        let record = PatternRecord::compile(&entity.entity_type, &tokenization.raw_tokens);
        writeln!(output, "{}", record.render_line())?;
    }
    Ok(())
}

/// Consistent-substitution job over `id \t sentence \t program` records.
/// Successful examples are written with the augmented id; failing examples
/// are logged and dropped.
pub fn run_substitution(
    config: &RunConfig,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<(), DatagenError> {
    let mut engine = SubstitutionEngine::new(config);
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match engine.augment_record(&line) {
            Ok(record) => writeln!(output, "{record}")?,
            Err(error) if !is_fatal(&error) => {
                warn!(%error, "dropping example");
            }
            Err(error) => return Err(error),
        }
    }
    Ok(())
}

/// Quote-removal job over `id \t raw \t preprocessed \t program` records.
/// Each raw utterance is re-tokenized and cross-validated before the
/// program's placeholders are reconciled into typed literals.
pub fn run_quote_removal(
    tokenizer: &mut impl Tokenize,
    language: &str,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<(), DatagenError> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = split_record(&line, 4).and_then(|fields| {
            let (id, raw, preprocessed, program) =
                (fields[0], fields[1], fields[2], fields[3]);
            let tokenization = tokenizer.tokenize(language, raw)?;
            reconcile_record(id, preprocessed, program, &tokenization)
        });
        match record {
            Ok(record) => writeln!(output, "{record}")?,
            Err(error) if !is_fatal(&error) => {
                warn!(%error, "dropping record");
            }
            Err(error) => return Err(error),
        }
    }
    Ok(())
}

/// Tokenizer probe: send each input line to the service and echo the raw
/// response line. A line prefixed `expect:<type> ` forwards the hint in the
/// request.
pub fn run_tokenizer_probe<R: BufRead, W: Write>(
    tokenizer: &mut RemoteTokenizer<R, W>,
    language: &str,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<(), DatagenError> {
    for line in input.lines() {
        let line = line?;
        let (expect, utterance) = match line.strip_prefix(EXPECT_PREFIX) {
            Some(rest) => match rest.split_once(' ') {
                Some((expect, utterance)) => (Some(expect), utterance),
                None => (None, line.as_str()),
            },
            None => (None, line.as_str()),
        };
        let (_, response) = tokenizer.exchange_raw(language, utterance.trim(), expect)?;
        writeln!(output, "{}", response.trim_end())?;
    }
    Ok(())
}
