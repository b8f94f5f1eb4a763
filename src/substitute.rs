//! Consistent substitution over paired token streams.
//!
//! One training example is a tab-delimited `(id, sentence, program)` record
//! whose two token streams share typed placeholder tokens. The engine scans
//! the program once to learn each placeholder's owning
//! function/parameter/operator, samples a concrete value per placeholder
//! while rewriting the sentence, then rewrites the program from the same
//! replacement map so both surfaces carry literally the same value. All
//! randomness flows through an explicitly seeded RNG, so a full run is
//! byte-for-byte reproducible.

use indexmap::IndexMap;
use rand::seq::IndexedRandom;

use crate::config::RunConfig;
use crate::constants::program::{FUNCTION_PREFIX, OPERATORS, PARAM_PREFIX};
use crate::errors::DatagenError;
use crate::params::{ParameterKey, ParameterValueStore};
use crate::placeholder::Placeholder;
use crate::types::ParamValue;
use crate::utils::split_record;

/// Small deterministic RNG (splitmix64) used for reproducible sampling.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Seed the RNG. Equal seeds produce equal sample sequences.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Scan a program's token stream and derive the [`ParameterKey`] owning each
/// sampled placeholder.
///
/// Tracks the most recently seen `@function`, `param:name`, and operator
/// token; a sampled placeholder encountered before all three are known is a
/// recoverable per-example error, not a run failure. Generic entities are
/// not bound (they are never sampled).
pub fn bind_parameters<S: AsRef<str>>(
    program: &[S],
) -> Result<IndexMap<String, ParameterKey>, DatagenError> {
    let mut bindings = IndexMap::new();
    let mut function: Option<&str> = None;
    let mut parameter: Option<&str> = None;
    let mut operator: Option<&str> = None;
    for token in program {
        let token = token.as_ref();
        if let Some(name) = token.strip_prefix(FUNCTION_PREFIX) {
            function = Some(name);
        } else if let Some(name) = token.strip_prefix(PARAM_PREFIX) {
            parameter = Some(name);
        } else if OPERATORS.contains(&token) {
            operator = Some(token);
        } else if Placeholder::classify(token).is_some_and(|p| p.is_sampled()) {
            let (Some(function), Some(parameter), Some(operator)) =
                (function, parameter, operator)
            else {
                return Err(DatagenError::MalformedPlaceholder {
                    token: token.to_string(),
                });
            };
            bindings.insert(
                token.to_string(),
                ParameterKey {
                    function: function.to_string(),
                    parameter: parameter.to_string(),
                    operator: operator.to_string(),
                },
            );
        }
    }
    Ok(bindings)
}

/// Rewrites (utterance, program) pairs into concrete training examples.
pub struct SubstitutionEngine {
    store: ParameterValueStore,
    rng: DeterministicRng,
    id_marker: String,
}

impl SubstitutionEngine {
    /// Build an engine owning its corpus store and seeded RNG.
    pub fn new(config: &RunConfig) -> Self {
        Self {
            store: ParameterValueStore::new(&config.corpus_dir),
            rng: DeterministicRng::new(config.seed),
            id_marker: config.augmented_id_marker.clone(),
        }
    }

    /// Rewrite one `id \t sentence \t program` record into its augmented
    /// form, or fail with a recoverable per-example error.
    pub fn augment_record(&mut self, line: &str) -> Result<String, DatagenError> {
        let fields = split_record(line, 3)?;
        let (id, sentence, program) = (fields[0], fields[1], fields[2]);
        let sentence: Vec<&str> = sentence.split(' ').collect();
        let program: Vec<&str> = program.split(' ').collect();

        let bindings = bind_parameters(&program)?;
        let mut replacements: IndexMap<String, ParamValue> = IndexMap::new();
        let new_sentence = self.rewrite_sentence(&sentence, &bindings, &mut replacements)?;
        let new_program = rewrite_program(&program, &replacements)?;
        Ok(format!(
            "{}{id}\t{}\t{}",
            self.id_marker,
            new_sentence.join(" "),
            new_program.join(" ")
        ))
    }

    /// Left-to-right sentence rewrite. The first occurrence of a sampled
    /// placeholder draws a value uniformly from its parameter corpus; later
    /// occurrences reuse the bound value. Generic entities and plain tokens
    /// pass through.
    fn rewrite_sentence(
        &mut self,
        sentence: &[&str],
        bindings: &IndexMap<String, ParameterKey>,
        replacements: &mut IndexMap<String, ParamValue>,
    ) -> Result<Vec<ParamValue>, DatagenError> {
        let mut out = Vec::with_capacity(sentence.len());
        for &token in sentence {
            if let Some(value) = replacements.get(token) {
                out.push(value.clone());
                continue;
            }
            if Placeholder::classify(token).is_some_and(|p| p.is_sampled()) {
                let key =
                    bindings
                        .get(token)
                        .ok_or_else(|| DatagenError::MalformedPlaceholder {
                            token: token.to_string(),
                        })?;
                let candidates = self.store.values(key)?;
                let value = candidates
                    .choose(&mut self.rng)
                    .ok_or_else(|| DatagenError::NoParameterValues(key.to_string()))?
                    .clone();
                replacements.insert(token.to_string(), value.clone());
                out.push(value);
            } else {
                out.push(token.to_string());
            }
        }
        Ok(out)
    }
}

/// Program rewrite: every sampled placeholder must already be bound from the
/// sentence stage; values are reused verbatim, never re-sampled.
fn rewrite_program(
    program: &[&str],
    replacements: &IndexMap<String, ParamValue>,
) -> Result<Vec<ParamValue>, DatagenError> {
    let mut out = Vec::with_capacity(program.len());
    for &token in program {
        if Placeholder::classify(token).is_some_and(|p| p.is_sampled()) {
            let value =
                replacements
                    .get(token)
                    .ok_or_else(|| DatagenError::UnboundPlaceholder {
                        token: token.to_string(),
                    })?;
            out.push(value.clone());
        } else {
            out.push(token.to_string());
        }
    }
    Ok(out)
}
