//! Quote and placeholder reconciliation.
//!
//! Converts placeholder references in a formal program into concrete,
//! correctly quoted and typed literals, using the placeholder value map the
//! tokenizer reports. Before rewriting, the record is cross-validated
//! against a fresh tokenization: run-length token counts of the quoted and
//! quote-stripped streams must agree, and the previously recorded normalized
//! form must match the star-stripped fresh tokens. Mismatches drop the
//! record, they never abort the run.

use indexmap::IndexMap;

use crate::constants::quotes::{
    EMPTY_QUOTE_ARTIFACTS, LEADING_ARTIFACTS, RUN_LENGTH_SEPARATOR, TRAILING_ARTIFACT,
};
use crate::errors::DatagenError;
use crate::placeholder::Placeholder;
use crate::tokenizer::TokenizationResult;
use crate::types::ValueKey;

/// Strip the tokenizer's quote artifacts from a quoted-string value.
/// The degenerate empty-quote artifacts collapse to the empty string.
pub fn strip_quote_artifacts(value: &str) -> &str {
    if EMPTY_QUOTE_ARTIFACTS.contains(&value) {
        return "";
    }
    let mut value = value;
    for leading in LEADING_ARTIFACTS {
        if let Some(rest) = value.strip_prefix(leading) {
            value = rest;
            break;
        }
    }
    value.strip_suffix(TRAILING_ARTIFACT).unwrap_or(value)
}

/// Rewrite a program's placeholder tokens into quoted/typed literals.
///
/// Quoted strings are artifact-stripped and wrapped in quotes; usernames,
/// hashtags, and generic entities become quoted literals with their type
/// annotation attached. Every other token passes through unchanged, in
/// order, with no insertions.
pub fn reconcile_program<S: AsRef<str>>(
    program: &[S],
    values: &IndexMap<ValueKey, String>,
) -> Result<Vec<String>, DatagenError> {
    let mut out = Vec::with_capacity(program.len());
    for token in program {
        let token = token.as_ref();
        let Some(placeholder) = Placeholder::classify(token) else {
            out.push(token.to_string());
            continue;
        };
        let key = placeholder.value_key();
        let value = values
            .get(&key)
            .ok_or(DatagenError::MissingEntityValue { key })?;
        match placeholder.annotation() {
            None => out.push(format!("\"{}\"", strip_quote_artifacts(value))),
            Some(annotation) => out.push(format!("\"{value}\"{annotation}")),
        }
    }
    Ok(out)
}

/// Run-length-aware token count: a capitalized token must carry a `*n`
/// suffix and contributes `n`; every other token contributes 1. Returns
/// `None` when a capitalized token lacks a usable multiplier.
pub fn counted_tokens<S: AsRef<str>>(tokens: &[S]) -> Option<usize> {
    let mut count = 0;
    for token in tokens {
        let token = token.as_ref();
        if starts_uppercase(token) {
            let (_, multiplier) = token.rsplit_once(RUN_LENGTH_SEPARATOR)?;
            count += multiplier.parse::<usize>().ok()?;
        } else {
            count += 1;
        }
    }
    Some(count)
}

/// Strip `*n` run-length suffixes from capitalized tokens.
pub fn remove_run_length<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| {
            let token = token.as_ref();
            if starts_uppercase(token) {
                token
                    .rsplit_once(RUN_LENGTH_SEPARATOR)
                    .map(|(stem, _)| stem)
                    .unwrap_or(token)
                    .to_string()
            } else {
                token.to_string()
            }
        })
        .collect()
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

/// Cross-validate one record against its fresh tokenization and emit the
/// reconciled output row
/// (`id \t tokensNoQuotes \t tokens \t program \t reconciledProgram`).
pub fn reconcile_record(
    id: &str,
    preprocessed: &str,
    program: &str,
    tokenization: &TokenizationResult,
) -> Result<String, DatagenError> {
    let no_quotes_count = counted_tokens(&tokenization.tokens_no_quotes);
    let tokens_count = counted_tokens(&tokenization.tokens);
    let (Some(no_quotes_count), Some(tokens_count)) = (no_quotes_count, tokens_count) else {
        return Err(DatagenError::MalformedRecord {
            id: id.to_string(),
            details: "capitalized token without run-length suffix".to_string(),
        });
    };
    if no_quotes_count != tokens_count {
        return Err(DatagenError::TokenCountMismatch { id: id.to_string() });
    }
    let normalized = remove_run_length(&tokenization.tokens).join(" ");
    if preprocessed != normalized {
        return Err(DatagenError::NormalizedFormMismatch {
            id: id.to_string(),
            wanted: preprocessed.to_string(),
            got: tokenization.tokens.join(" "),
        });
    }
    let program_tokens: Vec<&str> = program.split(' ').collect();
    let reconciled = reconcile_program(&program_tokens, &tokenization.values)?;
    Ok(format!(
        "{id}\t{}\t{}\t{program}\t{}",
        tokenization.tokens_no_quotes.join(" "),
        tokenization.tokens.join(" "),
        reconciled.join(" ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_and_trailing_artifacts() {
        assert_eq!(strip_quote_artifacts("`` seattle ''"), "seattle");
        assert_eq!(strip_quote_artifacts("'' seattle"), "seattle");
        assert_eq!(strip_quote_artifacts("seattle ''"), "seattle");
        assert_eq!(strip_quote_artifacts("seattle"), "seattle");
    }

    #[test]
    fn degenerate_artifacts_collapse_to_empty() {
        assert_eq!(strip_quote_artifacts("'' ''"), "");
        assert_eq!(strip_quote_artifacts("`` ''"), "");
        assert_eq!(strip_quote_artifacts("'' ``"), "");
    }

    #[test]
    fn counted_tokens_expand_run_lengths() {
        assert_eq!(counted_tokens(&["hello", "world"]), Some(2));
        assert_eq!(counted_tokens(&["QUOTED_STRING_0*3", "there"]), Some(4));
        assert_eq!(counted_tokens(&["QUOTED_STRING_0"]), None);
        assert_eq!(counted_tokens(&["Token*x"]), None);
    }

    #[test]
    fn remove_run_length_strips_capitalized_suffixes() {
        assert_eq!(
            remove_run_length(&["tweet", "QUOTED_STRING_0*2", "now"]),
            vec!["tweet", "QUOTED_STRING_0", "now"]
        );
        assert_eq!(remove_run_length(&["a*b"]), vec!["a*b"]);
    }

    #[test]
    fn missing_entity_value_is_an_error() {
        let program = vec!["QUOTED_STRING_0"];
        let err = reconcile_program(&program, &IndexMap::new()).unwrap_err();
        assert!(matches!(err, DatagenError::MissingEntityValue { .. }));
    }
}
