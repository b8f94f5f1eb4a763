//! Small text helpers shared by the pipeline modules.

use crate::errors::DatagenError;

/// True if any whitespace-delimited field of `line` consists solely of
/// digits and dots. Parameter corpora exclude such lines at load time.
pub fn has_numeric_field(line: &str) -> bool {
    line.split_whitespace().any(is_numeric_field)
}

fn is_numeric_field(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
}

/// Split a tab-delimited record into exactly `expected` fields.
pub fn split_record(line: &str, expected: usize) -> Result<Vec<&str>, DatagenError> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() != expected {
        return Err(DatagenError::MalformedRecord {
            id: fields.first().copied().unwrap_or("<empty>").to_string(),
            details: format!("expected {expected} tab-separated fields, got {}", fields.len()),
        });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_are_detected() {
        assert!(has_numeric_field("42"));
        assert!(has_numeric_field("pi is 3.14 here"));
        assert!(!has_numeric_field("no numbers here"));
        assert!(!has_numeric_field("49ers"));
        assert!(!has_numeric_field(""));
    }

    #[test]
    fn split_record_requires_exact_arity() {
        let fields = split_record("id\tsentence\tprogram\n", 3).unwrap();
        assert_eq!(fields, vec!["id", "sentence", "program"]);
        assert!(split_record("id\tsentence", 3).is_err());
    }
}
