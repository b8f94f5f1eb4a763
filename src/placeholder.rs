//! Placeholder token classification.
//!
//! Both the utterance and the formal program carry typed, numbered
//! placeholder tokens (`QUOTED_STRING_0`, `USERNAME_1`, ...). All category
//! dispatch goes through [`Placeholder::classify`] so prefix parsing lives
//! in exactly one place.

use crate::constants::quotes::{HASHTAG_ANNOTATION, USERNAME_ANNOTATION};
use crate::types::{EntityType, ValueKey};

/// Tagged view of a placeholder token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// `QUOTED_STRING_<n>` — a free-form quoted string.
    QuotedString(u32),
    /// `USERNAME_<n>` — a username literal.
    Username(u32),
    /// `HASHTAG_<n>` — a hashtag literal.
    Hashtag(u32),
    /// `GENERIC_ENTITY_<type>_<n>` — a catalog entity of the given type.
    GenericEntity {
        /// Entity type carried in the token itself.
        subtype: EntityType,
        /// Per-example placeholder index.
        index: u32,
    },
}

impl Placeholder {
    /// Classify a token, returning `None` for plain (non-placeholder) tokens.
    pub fn classify(token: &str) -> Option<Self> {
        if let Some(rest) = token.strip_prefix("QUOTED_STRING_") {
            return rest.parse().ok().map(Placeholder::QuotedString);
        }
        if let Some(rest) = token.strip_prefix("USERNAME_") {
            return rest.parse().ok().map(Placeholder::Username);
        }
        if let Some(rest) = token.strip_prefix("HASHTAG_") {
            return rest.parse().ok().map(Placeholder::Hashtag);
        }
        if let Some(rest) = token.strip_prefix("GENERIC_ENTITY_") {
            let (subtype, index) = rest.rsplit_once('_')?;
            if subtype.is_empty() {
                return None;
            }
            return index.parse().ok().map(|index| Placeholder::GenericEntity {
                subtype: subtype.to_string(),
                index,
            });
        }
        None
    }

    /// True for the categories the substitution engine samples values for.
    /// Generic entities are matched by compiled patterns instead and pass
    /// through both rewrite stages untouched.
    pub fn is_sampled(&self) -> bool {
        matches!(
            self,
            Placeholder::QuotedString(_) | Placeholder::Username(_) | Placeholder::Hashtag(_)
        )
    }

    /// Key under which the tokenizer service reports this placeholder's
    /// surface value. The service strips the leading prefix word, so
    /// `QUOTED_STRING_0` is reported as `STRING_0`, `USERNAME_0` as
    /// `NAME_0`, `HASHTAG_0` as `TAG_0`, and `GENERIC_ENTITY_tt:x_0` as
    /// `ENTITY_tt:x_0`.
    pub fn value_key(&self) -> ValueKey {
        match self {
            Placeholder::QuotedString(n) => format!("STRING_{n}"),
            Placeholder::Username(n) => format!("NAME_{n}"),
            Placeholder::Hashtag(n) => format!("TAG_{n}"),
            Placeholder::GenericEntity { subtype, index } => format!("ENTITY_{subtype}_{index}"),
        }
    }

    /// Type annotation appended to the reconciled literal, if any.
    pub fn annotation(&self) -> Option<String> {
        match self {
            Placeholder::QuotedString(_) => None,
            Placeholder::Username(_) => Some(USERNAME_ANNOTATION.to_string()),
            Placeholder::Hashtag(_) => Some(HASHTAG_ANNOTATION.to_string()),
            Placeholder::GenericEntity { subtype, .. } => Some(format!("^^{subtype}")),
        }
    }
}
