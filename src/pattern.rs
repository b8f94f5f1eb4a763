//! Entity pattern compilation.
//!
//! Turns a catalog entity name (as tokenized by the tokenizer service) into
//! a lenient pattern specification: abbreviations become optional
//! alternations, punctuation and parenthetical asides become optional
//! literals, everything else stays mandatory. The compiler only synthesizes
//! the specification; matching against live text is the downstream engine's
//! job. A small reference matcher is provided so tests can check totality
//! and abbreviation soundness without that engine.

use std::fmt;

use crate::constants::pattern::{
    ABBREVIATION_GROUPS, CLOSE_PAREN, DEFAULT_PRIORITY, ENTITY_TAG_PREFIX, IGNORABLE_TOKENS,
    OPEN_PAREN, OVERRIDABLE_TYPES, PRIORITIES, PUNCTUATION, SPORTRADAR_FAMILY, SPORTRADAR_PREFIX,
};
use crate::types::{EntityType, OverridableCategory, Token};

/// One element of a compiled pattern, in input token order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternElement {
    /// Token matched verbatim.
    Literal(Token),
    /// Token matched verbatim or skipped.
    OptionalLiteral(Token),
    /// Any one of a group of interchangeable variants, or nothing.
    OptionalAlternation(Vec<Token>),
}

impl fmt::Display for PatternElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternElement::Literal(token) => write!(f, "\"{token}\""),
            PatternElement::OptionalLiteral(token) => write!(f, "\"{token}\"?"),
            PatternElement::OptionalAlternation(variants) => {
                write!(f, "(")?;
                for (idx, variant) in variants.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " |")?;
                    }
                    write!(f, " \"{variant}\"")?;
                }
                write!(f, " )?")
            }
        }
    }
}

/// Ordered, bracketed pattern compiled from one entity name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityPattern {
    elements: Vec<PatternElement>,
}

impl EntityPattern {
    /// Compile `tokens` into a lenient pattern under `entity_type`'s policy.
    ///
    /// Single pass, output order is input order. Parenthesis markers toggle
    /// an "inside parentheses" flag and are themselves optional; everything
    /// inside an open parenthesis is optional too. An entity type absent
    /// from every policy table compiles to all-mandatory-except-punctuation.
    pub fn compile<S: AsRef<str>>(entity_type: &str, tokens: &[S]) -> Self {
        let ignorable = ignorable_tokens(entity_type);
        let numeric_ignorable = entity_type == SPORTRADAR_FAMILY;
        let mut elements = Vec::with_capacity(tokens.len());
        let mut in_paren = false;
        for token in tokens {
            let token = token.as_ref();
            if let Some(group) = abbreviation_group(token) {
                elements.push(PatternElement::OptionalAlternation(
                    group.iter().map(|variant| (*variant).to_string()).collect(),
                ));
                continue;
            }
            let mut optional = false;
            if token == OPEN_PAREN {
                in_paren = true;
                optional = true;
            } else if token == CLOSE_PAREN {
                in_paren = false;
                optional = true;
            } else if PUNCTUATION.contains(&token)
                || ignorable.contains(&token)
                || (numeric_ignorable && is_numeric(token))
            {
                optional = true;
            }
            if in_paren || optional {
                elements.push(PatternElement::OptionalLiteral(token.to_string()));
            } else {
                elements.push(PatternElement::Literal(token.to_string()));
            }
        }
        Self { elements }
    }

    /// Pattern elements in input order.
    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    /// Render the bracketed pattern specification consumed by the external
    /// matching engine, e.g. `( "golden" "state" "warriors" )`.
    pub fn render(&self) -> String {
        let mut out = String::from("(");
        for element in &self.elements {
            out.push(' ');
            out.push_str(&element.to_string());
        }
        out.push_str(" )");
        out
    }

    /// Reference matcher: true if `tokens` is matched exactly by this
    /// pattern. Backtracks over optional elements. Intended for tests and
    /// diagnostics, not for production matching.
    pub fn matches<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        fn step<S: AsRef<str>>(elements: &[PatternElement], tokens: &[S]) -> bool {
            let Some((element, rest_elements)) = elements.split_first() else {
                return tokens.is_empty();
            };
            match element {
                PatternElement::Literal(expected) => tokens
                    .split_first()
                    .is_some_and(|(tok, rest)| tok.as_ref() == expected && step(rest_elements, rest)),
                PatternElement::OptionalLiteral(expected) => {
                    if let Some((tok, rest)) = tokens.split_first() {
                        if tok.as_ref() == expected && step(rest_elements, rest) {
                            return true;
                        }
                    }
                    step(rest_elements, tokens)
                }
                PatternElement::OptionalAlternation(variants) => {
                    if let Some((tok, rest)) = tokens.split_first() {
                        if variants.iter().any(|variant| variant == tok.as_ref())
                            && step(rest_elements, rest)
                        {
                            return true;
                        }
                    }
                    step(rest_elements, tokens)
                }
            }
        }
        step(&self.elements, tokens)
    }
}

/// One emitted pattern record: pattern plus the override/priority metadata
/// the downstream matcher uses to resolve overlapping entity matches.
#[derive(Clone, Debug)]
pub struct PatternRecord {
    /// Entity type after family conflation.
    pub entity_type: EntityType,
    /// Compiled lenient pattern.
    pub pattern: EntityPattern,
}

impl PatternRecord {
    /// Compile a record for `entity_type` from its name's raw tokens.
    pub fn compile<S: AsRef<str>>(entity_type: &str, tokens: &[S]) -> Self {
        let entity_type = conflate_entity_type(entity_type);
        let pattern = EntityPattern::compile(&entity_type, tokens);
        Self {
            entity_type,
            pattern,
        }
    }

    /// Coarse categories this entity type may override on overlap.
    pub fn overridable(&self) -> Vec<OverridableCategory> {
        OVERRIDABLE_TYPES
            .iter()
            .find(|(entity_type, _)| *entity_type == self.entity_type)
            .map(|(_, categories)| {
                categories
                    .iter()
                    .map(|category| (*category).to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Match priority for this entity type (0 unless listed).
    pub fn priority(&self) -> i32 {
        PRIORITIES
            .iter()
            .find(|(entity_type, _)| *entity_type == self.entity_type)
            .map(|(_, priority)| *priority)
            .unwrap_or(DEFAULT_PRIORITY)
    }

    /// Render the tab-separated record:
    /// `pattern \t GENERIC_ENTITY_<type> \t cat1,cat2 \t priority`.
    pub fn render_line(&self) -> String {
        format!(
            "{}\t{}{}\t{}\t{}",
            self.pattern.render(),
            ENTITY_TAG_PREFIX,
            self.entity_type,
            self.overridable().join(","),
            self.priority()
        )
    }
}

/// Conflate all `sportradar:*` types into one family. The same club or
/// university often appears under several sportradar subtypes with the same
/// surface name.
pub fn conflate_entity_type(entity_type: &str) -> EntityType {
    if entity_type.starts_with(SPORTRADAR_PREFIX) {
        SPORTRADAR_FAMILY.to_string()
    } else {
        entity_type.to_string()
    }
}

fn abbreviation_group(token: &str) -> Option<&'static [&'static str]> {
    ABBREVIATION_GROUPS
        .iter()
        .copied()
        .find(|group| group.contains(&token))
}

fn ignorable_tokens(entity_type: &str) -> &'static [&'static str] {
    IGNORABLE_TOKENS
        .iter()
        .find(|(candidate, _)| *candidate == entity_type)
        .map(|(_, tokens)| *tokens)
        .unwrap_or(&[])
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| ch.is_ascii_digit())
}
