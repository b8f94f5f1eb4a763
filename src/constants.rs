/// Constants used by the entity pattern compiler.
pub mod pattern {
    /// Interchangeable surface-variant groups. A token matching any member
    /// compiles to an optional alternation over the whole group.
    pub const ABBREVIATION_GROUPS: &[&[&str]] = &[
        &["ltd", "ltd.", "limited"],
        &["corp", "corp.", "corporation"],
        &["l.l.c", "llc"],
        &["&", "and"],
        &["inc.", "inc", "incorporated"],
    ];

    /// Per-entity-type tokens that become optional in compiled patterns.
    pub const IGNORABLE_TOKENS: &[(&str, &[&str])] = &[
        (
            "sportradar",
            &[
                "fc", "ac", "us", "if", "as", "rc", "rb", "il", "fk", "cd", "cf",
            ],
        ),
        ("imgflip:meme_id", &["the"]),
        ("tt:currency_code", &["us"]),
        (
            "tt:stock_id",
            &["l.p.", "s.a.", "plc", "n.v", "s.a.b", "c.v."],
        ),
    ];

    /// Per-entity-type match priority consumed by the downstream matcher.
    pub const PRIORITIES: &[(&str, i32)] = &[("tt:country", 2)];

    /// Coarse NER categories each entity type is allowed to override when
    /// matches overlap. Consumed downstream, only emitted here.
    pub const OVERRIDABLE_TYPES: &[(&str, &[&str])] = &[
        ("sportradar", &["ORGANIZATION"]),
        ("tt:stock_id", &["ORGANIZATION"]),
        ("tt:country", &["LOCATION"]),
        ("tt:currency_code", &["LOCATION"]),
    ];

    /// Tokenizer marker for an opening parenthesis.
    pub const OPEN_PAREN: &str = "-lrb-";
    /// Tokenizer marker for a closing parenthesis.
    pub const CLOSE_PAREN: &str = "-rrb-";
    /// Punctuation tokens that are never mandatory in a pattern.
    pub const PUNCTUATION: &[&str] = &[",", "."];
    /// Entity-type prefix conflated into a single pattern family.
    pub const SPORTRADAR_PREFIX: &str = "sportradar:";
    /// Conflated family name for all `sportradar:*` entity types.
    pub const SPORTRADAR_FAMILY: &str = "sportradar";
    /// Placeholder tag prefix used in emitted pattern records.
    pub const ENTITY_TAG_PREFIX: &str = "GENERIC_ENTITY_";
    /// Priority assigned to entity types absent from the priority table.
    pub const DEFAULT_PRIORITY: i32 = 0;
}

/// Constants used by program-token scanning and substitution.
pub mod program {
    /// Token prefix introducing a function reference.
    pub const FUNCTION_PREFIX: &str = "@";
    /// Token prefix introducing a parameter reference.
    pub const PARAM_PREFIX: &str = "param:";
    /// Comparison/containment operators recognized by the binding pass.
    pub const OPERATORS: &[&str] = &[
        "==",
        "=",
        "=~",
        "~=",
        "in_array",
        "contains",
        "starts_with",
        "ends_with",
        ">=",
        "<=",
    ];
    /// Operator whose parameters intentionally have no sampled values.
    pub const CONTAINS_OPERATOR: &str = "contains";
    /// Prefix prepended to record ids of generated (augmented) examples.
    pub const AUGMENTED_ID_MARKER: &str = "R";
}

/// Constants used by the quote/placeholder reconciler.
pub mod quotes {
    /// Degenerate tokenizer artifacts that denote an empty quoted string.
    pub const EMPTY_QUOTE_ARTIFACTS: &[&str] = &["'' ''", "`` ''", "'' ``"];
    /// Leading artifacts stripped from a quoted value (each includes the
    /// trailing space separating it from the content).
    pub const LEADING_ARTIFACTS: &[&str] = &["`` ", "'' "];
    /// Trailing artifact stripped from a quoted value.
    pub const TRAILING_ARTIFACT: &str = " ''";
    /// Type annotation appended to reconciled username literals.
    pub const USERNAME_ANNOTATION: &str = "^^tt:username";
    /// Type annotation appended to reconciled hashtag literals.
    pub const HASHTAG_ANNOTATION: &str = "^^tt:hashtag";
    /// Separator between a run-length counted token and its multiplier.
    pub const RUN_LENGTH_SEPARATOR: char = '*';
}

/// Constants used by the tokenizer client and run configuration.
pub mod tokenizer {
    /// Default endpoint of the local tokenizer service.
    pub const DEFAULT_ADDR: &str = "127.0.0.1:8888";
    /// Default language tag used when none is configured.
    pub const DEFAULT_LANGUAGE: &str = "en";
    /// Prefix marking an expected-type hint on probe input lines.
    pub const EXPECT_PREFIX: &str = "expect:";
}

/// Constants used by run configuration and the catalog boundary.
pub mod config {
    /// Fixed RNG seed making substitution runs reproducible.
    pub const DEFAULT_SEED: u64 = 1234;
    /// URL scheme required for the entity catalog connection string.
    pub const CATALOG_URL_SCHEME: &str = "mysql";
    /// Extension of parameter corpus files (`function.parameter.txt`).
    pub const CORPUS_EXTENSION: &str = "txt";
}
