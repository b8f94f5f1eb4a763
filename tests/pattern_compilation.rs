use semparse_datagen::catalog::InMemoryCatalog;
use semparse_datagen::pattern::{EntityPattern, PatternElement, PatternRecord};
use semparse_datagen::tokenizer::{StaticTokenizer, TokenizationResult, Tokenize};
use semparse_datagen::{run_pattern_compilation, DatagenError};

fn raw_tokens(tokens: &[&str]) -> TokenizationResult {
    TokenizationResult {
        raw_tokens: tokens.iter().map(|t| (*t).to_string()).collect(),
        ..TokenizationResult::default()
    }
}

#[test]
fn sportradar_name_compiles_all_mandatory() {
    let pattern = EntityPattern::compile("sportradar", &["golden", "state", "warriors"]);
    assert_eq!(pattern.render(), "( \"golden\" \"state\" \"warriors\" )");
    assert!(pattern.matches(&["golden", "state", "warriors"]));
    assert!(!pattern.matches(&["golden", "state"]));
    assert!(!pattern.matches(&["state", "warriors"]));
}

#[test]
fn unknown_type_gets_abbreviation_handling_only() {
    let pattern = EntityPattern::compile("org.example:unlisted", &["acme", "corp."]);
    assert_eq!(
        pattern.elements(),
        &[
            PatternElement::Literal("acme".to_string()),
            PatternElement::OptionalAlternation(vec![
                "corp".to_string(),
                "corp.".to_string(),
                "corporation".to_string(),
            ]),
        ]
    );
}

#[test]
fn pattern_totality_holds_for_varied_names() {
    let cases: &[(&str, &[&str])] = &[
        ("sportradar", &["golden", "state", "warriors"]),
        ("sportradar", &["san", "francisco", "49ers"]),
        ("tt:stock_id", &["acme", "corp.", "-lrb-", "usa", "-rrb-"]),
        ("tt:currency_code", &["us", "dollar"]),
        ("tt:country", &["congo", ",", "republic", "of", "the"]),
        ("imgflip:meme_id", &["the", "most", "interesting", "man"]),
    ];
    for (entity_type, tokens) in cases {
        let pattern = EntityPattern::compile(entity_type, tokens);
        assert!(
            pattern.matches(tokens),
            "pattern for {entity_type} {tokens:?} must match its own name"
        );
    }
}

#[test]
fn abbreviation_soundness_accepts_any_variant_or_omission() {
    let pattern = EntityPattern::compile("tt:stock_id", &["acme", "ltd."]);
    for variant in ["ltd", "ltd.", "limited"] {
        assert!(pattern.matches(&["acme", variant]), "variant {variant}");
    }
    assert!(pattern.matches(&["acme"]));
    assert!(!pattern.matches(&["acme", "gmbh"]));
}

#[test]
fn optional_elements_may_be_omitted_together() {
    let pattern = EntityPattern::compile(
        "tt:stock_id",
        &["acme", "corp.", "-lrb-", "holding", "-rrb-", "."],
    );
    assert!(pattern.matches(&["acme", "corp.", "-lrb-", "holding", "-rrb-", "."]));
    assert!(pattern.matches(&["acme", "corporation"]));
    assert!(pattern.matches(&["acme"]));
}

#[test]
fn compilation_job_writes_one_record_per_entity() {
    let mut catalog = InMemoryCatalog::new();
    catalog.insert("en", "sportradar:nba", "Golden State Warriors");
    catalog.insert("en", "tt:country", "France");
    catalog.insert("en", "org.example:unlisted", "Acme Corp.");

    let mut tokenizer = StaticTokenizer::new();
    tokenizer.insert(
        "Golden State Warriors",
        raw_tokens(&["golden", "state", "warriors"]),
    );
    tokenizer.insert("France", raw_tokens(&["france"]));
    tokenizer.insert("Acme Corp.", raw_tokens(&["acme", "corp."]));

    let mut output = Vec::new();
    run_pattern_compilation(&catalog, &mut tokenizer, "en", &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "( \"golden\" \"state\" \"warriors\" )\tGENERIC_ENTITY_sportradar\tORGANIZATION\t0"
    );
    assert_eq!(lines[1], "( \"france\" )\tGENERIC_ENTITY_tt:country\tLOCATION\t2");
    assert_eq!(
        lines[2],
        "( \"acme\" ( \"corp\" | \"corp.\" | \"corporation\" )? )\tGENERIC_ENTITY_org.example:unlisted\t\t0"
    );
}

/// Tokenizer that reports a service-side error for one utterance.
struct RejectingTokenizer {
    inner: StaticTokenizer,
    rejected: String,
}

impl Tokenize for RejectingTokenizer {
    fn tokenize_with(
        &mut self,
        language: &str,
        utterance: &str,
        expect: Option<&str>,
    ) -> Result<TokenizationResult, DatagenError> {
        if utterance == self.rejected {
            return Err(DatagenError::TokenizerReported {
                req: 0,
                message: "unrecognized characters".to_string(),
            });
        }
        self.inner.tokenize_with(language, utterance, expect)
    }
}

#[test]
fn compilation_job_skips_entities_the_tokenizer_rejects() {
    let mut catalog = InMemoryCatalog::new();
    catalog.insert("en", "tt:country", "Atlantis");
    catalog.insert("en", "tt:country", "France");

    let mut inner = StaticTokenizer::new();
    inner.insert("France", raw_tokens(&["france"]));
    let mut tokenizer = RejectingTokenizer {
        inner,
        rejected: "Atlantis".to_string(),
    };

    let mut output = Vec::new();
    run_pattern_compilation(&catalog, &mut tokenizer, "en", &mut output).unwrap();
    let output = String::from_utf8(output).unwrap();
    assert_eq!(output.lines().count(), 1);
    assert!(output.contains("france"));
}

#[test]
fn priority_and_overrides_come_from_the_tables() {
    let record = PatternRecord::compile("sportradar:mlb", &["boston", "red", "sox"]);
    assert_eq!(record.entity_type, "sportradar");
    assert_eq!(record.overridable(), vec!["ORGANIZATION".to_string()]);
    assert_eq!(record.priority(), 0);

    let country = PatternRecord::compile("tt:country", &["japan"]);
    assert_eq!(country.priority(), 2);
}
