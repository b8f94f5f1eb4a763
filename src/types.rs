/// Entity type identifier from the catalog.
/// Examples: `tt:country`, `sportradar:nba`, `imgflip:meme_id`
pub type EntityType = String;
/// A single surface token (lowercase, pre-tokenized).
/// Examples: `golden`, `corp.`, `-lrb-`
pub type Token = String;
/// Language tag sent to the tokenizer service.
/// Examples: `en`, `it`, `zh`
pub type LanguageTag = String;
/// Stable training-example identifier carried through the pipelines.
/// Examples: `S123456`, `RS123456` (after augmentation)
pub type RecordId = String;
/// Candidate literal value loaded from a parameter corpus.
/// Example: `the lord of the rings`
pub type ParamValue = String;
/// Key into the tokenizer's placeholder value map.
/// Examples: `STRING_0`, `NAME_1`, `ENTITY_tt:country_0`
pub type ValueKey = String;
/// `function.parameter` key used by the corpus cache.
/// Example: `com.twitter.post.status`
pub type CorpusKey = String;
/// Entity category label consumed by the downstream overlap resolver.
/// Examples: `ORGANIZATION`, `LOCATION`
pub type OverridableCategory = String;
