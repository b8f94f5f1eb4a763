//! Tokenizer service client.
//!
//! The tokenizer is an external stateless service speaking newline-delimited
//! JSON over one long-lived connection: one request line out, block until
//! exactly one response line comes back. Requests carry a monotonically
//! incrementing `req` counter for correlation. The [`Tokenize`] trait keeps
//! the transport pluggable: [`RemoteTokenizer`] works over any
//! `Read`/`Write` pair (TCP in production, in-memory buffers in tests), and
//! [`StaticTokenizer`] serves scripted results in-process.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::DatagenError;
use crate::types::{Token, ValueKey};

/// Client-facing view of one tokenization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenizationResult {
    /// Canonical tokens (quoted spans collapsed into placeholders, with
    /// run-length `*n` suffixes on collapsed tokens).
    pub tokens: Vec<Token>,
    /// Raw surface tokens with no placeholder collapsing.
    pub raw_tokens: Vec<Token>,
    /// Tokens with quote artifacts removed.
    pub tokens_no_quotes: Vec<Token>,
    /// Placeholder surface values keyed by stripped placeholder name
    /// (`STRING_0`, `NAME_0`, `TAG_0`, `ENTITY_<type>_0`).
    pub values: IndexMap<ValueKey, String>,
}

/// Narrow tokenization interface used by the pipelines.
pub trait Tokenize {
    /// Tokenize `utterance` under `language`, optionally passing an
    /// expected-type hint through to the service.
    fn tokenize_with(
        &mut self,
        language: &str,
        utterance: &str,
        expect: Option<&str>,
    ) -> Result<TokenizationResult, DatagenError>;

    /// Tokenize without an expected-type hint.
    fn tokenize(
        &mut self,
        language: &str,
        utterance: &str,
    ) -> Result<TokenizationResult, DatagenError> {
        self.tokenize_with(language, utterance, None)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenizeRequest<'a> {
    language_tag: &'a str,
    utterance: &'a str,
    req: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    expect: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenizeResponse {
    #[serde(default)]
    tokens: Vec<Token>,
    #[serde(default)]
    raw_tokens: Vec<Token>,
    #[serde(default)]
    tokens_no_quotes: Vec<Token>,
    #[serde(default)]
    values: IndexMap<ValueKey, String>,
    #[serde(default)]
    error: Option<String>,
}

/// Tokenizer client over a line-based request/response transport.
pub struct RemoteTokenizer<R, W> {
    reader: R,
    writer: W,
    next_req: u64,
}

impl RemoteTokenizer<BufReader<TcpStream>, TcpStream> {
    /// Connect to the tokenizer service at `addr`. Connection failures are
    /// fatal for the run.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self, DatagenError> {
        let stream = TcpStream::connect(addr).map_err(|err| DatagenError::TokenizerUnavailable {
            reason: err.to_string(),
        })?;
        let reader = stream
            .try_clone()
            .map_err(|err| DatagenError::TokenizerUnavailable {
                reason: err.to_string(),
            })?;
        Ok(Self::from_transport(BufReader::new(reader), stream))
    }
}

impl<R: BufRead, W: Write> RemoteTokenizer<R, W> {
    /// Build a client over an arbitrary transport pair.
    pub fn from_transport(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            next_req: 0,
        }
    }

    /// Send one request and block until its response line arrives,
    /// returning the raw JSON line.
    pub fn exchange_raw(
        &mut self,
        language: &str,
        utterance: &str,
        expect: Option<&str>,
    ) -> Result<(u64, String), DatagenError> {
        let req = self.next_req;
        self.next_req += 1;
        let request = TokenizeRequest {
            language_tag: language,
            utterance,
            req,
            expect,
        };
        let mut payload = serde_json::to_string(&request).map_err(|err| {
            DatagenError::TokenizerUnavailable {
                reason: format!("failed to encode request {req}: {err}"),
            }
        })?;
        payload.push('\n');
        self.writer.write_all(payload.as_bytes())?;
        self.writer.flush()?;
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(DatagenError::TokenizerUnavailable {
                reason: format!("connection closed before response to request {req}"),
            });
        }
        debug!(req, "tokenizer round trip");
        Ok((req, line))
    }
}

impl<R: BufRead, W: Write> Tokenize for RemoteTokenizer<R, W> {
    fn tokenize_with(
        &mut self,
        language: &str,
        utterance: &str,
        expect: Option<&str>,
    ) -> Result<TokenizationResult, DatagenError> {
        let (req, line) = self.exchange_raw(language, utterance, expect)?;
        let response: TokenizeResponse =
            serde_json::from_str(&line).map_err(|err| DatagenError::TokenizerUnavailable {
                reason: format!("malformed response to request {req}: {err}"),
            })?;
        if let Some(message) = response.error {
            return Err(DatagenError::TokenizerReported { req, message });
        }
        Ok(TokenizationResult {
            tokens: response.tokens,
            raw_tokens: response.raw_tokens,
            tokens_no_quotes: response.tokens_no_quotes,
            values: response.values,
        })
    }
}

/// In-process tokenizer serving scripted results, keyed by utterance.
#[derive(Default)]
pub struct StaticTokenizer {
    responses: IndexMap<String, TokenizationResult>,
}

impl StaticTokenizer {
    /// Create an empty scripted tokenizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result returned for `utterance`.
    pub fn insert(&mut self, utterance: impl Into<String>, result: TokenizationResult) {
        self.responses.insert(utterance.into(), result);
    }
}

impl Tokenize for StaticTokenizer {
    fn tokenize_with(
        &mut self,
        _language: &str,
        utterance: &str,
        _expect: Option<&str>,
    ) -> Result<TokenizationResult, DatagenError> {
        self.responses
            .get(utterance)
            .cloned()
            .ok_or_else(|| DatagenError::TokenizerUnavailable {
                reason: format!("no scripted tokenization for '{utterance}'"),
            })
    }
}
