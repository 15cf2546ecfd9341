//! Entity URI canonicalisation
//!
//! Lookup services return URIs the way their index stores them, often
//! percent-encoded (`Company_%28military_unit%29`), while the knowledge
//! graph is keyed by the decoded form. Which escapes to undo depends on the
//! index, so the rule is pluggable.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{DisambiguatorConfig, UriDecoding};

/// Turns a lookup URI into the form used for graph lookups
pub trait UriDecoder: Send + Sync {
    fn decode<'a>(&self, uri: &'a str) -> Cow<'a, str>;
}

/// Full percent-decoding; invalid UTF-8 sequences become U+FFFD
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentDecoder;

impl UriDecoder for PercentDecoder {
    fn decode<'a>(&self, uri: &'a str) -> Cow<'a, str> {
        match urlencoding::decode_binary(uri.as_bytes()) {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
            Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}

/// Leaves URIs untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbatimDecoder;

impl UriDecoder for VerbatimDecoder {
    fn decode<'a>(&self, uri: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(uri)
    }
}

/// Escapes undone by [`SelectiveDecoder::default`]
pub const DEFAULT_SELECTIVE_ESCAPES: &[&str] = &["%28", "%29", "%27", "%21", "%2C"];

/// Decodes only a fixed set of escapes, everything else stays encoded.
///
/// Decoding is a single left-to-right scan; decoded output is never scanned
/// again, so `%2528` with `%25` configured becomes `%28` and stays that way.
#[derive(Debug, Clone)]
pub struct SelectiveDecoder {
    /// Upper-case hex digits of each escape -> replacement
    replacements: HashMap<[u8; 2], String>,
}

impl SelectiveDecoder {
    /// Build from escapes such as `"%28"`, matched in either hex casing.
    /// Entries that are not a single `%XX` escape of valid UTF-8 are ignored.
    pub fn new<I, T>(escapes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut replacements = HashMap::new();
        for escape in escapes {
            let bytes = escape.as_ref().as_bytes();
            let &[b'%', hi, lo] = bytes else {
                continue;
            };
            if !hi.is_ascii_hexdigit() || !lo.is_ascii_hexdigit() {
                continue;
            }
            let Ok(decoded) = urlencoding::decode(escape.as_ref()) else {
                continue;
            };
            replacements
                .entry([hi.to_ascii_uppercase(), lo.to_ascii_uppercase()])
                .or_insert_with(|| decoded.into_owned());
        }
        Self { replacements }
    }
}

impl Default for SelectiveDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTIVE_ESCAPES)
    }
}

impl UriDecoder for SelectiveDecoder {
    fn decode<'a>(&self, uri: &'a str) -> Cow<'a, str> {
        let bytes = uri.as_bytes();
        let mut decoded: Option<String> = None;
        // start of the input not yet copied to `decoded`
        let mut pending = 0;
        let mut i = 0;

        while i + 2 < bytes.len() {
            if bytes[i] == b'%' {
                let key = [
                    bytes[i + 1].to_ascii_uppercase(),
                    bytes[i + 2].to_ascii_uppercase(),
                ];
                if let Some(replacement) = self.replacements.get(&key) {
                    let out = decoded.get_or_insert_with(|| String::with_capacity(uri.len()));
                    out.push_str(&uri[pending..i]);
                    out.push_str(replacement);
                    i += 3;
                    pending = i;
                    continue;
                }
            }
            i += 1;
        }

        match decoded {
            None => Cow::Borrowed(uri),
            Some(mut out) => {
                out.push_str(&uri[pending..]);
                Cow::Owned(out)
            }
        }
    }
}

/// Decoder selected by configuration
pub fn decoder_for(config: &DisambiguatorConfig) -> Arc<dyn UriDecoder> {
    match config.uri_decoding {
        UriDecoding::Percent => Arc::new(PercentDecoder),
        UriDecoding::Verbatim => Arc::new(VerbatimDecoder),
        UriDecoding::Selective if config.selective_escapes.is_empty() => {
            Arc::new(SelectiveDecoder::default())
        }
        UriDecoding::Selective => Arc::new(SelectiveDecoder::new(&config.selective_escapes)),
    }
}
