//! Markup that the host application has explicitly vouched for.
//!
//! Ad codes and newsletter bodies are injected verbatim into the document.
//! The only way to obtain a [`TrustedMarkup`] is [`TrustedMarkup::trust`],
//! so every injection site is traceable to a caller that accepted the risk.

use std::fmt;

#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    /// Mark `raw` as trusted. No sanitization happens here.
    pub fn trust(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Trust `raw` only when it carries something besides whitespace.
    pub fn trust_non_empty(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// Payloads can be large blobs of third-party script; keep logs readable.
impl fmt::Debug for TrustedMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrustedMarkup({} bytes)", self.0.len())
    }
}
