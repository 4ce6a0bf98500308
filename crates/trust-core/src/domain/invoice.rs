//! # Invoice
//!
//! The request handed to every signatory: the exact bytes to sign and a
//! free-form memo for callback signers that present it to a human.

/// Message to be signed together with an informational memo.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invoice {
    message: Vec<u8>,
    memo: String,
}

impl Invoice {
    /// Create an invoice with an empty memo.
    pub fn new(message: impl Into<Vec<u8>>) -> Self {
        Self {
            message: message.into(),
            memo: String::new(),
        }
    }

    /// Attach a memo.
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Bytes every signature must cover.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }
}
