use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{GENESIS_PREVIOUS_DIGEST, digest};

/// Opaque application payload carried by a block: string keys mapped to
/// string/number values. The ledger stamps a submission timestamp and
/// otherwise never looks inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Stamp the moment this record entered the pending pool (Unix seconds).
    pub(crate) fn stamp_timestamp(&mut self) {
        self.0
            .insert("timestamp".to_string(), Utc::now().timestamp().into());
    }
}

/// A single block in the ledger holding a batch of records and a hash link
/// to its predecessor. `digest` stays empty until the block is sealed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub previous_digest: String,
    pub nonce: u64,
    pub digest: String,
    pub records: Vec<Record>,
}

impl Block {
    /// Create the genesis block: index 0, no records, sentinel previous
    /// digest. Trusted by construction; not required to meet difficulty.
    pub fn genesis() -> Self {
        let mut block = Self {
            index: 0,
            timestamp: Utc::now().timestamp(),
            previous_digest: GENESIS_PREVIOUS_DIGEST.to_string(),
            nonce: 0,
            digest: String::new(),
            records: Vec::new(),
        };
        block.digest = block.recompute();
        block
    }

    /// Create a new unsealed block. Run the nonce search and append it via
    /// the chain to seal it.
    pub fn new(index: u64, records: Vec<Record>, timestamp: i64, previous_digest: String) -> Self {
        Self {
            index,
            timestamp,
            previous_digest,
            nonce: 0,
            digest: String::new(),
            records,
        }
    }

    /// Recompute this block's digest from its content, ignoring whatever is
    /// stored in `digest`. Never mutates the block; validation compares the
    /// result against a claimed digest.
    pub fn recompute(&self) -> String {
        digest::block_digest(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, Record};

    fn record(author: &str, content: &str) -> Record {
        let value = serde_json::json!({ "author": author, "content": content });
        Record(value.as_object().expect("json object").clone())
    }

    #[test]
    fn genesis_has_valid_digest() {
        let b = Block::genesis();
        assert_eq!(b.index, 0);
        assert_eq!(b.previous_digest, "0");
        assert_eq!(b.digest, b.recompute());
        assert!(!b.digest.is_empty());
    }

    #[test]
    fn recompute_detects_tampering() {
        let mut b = Block::new(
            1,
            vec![record("a", "hi")],
            1_700_000_000,
            "prev".to_string(),
        );
        b.digest = b.recompute();

        b.records.push(record("mallory", "injected"));
        assert_ne!(b.digest, b.recompute());
    }
}
