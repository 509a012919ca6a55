use chrono::Utc;

use super::{Block, Chain, Record, pow};
use crate::consensus::{self, Resolution};

/// Outcome of a seal attempt. An empty pool is a distinct no-op, not an
/// error, and a lost mining race is a rejection, not a failure.
#[derive(Debug, PartialEq, Eq)]
pub enum SealOutcome {
    NoPendingRecords,
    Sealed { index: u64 },
    Rejected,
}

/// The node's ledger: one chain plus the pool of records accepted but not
/// yet included in a sealed block. Callers share it behind a single lock;
/// every method here assumes exclusive access.
pub struct Ledger {
    chain: Chain,
    pending: Vec<Record>,
}

impl Ledger {
    pub fn new(difficulty: u32) -> Self {
        Self {
            chain: Chain::new(difficulty),
            pending: Vec::new(),
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Read-only view of the block sequence, for serialization.
    pub fn chain_view(&self) -> &[Block] {
        self.chain.blocks()
    }

    /// Read-only snapshot of the pool.
    pub fn pending_records(&self) -> &[Record] {
        &self.pending
    }

    /// Stamp the record's submission time and queue it for the next block.
    pub fn submit_record(&mut self, mut record: Record) {
        record.stamp_timestamp();
        self.pending.push(record);
    }

    /// Drain the pool into an unsealed candidate linked to the current tail,
    /// or `None` when there is nothing to seal. Split from `commit_block` so
    /// callers can run the nonce search without holding the ledger lock.
    pub fn prepare_block(&mut self) -> Option<Block> {
        if self.pending.is_empty() {
            return None;
        }
        let last = self.chain.last();
        Some(Block::new(
            last.index + 1,
            std::mem::take(&mut self.pending),
            Utc::now().timestamp(),
            last.digest.clone(),
        ))
    }

    /// Try to append a mined candidate. On a lost race the drained records
    /// go back to the front of the pool rather than being discarded, so a
    /// later seal can still include them.
    pub fn commit_block(&mut self, block: Block, digest: &str) -> bool {
        let records = block.records.clone();
        if self.chain.append(block, digest) {
            return true;
        }
        let mut restored = records;
        restored.append(&mut self.pending);
        self.pending = restored;
        false
    }

    /// Seal the next block in one call: drain the pool, search for a nonce,
    /// append. Callers needing the search off-lock use `prepare_block` and
    /// `commit_block` directly.
    pub fn seal_next_block(&mut self) -> SealOutcome {
        let Some(mut block) = self.prepare_block() else {
            return SealOutcome::NoPendingRecords;
        };
        let digest = pow::search(&mut block, self.chain.difficulty());
        let index = block.index;
        if self.commit_block(block, &digest) {
            SealOutcome::Sealed { index }
        } else {
            SealOutcome::Rejected
        }
    }

    /// Append a block another peer mined and announced. Rejection reports
    /// false and leaves local state untouched.
    pub fn receive_foreign_block(&mut self, block: Block, claimed_digest: &str) -> bool {
        self.chain.append(block, claimed_digest)
    }

    /// Run the longest-valid-chain rule against peer-reported chains.
    pub fn resolve_consensus(&mut self, candidates: &[Vec<Block>]) -> Resolution {
        consensus::resolve(&mut self.chain, candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::{Ledger, SealOutcome};
    use crate::ledger::{Record, pow};

    fn record(author: &str, content: &str) -> Record {
        let value = serde_json::json!({ "author": author, "content": content });
        Record(value.as_object().expect("json object").clone())
    }

    #[test]
    fn submit_then_seal_grows_chain_and_drains_pool() {
        let mut ledger = Ledger::new(2);
        ledger.submit_record(record("a", "hi"));
        assert_eq!(ledger.pending_records().len(), 1);
        assert!(ledger.pending_records()[0].0.contains_key("timestamp"));

        assert_eq!(ledger.seal_next_block(), SealOutcome::Sealed { index: 1 });

        assert_eq!(ledger.chain().len(), 2);
        let sealed = ledger.chain().last();
        assert_eq!(sealed.index, 1);
        assert_eq!(sealed.previous_digest, ledger.chain_view()[0].digest);
        assert!(sealed.digest.starts_with("00"));
        assert!(ledger.pending_records().is_empty());
    }

    #[test]
    fn sealing_empty_pool_is_a_noop() {
        let mut ledger = Ledger::new(2);
        assert_eq!(ledger.seal_next_block(), SealOutcome::NoPendingRecords);
        assert_eq!(ledger.chain().len(), 1);
    }

    #[test]
    fn lost_race_returns_records_to_pool() {
        let mut ledger = Ledger::new(1);
        ledger.submit_record(record("a", "first"));
        let mut stale = ledger.prepare_block().expect("candidate");
        let digest = pow::search(&mut stale, 1);

        // A competing block lands while the search was running.
        ledger.submit_record(record("b", "second"));
        assert!(matches!(
            ledger.seal_next_block(),
            SealOutcome::Sealed { .. }
        ));

        assert!(!ledger.commit_block(stale, &digest));
        assert_eq!(ledger.chain().len(), 2);
        let pending = ledger.pending_records();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].0.get("author").and_then(|v| v.as_str()), Some("a"));
    }

    #[test]
    fn foreign_block_with_bad_link_is_rejected() {
        let mut miner = Ledger::new(1);
        miner.submit_record(record("a", "hi"));
        assert!(matches!(miner.seal_next_block(), SealOutcome::Sealed { .. }));
        let announced = miner.chain().last().clone();

        // Receiver already sealed its own block, so the announced block
        // links to a tail the receiver no longer has.
        let mut receiver = Ledger::new(1);
        receiver.submit_record(record("c", "mine"));
        assert!(matches!(
            receiver.seal_next_block(),
            SealOutcome::Sealed { .. }
        ));

        let claimed = announced.digest.clone();
        assert!(!receiver.receive_foreign_block(announced, &claimed));
        assert_eq!(receiver.chain().len(), 2);
    }
}
