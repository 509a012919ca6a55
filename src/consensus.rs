use log::debug;

use crate::ledger::{Block, Chain};

/// Outcome of a longest-chain resolution pass.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    Replaced { length: usize },
    Kept,
}

/// Longest-valid-chain rule: adopt the longest peer-reported chain that is
/// strictly longer than ours and passes full validation, swapping the block
/// sequence wholesale. Equal-length candidates never replace, so the local
/// chain can only grow. Which of several equally-longest valid candidates
/// wins is unspecified.
pub fn resolve(chain: &mut Chain, candidates: &[Vec<Block>]) -> Resolution {
    let mut longest: Option<&[Block]> = None;
    let mut longest_len = chain.len();

    for candidate in candidates {
        if candidate.len() <= longest_len {
            continue;
        }
        if !chain.validate(candidate) {
            debug!(
                "CONSENSUS - rejected candidate of length {} (failed validation)",
                candidate.len()
            );
            continue;
        }
        longest_len = candidate.len();
        longest = Some(candidate.as_slice());
    }

    match longest {
        Some(blocks) => {
            chain.replace(blocks.to_vec());
            Resolution::Replaced {
                length: longest_len,
            }
        }
        None => Resolution::Kept,
    }
}

#[cfg(test)]
mod tests {
    use super::{Resolution, resolve};
    use crate::ledger::{Block, Chain, Ledger, Record, SealOutcome};

    fn record(author: &str, content: &str) -> Record {
        let value = serde_json::json!({ "author": author, "content": content });
        Record(value.as_object().expect("json object").clone())
    }

    /// Grow a fresh chain to `blocks` sealed blocks past genesis.
    fn peer_chain(blocks: usize, author: &str) -> Vec<Block> {
        let mut ledger = Ledger::new(1);
        for i in 0..blocks {
            ledger.submit_record(record(author, &format!("post {i}")));
            assert!(matches!(
                ledger.seal_next_block(),
                SealOutcome::Sealed { .. }
            ));
        }
        ledger.chain_view().to_vec()
    }

    #[test]
    fn longer_valid_chain_replaces_local() {
        let mut chain = Chain::new(1);
        let candidate = peer_chain(2, "peer");

        let result = resolve(&mut chain, &[candidate.clone()]);
        assert_eq!(result, Resolution::Replaced { length: 3 });
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.last().digest, candidate[2].digest);
    }

    #[test]
    fn equal_length_candidates_are_kept_out() {
        let mut chain = Chain::new(1);
        let same_len = peer_chain(0, "peer");

        assert_eq!(resolve(&mut chain, &[same_len]), Resolution::Kept);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn resolution_never_shortens_the_chain() {
        let mut local = Ledger::new(1);
        for i in 0..3 {
            local.submit_record(record("local", &format!("post {i}")));
            assert!(matches!(
                local.seal_next_block(),
                SealOutcome::Sealed { .. }
            ));
        }
        let before = local.chain().len();

        let shorter = peer_chain(1, "peer");
        assert_eq!(local.resolve_consensus(&[shorter]), Resolution::Kept);
        assert!(local.chain().len() >= before);
    }

    #[test]
    fn tampered_longer_chain_is_kept_out() {
        let mut chain = Chain::new(1);
        let mut candidate = peer_chain(4, "peer");
        candidate[2].records[0]
            .0
            .insert("content".to_string(), "rewritten history".into());

        assert_eq!(resolve(&mut chain, &[candidate]), Resolution::Kept);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn picks_some_maximal_valid_candidate() {
        let mut chain = Chain::new(1);
        let shorter = peer_chain(1, "peer-a");
        let longer = peer_chain(3, "peer-b");

        let result = resolve(&mut chain, &[shorter, longer.clone()]);
        assert_eq!(result, Resolution::Replaced { length: 4 });
        assert_eq!(chain.last().digest, longer[3].digest);
    }
}
