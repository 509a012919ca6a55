use sha2::{Digest, Sha256};

use super::block::Block;

/// Compute the SHA-256 digest of a block's canonical content: every field
/// except the stored digest itself, in fixed order, with records encoded as
/// sorted-key JSON so the preimage never depends on input ordering.
pub fn block_digest(block: &Block) -> String {
    let records_json = serde_json::to_string(&block.records).expect("serialize records");
    let preimage = format!(
        "{}:{}:{}:{}:{}",
        block.index, block.timestamp, block.previous_digest, block.nonce, records_json
    );
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    hex::encode(hasher.finalize())
}
