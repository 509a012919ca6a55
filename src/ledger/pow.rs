use super::block::Block;

/// Brute-force nonce search: reset the nonce and increment it until the
/// block's digest starts with `difficulty` leading zeros (hex). Returns the
/// satisfying digest; the caller reads the final nonce off the block. No
/// timeout or cancellation, difficulty stays small.
pub fn search(block: &mut Block, difficulty: u32) -> String {
    let target_prefix = "0".repeat(difficulty as usize);
    block.nonce = 0;
    let mut computed = block.recompute();
    while !computed.starts_with(&target_prefix) {
        block.nonce = block.nonce.wrapping_add(1);
        computed = block.recompute();
    }
    computed
}

/// Difficulty predicate shared by sealing and validation.
pub fn meets_difficulty(digest: &str, difficulty: u32) -> bool {
    digest.chars().take(difficulty as usize).all(|c| c == '0')
}
