use super::{Block, GENESIS_PREVIOUS_DIGEST, pow};

/// Hash-linked, append-only sequence of blocks starting at a genesis block.
/// Difficulty is injected at construction and fixed for the chain's life.
#[derive(Debug)]
pub struct Chain {
    blocks: Vec<Block>,
    difficulty: u32,
}

impl Chain {
    /// Initialize a new chain containing exactly one sealed genesis block.
    pub fn new(difficulty: u32) -> Self {
        let mut chain = Self {
            blocks: Vec::new(),
            difficulty,
        };
        chain.blocks.push(Block::genesis());
        chain
    }

    /// Return the most recently appended block.
    pub fn last(&self) -> &Block {
        self.blocks
            .last()
            .expect("chain should always contain at least the genesis block")
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Append `block` iff it links to the current tail and `claimed_digest`
    /// is a valid proof of its content. On success the block is sealed with
    /// the claimed digest. Failure leaves the chain untouched and is
    /// reported, not raised: it is the expected outcome when a competing
    /// miner advanced the chain first, or when a peer announces a stale or
    /// tampered block.
    pub fn append(&mut self, mut block: Block, claimed_digest: &str) -> bool {
        if block.previous_digest != self.last().digest {
            return false;
        }
        if !self.is_valid_proof(&block, claimed_digest) {
            return false;
        }
        block.digest = claimed_digest.to_string();
        self.blocks.push(block);
        true
    }

    /// Check a claimed digest against difficulty and the block's content.
    fn is_valid_proof(&self, block: &Block, claimed_digest: &str) -> bool {
        pow::meets_difficulty(claimed_digest, self.difficulty)
            && claimed_digest == block.recompute()
    }

    /// Full validity check of an arbitrary candidate sequence: the genesis
    /// must be self-consistent (index 0, sentinel link, digest recomputes),
    /// and every later block must link to its predecessor's digest and carry
    /// a valid proof. One failing block invalidates the whole sequence.
    pub fn validate(&self, candidate: &[Block]) -> bool {
        let Some(genesis) = candidate.first() else {
            return false;
        };
        if genesis.index != 0
            || genesis.previous_digest != GENESIS_PREVIOUS_DIGEST
            || genesis.digest != genesis.recompute()
        {
            return false;
        }

        for pair in candidate.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);
            if current.previous_digest != prev.digest {
                return false;
            }
            if !self.is_valid_proof(current, &current.digest) {
                return false;
            }
        }

        true
    }

    /// Wholesale swap of the block sequence, used only by consensus after a
    /// longer candidate passed `validate`.
    pub(crate) fn replace(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
    }
}
