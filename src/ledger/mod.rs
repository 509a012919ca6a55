pub mod block;
pub mod chain;
pub mod digest;
pub mod model;
pub mod pow;

pub use block::{Block, Record};
pub use chain::Chain;
pub use model::{Ledger, SealOutcome};

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 2;

/// Sentinel previous-digest carried by every genesis block. Not a real
/// digest; it only exists so the link invariant holds from index 0.
pub const GENESIS_PREVIOUS_DIGEST: &str = "0";
