use std::collections::HashSet;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::ledger::{Block, DEFAULT_DIFFICULTY, Ledger, Record};

/// Shared application state: the node's ledger (chain + pending pool)
/// behind a single lock, the set of known peer addresses, and one HTTP
/// client reused for all peer traffic.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub peers: Mutex<HashSet<String>>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(difficulty: u32) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new(difficulty)),
            peers: Mutex::new(HashSet::new()),
            http: reqwest::Client::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

/* ---------- Chain / sync wire models ---------- */

/// Wire form of a full chain, served by `/chain/` and fetched back from
/// peers during consensus.
#[derive(Serialize, Deserialize)]
pub struct ChainMessage {
    pub length: usize,
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct SealResponse {
    pub sealed_index: u64,
    pub digest: String,
    pub nonce: u64,
}

#[derive(Serialize)]
pub struct ConsensusResponse {
    pub replaced: bool,
    pub length: usize,
}

/* ---------- Record API models ---------- */

#[derive(Serialize)]
pub struct SubmitResponse {
    pub pending: usize,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub size: usize,
    pub records: Vec<Record>,
}

/* ---------- Peer API models ---------- */

#[derive(Serialize)]
pub struct RegisterResponse {
    pub known_peers: usize,
}
