use log::{debug, warn};
use reqwest::Client;

use crate::api::models::ChainMessage;
use crate::ledger::Block;

/// Push a freshly sealed block to every known peer, each independently.
/// Fire-and-forget: an unreachable peer is logged and skipped, never
/// retried, and never fails the seal that produced the block.
pub async fn announce_block(http: &Client, peers: &[String], block: &Block) {
    for peer in peers {
        let url = format!("http://{peer}/api/v1/blocks/");
        match http.post(&url).json(block).send().await {
            Ok(_) => debug!("SYNC - announced block #{} to {peer}", block.index),
            Err(err) => warn!("SYNC - failed to announce block #{} to {peer}: {err}", block.index),
        }
    }
}

/// Fetch every known peer's `{length, chain}` report for consensus.
/// Unreachable or malformed peers are skipped with a warning.
pub async fn fetch_peer_chains(http: &Client, peers: &[String]) -> Vec<Vec<Block>> {
    let mut chains = Vec::new();
    for peer in peers {
        let url = format!("http://{peer}/api/v1/chain/");
        let response = match http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("SYNC - failed to fetch chain from {peer}: {err}");
                continue;
            }
        };
        match response.json::<ChainMessage>().await {
            Ok(message) => {
                debug!("SYNC - {peer} reports a chain of length {}", message.length);
                chains.push(message.chain);
            }
            Err(err) => warn!("SYNC - malformed chain report from {peer}: {err}"),
        }
    }
    chains
}
