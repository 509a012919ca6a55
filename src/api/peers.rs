use actix_web::{HttpResponse, Responder, post, web};
use log::{info, warn};

use super::models::{AppState, ConsensusResponse, RegisterResponse};
use crate::consensus::Resolution;
use crate::ledger::Block;
use crate::network;

/// Adopt a block another peer mined and announced. The claimed digest is
/// the `digest` field of the serialized block; the ledger re-verifies it
/// against the block's content before appending.
#[post("/blocks/")]
pub async fn receive_block(state: web::Data<AppState>, body: web::Json<Block>) -> impl Responder {
    let block = body.into_inner();
    let claimed = block.digest.clone();
    let index = block.index;

    let added = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.receive_foreign_block(block, &claimed)
    };
    if !added {
        warn!("SYNC - discarded announced block #{index} (stale link or bad proof)");
        return HttpResponse::BadRequest().body("block discarded");
    }

    info!("SYNC - adopted announced block #{index} (digest={claimed})");
    HttpResponse::Created().body("block added to the chain")
}

/// Register peer addresses (host:port). Set semantics, duplicates ignored.
#[post("/peers/")]
pub async fn register_peers(
    state: web::Data<AppState>,
    body: web::Json<Vec<String>>,
) -> impl Responder {
    let nodes = body.into_inner();
    if nodes.is_empty() {
        return HttpResponse::BadRequest().body("no peer addresses provided");
    }

    let known_peers = {
        let mut peers = state.peers.lock().expect("mutex poisoned");
        for node in nodes {
            peers.insert(node);
        }
        peers.len()
    };

    HttpResponse::Created().json(RegisterResponse { known_peers })
}

/// Fetch every known peer's chain and run the longest-valid-chain rule.
#[post("/consensus/")]
pub async fn run_consensus(state: web::Data<AppState>) -> impl Responder {
    let peers: Vec<String> = {
        let peers = state.peers.lock().expect("mutex poisoned");
        peers.iter().cloned().collect()
    };
    let candidates = network::fetch_peer_chains(&state.http, &peers).await;

    let (replaced, length) = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let replaced = matches!(
            ledger.resolve_consensus(&candidates),
            Resolution::Replaced { .. }
        );
        (replaced, ledger.chain().len())
    };

    if replaced {
        info!("SYNC - adopted a longer peer chain (length {length})");
    }
    HttpResponse::Ok().json(ConsensusResponse { replaced, length })
}
