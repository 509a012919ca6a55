use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, ChainMessage, SealResponse};
use crate::ledger::pow;
use crate::network;

/// Get the full chain as `{length, chain}`.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ChainMessage {
        length: ledger.chain().len(),
        chain: ledger.chain_view().to_vec(),
    };
    HttpResponse::Ok().json(resp)
}

/// Seal the pending records into the next block:
/// - Drain the pool and build the candidate under the ledger lock
/// - Run the nonce search off the lock so mining never blocks submissions
/// - Commit under the lock (the tail may have moved meanwhile)
/// - Announce the sealed block to peers, fire-and-forget
#[post("/mine/")]
pub async fn seal_block(state: web::Data<AppState>) -> impl Responder {
    let (candidate, difficulty) = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let difficulty = ledger.chain().difficulty();
        (ledger.prepare_block(), difficulty)
    };
    let Some(mut block) = candidate else {
        return HttpResponse::Ok().body("no records to seal");
    };

    let mined = web::block(move || {
        let digest = pow::search(&mut block, difficulty);
        (block, digest)
    })
    .await;
    let (block, digest) = match mined {
        Ok(found) => found,
        Err(err) => {
            return HttpResponse::InternalServerError().body(format!("mining task failed: {err}"));
        }
    };

    let sealed = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        if ledger.commit_block(block, &digest) {
            Some(ledger.chain().last().clone())
        } else {
            None
        }
    };
    let Some(sealed) = sealed else {
        warn!("MINER - chain advanced during sealing; block discarded, records back in pool");
        return HttpResponse::Conflict().body("chain advanced during sealing; records returned to pool");
    };

    info!(
        "MINER - sealed block #{} (digest={}, nonce={})",
        sealed.index, sealed.digest, sealed.nonce
    );

    // Announce off the request path; a dead peer must not fail the seal.
    let peers: Vec<String> = {
        let peers = state.peers.lock().expect("mutex poisoned");
        peers.iter().cloned().collect()
    };
    let http = state.http.clone();
    let announced = sealed.clone();
    actix_web::rt::spawn(async move {
        network::announce_block(&http, &peers, &announced).await;
    });

    HttpResponse::Ok().json(SealResponse {
        sealed_index: sealed.index,
        digest: sealed.digest.clone(),
        nonce: sealed.nonce,
    })
}
