use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, warn};

use super::models::{AppState, PendingResponse, SubmitResponse};
use crate::ledger::Record;

/// Fields a submitted record must carry. Checked here at the boundary; the
/// ledger itself never inspects record contents.
const REQUIRED_FIELDS: [&str; 2] = ["author", "content"];

/// Submit a new record into the pending pool.
#[post("/records/")]
pub async fn submit_record(state: web::Data<AppState>, body: web::Json<Record>) -> impl Responder {
    let record = body.into_inner();
    for field in REQUIRED_FIELDS {
        let present = record
            .0
            .get(field)
            .and_then(|v| v.as_str())
            .is_some_and(|s| !s.is_empty());
        if !present {
            warn!("RECORDS - rejected submission missing '{field}'");
            return HttpResponse::BadRequest().body(format!("missing required field '{field}'"));
        }
    }

    let pending = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.submit_record(record);
        ledger.pending_records().len()
    };
    debug!("RECORDS - accepted record (pool size now {pending})");

    HttpResponse::Created().json(SubmitResponse { pending })
}

/// List records accepted but not yet sealed into a block.
#[get("/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let records = ledger.pending_records().to_vec();
    HttpResponse::Ok().json(PendingResponse {
        size: records.len(),
        records,
    })
}
