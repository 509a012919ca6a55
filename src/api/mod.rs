mod chain;
mod health;
pub mod models;
mod peers;
mod records;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::seal_block)
            .service(records::submit_record)
            .service(records::get_pending)
            .service(peers::receive_block)
            .service(peers::register_peers)
            .service(peers::run_consensus),
    );
}
