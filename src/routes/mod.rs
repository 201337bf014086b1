// Route exports
pub mod locations;

use actix_web::web;

pub use locations::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(locations::configure),
    );
}
