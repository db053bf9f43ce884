// Route exports
pub mod upload;

use actix_web::web;

pub use upload::{AppState, UploadLimits};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(upload::configure),
    );
}
