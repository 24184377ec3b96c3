use actix_web::web;

use crate::handlers::{embed, system};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/system/health")
            .route(web::get().to(system::health_check))
    );
    cfg.service(
        web::resource("/embed")
            .route(web::get().to(embed::resolve_embed))
    );
}
