use actix_web::web;

use crate::handlers::{drafts, profiles};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profiles")
            .service(
                web::resource("/samples")
                    .route(web::get().to(profiles::list_sample_portfolios))
            )
            .service(
                web::resource("/import")
                    .route(web::post().to(profiles::import_profile))
            )
            .service(
                web::resource("/{profile_id}")
                    .route(web::get().to(profiles::get_profile))
                    .route(web::put().to(profiles::update_profile))
            )
            .service(
                web::resource("/{profile_id}/card")
                    .route(web::get().to(profiles::get_profile_card))
            )
            .service(
                web::resource("/{profile_id}/drafts")
                    .route(web::post().to(drafts::open_draft))
            )
    );
}
