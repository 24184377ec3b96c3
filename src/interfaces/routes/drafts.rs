use actix_web::web;

use crate::handlers::drafts;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/drafts")
            .service(
                web::resource("/{draft_id}")
                    .route(web::get().to(drafts::get_draft))
                    .route(web::delete().to(drafts::discard_draft))
            )
            .service(
                web::resource("/{draft_id}/commands")
                    .route(web::post().to(drafts::apply_command))
            )
            .service(
                web::resource("/{draft_id}/undo")
                    .route(web::post().to(drafts::undo_draft))
            )
            .service(
                web::resource("/{draft_id}/validate")
                    .route(web::post().to(drafts::validate_draft))
            )
            .service(
                web::resource("/{draft_id}/save")
                    .route(web::post().to(drafts::save_draft))
            )
    );
}
