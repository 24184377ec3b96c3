use actix_web::web;

use crate::handlers::home::home;

mod drafts;
mod json_error;
mod profiles;
mod system;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(system::config_routes)
            .configure(profiles::config_routes)
            .configure(drafts::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
