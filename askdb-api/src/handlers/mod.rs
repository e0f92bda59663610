use actix_web::web;

pub mod ask;
pub mod pages;

/// Register every route on an app or scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::index)
        .service(pages::health)
        .service(ask::ask);
}
