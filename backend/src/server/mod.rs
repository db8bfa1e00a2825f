//! Server construction and route wiring.

mod config;
pub mod state_builders;

pub use config::{ConfigError, ServerConfig};

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::inbound::http::bookings::{
    create_booking, decide_booking, get_booking, list_owner_bookings, list_requester_bookings,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::items::{
    add_comment, create_item, delete_item, get_item, list_items, search_items, update_item,
};
use crate::inbound::http::requests::{
    create_request, get_request, list_other_requests, list_own_requests,
};
use crate::inbound::http::users::{create_user, delete_user, get_user, list_users, update_user};
use state_builders::build_http_state;

/// Register every route on the application.
///
/// Literal routes (`/items/search`, `/bookings/owner`, `/requests/all`) are
/// registered before their `/{id}` siblings so they are not captured as path
/// parameters.
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(update_user)
        .service(list_users)
        .service(get_user)
        .service(delete_user)
        .service(create_item)
        .service(update_item)
        .service(search_items)
        .service(list_items)
        .service(add_comment)
        .service(get_item)
        .service(delete_item)
        .service(create_booking)
        .service(decide_booking)
        .service(list_owner_bookings)
        .service(list_requester_bookings)
        .service(get_booking)
        .service(create_request)
        .service(list_own_requests)
        .service(list_other_requests)
        .service(get_request)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    cfg.route("/api-docs/openapi.json", web::get().to(openapi_json));
}

#[cfg(debug_assertions)]
async fn openapi_json() -> actix_web::HttpResponse {
    use utoipa::OpenApi;

    actix_web::HttpResponse::Ok().json(crate::doc::ApiDoc::openapi())
}

/// Bind the HTTP server and mark it ready to receive traffic.
pub fn build_server(config: &ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(build_http_state());
    let health = web::Data::new(HealthState::new());
    let server_health = health.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(server_health.clone())
            .configure(register_routes)
    })
    .bind(config.bind_addr())?
    .run();

    health.mark_ready();
    info!(addr = %config.bind_addr(), "server listening");
    Ok(server)
}
