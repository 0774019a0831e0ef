mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware::map_response,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::node::{Commander, Private, Sergeant, Squad};

pub fn private_router(private: Arc<Private>) -> Router {
    let api = Router::new()
        .route("/private", get(handlers::private::info))
        .route(
            "/private/order",
            get(handlers::private::get_orders).put(handlers::private::put_orders),
        )
        .route(
            "/private/job/report",
            get(handlers::private::get_report).put(handlers::private::put_report),
        )
        .with_state(private);

    finish(api)
}

pub fn sergeant_router(sergeant: Arc<Sergeant>) -> Router {
    let soldiers = Router::new()
        .route("/pvt/join", post(handlers::join_child))
        .route("/pvt/list", get(handlers::list_children))
        .route("/pvt/{id}", delete(handlers::remove_child))
        .route("/pvt/{id}/info", get(handlers::child_info))
        .route("/pvt/{id}/work", post(handlers::submit_work))
        .with_state(sergeant.soldiers().clone());

    let api = Router::new()
        .route("/info", get(handlers::sergeant::info))
        .route(
            "/sgt/job/report",
            get(handlers::sergeant::get_report).put(handlers::sergeant::put_report),
        )
        .route(
            "/sgt/job/command",
            get(handlers::sergeant::get_commands).put(handlers::sergeant::put_commands),
        )
        .route("/dev/cache", get(handlers::sergeant::work_cache))
        .with_state(sergeant)
        .merge(soldiers);

    finish(api)
}

pub fn commander_router(commander: Arc<Commander>) -> Router {
    let subordinates = squad_routes("/commander/subordinates", commander.subordinates().clone());
    let soldiers = squad_routes("/commander/soldiers", commander.soldiers().clone());

    let api = Router::new()
        .route("/commander", get(handlers::commander::info))
        .route("/commander/campaigns", get(handlers::commander::campaigns))
        .route(
            "/commander/job/report",
            get(handlers::commander::get_report).put(handlers::commander::put_report),
        )
        .route(
            "/commander/job/command",
            get(handlers::commander::get_commands).put(handlers::commander::put_commands),
        )
        .route("/commander/dev/cache", get(handlers::commander::work_cache))
        .with_state(commander)
        .merge(subordinates)
        .merge(soldiers);

    finish(api)
}

/// Collection-style squad routes under `base`.
fn squad_routes(base: &str, squad: Squad) -> Router {
    Router::new()
        .route(base, get(handlers::list_children).post(handlers::join_child))
        .route(
            &format!("{}/{{id}}", base),
            get(handlers::child_info).delete(handlers::remove_child),
        )
        .route(&format!("{}/{{id}}/work", base), post(handlers::submit_work))
        .with_state(squad)
}

fn finish(api: Router) -> Router {
    api.fallback(middleware::no_route)
        .layer(map_response(middleware::envelope_rejections))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
