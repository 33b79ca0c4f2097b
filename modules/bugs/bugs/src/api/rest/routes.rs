//! REST route definitions.
//!
//! Public routes: `POST /auth/signup`, `POST /auth/signin`.
//! Everything else sits behind the bearer-token middleware.

use axum::Router;
use axum::routing::{delete, get, post};
use axum::{Extension, middleware};

use crate::api::rest::auth::require_token;
use crate::api::rest::handlers;
use crate::module::ConcreteAppServices;

pub fn register_routes(router: Router, services: ConcreteAppServices) -> Router {
    let public = Router::new()
        .route("/auth/signup", post(handlers::auth::sign_up))
        .route("/auth/signin", post(handlers::auth::sign_in));

    let protected = Router::new()
        .route("/auth/signout", post(handlers::auth::sign_out))
        .route(
            "/bugs",
            get(handlers::bugs::list_bugs).post(handlers::bugs::create_bug),
        )
        .route(
            "/bugs/{id}",
            get(handlers::bugs::get_bug)
                .patch(handlers::bugs::update_bug)
                .delete(handlers::bugs::delete_bug),
        )
        .route("/comments", post(handlers::comments::create_comment))
        .route("/comments/{id}", delete(handlers::comments::delete_comment))
        .route_layer(middleware::from_fn_with_state(
            services.clone(),
            require_token,
        ));

    router
        .merge(public)
        .merge(protected)
        .layer(Extension(services))
}
