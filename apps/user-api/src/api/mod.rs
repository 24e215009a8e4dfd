use axum::Router;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Domain routers have their state already applied, so this returns a
/// stateless Router.
pub fn routes(state: &crate::state::AppState) -> Router {
    let repository = domain_users::PgUserRepository::new(state.db.clone());
    let service = domain_users::UserService::new(repository);

    Router::new().nest("/v1/users", domain_users::handlers::router(service))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`. The /ready endpoint checks the database
/// connection.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
