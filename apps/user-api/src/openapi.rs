use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "User API",
        version = "0.1.0",
        description = "CRUD API for user records with derived age"
    ),
    servers((url = "/api", description = "API base path")),
    nest(
        (path = "/v1/users", api = domain_users::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
