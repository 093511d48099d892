pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Example Service API",
        description = "CRUD microservice for the example resource backed by MongoDB"
    ),
    paths(
        handlers::health::health_check,
        handlers::examples::create_example,
        handlers::examples::get_example,
        handlers::examples::list_examples,
        handlers::examples::update_example,
        handlers::examples::delete_example,
    ),
    components(schemas(
        dtos::CreateExampleRequest,
        dtos::UpdateExampleRequest,
        dtos::ExampleResponse,
        dtos::ErrorResponse,
    )),
    tags(
        (name = "Examples", description = "Example resource"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;
