use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipes API",
        description = "Read-only recipe catalogue: paginated listing, lookup by id, and search by title, cuisine, calories, total time and rating.",
        version = "1.0.0"
    ),
    tags(
        (name = "recipes", description = "Recipe listing, lookup and search")
    )
)]
pub struct ApiDoc;
