use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::db::{FavoriteCity, WeatherQueryRecord};
use crate::error::ErrorResponse;
use crate::favorites::models::{AddFavoriteRequest, FavoritesResponse};
use crate::history::models::HistoryResponse;
use crate::users::models::{RegisterRequest, RegisteredUser, UserProfile};
use crate::weather::codes::Icon;
use crate::weather::models::{CurrentConditions, ForecastDay, WeatherResult};

/// OpenAPI documentation for the Pogoda API
///
/// Schemas only; handlers are not annotated with paths.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pogoda API",
        version = "0.1.0",
        description = "City weather lookups backed by Open-Meteo, with per-user favorites and lookup history.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    tags(
        (name = "weather", description = "Current conditions and five day forecast"),
        (name = "users", description = "Registration and API tokens"),
        (name = "favorites", description = "Saved cities"),
        (name = "history", description = "Past lookups")
    ),
    components(
        schemas(
            ErrorResponse,
            Icon,
            CurrentConditions,
            ForecastDay,
            WeatherResult,
            RegisterRequest,
            RegisteredUser,
            UserProfile,
            FavoriteCity,
            AddFavoriteRequest,
            FavoritesResponse,
            WeatherQueryRecord,
            HistoryResponse,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
