use std::sync::Arc;

use anyhow::Context;
use storage::{Database, InMemoryCalculationStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use middleware::auth::ApiKeys;
use state::{AppState, SharedStore};

#[derive(OpenApi)]
#[openapi(
    paths(
        features::calculators::handlers::calculate_bmi,
        features::calculators::handlers::calculate_bmr,
        features::calculators::handlers::calculate_body_fat,
        features::calculators::handlers::calculate_body_shape,
        features::calculators::handlers::calculate_diabetes_risk,
        features::calculators::handlers::screen_glucose,
        features::calculations::handlers::list_calculations,
        features::profile::handlers::get_report,
        features::profile::handlers::clear_calculations,
    ),
    components(
        schemas(
            storage::dto::calculation::BmiRequest,
            storage::dto::calculation::BodyMetricsRequest,
            storage::dto::calculation::BodyShapeRequest,
            storage::dto::calculation::DiabetesRiskRequest,
            storage::dto::calculation::GlucoseRequest,
            storage::dto::calculation::NumericField,
            storage::dto::calculation::FlagField,
            storage::dto::calculation::CalculationResponse,
            storage::dto::common::PaginationMeta,
            storage::dto::report::ProfileReport,
            storage::dto::report::ReportEntry,
            storage::services::advice::AdviceSet,
            storage::models::CalculatorInput,
            storage::models::CalculatorKind,
            storage::models::MetricResult,
            storage::models::StoredCalculation,
            storage::models::Gender,
            storage::models::ActivityLevel,
            features::profile::handlers::ClearResponse,
        )
    ),
    tags(
        (name = "calculators", description = "Health calculators"),
        (name = "calculations", description = "Calculation history"),
        (name = "profile", description = "Profile report"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

async fn connect_store(config: &Config) -> anyhow::Result<SharedStore> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, keeping calculations in memory");
        return Ok(Arc::new(InMemoryCalculationStore::new()));
    };

    tracing::info!(
        "Connecting to database at: {}",
        database_url.split('@').next_back().unwrap_or("unknown")
    );
    let db = Database::new(database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(db))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting health calculators API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let store = connect_store(&config).await?;

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every API request will be rejected");
    } else {
        tracing::info!("Loaded {} API keys", api_keys.len());
    }

    let state = AppState::new(store, Arc::new(api_keys));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let bind_address = config.bind_address();
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
