pub mod devworkspaces;
pub mod health;

use crate::{api_docs, auth::auth_middleware, config::Config, state::AppState};
use axum::{middleware, Router};
use devworkspace_client::ClientFactory;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa_swagger_ui::SwaggerUi;

pub fn create_app(config: &Config, clients: Arc<dyn ClientFactory>) -> anyhow::Result<Router> {
    let config = config.clone().validate()?;
    let state = AppState::new(clients, &config.routing_class);

    // Allow CORS for the dashboard frontend served from another origin
    let cors = CorsLayer::permissive();

    let api = devworkspaces::routes().layer(middleware::from_fn(auth_middleware));
    let api = if config.base_api_path.is_empty() {
        api
    } else {
        Router::new().nest(&config.base_api_path, api)
    };

    let app = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api_docs::openapi(&config.base_api_path)),
        )
        .merge(health::routes()) // Health routes don't need auth
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
