use crate::acadify::GIT_COMMIT_HASH;
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use sqlx::{Connection, PgPool};
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    database: String,
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Service and database are healthy", body = [Health]),
        (status = 503, description = "Database is unreachable", body = [Health])
    ),
    tag= "health"
)]
// axum handler for health
pub async fn health(pool: Extension<PgPool>) -> impl IntoResponse {
    let db_ok = match pool.0.acquire().await {
        Ok(mut conn) => match conn.ping().await {
            Ok(()) => true,
            Err(error) => {
                error!("Failed to ping database: {}", error);

                false
            }
        },

        Err(error) => {
            error!("Failed to acquire database connection: {}", error);

            false
        }
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if db_ok { "ok" } else { "error" }.to_string(),
    };

    let short_hash = if health.commit.len() > 7 {
        &health.commit[0..7]
    } else {
        ""
    };

    let mut headers = HeaderMap::new();
    match format!("{}:{}:{}", health.name, health.version, short_hash).parse() {
        Ok(x_app) => {
            debug!("X-App header: {:?}", x_app);

            headers.insert("X-App", x_app);
        }
        Err(err) => {
            error!("Failed to parse X-App header: {}", err);
        }
    }

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, headers, Json(health))
}
