use crate::acadify::{
    handlers::{is_unique_violation, normalize_email, valid_email, AuthResponse, UserBody},
    password,
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::{PgPool, Row};
use tracing::{debug, error, info_span, instrument, Instrument};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema, Deserialize, Debug)]
pub struct UserRegister {
    full_name: String,
    email: String,
    // SecretString keeps the plaintext out of Debug/tracing output
    #[schema(value_type = String)]
    password: SecretString,
}

#[utoipa::path(
    post,
    path= "/api/register",
    request_body = UserRegister,
    responses (
        (status = 201, description = "Registration successful", body = [AuthResponse], content_type = "application/json"),
        (status = 400, description = "Missing or malformed fields", body = [AuthResponse]),
        (status = 409, description = "An account with the email already exists", body = [AuthResponse]),
        (status = 500, description = "Registration failed", body = [AuthResponse]),
    ),
    tag= "register"
)]
// axum handler for register
#[instrument]
pub async fn register(
    pool: Extension<PgPool>,
    payload: Option<Json<UserRegister>>,
) -> impl IntoResponse {
    let user: UserRegister = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthResponse::failure("Missing payload")),
            );
        }
    };

    debug!("user: {:?}", user);

    let full_name = user.full_name.trim().to_string();
    if full_name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure("Missing full name")),
        );
    }

    let email = normalize_email(&user.email);
    if !valid_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure("Invalid email")),
        );
    }

    if user.password.expose_secret().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure("Missing password")),
        );
    }

    let password_hash = match password::hash(user.password.expose_secret()) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Error hashing password: {:?}", e);

            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthResponse::failure("Registration failed")),
            );
        }
    };

    // insert user into database, the uniqueness constraint on email decides
    // who wins concurrent registrations
    match insert_user(&pool, &full_name, &email, &password_hash).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(AuthResponse::user(UserBody {
                id,
                full_name,
                email,
            })),
        ),

        Err(err) if is_unique_violation(&err) => (
            StatusCode::CONFLICT,
            Json(AuthResponse::failure("Email already registered")),
        ),

        Err(err) => {
            error!("Error inserting user: {:?}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthResponse::failure("Registration failed")),
            )
        }
    }
}

async fn insert_user(
    pool: &PgPool,
    full_name: &str,
    email: &str,
    password_hash: &str,
) -> Result<Uuid, sqlx::Error> {
    let query = "INSERT INTO users (full_name, email, password) VALUES ($1, $2, $3) RETURNING id";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );

    let row = sqlx::query(query)
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(row.get("id"))
}
