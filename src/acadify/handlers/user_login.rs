use crate::acadify::{
    handlers::{normalize_email, valid_email, AuthResponse, UserBody},
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
pub struct UserLogin {
    email: String,
    #[schema(value_type = String)]
    password: SecretString,
}

struct AccountRow {
    id: Uuid,
    full_name: String,
    email: String,
    password_hash: String,
}

#[utoipa::path(
    post,
    path= "/api/login",
    request_body = UserLogin,
    responses (
        (status = 200, description = "Login successful", body = [AuthResponse], content_type = "application/json"),
        (status = 400, description = "Missing or malformed fields", body = [AuthResponse]),
        (status = 401, description = "Unknown email or wrong password", body = [AuthResponse]),
        (status = 500, description = "Login failed", body = [AuthResponse]),
    ),
    tag= "login"
)]
// axum handler for login
#[instrument]
pub async fn login(
    pool: Extension<PgPool>,
    payload: Option<Json<UserLogin>>,
) -> impl IntoResponse {
    let user: UserLogin = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AuthResponse::failure("Missing payload")),
            );
        }
    };

    debug!("user: {:?}", user);

    let email = normalize_email(&user.email);
    if !valid_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure("Invalid email")),
        );
    }

    let account = match find_account(&pool, &email).await {
        Ok(Some(account)) => account,

        // unknown email and wrong password differ only by message text, the
        // status code is the same for both
        Ok(None) => {
            debug!("Account not found");

            return (
                StatusCode::UNAUTHORIZED,
                Json(AuthResponse::failure("Email not found")),
            );
        }

        Err(e) => {
            error!("Error getting account from database: {:?}", e);

            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthResponse::failure("Login failed")),
            );
        }
    };

    match password::verify(user.password.expose_secret(), &account.password_hash) {
        Ok(true) => {
            debug!("Login successful");

            (
                StatusCode::OK,
                Json(AuthResponse::user(UserBody {
                    id: account.id,
                    full_name: account.full_name,
                    email: account.email,
                })),
            )
        }

        Ok(false) => {
            debug!("Unauthorized");

            (
                StatusCode::UNAUTHORIZED,
                Json(AuthResponse::failure("Invalid password")),
            )
        }

        Err(e) => {
            error!("Error verifying password: {:?}", e);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AuthResponse::failure("Login failed")),
            )
        }
    }
}

async fn find_account(pool: &PgPool, email: &str) -> Result<Option<AccountRow>, sqlx::Error> {
    let query = "SELECT id, full_name, email, password FROM users WHERE email = $1";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );

    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.map(|row| AccountRow {
        id: row.get("id"),
        full_name: row.get("full_name"),
        email: row.get("email"),
        password_hash: row.get("password"),
    }))
}
