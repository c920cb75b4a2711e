//! # ACADIFY authentication API
//!
//! Email/password registration and login for the ACADIFY front-end, backed by
//! a Postgres `users` table.
//!
//! - **Registration** hashes the password with Argon2id (fresh random salt,
//!   fixed default cost) and inserts the account. Duplicate emails surface as
//!   `409 Conflict` via the database uniqueness constraint.
//! - **Login** looks the account up by normalized email and verifies the
//!   password against the stored PHC hash. No session, token, or cookie is
//!   issued; the caller only receives the account body for the one response.
//! - Responses never include credential material.

pub mod acadify;
pub mod cli;
