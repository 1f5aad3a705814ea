//! Constraint-name matching for Postgres unique violations.

/// Unique constraint on `short_links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "short_links_short_code_key";

/// Unique constraint on `short_links.original_url`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "short_links_original_url_key";

/// Unique constraint on `users.email`.
pub const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Returns true if `e` is a unique violation on the named constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}
