//! Registration, login, and JWT issue/verify service.

use std::sync::Arc;

use chrono::Utc;
use hmac::{Hmac, Mac};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;

use crate::domain::entities::{NewUser, Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Bytes of random salt prepended to every password hash.
const SALT_LENGTH_BYTES: usize = 16;

/// Auth configuration extracted from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// HS256 signing secret for issued tokens.
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// Token lifetime in seconds.
    pub token_ttl_seconds: i64,
    /// Emails (lowercase) that register with the Admin role.
    pub admin_emails: Vec<String>,
}

/// The authenticated caller as seen by handlers.
///
/// This is all the rest of the service ever learns about a principal.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    role: String,
    iss: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Service for registering users, checking credentials, and minting tokens.
///
/// Passwords are hashed with per-user-salted HMAC-SHA256 before storage;
/// the raw password never leaves this service. Tokens are HS256 JWTs
/// carrying the user id and role; issuer, audience, and expiry are
/// validated on every request.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    settings: AuthSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(users: Arc<dyn UserRepository>, settings: AuthSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&settings.jwt_issuer]);
        validation.set_audience(&[&settings.jwt_audience]);

        Self {
            users,
            settings,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Registers a new user and returns a signed token.
    ///
    /// Emails are lowercased before storage. Emails on the configured
    /// admin allow-list register with the Admin role; everyone else is a
    /// plain User.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> Result<String, AppError> {
        let email = email.to_ascii_lowercase();

        let role = if self.settings.admin_emails.iter().any(|e| e == &email) {
            Role::Admin
        } else {
            Role::User
        };

        let new_user = NewUser {
            email: email.clone(),
            password_hash: hash_password(password)?,
            role,
        };

        let user = match self.users.create(new_user).await {
            Ok(user) => user,
            Err(AppError::Conflict { .. }) => {
                return Err(AppError::bad_request(
                    "Email is already registered",
                    json!({ "email": email }),
                ));
            }
            Err(e) => return Err(e),
        };

        self.issue_token(&user)
    }

    /// Checks credentials and returns a signed token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on unknown email or wrong password.
    /// The message deliberately does not say which.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let email = email.to_ascii_lowercase();

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::bad_request("Invalid credentials", json!({})))?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::bad_request("Invalid credentials", json!({})));
        }

        self.issue_token(&user)
    }

    /// Verifies a bearer token and extracts the caller identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on any signature, issuer,
    /// audience, expiry, or claim-shape failure.
    pub fn verify_token(&self, token: &str) -> Result<AuthUser, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token expired",
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => "Invalid issuer",
                jsonwebtoken::errors::ErrorKind::InvalidAudience => "Invalid audience",
                _ => "Invalid token",
            };
            AppError::unauthorized("Unauthorized", json!({ "reason": reason }))
        })?;

        let claims = data.claims;
        let user_id = claims.sub.parse::<i64>().map_err(|_| {
            AppError::unauthorized("Unauthorized", json!({ "reason": "Malformed subject claim" }))
        })?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
            is_admin: claims.role == Role::Admin.as_str(),
        })
    }

    /// Mints an HS256 token for `user`.
    fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            iss: self.settings.jwt_issuer.clone(),
            aud: self.settings.jwt_audience.clone(),
            iat: now,
            exp: now + self.settings.token_ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::internal("Failed to sign token", json!({})))
    }
}

/// Hashes a password as `hex(salt)$hex(hmac_sha256(salt, password))`.
fn hash_password(password: &str) -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LENGTH_BYTES];
    getrandom::fill(&mut salt)
        .map_err(|_| AppError::internal("Random source unavailable", json!({})))?;

    Ok(format!(
        "{}${}",
        hex::encode(salt),
        hex::encode(mac_bytes(&salt, password))
    ))
}

/// Constant-time verification against a stored `salt$mac` hash.
fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, mac_hex)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(mac_hex)) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(&salt).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

fn mac_bytes(salt: &[u8], password: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    fn settings() -> AuthSettings {
        AuthSettings {
            jwt_secret: "test-signing-secret".to_string(),
            jwt_issuer: "shortener-tests".to_string(),
            jwt_audience: "shortener-clients".to_string(),
            token_ttl_seconds: 3600,
            admin_emails: vec!["root@example.com".to_string()],
        }
    }

    fn make_user(id: i64, email: &str, password: &str, role: Role) -> User {
        User::new(
            id,
            email.to_string(),
            hash_password(password).unwrap(),
            role,
            Utc::now(),
        )
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("hunter22").unwrap();

        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn test_password_hashes_are_salted() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("hunter22", &first));
        assert!(verify_password("hunter22", &second));
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-valid-hash"));
        assert!(!verify_password("anything", "zzzz$zzzz"));
    }

    #[tokio::test]
    async fn test_register_assigns_user_role() {
        let mut mock = MockUserRepository::new();

        mock.expect_create()
            .withf(|new_user| new_user.email == "someone@example.com" && new_user.role == Role::User)
            .times(1)
            .returning(|new_user| {
                Ok(User::new(
                    1,
                    new_user.email,
                    new_user.password_hash,
                    new_user.role,
                    Utc::now(),
                ))
            });

        let service = AuthService::new(Arc::new(mock), settings());

        let token = service
            .register("Someone@Example.COM", "hunter22")
            .await
            .unwrap();

        let auth = service.verify_token(&token).unwrap();
        assert_eq!(auth.user_id, 1);
        assert_eq!(auth.email, "someone@example.com");
        assert!(!auth.is_admin);
    }

    #[tokio::test]
    async fn test_register_allow_listed_email_becomes_admin() {
        let mut mock = MockUserRepository::new();

        mock.expect_create()
            .withf(|new_user| new_user.role == Role::Admin)
            .times(1)
            .returning(|new_user| {
                Ok(User::new(
                    1,
                    new_user.email,
                    new_user.password_hash,
                    new_user.role,
                    Utc::now(),
                ))
            });

        let service = AuthService::new(Arc::new(mock), settings());

        let token = service.register("Root@example.com", "hunter22").await.unwrap();

        assert!(service.verify_token(&token).unwrap().is_admin);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_policy_violation() {
        let mut mock = MockUserRepository::new();

        mock.expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("email taken", json!({}))));

        let service = AuthService::new(Arc::new(mock), settings());

        let result = service.register("someone@example.com", "hunter22").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut mock = MockUserRepository::new();

        let user = make_user(5, "someone@example.com", "hunter22", Role::User);
        mock.expect_find_by_email()
            .withf(|email| email == "someone@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock), settings());

        let token = service
            .login("Someone@example.com", "hunter22")
            .await
            .unwrap();

        let auth = service.verify_token(&token).unwrap();
        assert_eq!(auth.user_id, 5);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut mock = MockUserRepository::new();

        let user = make_user(5, "someone@example.com", "hunter22", Role::User);
        mock.expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock), settings());

        let result = service.login("someone@example.com", "wrong").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut mock = MockUserRepository::new();

        mock.expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock), settings());

        let result = service.login("nobody@example.com", "hunter22").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[test]
    fn test_verify_token_rejects_tampering() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), settings());

        let user = make_user(5, "someone@example.com", "hunter22", Role::User);
        let token = service.issue_token(&user).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(service.verify_token(&tampered).is_err());
    }

    #[test]
    fn test_verify_token_rejects_foreign_secret() {
        let issuer = AuthService::new(Arc::new(MockUserRepository::new()), settings());

        let mut other_settings = settings();
        other_settings.jwt_secret = "a-different-secret".to_string();
        let verifier = AuthService::new(Arc::new(MockUserRepository::new()), other_settings);

        let user = make_user(5, "someone@example.com", "hunter22", Role::User);
        let token = issuer.issue_token(&user).unwrap();

        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_verify_token_rejects_expired() {
        let mut expired_settings = settings();
        // Issue tokens that died two hours ago, beyond any validation leeway.
        expired_settings.token_ttl_seconds = -7200;
        let service = AuthService::new(Arc::new(MockUserRepository::new()), expired_settings);

        let user = make_user(5, "someone@example.com", "hunter22", Role::User);
        let token = service.issue_token(&user).unwrap();

        let err = service.verify_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_verify_token_rejects_wrong_audience() {
        let issuer = AuthService::new(Arc::new(MockUserRepository::new()), settings());

        let mut other_settings = settings();
        other_settings.jwt_audience = "someone-else".to_string();
        let verifier = AuthService::new(Arc::new(MockUserRepository::new()), other_settings);

        let user = make_user(5, "someone@example.com", "hunter22", Role::User);
        let token = issuer.issue_token(&user).unwrap();

        assert!(verifier.verify_token(&token).is_err());
    }
}
