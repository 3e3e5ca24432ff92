//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::database::models::CreateUser;
use crate::errors::{ServiceError, ServiceResult, is_unique_violation};
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::{hash_password, verify_password};
use sqlx::SqlitePool;
use tracing::{debug, info};
use validator::Validate;

/// Authentication service for registration and login
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    jwt_utils: &'a JwtUtils,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, jwt_utils: &'a JwtUtils) -> Self {
        AuthService { pool, jwt_utils }
    }

    /// Registers a new user.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures (missing fields, malformed email)
    /// - An email that is already registered
    /// - Password hashing or database failures
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserInfo> {
        request
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let repo = UserRepository::new(self.pool);

        if repo.email_exists(&request.email).await? {
            return Err(ServiceError::already_exists("Email", &request.email));
        }

        let password_hash = hash_password(&request.password).await?;

        let user = repo
            .create_user(CreateUser {
                email: request.email.clone(),
                password_hash,
                name: request.name,
                company: request.company,
            })
            .await
            .map_err(|e| {
                // Lost a race with a concurrent registration for the same email.
                if is_unique_violation(&e) {
                    ServiceError::already_exists("Email", &request.email)
                } else {
                    ServiceError::from(e)
                }
            })?;

        info!(user_id = %user.id, "User registered");
        Ok(UserInfo::from(user))
    }

    /// Authenticates a user and issues an access token.
    ///
    /// Unknown emails and wrong passwords both yield
    /// `ServiceError::InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        request
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let repo = UserRepository::new(self.pool);

        let Some(user) = repo.get_user_by_email(&request.email).await? else {
            // Burn one bcrypt round so unknown emails cost the same as wrong passwords.
            let _ = hash_password(&request.password).await;
            debug!("Login rejected: unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(&request.password, &user.password_hash).await {
            debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.jwt_utils.generate_token(&user)?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            token,
            user: UserInfo::from(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: "A".to_string(),
            company: "Co".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let pool = test_pool().await;
        let jwt = JwtUtils::new("test-secret");
        let service = AuthService::new(&pool, &jwt);

        let info = service
            .register(register_request("a@x.com", "pw"))
            .await
            .unwrap();
        assert_eq!(info.email, "a@x.com");

        let stored = UserRepository::new(&pool)
            .get_user_by_email("a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "pw");
        assert!(verify_password("pw", &stored.password_hash).await);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let pool = test_pool().await;
        let jwt = JwtUtils::new("test-secret");
        let service = AuthService::new(&pool, &jwt);

        service
            .register(register_request("a@x.com", "pw"))
            .await
            .unwrap();
        let err = service
            .register(register_request("a@x.com", "other"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let pool = test_pool().await;
        let jwt = JwtUtils::new("test-secret");
        let service = AuthService::new(&pool, &jwt);

        let mut request = register_request("a@x.com", "pw");
        request.company = String::new();
        let err = service.register(request).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));

        let err = service
            .register(register_request("not-an-email", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));

        let err = service
            .register(register_request("a@x.com", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let pool = test_pool().await;
        let jwt = JwtUtils::new("test-secret");
        let service = AuthService::new(&pool, &jwt);

        let registered = service
            .register(register_request("a@x.com", "pw"))
            .await
            .unwrap();
        let response = service.login(login_request("a@x.com", "pw")).await.unwrap();

        assert_eq!(response.user, registered);
        let claims = jwt.validate_token(&response.token).unwrap();
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.id, registered.id);
        assert_eq!(claims.company, "Co");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let pool = test_pool().await;
        let jwt = JwtUtils::new("test-secret");
        let service = AuthService::new(&pool, &jwt);

        service
            .register(register_request("a@x.com", "pw"))
            .await
            .unwrap();

        let unknown = service
            .login(login_request("nobody@x.com", "pw"))
            .await
            .unwrap_err();
        let wrong = service
            .login(login_request("a@x.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, ServiceError::InvalidCredentials));
        assert!(matches!(wrong, ServiceError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_long_passwords_do_not_share_a_login() {
        let pool = test_pool().await;
        let jwt = JwtUtils::new("test-secret");
        let service = AuthService::new(&pool, &jwt);
        let prefix = "a".repeat(72);

        let err = service
            .register(register_request("long@x.com", &format!("{prefix}right")))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));

        service
            .register(register_request("a@x.com", &prefix))
            .await
            .unwrap();
        assert!(service.login(login_request("a@x.com", &prefix)).await.is_ok());

        for suffix in ["right", "WRONG"] {
            let err = service
                .login(login_request("a@x.com", &format!("{prefix}{suffix}")))
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::InvalidCredentials));
        }
    }
}
