//! HTTP implementation of the auth gateway.
//!
//! Exchanges credentials (or a Google ID token) for a bearer token. The
//! gateway only performs the exchange; installing the session into the
//! shared handle and persisting it is the session usecase's job.

use async_trait::async_trait;
use reqwest::Method;
use scribe_core::Result;
use scribe_core::auth::{AuthGateway, AuthSession, RegisteredUser};
use serde::{Deserialize, Serialize};

use crate::connection::{ApiConnection, read_json};

/// Auth endpoints over the shared connection.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    connection: ApiConnection,
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct GoogleLoginRequest<'a> {
    id_token: &'a str,
}

/// `token_type` also comes back but is always "bearer"; not decoded.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user_id: String,
}

impl From<TokenResponse> for AuthSession {
    fn from(token: TokenResponse) -> Self {
        Self {
            access_token: token.access_token,
            user_id: token.user_id,
        }
    }
}

impl HttpAuthGateway {
    pub fn new(connection: ApiConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let request = self
            .connection
            .request(Method::POST, "/login")
            .await
            .json(&CredentialsRequest { username, password });
        let response = self.connection.send(request).await?;
        let token: TokenResponse = read_json(response).await?;
        tracing::info!(target: "scribe::session", user_id = %token.user_id, "logged in");
        Ok(token.into())
    }

    async fn register(&self, username: &str, password: &str) -> Result<RegisteredUser> {
        let request = self
            .connection
            .request(Method::POST, "/register")
            .await
            .json(&CredentialsRequest { username, password });
        let response = self.connection.send(request).await?;
        read_json(response).await
    }

    async fn login_with_google(&self, id_token: &str) -> Result<AuthSession> {
        let request = self
            .connection
            .request(Method::POST, "/auth/google")
            .await
            .json(&GoogleLoginRequest { id_token });
        let response = self.connection.send(request).await?;
        let token: TokenResponse = read_json(response).await?;
        tracing::info!(target: "scribe::session", user_id = %token.user_id, "logged in with Google");
        Ok(token.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::ScribeError;
    use scribe_core::auth::SessionHandle;
    use scribe_core::config::ClientConfig;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn connection(base_url: &str) -> ApiConnection {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 5,
        };
        ApiConnection::new(&config, SessionHandle::new()).unwrap()
    }

    #[tokio::test]
    async fn test_login_exchanges_credentials_for_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(serde_json::json!({
                "username": "maya",
                "password": "hunter2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-abc",
                "token_type": "bearer",
                "user_id": "user-7"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpAuthGateway::new(connection(&server.uri()));
        let session = gateway.login("maya", "hunter2").await.unwrap();
        assert_eq!(session.access_token, "tok-abc");
        assert_eq!(session.user_id, "user-7");
    }

    #[tokio::test]
    async fn test_login_bad_credentials_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "detail": "Incorrect username or password"
            })))
            .mount(&server)
            .await;

        let gateway = HttpAuthGateway::new(connection(&server.uri()));
        let err = gateway.login("maya", "wrong").await.unwrap_err();
        assert!(err.is_auth());
        assert!(matches!(
            err,
            ScribeError::Api { ref message, .. } if message == "Incorrect username or password"
        ));
    }

    #[tokio::test]
    async fn test_register_returns_account_without_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "user-8",
                "username": "maya",
                "created_at": "2025-06-01T12:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpAuthGateway::new(connection(&server.uri()));
        let user = gateway.register("maya", "hunter2").await.unwrap();
        assert_eq!(user.id, "user-8");
        assert_eq!(user.username, "maya");
    }

    #[tokio::test]
    async fn test_google_login_sends_id_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/google"))
            .and(body_json(serde_json::json!({ "id_token": "google-jwt" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-g",
                "user_id": "user-g"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpAuthGateway::new(connection(&server.uri()));
        let session = gateway.login_with_google("google-jwt").await.unwrap();
        assert_eq!(session.access_token, "tok-g");
    }
}
