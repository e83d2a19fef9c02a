//! Google OAuth 2.0 authorization-code flow.

use anyhow::{Context, anyhow};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::GoogleAuthConfig;

/// The userinfo fields we rely on. `sub` is Google's stable account id.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub sub: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct GoogleClient<'a> {
    http: &'a Client,
    config: &'a GoogleAuthConfig,
}

impl<'a> GoogleClient<'a> {
    pub fn new(http: &'a Client, config: &'a GoogleAuthConfig) -> Self {
        Self { http, config }
    }

    fn client_id(&self) -> anyhow::Result<&str> {
        self.config.client_id.as_deref().context("Google client_id is not configured")
    }

    fn redirect_uri(&self) -> anyhow::Result<&Url> {
        self.config.redirect_uri.as_ref().context("Google redirect_uri is not configured")
    }

    /// Where to send the browser to start the login.
    pub fn authorization_url(&self, state: &str) -> anyhow::Result<Url> {
        let mut url = self.config.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", self.client_id()?)
            .append_pair("redirect_uri", self.redirect_uri()?.as_str())
            .append_pair("response_type", "code")
            .append_pair("scope", "openid email profile")
            .append_pair("access_type", "offline")
            .append_pair("prompt", "select_account")
            .append_pair("state", state);
        Ok(url)
    }

    /// Trade the authorization code for an access token.
    #[instrument(skip_all, err)]
    pub async fn exchange_code(&self, code: &str) -> anyhow::Result<String> {
        let client_secret = self.config.client_secret.as_deref().context("Google client_secret is not configured")?;
        let params = [
            ("code", code),
            ("client_id", self.client_id()?),
            ("client_secret", client_secret),
            ("redirect_uri", self.redirect_uri()?.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self.http.post(self.config.token_url.clone()).form(&params).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Google token endpoint returned {status}: {body}"));
        }

        let token: TokenResponse = response.json().await.context("decode Google token response")?;
        debug!("Exchanged Google authorization code");
        Ok(token.access_token)
    }

    #[instrument(skip_all, err)]
    pub async fn fetch_userinfo(&self, access_token: &str) -> anyhow::Result<GoogleUserInfo> {
        let response = self
            .http
            .get(self.config.userinfo_url.clone())
            .bearer_auth(access_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(anyhow!("Google userinfo endpoint returned {}", response.status()));
        }

        response.json().await.context("decode Google userinfo response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, header, method, path},
    };

    fn http_client() -> Client {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
        Client::new()
    }

    fn google_config(server_uri: &str) -> GoogleAuthConfig {
        GoogleAuthConfig {
            enabled: true,
            client_id: Some("client-123".to_string()),
            client_secret: Some("shh".to_string()),
            redirect_uri: Some(Url::parse("http://localhost:5000/api/users/google/callback").unwrap()),
            token_url: Url::parse(&format!("{server_uri}/token")).unwrap(),
            userinfo_url: Url::parse(&format!("{server_uri}/userinfo")).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_authorization_url() {
        let http = http_client();
        let config = google_config("http://unused");
        let client = GoogleClient::new(&http, &config);

        let url = client.authorization_url("nonce").unwrap();
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert!(url.as_str().starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert_eq!(pairs["client_id"], "client-123");
        assert_eq!(pairs["scope"], "openid email profile");
        assert_eq!(pairs["access_type"], "offline");
        assert_eq!(pairs["prompt"], "select_account");
        assert_eq!(pairs["state"], "nonce");
        assert_eq!(pairs["redirect_uri"], "http://localhost:5000/api/users/google/callback");
    }

    #[tokio::test]
    async fn test_exchange_and_userinfo() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("code=auth-code"))
            .and(body_string_contains("grant_type=authorization_code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "google-access",
                "token_type": "Bearer",
                "expires_in": 3599
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header("authorization", "Bearer google-access"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sub": "1089",
                "email": "brewer@gmail.com",
                "name": "Brewer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let http = http_client();
        let config = google_config(&server.uri());
        let client = GoogleClient::new(&http, &config);

        let token = client.exchange_code("auth-code").await.unwrap();
        assert_eq!(token, "google-access");

        let info = client.fetch_userinfo(&token).await.unwrap();
        assert_eq!(info.sub.as_deref(), Some("1089"));
        assert_eq!(info.email.as_deref(), Some("brewer@gmail.com"));
    }

    #[tokio::test]
    async fn test_exchange_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "invalid_grant"})))
            .mount(&server)
            .await;

        let http = http_client();
        let config = google_config(&server.uri());
        let client = GoogleClient::new(&http, &config);

        assert!(client.exchange_code("bad").await.is_err());
    }
}
