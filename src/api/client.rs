//! Anixart REST API client.
//!
//! Every authenticated call passes the profile token as a `token` query
//! parameter. Responses are JSON envelopes carrying a `code`; any non-zero
//! code is an error.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use super::session::Session;
use crate::config::ClientConfig;
use crate::error::{Result, WrappedError};
use crate::models::{
    BookmarkKind, Collection, HistoryItem, Page, Profile, Release, SortOrder, Vote,
};

/// Token block of a sign-in response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileToken {
    #[serde(default)]
    pub id: i64,
    pub token: String,
}

/// Successful sign-in response.
#[derive(Debug, Clone, Deserialize)]
pub struct SignIn {
    pub profile: Profile,
    #[serde(rename = "profileToken")]
    pub profile_token: ProfileToken,
}

/// Anixart API client.
///
/// # Example
///
/// ```rust,no_run
/// use anixart_wrapped::{AnixartApi, ClientConfig, Session};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut api = AnixartApi::new(ClientConfig::default(), Session::default())?;
///     api.sign_in("login", "password").await?;
///     let profile = api.get_profile(None).await?;
///     println!("{} watched {} episodes", profile.login, profile.watched_episode_count);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AnixartApi {
    client: Client,
    config: ClientConfig,
    session: Session,
}

impl AnixartApi {
    /// Create a client with the given settings and stored session.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Entries per page for listings.
    pub fn page_size(&self) -> u64 {
        self.config.page_size
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    fn token(&self) -> Result<&str> {
        self.session.token().ok_or(WrappedError::MissingToken)
    }

    /// Make an authenticated GET request and check the envelope.
    async fn get_api(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let token = self.token()?;
        let url = self.url(endpoint);
        debug!("GET {} with params: {:?}", endpoint, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("token", token)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Anixart API returned HTTP {} for {}", status, endpoint);
            return Err(WrappedError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let data: Value = response.json().await?;
        check_envelope(endpoint, &data)?;
        Ok(data)
    }

    /// Sign in with login and password.
    ///
    /// On success the token and profile id are stored in the session.
    ///
    /// # Errors
    ///
    /// Returns `BadCredentials` if the API rejects the credentials.
    pub async fn sign_in(&mut self, login: &str, password: &str) -> Result<SignIn> {
        let endpoint = "auth/signIn";
        let response = self
            .client
            .post(self.url(endpoint))
            .form(&[("login", login), ("password", password)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Sign-in failed with HTTP {}", status);
            return Err(WrappedError::BadCredentials(format!("HTTP {}", status)));
        }

        let data: Value = response.json().await?;
        let code = envelope_code(&data);
        if code != 0 {
            return Err(WrappedError::BadCredentials(format!(
                "sign-in rejected with code {}",
                code
            )));
        }

        let sign_in: SignIn = serde_json::from_value(data)?;
        self.session
            .set_token(Some(sign_in.profile_token.token.clone()));
        self.session.set_profile_id(Some(sign_in.profile.id));

        info!(
            "Signed in as {} (profile {})",
            sign_in.profile.login, sign_in.profile.id
        );

        Ok(sign_in)
    }

    /// Forget the token and profile id.
    pub fn sign_out(&mut self) {
        self.session.set_token(None);
    }

    /// Get a profile. Defaults to the signed-in profile.
    pub async fn get_profile(&self, profile_id: Option<i64>) -> Result<Profile> {
        self.token()?;
        let id = profile_id
            .or_else(|| self.session.profile_id())
            .ok_or(WrappedError::MissingProfileId)?;

        let data = self.get_api(&format!("profile/{}", id), &[]).await?;
        field(data, "profile")
    }

    /// Get one page of the signed-in user's watch history.
    pub async fn get_history(&self, page: u64) -> Result<Page<HistoryItem>> {
        let data = self.get_api(&format!("history/{}", page), &[]).await?;
        parse(data)
    }

    /// Get one page of a profile's rated releases.
    pub async fn get_votes(
        &self,
        profile_id: i64,
        page: u64,
        sort: SortOrder,
    ) -> Result<Page<Vote>> {
        let data = self
            .get_api(
                &format!("profile/vote/release/voted/{}/{}", profile_id, page),
                &[("sort", sort.code().to_string())],
            )
            .await?;
        parse(data)
    }

    /// Get a release with extended details.
    pub async fn get_release(&self, id: i64) -> Result<Release> {
        let data = self
            .get_api(
                &format!("release/{}", id),
                &[("extended_mode", "true".to_string())],
            )
            .await?;
        field_or_self(data, "release")
    }

    /// Get a random release.
    pub async fn get_random_release(&self) -> Result<Release> {
        let data = self.get_api("release/random", &[]).await?;
        field_or_self(data, "release")
    }

    /// Get one page of a profile's collections.
    pub async fn get_collections(&self, profile_id: i64, page: u64) -> Result<Page<Collection>> {
        let data = self
            .get_api(
                &format!("collection/all/profile/{}/{}", profile_id, page),
                &[],
            )
            .await?;
        parse(data)
    }

    /// Get a collection by ID.
    pub async fn get_collection(&self, id: i64) -> Result<Collection> {
        let data = self.get_api(&format!("collection/{}", id), &[]).await?;
        field_or_self(data, "collection")
    }

    /// Get one page of a collection's releases.
    ///
    /// A response without a release list is an empty page.
    pub async fn get_collection_releases(&self, id: i64, page: u64) -> Result<Page<Release>> {
        let data = self
            .get_api(&format!("collection/{}/releases/{}", id, page), &[])
            .await?;
        page_or_empty(data)
    }

    /// Get one page of the signed-in user's favorites.
    pub async fn get_favorites(&self, page: u64, sort: SortOrder) -> Result<Page<Release>> {
        let data = self
            .get_api(
                &format!("favorite/all/{}", page),
                &[
                    ("sort", sort.code().to_string()),
                    ("filter_announce", "0".to_string()),
                ],
            )
            .await?;
        parse(data)
    }

    /// Get one page of a profile's bookmark list.
    pub async fn get_bookmarks(
        &self,
        profile_id: i64,
        kind: BookmarkKind,
        page: u64,
        sort: SortOrder,
    ) -> Result<Page<Release>> {
        let data = self
            .get_api(
                &format!("profile/list/all/{}/{}/{}", profile_id, kind.code(), page),
                &[
                    ("sort", sort.code().to_string()),
                    ("filter_announce", "0".to_string()),
                ],
            )
            .await?;
        parse(data)
    }
}

/// Envelope code; a missing code counts as success.
fn envelope_code(data: &Value) -> i64 {
    data.get("code").and_then(|c| c.as_i64()).unwrap_or(0)
}

/// Fail on a non-zero envelope code.
fn check_envelope(endpoint: &str, data: &Value) -> Result<()> {
    let code = envelope_code(data);
    if code != 0 {
        error!("Anixart API error on {}: code {}", endpoint, code);
        return Err(WrappedError::ApiError {
            endpoint: endpoint.to_string(),
            code,
        });
    }
    Ok(())
}

fn parse<T: DeserializeOwned>(data: Value) -> Result<T> {
    Ok(serde_json::from_value(data)?)
}

/// Deserialize a required nested field.
fn field<T: DeserializeOwned>(mut data: Value, key: &str) -> Result<T> {
    match data.get_mut(key).map(Value::take) {
        Some(value) if !value.is_null() => parse(value),
        _ => Err(WrappedError::NoDataApi(format!("missing `{}`", key))),
    }
}

/// Deserialize a nested field, or the whole body when it is absent.
fn field_or_self<T: DeserializeOwned>(mut data: Value, key: &str) -> Result<T> {
    match data.get_mut(key).map(Value::take) {
        Some(value) if !value.is_null() => parse(value),
        _ => parse(data),
    }
}

/// Deserialize a page, or an empty page when the body has no release list.
fn page_or_empty<T: DeserializeOwned>(data: Value) -> Result<Page<T>> {
    if data.get("content").is_none() && data.get("items").is_none() {
        return Ok(Page::default());
    }
    parse(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_envelope() {
        assert!(check_envelope("history/0", &json!({ "code": 0 })).is_ok());
        assert!(check_envelope("history/0", &json!({ "items": [] })).is_ok());

        let err = check_envelope("history/0", &json!({ "code": 2 })).unwrap_err();
        match err {
            WrappedError::ApiError { endpoint, code } => {
                assert_eq!(endpoint, "history/0");
                assert_eq!(code, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_field_or_self() {
        let release: Release =
            field_or_self(json!({ "code": 0, "release": { "id": 3, "title_ru": "A" } }), "release")
                .unwrap();
        assert_eq!(release.id, 3);

        let release: Release =
            field_or_self(json!({ "code": 0, "id": 4, "title_ru": "B" }), "release").unwrap();
        assert_eq!(release.id, 4);
    }

    #[test]
    fn test_page_or_empty() {
        let page: Page<Release> = page_or_empty(json!({ "code": 0 })).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_count, 0);

        let page: Page<Release> = page_or_empty(json!({
            "code": 0,
            "content": [{ "id": 1, "title_ru": "A" }],
            "total_count": 30
        }))
        .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_count, 30);

        let page: Page<Release> =
            page_or_empty(json!({ "items": [{ "id": 2 }], "total": 1 })).unwrap();
        assert_eq!(page.content[0].id, 2);
    }

    #[test]
    fn test_field_required() {
        let err = field::<Profile>(json!({ "code": 0 }), "profile").unwrap_err();
        assert!(matches!(err, WrappedError::NoDataApi(_)));
    }

    #[test]
    fn test_sign_in_shape() {
        let sign_in: SignIn = serde_json::from_value(json!({
            "code": 0,
            "profile": { "id": 11, "login": "neko" },
            "profileToken": { "id": 1, "token": "abc" }
        }))
        .unwrap();
        assert_eq!(sign_in.profile.id, 11);
        assert_eq!(sign_in.profile_token.token, "abc");
    }

    #[test]
    fn test_url_joining() {
        let config = ClientConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        };
        let api = AnixartApi::new(config, Session::default()).unwrap();
        assert_eq!(api.url("history/0"), "http://localhost:9000/history/0");
    }

    #[tokio::test]
    async fn test_calls_without_token_fail_fast() {
        let api = AnixartApi::new(ClientConfig::default(), Session::default()).unwrap();
        assert!(matches!(
            api.get_history(0).await,
            Err(WrappedError::MissingToken)
        ));
        assert!(matches!(
            api.get_profile(None).await,
            Err(WrappedError::MissingToken)
        ));
        assert!(matches!(
            api.get_random_release().await,
            Err(WrappedError::MissingToken)
        ));
        assert!(matches!(
            api.get_collection(1).await,
            Err(WrappedError::MissingToken)
        ));
        assert!(matches!(
            api.get_collection_releases(1, 0).await,
            Err(WrappedError::MissingToken)
        ));
    }

    #[tokio::test]
    async fn test_profile_needs_an_id() {
        let mut session = Session::default();
        session.set_token(Some("tok".to_string()));
        let api = AnixartApi::new(ClientConfig::default(), session).unwrap();
        assert!(matches!(
            api.get_profile(None).await,
            Err(WrappedError::MissingProfileId)
        ));
    }
}
