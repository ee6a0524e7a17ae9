//! The Spotify HTTP caller and its one-shot token refresh cycle.
//!
//! Spotify user tokens expire after an hour. Rather than tracking expiry,
//! the client reacts: when a user-token request comes back 401 it exchanges
//! the configured refresh token for a new access token and reissues the
//! original request exactly once. A second 401 after a fresh token is
//! surfaced as-is; nothing retries further.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::core::config::SpotifyConfig;

use super::error::SpotifyError;
use super::models::{PlaybackRequest, SearchParams, SearchResponse, TrackSummary};
use super::token::UserToken;

/// Authorization mode for an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAuth {
    /// No `Authorization` header.
    None,
    /// `Basic` header built from the configured client id/secret pair.
    App,
    /// `Bearer` header using the currently held user token.
    User,
}

/// Request body for an outbound call.
#[derive(Debug, Clone)]
pub enum ApiBody {
    /// JSON-encoded body.
    Json(Value),
    /// `application/x-www-form-urlencoded` body.
    Form(Vec<(String, String)>),
}

/// Async client for the Spotify Web API.
pub struct SpotifyClient {
    http: reqwest::Client,
    config: SpotifyConfig,
    token: UserToken,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
    #[serde(rename = "type")]
    kinds: String,
    limit: u32,
    offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    market: Option<&'a str>,
}

impl SpotifyClient {
    /// Create a client; the token cell is seeded from the configuration.
    pub fn new(config: SpotifyConfig) -> Self {
        let token = UserToken::new(config.user_token.clone());
        Self {
            http: reqwest::Client::new(),
            config,
            token,
        }
    }

    /// The bearer-token cell owned by this client.
    pub fn token(&self) -> &UserToken {
        &self.token
    }

    /// Issue one request, refreshing the user token at most once.
    ///
    /// A 401 on a [`ApiAuth::User`] call triggers a single refresh sub-call
    /// followed by a single reissue of the original request; 401 in the
    /// other modes cannot be cured by a new user token and is surfaced
    /// directly. Any remaining non-2xx status becomes
    /// [`SpotifyError::Http`]. A 2xx with an empty body (playback returns
    /// 204) yields JSON null.
    pub async fn call(
        &self,
        method: Method,
        url: &str,
        auth: ApiAuth,
        body: Option<ApiBody>,
    ) -> Result<Value, SpotifyError> {
        let mut response = self.send(method.clone(), url, auth, body.as_ref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED && auth == ApiAuth::User {
            self.refresh().await?;
            response = self.send(method, url, auth, body.as_ref()).await?;
        }

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SpotifyError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Build and send a single request without any retry handling.
    async fn send(
        &self,
        method: Method,
        url: &str,
        auth: ApiAuth,
        body: Option<&ApiBody>,
    ) -> Result<reqwest::Response, SpotifyError> {
        debug!("{} {}", method, url);
        let mut request = self.http.request(method, url);

        match auth {
            ApiAuth::None => {}
            ApiAuth::App => {
                let client_id = self
                    .config
                    .client_id
                    .as_deref()
                    .ok_or(SpotifyError::Config("SPOTIFY_CLIENT_ID"))?;
                let client_secret = self
                    .config
                    .client_secret
                    .as_deref()
                    .ok_or(SpotifyError::Config("SPOTIFY_CLIENT_SECRET"))?;
                let credentials = base64::Engine::encode(
                    &base64::engine::general_purpose::STANDARD,
                    format!("{client_id}:{client_secret}"),
                );
                request = request.header(reqwest::header::AUTHORIZATION, format!("Basic {credentials}"));
            }
            ApiAuth::User => {
                let token = self
                    .token
                    .current()
                    .ok_or(SpotifyError::Config("SPOTIFY_USER_BEARER_TOKEN"))?;
                request = request.bearer_auth(token);
            }
        }

        if let Some(body) = body {
            request = match body {
                ApiBody::Json(value) => request.json(value),
                ApiBody::Form(fields) => request.form(fields),
            };
        }

        Ok(request.send().await?)
    }

    /// Exchange the configured refresh token for a new access token and
    /// replace the held bearer token.
    ///
    /// Failures here are terminal for the calling operation: a transport
    /// error, a non-2xx status, or a response without an `access_token`
    /// all surface as [`SpotifyError::RefreshFailed`] and nothing retries.
    async fn refresh(&self) -> Result<(), SpotifyError> {
        let refresh_token = self
            .config
            .refresh_token
            .as_deref()
            .ok_or(SpotifyError::Config("SPOTIFY_REFRESH_TOKEN"))?;

        info!("access token rejected, running refresh cycle");

        let form = vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("refresh_token".to_string(), refresh_token.to_string()),
        ];
        let url = format!("{}/api/token", self.config.accounts_base);

        let response = self
            .send(Method::POST, &url, ApiAuth::App, Some(&ApiBody::Form(form)))
            .await
            .map_err(|e| match e {
                SpotifyError::Config(var) => SpotifyError::Config(var),
                other => SpotifyError::RefreshFailed(other.to_string()),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SpotifyError::RefreshFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(SpotifyError::RefreshFailed(format!(
                "token endpoint returned HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            SpotifyError::RefreshFailed(format!("token endpoint returned invalid JSON: {e}"))
        })?;
        let access_token = value
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                SpotifyError::RefreshFailed("token endpoint response had no access_token".to_string())
            })?;

        self.token.replace(access_token);
        info!("bearer token refreshed");
        Ok(())
    }

    /// Search the catalog and flatten the track results.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<TrackSummary>, SpotifyError> {
        let kinds = params
            .types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let query = SearchQuery {
            q: &params.q,
            kinds,
            limit: params.limit.clamp(1, 50),
            offset: params.offset,
            market: params.market.as_deref(),
        };
        let url = format!(
            "{}/search?{}",
            self.config.api_base,
            serde_urlencoded::to_string(&query)?
        );

        let value = self.call(Method::GET, &url, ApiAuth::User, None).await?;
        let response: SearchResponse = serde_json::from_value(value)?;
        Ok(response
            .tracks
            .items
            .into_iter()
            .map(TrackSummary::from)
            .collect())
    }

    /// Start playback on the user's active (or the given) device.
    pub async fn start_playback(
        &self,
        request: &PlaybackRequest,
        device_id: Option<&str>,
    ) -> Result<(), SpotifyError> {
        let url = match device_id {
            Some(device) => format!(
                "{}/me/player/play?{}",
                self.config.api_base,
                serde_urlencoded::to_string([("device_id", device)])?
            ),
            None => format!("{}/me/player/play", self.config.api_base),
        };

        let body = ApiBody::Json(serde_json::to_value(request)?);
        self.call(Method::PUT, &url, ApiAuth::User, Some(body))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::spotify::models::SearchType;
    use axum::extract::{RawQuery, State};
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Stand-in for both the resource API and the accounts service.
    ///
    /// The resource endpoint accepts only `Bearer T2`; the token endpoint
    /// mints `T2` unless `deny_grant` is set.
    #[derive(Default)]
    struct MockSpotify {
        resource_calls: AtomicUsize,
        refresh_calls: AtomicUsize,
        always_reject: bool,
        deny_grant: bool,
        seen_resource_auth: Mutex<Vec<String>>,
        seen_refresh_auth: Mutex<Option<String>>,
        seen_refresh_body: Mutex<Option<String>>,
        seen_search_query: Mutex<Option<String>>,
        seen_play_body: Mutex<Option<String>>,
    }

    async fn me_handler(
        State(state): State<Arc<MockSpotify>>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        state.resource_calls.fetch_add(1, Ordering::SeqCst);
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        state.seen_resource_auth.lock().unwrap().push(auth.clone());

        if state.always_reject || auth != "Bearer T2" {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"status": 401, "message": "The access token expired"}})),
            )
        } else {
            (StatusCode::OK, Json(json!({"display_name": "Game Master"})))
        }
    }

    async fn token_handler(
        State(state): State<Arc<MockSpotify>>,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, Json<Value>) {
        state.refresh_calls.fetch_add(1, Ordering::SeqCst);
        *state.seen_refresh_auth.lock().unwrap() = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        *state.seen_refresh_body.lock().unwrap() = Some(body);

        if state.deny_grant {
            (StatusCode::OK, Json(json!({"error": "invalid_grant"})))
        } else {
            (
                StatusCode::OK,
                Json(json!({"access_token": "T2", "token_type": "Bearer", "expires_in": 3600})),
            )
        }
    }

    async fn search_handler(
        State(state): State<Arc<MockSpotify>>,
        RawQuery(query): RawQuery,
    ) -> (StatusCode, Json<Value>) {
        *state.seen_search_query.lock().unwrap() = query;
        (
            StatusCode::OK,
            Json(json!({
                "tracks": {
                    "items": [{
                        "name": "Tavern Ambience",
                        "uri": "spotify:track:t1",
                        "id": "t1",
                        "href": "https://api.spotify.com/v1/tracks/t1",
                        "album": {
                            "name": "Fantasy Soundscapes",
                            "images": [{"url": "https://img/640", "width": 640, "height": 640}]
                        },
                        "artists": [{"name": "The Bards"}]
                    }]
                }
            })),
        )
    }

    async fn play_handler(State(state): State<Arc<MockSpotify>>, body: String) -> StatusCode {
        *state.seen_play_body.lock().unwrap() = Some(body);
        StatusCode::NO_CONTENT
    }

    async fn spawn_mock(state: Arc<MockSpotify>) -> String {
        let app = Router::new()
            .route("/v1/me", get(me_handler))
            .route("/v1/search", get(search_handler))
            .route("/v1/me/player/play", put(play_handler))
            .route("/api/token", post(token_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn test_config(base: &str, user_token: Option<&str>) -> SpotifyConfig {
        SpotifyConfig {
            client_id: Some("client-id".to_string()),
            client_secret: Some("client-secret".to_string()),
            refresh_token: Some("refresh-1".to_string()),
            user_token: user_token.map(String::from),
            api_base: format!("{base}/v1"),
            accounts_base: base.to_string(),
        }
    }

    fn expected_basic_header() -> String {
        let credentials = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            "client-id:client-secret",
        );
        format!("Basic {credentials}")
    }

    #[tokio::test]
    async fn test_refresh_success_path() {
        let state = Arc::new(MockSpotify::default());
        let base = spawn_mock(state.clone()).await;
        let client = SpotifyClient::new(test_config(&base, Some("T1")));

        let url = format!("{base}/v1/me");
        let result = client.call(Method::GET, &url, ApiAuth::User, None).await.unwrap();

        assert_eq!(result["display_name"], "Game Master");
        assert_eq!(state.resource_calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);

        // stale token first, refreshed token on the single retry
        let seen = state.seen_resource_auth.lock().unwrap().clone();
        assert_eq!(seen, vec!["Bearer T1".to_string(), "Bearer T2".to_string()]);

        // the cell was replaced wholesale
        assert_eq!(client.token().current().as_deref(), Some("T2"));

        // refresh sub-call used app credentials and the form grant
        let refresh_auth = state.seen_refresh_auth.lock().unwrap().clone().unwrap();
        assert_eq!(refresh_auth, expected_basic_header());
        let refresh_body = state.seen_refresh_body.lock().unwrap().clone().unwrap();
        assert!(refresh_body.contains("grant_type=refresh_token"));
        assert!(refresh_body.contains("refresh_token=refresh-1"));
    }

    #[tokio::test]
    async fn test_single_retry_ceiling_on_persistent_401() {
        let state = Arc::new(MockSpotify {
            always_reject: true,
            ..MockSpotify::default()
        });
        let base = spawn_mock(state.clone()).await;
        let client = SpotifyClient::new(test_config(&base, Some("T1")));

        let url = format!("{base}/v1/me");
        let err = client
            .call(Method::GET, &url, ApiAuth::User, None)
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(matches!(err, SpotifyError::Http { status: 401, .. }));
        // original + exactly one retry, exactly one refresh, no loop
        assert_eq!(state.resource_calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_without_usable_token_fails() {
        let state = Arc::new(MockSpotify {
            deny_grant: true,
            ..MockSpotify::default()
        });
        let base = spawn_mock(state.clone()).await;
        let client = SpotifyClient::new(test_config(&base, Some("T1")));

        let url = format!("{base}/v1/me");
        let err = client
            .call(Method::GET, &url, ApiAuth::User, None)
            .await
            .unwrap_err();

        assert!(matches!(err, SpotifyError::RefreshFailed(_)));
        // the original request is not reissued after a failed refresh
        assert_eq!(state.resource_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_user_mode_without_token_is_config_error() {
        let state = Arc::new(MockSpotify::default());
        let base = spawn_mock(state.clone()).await;
        let client = SpotifyClient::new(test_config(&base, None));

        let url = format!("{base}/v1/me");
        let err = client
            .call(Method::GET, &url, ApiAuth::User, None)
            .await
            .unwrap_err();

        assert!(matches!(err, SpotifyError::Config("SPOTIFY_USER_BEARER_TOKEN")));
        // no request was ever issued
        assert_eq!(state.resource_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_app_mode_sends_basic_header_and_never_refreshes() {
        let state = Arc::new(MockSpotify::default());
        let base = spawn_mock(state.clone()).await;
        let client = SpotifyClient::new(test_config(&base, Some("T1")));

        // the mock rejects Basic auth on the resource endpoint with 401;
        // app-mode calls must surface it rather than run the refresh cycle
        let url = format!("{base}/v1/me");
        let err = client
            .call(Method::GET, &url, ApiAuth::App, None)
            .await
            .unwrap_err();

        assert!(matches!(err, SpotifyError::Http { status: 401, .. }));
        assert_eq!(state.resource_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 0);

        let seen = state.seen_resource_auth.lock().unwrap().clone();
        assert_eq!(seen, vec![expected_basic_header()]);
    }

    #[tokio::test]
    async fn test_search_builds_query_and_flattens_tracks() {
        let state = Arc::new(MockSpotify::default());
        let base = spawn_mock(state.clone()).await;
        let client = SpotifyClient::new(test_config(&base, Some("T2")));

        let params = SearchParams {
            q: "dark tense music".to_string(),
            types: vec![SearchType::Track],
            market: None,
            limit: 5,
            offset: 0,
        };
        let tracks = client.search(&params).await.unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Tavern Ambience");
        assert_eq!(tracks[0].artist, "The Bards");
        assert_eq!(tracks[0].album, "Fantasy Soundscapes");

        let query = state.seen_search_query.lock().unwrap().clone().unwrap();
        assert!(query.contains("q=dark+tense+music"));
        assert!(query.contains("type=track"));
        assert!(query.contains("limit=5"));
    }

    #[tokio::test]
    async fn test_start_playback_accepts_empty_204_body() {
        let state = Arc::new(MockSpotify::default());
        let base = spawn_mock(state.clone()).await;
        let client = SpotifyClient::new(test_config(&base, Some("T2")));

        let request = PlaybackRequest {
            uris: Some(vec!["spotify:track:t1".to_string()]),
            ..PlaybackRequest::default()
        };
        client.start_playback(&request, None).await.unwrap();

        let body = state.seen_play_body.lock().unwrap().clone().unwrap();
        assert!(body.contains("spotify:track:t1"));
        // absent optional fields are not serialized at all
        assert!(!body.contains("context_uri"));
    }
}
