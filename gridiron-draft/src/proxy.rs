// Same-origin proxy for the stats provider.
//
// Serves `GET /api/nfl-stats` by forwarding to the upstream season stats
// endpoint with the server-held API key, plus static front-end files.
// Responses never carry the key: failures map to fixed error bodies.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info, warn};
use warp::http::header::{HeaderValue, CONTENT_TYPE};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

use crate::config::Config;

/// Header the provider reads the subscription key from.
pub const API_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Raw upstream answer: status code and body bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The upstream stats provider, as seen by the proxy route.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch_season_stats(&self) -> anyhow::Result<UpstreamReply>;
}

// ---------------------------------------------------------------------------
// SportsDataClient
// ---------------------------------------------------------------------------

/// reqwest client for the provider's season stats endpoint.
pub struct SportsDataClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl SportsDataClient {
    pub fn new(url: String, api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self { http, url, api_key })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.credentials.nfl_api_key.clone();
        if api_key.is_none() {
            warn!("No NFL API key configured; upstream requests will be unauthenticated");
        }
        Self::new(
            config.upstream.season_stats_url(),
            api_key,
            Duration::from_secs(config.upstream.timeout_secs),
        )
    }
}

#[async_trait]
impl Upstream for SportsDataClient {
    async fn fetch_season_stats(&self) -> anyhow::Result<UpstreamReply> {
        let mut request = self.http.get(&self.url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .context("upstream request failed")?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .context("failed to read upstream body")?
            .to_vec();

        Ok(UpstreamReply { status, body })
    }
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

fn error_response(status: StatusCode, message: &'static str) -> Response {
    warp::reply::with_status(warp::reply::json(&ErrorBody { error: message }), status)
        .into_response()
}

/// Turn an upstream result into the proxy's response.
///
/// - 2xx with a JSON body: the body, verbatim.
/// - non-2xx: the upstream status with `{"error":"API error"}`.
/// - transport failure or a non-JSON body: 500 with `{"error":"Server error"}`.
pub fn proxy_response(result: anyhow::Result<UpstreamReply>) -> Response {
    let reply = match result {
        Ok(reply) => reply,
        Err(e) => {
            error!("Server error: {:#}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error");
        }
    };

    if !(200..300).contains(&reply.status) {
        error!("SportsData API error: {}", reply.status);
        let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
        return error_response(status, "API error");
    }

    if let Err(e) = serde_json::from_slice::<serde_json::Value>(&reply.body) {
        error!("Server error: upstream body is not JSON: {}", e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error");
    }

    let mut response = Response::new(reply.body.into());
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

async fn handle_nfl_stats(upstream: Arc<dyn Upstream>) -> Result<Response, Infallible> {
    Ok(proxy_response(upstream.fetch_season_stats().await))
}

/// `GET /api/nfl-stats` plus static files from `static_dir`.
pub fn routes(
    upstream: Arc<dyn Upstream>,
    static_dir: PathBuf,
) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    let upstream_filter = warp::any().map(move || upstream.clone());

    let stats = warp::path!("api" / "nfl-stats")
        .and(warp::get())
        .and(upstream_filter)
        .and_then(handle_nfl_stats);

    let statics = warp::get().and(warp::fs::dir(static_dir)).map(Reply::into_response);

    stats.or(statics).unify()
}

/// Bind and serve until the process exits.
pub async fn serve(config: &Config, upstream: Arc<dyn Upstream>) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let routes = routes(upstream, PathBuf::from(&config.server.static_dir));
    info!("Proxy listening on http://{addr}");
    warp::serve(routes).run(addr).await;
    Ok(())
}
