//!
//! src/fetch.rs
//!
//! Defines methods for hitting catalog endpoints and
//! returning unparsed data
//!

use reqwest::{Client, header, redirect, RequestBuilder};
use crate::config::{HttpConfig, SpotifyConfig};
use crate::SaverError;

/// Client building functionality
fn client_helper(http: &HttpConfig) -> reqwest::ClientBuilder {
    Client::builder()
        .timeout(http.timeout)
        .connect_timeout(http.connect_timeout)
        .pool_max_idle_per_host(http.pool_max_idle_per_host)
        .pool_idle_timeout(Some(http.pool_idle_timeout))
        .redirect(redirect::Policy::limited(http.max_redirects as usize))
}

fn client_with_headers(http: &HttpConfig, headers: header::HeaderMap) ->
    Result<Client, SaverError> {
    client_helper(http)
        .default_headers(headers)
        .build()
        .map_err(|e| SaverError::Http(format!("build client: {e}")))
}

pub fn base_client(http: &HttpConfig) -> Result<Client, SaverError> {
    let mut h = header::HeaderMap::new();
    h.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
    client_with_headers(http, h)
}

/// The one authenticated session against the catalog service. Built once
/// at startup and handed to the resolver/submitter; the bearer token comes
/// from the external auth collaborator via config.
#[derive(Clone, Debug)]
pub struct SpotifyClient {
    pub http: Client,
    pub cfg: SpotifyConfig
}

impl SpotifyClient {
    pub fn new(http_config: &HttpConfig, cfg: &SpotifyConfig) ->
        Result<Self, SaverError> {

        let http = base_client(http_config)?;
        Ok( Self {
            http,
            cfg: cfg.clone()
        })
    }

    /// GET /v1/search?type=album|track&q=...&limit=&market=
    pub fn search(&self, query: &str, kind: &str, limit: u32) -> RequestBuilder {
        let url = self.cfg.api_base.join("search").unwrap();
        self.http.get(url).bearer_auth(&self.cfg.token).query(&[
            ("type", kind),
            ("q", query),
            ("limit", &limit.to_string()),
            ("market", &self.cfg.market)
        ])
    }

    /// PUT /v1/me/albums?ids=... (max 50 ids per call)
    pub fn save_albums(&self, ids_csv: &str) -> RequestBuilder {
        let url = self.cfg.api_base.join("me/albums").unwrap();
        self.http.put(url).bearer_auth(&self.cfg.token).query(&[("ids", ids_csv)])
    }

    /// PUT /v1/me/tracks?ids=... (max 50 ids per call)
    pub fn save_tracks(&self, ids_csv: &str) -> RequestBuilder {
        let url = self.cfg.api_base.join("me/tracks").unwrap();
        self.http.put(url).bearer_auth(&self.cfg.token).query(&[("ids", ids_csv)])
    }
}
