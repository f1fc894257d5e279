use url::Url;
use std::time;
use crate::SaverError;

/// Constants for HTTP Config
pub const HTTP_TIMEOUT: u64 = 10000;
pub const HTTP_CONNECT_TIMEOUT: u64 = 2000;
pub const HTTP_POOL_MAX_IDLE: usize = 4;
pub const HTTP_POOL_IDLE_TIMEOUT: u64 = 90000;
pub const HTTP_MAX_REDIRECTS: u8 = 4;

/// Fixed pre-call pauses; the only mitigation against the
/// service's per-second rate ceiling
pub const SEARCH_PAUSE_MS: u64 = 1000;
pub const SAVE_PAUSE_MS: u64 = 2000;

/// Wrapper over env::var to return an invalid environment var error
fn env_check(s: &str) -> Result<String, SaverError> {
    match std::env::var(s) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SaverError::Config(format!("{s} was not set"))),
    }
}

/// Ensures that url is https
fn ensure_https(url: &Url) -> Result<(), String> {
    if url.scheme() == "https" {
        Ok(())
    } else {
        Err(format!("URL must be https: {url}"))
    }
}

fn ensure_host(url: &Url, expected_host: &str) -> Result<(), String> {
    match url.host_str() {
        Some(h) if h.eq_ignore_ascii_case(expected_host) => Ok(()),
        Some(h) => Err(
            format!("Unexpected host for {url} (got {h}, expected {expected_host})")
        ),
        None => Err(format!("URL missing host: {url}"))
    }
}

/// Configuration the catalog service expects when hitting endpoints.
/// The bearer token is acquired out of process (user-library-modify scope)
/// and handed in through the environment.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub api_base: Url,
    pub market: String,
    pub token: String,
}

fn build_spotify() -> Result<SpotifyConfig, SaverError> {
    let token = env_check("SPOTIFY_OAUTH_TOKEN")?;

    let api_base = std::env::var("SPOTIFY_API_BASE")
        .unwrap_or_else(|_| "https://api.spotify.com/v1/".to_string());

    let mut api_base = Url::parse(&api_base)
        .map_err(|_| SaverError::Config(
            "SPOTIFY_API_BASE invalid".to_string()
        ))?;

    // ensure valid https and hostname unless pointed at a local stub
    if std::env::var("SPOTIFY_API_BASE").is_err() {
        ensure_https(&api_base).map_err(SaverError::Config)?;
        ensure_host(&api_base, "api.spotify.com").map_err(SaverError::Config)?;
    }

    if !api_base.path().ends_with('/') {
        let mut path = api_base.path().to_string();
        path.push('/');
        api_base.set_path(&path);
    }

    let market = std::env::var("SPOTIFY_MARKET")
        .unwrap_or_else(|_| "JP".to_string());

    Ok( SpotifyConfig { api_base, market, token } )
}

///
/// Configuration for Http timeouts, pooling, etc.
///
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: time::Duration,
    pub connect_timeout: time::Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: time::Duration,
    pub max_redirects: u8,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: time::Duration::from_millis(HTTP_TIMEOUT),
            connect_timeout: time::Duration::from_millis(HTTP_CONNECT_TIMEOUT),
            pool_max_idle_per_host: HTTP_POOL_MAX_IDLE,
            pool_idle_timeout: time::Duration::from_millis(HTTP_POOL_IDLE_TIMEOUT),
            max_redirects: HTTP_MAX_REDIRECTS,
        }
    }
}

///
/// Configuration for pacing of remote calls. One sequential flow of
/// control; every external call is preceded by its fixed pause.
///
#[derive(Debug, Clone, Copy)]
pub struct PacingConfig {
    pub search_pause: time::Duration,
    pub save_pause: time::Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            search_pause: time::Duration::from_millis(SEARCH_PAUSE_MS),
            save_pause: time::Duration::from_millis(SAVE_PAUSE_MS),
        }
    }
}

///
/// Configuration for Logger
///

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter_directives: String,
    pub format: LogFormat,
    pub with_ansi: bool,
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter_directives: "info,rs_saver=debug,reqwest=warn".to_string(),
            format: LogFormat::Pretty,
            with_ansi: true,
            include_target: false,
        }
    }
}

///
/// AppConfig which holds everything needed by the fetch module
/// and the resolve/save pipelines
///
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub spotify: SpotifyConfig,
    pub http: HttpConfig,
    pub pacing: PacingConfig,
    pub logging: LoggingConfig
}

///
/// Return all environment variables to caller at program start.
///
pub fn load_config() -> Result<AppConfig, SaverError> {
    dotenvy::dotenv().ok();

    let spotify = build_spotify()?;
    let http    = HttpConfig::default();
    let pacing  = PacingConfig::default();
    let logging = LoggingConfig::default();

    Ok( AppConfig { spotify, http, pacing, logging } )
}
