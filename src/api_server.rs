//! Net-worth API service
//!
//! Serves the billionaire roster to the game: live figures merged over the
//! built-in fallback, cached for a short TTL. The endpoint always answers
//! HTTP 200 with a JSON array; upstream failures degrade to fallback data
//! and are never surfaced to the player.

#[cfg(not(target_arch = "wasm32"))]
mod server {
    use std::env;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use actix_cors::Cors;
    use actix_web::{App, HttpResponse, HttpServer, Responder, middleware, web};
    use anyhow::{Context, Result};
    use serde::{Deserialize, Serialize};
    use tokio::sync::RwLock;

    use eat_the_rich::roster::{self, BillionaireDto};

    const DEFAULT_UPSTREAM_BASE: &str = "https://forbes-billionaires-api.p.rapidapi.com";
    const DEFAULT_UPSTREAM_HOST: &str = "forbes-billionaires-api.p.rapidapi.com";
    const DEFAULT_CACHE_TTL_SECS: u64 = 300;
    const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

    /// Upstream slug for each roster entry, plus the name fragment that ties
    /// a response back to its fallback slot
    const UPSTREAM_IDS: [(&str, &str); 4] = [
        ("elon-musk", "Musk"),
        ("jeff-bezos", "Bezos"),
        ("mark-zuckerberg", "Zuckerberg"),
        ("donald-trump", "Trump"),
    ];

    #[derive(Debug, Clone)]
    struct ServerConfig {
        bind_addr: String,
        upstream_base: String,
        api_key: String,
        api_host: String,
        cache_ttl: Duration,
        upstream_timeout: Duration,
    }

    impl ServerConfig {
        fn from_env() -> Self {
            Self {
                bind_addr: read_env_string("API_BIND_ADDR", "0.0.0.0:8080"),
                upstream_base: read_env_string("UPSTREAM_BASE_URL", DEFAULT_UPSTREAM_BASE),
                api_key: read_env_string("RAPIDAPI_KEY", ""),
                api_host: read_env_string("RAPIDAPI_HOST", DEFAULT_UPSTREAM_HOST),
                cache_ttl: Duration::from_secs(read_env_u64(
                    "CACHE_TTL_SECS",
                    DEFAULT_CACHE_TTL_SECS,
                )),
                upstream_timeout: Duration::from_secs(read_env_u64(
                    "UPSTREAM_TIMEOUT_SECS",
                    DEFAULT_UPSTREAM_TIMEOUT_SECS,
                )),
            }
        }
    }

    fn read_env_string(name: &str, default: &str) -> String {
        env::var(name)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_owned())
    }

    fn read_env_u64(name: &str, default: u64) -> u64 {
        env::var(name)
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(default)
    }

    /// What the upstream returns for one figure; worth is in billions
    #[derive(Debug, Clone, Deserialize)]
    struct UpstreamProfile {
        name: String,
        current_worth: f64,
    }

    struct CachedRoster {
        fetched_at: Instant,
        body: Vec<BillionaireDto>,
    }

    #[derive(Clone)]
    struct AppState {
        client: reqwest::Client,
        cache: Arc<RwLock<Option<CachedRoster>>>,
        config: ServerConfig,
    }

    #[derive(Debug, Serialize)]
    struct HealthResponse {
        status: &'static str,
        service: &'static str,
        cache_age_secs: Option<u64>,
    }

    async fn fetch_one(
        client: reqwest::Client,
        config: ServerConfig,
        slug: &'static str,
    ) -> Result<UpstreamProfile> {
        let url = format!("{}/detail.php?id={slug}", config.upstream_base);
        let response = client
            .get(&url)
            .header("X-RapidAPI-Key", &config.api_key)
            .header("X-RapidAPI-Host", &config.api_host)
            .send()
            .await
            .context("upstream request failed")?
            .error_for_status()
            .context("upstream returned an error status")?;
        response
            .json::<UpstreamProfile>()
            .await
            .context("malformed upstream payload")
    }

    /// Build the roster: live data merged over the fallback, entry by entry.
    /// A failed or malformed fetch leaves that entry's fallback value alone.
    async fn assemble_roster(state: &AppState) -> Vec<BillionaireDto> {
        let mut roster = roster::fallback_roster();

        let handles: Vec<_> = UPSTREAM_IDS
            .iter()
            .map(|&(slug, name_match)| {
                let client = state.client.clone();
                let config = state.config.clone();
                tokio::spawn(async move { (name_match, fetch_one(client, config, slug).await) })
            })
            .collect();

        for handle in handles {
            let Ok((name_match, result)) = handle.await else {
                continue;
            };
            match result {
                Ok(profile) if profile.current_worth > 0.0 => {
                    let net_worth = (profile.current_worth * 1e9) as u64;
                    roster::merge_live_entry(&mut roster, name_match, &profile.name, net_worth);
                }
                Ok(_) => {
                    tracing::warn!("upstream reported a non-positive worth for {name_match}");
                }
                Err(err) => {
                    tracing::warn!("upstream fetch failed for {name_match}: {err:#}");
                }
            }
        }

        roster.iter().map(BillionaireDto::from).collect()
    }

    /// GET /api/billionaires - always 200 with a JSON array
    async fn billionaires(state: web::Data<AppState>) -> impl Responder {
        {
            let cache = state.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < state.config.cache_ttl {
                    return HttpResponse::Ok().json(&cached.body);
                }
            }
        }

        let body = assemble_roster(&state).await;
        {
            let mut cache = state.cache.write().await;
            *cache = Some(CachedRoster {
                fetched_at: Instant::now(),
                body: body.clone(),
            });
        }
        HttpResponse::Ok().json(body)
    }

    /// GET /health
    async fn health(state: web::Data<AppState>) -> impl Responder {
        let cache = state.cache.read().await;
        HttpResponse::Ok().json(HealthResponse {
            status: "healthy",
            service: "networth-api",
            cache_age_secs: cache.as_ref().map(|c| c.fetched_at.elapsed().as_secs()),
        })
    }

    pub async fn run() -> std::io::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::filter::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            )
            .init();

        let config = ServerConfig::from_env();
        tracing::info!(
            "starting networth api: bind_addr={} upstream={} cache_ttl={}s",
            config.bind_addr,
            config.upstream_base,
            config.cache_ttl.as_secs()
        );

        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .expect("failed to build upstream client");

        let bind_addr = config.bind_addr.clone();
        let state = AppState {
            client,
            cache: Arc::new(RwLock::new(None)),
            config,
        };

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .app_data(web::Data::new(state.clone()))
                .wrap(cors)
                .wrap(middleware::Logger::default())
                .route("/health", web::get().to(health))
                .route("/api/billionaires", web::get().to(billionaires))
        })
        .bind(bind_addr)?
        .run()
        .await
    }

}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    server::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The data service is native-only; nothing to run on wasm
}
