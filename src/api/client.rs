//! HTTP client with response caching, request de-duplication and retries.
//!
//! All outbound traffic, to the backend and to the MLB Stats API, goes through
//! [`ApiService`]. A GET is answered in this order:
//!
//! 1. a cached payload for the same endpoint whose TTL has not elapsed;
//! 2. the result of an identical request that is already in flight;
//! 3. a new request, retried on timeouts, 5xx and network failures with
//!    exponential backoff.
//!
//! The cache and the in-flight table belong to the service instance, so two
//! services never share state. Cloning an `ApiService` shares it.

use futures::future::{BoxFuture, FutureExt, Shared};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    core::{cache_key, default_headers, resolve_url, CacheStats, CancelToken, ResponseCache},
    error::ApiError,
    Result,
};


pub const USER_AGENT: &str = concat!("hanks-tank/", env!("CARGO_PKG_VERSION"));

/// Tunables for [`ApiService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Root of the MLB Stats API.
    pub mlb_api_url: String,
    /// Per-attempt timeout, generous for slow mobile links.
    pub timeout: Duration,
    /// Extra attempts after the first one.
    pub max_retries: u32,
    /// Delay before retry `n` is `retry_base_delay * 2^n`.
    pub retry_base_delay: Duration,
    pub default_ttl: Duration,
    pub cache_capacity: usize,
    pub sweep_interval: Duration,
    pub cache_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_API_BASE_URL.to_string(),
            mlb_api_url: crate::config::MLB_STATS_API_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
            retry_base_delay: Duration::from_secs(1),
            default_ttl: Duration::from_secs(10 * 60),
            cache_capacity: 256,
            sweep_interval: Duration::from_secs(5 * 60),
            cache_enabled: true,
        }
    }
}

impl ClientConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            cache_enabled: config.cache_enabled,
            ..Self::default()
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// How long a successful GET stays cached; the service default when `None`.
    pub cache_ttl: Option<Duration>,
    /// Abandon the call once this token is cancelled.
    pub cancel: Option<CancelToken>,
}

impl RequestOptions {
    pub fn ttl_minutes(minutes: u64) -> Self {
        Self {
            cache_ttl: Some(Duration::from_secs(minutes * 60)),
            cancel: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn cancel_with(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

type FetchResult = std::result::Result<Value, ApiError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// A request in flight and how many callers are waiting on it.
struct InFlight {
    id: u64,
    fetch: SharedFetch,
    waiters: usize,
}

struct Inner {
    http: Client,
    config: ClientConfig,
    cache: Mutex<ResponseCache>,
    pending: Mutex<HashMap<String, InFlight>>,
    next_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle to the HTTP client, its cache and its in-flight requests.
#[derive(Clone)]
pub struct ApiService {
    inner: Arc<Inner>,
    /// Applied to every call that does not bring its own token.
    cancel: Option<CancelToken>,
}

impl ApiService {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                cache: Mutex::new(ResponseCache::new(config.cache_capacity)),
                pending: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                config,
            }),
            cancel: None,
        })
    }

    /// A handle on the same cache whose calls all stop once `token` is cancelled.
    pub fn with_cancel(&self, token: CancelToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: Some(token),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Cached, de-duplicated GET returning the raw JSON payload.
    pub async fn get(&self, endpoint: &str, opts: RequestOptions) -> Result<Value> {
        let cancel = opts.cancel.or_else(|| self.cancel.clone());
        let cancelled = || ApiError::Cancelled {
            url: endpoint.to_string(),
        };
        if cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(cancelled().into());
        }

        let key = cache_key(endpoint);
        if self.inner.config.cache_enabled {
            if let Some(hit) = lock(&self.inner.cache).get(&key) {
                debug!(endpoint, "Cache hit");
                return Ok(hit);
            }
        }

        let ttl = opts.cache_ttl.unwrap_or(self.inner.config.default_ttl);
        let waiter = self.join_or_start(&key, endpoint, ttl);
        let fetch = waiter.fetch.clone();

        let outcome = match &cancel {
            Some(token) => tokio::select! {
                result = fetch => result,
                _ = token.cancelled() => {
                    info!(endpoint, "Request cancelled by caller");
                    Err(cancelled())
                }
            },
            None => fetch.await,
        };
        drop(waiter);

        Ok(outcome?)
    }

    /// GET and decode into a typed record at the API boundary.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        opts: RequestOptions,
    ) -> Result<T> {
        let value = self.get(endpoint, opts).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// JSON POST. Never cached and never de-duplicated.
    pub async fn post(
        &self,
        endpoint: &str,
        body: Option<&Value>,
        opts: RequestOptions,
    ) -> Result<Value> {
        let request = self.request(Method::POST, endpoint, body);
        let outcome = match opts.cancel.as_ref().or(self.cancel.as_ref()) {
            Some(token) => tokio::select! {
                result = request => result,
                _ = token.cancelled() => Err(ApiError::Cancelled { url: endpoint.to_string() }),
            },
            None => request.await,
        };
        Ok(outcome?)
    }

    /// Perform a request with timeout and retry, bypassing cache and dedup.
    ///
    /// Retries timeouts, 5xx and network failures up to `max_retries` times;
    /// any other failure (including 404 and 429) is returned at once.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> std::result::Result<Value, ApiError> {
        let config = &self.inner.config;
        let url = resolve_url(&config.base_url, endpoint);
        let mut attempt = 0u32;

        loop {
            match self.attempt(&method, &url, body).await {
                Ok(payload) => return Ok(payload),
                Err(err) if err.is_retryable() && attempt < config.max_retries => {
                    let delay = config
                        .retry_base_delay
                        .saturating_mul(2u32.saturating_pow(attempt));
                    warn!(
                        "Request failed, retrying ({}/{}) in {:?}: {}",
                        attempt + 1,
                        config.max_retries,
                        delay,
                        err
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    error!("{} {} failed: {}", method, url, err);
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
    ) -> std::result::Result<Value, ApiError> {
        let mut builder = self.inner.http.request(method.clone(), url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let exchange = async {
            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::from_reqwest(&e, url))?;

            let status = response.status();
            debug!(%url, %status, "Response received");
            if !status.is_success() {
                return Err(ApiError::from_status(status, url));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| ApiError::from_reqwest(&e, url))?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })
        };

        match tokio::time::timeout(self.inner.config.timeout, exchange).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(%url, "Request timeout - slow network detected");
                Err(ApiError::Timeout {
                    url: url.to_string(),
                })
            }
        }
    }

    /// Join an identical in-flight request or start a new one.
    fn join_or_start(&self, key: &str, endpoint: &str, ttl: Duration) -> Waiter {
        let mut pending = lock(&self.inner.pending);

        if let Some(in_flight) = pending.get_mut(key) {
            in_flight.waiters += 1;
            debug!(endpoint, waiters = in_flight.waiters, "Awaiting pending request");
            return Waiter {
                service: self.clone(),
                key: key.to_string(),
                id: in_flight.id,
                fetch: in_flight.fetch.clone(),
            };
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let service = self.clone();
        let owned_key = key.to_string();
        let owned_endpoint = endpoint.to_string();
        let fetch = async move {
            let result = service.request(Method::GET, &owned_endpoint, None).await;
            service.complete(&owned_key, id, &result, ttl);
            result
        }
        .boxed()
        .shared();

        pending.insert(
            key.to_string(),
            InFlight {
                id,
                fetch: fetch.clone(),
                waiters: 1,
            },
        );

        Waiter {
            service: self.clone(),
            key: key.to_string(),
            id,
            fetch,
        }
    }

    /// Store a successful payload and retire the in-flight entry.
    fn complete(&self, key: &str, id: u64, result: &FetchResult, ttl: Duration) {
        if let Ok(payload) = result {
            if self.inner.config.cache_enabled {
                lock(&self.inner.cache).put(key, payload.clone(), ttl);
            }
        }

        let mut pending = lock(&self.inner.pending);
        if pending.get(key).is_some_and(|f| f.id == id) {
            pending.remove(key);
        }
    }

    /// A waiter stopped waiting. The last one out drops the request itself.
    fn leave(&self, key: &str, id: u64) {
        let mut pending = lock(&self.inner.pending);
        let abandon = match pending.get_mut(key) {
            Some(in_flight) if in_flight.id == id => {
                in_flight.waiters = in_flight.waiters.saturating_sub(1);
                in_flight.waiters == 0
            }
            _ => false,
        };
        if abandon {
            debug!(key, "Abandoning request with no remaining waiters");
            pending.remove(key);
        }
    }

    /// Number of distinct requests currently in flight.
    pub fn in_flight(&self) -> usize {
        lock(&self.inner.pending).len()
    }

    /// Drop the cached response for one endpoint.
    pub fn invalidate(&self, endpoint: &str) -> bool {
        lock(&self.inner.cache).invalidate(&cache_key(endpoint))
    }

    pub fn clear_cache(&self) {
        lock(&self.inner.cache).clear();
        info!("Cache cleared");
    }

    pub fn sweep_expired(&self) -> usize {
        lock(&self.inner.cache).sweep_expired()
    }

    pub fn cache_stats(&self) -> CacheStats {
        lock(&self.inner.cache).stats()
    }

    /// Sweep expired entries every `sweep_interval` until the service is dropped.
    pub fn spawn_cache_sweeper(&self) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        let period = self.inner.config.sweep_interval.max(Duration::from_millis(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let removed = lock(&inner.cache).sweep_expired();
                if removed > 0 {
                    debug!(removed, "Swept expired cache entries");
                }
            }
        })
    }
}

/// One caller's stake in an in-flight request. Dropping it, on completion,
/// cancellation or when the caller's future is dropped, releases the stake.
struct Waiter {
    service: ApiService,
    key: String,
    id: u64,
    fetch: SharedFetch,
}

impl Drop for Waiter {
    fn drop(&mut self) {
        self.service.leave(&self.key, self.id);
    }
}
