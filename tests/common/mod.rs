#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;

use link_redirector::AppError;
use link_redirector::application::services::{
    ClickJob, ClickQueue, ClickRecorder, run_click_worker,
};
use link_redirector::domain::entities::{ClickEvent, DeviceCount, Link, NewClickEvent, UpiDetails};
use link_redirector::domain::repositories::{ClickRepository, LinkRepository};
use link_redirector::infrastructure::cache::{
    CacheError, CacheResult, CacheService, CacheTtls, LinkCache, NullCache,
};
use link_redirector::routes::app_router;
use link_redirector::state::AppState;

pub const HOME_URL: &str = "https://home.example/";
pub const PEER_ADDR: &str = "127.0.0.1:12345";

/// Link store backed by a map, counting lookups.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
    pub find_calls: AtomicUsize,
    pub unavailable: AtomicBool,
}

impl InMemoryLinkRepository {
    pub fn with_links(links: impl IntoIterator<Item = Link>) -> Self {
        let repo = Self::default();
        for link in links {
            repo.insert(link);
        }
        repo
    }

    pub fn insert(&self, link: Link) {
        self.links.lock().unwrap().insert(link.code.clone(), link);
    }

    pub fn clicks_of(&self, code: &str) -> i64 {
        self.links.lock().unwrap().get(code).map_or(0, |l| l.clicks)
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.links.lock().unwrap().get(code).cloned())
    }

    async fn increment_clicks(&self, link_id: i64) -> Result<bool, AppError> {
        self.check_available()?;
        let mut links = self.links.lock().unwrap();
        match links.values_mut().find(|l| l.id == link_id) {
            Some(link) => {
                link.clicks += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_destination(
        &self,
        code: &str,
        destination_url: &str,
    ) -> Result<Option<Link>, AppError> {
        self.check_available()?;
        let mut links = self.links.lock().unwrap();
        Ok(links.get_mut(code).map(|link| {
            link.destination_url = destination_url.to_string();
            link.clone()
        }))
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        self.check_available()?;
        Ok(self.links.lock().unwrap().remove(code).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}

/// Click event log. With `fail_every = n`, every n-th insert attempt fails.
#[derive(Default)]
pub struct InMemoryClickRepository {
    events: Mutex<Vec<ClickEvent>>,
    attempts: AtomicUsize,
    pub fail_every: AtomicUsize,
    pub fail_all: AtomicBool,
}

impl InMemoryClickRepository {
    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail_all.store(true, Ordering::SeqCst);
        repo
    }

    pub fn failing_every(n: usize) -> Self {
        let repo = Self::default();
        repo.fail_every.store(n, Ordering::SeqCst);
        repo
    }

    pub fn events(&self) -> Vec<ClickEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn insert(&self, new_click: NewClickEvent) -> Result<ClickEvent, AppError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        let every = self.fail_every.load(Ordering::SeqCst);
        if self.fail_all.load(Ordering::SeqCst) || (every > 0 && attempt % every == 0) {
            return Err(AppError::internal("Database error", json!({})));
        }

        let mut events = self.events.lock().unwrap();
        let event = ClickEvent {
            id: events.len() as i64 + 1,
            link_id: new_click.link_id,
            ip: new_click.ip,
            device: new_click.device,
            os: new_click.os,
            browser: new_click.browser,
            referrer: new_click.referrer,
            user_agent: new_click.user_agent,
            country: None,
            region: None,
            city: None,
            continent: None,
            clicked_at: Utc::now(),
        };
        events.push(event.clone());
        Ok(event)
    }

    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError> {
        let events = self.events.lock().unwrap();
        Ok(events.iter().filter(|e| e.link_id == link_id).count() as i64)
    }

    async fn device_breakdown(&self, link_id: i64) -> Result<Vec<DeviceCount>, AppError> {
        let events = self.events.lock().unwrap();
        let mut counts: Vec<DeviceCount> = Vec::new();
        for event in events.iter().filter(|e| e.link_id == link_id) {
            match counts.iter_mut().find(|c| c.device == event.device) {
                Some(count) => count.clicks += 1,
                None => counts.push(DeviceCount {
                    device: event.device,
                    clicks: 1,
                }),
            }
        }
        Ok(counts)
    }
}

/// Key/value cache without expiry. `broken` makes every call fail.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
    pub broken: AtomicBool,
}

impl MemoryCache {
    pub fn broken() -> Self {
        let cache = Self::default();
        cache.broken.store(true, Ordering::SeqCst);
        cache
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn check(&self) -> CacheResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(CacheError::Connection("cache offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.check()?;
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> CacheResult<()> {
        self.check()?;
        self.put_raw(key, value);
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> CacheResult<()> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }

    async fn is_available(&self) -> bool {
        !self.broken.load(Ordering::SeqCst)
    }
}

pub fn link_cache(backend: Arc<dyn CacheService>) -> LinkCache {
    LinkCache::new(backend, CacheTtls::default())
}

pub fn uncached() -> LinkCache {
    link_cache(Arc::new(NullCache::new()))
}

pub fn standard_link(id: i64, code: &str, url: &str) -> Link {
    Link::standard(id, code, url)
}

pub fn upi_link(id: i64, code: &str, vpa: &str) -> Link {
    Link::upi_payment(
        id,
        code,
        UpiDetails {
            vpa: vpa.to_string(),
            payee_name: Some("Shop".to_string()),
            amount: Some("100".to_string()),
            note: None,
        },
    )
}

/// State with a running click worker. Must be called inside a Tokio runtime.
pub fn create_test_state(
    links: Arc<InMemoryLinkRepository>,
    clicks: Arc<InMemoryClickRepository>,
    cache: LinkCache,
) -> AppState {
    let (queue, receiver) = ClickQueue::new(1024);
    let recorder = Arc::new(ClickRecorder::new(links.clone(), clicks.clone()));
    tokio::spawn(run_click_worker(receiver, recorder, 4));
    AppState::new(links, clicks, cache, HOME_URL, queue)
}

/// State whose click queue is never drained.
pub fn create_stalled_state(
    links: Arc<InMemoryLinkRepository>,
    clicks: Arc<InMemoryClickRepository>,
    capacity: usize,
) -> (AppState, mpsc::Receiver<ClickJob>) {
    let (queue, receiver) = ClickQueue::new(capacity);
    (AppState::new(links, clicks, uncached(), HOME_URL, queue), receiver)
}

/// Full application router with a fixed peer address.
pub fn create_test_app(state: AppState) -> Router {
    app_router(state).layer(MockConnectInfoLayer)
}

/// Polls `condition` until it holds or two seconds pass.
pub async fn wait_until(condition: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
