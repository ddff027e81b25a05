mod common;

use common::{InMemoryLinkRepository, MemoryCache, link_cache, standard_link, uncached};
use link_redirector::application::services::{LinkResolver, LinkService};
use link_redirector::infrastructure::cache::LinkCache;
use std::sync::Arc;

fn repo_with_abc() -> Arc<InMemoryLinkRepository> {
    Arc::new(InMemoryLinkRepository::with_links([standard_link(
        1,
        "abc",
        "https://example.com/a",
    )]))
}

#[tokio::test]
async fn test_second_resolve_is_served_from_cache() {
    let links = repo_with_abc();
    let resolver = LinkResolver::new(links.clone(), link_cache(Arc::new(MemoryCache::default())));

    let first = resolver.resolve("abc").await.unwrap();
    let second = resolver.resolve("abc").await.unwrap();

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(links.find_calls(), 1);
}

#[tokio::test]
async fn test_misses_are_not_cached() {
    let links = repo_with_abc();
    let resolver = LinkResolver::new(links.clone(), link_cache(Arc::new(MemoryCache::default())));

    assert!(resolver.resolve("missing").await.unwrap().is_none());
    assert!(resolver.resolve("missing").await.unwrap().is_none());

    assert_eq!(links.find_calls(), 2);
}

#[tokio::test]
async fn test_without_cache_every_resolve_reads_database() {
    let links = repo_with_abc();
    let resolver = LinkResolver::new(links.clone(), uncached());

    for _ in 0..5 {
        let link = resolver.resolve("abc").await.unwrap();
        assert_eq!(link.unwrap().destination_url, "https://example.com/a");
    }

    assert_eq!(links.find_calls(), 5);
}

#[tokio::test]
async fn test_broken_cache_degrades_to_database() {
    let links = repo_with_abc();
    let resolver = LinkResolver::new(links.clone(), link_cache(Arc::new(MemoryCache::broken())));

    for _ in 0..3 {
        assert!(resolver.resolve("abc").await.unwrap().is_some());
    }

    assert_eq!(links.find_calls(), 3);
}

#[tokio::test]
async fn test_undecodable_entry_is_treated_as_miss_and_dropped() {
    let links = repo_with_abc();
    let backend = Arc::new(MemoryCache::default());
    backend.put_raw(&LinkCache::link_key("abc"), "{not json");
    let resolver = LinkResolver::new(links.clone(), link_cache(backend.clone()));

    let link = resolver.resolve("abc").await.unwrap();

    assert_eq!(link.unwrap().id, 1);
    assert_eq!(links.find_calls(), 1);
    let repaired = backend.raw(&LinkCache::link_key("abc")).unwrap();
    assert!(repaired.contains("https://example.com/a"));
}

#[tokio::test]
async fn test_update_invalidates_cached_link() {
    let links = repo_with_abc();
    let cache = link_cache(Arc::new(MemoryCache::default()));
    let resolver = LinkResolver::new(links.clone(), cache.clone());
    let service = LinkService::new(links.clone(), cache);

    resolver.resolve("abc").await.unwrap();
    resolver.resolve_metadata("abc").await.unwrap();
    service
        .update_destination("abc", "https://example.com/b")
        .await
        .unwrap();

    let link = resolver.resolve("abc").await.unwrap().unwrap();
    assert_eq!(link.destination_url, "https://example.com/b");
}

#[tokio::test]
async fn test_delete_invalidates_cached_link() {
    let links = repo_with_abc();
    let cache = link_cache(Arc::new(MemoryCache::default()));
    let resolver = LinkResolver::new(links.clone(), cache.clone());
    let service = LinkService::new(links.clone(), cache);

    resolver.resolve("abc").await.unwrap();
    service.delete("abc").await.unwrap();

    assert!(resolver.resolve("abc").await.unwrap().is_none());
}

#[tokio::test]
async fn test_metadata_reuses_cached_link() {
    let links = repo_with_abc();
    let resolver = LinkResolver::new(links.clone(), link_cache(Arc::new(MemoryCache::default())));

    resolver.resolve("abc").await.unwrap();
    let metadata = resolver.resolve_metadata("abc").await.unwrap();

    assert!(metadata.is_some());
    assert_eq!(links.find_calls(), 1);
}

#[tokio::test]
async fn test_cached_and_fresh_links_redirect_identically() {
    let links = repo_with_abc();
    let cached = LinkResolver::new(links.clone(), link_cache(Arc::new(MemoryCache::default())));
    let fresh = LinkResolver::new(links, uncached());

    cached.resolve("abc").await.unwrap();
    let from_cache = cached.resolve("abc").await.unwrap().unwrap();
    let from_db = fresh.resolve("abc").await.unwrap().unwrap();

    assert_eq!(from_cache.destination(), from_db.destination());
}
