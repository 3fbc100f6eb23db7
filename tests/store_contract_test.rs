//! Store contract tests
//!
//! Drive the Valkey store through the `StoreInterface` trait object, the way
//! a cache owning it would, with the in-memory client standing in for a server.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use valkey_store::cache_system::testing::{Call, Command, MockValkeyClient};
use valkey_store::prelude::*;

fn setup(defaults: Options) -> (Arc<MockValkeyClient>, Arc<dyn StoreInterface>) {
    let client = Arc::new(MockValkeyClient::new());
    let store: Arc<dyn StoreInterface> = Arc::new(ValkeyStore::new(client.clone(), defaults));
    (client, store)
}

#[tokio::test]
async fn test_absent_keys_are_not_found() {
    let (_client, store) = setup(Options::new());

    assert!(store.get("missing").await.unwrap_err().is_not_found());
    assert!(store.get_with_ttl("missing").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_present_key_round_trips_with_ttl() {
    let (_client, store) = setup(Options::new().with_expiration(Duration::from_secs(30)));

    store
        .set("session:1", "token".to_string(), Options::new())
        .await
        .unwrap();

    assert_eq!(store.get("session:1").await.unwrap(), "token");
    let (value, ttl) = store.get_with_ttl("session:1").await.unwrap();
    assert_eq!(value, "token");
    assert_eq!(ttl, Duration::from_secs(30));
}

#[tokio::test]
async fn test_override_expiration_applies_to_one_call_only() {
    let (client, store) = setup(Options::new().with_expiration(Duration::from_secs(6)));

    store
        .set(
            "a",
            "1".to_string(),
            Options::new().with_expiration(Duration::from_secs(5)),
        )
        .await
        .unwrap();
    store.set("b", "2".to_string(), Options::new()).await.unwrap();

    assert_eq!(client.expiration_of("a"), Some(Duration::from_secs(5)));
    assert_eq!(client.expiration_of("b"), Some(Duration::from_secs(6)));
}

#[tokio::test]
async fn test_tags_index_key_in_every_tag_set() {
    let (client, store) = setup(Options::new());

    store
        .set(
            "K",
            "v".to_string(),
            Options::new().with_tags(["t1", "t2"]),
        )
        .await
        .unwrap();

    for tag_set in ["gocache_tag_t1", "gocache_tag_t2"] {
        assert_eq!(client.members_of(tag_set), vec!["K".to_string()]);
        assert_eq!(
            client.expiration_of(tag_set),
            Some(Duration::from_secs(720 * 3600))
        );
    }
}

#[tokio::test]
async fn test_invalidate_tag_removes_tagged_entries_only() {
    let (client, store) = setup(Options::new());

    store
        .set("post:1", "a".to_string(), Options::new().with_tag("posts"))
        .await
        .unwrap();
    store
        .set("post:2", "b".to_string(), Options::new().with_tag("posts"))
        .await
        .unwrap();
    store
        .set("user:1", "c".to_string(), Options::new().with_tag("users"))
        .await
        .unwrap();

    store
        .invalidate(InvalidateOptions::new().with_tag("posts"))
        .await
        .unwrap();

    assert!(store.get("post:1").await.unwrap_err().is_not_found());
    assert!(store.get("post:2").await.unwrap_err().is_not_found());
    assert_eq!(store.get("user:1").await.unwrap(), "c");
    assert!(!client.contains("gocache_tag_posts"));
    assert!(client.contains("gocache_tag_users"));
}

#[tokio::test]
async fn test_stale_tag_members_do_not_fail_invalidation() {
    let (client, store) = setup(Options::new());

    // The key expired from the main keyspace but is still listed under its tag
    client.insert_members("gocache_tag_t1", ["gone"]);

    store
        .invalidate(InvalidateOptions::new().with_tag("t1"))
        .await
        .unwrap();

    assert!(!client.contains("gocache_tag_t1"));
}

#[tokio::test]
async fn test_clear_error_message_is_unchanged() {
    let (client, store) = setup(Options::new());
    client.fail_on(Command::FlushAll, "flush error");

    let err = store.clear().await.unwrap_err();

    assert_eq!(err.to_string(), "flush error");
    assert_eq!(client.calls(), vec![Call::FlushAll]);
}

#[tokio::test]
async fn test_get_type_is_fixed() {
    let (client, store) = setup(Options::new());
    assert_eq!(store.get_type(), VALKEY_TYPE);

    client.fail_on(Command::Get, "down");
    assert_eq!(store.get_type(), "valkey");
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    karma: i64,
}

#[tokio::test]
async fn test_marshaler_over_valkey_store() {
    let client = Arc::new(MockValkeyClient::new());
    let cache = ValkeyCache::with_client(client.clone(), &StoreConfig::new(0, vec![]));
    let marshaler = cache.marshaler();

    let profile = Profile {
        name: "ada".to_string(),
        karma: 7,
    };
    marshaler
        .set("profile:ada", &profile, Options::new().with_tag("profiles"))
        .await
        .unwrap();

    assert_eq!(
        client.value_of("profile:ada"),
        Some(r#"{"name":"ada","karma":7}"#.to_string())
    );
    assert_eq!(marshaler.get::<Profile>("profile:ada").await.unwrap(), profile);

    marshaler
        .invalidate(InvalidateOptions::new().with_tag("profiles"))
        .await
        .unwrap();
    assert!(marshaler
        .get::<Profile>("profile:ada")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_concurrent_writers_share_one_store() {
    let (client, store) = setup(Options::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .set(&format!("k{}", i), i.to_string(), Options::new().with_tag("all"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(client.members_of("gocache_tag_all").len(), 8);
}
