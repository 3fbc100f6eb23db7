//! Tag-based invalidation
//!
//! Writes a few entries under overlapping tags, invalidates one tag and shows
//! which entries survive. Set `VALKEY_URL` to point at the server.

use std::time::Duration;
use valkey_store::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let url = std::env::var("VALKEY_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let config = AppConfig {
        valkey: ValkeyConfig::new(url, 3000),
        store: StoreConfig::new(300, vec![]),
    };
    let cache = ValkeyCache::new(config).await?;
    let store = cache.store();

    let entries = [
        ("product:1", "keyboard", vec!["products", "electronics"]),
        ("product:2", "desk", vec!["products", "furniture"]),
        ("category:electronics", "Electronics", vec!["electronics"]),
    ];

    for (key, value, tags) in entries.iter() {
        store
            .set(
                key,
                value.to_string(),
                Options::new()
                    .with_expiration(Duration::from_secs(600))
                    .with_tags(tags.iter().copied()),
            )
            .await?;
        println!("stored {} with tags {:?}", key, tags);
    }

    store
        .invalidate(InvalidateOptions::new().with_tag("electronics"))
        .await?;
    println!("invalidated tag 'electronics'");

    for (key, _, _) in entries.iter() {
        match store.get(key).await {
            Ok(value) => println!("  {} -> {}", key, value),
            Err(err) if err.is_not_found() => println!("  {} -> (gone)", key),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
