//! Basic caching with the Valkey store
//!
//! Needs a Valkey (or Redis) server. Configuration comes from the file named
//! by `VALKEY_STORE_CONFIG`, or `./valkey_store.toml`.
//!
//! ```sh
//! cargo run --example caching_basic --features debug-logging
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use valkey_store::prelude::*;

#[derive(Debug, Serialize, Deserialize)]
struct Article {
    id: u32,
    title: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let cache = ValkeyCache::from_env().await?;
    let store = cache.store();
    println!("Connected to {} store", store.get_type());

    store
        .set("greeting", "hello".to_string(), Options::new())
        .await?;
    let (greeting, ttl) = store.get_with_ttl("greeting").await?;
    println!("greeting = {} (expires in {:?})", greeting, ttl);

    let articles = cache.marshaler();
    let article = Article {
        id: 1,
        title: "Valkey in practice".to_string(),
    };
    articles
        .set(
            "article:1",
            &article,
            Options::new().with_expiration(Duration::from_secs(30)),
        )
        .await?;
    let cached: Article = articles.get("article:1").await?;
    println!("cached article: {:?}", cached);

    store.delete("greeting").await?;
    match store.get("greeting").await {
        Err(err) if err.is_not_found() => println!("greeting deleted"),
        other => println!("unexpected: {:?}", other),
    }

    Ok(())
}
