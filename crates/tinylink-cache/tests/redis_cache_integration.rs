use std::time::Duration;

use redis::AsyncCommands;
use tinylink_cache::{RedisUrlCache, UrlCache};
use tinylink_core::ShortCode;
use tinylink_test_infra::redis::RedisServer;

const HOUR: Duration = Duration::from_secs(3600);

/// Test fixture that manages a Redis container using test-infra.
struct RedisTestContainer {
    redis: RedisServer,
}

impl RedisTestContainer {
    async fn start() -> Self {
        let redis = RedisServer::new().await.expect("Failed to start Redis");
        Self { redis }
    }

    async fn connection(&self) -> redis::aio::MultiplexedConnection {
        self.redis
            .connection()
            .await
            .expect("Failed to get Redis connection")
    }
}

#[tokio::test]
async fn get_and_set_round_trip() {
    let fixture = RedisTestContainer::start().await;
    let cache = RedisUrlCache::new(fixture.connection().await);
    let code = ShortCode::new("test1").unwrap();

    assert!(cache.get_url(&code).await.unwrap().is_none());

    cache.set_url(&code, "example.com", HOUR).await.unwrap();

    assert_eq!(
        cache.get_url(&code).await.unwrap().as_deref(),
        Some("example.com")
    );
}

#[tokio::test]
async fn entries_use_short_url_prefix_and_ttl() {
    let fixture = RedisTestContainer::start().await;
    let cache = RedisUrlCache::new(fixture.connection().await);
    let code = ShortCode::new("aB3dE").unwrap();

    cache.set_url(&code, "example.com/x", HOUR).await.unwrap();

    let mut conn = fixture.connection().await;
    let raw: Option<String> = conn.get("shortUrl:aB3dE").await.unwrap();
    assert_eq!(raw.as_deref(), Some("example.com/x"));

    let ttl: i64 = conn.ttl("shortUrl:aB3dE").await.unwrap();
    assert!(ttl > 3500 && ttl <= 3600, "unexpected ttl {ttl}");
}

#[tokio::test]
async fn contains_and_expire() {
    let fixture = RedisTestContainer::start().await;
    let cache = RedisUrlCache::new(fixture.connection().await);
    let code = ShortCode::new("exp12").unwrap();

    assert!(!cache.contains(&code).await.unwrap());
    assert!(!cache.expire(&code, HOUR).await.unwrap());

    cache
        .set_url(&code, "example.com", Duration::from_secs(10))
        .await
        .unwrap();
    assert!(cache.contains(&code).await.unwrap());
    assert!(cache.expire(&code, HOUR).await.unwrap());

    let mut conn = fixture.connection().await;
    let ttl: i64 = conn.ttl("shortUrl:exp12").await.unwrap();
    assert!(ttl > 10, "ttl was not refreshed: {ttl}");
}

#[tokio::test]
async fn entry_expires() {
    let fixture = RedisTestContainer::start().await;
    let cache = RedisUrlCache::new(fixture.connection().await);
    let code = ShortCode::new("gone1").unwrap();

    cache
        .set_url(&code, "example.com", Duration::from_secs(1))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2100)).await;

    assert!(cache.get_url(&code).await.unwrap().is_none());
}

#[tokio::test]
async fn custom_prefix_isolates_keys() {
    let fixture = RedisTestContainer::start().await;
    let staging = RedisUrlCache::with_prefix(fixture.connection().await, "staging:shortUrl:");
    let default = RedisUrlCache::new(fixture.connection().await);
    let code = ShortCode::new("iso12").unwrap();

    staging.set_url(&code, "staging.example", HOUR).await.unwrap();

    assert!(default.get_url(&code).await.unwrap().is_none());
    assert!(staging.contains(&code).await.unwrap());
}
