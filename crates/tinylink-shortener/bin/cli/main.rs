mod cli;

use crate::cli::{CacheBackendArg, Command, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use tinylink_cache::{MokaUrlCache, RedisUrlCache};
use tinylink_core::{Repository, UrlCache};
use tinylink_shortener::{
    GeneratorSettings, RandomGenerator, ShortCode, ShortenParams, Shortener, ShortenerError,
    ShortenerService, ShortenerSettings,
};
use tinylink_storage::{InMemoryRepository, MySqlRepository};
use tracing::info;

/// Creation time as shown to users, in UTC.
const CREATED_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    tinylink_telemetry::init(config.log_format).context("failed to initialise logging")?;

    info!(
        storage_backend = %config.storage,
        cache_backend = %config.cache,
        code_length = config.code_length,
        "starting tinylink"
    );

    match config.storage {
        StorageBackendArg::InMemory => with_cache(InMemoryRepository::new(), config).await,
        StorageBackendArg::Mysql => {
            let dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(dsn)
                .await
                .context("failed to connect to mysql")?;
            repository
                .ensure_schema()
                .await
                .context("failed to create schema")?;
            with_cache(repository, config).await
        }
    }
}

async fn with_cache<R: Repository>(repository: R, config: CLI) -> anyhow::Result<()> {
    match config.cache {
        CacheBackendArg::Moka => run(repository, MokaUrlCache::new(), config).await,
        CacheBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("redis url is required when cache backend is redis")?;
            let cache = RedisUrlCache::connect(redis_url)
                .await
                .context("failed to connect to redis")?;
            run(repository, cache, config).await
        }
    }
}

async fn run<R: Repository, C: UrlCache>(
    repository: R,
    cache: C,
    config: CLI,
) -> anyhow::Result<()> {
    let generator = RandomGenerator::new(
        GeneratorSettings::builder()
            .length(config.code_length)
            .build(),
    )
    .context("invalid code generator settings")?;

    let settings = ShortenerSettings::builder()
        .max_attempts(config.max_attempts)
        .cache_ttl(Duration::from_secs(config.cache_ttl_secs))
        .build();

    let service = ShortenerService::new(repository, cache, generator, settings);

    match config.command {
        Command::Shorten { url, custom_code } => {
            let params = ShortenParams {
                original_url: url,
                custom_code,
            };
            let mapping = service.create_short_url(params).await?;

            println!("id:        {}", mapping.id.unwrap_or_default());
            println!("short url: {}", mapping.short_url(&config.base_url));
            println!("target:    {}", mapping.original_url);
            println!("created:   {}", created_date(&mapping.created_at));
        }
        Command::Resolve { code } => {
            let code = ShortCode::new(code)?;

            match service.resolve(&code).await {
                Ok(mapping) => println!("{}", mapping.redirect_url()),
                Err(ShortenerError::NotFound(code)) => {
                    anyhow::bail!("short code not found: {code}")
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn created_date(created_at: &jiff::Timestamp) -> String {
    created_at.strftime(CREATED_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_date_uses_slash_separated_utc() {
        let created_at: jiff::Timestamp = "2024-03-05T07:08:09Z".parse().unwrap();
        assert_eq!(created_date(&created_at), "2024/03/05 07:08:09");
    }
}
