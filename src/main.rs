use anyhow::Result;
use hotels::config::{ServiceConfig, StorageBackend};
use hotels::server::ServerBuilder;
use hotels::storage::{InMemoryStore, SeedData};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let seed = match &config.storage.seed_file {
        Some(path) => Some(SeedData::from_yaml_file(path)?),
        None => None,
    };

    let builder = ServerBuilder::new()
        .with_error_mapping(config.errors.mapping)
        .with_cors(config.server.cors);

    let builder = match config.storage.backend {
        StorageBackend::InMemory => {
            let store = InMemoryStore::new();
            if let Some(seed) = seed {
                store.load_seed(seed)?;
            }
            tracing::info!("Using in-memory storage");
            builder.with_store(Arc::new(store))
        }
        StorageBackend::Postgres => postgres_store(&config, seed, builder).await?,
    };

    builder.serve(&config.bind_addr()).await
}

#[cfg(feature = "postgres")]
async fn postgres_store(
    config: &ServiceConfig,
    seed: Option<SeedData>,
    builder: ServerBuilder,
) -> Result<ServerBuilder> {
    use hotels::storage::PostgresStore;
    use hotels::storage::postgres::ensure_schema;

    let url = config
        .storage
        .url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("storage.url (or DATABASE_URL) is required for postgres"))?;

    let store = PostgresStore::connect(url, config.storage.max_connections).await?;
    ensure_schema(store.pool()).await?;
    if let Some(seed) = seed {
        store.load_seed(&seed).await?;
    }

    tracing::info!("Using PostgreSQL storage");
    Ok(builder.with_store(Arc::new(store)))
}

#[cfg(not(feature = "postgres"))]
async fn postgres_store(
    _config: &ServiceConfig,
    _seed: Option<SeedData>,
    _builder: ServerBuilder,
) -> Result<ServerBuilder> {
    anyhow::bail!("postgres storage requires building with the `postgres` feature")
}
