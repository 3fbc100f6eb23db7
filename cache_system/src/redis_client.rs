//! Valkey client backed by the `redis` crate
//!
//! Valkey speaks the Redis protocol, so the production client is a thin
//! wrapper over a multiplexed `redis` connection.

use crate::client::ValkeyClient;
use crate::errors::ClientError;
use async_trait::async_trait;
use config::ValkeyConfig;
use redis::{AsyncCommands, Client};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Production [`ValkeyClient`]
#[derive(Clone)]
pub struct RedisClient {
    client: Arc<Client>,
    connection_timeout: Duration,
    connection: Arc<RwLock<Option<redis::aio::MultiplexedConnection>>>,
}

impl Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let connection_status = match self.connection.try_read() {
            Ok(connection) => {
                if connection.is_some() {
                    "connected"
                } else {
                    "no_connection"
                }
            }
            Err(_) => "lock_error",
        };

        f.debug_struct("RedisClient")
            .field("connection_timeout", &self.connection_timeout)
            .field("connected", &connection_status)
            .finish()
    }
}

impl RedisClient {
    /// Create a client from configuration. No connection is opened until the
    /// first command.
    pub fn new(config: &ValkeyConfig) -> Result<Self, ClientError> {
        let client = Client::open(config.url.as_str())?;

        Ok(Self {
            client: Arc::new(client),
            connection_timeout: config.connection_timeout(),
            connection: Arc::new(RwLock::new(None)),
        })
    }

    /// Get or create the shared multiplexed connection
    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, ClientError> {
        if let Some(connection) = self.connection.read().await.as_ref() {
            return Ok(connection.clone());
        }

        let mut slot = self.connection.write().await;

        if slot.is_none() {
            let connection = tokio::time::timeout(
                self.connection_timeout,
                self.client.get_multiplexed_async_connection(),
            )
            .await
            .map_err(|_| ClientError::Timeout(self.connection_timeout))??;
            *slot = Some(connection);
        }

        slot.as_ref()
            .cloned()
            .ok_or_else(|| ClientError::command("Failed to get connection from pool"))
    }

    /// Drop the cached connection so the next command opens a new one
    async fn reset_connection(&self) {
        *self.connection.write().await = None;
    }

    /// Pass a command result through, forgetting the connection if it is gone
    async fn observe<T>(&self, result: redis::RedisResult<T>) -> Result<T, ClientError> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                if is_connection_lost(&err) {
                    tracing::warn!(error = %err, "valkey connection lost, reconnecting on next command");
                    self.reset_connection().await;
                }
                Err(err.into())
            }
        }
    }

    /// Ping the server to check connectivity
    pub async fn ping(&self) -> Result<String, ClientError> {
        let mut conn = self.get_connection().await?;

        let result = redis::cmd("PING").query_async(&mut conn).await;
        self.observe(result).await
    }
}

fn is_connection_lost(err: &redis::RedisError) -> bool {
    err.is_connection_dropped() || err.is_io_error() || err.is_unrecoverable_error()
}

/// Milliseconds for PX/PEXPIRE, never rounding a non-zero duration down to zero
fn as_millis_at_least_one(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX).max(1)
}

/// PTTL reply as a duration. -1 (no expiration) and -2 (missing key) both
/// report as zero.
fn pttl_to_duration(millis: i64) -> Duration {
    u64::try_from(millis)
        .map(Duration::from_millis)
        .unwrap_or(Duration::ZERO)
}

/// Expiration option for SET: whole seconds as EX, anything finer as PX,
/// zero as no option at all
fn expiration_args(expiration: Duration) -> Option<(&'static str, u64)> {
    if expiration.is_zero() {
        None
    } else if expiration.subsec_nanos() == 0 {
        Some(("EX", expiration.as_secs()))
    } else {
        Some(("PX", as_millis_at_least_one(expiration)))
    }
}

fn set_command(key: &str, value: &str, expiration: Duration) -> redis::Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(value);
    if let Some((option, amount)) = expiration_args(expiration) {
        cmd.arg(option).arg(amount);
    }
    cmd
}

/// PEXPIRE argument. Zero expires the key immediately.
fn pexpire_millis(expiration: Duration) -> u64 {
    if expiration.is_zero() {
        0
    } else {
        as_millis_at_least_one(expiration)
    }
}

#[async_trait]
impl ValkeyClient for RedisClient {
    async fn get(&self, key: &str) -> Result<String, ClientError> {
        let mut conn = self.get_connection().await?;

        let result: redis::RedisResult<Option<String>> = conn.get(key).await;
        self.observe(result).await?.ok_or(ClientError::Nil)
    }

    async fn ttl(&self, key: &str) -> Result<Duration, ClientError> {
        let mut conn = self.get_connection().await?;

        let result: redis::RedisResult<i64> = conn.pttl(key).await;
        Ok(pttl_to_duration(self.observe(result).await?))
    }

    async fn expire(&self, key: &str, expiration: Duration) -> Result<bool, ClientError> {
        let mut conn = self.get_connection().await?;

        let result: redis::RedisResult<bool> = redis::cmd("PEXPIRE")
            .arg(key)
            .arg(pexpire_millis(expiration))
            .query_async(&mut conn)
            .await;
        self.observe(result).await
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        expiration: Duration,
    ) -> Result<String, ClientError> {
        let mut conn = self.get_connection().await?;

        let result: redis::RedisResult<String> = set_command(key, value, expiration)
            .query_async(&mut conn)
            .await;
        self.observe(result).await
    }

    async fn del(&self, keys: &[&str]) -> Result<i64, ClientError> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_connection().await?;

        let result: redis::RedisResult<i64> = conn.del(keys.to_vec()).await;
        self.observe(result).await
    }

    async fn flush_all(&self) -> Result<String, ClientError> {
        let mut conn = self.get_connection().await?;

        let result: redis::RedisResult<String> =
            redis::cmd("FLUSHALL").query_async(&mut conn).await;
        self.observe(result).await
    }

    async fn sadd(&self, key: &str, members: &[&str]) -> Result<i64, ClientError> {
        let mut conn = self.get_connection().await?;

        let result: redis::RedisResult<i64> = conn.sadd(key, members.to_vec()).await;
        self.observe(result).await
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, ClientError> {
        let mut conn = self.get_connection().await?;

        let result: redis::RedisResult<Vec<String>> = conn.smembers(key).await;
        self.observe(result).await
    }
}
