//! In-memory test double for [`ValkeyClient`]
//!
//! [`MockValkeyClient`] keeps strings and sets in memory, records every
//! command it receives, and can be told to fail a given command so the
//! store's error paths can be exercised without a server.

use crate::client::ValkeyClient;
use crate::errors::ClientError;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Command kinds, used for failure injection and call counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Get,
    Ttl,
    Expire,
    Set,
    Del,
    FlushAll,
    SAdd,
    SMembers,
}

/// A recorded command with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get(String),
    Ttl(String),
    Expire { key: String, expiration: Duration },
    Set {
        key: String,
        value: String,
        expiration: Duration,
    },
    Del(Vec<String>),
    FlushAll,
    SAdd { key: String, members: Vec<String> },
    SMembers(String),
}

impl Call {
    pub fn command(&self) -> Command {
        match self {
            Call::Get(_) => Command::Get,
            Call::Ttl(_) => Command::Ttl,
            Call::Expire { .. } => Command::Expire,
            Call::Set { .. } => Command::Set,
            Call::Del(_) => Command::Del,
            Call::FlushAll => Command::FlushAll,
            Call::SAdd { .. } => Command::SAdd,
            Call::SMembers(_) => Command::SMembers,
        }
    }
}

#[derive(Debug, Clone)]
enum Entry {
    String(String),
    Set(BTreeSet<String>),
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    expirations: HashMap<String, Duration>,
    failures: HashMap<Command, String>,
    calls: Vec<Call>,
    skip_call_log: bool,
}

impl State {
    fn remove(&mut self, key: &str) -> bool {
        self.expirations.remove(key);
        self.entries.remove(key).is_some()
    }
}

/// In-memory [`ValkeyClient`]. Expirations are recorded, never enforced.
#[derive(Debug, Default)]
pub struct MockValkeyClient {
    state: Mutex<State>,
}

impl MockValkeyClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client that keeps data and injected failures but no call log, for
    /// long-running loops
    pub fn without_call_log() -> Self {
        let client = Self::default();
        client.state().skip_call_log = true;
        client
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A test that panicked while holding the lock must not hide the state from others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record `call`, then fail it if a failure was injected for its command
    fn record(&self, state: &mut State, call: Call) -> Result<(), ClientError> {
        let command = call.command();
        if !state.skip_call_log {
            state.calls.push(call);
        }
        match state.failures.get(&command) {
            Some(message) => Err(ClientError::command(message.clone())),
            None => Ok(()),
        }
    }

    /// Make every subsequent `command` fail with `message`
    pub fn fail_on(&self, command: Command, message: impl Into<String>) {
        self.state().failures.insert(command, message.into());
    }

    /// Stop failing `command`
    pub fn recover(&self, command: Command) {
        self.state().failures.remove(&command);
    }

    /// Seed a string value without recording a call
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut state = self.state();
        let key = key.into();
        state.expirations.remove(&key);
        state.entries.insert(key, Entry::String(value.into()));
    }

    /// Seed a string value with an expiration without recording a call
    pub fn insert_with_expiration(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        expiration: Duration,
    ) {
        let mut state = self.state();
        let key = key.into();
        state.expirations.insert(key.clone(), expiration);
        state.entries.insert(key, Entry::String(value.into()));
    }

    /// Seed a set without recording a call
    pub fn insert_members<I, S>(&self, key: impl Into<String>, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state().entries.insert(
            key.into(),
            Entry::Set(members.into_iter().map(Into::into).collect()),
        );
    }

    /// Every command received so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Number of times `command` was received
    pub fn count(&self, command: Command) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| call.command() == command)
            .count()
    }

    /// Forget recorded calls, keeping data and injected failures
    pub fn reset_calls(&self) {
        self.state().calls.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state().entries.contains_key(key)
    }

    /// String value stored under `key`
    pub fn value_of(&self, key: &str) -> Option<String> {
        match self.state().entries.get(key) {
            Some(Entry::String(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Members of the set stored under `key`, sorted
    pub fn members_of(&self, key: &str) -> Vec<String> {
        match self.state().entries.get(key) {
            Some(Entry::Set(members)) => members.iter().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Expiration last applied to `key`
    pub fn expiration_of(&self, key: &str) -> Option<Duration> {
        self.state().expirations.get(key).copied()
    }
}

fn wrong_type() -> ClientError {
    ClientError::command("WRONGTYPE Operation against a key holding the wrong kind of value")
}

#[async_trait]
impl ValkeyClient for MockValkeyClient {
    async fn get(&self, key: &str) -> Result<String, ClientError> {
        let mut state = self.state();
        self.record(&mut state, Call::Get(key.to_string()))?;

        match state.entries.get(key) {
            Some(Entry::String(value)) => Ok(value.clone()),
            Some(Entry::Set(_)) => Err(wrong_type()),
            None => Err(ClientError::Nil),
        }
    }

    async fn ttl(&self, key: &str) -> Result<Duration, ClientError> {
        let mut state = self.state();
        self.record(&mut state, Call::Ttl(key.to_string()))?;

        Ok(state
            .expirations
            .get(key)
            .copied()
            .unwrap_or(Duration::ZERO))
    }

    async fn expire(&self, key: &str, expiration: Duration) -> Result<bool, ClientError> {
        let mut state = self.state();
        self.record(
            &mut state,
            Call::Expire {
                key: key.to_string(),
                expiration,
            },
        )?;

        if !state.entries.contains_key(key) {
            return Ok(false);
        }
        state.expirations.insert(key.to_string(), expiration);
        Ok(true)
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        expiration: Duration,
    ) -> Result<String, ClientError> {
        let mut state = self.state();
        self.record(
            &mut state,
            Call::Set {
                key: key.to_string(),
                value: value.to_string(),
                expiration,
            },
        )?;

        state
            .entries
            .insert(key.to_string(), Entry::String(value.to_string()));
        if expiration.is_zero() {
            state.expirations.remove(key);
        } else {
            state.expirations.insert(key.to_string(), expiration);
        }
        Ok("OK".to_string())
    }

    async fn del(&self, keys: &[&str]) -> Result<i64, ClientError> {
        let mut state = self.state();
        self.record(
            &mut state,
            Call::Del(keys.iter().map(|key| key.to_string()).collect()),
        )?;

        let deleted = keys.iter().filter(|key| state.remove(key)).count();
        Ok(deleted as i64)
    }

    async fn flush_all(&self) -> Result<String, ClientError> {
        let mut state = self.state();
        self.record(&mut state, Call::FlushAll)?;

        state.entries.clear();
        state.expirations.clear();
        Ok("OK".to_string())
    }

    async fn sadd(&self, key: &str, members: &[&str]) -> Result<i64, ClientError> {
        let mut state = self.state();
        self.record(
            &mut state,
            Call::SAdd {
                key: key.to_string(),
                members: members.iter().map(|member| member.to_string()).collect(),
            },
        )?;

        let set = match state
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Set(BTreeSet::new()))
        {
            Entry::Set(set) => set,
            Entry::String(_) => return Err(wrong_type()),
        };
        let added = members
            .iter()
            .filter(|member| set.insert(member.to_string()))
            .count();
        Ok(added as i64)
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, ClientError> {
        let mut state = self.state();
        self.record(&mut state, Call::SMembers(key.to_string()))?;

        match state.entries.get(key) {
            Some(Entry::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(Entry::String(_)) => Err(wrong_type()),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_without_call_log_still_stores_and_fails() {
        let client = MockValkeyClient::without_call_log();

        client.set("k", "v", Duration::ZERO).await.unwrap();
        assert_eq!(client.get("k").await.unwrap(), "v");
        assert!(client.calls().is_empty());

        client.fail_on(Command::Get, "down");
        assert_eq!(client.get("k").await.unwrap_err().to_string(), "down");
    }

    #[tokio::test]
    async fn test_get_missing_key_is_nil() {
        let client = MockValkeyClient::new();
        assert!(client.get("missing").await.unwrap_err().is_nil());
    }

    #[tokio::test]
    async fn test_sadd_counts_only_new_members() {
        let client = MockValkeyClient::new();

        assert_eq!(client.sadd("s", &["a", "b"]).await.unwrap(), 2);
        assert_eq!(client.sadd("s", &["b", "c"]).await.unwrap(), 1);
        assert_eq!(client.members_of("s"), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_expire_on_missing_key_returns_false() {
        let client = MockValkeyClient::new();

        assert!(!client.expire("missing", Duration::from_secs(1)).await.unwrap());
        assert_eq!(client.expiration_of("missing"), None);
    }

    #[tokio::test]
    async fn test_injected_failure_is_recorded_and_recoverable() {
        let client = MockValkeyClient::new();
        client.fail_on(Command::FlushAll, "flush error");

        let err = client.flush_all().await.unwrap_err();
        assert_eq!(err.to_string(), "flush error");
        assert_eq!(client.calls(), vec![Call::FlushAll]);

        client.recover(Command::FlushAll);
        assert_eq!(client.flush_all().await.unwrap(), "OK");
    }

    #[tokio::test]
    async fn test_set_without_expiration_clears_previous_one() {
        let client = MockValkeyClient::new();
        client
            .set("k", "v1", Duration::from_secs(5))
            .await
            .unwrap();
        client.set("k", "v2", Duration::ZERO).await.unwrap();

        assert_eq!(client.value_of("k"), Some("v2".to_string()));
        assert_eq!(client.ttl("k").await.unwrap(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_string_and_set_types_do_not_mix() {
        let client = MockValkeyClient::new();
        client.insert("k", "v");

        assert!(client.sadd("k", &["m"]).await.is_err());
        assert!(client.smembers("k").await.is_err());
    }
}
