//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use runtime::{BroadcastPolicy, RuntimeConfig};

/// Configuration required to bootstrap the runtime and text clients.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub content_dir: PathBuf,
    pub runtime: RuntimeConfig,
    /// Number of text clients to register.
    pub clients: usize,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            runtime: RuntimeConfig::default(),
            clients: 1,
            log_dir: None,
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_CONTENT_DIR` - Data directory with `maps/` and `world.txt`
    ///   (default: `crates/game/content/data`)
    /// - `DUNGEON_BROADCAST_POLICY` - `block` or `drop` (default: block)
    /// - `DUNGEON_CLIENTS` - Number of text clients (default: 1)
    /// - `DUNGEON_CLIENT_BUFFER` - Frames buffered per client (default: 1)
    /// - `DUNGEON_INPUT_BUFFER` - Input queue size (default: 32)
    /// - `DUNGEON_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `DUNGEON_SESSION_ID` - Log session name (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("DUNGEON_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }

        if let Some(policy) = read_env::<BroadcastPolicy>("DUNGEON_BROADCAST_POLICY") {
            config.runtime.broadcast_policy = policy;
        }

        if let Some(clients) = read_env::<usize>("DUNGEON_CLIENTS") {
            config.clients = clients.max(1);
        }
        if let Some(buffer) = read_env::<usize>("DUNGEON_CLIENT_BUFFER") {
            config.runtime.client_buffer_size = buffer.max(1);
        }
        if let Some(buffer) = read_env::<usize>("DUNGEON_INPUT_BUFFER") {
            config.runtime.input_buffer_size = buffer.max(1);
        }

        config.log_dir = env::var("DUNGEON_LOG_DIR").ok().map(PathBuf::from);
        config.session_id = env::var("DUNGEON_SESSION_ID").ok();

        config
    }
}

fn default_content_dir() -> PathBuf {
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("crates/game/content/data")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
