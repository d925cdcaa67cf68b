//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::task::JoinHandle;
use verthandi::config::VerthandiConfig;
use verthandi::net::{BindTarget, BoundListener};
use verthandi::{HttpServer, Shutdown, SqliteStore};

/// Rows used by the end-to-end scenarios.
pub const SEED: &str = "
    INSERT INTO projects (id, name) VALUES (7, 'Launch');
    INSERT INTO projects (id, name, urgency) VALUES (8, 'Launch', 3);
    INSERT INTO projects (id, name, urgency, importance) VALUES (9, 'Ranked', 3, 5);
    INSERT INTO projects (id, name, description) VALUES (10, 'Described', 'Body text');
    INSERT INTO projects (id, name, description) VALUES (11, 'Blank', '');
    INSERT INTO projects (id, name) VALUES (12, 'Tom & Jerry''s <show>');
    INSERT INTO tasks (id, title) VALUES (2, 'Write spec');
";

pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, resource: &str) -> String {
        format!("http://{}{}", self.addr, resource)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

/// Seeded in-memory store.
pub fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.execute_batch(SEED).unwrap();
    store
}

/// Start the real server on an ephemeral TCP port.
pub async fn start_server(store: SqliteStore) -> TestServer {
    let listener = BoundListener::bind(&BindTarget::parse("127.0.0.1:0"))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(VerthandiConfig::default(), Arc::new(store));
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// A path under the system temp dir that no other test uses.
pub fn unique_temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("verthandi-{}-{nanos}-{name}", std::process::id()))
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
