//! Listener binding.
//!
//! # Responsibilities
//! - Interpret the configured bind string as a TCP address or a Unix
//!   domain socket path
//! - Bind the listener and report the local address
//! - Remove the socket file once serving ends

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use tokio::net::TcpListener;
#[cfg(unix)]
use tokio::net::UnixListener;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind {target}: {source}")]
    Bind {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Unix sockets requested on a platform without them.
    #[error("Unix domain sockets are not supported on this platform: {0}")]
    Unsupported(String),
}

/// Where to listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindTarget {
    Tcp(SocketAddr),
    /// `host:port` with a name to resolve at bind time.
    TcpHost(String),
    Unix(PathBuf),
}

impl BindTarget {
    /// A socket address or `host:port` becomes TCP. Anything containing a
    /// `/`, or without a numeric port suffix, is taken as a socket path.
    pub fn parse(bind: &str) -> Self {
        if let Ok(addr) = bind.parse::<SocketAddr>() {
            return BindTarget::Tcp(addr);
        }
        if !bind.contains('/') && has_port_suffix(bind) {
            return BindTarget::TcpHost(bind.to_string());
        }
        BindTarget::Unix(PathBuf::from(bind))
    }
}

fn has_port_suffix(bind: &str) -> bool {
    match bind.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

impl fmt::Display for BindTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindTarget::Tcp(addr) => write!(f, "{addr}"),
            BindTarget::TcpHost(host) => f.write_str(host),
            BindTarget::Unix(path) => write!(f, "unix:{}", path.display()),
        }
    }
}

/// A bound listener of either transport.
#[derive(Debug)]
pub enum BoundListener {
    Tcp(TcpListener),
    #[cfg(unix)]
    Unix { listener: UnixListener, path: PathBuf },
}

impl BoundListener {
    pub async fn bind(target: &BindTarget) -> Result<Self, ListenerError> {
        let bind_error = |source: std::io::Error| ListenerError::Bind {
            target: target.to_string(),
            source,
        };

        let bound = match target {
            BindTarget::Tcp(addr) => {
                BoundListener::Tcp(TcpListener::bind(*addr).await.map_err(bind_error)?)
            }
            BindTarget::TcpHost(host) => {
                BoundListener::Tcp(TcpListener::bind(host.as_str()).await.map_err(bind_error)?)
            }
            #[cfg(unix)]
            BindTarget::Unix(path) => BoundListener::Unix {
                listener: UnixListener::bind(path).map_err(bind_error)?,
                path: path.clone(),
            },
            #[cfg(not(unix))]
            BindTarget::Unix(path) => {
                return Err(ListenerError::Unsupported(path.display().to_string()))
            }
        };

        tracing::info!(address = %bound.describe(), "Listener bound");
        Ok(bound)
    }

    /// The TCP address actually bound, e.g. after binding port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match self {
            BoundListener::Tcp(listener) => listener.local_addr().ok(),
            #[cfg(unix)]
            BoundListener::Unix { .. } => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            BoundListener::Tcp(listener) => match listener.local_addr() {
                Ok(addr) => addr.to_string(),
                Err(_) => "tcp:unknown".to_string(),
            },
            #[cfg(unix)]
            BoundListener::Unix { path, .. } => format!("unix:{}", path.display()),
        }
    }
}

/// Remove a Unix socket file left behind by a finished server.
#[cfg(unix)]
pub fn remove_socket_file(path: &std::path::Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove socket file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_target() {
        assert_eq!(
            BindTarget::parse("127.0.0.1:8080"),
            BindTarget::Tcp("127.0.0.1:8080".parse().unwrap())
        );
        assert_eq!(
            BindTarget::parse("[::1]:80"),
            BindTarget::Tcp("[::1]:80".parse().unwrap())
        );
        assert_eq!(
            BindTarget::parse("/run/verthandi.sock"),
            BindTarget::Unix(PathBuf::from("/run/verthandi.sock"))
        );
    }

    #[test]
    fn test_host_port_is_tcp() {
        assert_eq!(
            BindTarget::parse("localhost:8080"),
            BindTarget::TcpHost("localhost:8080".to_string())
        );
        assert_eq!(
            BindTarget::parse("verthandi.local:80"),
            BindTarget::TcpHost("verthandi.local:80".to_string())
        );
    }

    #[test]
    fn test_socket_paths() {
        assert_eq!(
            BindTarget::parse("verthandi.sock"),
            BindTarget::Unix(PathBuf::from("verthandi.sock"))
        );
        assert_eq!(
            BindTarget::parse("./run/a:80"),
            BindTarget::Unix(PathBuf::from("./run/a:80"))
        );
        assert_eq!(
            BindTarget::parse("host:port"),
            BindTarget::Unix(PathBuf::from("host:port"))
        );
        assert_eq!(
            BindTarget::parse(":8080"),
            BindTarget::Unix(PathBuf::from(":8080"))
        );
    }

    #[tokio::test]
    async fn test_bind_resolves_host_name() {
        let target = BindTarget::parse("localhost:0");
        let listener = BoundListener::bind(&target).await.unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(BindTarget::parse("/tmp/v.sock").to_string(), "unix:/tmp/v.sock");
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let target = BindTarget::parse("127.0.0.1:0");
        let listener = BoundListener::bind(&target).await.unwrap();
        let addr = listener.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }
}
