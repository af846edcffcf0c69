//! Network infrastructure: the listening socket and the accept loop.
//!
//! The bridge serves one client at a time.  The listener is bound once at
//! startup with `SO_REUSEADDR` so a restarted bridge can reclaim port 9090
//! while old connections sit in `TIME_WAIT`.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

pub mod listener;

pub use listener::{bind_listener, serve};

/// Error type for socket setup.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("failed to create listening socket: {0}")]
    Socket(#[source] io::Error),
    #[error("failed to bind {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}
