//! Listener binding and the sequential accept loop.
//!
//! [`serve`] alternates between two modes:
//!
//! - **Idle**: no client is connected.  The loop races `accept()` against
//!   the device and discards whatever the reader types, so tags swiped
//!   while nobody is listening are never replayed to the next client.
//! - **Serving**: one accepted client owns the device until its
//!   [`Session`] reaches `Closing`.  Further connections wait in the
//!   kernel backlog.
//!
//! Only a device failure that is not session-scoped ends the loop.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket};
use tracing::{debug, error, info, warn};

use super::NetworkError;
use crate::application::Session;
use crate::domain::ServerConfig;
use crate::infrastructure::input_device::{DeviceError, KeySource};

/// Pending connections allowed while a session is active.
const LISTEN_BACKLOG: u32 = 1;

// ── Public API ────────────────────────────────────────────────────────────────

/// Binds a listening socket on `addr` with address reuse enabled.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// [`NetworkError::Socket`] if the socket cannot be created or configured,
/// [`NetworkError::BindFailed`] if the address is in use or not permitted.
pub fn bind_listener(addr: SocketAddr) -> Result<TcpListener, NetworkError> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(NetworkError::Socket)?;

    socket.set_reuseaddr(true).map_err(NetworkError::Socket)?;
    socket
        .bind(addr)
        .map_err(|source| NetworkError::BindFailed { addr, source })?;
    socket
        .listen(LISTEN_BACKLOG)
        .map_err(|source| NetworkError::BindFailed { addr, source })
}

/// Serves clients one after another until the device fails.
///
/// # Errors
///
/// Returns the first device error that cannot be confined to one session.
/// Accept errors are logged and the loop continues.
pub async fn serve<S>(
    listener: &TcpListener,
    source: &mut S,
    config: &ServerConfig,
) -> Result<(), DeviceError>
where
    S: KeySource + ?Sized,
{
    loop {
        // Both branches are cancel-safe: `accept` keeps pending connections
        // in the kernel backlog, and `KeySource::next_event` loses nothing
        // when dropped.  Whichever branch loses is simply polled again on
        // the next iteration.
        let accepted = tokio::select! {
            accepted = listener.accept() => accepted,
            event = source.next_event() => {
                // Nobody is listening: the event is read and thrown away so
                // stale swipes never reach the next client.  A malformed read
                // only matters to a session, so it is logged and ignored.
                match event {
                    Ok(event) => debug!("no client connected; discarding {event:?}"),
                    Err(e) if e.is_session_fatal() => warn!("discarding device read: {e}"),
                    Err(e) => return Err(e),
                }
                continue;
            }
        };

        let (mut stream, peer_addr) = match accepted {
            Ok(pair) => pair,
            Err(e) => {
                error!("accept error: {e}");
                continue;
            }
        };

        info!("client connected: {peer_addr}");
        if let Err(e) = stream.set_nodelay(true) {
            debug!("could not set TCP_NODELAY for {peer_addr}: {e}");
        }

        // A fresh session per client: new assembler, new liveness window.
        // `?` propagates only process-fatal device errors.
        let report = Session::new(config).run(source, &mut stream).await?;
        info!(
            "client {peer_addr} disconnected ({}); {} identifiers, {} heartbeats sent",
            report.end, report.identifiers_sent, report.heartbeats_sent
        );
        // Dropping the stream closes the client socket; the device stays open.
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
