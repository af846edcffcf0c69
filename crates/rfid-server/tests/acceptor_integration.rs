//! Integration tests for the accept loop over real loopback sockets.
//!
//! Each test binds an ephemeral port, moves a scripted
//! [`MockKeySource`] into a spawned [`serve`] task, and talks to it with a
//! plain `TcpStream` the way a feed client would:
//!
//! ```text
//! test ──connect──▶ serve() ──Session──▶ MockKeySource (script)
//!      ◀──lines────
//! ```
//!
//! Real time is used because the sockets need a running reactor; heartbeat
//! windows are shortened to keep the tests fast.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use rfid_core::keymap::KEY_ENTER;
use rfid_server::domain::ServerConfig;
use rfid_server::infrastructure::input_device::mock::MockKeySource;
use rfid_server::infrastructure::{bind_listener, serve};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

const KEY_A: u16 = 30;
const KEY_B: u16 = 48;
const KEY_H: u16 = 35;
const KEY_I: u16 = 23;

/// Upper bound for any single line to arrive.
const READ_DEADLINE: Duration = Duration::from_secs(5);

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(heartbeat: Duration) -> ServerConfig {
    ServerConfig {
        bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
        heartbeat_timeout: heartbeat,
        ..ServerConfig::default()
    }
}

/// Starts `serve` on an ephemeral port and returns its address.
fn start_server(
    mut source: MockKeySource,
    config: ServerConfig,
) -> (SocketAddr, JoinHandle<()>) {
    let listener = bind_listener(config.bind_addr).expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        let _ = serve(&listener, &mut source, &config).await;
    });
    (addr, handle)
}

async fn connect(addr: SocketAddr) -> BufReader<TcpStream> {
    BufReader::new(TcpStream::connect(addr).await.expect("connect"))
}

async fn read_line(reader: &mut BufReader<TcpStream>) -> String {
    let mut line = String::new();
    timeout(READ_DEADLINE, reader.read_line(&mut line))
        .await
        .expect("line arrives before deadline")
        .expect("read succeeds");
    line
}

/// Reads lines until one is not a heartbeat.
async fn read_non_ping_line(reader: &mut BufReader<TcpStream>) -> String {
    loop {
        let line = read_line(reader).await;
        if line != "ping\n" {
            return line;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_client_receives_preamble_then_identifier() {
    // Arrange: the tag is typed shortly after the client connects
    let source = MockKeySource::new("ACME RFID Reader")
        .silence(Duration::from_millis(300))
        .type_keys(&[KEY_H, KEY_I, KEY_ENTER]);
    let (addr, server) = start_server(source, test_config(Duration::from_secs(10)));

    // Act
    let mut client = connect(addr).await;
    let preamble = read_line(&mut client).await;
    let identifier = read_line(&mut client).await;

    // Assert
    assert_eq!(preamble, "Reading from: ACME RFID Reader\n");
    assert_eq!(identifier, "hi\n");
    server.abort();
}

#[tokio::test]
async fn test_idle_device_produces_heartbeats() {
    let (addr, server) = start_server(
        MockKeySource::new("reader"),
        test_config(Duration::from_millis(100)),
    );

    let mut client = connect(addr).await;
    assert_eq!(read_line(&mut client).await, "Reading from: reader\n");

    assert_eq!(read_line(&mut client).await, "ping\n");
    assert_eq!(read_line(&mut client).await, "ping\n");
    server.abort();
}

#[tokio::test]
async fn test_next_client_gets_fresh_preamble_after_disconnect() {
    // Arrange: short heartbeats let the server notice the dropped client
    let (addr, server) = start_server(
        MockKeySource::new("reader"),
        test_config(Duration::from_millis(50)),
    );
    let mut first = connect(addr).await;
    assert_eq!(read_line(&mut first).await, "Reading from: reader\n");

    // Act
    drop(first);
    let mut second = connect(addr).await;

    // Assert
    assert_eq!(read_line(&mut second).await, "Reading from: reader\n");
    assert_eq!(read_line(&mut second).await, "ping\n");
    server.abort();
}

#[tokio::test]
async fn test_partial_tag_from_dropped_client_does_not_leak() {
    // Arrange: "h" is typed while the first client is connected, the client
    // goes away, and "i" + ENTER arrive only after the second client is on.
    let source = MockKeySource::new("r")
        .silence(Duration::from_millis(100))
        .tap(KEY_H)
        .silence(Duration::from_millis(600))
        .type_keys(&[KEY_I, KEY_ENTER]);
    let (addr, server) = start_server(source, test_config(Duration::from_millis(50)));
    let mut first = connect(addr).await;
    assert_eq!(read_line(&mut first).await, "Reading from: r\n");
    sleep(Duration::from_millis(150)).await;

    // Act
    drop(first);
    let mut second = connect(addr).await;
    let preamble = read_line(&mut second).await;
    let identifier = read_non_ping_line(&mut second).await;

    // Assert
    assert_eq!(preamble, "Reading from: r\n");
    assert_eq!(identifier, "i\n");
    server.abort();
}

#[tokio::test]
async fn test_session_closed_mid_tag_gives_next_client_empty_buffer() {
    use rfid_server::infrastructure::input_device::DeviceError;

    // Arrange: a malformed read ends the first session right after "h",
    // with no heartbeat in between to clear the buffer.
    let source = MockKeySource::new("r")
        .silence(Duration::from_millis(100))
        .tap(KEY_H)
        .fail(DeviceError::Malformed("short read".to_string()))
        .silence(Duration::from_millis(300))
        .type_keys(&[KEY_I, KEY_ENTER]);
    let (addr, server) = start_server(source, test_config(Duration::from_secs(10)));
    let mut first = connect(addr).await;
    assert_eq!(read_line(&mut first).await, "Reading from: r\n");
    assert_eq!(read_line(&mut first).await, "", "server closes the first session");

    // Act
    let mut second = connect(addr).await;
    let preamble = read_line(&mut second).await;
    let identifier = read_line(&mut second).await;

    // Assert: "h" belonged to the first session only
    assert_eq!(preamble, "Reading from: r\n");
    assert_eq!(identifier, "i\n");
    server.abort();
}

#[tokio::test]
async fn test_tags_read_with_no_client_are_discarded() {
    // Arrange: "a" is swiped before anyone connects, "b" afterwards
    let source = MockKeySource::new("reader")
        .type_keys(&[KEY_A, KEY_ENTER])
        .silence(Duration::from_millis(400))
        .type_keys(&[KEY_B, KEY_ENTER]);
    let (addr, server) = start_server(source, test_config(Duration::from_secs(10)));
    sleep(Duration::from_millis(100)).await;

    // Act
    let mut client = connect(addr).await;
    let preamble = read_line(&mut client).await;
    let first_line = read_line(&mut client).await;

    // Assert
    assert_eq!(preamble, "Reading from: reader\n");
    assert_eq!(first_line, "b\n");
    server.abort();
}

#[tokio::test]
async fn test_fatal_device_error_stops_serving() {
    use rfid_server::infrastructure::input_device::DeviceError;

    // Arrange
    let mut source = MockKeySource::new("reader").fail(DeviceError::Closed);
    let config = test_config(Duration::from_secs(10));
    let listener = bind_listener(config.bind_addr).unwrap();

    // Act: the drain branch sees the failure before any client connects
    let result = timeout(READ_DEADLINE, serve(&listener, &mut source, &config))
        .await
        .expect("serve returns");

    // Assert
    assert!(matches!(result, Err(DeviceError::Closed)));
}
