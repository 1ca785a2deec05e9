//! End-to-end tests: real TCP clients against a listener on an ephemeral port.

use std::net::SocketAddr;
use std::time::Duration;

use actix::Actor;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use crate::config::flood_guard::MAX_REQUESTS_PER_SECOND;
use crate::config::server::ServerConfig;
use crate::game::dealer::FixedDealer;
use crate::server::game_session::SessionServer;
use crate::server::listener;

async fn spawn_server(bomb: i64) -> SocketAddr {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        turn_timeout: None,
    };
    let listener = listener::bind(&config).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let session = SessionServer::new(Box::new(FixedDealer::in_join_order(bomb)), None).start();
    actix::spawn(listener::serve(listener, session));
    addr
}

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, writer) = stream.into_split();
        Client {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    async fn send(&mut self, line: &str) {
        self.writer.write_all(format!("{}\n", line).as_bytes()).await.unwrap();
    }

    /// Read lines until one contains `needle`; return everything read.
    async fn read_until(&mut self, needle: &str) -> Vec<String> {
        let mut seen = Vec::new();
        loop {
            let line = tokio::time::timeout(Duration::from_secs(2), self.lines.next_line())
                .await
                .unwrap_or_else(|_| panic!("timed out waiting for {:?}, got {:?}", needle, seen))
                .unwrap()
                .unwrap_or_else(|| panic!("connection closed waiting for {:?}", needle));
            let done = line.contains(needle);
            seen.push(line);
            if done {
                return seen;
            }
        }
    }

    async fn join(addr: SocketAddr, name: &str) -> Self {
        let mut client = Client::connect(addr).await;
        client.send(&format!("JOIN:{}", name)).await;
        client.read_until("Welcome").await;
        client
    }
}

#[actix::test]
async fn test_game_played_over_tcp() {
    let addr = spawn_server(100).await;
    let mut a = Client::join(addr, "A").await;
    let mut b = Client::join(addr, "B").await;
    a.read_until("Player B joined the game, players: 2").await;

    b.send("START:").await;
    a.read_until("Turn order:").await;
    a.read_until("1. A").await;
    a.read_until("Your turn").await;

    a.send("GUESS:A:150").await;
    b.read_until("A guessed 150 - the bomb is smaller").await;
    b.read_until("New range: 0-149").await;
    b.read_until("Your turn! Enter a number between 0 and 149").await;

    b.send("GUESS:B:50").await;
    a.read_until("the bomb is larger").await;
    a.read_until("Your turn! Enter a number between 51 and 149").await;

    a.send("GUESS:A:100").await;
    a.read_until("Winner: A!").await;
    b.read_until("Winner: A!").await;
    b.read_until("Game over").await;

    b.send("GUESS:B:120").await;
    b.send("STATUS:").await;
    let lines = b.read_until("Phase: FINISHED").await;
    assert!(lines.iter().all(|l| !l.contains("120")));
}

#[actix::test]
async fn test_malformed_lines_keep_connection_open() {
    let addr = spawn_server(100).await;
    let mut client = Client::connect(addr).await;
    client.send("HELLO").await;
    client.send("GUESS:nobody:abc").await;
    client.send("").await;
    client.send("join:lowercase").await;
    client.send("STATUS:").await;
    client.read_until("Phase: WAITING_FOR_PLAYERS").await;
    let lines = client.read_until("Players: 0").await;
    assert_eq!(lines, vec!["Players: 0".to_string()]);
}

#[actix::test]
async fn test_disconnect_mid_game_ends_it() {
    let addr = spawn_server(100).await;
    let mut a = Client::join(addr, "A").await;
    let b = Client::join(addr, "B").await;
    a.send("START:").await;
    a.read_until("Your turn").await;

    drop(b);
    a.read_until("Player B left the game, players: 1").await;
    a.read_until("without a winner").await;
    a.read_until("Game over").await;

    a.send("STATUS:").await;
    a.read_until("Phase: FINISHED").await;
}

#[actix::test]
async fn test_out_of_range_reply_goes_to_requester_only() {
    let addr = spawn_server(100).await;
    let mut a = Client::join(addr, "A").await;
    let mut b = Client::join(addr, "B").await;
    a.send("START:").await;
    a.read_until("Your turn").await;

    a.send("GUESS:A:500").await;
    a.read_until("The number must be between 0 and 200").await;

    b.send("STATUS:").await;
    let lines = b.read_until("Current player: A").await;
    assert!(lines.iter().all(|l| !l.contains("must be between")));
    assert!(lines.iter().any(|l| l == "Current range: 0-200"));
}

#[actix::test]
async fn test_join_rejections_are_direct_replies() {
    let addr = spawn_server(100).await;
    let mut a = Client::join(addr, "A").await;

    let mut dup = Client::connect(addr).await;
    dup.send("JOIN:A").await;
    dup.read_until("Name A is already taken").await;

    a.send("JOIN:Other").await;
    a.read_until("This connection already plays as A").await;

    // The rejected connection is still usable.
    dup.send("JOIN:C").await;
    dup.read_until("Welcome").await;
    a.read_until("Player C joined the game, players: 2").await;

    a.send("START:").await;
    a.send("START:").await;
    a.read_until("Cannot start, the game is PLAYING").await;

    let mut late = Client::connect(addr).await;
    late.send("JOIN:D").await;
    late.read_until("Cannot join right now, the game is PLAYING").await;
}

#[actix::test]
async fn test_start_alone_broadcasts_failure() {
    let addr = spawn_server(100).await;
    let mut a = Client::join(addr, "A").await;
    a.send("START:").await;
    a.read_until("At least 2 players").await;
    a.send("STATUS:").await;
    a.read_until("Phase: WAITING_FOR_PLAYERS").await;
}

#[actix::test]
async fn test_burst_past_rate_limit_is_applied_in_full() {
    let addr = spawn_server(100).await;
    let _a = Client::join(addr, "A").await;
    let mut b = Client::join(addr, "B").await;

    let mut burst = "STATUS:\n".repeat(MAX_REQUESTS_PER_SECOND as usize);
    burst.push_str("START:\n");
    b.writer.write_all(burst.as_bytes()).await.unwrap();

    let lines = b.read_until("Game started").await;
    let replies = lines.iter().filter(|l| l.as_str() == "=== Game status ===").count();
    assert_eq!(replies, MAX_REQUESTS_PER_SECOND as usize);
}
