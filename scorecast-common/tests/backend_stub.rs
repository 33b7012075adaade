//! End-to-end checks of `MatchClient` against a local stub backend.
//!
//! The stub speaks just enough HTTP/1.1 for one request per connection and
//! models the backend's merge semantics: partial updates touch only the
//! fields present in the body, timer verbs flip the running flag, penalties
//! append in order. Elapsed time while running is a fixed synthetic 7.5s so
//! the assertions stay deterministic.

use scorecast_common::{
    backend::{MatchClient, MatchClientError, MatchUpdate, NewPenalty, TimerAction},
    match_state::{ShotResult, TeamSide},
};
use serde_json::{Value, json};
use std::{
    sync::{Arc, Mutex, Once},
    time::Duration,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

static INIT: Once = Once::new();

fn initialize() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

const RUNNING_ELAPSED: f64 = 7.5;

struct StubBackend {
    fields: Value,
    penalties: Vec<Value>,
    accumulated_seconds: f64,
    is_running: bool,
    next_penalty_id: u64,
}

impl StubBackend {
    fn new() -> Self {
        // Matches the backend's seed row.
        Self {
            fields: json!({
                "team_a_name": "Time A",
                "team_b_name": "Time B",
                "logo_a": "",
                "logo_b": "",
                "score_a": 0,
                "score_b": 0,
                "status": "1º TEMPO",
                "stoppage_time": 0,
            }),
            penalties: Vec::new(),
            accumulated_seconds: 0.0,
            is_running: false,
            next_penalty_id: 1,
        }
    }

    fn snapshot(&self) -> Value {
        let mut row = self.fields.clone();
        let obj = row.as_object_mut().unwrap();
        obj.insert("id".into(), json!(1));
        obj.insert("is_running".into(), json!(self.is_running as u8));
        obj.insert(
            "accumulated_seconds".into(),
            json!(self.accumulated_seconds),
        );
        let elapsed = if self.is_running {
            self.accumulated_seconds + RUNNING_ELAPSED
        } else {
            self.accumulated_seconds
        };
        obj.insert("calculated_time_seconds".into(), json!(elapsed));
        obj.insert("penalties".into(), json!(self.penalties));
        row
    }

    fn apply_update(&mut self, body: &Value) {
        match body["action"].as_str() {
            Some("start") => self.is_running = true,
            Some("pause") => {
                if self.is_running {
                    self.accumulated_seconds += RUNNING_ELAPSED;
                    self.is_running = false;
                }
            }
            Some("reset_timer") => {
                self.is_running = false;
                self.accumulated_seconds = 0.0;
            }
            _ => {}
        }

        let fields = self.fields.as_object_mut().unwrap();
        for (key, value) in body.as_object().unwrap() {
            if fields.contains_key(key) {
                fields.insert(key.clone(), value.clone());
            }
        }
    }

    fn handle(&mut self, method: &str, path: &str, body: Option<Value>) -> (u16, Value) {
        match (method, path) {
            ("GET", "/api/match") => (200, self.snapshot()),
            ("POST", "/api/update") => {
                self.apply_update(&body.unwrap());
                (200, json!({"status": "success"}))
            }
            ("POST", "/api/penalties") => {
                let body = body.unwrap();
                self.penalties.push(json!({
                    "id": self.next_penalty_id,
                    "team": body["team"],
                    "player_name": body["player"],
                    "result": body["result"],
                }));
                self.next_penalty_id += 1;
                (200, json!({"status": "success"}))
            }
            ("DELETE", "/api/penalties") => {
                self.penalties.clear();
                (200, json!({"status": "success"}))
            }
            _ => (404, json!({"error": "not found"})),
        }
    }
}

async fn handle_connection(mut stream: TcpStream, backend: &Arc<Mutex<StubBackend>>) {
    let mut buf = Vec::new();
    let header_end = loop {
        let mut chunk = [0u8; 1024];
        let read = stream.read(&mut chunk).await.unwrap();
        if read == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..read]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap().to_string();
    let path = parts.next().unwrap().to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let mut chunk = [0u8; 1024];
        let read = stream.read(&mut chunk).await.unwrap();
        if read == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..read]);
    }

    let body = if content_length > 0 {
        serde_json::from_slice(&buf[header_end..header_end + content_length]).ok()
    } else {
        None
    };

    let (status, response_body) = backend.lock().unwrap().handle(&method, &path, body);
    let payload = response_body.to_string();
    let response = format!(
        "HTTP/1.1 {status} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len(),
    );
    stream.write_all(response.as_bytes()).await.unwrap();
    let _ = stream.shutdown().await;
}

async fn start_stub() -> (String, Arc<Mutex<StubBackend>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let backend = Arc::new(Mutex::new(StubBackend::new()));

    let served = backend.clone();
    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            handle_connection(stream, &served).await;
        }
    });

    (format!("http://{addr}"), backend)
}

#[tokio::test]
async fn test_full_admin_cycle_against_stub() {
    initialize();
    let (url, _backend) = start_stub().await;
    let client = MatchClient::new(&url, Duration::from_secs(5)).unwrap();

    let initial = client.get_state().await.unwrap();
    assert_eq!(initial.team_a_name, "Time A");
    assert_eq!(initial.status, "1º TEMPO");
    assert_eq!(initial.calculated_time_seconds, 0.0);
    assert!(initial.penalties.is_empty());
    assert_eq!(initial.logo_url(TeamSide::A), None);

    // Partial update: only the posted fields change.
    client
        .update(&MatchUpdate {
            status: Some(String::from("2º TEMPO")),
            score_a: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    let state = client.get_state().await.unwrap();
    assert_eq!(state.status, "2º TEMPO");
    assert_eq!(state.score_a, 1);
    assert_eq!(state.team_b_name, "Time B");

    // Starting the clock is visible on the next poll.
    client
        .update(&MatchUpdate::timer(TimerAction::Start))
        .await
        .unwrap();
    let state = client.get_state().await.unwrap();
    assert!(state.calculated_time_seconds > 0.0);

    // Pausing freezes the reported elapsed time.
    client
        .update(&MatchUpdate::timer(TimerAction::Pause))
        .await
        .unwrap();
    let paused = client.get_state().await.unwrap();
    let frozen = paused.calculated_time_seconds;
    assert!(frozen > 0.0);
    let again = client.get_state().await.unwrap();
    assert_eq!(again.calculated_time_seconds, frozen);

    // Resetting zeroes it.
    client
        .update(&MatchUpdate::timer(TimerAction::ResetTimer))
        .await
        .unwrap();
    let state = client.get_state().await.unwrap();
    assert_eq!(state.calculated_time_seconds, 0.0);

    // Penalties append in order; the posted `player` comes back as
    // `player_name`.
    client
        .add_penalty(&NewPenalty {
            team: TeamSide::A,
            player: String::from("Pedro"),
            result: ShotResult::Goal,
        })
        .await
        .unwrap();
    client
        .add_penalty(&NewPenalty {
            team: TeamSide::B,
            player: String::from("Weverton"),
            result: ShotResult::Missed,
        })
        .await
        .unwrap();
    let state = client.get_state().await.unwrap();
    assert_eq!(state.penalties.len(), 2);
    assert_eq!(state.penalties[0].player_name, "Pedro");
    assert_eq!(state.penalties[0].result, ShotResult::Goal);
    assert_eq!(state.penalties[1].team, TeamSide::B);
    assert_eq!(state.penalties[1].result, ShotResult::Missed);

    client.clear_penalties().await.unwrap();
    let state = client.get_state().await.unwrap();
    assert!(state.penalties.is_empty());
}

#[tokio::test]
async fn test_unknown_route_surfaces_as_bad_status() {
    initialize();
    let (url, _backend) = start_stub().await;
    // Point the client at a base path the stub doesn't serve.
    let client = MatchClient::new(&format!("{url}/nowhere"), Duration::from_secs(5)).unwrap();

    match client.get_state().await {
        Err(MatchClientError::BadStatus { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("Expected BadStatus, got {other:?}"),
    }
}
