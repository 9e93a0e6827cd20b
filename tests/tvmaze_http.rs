//! End-to-end tests against a canned HTTP responder on localhost.

use show_runtime::{ShowRuntimeError, TvMazeProvider, UpstreamError, show_runtime};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::process::Command;
use std::sync::{Arc, Mutex};
use std::thread;

const GIRLS_SEARCH: &str = r#"[
    {"score": 0.9, "show": {"id": 2, "name": "girls forever", "ended": null}},
    {"score": 0.8, "show": {"id": 139, "name": "Girls", "ended": "2017-04-16", "language": "English"}}
]"#;

const GIRLS_EPISODES: &str = r#"[
    {"id": 1, "season": 1, "number": 1, "runtime": 30},
    {"id": 2, "season": 1, "number": 2, "runtime": null},
    {"id": 3, "season": 1, "number": 3, "runtime": 45}
]"#;

/// A route: request path prefix, status line and JSON body
type Route = (&'static str, &'static str, &'static str);

/// Serves canned responses and records the request targets it saw
struct CannedServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let target = request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();

                // Drain headers
                let mut line = String::new();
                while reader.read_line(&mut line).unwrap_or(0) > 2 {
                    line.clear();
                }

                let (status, body) = routes
                    .iter()
                    .find(|(prefix, _, _)| target.starts_with(prefix))
                    .map(|(_, status, body)| (*status, *body))
                    .unwrap_or(("404 Not Found", "{}"));
                seen.lock().unwrap().push(target);

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self { base_url, requests }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn girls_server() -> CannedServer {
    CannedServer::start(vec![
        ("/search/shows", "200 OK", GIRLS_SEARCH),
        ("/shows/139/episodes", "200 OK", GIRLS_EPISODES),
    ])
}

#[test]
fn test_show_runtime_over_http() {
    let server = girls_server();
    let provider = TvMazeProvider::with_base_url(&server.base_url);

    let minutes = show_runtime(&provider, "Girls", |_| {}).unwrap();

    assert_eq!(minutes, 75);
    assert_eq!(
        server.requests(),
        vec!["/search/shows?q=Girls", "/shows/139/episodes"]
    );
}

#[test]
fn test_search_query_is_url_encoded() {
    let server = CannedServer::start(vec![
        ("/search/shows", "200 OK", r#"[{"show": {"id": 7, "name": "The Wire", "ended": "2008-03-09"}}]"#),
        ("/shows/7/episodes", "200 OK", "[]"),
    ]);
    let provider = TvMazeProvider::with_base_url(&server.base_url);

    assert_eq!(show_runtime(&provider, "The Wire", |_| {}).unwrap(), 0);
    let requests = server.requests();
    assert!(
        requests[0] == "/search/shows?q=The+Wire" || requests[0] == "/search/shows?q=The%20Wire",
        "unexpected search target {}",
        requests[0]
    );
}

#[test]
fn test_search_failure_status() {
    let server = CannedServer::start(vec![("/search/shows", "503 Service Unavailable", "{}")]);
    let provider = TvMazeProvider::with_base_url(&server.base_url);

    let error = show_runtime(&provider, "Girls", |_| {}).unwrap_err();
    assert!(matches!(error, UpstreamError::Status { what: "shows data", .. }));
    assert_eq!(ShowRuntimeError::from(error).exit_code(), 10);
}

#[test]
fn test_unexpected_body_shape_is_parse_error() {
    let server = CannedServer::start(vec![("/search/shows", "200 OK", r#"{"show": "nope"}"#)]);
    let provider = TvMazeProvider::with_base_url(&server.base_url);

    let error = show_runtime(&provider, "Girls", |_| {}).unwrap_err();
    assert!(matches!(error, UpstreamError::Parse(_)));
}

#[test]
fn test_cli_prints_total_minutes() {
    let server = girls_server();

    let output = Command::new(env!("CARGO_BIN_EXE_show_runtime"))
        .args(["--base-url", &server.base_url, "\"Girls\""])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "75");
}

#[test]
fn test_cli_exits_with_10_on_episode_failure() {
    let server = CannedServer::start(vec![
        ("/search/shows", "200 OK", GIRLS_SEARCH),
        ("/shows/139/episodes", "500 Internal Server Error", "{}"),
    ]);

    let output = Command::new(env!("CARGO_BIN_EXE_show_runtime"))
        .args(["--base-url", &server.base_url, "Girls"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(10));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_cli_exits_with_10_on_empty_search() {
    let server = CannedServer::start(vec![("/search/shows", "200 OK", "[]")]);

    let output = Command::new(env!("CARGO_BIN_EXE_show_runtime"))
        .args(["--base-url", &server.base_url, "Nothing At All"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(10));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_requires_show_name() {
    let output = Command::new(env!("CARGO_BIN_EXE_show_runtime"))
        .env_remove("TVMAZE_BASE_URL")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_survey_reports_shortest_and_longest() {
    let server = CannedServer::start(vec![
        ("/search/shows?q=Short", "200 OK", r#"[{"show": {"id": 1, "name": "Short", "ended": null}}]"#),
        ("/search/shows?q=Long", "200 OK", r#"[{"show": {"id": 2, "name": "Long", "ended": null}}]"#),
        ("/shows/1/episodes", "200 OK", r#"[{"runtime": 25}]"#),
        ("/shows/2/episodes", "200 OK", r#"[{"runtime": 60}, {"runtime": 65}]"#),
    ]);

    let mut list = tempfile::NamedTempFile::new().unwrap();
    writeln!(list, "Long\nBroken\n\nShort").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_show_runtime"))
        .args(["--base-url", &server.base_url, "--list"])
        .arg(list.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "The shortest show: Short (0h 25m)\nThe longest show: Long (2h 5m)\n"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not get info for 'Broken'."));
}
