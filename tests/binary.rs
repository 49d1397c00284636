//! The direct-run binary: notice, listening socket, signal shutdown.

use std::process::Stdio;
use std::time::Duration;

use reporting_webserver::lifecycle::GATEWAY_NOTICE;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};

mod common;

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn server_command(port: u16, adapter: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_reporting-webserver"));
    cmd.env("WEBSERVER_HOST", "127.0.0.1")
        .env("WEBSERVER_PORT", port.to_string())
        .env("ADAPTER", adapter)
        .env("NO_COLOR", "1")
        .env_remove("ADAPTER_STRICT")
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Read stdout until the gateway notice, returning every line seen.
async fn read_until_notice(lines: &mut Lines<BufReader<ChildStdout>>) -> Vec<String> {
    let mut seen = Vec::new();
    let found = tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(line) = lines.next_line().await.unwrap() {
            let done = line == GATEWAY_NOTICE;
            seen.push(line);
            if done {
                return true;
            }
        }
        false
    })
    .await
    .unwrap_or(false);

    assert!(found, "gateway notice not printed; stdout was {seen:?}");
    seen
}

async fn wait_until_healthy(port: u16) -> reqwest::Response {
    let client = common::client();
    for _ in 0..50 {
        if let Ok(res) = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await
        {
            return res;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("server never became reachable on port {port}");
}

fn spawn(cmd: &mut Command) -> (Child, Lines<BufReader<ChildStdout>>) {
    let mut child = cmd.spawn().expect("failed to start binary");
    let stdout = child.stdout.take().unwrap();
    (child, BufReader::new(stdout).lines())
}

#[tokio::test]
async fn test_direct_run_prints_notice_and_serves() {
    let port = free_port();
    let (mut child, mut lines) = spawn(&mut server_command(port, "MYSQL"));

    let seen = read_until_notice(&mut lines).await;
    let startup = seen
        .iter()
        .find(|line| line.contains("reporting-webserver starting"))
        .expect("startup log line missing");
    assert!(startup.contains(r#"Some("MYSQL")"#), "resolved adapter not logged: {startup}");

    let res = wait_until_healthy(port).await;
    assert_eq!(res.status(), 200);

    let res = common::client()
        .get(format!("http://127.0.0.1:{port}/reporting"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    child.kill().await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_sigterm_shuts_down_cleanly() {
    let port = free_port();
    let (mut child, mut lines) = spawn(&mut server_command(port, "RANDOM"));

    read_until_notice(&mut lines).await;
    assert_eq!(wait_until_healthy(port).await.status(), 200);

    let pid = child.id().unwrap().to_string();
    let sent = Command::new("kill").args(["-TERM", &pid]).status().await.unwrap();
    assert!(sent.success());

    let mut rest = Vec::new();
    while let Ok(Some(line)) = lines.next_line().await {
        rest.push(line);
    }

    let status = tokio::time::timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("server did not exit after SIGTERM")
        .unwrap();
    assert!(status.success(), "exit status {status:?}");
    assert!(
        rest.iter().any(|line| line.contains("Shutdown complete")),
        "graceful shutdown not logged: {rest:?}"
    );
}

#[tokio::test]
async fn test_occupied_port_exits_with_error() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let output = tokio::time::timeout(
        Duration::from_secs(10),
        server_command(port, "RANDOM").output(),
    )
    .await
    .expect("binary did not exit")
    .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line == GATEWAY_NOTICE));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Bind"), "stderr was {stderr}");
}
