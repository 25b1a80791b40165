//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! End-to-end client tests over an in-memory duplex transport.
//!
//! Every test runs on a paused clock, so the timeout scenarios complete
//! instantly and deterministically.

use std::time::Duration;
use telops_client::{ClientConfig, ClientError, TelnetClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream, duplex};
use tokio::time::sleep;

const IAC: u8 = 0xFF;
const DONT: u8 = 0xFE;
const DO: u8 = 0xFD;
const WONT: u8 = 0xFC;
const WILL: u8 = 0xFB;
const SB: u8 = 0xFA;
const SE: u8 = 0xF0;

// ============================================================================
// Helper Functions
// ============================================================================

fn test_client(config: ClientConfig) -> (TelnetClient<DuplexStream>, DuplexStream) {
    let (client_io, server_io) = duplex(4096);
    let client = TelnetClient::from_stream(client_io, config).expect("valid config");
    (client, server_io)
}

fn config_with_prompt(prompt: &str) -> ClientConfig {
    ClientConfig::new("test", 23)
        .with_prompt(prompt)
        .with_socket_timeout(Some(Duration::from_secs(5)))
        .with_full_line_timeout(Some(Duration::from_millis(200)))
}

// ============================================================================
// Option Negotiation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn option_offers_are_refused_on_the_wire() {
    // Two DO requests must each come back as WONT, and the prompt that
    // follows them must still be found.
    let (mut client, mut server) = test_client(config_with_prompt(r"\$"));
    server
        .write_all(&[IAC, DO, 0x01, IAC, DO, 0x03])
        .await
        .unwrap();
    server.write_all(b"$ ").await.unwrap();

    let lines = client.wait_prompt(false).await.unwrap();
    assert_eq!(lines, vec!["$ ".to_string()]);

    let mut replies = [0u8; 6];
    server.read_exact(&mut replies).await.unwrap();
    assert_eq!(replies, [IAC, WONT, 0x01, IAC, WONT, 0x03]);
}

#[tokio::test(start_paused = true)]
async fn will_offer_is_answered_with_dont() {
    let (mut client, mut server) = test_client(config_with_prompt(r"\$"));
    server.write_all(&[IAC, WILL, 0x01]).await.unwrap();
    server.write_all(b"$ ").await.unwrap();

    client.wait_prompt(false).await.unwrap();

    let mut reply = [0u8; 3];
    server.read_exact(&mut reply).await.unwrap();
    assert_eq!(reply, [IAC, DONT, 0x01]);
}

// ============================================================================
// Data Normalisation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn doubled_iac_reaches_the_caller_as_one_byte() {
    let (mut client, mut server) = test_client(config_with_prompt(r"\$"));
    server
        .write_all(&[b'A', IAC, IAC, b'B', b'\r', b'\n'])
        .await
        .unwrap();
    server.write_all(b"$ ").await.unwrap();

    let lines = client.wait_prompt(false).await.unwrap();
    // 0xFF alone is not valid UTF-8, so it surfaces as the replacement
    // character in the decoded text.
    assert_eq!(lines, vec!["A\u{FFFD}B".to_string(), "$ ".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn bare_carriage_return_is_preserved() {
    let (mut client, mut server) = test_client(config_with_prompt(r"\$"));
    server.write_all(b"X\rY\n").await.unwrap();

    let line = client.get_line(true).await.unwrap();
    assert_eq!(line.text, "X\rY\n");
    assert!(!line.matches_prompt);
}

#[tokio::test(start_paused = true)]
async fn subnegotiation_is_invisible_to_the_caller() {
    let (mut client, mut server) = test_client(config_with_prompt(r"\$"));
    let mut payload = vec![IAC, SB, 0x18, 0x00];
    payload.extend_from_slice(b"xterm");
    payload.extend_from_slice(&[IAC, SE]);
    payload.extend_from_slice(b"ok\r\n$ ");
    server.write_all(&payload).await.unwrap();

    let lines = client.wait_prompt(false).await.unwrap();
    assert_eq!(lines, vec!["ok".to_string(), "$ ".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn control_sequences_are_pruned_when_enabled() {
    let config = config_with_prompt(r"\$").with_prune_control_sequences(true);
    let (mut client, mut server) = test_client(config);
    server
        .write_all(b"hi\x1B[31mRED\x1B[0m bye\n$ ")
        .await
        .unwrap();

    let lines = client.wait_prompt(false).await.unwrap();
    assert_eq!(lines, vec!["hiRED bye".to_string(), "$ ".to_string()]);
}

// ============================================================================
// Timeouts
// ============================================================================

#[tokio::test(start_paused = true)]
async fn full_line_timeout_returns_partial_line() {
    let config = config_with_prompt(r"\$")
        .with_socket_timeout(Some(Duration::from_secs(1)))
        .with_full_line_timeout(Some(Duration::from_millis(50)));
    let (mut client, mut server) = test_client(config);
    server.write_all(b"abc").await.unwrap();

    let line = client.get_line(true).await.unwrap();
    assert_eq!(line.text, "abc");
    assert!(!line.text.ends_with('\n'));
}

#[tokio::test(start_paused = true)]
async fn socket_timeout_fires_when_server_goes_silent() {
    let config = config_with_prompt(r"\$")
        .with_socket_timeout(Some(Duration::from_millis(100)))
        .with_full_line_timeout(None);
    let (mut client, _server) = test_client(config);

    let result = client.get_line(true).await;
    assert!(matches!(result, Err(ClientError::ConnectionTimeout)));
}

#[tokio::test(start_paused = true)]
async fn socket_timeout_restarts_on_every_byte() {
    // Bytes trickle in every 50ms against a 100ms socket timeout: the total
    // wait is far beyond the timeout, yet no individual gap exceeds it.
    let config = config_with_prompt(r"\$")
        .with_socket_timeout(Some(Duration::from_millis(100)))
        .with_full_line_timeout(None);
    let (mut client, mut server) = test_client(config);

    tokio::spawn(async move {
        for _ in 0..5 {
            sleep(Duration::from_millis(50)).await;
            server.write_all(b"x").await.unwrap();
        }
        sleep(Duration::from_millis(50)).await;
        server.write_all(b"\n").await.unwrap();
        // Hold the write half open until the client is done.
        sleep(Duration::from_secs(60)).await;
    });

    let line = client.get_line(true).await.unwrap();
    assert_eq!(line.text, "xxxxx\n");
}

#[tokio::test(start_paused = true)]
async fn zero_full_line_timeout_returns_after_first_byte() {
    let config = config_with_prompt(r"\$").with_full_line_timeout(Some(Duration::ZERO));
    let (mut client, mut server) = test_client(config);
    server.write_all(b"abc").await.unwrap();

    let line = client.get_line(true).await.unwrap();
    assert_eq!(line.text, "a");
}

#[tokio::test(start_paused = true)]
async fn get_line_without_full_line_wait_returns_first_byte() {
    let (mut client, mut server) = test_client(config_with_prompt(r"\$"));
    server.write_all(b"xyz").await.unwrap();

    let line = client.get_line(false).await.unwrap();
    assert_eq!(line.text, "x");
}

// ============================================================================
// Prompt Waiting
// ============================================================================

#[tokio::test(start_paused = true)]
async fn wait_prompt_stops_at_the_matching_line() {
    let (mut client, mut server) = test_client(config_with_prompt("#"));
    server
        .write_all(b"one\ntwo\nsw1# \nmore\n")
        .await
        .unwrap();

    let lines = client.wait_prompt(false).await.unwrap();
    assert_eq!(
        lines,
        vec!["one".to_string(), "two".to_string(), "sw1# ".to_string()]
    );

    // Reading resumes after the prompt line; nothing was consumed beyond it.
    let line = client.get_line(true).await.unwrap();
    assert_eq!(line.text, "more\n");
}

#[tokio::test(start_paused = true)]
async fn wait_prompt_drains_buffered_remainder() {
    let (mut client, mut server) = test_client(config_with_prompt("#"));
    server
        .write_all(b"result\nsw1# \nextra1\nextra2\n")
        .await
        .unwrap();

    let lines = client.wait_prompt(true).await.unwrap();
    assert_eq!(
        lines,
        vec![
            "result".to_string(),
            "sw1# ".to_string(),
            "extra1".to_string(),
            "extra2".to_string(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn prompt_line_is_flagged_by_get_line() {
    let (mut client, mut server) = test_client(config_with_prompt(r"\$"));
    server.write_all(b"$ ").await.unwrap();

    let line = client.get_line(true).await.unwrap();
    assert_eq!(line.text, "$ ");
    assert!(line.matches_prompt);
}

// ============================================================================
// Commands and Login
// ============================================================================

#[tokio::test(start_paused = true)]
async fn exec_sends_command_and_collects_until_prompt() {
    let (mut client, mut server) = test_client(config_with_prompt("#"));

    let server_task = tokio::spawn(async move {
        let mut command = [0u8; 12];
        server.read_exact(&mut command).await.unwrap();
        assert_eq!(&command, b"show clock\r\n");
        server
            .write_all(b"show clock\n12:00:00 UTC\nsw1# ")
            .await
            .unwrap();
        sleep(Duration::from_secs(60)).await;
    });

    let lines = client.exec("show clock").await.unwrap();
    assert_eq!(
        lines,
        vec![
            "show clock".to_string(),
            "12:00:00 UTC".to_string(),
            "sw1# ".to_string(),
        ]
    );
    server_task.abort();
}

#[tokio::test(start_paused = true)]
async fn send_command_without_newline_is_verbatim() {
    let (mut client, mut server) = test_client(config_with_prompt("#"));
    client.send_command("ping", false).await.unwrap();

    let mut sent = [0u8; 4];
    server.read_exact(&mut sent).await.unwrap();
    assert_eq!(&sent, b"ping");
}

#[tokio::test(start_paused = true)]
async fn login_walks_both_prompts_and_restores_the_original() {
    let (mut client, mut server) = test_client(config_with_prompt("#"));

    let server_task = tokio::spawn(async move {
        server.write_all(b"Username: ").await.unwrap();
        let mut username = [0u8; 7];
        server.read_exact(&mut username).await.unwrap();
        assert_eq!(&username, b"admin\r\n");

        server.write_all(b"Password: ").await.unwrap();
        let mut password = [0u8; 8];
        server.read_exact(&mut password).await.unwrap();
        assert_eq!(&password, b"secret\r\n");

        server.write_all(b"Welcome\nsw1# ").await.unwrap();
        sleep(Duration::from_secs(60)).await;
    });

    client
        .login("admin", "secret", Some("Username:"), Some("Password:"))
        .await
        .unwrap();

    // The configured prompt is back in force for regular commands.
    assert!(client.set_regex_prompt("#").is_ok());
    server_task.abort();
}

#[tokio::test(start_paused = true)]
async fn login_failure_wraps_the_cause() {
    let config = config_with_prompt("#").with_socket_timeout(Some(Duration::from_millis(100)));
    let (mut client, _server) = test_client(config);

    let result = client
        .login("admin", "secret", Some("Username:"), None)
        .await;
    match result {
        Err(ClientError::Login(cause)) => {
            assert!(matches!(*cause, ClientError::ConnectionTimeout));
        }
        other => panic!("expected a login error, got {other:?}"),
    }
}

// ============================================================================
// Lifecycle and Validation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn disconnect_is_idempotent() {
    let (mut client, _server) = test_client(config_with_prompt(r"\$"));
    client.disconnect().await.unwrap();
    client.disconnect().await.unwrap();

    let result = client.send_command("late", true).await;
    assert!(matches!(result, Err(ClientError::Connection(_))));
}

#[tokio::test(start_paused = true)]
async fn invalid_prompt_pattern_is_rejected() {
    let (client_io, _server_io) = duplex(64);
    let config = ClientConfig::new("test", 23).with_prompt("(unclosed");
    let result = TelnetClient::from_stream(client_io, config);
    assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
}

#[tokio::test(start_paused = true)]
async fn port_zero_is_rejected() {
    let (client_io, _server_io) = duplex(64);
    let config = ClientConfig::new("test", 0);
    let result = TelnetClient::from_stream(client_io, config);
    assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
}

#[tokio::test(start_paused = true)]
async fn runtime_setting_changes_take_effect() {
    let (mut client, mut server) = test_client(config_with_prompt(r"\$"));
    client.set_prune_control_sequences(true);
    assert!(client.prune_control_sequences());
    client.set_socket_timeout(Some(Duration::from_secs(3)));
    assert_eq!(client.socket_timeout(), Some(Duration::from_secs(3)));
    client.set_full_line_timeout(None);
    assert_eq!(client.full_line_timeout(), None);

    server.write_all(b"\x1B[1mbold\x1B[0m\n").await.unwrap();
    let line = client.get_line(true).await.unwrap();
    assert_eq!(line.text, "bold\n");
}
