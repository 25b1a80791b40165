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

//! Scriptable Telnet client for driving remote command-line interfaces

use crate::{ClientConfig, ClientError, Result};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use regex::Regex;
use std::time::Duration;
use telops_ansicodec::AnsiParser;
use telops_telnetcodec::{TelnetCodec, TelnetEvent, TelnetFrame};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, lookup_host};
use tokio::time::{Instant, timeout};
use tokio_util::codec::Framed;
use tracing::debug;

/// One line delivered by [`TelnetClient::get_line`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// The line text. A completed line keeps its trailing `\n`; a line cut
    /// short by the full-line timeout has none.
    pub text: String,
    /// Whether the line (without its trailing `\n`) matches the current
    /// prompt pattern.
    pub matches_prompt: bool,
}

/// A Telnet client for scripted administration of remote equipment.
///
/// The client owns the connection and drives everything from the caller's
/// task: reading pulls bytes through the NVT filter (answering option
/// requests along the way), assembles them into lines, and hands control
/// back once the configured prompt pattern matches. One instance must not be
/// shared between tasks; separate instances are independent.
///
/// The transport is any `AsyncRead + AsyncWrite` stream.
/// [`connect`](TelnetClient::connect) produces a TCP-backed client;
/// [`from_stream`](TelnetClient::from_stream) accepts an in-memory duplex
/// for deterministic tests.
///
/// # Example
/// ```rust,no_run
/// use telops_client::{ClientConfig, TelnetClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::new("192.0.2.1", 23).with_prompt("router#");
/// let mut client = TelnetClient::connect(config).await?;
/// client.login("admin", "secret", Some("Username:"), Some("Password:")).await?;
/// for line in client.exec("show ip interface brief").await? {
///     println!("{line}");
/// }
/// client.disconnect().await?;
/// # Ok(())
/// # }
/// ```
pub struct TelnetClient<S> {
    framed: Framed<S, TelnetCodec>,
    prompt: Regex,
    parser: AnsiParser,
    socket_timeout: Option<Duration>,
    full_line_timeout: Option<Duration>,
    prune_control_sequences: bool,
    drain_on_prompt: bool,
    debug: bool,
    open: bool,
}

impl TelnetClient<TcpStream> {
    /// Resolves the configured host, opens a TCP connection under the
    /// connect timeout and wraps it in a client.
    ///
    /// Resolution failures (including a name with no usable address) map to
    /// [`ClientError::NameResolution`]; a refused or failed connection to
    /// [`ClientError::Connection`]; an expired connect budget to
    /// [`ClientError::ConnectionTimeout`].
    pub async fn connect(config: ClientConfig) -> Result<TelnetClient<TcpStream>> {
        validate(&config)?;
        let address = config.address();
        let mut addresses = lookup_host(address.as_str()).await.map_err(|error| {
            ClientError::NameResolution(format!("resolving {}: {error}", config.host))
        })?;
        let Some(target) = addresses.next() else {
            return Err(ClientError::NameResolution(format!(
                "{} resolved to no usable address",
                config.host
            )));
        };
        let stream = match timeout(config.connect_timeout, TcpStream::connect(target)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(error)) => {
                return Err(ClientError::Connection(format!(
                    "connecting to {address}: {error}"
                )));
            }
            Err(_) => return Err(ClientError::ConnectionTimeout),
        };
        // Command/response traffic is latency-bound, not throughput-bound.
        stream.set_nodelay(true).ok();
        TelnetClient::from_stream(stream, config)
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> TelnetClient<S> {
    /// Wraps an already-connected duplex stream. This is the seam the test
    /// suite uses to feed the client deterministic byte sequences through
    /// `tokio::io::duplex`.
    pub fn from_stream(stream: S, config: ClientConfig) -> Result<TelnetClient<S>> {
        validate(&config)?;
        let prompt = compile_prompt(&config.prompt)?;
        Ok(TelnetClient {
            framed: Framed::new(stream, TelnetCodec::new()),
            prompt,
            parser: AnsiParser::new(),
            socket_timeout: config.socket_timeout,
            full_line_timeout: config.full_line_timeout,
            prune_control_sequences: config.prune_control_sequences,
            drain_on_prompt: config.drain_on_prompt,
            debug: config.debug,
            open: true,
        })
    }

    /// Shuts the connection down. Safe to call repeatedly; only a failure of
    /// the close itself produces an error ([`ClientError::Unlikely`]).
    pub async fn disconnect(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.framed
            .close()
            .await
            .map_err(|error| ClientError::Unlikely(format!("closing connection: {error}")))
    }

    /// Reads one line from the server.
    ///
    /// A line ends at `\n` (the NVT filter has already collapsed `CR LF`).
    /// The socket timeout restarts with every received byte; the full-line
    /// budget runs from the line's first byte, and on expiry whatever has
    /// accumulated is returned without a trailing `\n`. With
    /// `wait_for_full_line` false the call returns right after the first
    /// byte instead of waiting out the line.
    pub async fn get_line(&mut self, wait_for_full_line: bool) -> Result<Line> {
        self.ensure_open()?;
        let mut bytes: Vec<u8> = Vec::new();
        let mut deadline: Option<Instant> = None;
        loop {
            let limit = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        break;
                    }
                    Some(match self.socket_timeout {
                        Some(socket) => socket.min(remaining),
                        None => remaining,
                    })
                }
                None => self.socket_timeout,
            };
            match self.read_data_byte(limit).await? {
                Some(byte) => {
                    if bytes.is_empty() {
                        deadline = match self.full_line_timeout {
                            Some(budget) if wait_for_full_line => Some(Instant::now() + budget),
                            _ if !wait_for_full_line => Some(Instant::now()),
                            _ => None,
                        };
                    }
                    bytes.push(byte);
                    if byte == b'\n' {
                        break;
                    }
                }
                None => {
                    // Decide which budget ran out: the line budget returns a
                    // partial line, the socket timeout is an error.
                    match deadline {
                        Some(deadline) if Instant::now() >= deadline => break,
                        _ => return Err(ClientError::ConnectionTimeout),
                    }
                }
            }
        }
        Ok(self.finish_line(bytes))
    }

    /// Reads lines until one matches the prompt pattern, returning them all
    /// (trailing newlines stripped). The matching line is the last entry.
    ///
    /// With `drain_remaining`, everything the server has already delivered
    /// past the prompt is pulled without waiting and split into further
    /// lines.
    pub async fn wait_prompt(&mut self, drain_remaining: bool) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let line = self.get_line(true).await?;
            let matched = line.matches_prompt;
            let mut text = line.text;
            if text.ends_with('\n') {
                text.pop();
            }
            lines.push(text);
            if matched {
                break;
            }
        }
        if drain_remaining {
            self.drain_into(&mut lines).await?;
        }
        Ok(lines)
    }

    /// Writes a command to the server, byte for byte, plus `CR LF` when
    /// `add_newline` is set. No IAC escaping is applied to the payload.
    pub async fn send_command(&mut self, command: &str, add_newline: bool) -> Result<()> {
        self.ensure_open()?;
        let mut payload = Vec::with_capacity(command.len() + 2);
        payload.extend_from_slice(command.as_bytes());
        if add_newline {
            payload.extend_from_slice(b"\r\n");
        }
        self.framed
            .send(TelnetFrame::Raw(Bytes::from(payload)))
            .await
            .map_err(|error| ClientError::Connection(format!("writing command: {error}")))
    }

    /// Sends a command and collects its output up to the next prompt.
    pub async fn exec(&mut self, command: &str) -> Result<Vec<String>> {
        self.send_command(command, true).await?;
        self.wait_prompt(self.drain_on_prompt).await
    }

    /// Runs the login dance: wait for the login prompt (when given), send
    /// the username, wait for the password prompt (when given), send the
    /// password, then wait for the regular prompt. The configured prompt is
    /// restored afterwards whatever happens; any failure comes back wrapped
    /// in [`ClientError::Login`].
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
        login_prompt: Option<&str>,
        password_prompt: Option<&str>,
    ) -> Result<()> {
        let saved = self.prompt.clone();
        let sequence = self
            .login_sequence(username, password, login_prompt, password_prompt, &saved)
            .await;
        if sequence.is_err() {
            self.prompt = saved;
        }
        sequence.map_err(|cause| ClientError::Login(Box::new(cause)))
    }

    async fn login_sequence(
        &mut self,
        username: &str,
        password: &str,
        login_prompt: Option<&str>,
        password_prompt: Option<&str>,
        saved: &Regex,
    ) -> Result<()> {
        if let Some(literal) = login_prompt {
            self.set_prompt(literal)?;
            self.wait_prompt(false).await?;
        }
        self.send_command(username, true).await?;
        if let Some(literal) = password_prompt {
            self.set_prompt(literal)?;
            self.wait_prompt(false).await?;
        }
        self.send_command(password, true).await?;
        self.prompt = saved.clone();
        self.wait_prompt(false).await?;
        Ok(())
    }

    /// Sets the prompt to a literal string (escaped before compilation).
    pub fn set_prompt(&mut self, literal: &str) -> Result<()> {
        self.set_regex_prompt(&regex::escape(literal))
    }

    /// Sets the prompt to a regular expression fragment. The fragment is
    /// anchored at the end of the line, with tolerance for one trailing
    /// whitespace character.
    pub fn set_regex_prompt(&mut self, pattern: &str) -> Result<()> {
        self.prompt = compile_prompt(pattern)?;
        Ok(())
    }

    /// Set the per-byte read timeout.
    pub fn set_socket_timeout(&mut self, timeout: Option<Duration>) {
        self.socket_timeout = timeout;
    }

    /// The per-byte read timeout.
    pub fn socket_timeout(&self) -> Option<Duration> {
        self.socket_timeout
    }

    /// Set the full-line budget. `None` waits indefinitely for the newline;
    /// `Some(Duration::ZERO)` returns right after a line's first byte.
    pub fn set_full_line_timeout(&mut self, timeout: Option<Duration>) {
        self.full_line_timeout = timeout;
    }

    /// The full-line budget.
    pub fn full_line_timeout(&self) -> Option<Duration> {
        self.full_line_timeout
    }

    /// Enable or disable stripping of control sequences from returned lines.
    pub fn set_prune_control_sequences(&mut self, enabled: bool) {
        self.prune_control_sequences = enabled;
    }

    /// Whether control sequences are stripped from returned lines.
    pub fn prune_control_sequences(&self) -> bool {
        self.prune_control_sequences
    }

    /// Enable or disable per-event diagnostics.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    /// Whether per-event diagnostics are enabled.
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// One step of the read pump: waits up to `limit` for the next
    /// application byte. Negotiation requests encountered on the way are
    /// refused on the spot, before any later byte is surfaced;
    /// subnegotiations and unknown commands are logged and dropped.
    ///
    /// `Ok(None)` means the limit elapsed. End of stream is a connection
    /// error: the server closed on us mid-operation.
    async fn read_data_byte(&mut self, limit: Option<Duration>) -> Result<Option<u8>> {
        loop {
            let item = match limit {
                Some(limit) => match timeout(limit, self.framed.next()).await {
                    Ok(item) => item,
                    Err(_) => return Ok(None),
                },
                None => self.framed.next().await,
            };
            match item {
                None => {
                    return Err(ClientError::Connection(
                        "connection closed by peer".to_string(),
                    ));
                }
                Some(Err(error)) => return Err(error.into()),
                Some(Ok(TelnetEvent::Data(byte))) => return Ok(Some(byte)),
                Some(Ok(TelnetEvent::Negotiation(verb, option))) => {
                    if self.debug {
                        debug!("declining {verb:?} {option}");
                    }
                    if let Some(reply) = verb.refusal(option) {
                        self.framed.send(reply).await.map_err(|error| {
                            ClientError::Connection(format!("writing negotiation reply: {error}"))
                        })?;
                    }
                }
                Some(Ok(TelnetEvent::Subnegotiation(body))) => {
                    if self.debug {
                        debug!("discarding {} byte subnegotiation: {body:02X?}", body.len());
                    }
                }
                Some(Ok(TelnetEvent::Command(command))) => {
                    if self.debug {
                        debug!("ignoring telnet command 0x{command:02X}");
                    }
                }
            }
        }
    }

    /// Pulls every byte the transport can deliver without waiting and
    /// appends the newline-split pieces to `lines`.
    async fn drain_into(&mut self, lines: &mut Vec<String>) -> Result<()> {
        let mut extra: Vec<u8> = Vec::new();
        loop {
            match self.read_data_byte(Some(Duration::ZERO)).await {
                Ok(Some(byte)) => extra.push(byte),
                Ok(None) => break,
                // The server may close right after its prompt; by then
                // everything available has been collected.
                Err(ClientError::Connection(_)) => break,
                Err(error) => return Err(error),
            }
        }
        if extra.is_empty() {
            return Ok(());
        }
        let extra = if self.prune_control_sequences {
            self.parser.parse(&extra);
            self.parser.text_only()
        } else {
            extra
        };
        let text = String::from_utf8_lossy(&extra);
        let mut pieces: Vec<&str> = text.split('\n').collect();
        if pieces.last() == Some(&"") {
            pieces.pop();
        }
        lines.extend(pieces.into_iter().map(str::to_owned));
        Ok(())
    }

    fn finish_line(&mut self, bytes: Vec<u8>) -> Line {
        let bytes = if self.prune_control_sequences {
            self.parser.parse(&bytes);
            self.parser.text_only()
        } else {
            bytes
        };
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let matches_prompt = self
            .prompt
            .is_match(text.strip_suffix('\n').unwrap_or(&text));
        Line {
            text,
            matches_prompt,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(ClientError::Connection("connection is closed".to_string()))
        }
    }
}

/// Compiles a prompt fragment with the end-of-line anchor. The `\s?` keeps
/// prompts like `\$` matching the customary `"$ "` tail.
fn compile_prompt(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"(?:{pattern})\s?$"))?)
}

fn validate(config: &ClientConfig) -> Result<()> {
    if config.port == 0 {
        return Err(ClientError::InvalidArgument(
            "port must be between 1 and 65535".to_string(),
        ));
    }
    Ok(())
}
