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

//! Client configuration

use std::time::Duration;

/// Telnet client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Per-byte read timeout (None for no timeout). The timer restarts on
    /// every received byte.
    pub socket_timeout: Option<Duration>,

    /// Budget for completing a line once its first byte has arrived (None to
    /// wait indefinitely for the terminating newline). On expiry the partial
    /// line is returned as-is.
    pub full_line_timeout: Option<Duration>,

    /// Prompt pattern signalling command completion. Matched against the end
    /// of each received line, with tolerance for one trailing whitespace.
    pub prompt: String,

    /// Strip ANSI/ASCII control sequences from returned lines
    pub prune_control_sequences: bool,

    /// After a prompt match, also collect whatever bytes are already buffered
    pub drain_on_prompt: bool,

    /// Emit per-event diagnostics through `tracing`
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 23,
            connect_timeout: Duration::from_secs(10),
            socket_timeout: Some(Duration::from_secs(10)),
            full_line_timeout: Some(Duration::from_secs(1)),
            prompt: r"\$".to_string(),
            prune_control_sequences: false,
            drain_on_prompt: false,
            debug: false,
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-byte read timeout
    pub fn with_socket_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.socket_timeout = timeout;
        self
    }

    /// Set the full-line timeout
    pub fn with_full_line_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.full_line_timeout = timeout;
        self
    }

    /// Set the prompt pattern (a regular expression fragment)
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Enable stripping of control sequences from returned lines
    pub fn with_prune_control_sequences(mut self, enabled: bool) -> Self {
        self.prune_control_sequences = enabled;
        self
    }

    /// Enable draining of already-buffered data after a prompt match
    pub fn with_drain_on_prompt(mut self, enabled: bool) -> Self {
        self.drain_on_prompt = enabled;
        self
    }

    /// Enable per-event diagnostics
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
