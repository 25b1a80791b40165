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

//! Client error types

use std::fmt;
use std::io;
use telops_telnetcodec::CodecError;

/// Client error type
///
/// Nothing is retried internally; every failure propagates to the caller of
/// the public operation that hit it.
#[derive(Debug)]
pub enum ClientError {
    /// A constructor or setter argument failed validation
    InvalidArgument(String),

    /// The host name did not resolve to a usable address
    NameResolution(String),

    /// Connecting, reading or writing failed
    Connection(String),

    /// No byte arrived within the socket timeout
    ConnectionTimeout,

    /// A login step failed; carries the underlying cause
    Login(Box<ClientError>),

    /// An internal state that should be unreachable was entered
    Unimplemented(String),

    /// Closing the connection itself failed
    Unlikely(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Self::NameResolution(msg) => write!(f, "Name resolution failed: {}", msg),
            Self::Connection(msg) => write!(f, "Connection error: {}", msg),
            Self::ConnectionTimeout => write!(f, "Connection timeout"),
            Self::Login(cause) => write!(f, "Login failed: {}", cause),
            Self::Unimplemented(msg) => write!(f, "Unimplemented internal state: {}", msg),
            Self::Unlikely(msg) => write!(f, "Close failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Login(cause) => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for ClientError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Self::ConnectionTimeout,
            _ => Self::Connection(error.to_string()),
        }
    }
}

impl From<CodecError> for ClientError {
    fn from(error: CodecError) -> Self {
        match error {
            CodecError::Io(io_error) => io_error.into(),
        }
    }
}

impl From<regex::Error> for ClientError {
    fn from(error: regex::Error) -> Self {
        Self::InvalidArgument(error.to_string())
    }
}

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::ClientError;
    use std::error::Error;

    #[test]
    fn login_carries_its_cause() {
        let error = ClientError::Login(Box::new(ClientError::ConnectionTimeout));
        assert_eq!(format!("{error}"), "Login failed: Connection timeout");
        assert!(error.source().is_some());
    }

    #[test]
    fn io_timeout_maps_to_connection_timeout() {
        let io_error = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        assert!(matches!(
            ClientError::from(io_error),
            ClientError::ConnectionTimeout
        ));
    }

    #[test]
    fn bad_regex_maps_to_invalid_argument() {
        let error = regex::Regex::new("(").unwrap_err();
        assert!(matches!(
            ClientError::from(error),
            ClientError::InvalidArgument(_)
        ));
    }
}
