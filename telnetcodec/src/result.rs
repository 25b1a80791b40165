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

/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Represents possible errors that can occur in the codec handling process.
///
/// Decoding itself cannot fail: malformed input is swallowed and surfaced as
/// [`TelnetEvent::Command`](crate::TelnetEvent::Command) events. The only
/// error source is the I/O plumbing underneath a `Framed` transport.
#[derive(Debug)]
pub enum CodecError {
    /// An I/O error occurred while reading from or writing to the underlying stream.
    Io(std::io::Error),
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Io(err) => Some(err),
        }
    }
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err)
    }
}
