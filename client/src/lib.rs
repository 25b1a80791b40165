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

//! # Telops Client
//!
//! A scriptable Telnet client for administering network equipment: connect,
//! log in, send a command, get back the lines the server printed up to its
//! next prompt. Built on the [`telops_telnetcodec`] NVT filter (option
//! requests are always declined) and the [`telops_ansicodec`] segmenter
//! (optional stripping of ANSI control sequences from returned text).
//!
//! The client is driven entirely by the calling task — there is no
//! background reader. Reads run under two budgets: a per-byte socket timeout
//! that restarts with every received byte, and a full-line budget that
//! returns a partial line when a server stops mid-line (which is exactly
//! what a prompt without a newline looks like).
//!
//! See [`TelnetClient`] for a usage example.

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod client;
mod config;
mod error;

pub use self::client::{Line, TelnetClient};
pub use self::config::ClientConfig;
pub use self::error::{ClientError, Result};
pub use telops_ansicodec::{AnsiParser, Segment, SegmentKind, strip_control_sequences};
pub use telops_telnetcodec::{
    NegotiationVerb, TelnetCodec, TelnetEvent, TelnetFrame, TelnetOption,
};
