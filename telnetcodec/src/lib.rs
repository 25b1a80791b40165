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

//! # Telops Telnet Protocol Codec
//!
//! This crate implements the client side of the Telnet protocol's in-band
//! command channel (RFC 854/855): a byte-stream filter that separates
//! application data from IAC sequences. It is designed to work with
//! asynchronous networking libraries like Tokio and exposes a stateful
//! [`Decoder`]/[`Encoder`] pair for use with `tokio_util::codec::Framed`.
//!
//! ## Overview
//!
//! The decoder consumes an arbitrary fragmentation of the server's byte
//! stream and yields [`TelnetEvent`]s:
//!
//! - **Data bytes**, already normalised: `CR LF` collapses to `\n` and the
//!   doubled-IAC escape (`0xFF 0xFF`) to a single `0xFF`.
//! - **Negotiation requests** (`IAC DO/DONT/WILL/WONT opt`), surfaced so the
//!   connection owner can refuse them — this client never enables an option.
//! - **Subnegotiation bodies** (`IAC SB … IAC SE`), collected and handed
//!   over for logging; their content is never acted upon.
//! - **Unknown commands**, swallowed whole and reported for diagnostics.
//!
//! All bytes of an IAC sequence are consumed before any following data byte
//! is released, and `CR LF` rewriting happens only in the plain-data state,
//! never inside a sequence.
//!
//! ## Usage Example
//!
//! ```rust
//! use telops_telnetcodec::{NegotiationVerb, TelnetCodec, TelnetEvent};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! let mut codec = TelnetCodec::new();
//! let mut input = BytesMut::from(&b"ok\r\n\xFF\xFD\x01"[..]); // data + DO Echo
//! let mut replies = BytesMut::new();
//! while let Some(event) = codec.decode(&mut input).unwrap() {
//!     match event {
//!         TelnetEvent::Data(byte) => println!("data: 0x{byte:02X}"),
//!         TelnetEvent::Negotiation(verb, option) => {
//!             if let Some(frame) = verb.refusal(option) {
//!                 codec.encode(frame, &mut replies).unwrap();
//!             }
//!         }
//!         _ => {}
//!     }
//! }
//! assert_eq!(&replies[..], &[0xFF, 0xFC, 0x01]); // IAC WONT Echo
//! ```
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 857: Telnet Echo Option
//! - RFC 858: Telnet Suppress Go Ahead Option
//! - RFC 1073, 1079, 1091, 1116: options this client declines by policy

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod consts;

mod codec;
mod event;
mod frame;
mod options;
mod result;

pub use self::codec::TelnetCodec;
pub use self::event::{NegotiationVerb, TelnetEvent};
pub use self::frame::TelnetFrame;
pub use self::options::TelnetOption;
pub use self::result::{CodecError, CodecResult};
