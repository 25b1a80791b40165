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

use super::{CodecError, NegotiationVerb, TelnetEvent, TelnetFrame, consts};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

/// The Telnet NVT filter: a stateful demultiplexer that separates in-band
/// protocol sequences from application data.
///
/// The decoder walks the inbound stream one byte at a time and yields
/// [`TelnetEvent`]s. Data bytes come out normalised — `CR LF` becomes `\n`,
/// `IAC IAC` becomes a literal `0xFF` — while IAC sequences are consumed in
/// full before any following data byte is released. Option requests are
/// surfaced as [`TelnetEvent::Negotiation`] so the connection owner can write
/// the refusal on the same socket before reading on; subnegotiation bodies
/// are collected and handed over for logging only.
///
/// State survives across `decode` calls, so the stream may be fragmented at
/// any byte boundary (including between `CR` and its follower, or in the
/// middle of a subnegotiation) without changing the decoded output.
///
/// The encoder half writes [`TelnetFrame`]s: negotiation replies, escaped
/// single bytes, and verbatim command payloads.
///
/// # Example
/// ```rust
/// use telops_telnetcodec::{TelnetCodec, TelnetEvent};
/// use tokio_util::codec::Decoder;
/// use bytes::BytesMut;
///
/// let mut codec = TelnetCodec::new();
/// let mut input = BytesMut::from(&b"ok\r\n"[..]);
/// let mut bytes = Vec::new();
/// while let Some(event) = codec.decode(&mut input).unwrap() {
///     if let TelnetEvent::Data(byte) = event {
///         bytes.push(byte);
///     }
/// }
/// assert_eq!(bytes, b"ok\n");
/// ```
pub struct TelnetCodec {
    decoder_state: DecoderState,
    subnegotiation_buffer: BytesMut,
}

impl TelnetCodec {
    /// Creates a new codec in its initial state (plain data).
    pub fn new() -> TelnetCodec {
        TelnetCodec::default()
    }

    /// Drops any partially accumulated sequence and returns to the initial
    /// state. Called when a connection is (re)established.
    pub fn reset(&mut self) {
        self.decoder_state = DecoderState::Data;
        self.subnegotiation_buffer.clear();
    }
}

impl Default for TelnetCodec {
    fn default() -> Self {
        TelnetCodec {
            decoder_state: DecoderState::Data,
            subnegotiation_buffer: BytesMut::new(),
        }
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetEvent;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        while !src.is_empty() {
            // A pending CR only resolves by looking at the follower. LF is
            // consumed and the pair collapses to '\n'; anything else stays in
            // the buffer to be reprocessed as a fresh byte, so the decision
            // works the same across chunk boundaries.
            if self.decoder_state == DecoderState::CarriageReturn {
                self.decoder_state = DecoderState::Data;
                if src[0] == consts::LF {
                    src.advance(1);
                    return Ok(Some(TelnetEvent::Data(consts::LF)));
                }
                return Ok(Some(TelnetEvent::Data(consts::CR)));
            }

            let byte = src.get_u8();
            match (self.decoder_state, byte) {
                (DecoderState::Data, consts::IAC) => {
                    self.decoder_state = DecoderState::Iac;
                }
                (DecoderState::Data, consts::CR) => {
                    self.decoder_state = DecoderState::CarriageReturn;
                }
                (DecoderState::Data, _) => {
                    return Ok(Some(TelnetEvent::Data(byte)));
                }
                (DecoderState::Iac, consts::IAC) => {
                    // IAC escape: a doubled 0xFF is one data byte.
                    self.decoder_state = DecoderState::Data;
                    return Ok(Some(TelnetEvent::Data(consts::IAC)));
                }
                (DecoderState::Iac, consts::SB) => {
                    self.decoder_state = DecoderState::Subnegotiation;
                }
                (DecoderState::Iac, _) => {
                    if let Some(verb) = NegotiationVerb::from_command(byte) {
                        self.decoder_state = DecoderState::Negotiation(verb);
                    } else {
                        // Unrecognised command: the sequence is IAC X Y, so
                        // one more byte belongs to it before we can resume.
                        self.decoder_state = DecoderState::Command(byte);
                    }
                }
                (DecoderState::Negotiation(verb), _) => {
                    self.decoder_state = DecoderState::Data;
                    return Ok(Some(TelnetEvent::Negotiation(verb, byte.into())));
                }
                (DecoderState::Command(command), _) => {
                    warn!(
                        "ignoring unknown telnet command 0x{:02X} (argument 0x{:02X})",
                        command, byte
                    );
                    self.decoder_state = DecoderState::Data;
                    return Ok(Some(TelnetEvent::Command(command)));
                }
                (DecoderState::Subnegotiation, consts::IAC) => {
                    self.decoder_state = DecoderState::SubnegotiationIac;
                }
                (DecoderState::Subnegotiation, _) => {
                    self.subnegotiation_buffer.put_u8(byte);
                }
                (DecoderState::SubnegotiationIac, consts::SE) => {
                    // The body ends at the first trailing IAC SE pair.
                    self.decoder_state = DecoderState::Data;
                    let body = self.subnegotiation_buffer.split();
                    return Ok(Some(TelnetEvent::Subnegotiation(body)));
                }
                (DecoderState::SubnegotiationIac, consts::IAC) => {
                    // Not a terminator: the first IAC joins the body and the
                    // second stays pending, since IAC SE may still follow.
                    self.subnegotiation_buffer.put_u8(consts::IAC);
                }
                (DecoderState::SubnegotiationIac, _) => {
                    self.subnegotiation_buffer.put_u8(consts::IAC);
                    self.subnegotiation_buffer.put_u8(byte);
                    self.decoder_state = DecoderState::Subnegotiation;
                }
                (DecoderState::CarriageReturn, _) => {
                    // Handled by the peek above before the byte is consumed.
                    unreachable!("carriage return state consumes no bytes here")
                }
            }
        }
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        if let Some(event) = self.decode(src)? {
            return Ok(Some(event));
        }
        // A CR with no follower at end of stream is delivered as data.
        if self.decoder_state == DecoderState::CarriageReturn {
            self.decoder_state = DecoderState::Data;
            return Ok(Some(TelnetEvent::Data(consts::CR)));
        }
        Ok(None)
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetFrame::Raw(payload) => {
                dst.reserve(payload.len());
                dst.put_slice(&payload);
            }
            TelnetFrame::Data(byte) => {
                dst.reserve(2);
                if byte == consts::IAC {
                    dst.put_u8(consts::IAC);
                }
                dst.put_u8(byte);
            }
            TelnetFrame::Do(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DO);
                dst.put_u8(option.into());
            }
            TelnetFrame::Dont(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DONT);
                dst.put_u8(option.into());
            }
            TelnetFrame::Will(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WILL);
                dst.put_u8(option.into());
            }
            TelnetFrame::Wont(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WONT);
                dst.put_u8(option.into());
            }
        }
        Ok(())
    }
}

///
/// Decoder state. `Data` is the initial state; every completed sequence
/// returns to it. The only state that refuses to consume a byte is
/// `CarriageReturn`, which peeks at the follower so that a non-LF byte can
/// be reprocessed from scratch.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecoderState {
    /// Plain application data.
    Data,
    /// Received CR, deciding between `CR LF` and a bare CR.
    CarriageReturn,
    /// Received IAC, next byte is a command.
    Iac,
    /// Received `IAC <DO|DONT|WILL|WONT>`, next byte is the option.
    Negotiation(NegotiationVerb),
    /// Received `IAC <unknown>`, one more byte completes the sequence.
    Command(u8),
    /// Inside `IAC SB`, collecting the body.
    Subnegotiation,
    /// Received IAC inside a subnegotiation; `SE` terminates it.
    SubnegotiationIac,
}
