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

//! Telnet protocol byte values (RFC 854/855).

/// Interpret As Command. Prefix for all in-band Telnet commands.
pub const IAC: u8 = 0xFF;
/// Demand the other party stop performing an option.
pub const DONT: u8 = 0xFE;
/// Request the other party perform an option.
pub const DO: u8 = 0xFD;
/// Refuse to perform an option.
pub const WONT: u8 = 0xFC;
/// Offer to perform an option.
pub const WILL: u8 = 0xFB;
/// Subnegotiation Begin.
pub const SB: u8 = 0xFA;
/// Subnegotiation End.
pub const SE: u8 = 0xF0;

/// Carriage Return.
pub const CR: u8 = 0x0D;
/// Line Feed.
pub const LF: u8 = 0x0A;

/// Telnet option codes this client can be offered. None are ever accepted;
/// see [`NegotiationVerb::refusal`](crate::NegotiationVerb::refusal).
pub mod option {
    /// Echo [RFC857](https://tools.ietf.org/html/rfc857)
    pub const ECHO: u8 = 0x01;
    /// Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    pub const SGA: u8 = 0x03;
    /// Status [RFC859](https://tools.ietf.org/html/rfc859)
    pub const STATUS: u8 = 0x05;
    /// Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    pub const TTYPE: u8 = 0x18;
    /// Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    pub const NAWS: u8 = 0x1F;
    /// Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    pub const LINEMODE: u8 = 0x22;
    /// New Environment [RFC1572](https://tools.ietf.org/html/rfc1572)
    pub const NEW_ENVIRON: u8 = 0x27;
}
