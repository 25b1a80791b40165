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

use super::TelnetOption;
use bytes::Bytes;

///
/// `TelnetFrame` represents an outbound item for the Telnet encoder. The
/// encoder turns each variant into its wire form; see
/// [`TelnetCodec`](crate::TelnetCodec) for the byte layouts.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetFrame {
    /// A payload written byte-for-byte, with no IAC escaping. This is what
    /// the administration client uses for command lines: the current
    /// contract is verbatim transmission. Callers that need to move 8-bit
    /// clean data should feed it through [`TelnetFrame::Data`] instead.
    Raw(Bytes),
    /// A single data byte, IAC-escaped on the wire when it is `0xFF`.
    Data(u8),
    /// Request the other party perform an option (`IAC DO opt`).
    Do(TelnetOption),
    /// Demand the other party stop performing an option (`IAC DONT opt`).
    Dont(TelnetOption),
    /// Offer to perform an option (`IAC WILL opt`).
    Will(TelnetOption),
    /// Refuse to perform an option (`IAC WONT opt`).
    Wont(TelnetOption),
}
