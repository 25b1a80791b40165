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

use super::{TelnetFrame, TelnetOption, consts};
use bytes::BytesMut;

///
/// `TelnetEvent` is what the decoder hands upstream. Application data comes
/// out one byte at a time, already normalised: `CR LF` pairs have been
/// collapsed to `\n` and doubled IACs unescaped. Everything else is a
/// swallowed protocol sequence surfaced for the caller to answer or log.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetEvent {
    /// One application data byte.
    Data(u8),
    /// A completed `IAC <verb> <option>` negotiation request. The caller is
    /// expected to write [`NegotiationVerb::refusal`] back to the server
    /// before pulling further events.
    Negotiation(NegotiationVerb, TelnetOption),
    /// A completed `IAC SB … IAC SE` exchange. The body (option byte
    /// included, terminator excluded) is handed over for logging; this
    /// client never acts on it.
    Subnegotiation(BytesMut),
    /// An `IAC` sequence with a command byte outside the negotiation set.
    /// The sequence has already been consumed from the data stream.
    Command(u8),
}

///
/// The four option negotiation verbs of RFC 855.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NegotiationVerb {
    /// `IAC DO opt` — the server asks us to perform `opt`.
    Do,
    /// `IAC DONT opt` — the server asks us to stop performing `opt`.
    Dont,
    /// `IAC WILL opt` — the server offers to perform `opt`.
    Will,
    /// `IAC WONT opt` — the server refuses to perform `opt`.
    Wont,
}

impl NegotiationVerb {
    /// Maps a command byte to its verb. `None` for anything that is not a
    /// negotiation command.
    pub fn from_command(byte: u8) -> Option<NegotiationVerb> {
        match byte {
            consts::DO => Some(NegotiationVerb::Do),
            consts::DONT => Some(NegotiationVerb::Dont),
            consts::WILL => Some(NegotiationVerb::Will),
            consts::WONT => Some(NegotiationVerb::Wont),
            _ => None,
        }
    }

    /// The command byte for this verb.
    pub fn command(self) -> u8 {
        match self {
            NegotiationVerb::Do => consts::DO,
            NegotiationVerb::Dont => consts::DONT,
            NegotiationVerb::Will => consts::WILL,
            NegotiationVerb::Wont => consts::WONT,
        }
    }

    /// The frame that declines this request, per the fixed client policy:
    /// `DO`/`DONT` are answered with `WONT`, `WILL` with `DONT`, and `WONT`
    /// needs no answer at all.
    pub fn refusal(self, option: TelnetOption) -> Option<TelnetFrame> {
        match self {
            NegotiationVerb::Do | NegotiationVerb::Dont => Some(TelnetFrame::Wont(option)),
            NegotiationVerb::Will => Some(TelnetFrame::Dont(option)),
            NegotiationVerb::Wont => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NegotiationVerb, TelnetFrame, TelnetOption, consts};

    #[test]
    fn verb_from_command() {
        assert_eq!(
            NegotiationVerb::from_command(consts::DO),
            Some(NegotiationVerb::Do)
        );
        assert_eq!(
            NegotiationVerb::from_command(consts::WONT),
            Some(NegotiationVerb::Wont)
        );
        assert_eq!(NegotiationVerb::from_command(consts::SB), None);
        assert_eq!(NegotiationVerb::from_command(0x00), None);
    }

    #[test]
    fn refusal_policy() {
        assert_eq!(
            NegotiationVerb::Do.refusal(TelnetOption::Echo),
            Some(TelnetFrame::Wont(TelnetOption::Echo))
        );
        assert_eq!(
            NegotiationVerb::Dont.refusal(TelnetOption::NAWS),
            Some(TelnetFrame::Wont(TelnetOption::NAWS))
        );
        assert_eq!(
            NegotiationVerb::Will.refusal(TelnetOption::SuppressGoAhead),
            Some(TelnetFrame::Dont(TelnetOption::SuppressGoAhead))
        );
        assert_eq!(NegotiationVerb::Wont.refusal(TelnetOption::Echo), None);
    }
}
