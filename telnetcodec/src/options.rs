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

use crate::consts;

///
/// [Telnet Terminal Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
/// a server is likely to offer to an administration client. Every other code
/// is carried as [`TelnetOption::Unknown`]; this client refuses all of them
/// alike, so the table exists for diagnostics rather than negotiation state.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`consts::option::ECHO`] Telnet Echo Option [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`consts::option::SGA`] Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`consts::option::STATUS`] Telnet Status Option [RFC859](https://tools.ietf.org/html/rfc859)
    Status,
    /// [`consts::option::TTYPE`] Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    TTYPE,
    /// [`consts::option::NAWS`] Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    NAWS,
    /// [`consts::option::LINEMODE`] Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    Linemode,
    /// [`consts::option::NEW_ENVIRON`] New Environment Option [RFC1572](https://tools.ietf.org/html/rfc1572)
    NewEnvironment,
    /// Any other option code.
    Unknown(u8),
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        match byte {
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SGA => TelnetOption::SuppressGoAhead,
            consts::option::STATUS => TelnetOption::Status,
            consts::option::TTYPE => TelnetOption::TTYPE,
            consts::option::NAWS => TelnetOption::NAWS,
            consts::option::LINEMODE => TelnetOption::Linemode,
            consts::option::NEW_ENVIRON => TelnetOption::NewEnvironment,
            other => TelnetOption::Unknown(other),
        }
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        match option {
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SGA,
            TelnetOption::Status => consts::option::STATUS,
            TelnetOption::TTYPE => consts::option::TTYPE,
            TelnetOption::NAWS => consts::option::NAWS,
            TelnetOption::Linemode => consts::option::LINEMODE,
            TelnetOption::NewEnvironment => consts::option::NEW_ENVIRON,
            TelnetOption::Unknown(other) => other,
        }
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::Unknown(code) => write!(f, "Unknown({code})"),
            other => write!(f, "{other:?}"),
        }
    }
}
