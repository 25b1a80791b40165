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

use crate::parser::AnsiParser;

/// Removes escape and CSI control sequences from a byte string, keeping only
/// the text runs.
///
/// This is the one-shot form of [`AnsiParser::text_only`]: it classifies the
/// input and concatenates the text segments. A trailing unterminated
/// sequence is dropped along with the complete ones.
///
/// # Examples
///
/// ```
/// use telops_ansicodec::strip_control_sequences;
///
/// let colored = b"\x1B[1;31mRed Text\x1B[0m";
/// assert_eq!(strip_control_sequences(colored), b"Red Text");
///
/// // Input without sequences comes back unchanged.
/// assert_eq!(strip_control_sequences(b"plain"), b"plain");
/// ```
pub fn strip_control_sequences(input: &[u8]) -> Vec<u8> {
    // Cheap path: nothing to strip without an ESC anywhere.
    if !input.contains(&0x1B) {
        return input.to_vec();
    }
    let mut parser = AnsiParser::new();
    parser.parse(input);
    parser.text_only()
}
