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

mod parser;
mod segment;
mod strip;

pub use self::parser::AnsiParser;
pub use self::segment::{Segment, SegmentKind};
pub use self::strip::strip_control_sequences;

#[cfg(test)]
mod tests {
    use super::{AnsiParser, strip_control_sequences};

    #[test]
    fn parse_and_strip_agree() {
        let input = b"a\x1B[2Jb";
        let mut parser = AnsiParser::new();
        parser.parse(input);
        assert_eq!(parser.text_only(), strip_control_sequences(input));
    }
}
