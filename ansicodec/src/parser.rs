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

use crate::segment::{Segment, SegmentKind};

/// The escape character that introduces every sequence we classify.
const ESC: u8 = 0x1B;
/// The CSI introducer following ESC.
const CSI_OPEN: u8 = b'[';

/// Internal state machine states for the ANSI parser.
///
/// The parser transitions between states based on the input bytes,
/// accumulating data until a segment can be closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Plain text processing state. Everything except ESC stays here,
    /// control characters included.
    Text,
    /// Inside a bare escape sequence (`ESC` without `[`). A byte in
    /// `0x30..=0x7E` terminates it.
    Escape,
    /// Inside a CSI sequence (`ESC [`). Parameter and intermediate bytes
    /// accumulate until a final byte in `0x40..=0x7E`.
    Control,
}

/// A parser that segments a byte string into alternating runs of plain text,
/// escape sequences, and CSI control sequences.
///
/// The parser is reusable: each call to [`parse`](AnsiParser::parse) resets
/// the segment list and processes its input in full, so one instance can
/// serve every line of a connection. The resulting segments concatenate back
/// to the exact input; callers keep the [`SegmentKind::Text`] runs and drop
/// the rest, or reassemble everything via [`full`](AnsiParser::full).
///
/// Input that ends in the middle of a sequence is not an error: the partial
/// sequence is emitted as a final segment with `complete == false`.
///
/// # Example
/// ```rust
/// use telops_ansicodec::AnsiParser;
///
/// let mut parser = AnsiParser::new();
/// parser.parse(b"hi\x1B[31mRED\x1B[0m bye");
/// assert_eq!(parser.text_only(), b"hiRED bye");
/// ```
pub struct AnsiParser {
    /// Current state of the state machine.
    state: State,
    /// Bytes accumulated toward the current segment.
    buffer: Vec<u8>,
    /// Segments produced by the current `parse` call.
    segments: Vec<Segment>,
}

impl AnsiParser {
    /// Creates a new parser in its initial state.
    pub fn new() -> AnsiParser {
        AnsiParser {
            state: State::Text,
            buffer: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Parses `input` into segments, replacing the result of any previous
    /// call, and returns the segment list.
    pub fn parse(&mut self, input: &[u8]) -> &[Segment] {
        self.segments.clear();
        self.buffer.clear();
        self.state = State::Text;

        let mut index = 0;
        while index < input.len() {
            let byte = input[index];

            if byte == ESC {
                // ESC always opens a new sequence; whatever was in flight is
                // closed first, incomplete if it was itself a sequence.
                self.close_current();
                if input.get(index + 1) == Some(&CSI_OPEN) {
                    self.state = State::Control;
                    self.buffer.push(ESC);
                    self.buffer.push(CSI_OPEN);
                    index += 2;
                } else {
                    self.state = State::Escape;
                    self.buffer.push(ESC);
                    index += 1;
                }
                continue;
            }

            self.buffer.push(byte);
            match self.state {
                State::Text => {}
                State::Escape => {
                    if (0x30..=0x7E).contains(&byte) {
                        self.emit(SegmentKind::Escape, true);
                        self.state = State::Text;
                    }
                }
                State::Control => {
                    if (0x40..=0x7E).contains(&byte) {
                        self.emit(SegmentKind::Control, true);
                        self.state = State::Text;
                    }
                }
            }
            index += 1;
        }

        self.close_current();
        self.state = State::Text;
        &self.segments
    }

    /// The segments from the most recent [`parse`](AnsiParser::parse) call.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Concatenates the bytes of every text segment, in order.
    pub fn text_only(&self) -> Vec<u8> {
        self.segments
            .iter()
            .filter(|segment| segment.is_text())
            .flat_map(|segment| segment.bytes.iter().copied())
            .collect()
    }

    /// Concatenates the bytes of every segment, reproducing the parsed
    /// input exactly.
    pub fn full(&self) -> Vec<u8> {
        self.segments
            .iter()
            .flat_map(|segment| segment.bytes.iter().copied())
            .collect()
    }

    /// Closes whatever segment is currently accumulating. Text closes
    /// complete (and only if non-empty); a sequence cut short closes
    /// incomplete.
    fn close_current(&mut self) {
        match self.state {
            State::Text => {
                if !self.buffer.is_empty() {
                    self.emit(SegmentKind::Text, true);
                }
            }
            State::Escape => self.emit(SegmentKind::Escape, false),
            State::Control => self.emit(SegmentKind::Control, false),
        }
    }

    fn emit(&mut self, kind: SegmentKind, complete: bool) {
        let bytes = std::mem::take(&mut self.buffer);
        self.segments.push(Segment::new(kind, bytes, complete));
    }
}

impl Default for AnsiParser {
    fn default() -> Self {
        AnsiParser::new()
    }
}
