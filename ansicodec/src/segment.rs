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

/// Classification of a parsed segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Plain bytes, including control characters other than ESC.
    Text,
    /// An escape sequence: ESC followed by a single final byte in
    /// `0x30..=0x7E`.
    Escape,
    /// A CSI sequence: ESC `[`, parameter/intermediate bytes, and a final
    /// byte in `0x40..=0x7E`.
    Control,
}

/// One run of bytes from the input, tagged with its classification.
///
/// Segments preserve the input exactly: concatenating the `bytes` of every
/// segment in order reproduces the parsed string. `complete` is `false` only
/// for a trailing `Escape`/`Control` segment whose final byte never arrived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// What this run of bytes is.
    pub kind: SegmentKind,
    /// The raw bytes of the segment, introducer included.
    pub bytes: Vec<u8>,
    /// Whether the segment was fully terminated within the input.
    pub complete: bool,
}

impl Segment {
    pub(crate) fn new(kind: SegmentKind, bytes: Vec<u8>, complete: bool) -> Segment {
        Segment {
            kind,
            bytes,
            complete,
        }
    }

    /// `true` for [`SegmentKind::Text`] segments.
    pub fn is_text(&self) -> bool {
        self.kind == SegmentKind::Text
    }
}
