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

//! Integration tests for the ANSI segmenter

use telops_ansicodec::{AnsiParser, SegmentKind};

// ============================================================================
// Helper Functions
// ============================================================================

fn kinds(parser: &AnsiParser) -> Vec<SegmentKind> {
    parser.segments().iter().map(|s| s.kind).collect()
}

// ============================================================================
// Segmentation
// ============================================================================

#[test]
fn colored_prompt_segments_in_order() {
    let input = b"hi\x1B[31mRED\x1B[0m bye";
    let mut parser = AnsiParser::new();
    parser.parse(input);
    assert_eq!(
        kinds(&parser),
        vec![
            SegmentKind::Text,
            SegmentKind::Control,
            SegmentKind::Text,
            SegmentKind::Control,
            SegmentKind::Text,
        ]
    );
    assert_eq!(parser.text_only(), b"hiRED bye");
    assert_eq!(parser.full(), input);
}

#[test]
fn csi_with_parameters_and_intermediates() {
    // Parameter bytes (digits, ';') and an intermediate before the final.
    let input = b"\x1B[1;31;40m\x1B[?25l";
    let mut parser = AnsiParser::new();
    parser.parse(input);
    assert_eq!(kinds(&parser), vec![SegmentKind::Control, SegmentKind::Control]);
    assert_eq!(parser.segments()[0].bytes, b"\x1B[1;31;40m");
    assert_eq!(parser.segments()[1].bytes, b"\x1B[?25l");
}

#[test]
fn consecutive_escapes_close_each_other() {
    // A second ESC interrupts the pending sequence, which is kept as an
    // incomplete segment so the round trip still holds.
    let input = b"\x1B\x1B7";
    let mut parser = AnsiParser::new();
    parser.parse(input);
    let segments = parser.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].kind, SegmentKind::Escape);
    assert!(!segments[0].complete);
    assert_eq!(segments[1].kind, SegmentKind::Escape);
    assert!(segments[1].complete);
    assert_eq!(parser.full(), input);
}

#[test]
fn escape_interrupting_csi() {
    let input = b"\x1B[31\x1B[32m";
    let mut parser = AnsiParser::new();
    parser.parse(input);
    let segments = parser.segments();
    assert_eq!(segments.len(), 2);
    assert!(!segments[0].complete);
    assert_eq!(segments[0].bytes, b"\x1B[31");
    assert!(segments[1].complete);
    assert_eq!(segments[1].bytes, b"\x1B[32m");
}

#[test]
fn lone_escape_at_end_is_incomplete() {
    let input = b"tail\x1B";
    let mut parser = AnsiParser::new();
    parser.parse(input);
    let segments = parser.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].kind, SegmentKind::Escape);
    assert_eq!(segments[1].bytes, b"\x1B");
    assert!(!segments[1].complete);
}

#[test]
fn control_characters_stay_in_text() {
    // BEL, TAB and LF are not ESC; they belong to the text stream.
    let input = b"a\x07b\tc\n";
    let mut parser = AnsiParser::new();
    parser.parse(input);
    assert_eq!(kinds(&parser), vec![SegmentKind::Text]);
    assert_eq!(parser.text_only(), input);
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn round_trip_reproduces_input() {
    let inputs: &[&[u8]] = &[
        b"",
        b"plain",
        b"\x1B[31m",
        b"\x1B",
        b"\x1B[",
        b"\x1B[12;3",
        b"mid\x1Bstream\x1B[0m",
        b"\x1B7restore\x1B8",
        b"a\x1B[Ab\x1B[Bc",
    ];
    for input in inputs {
        let mut parser = AnsiParser::new();
        parser.parse(input);
        assert_eq!(
            parser.full(),
            *input,
            "round trip failed for {input:02X?}"
        );
    }
}

#[test]
fn text_projection_contains_no_escapes() {
    let inputs: &[&[u8]] = &[
        b"hi\x1B[31mRED\x1B[0m bye",
        b"\x1B[2J\x1B[H$ ",
        b"x\x1B7y\x1B8z",
        b"cut\x1B[9",
    ];
    for input in inputs {
        let mut parser = AnsiParser::new();
        parser.parse(input);
        let text = parser.text_only();
        assert!(
            !text.contains(&0x1B),
            "ESC leaked into text for {input:02X?}"
        );
    }
}

#[test]
fn incomplete_only_on_last_segment() {
    let input = b"\x1B[31mok\x1B[4";
    let mut parser = AnsiParser::new();
    parser.parse(input);
    let segments = parser.segments();
    for segment in &segments[..segments.len() - 1] {
        assert!(segment.complete);
    }
    assert!(!segments.last().unwrap().complete);
}
