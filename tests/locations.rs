//! Offset and position conversion

use proptest::prelude::*;
use rstest::rstest;
use ux_i18n::i18n::ast::{line_offsets, Position, Range, SourceLocation};

#[rstest]
#[case::lf("a\nb", 2, Position::new(1, 0))]
#[case::crlf("a\r\nb", 3, Position::new(1, 0))]
#[case::inside_crlf("a\r\nb", 2, Position::new(0, 2))]
#[case::lone_cr("a\rb", 2, Position::new(1, 0))]
#[case::byte_columns("äb\nc", 2, Position::new(0, 2))]
#[case::past_end("ab", 99, Position::new(0, 2))]
fn test_position_at(#[case] text: &str, #[case] offset: usize, #[case] expected: Position) {
    assert_eq!(SourceLocation::new(text).position_at(offset), expected);
}

#[test]
fn test_line_offsets() {
    assert_eq!(line_offsets(""), vec![0]);
    assert_eq!(line_offsets("a\nb\r\nc\r"), vec![0, 2, 5, 7]);
}

#[test]
fn test_range_at_spans_lines() {
    let location = SourceLocation::new("key=one \\\n  two\n");
    let range = location.range_at(4, 15);
    assert_eq!(range.span, 4..15);
    assert_eq!(range.start, Position::new(0, 4));
    assert_eq!(range.end, Position::new(1, 5));
    assert!(range.contains(Position::new(1, 0)));
    assert!(!range.contains(Position::new(2, 0)));
}

#[test]
fn test_bounding_box() {
    let location = SourceLocation::new("ab\ncd\n");
    let ranges = [location.range_at(3, 5), location.range_at(1, 2)];
    let bounds = Range::bounding_box(ranges.iter()).expect("bounds");
    assert_eq!(bounds.span, 1..5);
    assert_eq!(bounds.start, Position::new(0, 1));
    assert_eq!(bounds.end, Position::new(1, 2));
    assert!(Range::bounding_box(std::iter::empty::<&Range>()).is_none());
}

proptest! {
    #[test]
    fn prop_offset_position_round_trip(text in "[a-zé \r\n]{0,40}", pick in any::<prop::sample::Index>()) {
        let location = SourceLocation::new(&text);
        let boundaries: Vec<usize> = (0..=text.len()).filter(|i| text.is_char_boundary(*i)).collect();
        let offset = boundaries[pick.index(boundaries.len())];
        prop_assert_eq!(location.offset_at(location.position_at(offset)), offset);
    }

    #[test]
    fn prop_positions_are_monotonic(text in "[a-z\r\n]{0,40}") {
        let location = SourceLocation::new(&text);
        let positions: Vec<Position> = (0..=text.len()).map(|o| location.position_at(o)).collect();
        for pair in positions.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }
}
