use protoget_common::{LineMap, Position};

#[test]
fn offset_to_position_tracks_lines() {
    let source = "package p\n\nfunc f() {\n\tx := 1\n}\n";
    let map = LineMap::build(source);

    assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
    assert_eq!(map.offset_to_position(8, source), Position::new(0, 8));
    // "func" starts line 2
    assert_eq!(map.offset_to_position(11, source), Position::new(2, 0));
    // "x" after the tab on line 3
    assert_eq!(map.offset_to_position(23, source), Position::new(3, 1));
}

#[test]
fn crlf_counts_as_one_line_ending() {
    let source = "a\r\nb\rc";
    let map = LineMap::build(source);

    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(3, source), Position::new(1, 0));
    assert_eq!(map.offset_to_position(5, source), Position::new(2, 0));
}

#[test]
fn position_round_trips_through_offset() {
    let source = "first\nsécond line\nthird";
    let map = LineMap::build(source);

    let offset = source.find("line").unwrap() as u32;
    let position = map.offset_to_position(offset, source);
    assert_eq!(position, Position::new(1, 7));
    assert_eq!(map.position_to_offset(position, source), Some(offset));
}

#[test]
fn line_text_strips_terminators() {
    let source = "one\r\ntwo\nthree";
    let map = LineMap::build(source);

    assert_eq!(map.line_text(0, source), Some("one"));
    assert_eq!(map.line_text(1, source), Some("two"));
    assert_eq!(map.line_text(2, source), Some("three"));
    assert_eq!(map.line_text(3, source), None);
}
