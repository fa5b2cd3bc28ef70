use super::*;

#[test]
fn splits_on_blank_lines() {
    assert_eq!(split_sections("A\n\nB\n\nC"), vec!["A", "B", "C"]);
}

#[test]
fn empty_content_yields_no_sections() {
    assert!(split_sections("").is_empty());
}

#[test]
fn whitespace_only_sections_are_dropped() {
    assert!(split_sections("   \n\n  ").is_empty());
    assert_eq!(split_sections("A\n\n   \n\nB"), vec!["A", "B"]);
}

#[test]
fn single_newlines_stay_within_a_section() {
    assert_eq!(
        split_sections("line one\nline two\n\nline three"),
        vec!["line one\nline two", "line three"]
    );
}

#[test]
fn blank_lines_with_trailing_spaces_still_split() {
    assert_eq!(split_sections("A\n   \nB"), vec!["A", "B"]);
}

#[test]
fn sections_are_trimmed() {
    assert_eq!(split_sections("  padded  \n\nnext"), vec!["padded", "next"]);
}

#[test]
fn order_matches_appearance() {
    let content = "zebra\n\napple\n\nmiddle";
    assert_eq!(split_sections(content), vec!["zebra", "apple", "middle"]);
}

#[test]
fn multiple_consecutive_blank_lines_collapse() {
    assert_eq!(split_sections("A\n\n\n\n\nB"), vec!["A", "B"]);
}

#[test]
fn label_is_bounded() {
    let text = "x".repeat(200);
    assert_eq!(section_label(&text).chars().count(), SECTION_LABEL_MAX_CHARS);
}

#[test]
fn label_preserves_short_text() {
    assert_eq!(section_label("short"), "short");
}

#[test]
fn label_respects_char_boundaries() {
    let text = "é".repeat(60);
    assert_eq!(section_label(&text), "é".repeat(SECTION_LABEL_MAX_CHARS));
}
