//! Tests for set and remove

use ckv::{Document, EditKind, ErrorKind};
use pretty_assertions::assert_eq;

const SAMPLE: &str = "a = 1\nb =\n\tc = 2\n";

#[test]
fn test_set_nested_value() {
    let mut doc = Document::parse(SAMPLE).unwrap();
    let edit = doc.set_value("b.c", "9").unwrap();
    assert_eq!(doc.render(), "a = 1\nb =\n\tc = 9\n");
    assert_eq!(edit.kind, EditKind::Replace);
    assert_eq!(edit.line(), 3);
    assert_eq!(edit.old_content, "\tc = 2");
    assert_eq!(edit.new_content, "\tc = 9");
}

#[test]
fn test_set_value_to_sink() {
    let mut doc = Document::parse(SAMPLE).unwrap();
    doc.set_value("b.c", "9").unwrap();
    let mut out = Vec::new();
    doc.write_to(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "a = 1\nb =\n\tc = 9\n");
}

#[test]
fn test_set_block_fails() {
    let mut doc = Document::parse(SAMPLE).unwrap();
    let err = doc.set_value("b", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoValueFoundForKey);
    assert_eq!(doc.render(), SAMPLE);
}

#[test]
fn test_set_missing_key_does_not_create() {
    let mut doc = Document::parse(SAMPLE).unwrap();
    let err = doc.set_value("b.d", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    assert_eq!(err.to_string(), "\"b.d\": key not found");
    assert_eq!(doc.render(), SAMPLE);
}

#[test]
fn test_set_preserves_other_lines() {
    let source = "x=1\r\n\nserver =\n\thost   =  localhost  \n\tport=80\r\nz = \"q\"";
    let mut doc = Document::parse(source).unwrap();
    doc.set_value("server.port", "8080").unwrap();
    assert_eq!(
        doc.render(),
        "x=1\r\n\nserver =\n\thost   =  localhost  \n\tport = 8080\r\nz = \"q\""
    );
}

#[test]
fn test_set_then_get() {
    let mut doc = Document::parse(SAMPLE).unwrap();
    doc.set_value("a", "\"quoted\" text").unwrap();
    assert_eq!(doc.get("a").unwrap(), "\"quoted\" text");
    assert_eq!(doc.render(), "a = \"\\\"quoted\\\" text\"\nb =\n\tc = 2\n");
}

#[test]
fn test_remove_block() {
    let mut doc = Document::parse(SAMPLE).unwrap();
    let edit = doc.remove("b").unwrap();
    assert_eq!(doc.render(), "a = 1\n");
    assert_eq!(edit.kind, EditKind::Delete);
    assert_eq!(edit.span, 1..3);
    assert_eq!(edit.old_content, "b =\n\tc = 2\n");
    assert!(!doc.contains("b.c"));
}

#[test]
fn test_remove_leaf_in_block() {
    let mut doc = Document::parse("b =\n\tc = 2\n\td = 3\ne = 4\n").unwrap();
    doc.remove("b.c").unwrap();
    assert_eq!(doc.render(), "b =\n\td = 3\ne = 4\n");
    doc.remove("b.d").unwrap();
    assert_eq!(doc.render(), "b =\ne = 4\n");
    assert_eq!(doc.get("b").unwrap_err().kind(), ErrorKind::NoValueFoundForKey);
}

#[test]
fn test_remove_missing_key() {
    let mut doc = Document::parse(SAMPLE).unwrap();
    let err = doc.remove("nope").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    assert_eq!(doc.render(), SAMPLE);
}

#[test]
fn test_remove_duplicate_removes_last() {
    let mut doc = Document::parse("a = 1\nb = 2\na = 3\n").unwrap();
    doc.remove("a").unwrap();
    assert_eq!(doc.render(), "a = 1\nb = 2\n");
    assert_eq!(doc.get("a").unwrap(), "1");
}

#[test]
fn test_edits_compose() {
    let mut doc = Document::parse("a = 1\nb =\n\tc = 2\n\td = 3\ne = 4\n").unwrap();
    doc.remove("a").unwrap();
    doc.set_value("b.d", "30").unwrap();
    doc.remove("e").unwrap();
    assert_eq!(doc.render(), "b =\n\tc = 2\n\td = 30\n");
    assert_eq!(doc.nodes()[0].line(), 1);
}
