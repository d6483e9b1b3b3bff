//! Line splitting and classification
//!
//! A ckv line is `TAB* (KEY "=" VALUE?)?`. The number of leading tabs is the
//! line's depth; whatever follows them is the payload. Classification looks
//! at a single line in isolation. Whether a line is allowed at its depth is
//! decided by the parser.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::options::ParseOptions;

/// Line terminator of a source line, kept so untouched lines round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
    /// Last line of a file without a trailing newline.
    None,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::None => "",
        }
    }
}

/// One line of source text, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    pub ending: LineEnding,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, ending: LineEnding) -> Self {
        Self {
            text: text.into(),
            ending,
        }
    }
}

/// Split source text into lines, remembering each line's terminator.
///
/// An empty source has no lines. A source ending in a newline does not get
/// a trailing empty line.
pub fn split_lines(source: &str) -> Vec<SourceLine> {
    source
        .split_inclusive('\n')
        .map(|raw| {
            if let Some(text) = raw.strip_suffix("\r\n") {
                SourceLine::new(text, LineEnding::CrLf)
            } else if let Some(text) = raw.strip_suffix('\n') {
                SourceLine::new(text, LineEnding::Lf)
            } else {
                SourceLine::new(raw, LineEnding::None)
            }
        })
        .collect()
}

/// A leaf value as found on its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    /// The value with quotes and escapes removed.
    pub value: String,
    /// Byte range of the value token (quotes included) within the line text.
    pub span: Range<usize>,
    pub quoted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// `key = value`
    Entry { key: String, scalar: Scalar },
    /// `key =`, opening a nested block.
    Opener { key: String },
    /// Non-blank content with no `=`.
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub depth: usize,
    pub kind: LineKind,
}

impl Classified {
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, LineKind::Blank)
    }
}

/// Classify one line. `line` is the 1-based number used in errors.
pub fn classify(text: &str, line: usize, options: &ParseOptions) -> Result<Classified> {
    let depth = text.bytes().take_while(|b| *b == b'\t').count();
    let payload = &text[depth..];

    if payload.trim_matches([' ', '\t']).is_empty() {
        return Ok(Classified {
            depth,
            kind: LineKind::Blank,
        });
    }

    if let Some(ch) = payload.chars().find(|c| c.is_control() && *c != '\t') {
        return Err(Error::InvalidCharacter { ch, line: Some(line) });
    }

    let Some(eq) = payload.find('=') else {
        return Ok(Classified {
            depth,
            kind: LineKind::Bare,
        });
    };

    let key = payload[..eq].trim_matches(' ');
    if key.is_empty() {
        return Err(Error::EqualToWithoutAKey { line });
    }
    if let Some(ch) = key.chars().find(|c| !is_key_char(*c)) {
        return Err(Error::InvalidCharacter { ch, line: Some(line) });
    }

    let after = &payload[eq + 1..];
    let token = after.trim_matches([' ', '\t']);
    if token.is_empty() {
        return Ok(Classified {
            depth,
            kind: LineKind::Opener { key: key.to_string() },
        });
    }

    let start = depth + eq + 1 + (after.len() - after.trim_start_matches([' ', '\t']).len());
    let span = start..start + token.len();
    let scalar = parse_value(token, span, line, options)?;

    Ok(Classified {
        depth,
        kind: LineKind::Entry {
            key: key.to_string(),
            scalar,
        },
    })
}

/// Characters allowed in a key segment.
pub fn is_key_char(c: char) -> bool {
    !(c.is_control() || c.is_whitespace() || c == '=' || c == '.')
}

fn parse_value(
    token: &str,
    span: Range<usize>,
    line: usize,
    options: &ParseOptions,
) -> Result<Scalar> {
    if token.contains('\t') {
        return Err(Error::TrailingCharsAfterEqualTo { line });
    }

    if options.quoted_values && token.starts_with('"') {
        let Some((value, consumed)) = unquote(token) else {
            return Err(Error::InvalidCharacter { ch: '"', line: Some(line) });
        };
        if consumed != token.len() {
            return Err(Error::TrailingCharsAfterEqualTo { line });
        }
        return Ok(Scalar {
            value,
            span,
            quoted: true,
        });
    }

    if token.contains('=') {
        return Err(Error::TrailingCharsAfterEqualTo { line });
    }

    Ok(Scalar {
        value: token.to_string(),
        span,
        quoted: false,
    })
}

/// Read a quoted string at the start of `token`.
///
/// Returns the unescaped contents and the number of bytes up to and
/// including the closing quote, or `None` when the quote is never closed.
/// Only `\"` and `\\` are escapes; any other backslash is kept as is.
fn unquote(token: &str) -> Option<(String, usize)> {
    let mut value = String::new();
    let mut chars = token.char_indices().skip(1);

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((value, i + 1)),
            '\\' => match chars.next() {
                Some((_, escaped @ ('"' | '\\'))) => value.push(escaped),
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                }
                None => return None,
            },
            _ => value.push(c),
        }
    }

    None
}

/// Render a value token for writing back to a line.
///
/// Quotes are used when `prefer_quoted` is set or when the value would not
/// read back unchanged without them.
pub fn render_value(value: &str, prefer_quoted: bool, options: &ParseOptions) -> String {
    let needs_quotes = value.is_empty()
        || value.starts_with([' ', '"'])
        || value.ends_with(' ')
        || value.contains('=');

    if !options.quoted_values || !(prefer_quoted || needs_quotes) {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_default(text: &str) -> Result<Classified> {
        classify(text, 1, &ParseOptions::default())
    }

    #[test]
    fn test_split_lines_keeps_endings() {
        let lines = split_lines("a = 1\r\nb = 2\nc = 3");
        assert_eq!(
            lines,
            vec![
                SourceLine::new("a = 1", LineEnding::CrLf),
                SourceLine::new("b = 2", LineEnding::Lf),
                SourceLine::new("c = 3", LineEnding::None),
            ]
        );
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_classify_entry() {
        let line = classify_default("\t\tport = 8080").unwrap();
        assert_eq!(line.depth, 2);
        let LineKind::Entry { key, scalar } = line.kind else {
            panic!("expected entry");
        };
        assert_eq!(key, "port");
        assert_eq!(scalar.value, "8080");
        assert_eq!(&"\t\tport = 8080"[scalar.span], "8080");
    }

    #[test]
    fn test_classify_opener_and_blank() {
        assert_eq!(
            classify_default("server =  ").unwrap().kind,
            LineKind::Opener {
                key: "server".into()
            }
        );
        assert_eq!(
            classify_default("server =\t").unwrap().kind,
            LineKind::Opener {
                key: "server".into()
            }
        );
        assert!(classify_default("\t\t").unwrap().is_blank());
        assert!(classify_default("   ").unwrap().is_blank());
    }

    #[test]
    fn test_classify_trims_edge_tabs_from_value() {
        let text = "port =\t 8080 \t";
        let LineKind::Entry { scalar, .. } = classify_default(text).unwrap().kind else {
            panic!("expected entry");
        };
        assert_eq!(scalar.value, "8080");
        assert_eq!(&text[scalar.span], "8080");
    }

    #[test]
    fn test_classify_quoted() {
        let text = r#"name = "a \"b\" = c\d""#;
        let LineKind::Entry { scalar, .. } = classify_default(text).unwrap().kind else {
            panic!("expected entry");
        };
        assert_eq!(scalar.value, r#"a "b" = c\d"#);
        assert!(scalar.quoted);
        assert_eq!(scalar.span.end, text.len());
    }

    #[test]
    fn test_quotes_are_literal_when_disabled() {
        let options = ParseOptions::default().with_quoted_values(false);
        let line = classify("a = \"x\" y", 1, &options).unwrap();
        let LineKind::Entry { scalar, .. } = line.kind else {
            panic!("expected entry");
        };
        assert_eq!(scalar.value, "\"x\" y");
    }

    #[test]
    fn test_classify_errors() {
        assert!(matches!(
            classify_default("= 5"),
            Err(Error::EqualToWithoutAKey { line: 1 })
        ));
        assert!(matches!(
            classify_default("a = \"x\" y"),
            Err(Error::TrailingCharsAfterEqualTo { .. })
        ));
        assert!(matches!(
            classify_default("a = b = c"),
            Err(Error::TrailingCharsAfterEqualTo { .. })
        ));
        assert!(matches!(
            classify_default("a = x\ty"),
            Err(Error::TrailingCharsAfterEqualTo { .. })
        ));
        assert!(matches!(
            classify_default("a.b = 1"),
            Err(Error::InvalidCharacter { ch: '.', .. })
        ));
        assert!(matches!(
            classify_default("a = \"open"),
            Err(Error::InvalidCharacter { ch: '"', .. })
        ));
        assert!(matches!(
            classify_default("a = 1\u{0}"),
            Err(Error::InvalidCharacter { ch: '\u{0}', .. })
        ));
    }

    #[test]
    fn test_render_value() {
        let options = ParseOptions::default();
        assert_eq!(render_value("9", false, &options), "9");
        assert_eq!(render_value("9", true, &options), "\"9\"");
        assert_eq!(render_value("", false, &options), "\"\"");
        assert_eq!(render_value("a=b", false, &options), "\"a=b\"");
        assert_eq!(render_value("\"q\\", false, &options), r#""\"q\\""#);
    }
}
