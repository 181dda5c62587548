use crate::{ConfigDocument, statics};

/// Classification of a single profile line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    Directive(Directive<'a>),
    Unrecognized,
}

/// One `Category.Key [Value]` line, borrowed from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    pub category: &'a str,
    pub key: &'a str,
    /// Raw value token as written (quotes included), if any.
    pub raw_value: Option<&'a str>,
}

impl Directive<'_> {
    /// Stored form of the value: quotes removed, `None` literal when absent.
    pub fn value(&self) -> String {
        match self.raw_value {
            Some(raw) => raw.replace('"', ""),
            None => statics::CFG_MISSING_VALUE.to_string(),
        }
    }
}

/// Parse profile text into a document.
///
/// Never fails: blank lines, comments and anything outside the directive grammar are
/// skipped. A later duplicate of `Category.Key` overwrites the earlier value.
pub fn parse(text: &str) -> ConfigDocument {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut doc = ConfigDocument::new();
    let mut skipped = 0usize;

    for line in text.split('\n') {
        match classify_line(line) {
            LineKind::Directive(d) => {
                let value = d.value();
                doc.insert(d.category, d.key, value);
            }
            LineKind::Unrecognized => skipped += 1,
            LineKind::Blank | LineKind::Comment => {}
        }
    }

    tracing::debug!(
        categories = doc.category_count(),
        settings = doc.len(),
        skipped,
        "parsed profile text"
    );
    doc
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }
    if statics::CFG_COMMENT_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
    {
        return LineKind::Comment;
    }

    match parse_directive(line) {
        Some(d) => LineKind::Directive(d),
        None => LineKind::Unrecognized,
    }
}

fn parse_directive(line: &str) -> Option<Directive<'_>> {
    let category_len = line
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if category_len == 0 || line.as_bytes().get(category_len) != Some(&b'.') {
        return None;
    }
    let category = &line[..category_len];

    let rest = &line[category_len + 1..];
    let key_len = rest.bytes().take_while(|b| is_key_byte(*b)).count();
    if key_len == 0 {
        return None;
    }
    let key = &rest[..key_len];

    // The separator may be empty, matching the game's own loose layout.
    let value = rest[key_len..].trim_start();
    let raw_value = if value.is_empty() {
        None
    } else if is_quoted_token(value) || is_numeric_token(value) {
        Some(value)
    } else {
        return None;
    };

    Some(Directive {
        category,
        key,
        raw_value,
    })
}

fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_quoted_token(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

/// `[-+]?\d*\.?\d+`
fn is_numeric_token(token: &str) -> bool {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => ("", digits),
    };
    int_part.bytes().all(|b| b.is_ascii_digit())
        && !frac_part.is_empty()
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::{Directive, LineKind, classify_line, is_numeric_token, parse};

    fn directive<'a>(category: &'a str, key: &'a str, raw: Option<&'a str>) -> LineKind<'a> {
        LineKind::Directive(Directive {
            category,
            key,
            raw_value: raw,
        })
    }

    #[test]
    fn classify_blank_and_comment_lines() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(classify_line("   \t\r"), LineKind::Blank);
        assert_eq!(classify_line("// GstRender.Dx11Enable 1"), LineKind::Comment);
        assert_eq!(classify_line("  # note"), LineKind::Comment);
    }

    #[test]
    fn classify_directives() {
        assert_eq!(
            classify_line("GstRender.Dx11Enable 1"),
            directive("GstRender", "Dx11Enable", Some("1"))
        );
        assert_eq!(
            classify_line("GstAudio.MasterVolume \"75\"\r"),
            directive("GstAudio", "MasterVolume", Some("\"75\""))
        );
        assert_eq!(
            classify_line("GstGameplay.InvertY"),
            directive("GstGameplay", "InvertY", None)
        );
        assert_eq!(
            classify_line("GstInput.Mouse-Sens_2 -0.050000"),
            directive("GstInput", "Mouse-Sens_2", Some("-0.050000"))
        );
    }

    #[test]
    fn key_is_greedy_and_separator_may_be_empty() {
        // Digits directly after the key belong to the key.
        assert_eq!(
            classify_line("GstRender.Dx11Enable1"),
            directive("GstRender", "Dx11Enable1", None)
        );
        assert_eq!(classify_line("A.B.5"), directive("A", "B", Some(".5")));
        assert_eq!(classify_line("A.B+1"), directive("A", "B", Some("+1")));
    }

    #[test]
    fn classify_unrecognized_lines() {
        for line in [
            "GstRender",
            "GstRender.",
            ".Dx11Enable 1",
            "Gst9Render.Dx11Enable 1",
            "GstRender.Dx11Enable on",
            "GstRender.Dx11Enable 1 2",
            "GstRender.Dx11Enable \"open",
            "GstRender.Sub.Key 1",
            "[Section]",
        ] {
            assert_eq!(classify_line(line), LineKind::Unrecognized, "{line}");
        }
    }

    #[test]
    fn numeric_token_shapes() {
        for ok in ["0", "75", "-1", "+2", ".5", "0.050000", "-.25"] {
            assert!(is_numeric_token(ok), "{ok}");
        }
        for bad in ["", "-", "5.", "1.2.3", "1e5", "abc", "1 2"] {
            assert!(!is_numeric_token(bad), "{bad}");
        }
    }

    #[test]
    fn directive_value_strips_quotes_and_defaults_to_none() {
        let d = Directive {
            category: "A",
            key: "B",
            raw_value: Some("\"a\"b\""),
        };
        assert_eq!(d.value(), "ab");

        let d = Directive {
            category: "A",
            key: "B",
            raw_value: None,
        };
        assert_eq!(d.value(), "None");
    }

    #[test]
    fn parse_ignores_leading_bom() {
        let doc = parse("\u{FEFF}GstAudio.MasterVolume 50\n");
        assert_eq!(doc.get("GstAudio", "MasterVolume"), Some("50"));
    }
}
