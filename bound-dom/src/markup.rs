use std::borrow::Cow;

use crate::{Attr, DomError, Node, NodeKind};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Minimal hand-rolled HTML-ish fragment parser with support for:
/// - nested elements, void tags (`<br>`) and self-closing tags (`<input/>`)
/// - quoted, unquoted and boolean attributes (names kept verbatim, so
///   `on-click` and `checked$` survive)
/// - comments and the common character references
///
/// Unclosed tags are closed at end of input and stray closing tags are
/// dropped. Text is kept byte for byte, whitespace included.
pub fn parse_fragment(input: &str) -> Result<Node, DomError> {
    let bytes = input.as_bytes();
    let root = Node::fragment();
    let mut stack: Vec<Node> = vec![root.clone()];
    let mut i = 0usize;

    while i < bytes.len() {
        let parent = stack.last().cloned().unwrap_or_else(|| root.clone());
        if bytes[i] == b'<' {
            if input[i..].starts_with("<!--") {
                let body = i + 4;
                let end = input[body..]
                    .find("-->")
                    .ok_or_else(|| markup_err(i, "unterminated comment"))?;
                parent.append_child(Node::comment(&input[body..body + end]));
                i = body + end + 3;
                continue;
            }

            // closing tag
            if bytes.get(i + 1) == Some(&b'/') {
                let mut j = i + 2;
                let tag = read_ident(bytes, &mut j);
                while j < bytes.len() && bytes[j] != b'>' {
                    j += 1;
                }
                i = (j + 1).min(bytes.len());
                // pop until matching tag, never past the fragment root
                if let Some(pos) = stack
                    .iter()
                    .rposition(|n| n.tag().is_some_and(|t| t.eq_ignore_ascii_case(&tag)))
                {
                    if pos > 0 {
                        stack.truncate(pos);
                    }
                }
                continue;
            }

            // opening or self-closing tag
            if bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
                let mut j = i + 1;
                let tag = read_ident(bytes, &mut j);
                let element = Node::element(tag.clone());
                let mut self_closing = false;

                loop {
                    skip_ws(bytes, &mut j);
                    if j >= bytes.len() {
                        return Err(markup_err(i, "unterminated start tag"));
                    }
                    match bytes[j] {
                        b'/' => {
                            self_closing = true;
                            j += 1;
                            skip_ws(bytes, &mut j);
                            if j < bytes.len() && bytes[j] == b'>' {
                                j += 1;
                            }
                            break;
                        }
                        b'>' => {
                            j += 1;
                            break;
                        }
                        _ => match read_attribute(input, &mut j)? {
                            Some(attr) => {
                                // first occurrence wins, as in HTML
                                if !element.has_attribute(&attr.name) {
                                    element.set_attribute(attr.name, attr.value)?;
                                }
                            }
                            None => j += 1,
                        },
                    }
                }

                parent.append_child(element.clone());
                if !self_closing && !is_void(&tag) {
                    stack.push(element);
                }
                i = j;
                continue;
            }
        }

        // text until next '<' (a '<' that starts no tag is literal text)
        let start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'<' {
            i += 1;
        }
        push_text(&parent, &decode_entities(&input[start..i]));
    }

    Ok(root)
}

fn markup_err(offset: usize, message: &str) -> DomError {
    DomError::Markup {
        offset,
        message: message.to_string(),
    }
}

/// Appends text, merging into a trailing text node so literal `<` does not
/// fragment the run.
fn push_text(parent: &Node, content: &str) {
    if let Some(last) = parent.children().pop() {
        if last.kind() == NodeKind::Text {
            let mut merged = last.text_content();
            merged.push_str(content);
            last.set_text_content(merged);
            return;
        }
    }
    parent.append_child(Node::text(content));
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn read_ident(bytes: &[u8], i: &mut usize) -> String {
    let start = *i;
    while *i < bytes.len() {
        let c = bytes[*i];
        if c.is_ascii_alphanumeric() || c == b'_' || c == b'-' || c == b':' || c == b'.' {
            *i += 1;
        } else {
            break;
        }
    }
    String::from_utf8_lossy(&bytes[start..*i]).into_owned()
}

fn is_name_byte(c: u8) -> bool {
    !(c.is_ascii_whitespace() || matches!(c, b'/' | b'>' | b'=' | b'"' | b'\''))
}

fn read_attribute(input: &str, i: &mut usize) -> Result<Option<Attr>, DomError> {
    let bytes = input.as_bytes();
    let name_start = *i;
    while *i < bytes.len() && is_name_byte(bytes[*i]) {
        *i += 1;
    }
    if *i == name_start {
        return Ok(None);
    }
    let name = input[name_start..*i].to_string();

    skip_ws(bytes, i);
    let mut value = String::new();
    if *i < bytes.len() && bytes[*i] == b'=' {
        *i += 1;
        skip_ws(bytes, i);
        value = read_value(input, i)?;
    }
    Ok(Some(Attr { name, value }))
}

fn read_value(input: &str, i: &mut usize) -> Result<String, DomError> {
    let bytes = input.as_bytes();
    if *i >= bytes.len() {
        return Ok(String::new());
    }
    let quote = bytes[*i];
    if quote == b'"' || quote == b'\'' {
        let open = *i;
        *i += 1;
        let start = *i;
        while *i < bytes.len() && bytes[*i] != quote {
            *i += 1;
        }
        if *i >= bytes.len() {
            return Err(markup_err(open, "unterminated attribute value"));
        }
        let raw = &input[start..*i];
        *i += 1; // closing quote
        return Ok(decode_entities(raw).into_owned());
    }
    let start = *i;
    while *i < bytes.len() && !bytes[*i].is_ascii_whitespace() && bytes[*i] != b'>' {
        *i += 1;
    }
    Ok(decode_entities(&input[start..*i]).into_owned())
}

/// Decodes the named references HTML authors actually write plus numeric
/// ones. Unknown references are kept verbatim.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
