//! Allowlist sanitizer for fields that tolerate basic inline formatting.

/// Inline tags that survive sanitization, with the attributes each may keep.
const ALLOWED_TAGS: &[(&str, &[&str])] = &[
    ("a", &["href", "title"]),
    ("abbr", &["title"]),
    ("b", &[]),
    ("br", &[]),
    ("code", &[]),
    ("em", &[]),
    ("i", &[]),
    ("small", &[]),
    ("span", &[]),
    ("strong", &[]),
    ("sub", &[]),
    ("sup", &[]),
    ("u", &[]),
];

/// Elements removed together with their content.
const DROPPED_BLOCKS: [&str; 2] = ["script", "style"];

const ALLOWED_HREF_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

struct Tag<'a> {
    name: String,
    closing: bool,
    attrs: Vec<(String, &'a str)>,
}

/// Produce HTML containing only allowlisted inline tags.
///
/// Text is escaped (existing character references are kept), disallowed tags
/// are removed but their text content is kept, and every allowed tag left
/// open is closed at the end.
pub(crate) fn sanitize_inline(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut open: Vec<&'static str> = Vec::new();
    let mut rest = raw;

    while let Some(lt) = rest.find('<') {
        push_text(&mut out, &rest[..lt]);
        let candidate = &rest[lt..];

        let Some(gt) = candidate.find('>') else {
            push_text(&mut out, candidate);
            rest = "";
            break;
        };

        let inner = &candidate[1..gt];
        rest = &candidate[gt + 1..];

        let Some(tag) = parse_tag(inner) else {
            push_text(&mut out, &candidate[..=gt]);
            continue;
        };

        if !tag.closing && DROPPED_BLOCKS.contains(&tag.name.as_str()) {
            rest = skip_block(rest, &tag.name);
            continue;
        }

        let Some((name, allowed_attrs)) = ALLOWED_TAGS
            .iter()
            .find(|(name, _)| *name == tag.name)
            .map(|(name, attrs)| (*name, *attrs))
        else {
            continue;
        };

        if tag.closing {
            if let Some(pos) = open.iter().rposition(|t| *t == name) {
                for t in open.drain(pos..).rev() {
                    close_tag(&mut out, t);
                }
            }
        } else if name == "br" {
            out.push_str("<br>");
        } else {
            out.push('<');
            out.push_str(name);
            for (attr, value) in &tag.attrs {
                if !allowed_attrs.contains(&attr.as_str()) {
                    continue;
                }
                if attr == "href" && !is_allowed_href(value) {
                    continue;
                }
                out.push(' ');
                out.push_str(attr);
                out.push_str("=\"");
                push_text(&mut out, value);
                out.push('"');
            }
            out.push('>');
            open.push(name);
        }
    }

    push_text(&mut out, rest);
    for t in open.into_iter().rev() {
        close_tag(&mut out, t);
    }
    out
}

fn close_tag(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Escape text, leaving well-formed character references such as `&amp;` or `&#8211;` intact.
fn push_text(out: &mut String, text: &str) {
    for (i, c) in text.char_indices() {
        match c {
            '&' if is_char_reference(&text[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
}

fn is_char_reference(s: &str) -> bool {
    let Some(end) = s.find(';') else {
        return false;
    };
    let body = &s[1..end];
    if let Some(num) = body.strip_prefix('#') {
        let (digits, radix) = match num.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16),
            None => (num, 10),
        };
        !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix))
    } else {
        !body.is_empty() && body.len() <= 32 && body.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

fn is_allowed_href(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    ALLOWED_HREF_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Parse the inside of `<...>`. Returns `None` when the text is not tag-like
/// (e.g. `a < b`), so it is kept as escaped text instead.
fn parse_tag(inner: &str) -> Option<Tag<'_>> {
    let (closing, body) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };

    let first = body.chars().next()?;
    if first == '!' || first == '?' {
        // Comments, doctypes and processing instructions are dropped
        return Some(Tag { name: first.to_string(), closing, attrs: Vec::new() });
    }
    if !first.is_ascii_alphabetic() {
        return None;
    }

    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();
    let attrs = if closing { Vec::new() } else { parse_attrs(&body[name_len..]) };

    Some(Tag { name, closing, attrs })
}

fn parse_attrs(mut s: &str) -> Vec<(String, &str)> {
    let mut attrs = Vec::new();

    loop {
        s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if s.is_empty() {
            return attrs;
        }

        let name_len = s
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(s.len());
        if name_len == 0 {
            // Stray '=' without a name
            s = &s[1..];
            continue;
        }
        let name = s[..name_len].to_ascii_lowercase();
        s = s[name_len..].trim_start();

        let Some(after_eq) = s.strip_prefix('=') else {
            attrs.push((name, ""));
            continue;
        };
        let after_eq = after_eq.trim_start();

        let (value, remaining) = match after_eq.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &after_eq[1..];
                match body.find(q) {
                    Some(end) => (&body[..end], &body[end + 1..]),
                    None => (body, ""),
                }
            }
            _ => {
                let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                (&after_eq[..end], &after_eq[end..])
            }
        };
        attrs.push((name, value));
        s = remaining;
    }
}

/// Skip past the closing tag of a dropped block; an unclosed block swallows the rest.
fn skip_block<'a>(rest: &'a str, name: &str) -> &'a str {
    let lower = rest.to_ascii_lowercase();
    let close = format!("</{}", name);
    match lower.find(&close) {
        Some(start) => match lower[start..].find('>') {
            Some(gt) => &rest[start + gt + 1..],
            None => "",
        },
        None => "",
    }
}
