/// Elements whose content is dropped along with the tags themselves.
const STRIPPED_BLOCKS: [&str; 2] = ["script", "style"];

/// Characters allowed in the local part of an email address besides ASCII alphanumerics.
const EMAIL_LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Remove `<script>`/`<style>` blocks (with their content) and every remaining tag.
///
/// An unterminated `<` swallows the rest of the input, the same way a browser
/// would treat it as an unfinished tag.
pub fn strip_tags(s: &str) -> String {
    let mut text = s.to_string();
    for block in STRIPPED_BLOCKS {
        text = remove_block(&text, block);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' if !in_tag => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Remove every `<name ...>...</name>` block, case-insensitively.
fn remove_block(s: &str, name: &str) -> String {
    let open = format!("<{}", name);
    let close = format!("</{}", name);
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    loop {
        // ASCII lowercasing keeps byte offsets aligned with `rest`
        let lower = rest.to_ascii_lowercase();
        let Some(start) = lower.find(&open) else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..start]);

        let Some(close_at) = lower[start..].find(&close).map(|i| start + i) else {
            return out;
        };
        rest = match lower[close_at..].find('>') {
            Some(gt) => &rest[close_at + gt + 1..],
            None => return out,
        };
    }
}

/// Collapse runs of whitespace (including newlines and tabs) into single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain-text cleanup applied to every untrusted text field: tags stripped,
/// whitespace collapsed, ends trimmed.
pub fn sanitize_text(s: &str) -> String {
    collapse_whitespace(&strip_tags(s))
}

/// Keep an email address only if it looks like `local@domain.tld`.
pub fn sanitize_email(s: &str) -> Option<String> {
    let email = s.trim();
    let (local, domain) = email.split_once('@')?;

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SPECIALS.contains(c));
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

    (local_ok && domain_ok).then(|| email.to_string())
}

/// Keep a URL only if it is absolute http(s) or protocol-relative and free of
/// characters that could break out of an attribute.
pub fn sanitize_url(s: &str) -> Option<String> {
    let url = s.trim();
    let lower = url.to_ascii_lowercase();
    let scheme_ok =
        lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//");
    let chars_ok = !url
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '`'));

    (scheme_ok && chars_ok && url.len() > 2).then(|| url.to_string())
}

/// Parse the leading integer of a string: `"4px"` is 4, `"abc"` is 0.
/// Overflow saturates.
pub fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Interpret a flag attribute: `1`, `true`, `yes`, `on` or any non-zero integer.
pub fn parse_truthy(s: &str) -> bool {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => true,
        other => parse_leading_int(other) != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>Jane</b> Doe"), "Jane Doe");
        assert_eq!(strip_tags("a<script>alert(1)</script>b"), "ab");
        assert_eq!(strip_tags("a<STYLE type=\"x\">p{}</Style>b"), "ab");
        assert_eq!(strip_tags("unterminated <b"), "unterminated ");
        assert_eq!(strip_tags("no tags"), "no tags");
    }

    #[test]
    fn test_sanitize_text_collapses_whitespace() {
        assert_eq!(sanitize_text("  Jane \n\t <i>Q.</i>  Doe "), "Jane Q. Doe");
        assert_eq!(sanitize_text("<br/>"), "");
    }

    #[test]
    fn test_sanitize_email() {
        assert_eq!(sanitize_email(" jdoe@creol.ucf.edu "), Some("jdoe@creol.ucf.edu".to_string()));
        assert_eq!(sanitize_email("j.o+tag@ucf.edu"), Some("j.o+tag@ucf.edu".to_string()));
        assert_eq!(sanitize_email("not-an-email"), None);
        assert_eq!(sanitize_email("a@localhost"), None);
        assert_eq!(sanitize_email("a\"@ucf.edu"), None);
        assert_eq!(sanitize_email(""), None);
    }

    #[test]
    fn test_sanitize_url() {
        assert_eq!(
            sanitize_url("https://creol.ucf.edu/a.jpg"),
            Some("https://creol.ucf.edu/a.jpg".to_string())
        );
        assert_eq!(sanitize_url("//cdn.ucf.edu/a.jpg"), Some("//cdn.ucf.edu/a.jpg".to_string()));
        assert_eq!(sanitize_url("javascript:alert(1)"), None);
        assert_eq!(sanitize_url("https://x.edu/a\".jpg"), None);
        assert_eq!(sanitize_url(""), None);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("4"), 4);
        assert_eq!(parse_leading_int(" 4px"), 4);
        assert_eq!(parse_leading_int("-1"), -1);
        assert_eq!(parse_leading_int("+7"), 7);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_parse_truthy() {
        assert!(parse_truthy("1"));
        assert!(parse_truthy("TRUE"));
        assert!(parse_truthy("on"));
        assert!(!parse_truthy("0"));
        assert!(!parse_truthy("no"));
        assert!(!parse_truthy(""));
    }
}
