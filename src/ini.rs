//! `key=value` lookup and update over the text of an ini file.
//!
//! Keys are everything before the first `=` on a line and are compared
//! exactly: no trimming, no case folding, no sections. Lines without an `=`
//! are carried through untouched.

pub fn split_entry(line: &str) -> Option<(&str, &str)> {
    line.strip_suffix('\r').unwrap_or(line).split_once('=')
}

/// Value of the first entry whose key is `key`.
pub fn get<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines()
        .filter_map(split_entry)
        .find_map(|(current, value)| (current == key).then_some(value))
}

/// Rewrites every entry keyed `key` as `key=value`, or appends one if there were
/// none. The flag reports whether an existing entry was replaced.
///
/// A rewritten entry keeps the `\r` of a CRLF line. Only `\n`-terminated
/// lines are kept, trailing text without a terminator is dropped.
pub fn set(text: &str, key: &str, value: &str) -> (String, bool) {
    let mut content = String::with_capacity(text.len() + key.len() + value.len() + 2);
    let mut found = false;
    let mut rest = text;

    while let Some(end) = rest.find('\n') {
        let line = &rest[..end];
        match split_entry(line) {
            Some((current, _)) if current == key => {
                push_entry(&mut content, key, value);
                if line.ends_with('\r') {
                    content.push('\r');
                }
                found = true;
            }
            _ => content.push_str(line),
        }
        content.push('\n');
        rest = &rest[end + 1..];
    }

    if !found {
        push_entry(&mut content, key, value);
        content.push('\n');
    }
    (content, found)
}

fn push_entry(content: &mut String, key: &str, value: &str) {
    content.push_str(key);
    content.push('=');
    content.push_str(value);
}
