//! Line-oriented `key=value` properties codec.
//!
//! Reads and writes the format used by `java.util.Properties`:
//!
//! - blank lines and lines starting with `#` or `!` are ignored
//! - a line ending in an odd number of backslashes continues on the next line
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded, any other `\c` is `c`
//!
//! Entries are kept sorted by key so saved files are stable across runs.

use std::collections::BTreeMap;
use std::time::SystemTime;

use humantime::format_rfc3339_seconds;

const FORM_FEED: char = '\u{000C}';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text. Malformed input never fails; later duplicates win.
    pub fn parse(input: &str) -> Self {
        let mut entries = BTreeMap::new();

        for line in logical_lines(input) {
            let (key, value) = split_key_value(&line);
            entries.insert(key, value);
        }

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render with a `#<timestamp>` header line.
    pub fn store(&self, written_at: SystemTime) -> String {
        let mut out = format!("#{}\n", format_rfc3339_seconds(written_at));

        for (key, value) in &self.entries {
            out.push_str(&escape(key, true));
            out.push('=');
            out.push_str(&escape(value, false));
            out.push('\n');
        }

        out
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | FORM_FEED)
}

fn trim_blank_start(line: &str) -> &str {
    line.trim_start_matches(is_blank)
}

fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn logical_lines(input: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for raw in input.lines() {
        let line = trim_blank_start(raw);

        if !continuing && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }

        if has_continuation(line) {
            current.push_str(&line[..line.len() - 1]);
            continuing = true;
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }

    if continuing {
        lines.push(current);
    }

    lines
}

fn split_key_value(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let mut key_end = chars.len();
    let mut has_separator = false;
    let mut escaped = false;

    for (idx, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' {
            key_end = idx;
            has_separator = true;
            break;
        } else if is_blank(c) {
            key_end = idx;
            break;
        }
    }

    let mut value_start = if has_separator { key_end + 1 } else { key_end };

    while value_start < chars.len() && is_blank(chars[value_start]) {
        value_start += 1;
    }

    // "key  = value": whitespace ended the key, the separator follows it
    if !has_separator
        && value_start < chars.len()
        && (chars[value_start] == '=' || chars[value_start] == ':')
    {
        value_start += 1;
        while value_start < chars.len() && is_blank(chars[value_start]) {
            value_start += 1;
        }
    }

    (
        unescape(&chars[..key_end]),
        unescape(&chars[value_start.min(chars.len())..]),
    )
}

fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut utf16: Vec<u16> = Vec::new();
    let mut idx = 0;

    while idx < chars.len() {
        let c = chars[idx];
        idx += 1;

        if c != '\\' {
            flush_utf16(&mut utf16, &mut out);
            out.push(c);
            continue;
        }

        let Some(&next) = chars.get(idx) else {
            break;
        };
        idx += 1;

        if next == 'u' {
            let hex: String = chars.iter().skip(idx).take(4).collect();
            if hex.len() == 4
                && let Ok(unit) = u16::from_str_radix(&hex, 16)
            {
                utf16.push(unit);
                idx += 4;
                continue;
            }
        }

        flush_utf16(&mut utf16, &mut out);
        out.push(match next {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => FORM_FEED,
            other => other,
        });
    }

    flush_utf16(&mut utf16, &mut out);
    out
}

fn flush_utf16(units: &mut Vec<u16>, out: &mut String) {
    if !units.is_empty() {
        out.push_str(&String::from_utf16_lossy(units));
        units.clear();
    }
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());

    for (idx, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || idx == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            FORM_FEED => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if (' '..='~').contains(&c) => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04X}"));
                }
            }
        }
    }

    out
}
