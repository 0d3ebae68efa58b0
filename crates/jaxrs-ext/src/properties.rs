//! Key/value properties files
//!
//! Reads the classic line-oriented properties format used for
//! `<runtime-home>/lib/jaxrs.properties`:
//!
//! ```text
//! # comment
//! ! also a comment
//! jakarta.ws.rs.ext.RuntimeDelegate = acme::RuntimeDelegateImpl
//! jakarta.ws.rs.client.ClientBuilder: acme::\
//!     ClientBuilderImpl
//! ```

use std::collections::HashMap;
use std::path::Path;

use jaxrs_domain::error::{Error, Result};

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parsed properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Parse properties text
    ///
    /// Later duplicates of a key replace earlier ones. Fails only on a
    /// malformed `\uXXXX` escape.
    pub fn parse(input: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        let mut lines = input.lines().enumerate();

        while let Some((index, raw)) = lines.next() {
            let line = raw.trim_start_matches(WHITESPACE);
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let mut logical = line.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            let line_number = index + 1;
            entries.insert(unescape(key, line_number)?, unescape(value, line_number)?);
        }

        Ok(Self { entries })
    }

    /// Read and parse a properties file
    ///
    /// Content that is not valid UTF-8 is decoded as ISO-8859-1.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            Error::io_with_source(format!("Failed to read {}", path.display()), e)
        })?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
        };
        Self::parse(&text)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A line continues when it ends in an odd number of backslashes
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut separator = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                separator = Some(c);
                break;
            }
            c if WHITESPACE.contains(&c) => {
                key_end = i;
                separator = Some(c);
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = &line[key_end..];
    match separator {
        Some('=' | ':') => rest = &rest[1..],
        Some(_) => {
            rest = rest.trim_start_matches(WHITESPACE);
            if let Some(stripped) = rest.strip_prefix(['=', ':']) {
                rest = stripped;
            }
        }
        None => {}
    }
    (key, rest.trim_start_matches(WHITESPACE))
}

/// Resolve backslash escapes, including UTF-16 `\uXXXX` sequences
fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out);
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            break;
        };
        if escape == 'u' {
            let hex: String = chars.by_ref().take(4).collect();
            let unit = (hex.len() == 4)
                .then(|| u16::from_str_radix(&hex, 16).ok())
                .flatten()
                .ok_or_else(|| Error::properties(line, "Malformed \\uxxxx encoding"))?;
            units.push(unit);
            continue;
        }
        flush_units(&mut units, &mut out);
        out.push(match escape {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }
    flush_units(&mut units, &mut out);
    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}
