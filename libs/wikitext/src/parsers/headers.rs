use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HeaderError {
    #[error("{marker}: malformed header line {line}: {text:?}")]
    Malformed {
        marker: String,
        line: usize,
        text: String,
    },
    #[error("{0}: missing header")]
    Missing(String),
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum MetaParserState {
    Parsing,
    End,
}

/// A page file split into its `key: value` header and the markdown body.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Note {
    pub header: HashMap<String, String>,
    pub content: String,
}

#[derive(Copy, Clone)]
struct HeaderParserMachine {
    state: MetaParserState,
}

impl HeaderParserMachine {
    pub fn new() -> Self {
        HeaderParserMachine {
            state: MetaParserState::Parsing,
        }
    }

    pub fn send(&mut self, next_state: MetaParserState) {
        self.state = next_state;
    }

    pub fn current_state(self) -> MetaParserState {
        self.state
    }
}

impl Note {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.header.get(key).map(String::as_str)
    }
}

#[allow(clippy::from_over_into)]
impl Into<String> for Note {
    fn into(self) -> String {
        // sorted so the same note always serializes to the same bytes
        let mut keys = self.header.keys().collect::<Vec<&String>>();
        keys.sort();
        let mut formatted_string = String::new();
        for key in keys {
            formatted_string.push_str(key);
            formatted_string.push_str(": ");
            formatted_string.push_str(&self.header[key]);
            formatted_string.push('\n');
        }
        formatted_string.push('\n');
        formatted_string.push_str(&self.content);
        formatted_string
    }
}

/// Parses the header block (everything up to the first blank line) and keeps the rest verbatim
/// as the body. `debug_marker` names the source in errors, usually the file path.
pub fn parse_meta<'a>(
    lines: impl Iterator<Item = &'a str>,
    debug_marker: &str,
) -> Result<Note, HeaderError> {
    let mut parser = HeaderParserMachine::new();
    let mut notemeta = Note::default();
    let mut body: Vec<&str> = Vec::new();
    for (idx, line) in lines.enumerate() {
        match parser.current_state() {
            MetaParserState::Parsing => {
                if line.trim().is_empty() {
                    parser.send(MetaParserState::End);
                    continue;
                }
                // values may contain ':' themselves, only the first one splits
                match line.split_once(':') {
                    Some((key, value)) if !key.trim().is_empty() => {
                        notemeta
                            .header
                            .insert(key.trim().to_owned(), value.trim().to_owned());
                    }
                    _ => {
                        return Err(HeaderError::Malformed {
                            marker: debug_marker.to_owned(),
                            line: idx + 1,
                            text: line.to_owned(),
                        })
                    }
                }
            }
            MetaParserState::End => body.push(line),
        }
    }
    if notemeta.header.is_empty() {
        return Err(HeaderError::Missing(debug_marker.to_owned()));
    }
    notemeta.content = body.join("\n");
    Ok(notemeta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_body() {
        let raw = "title: tdd workshop\ntags: [testing, workshops]\n\n# Notes\n\nfirst paragraph";
        let note = parse_meta(raw.lines(), "raw_string").unwrap();
        assert_eq!(note.get("title"), Some("tdd workshop"));
        assert_eq!(note.get("tags"), Some("[testing, workshops]"));
        assert_eq!(note.content, "# Notes\n\nfirst paragraph");
    }

    #[test]
    fn keeps_colons_inside_values() {
        let raw = "title: a: b: c\n\nbody";
        let note = parse_meta(raw.lines(), "raw_string").unwrap();
        assert_eq!(note.get("title"), Some("a: b: c"));
        let note = parse_meta("title:foo: bar\n\nbody".lines(), "raw_string").unwrap();
        assert_eq!(note.get("title"), Some("foo: bar"));
        assert_eq!(note.get("title:foo"), None);
    }

    #[test]
    fn allows_empty_values() {
        let raw = "title: tdd\ntags:\n\nbody";
        let note = parse_meta(raw.lines(), "raw_string").unwrap();
        assert_eq!(note.get("tags"), Some(""));
    }

    #[test]
    fn rejects_lines_without_a_key() {
        let raw = "title: ok\njust some words\n\nbody";
        assert_eq!(
            parse_meta(raw.lines(), "bad.md"),
            Err(HeaderError::Malformed {
                marker: "bad.md".into(),
                line: 2,
                text: "just some words".into(),
            })
        );
    }

    #[test]
    fn rejects_notes_without_a_header() {
        let raw = "\nonly a body";
        assert_eq!(
            parse_meta(raw.lines(), "empty.md"),
            Err(HeaderError::Missing("empty.md".into()))
        );
    }

    #[test]
    fn writes_header_back_out() {
        let mut note = Note::default();
        note.header.insert("title".into(), "tdd".into());
        note.header.insert("status".into(), "open".into());
        note.content = "body".into();
        let written: String = note.into();
        assert_eq!(written, "status: open\ntitle: tdd\n\nbody");
    }
}
