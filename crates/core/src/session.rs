//! Line-oriented query loop, independent of any real terminal.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Result;
use crate::query::{Hit, QueryEngine};
use crate::render::render_entry;

pub const PROMPT: &str = ":";
const BANNER_WIDTH: usize = 80;

/// Formats hits the way the interactive loop prints them.
pub fn render_hits(hits: &[Hit], highlight: bool) -> Result<String> {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();
    for hit in hits {
        out.push_str(&banner);
        out.push('\n');
        out.push_str(&format!("{} : ('{}', {})\n", hit.rank, hit.key, hit.score));
        if let Some(prov) = &hit.provenance {
            out.push_str(&format!("NAME {}\n", prov.name));
            out.push_str(&format!("BOOK: {}\n", prov.book));
            out.push_str(&format!("PAGE: {}\n", prov.page));
        }
        out.push_str(&render_entry(&hit.entry, highlight)?);
        out.push('\n');
        out.push_str(&banner);
        out.push('\n');
    }
    out.push('\n');
    Ok(out)
}

/// A single-character line ends the session.
pub fn is_exit(line: &str) -> bool {
    line.chars().count() == 1
}

pub struct Session<'a, R, W> {
    engine: &'a QueryEngine,
    input: R,
    output: W,
    highlight: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(engine: &'a QueryEngine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
            highlight: false,
        }
    }

    pub fn highlight(mut self, enabled: bool) -> Self {
        self.highlight = enabled;
        self
    }

    /// Answers queries until an exit line or end of input. Returns how many
    /// queries were answered.
    pub fn run(&mut self) -> Result<usize> {
        let mut answered = 0;
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let query = line.trim_end_matches(['\n', '\r']);
            if is_exit(query) {
                break;
            }
            let hits = self.engine.lookup(query);
            debug!(query, hits = hits.len(), "answered query");
            self.output
                .write_all(render_hits(&hits, self.highlight)?.as_bytes())?;
            answered += 1;
        }
        self.output.flush()?;
        Ok(answered)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    fn engine() -> QueryEngine {
        let store = json!({
            "Fireball": {"name": "Fireball", "source": "SG", "page": 42},
            "Firewall": {"name": "Firewall"},
            "Ghoul": {"name": "Ghoul", "source": "ZZZ", "page": "9"}
        })
        .as_object()
        .cloned()
        .unwrap();
        QueryEngine::new(store, 2)
    }

    #[test]
    fn single_character_line_exits() {
        let engine = engine();
        let mut session = Session::new(&engine, Cursor::new("q\nfireball\n"), Vec::new());
        assert_eq!(session.run().unwrap(), 0);
        assert_eq!(String::from_utf8(session.into_output()).unwrap(), ":");
    }

    #[test]
    fn queries_render_until_exit() {
        let engine = engine();
        let mut session = Session::new(&engine, Cursor::new("firebal\nghoul\nx\n"), Vec::new());
        assert_eq!(session.run().unwrap(), 2);
        let text = String::from_utf8(session.into_output()).unwrap();
        assert!(text.contains("1 : ('Fireball', 88)"));
        assert!(text.contains("BOOK: Street Grimoire"));
        assert!(text.contains("PAGE: 42"));
        assert!(text.contains("BOOK: ZZZ"));
        assert!(text.contains("\"name\": \"Firewall\""));
    }

    #[test]
    fn blank_line_lists_leading_entries() {
        let engine = engine();
        let mut session = Session::new(&engine, Cursor::new("\nq\n"), Vec::new());
        assert_eq!(session.run().unwrap(), 1);
        let text = String::from_utf8(session.into_output()).unwrap();
        assert!(text.contains("1 : ('Fireball', 0)"));
        assert!(text.contains("2 : ('Firewall', 0)"));
        assert!(!text.contains("Ghoul"));
    }

    #[test]
    fn end_of_input_exits() {
        let engine = engine();
        let mut session = Session::new(&engine, Cursor::new("firewall"), Vec::new());
        assert_eq!(session.run().unwrap(), 1);
    }

    #[test]
    fn entries_without_provenance_skip_header() {
        let engine = engine();
        let hits = engine.lookup("firewall");
        let text = render_hits(&hits[..1], false).unwrap();
        assert!(text.contains("1 : ('Firewall', 100)"));
        assert!(!text.contains("BOOK:"));
    }

    #[test]
    fn exit_is_exactly_one_character() {
        assert!(is_exit("q"));
        assert!(is_exit("é"));
        assert!(!is_exit(""));
        assert!(!is_exit("qq"));
    }
}
