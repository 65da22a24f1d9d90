//! Markup reader: turns rulebook XML into a JSON tree.
//!
//! Attributes become `@`-prefixed keys, repeated child tags collapse into
//! arrays, text-only elements become strings and empty elements become
//! `null`. Mixed content keeps its text under `#text`.

use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::{LookupError, Result};
use crate::model::RawDocument;

const TEXT_KEY: &str = "#text";

#[derive(Debug, Default)]
struct Node {
    attributes: Vec<(String, String)>,
    children: Map<String, Value>,
    text: String,
}

impl Node {
    fn add_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn into_value(self) -> Value {
        let text = self.text.trim();
        if self.attributes.is_empty() && self.children.is_empty() {
            return if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_string())
            };
        }
        let mut out = Map::new();
        for (key, value) in self.attributes {
            out.insert(format!("@{key}"), Value::String(value));
        }
        for (key, value) in self.children {
            out.insert(key, value);
        }
        if !text.is_empty() {
            out.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        Value::Object(out)
    }
}

/// Parses a whole markup document, returning the root tag and its value.
pub fn parse_document(path: &Path, xml: &str) -> Result<(String, Value)> {
    let xml_err = |source: quick_xml::Error| LookupError::Xml {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<(String, Node)> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(start) => {
                let name = tag_name(&start);
                let node = open_node(&start).map_err(xml_err)?;
                stack.push((name, node));
            }
            Event::Empty(start) => {
                let name = tag_name(&start);
                let value = open_node(&start).map_err(xml_err)?.into_value();
                attach(&mut stack, &mut root, name, value);
            }
            Event::Text(text) => {
                if let Some((_, node)) = stack.last_mut() {
                    node.text.push_str(&text.unescape().map_err(xml_err)?);
                }
            }
            Event::CData(data) => {
                if let Some((_, node)) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some((name, node)) = stack.pop() {
                    attach(&mut stack, &mut root, name, node.into_value());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((name, _)) = stack.last() {
        return Err(LookupError::MalformedDocument {
            path: path.to_path_buf(),
            reason: format!("unclosed element <{name}>"),
        });
    }
    root.ok_or_else(|| LookupError::MalformedDocument {
        path: path.to_path_buf(),
        reason: "no root element".to_string(),
    })
}

/// Reads one rulebook file. The root element's content becomes the
/// document content; its tag name is not checked.
pub fn read_document(path: &Path) -> Result<RawDocument> {
    if !path.exists() {
        return Err(LookupError::MissingInput(path.to_path_buf()));
    }
    let xml = fs::read_to_string(path)?;
    let (root, value) = parse_document(path, &xml)?;
    let content = match value {
        Value::Object(map) => map,
        _ => {
            return Err(LookupError::MalformedDocument {
                path: path.to_path_buf(),
                reason: format!("root element <{root}> has no structured content"),
            })
        }
    };
    Ok(RawDocument {
        id: document_id(path),
        path: path.to_path_buf(),
        content,
    })
}

/// Every `*.xml` file directly inside `dir`, sorted by path.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LookupError::MissingInput(dir.to_path_buf()));
    }
    let pattern = dir.join("*.xml");
    let mut files = Vec::new();
    for entry in glob(&pattern.to_string_lossy())? {
        let path = entry.map_err(std::io::Error::from)?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File name up to its first dot: `weapons.xml` -> `weapons`.
pub fn document_id(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name,
    }
}

fn tag_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn open_node(start: &BytesStart<'_>) -> std::result::Result<Node, quick_xml::Error> {
    let mut node = Node::default();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(
    stack: &mut [(String, Node)],
    root: &mut Option<(String, Value)>,
    name: String,
    value: Value,
) {
    match stack.last_mut() {
        Some((_, parent)) => parent.add_child(name, value),
        None => {
            if root.is_none() {
                *root = Some((name, value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn parse(xml: &str) -> (String, Value) {
        parse_document(Path::new("inline.xml"), xml).unwrap()
    }

    #[test]
    fn repeated_children_become_arrays() {
        let (root, value) = parse(
            "<chummer><weapons><weapon><name>A</name></weapon><weapon><name>B</name></weapon></weapons></chummer>",
        );
        assert_eq!(root, "chummer");
        assert_eq!(
            value,
            json!({"weapons": {"weapon": [{"name": "A"}, {"name": "B"}]}})
        );
    }

    #[test]
    fn attributes_text_and_empty_elements() {
        let (_, value) = parse(
            r#"<chummer xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
                 <version>1</version>
                 <blank/>
                 <hollow></hollow>
                 <name translate="x">Ares &amp; Co</name>
               </chummer>"#,
        );
        assert_eq!(
            value,
            json!({
                "@xmlns:xsi": "http://www.w3.org/2001/XMLSchema-instance",
                "version": "1",
                "blank": null,
                "hollow": null,
                "name": {"@translate": "x", "#text": "Ares & Co"}
            })
        );
    }

    #[test]
    fn child_order_follows_document_order() {
        let (_, value) = parse("<r><zeta>1</zeta><alpha>2</alpha><zeta>3</zeta></r>");
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert_eq!(value["zeta"], json!(["1", "3"]));
    }

    #[test]
    fn cdata_is_kept_as_text() {
        let (_, value) = parse("<r><notes><![CDATA[a < b]]></notes></r>");
        assert_eq!(value["notes"], json!("a < b"));
    }

    #[test]
    fn mismatched_tags_fail() {
        let err = parse_document(Path::new("bad.xml"), "<r><a></b></r>").unwrap_err();
        assert!(matches!(err, LookupError::Xml { .. }));
    }

    #[test]
    fn unclosed_root_fails() {
        let err = parse_document(Path::new("bad.xml"), "<r><a>1</a>").unwrap_err();
        assert!(matches!(
            err,
            LookupError::MalformedDocument { .. } | LookupError::Xml { .. }
        ));
    }

    #[test]
    fn document_id_stops_at_first_dot() {
        assert_eq!(document_id(Path::new("/data/weapons.xml")), "weapons");
        assert_eq!(document_id(Path::new("lang.de-de.xml")), "lang");
        assert_eq!(document_id(Path::new("plain")), "plain");
    }

    #[test]
    fn read_document_uses_root_content() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<chummer><spells><spell><name>Fireball</name></spell><spell><name>Manabolt</name></spell></spells></chummer>").unwrap();
        let doc = read_document(file.path()).unwrap();
        assert!(doc.content.contains_key("spells"));
        assert_eq!(doc.path, file.path());
    }

    #[test]
    fn text_only_root_is_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<chummer>nothing here</chummer>").unwrap();
        let err = read_document(file.path()).unwrap_err();
        assert!(matches!(err, LookupError::MalformedDocument { .. }));
    }

    #[test]
    fn discover_lists_xml_files_sorted() {
        let dir = tempdir().unwrap();
        for name in ["weapons.xml", "armor.xml", "readme.txt"] {
            fs::write(dir.path().join(name), "<chummer/>").unwrap();
        }
        let files = discover(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| document_id(p)).collect();
        assert_eq!(names, ["armor", "weapons"]);
    }

    #[test]
    fn discover_missing_dir() {
        let dir = tempdir().unwrap();
        let err = discover(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, LookupError::MissingInput(_)));
    }
}
