use colored::Colorize;
use serde_json::{Map, Value};

use crate::error::{LookupError, Result};

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy)]
enum Token {
    Key,
    Str,
    Number,
    Literal,
    Punct,
}

/// Pretty JSON with sorted keys and four-space indentation, optionally
/// colored for a terminal.
pub fn render_json(value: &Value, highlight: bool) -> String {
    let mut out = String::new();
    write_value(value, 0, highlight, &mut out);
    out
}

/// Renders a structured entry; any other value is refused.
pub fn render_entry(value: &Value, highlight: bool) -> Result<String> {
    if !value.is_object() {
        return Err(LookupError::NotStructured(kind(value)));
    }
    Ok(render_json(value, highlight))
}

fn write_value(value: &Value, depth: usize, highlight: bool, out: &mut String) {
    match value {
        Value::Object(map) => write_object(map, depth, highlight, out),
        Value::Array(items) => write_array(items, depth, highlight, out),
        Value::String(_) => out.push_str(&paint(&value.to_string(), Token::Str, highlight)),
        Value::Number(num) => out.push_str(&paint(&num.to_string(), Token::Number, highlight)),
        Value::Bool(_) | Value::Null => {
            out.push_str(&paint(&value.to_string(), Token::Literal, highlight))
        }
    }
}

fn write_object(map: &Map<String, Value>, depth: usize, highlight: bool, out: &mut String) {
    if map.is_empty() {
        out.push_str(&paint("{}", Token::Punct, highlight));
        return;
    }
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    out.push_str(&paint("{", Token::Punct, highlight));
    out.push('\n');
    for (idx, key) in keys.iter().enumerate() {
        push_indent(depth + 1, out);
        let quoted = Value::String((*key).clone()).to_string();
        out.push_str(&paint(&quoted, Token::Key, highlight));
        out.push_str(&paint(":", Token::Punct, highlight));
        out.push(' ');
        write_value(&map[key.as_str()], depth + 1, highlight, out);
        if idx + 1 < keys.len() {
            out.push_str(&paint(",", Token::Punct, highlight));
        }
        out.push('\n');
    }
    push_indent(depth, out);
    out.push_str(&paint("}", Token::Punct, highlight));
}

fn write_array(items: &[Value], depth: usize, highlight: bool, out: &mut String) {
    if items.is_empty() {
        out.push_str(&paint("[]", Token::Punct, highlight));
        return;
    }
    out.push_str(&paint("[", Token::Punct, highlight));
    out.push('\n');
    for (idx, item) in items.iter().enumerate() {
        push_indent(depth + 1, out);
        write_value(item, depth + 1, highlight, out);
        if idx + 1 < items.len() {
            out.push_str(&paint(",", Token::Punct, highlight));
        }
        out.push('\n');
    }
    push_indent(depth, out);
    out.push_str(&paint("]", Token::Punct, highlight));
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn paint(text: &str, token: Token, highlight: bool) -> String {
    if !highlight {
        return text.to_string();
    }
    match token {
        Token::Key => text.blue().bold().to_string(),
        Token::Str => text.green().to_string(),
        Token::Number => text.cyan().to_string(),
        Token::Literal => text.magenta().to_string(),
        Token::Punct => text.bright_black().to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_sorted_recursively() {
        let value = json!({"page": "430", "name": "Fichetti", "bonus": {"z": 1, "a": [true, null]}});
        let expected = r#"{
    "bonus": {
        "a": [
            true,
            null
        ],
        "z": 1
    },
    "name": "Fichetti",
    "page": "430"
}"#;
        assert_eq!(render_json(&value, false), expected);
    }

    #[test]
    fn plain_render_parses_back() {
        let value = json!({"quote": "say \"hi\"", "empty": {}, "none": []});
        let text = render_json(&value, false);
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn highlight_colors_every_token() {
        colored::control::set_override(true);
        let value = json!({"name": "Fichetti", "tags": [1, null], "mods": {}});
        let colored_text = render_json(&value, true);
        let punct: Vec<String> = ["{", "}", "[", "]", ",", ":", "{}"]
            .iter()
            .map(|token| token.bright_black().to_string())
            .collect();
        let name = "\"Fichetti\"".green().to_string();
        colored::control::unset_override();

        for token in &punct {
            assert!(token.starts_with('\x1b'));
            assert!(colored_text.contains(token.as_str()), "{token:?}");
        }
        assert!(colored_text.contains(&name));
        assert_eq!(strip_ansi(&colored_text), render_json(&value, false));
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for next in chars.by_ref() {
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn non_objects_are_refused() {
        let err = render_entry(&json!(["a"]), false).unwrap_err();
        assert!(matches!(err, LookupError::NotStructured("array")));
        assert!(render_entry(&json!({"a": 1}), false).is_ok());
    }
}
