//! Caption document parsing: YouTube `json3` and legacy timed-text XML.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;

/// Parse a caption body into plain text.
///
/// JSON bodies are read as `json3`; anything else is tried as timed-text XML.
/// Returns `None` when no text could be extracted.
pub fn parse_caption_body(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => parse_json3(&json),
        Err(_) => parse_timed_text_xml(body),
    }
}

/// Every `events[].segs[].utf8`, each followed by a space, trimmed.
fn parse_json3(json: &Value) -> Option<String> {
    let events = json.get("events")?.as_array()?;
    let mut out = String::new();
    for segs in events.iter().filter_map(|e| e.get("segs")?.as_array()) {
        for text in segs.iter().filter_map(|s| s.get("utf8")?.as_str()) {
            if !text.is_empty() {
                out.push_str(text);
                out.push(' ');
            }
        }
    }
    non_empty(out.trim())
}

fn text_node_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Self-closing nodes match the first branch and carry no text.
    RE.get_or_init(|| {
        Regex::new(r"(?s)<text\b[^>]*?/>|<text\b[^>]*>(.*?)</text>").expect("valid regex")
    })
}

/// Content of every `<text>` node, entity-decoded, one per line.
fn parse_timed_text_xml(body: &str) -> Option<String> {
    let lines: Vec<String> = text_node_regex()
        .captures_iter(body)
        .filter_map(|c| c.get(1))
        .map(|m| decode_html_entities(&unescape_xml(m.as_str())))
        .collect();
    non_empty(lines.join("\n").trim())
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid regex"))
}

/// Replace entities in one pass; unknown entities are kept verbatim.
fn decode_with(text: &str, named: fn(&str) -> Option<&'static str>) -> String {
    entity_regex()
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32).map(String::from)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32).map(String::from)
            } else {
                named(name).map(str::to_string)
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn xml_entity(name: &str) -> Option<&'static str> {
    match name {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        _ => None,
    }
}

fn html_entity(name: &str) -> Option<&'static str> {
    match name {
        "nbsp" => Some("\u{a0}"),
        "copy" => Some("\u{a9}"),
        "reg" => Some("\u{ae}"),
        "hellip" => Some("\u{2026}"),
        "mdash" => Some("\u{2014}"),
        "ndash" => Some("\u{2013}"),
        "lsquo" => Some("\u{2018}"),
        "rsquo" => Some("\u{2019}"),
        "ldquo" => Some("\u{201c}"),
        "rdquo" => Some("\u{201d}"),
        "laquo" => Some("\u{ab}"),
        "raquo" => Some("\u{bb}"),
        _ => xml_entity(name),
    }
}

/// XML character and predefined entity references.
pub fn unescape_xml(text: &str) -> String {
    decode_with(text, xml_entity)
}

/// HTML character references, including common named ones.
pub fn decode_html_entities(text: &str) -> String {
    decode_with(text, html_entity)
}

#[cfg(test)]
#[path = "captions_tests.rs"]
mod tests;
