//! Generic XML to JSON conversion
//!
//! The root element becomes the single top-level key. Attributes merge into
//! the element's object, repeated children collapse into an array and a lone
//! child stays a plain value. Elements with neither attributes nor children
//! become their trimmed text; text next to attributes or children is kept
//! under [`TEXT_KEY`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Key holding character data of elements that also carry attributes or children
pub const TEXT_KEY: &str = "_";

/// Element being assembled while its children are read
struct Frame {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, String> {
        let name = String::from_utf8(start.name().as_ref().to_vec())
            .map_err(|e| format!("invalid element name: {e}"))?;

        let mut fields = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| format!("invalid attribute on <{name}>: {e}"))?;
            let key = String::from_utf8(attr.key.as_ref().to_vec())
                .map_err(|e| format!("invalid attribute name on <{name}>: {e}"))?;
            let value = attr
                .unescape_value()
                .map_err(|e| format!("invalid attribute value on <{name}>: {e}"))?;
            insert_merged(&mut fields, key, Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            fields,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let text = self.text.trim();
        let mut fields = self.fields;
        if fields.is_empty() {
            return (self.name, Value::String(text.to_string()));
        }
        if !text.is_empty() {
            insert_merged(&mut fields, TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        (self.name, Value::Object(fields))
    }
}

/// Insert `value` under `key`, turning repeated keys into an ordered array
fn insert_merged(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

/// Convert an XML document to JSON
///
/// Fails on invalid UTF-8, malformed markup, unclosed elements and documents
/// with zero or several root elements. The error is a human-readable reason.
pub fn to_json(raw: &[u8]) -> Result<Value, String> {
    let xml = std::str::from_utf8(raw).map_err(|e| format!("document is not UTF-8: {e}"))?;
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    let mut attach = |stack: &mut Vec<Frame>, (name, value): (String, Value)| -> Result<(), String> {
        match stack.last_mut() {
            Some(parent) => {
                insert_merged(&mut parent.fields, name, value);
                Ok(())
            }
            None if root.is_none() => {
                root = Some((name, value));
                Ok(())
            }
            None => Err(format!("second root element <{name}>")),
        }
    };

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(Frame::open(&start)?),
            Ok(Event::Empty(start)) => {
                let element = Frame::open(&start)?.close();
                attach(&mut stack, element)?;
            }
            Ok(Event::End(_)) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| "closing tag without matching opening tag".to_string())?;
                attach(&mut stack, frame.close())?;
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| format!("invalid character data: {e}"))?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err("character data outside the root element".to_string()),
                }
            }
            Ok(Event::CData(data)) => {
                let data = String::from_utf8(data.into_inner().into_owned())
                    .map_err(|e| format!("invalid CDATA section: {e}"))?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&data);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "malformed XML at position {}: {e}",
                    reader.error_position()
                ))
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name));
    }

    let (name, value) = root.ok_or_else(|| "document has no root element".to_string())?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}
