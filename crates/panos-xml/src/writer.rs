use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::tree::Element;

/// Errors raised while serializing an [`Element`] tree.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Event serialization failed.
    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Serialized bytes were not valid UTF-8.
    #[error("invalid UTF-8 in serialized XML: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize an [`Element`] tree as indented XML text.
///
/// For a compact single-line rendering use the tree's `Display` impl.
pub fn write(node: &Element) -> Result<String, WriteError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_element(&mut writer, node)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element(writer: &mut Writer<Vec<u8>>, node: &Element) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(node.tag.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &node.text {
        // Markup characters only; quotes stay literal, as in xpath payloads.
        let escaped = BytesText::from_escaped(partial_escape(text.as_str()));
        writer.write_event(Event::Text(escaped))?;
    }
    for child in &node.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.tag.as_str())))?;
    Ok(())
}
