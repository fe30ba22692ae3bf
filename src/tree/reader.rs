//! XML reader that builds [`ElementNode`] trees.

use crate::error::{RemapError, Result};
use crate::tree::node::{ElementNode, QualifiedName};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse an XML document into its root element.
///
/// Comments, processing instructions and the XML declaration are skipped.
/// `xmlns` attributes are recorded as namespace declarations instead of
/// attributes. Text and CDATA directly under an element are concatenated and
/// trimmed.
pub fn parse_xml(content: &str) -> Result<ElementNode> {
	let mut reader = Reader::from_str(content);
	let mut stack: Vec<ElementNode> = Vec::new();
	let mut root: Option<ElementNode> = None;

	loop {
		match reader.read_event() {
			Ok(Event::Start(e)) => stack.push(start_element(&e)?),
			Ok(Event::Empty(e)) => {
				let element = start_element(&e)?;
				attach(&mut stack, &mut root, element)?;
			}
			Ok(Event::End(_)) => {
				let mut element = stack.pop().ok_or_else(|| RemapError::XmlStructure {
					message: "closing tag without an open element".to_string(),
				})?;
				element.text = element.text.trim().to_string();
				attach(&mut stack, &mut root, element)?;
			}
			Ok(Event::Text(e)) => {
				let text = e.unescape().map_err(|err| RemapError::XmlStructure {
					message: format!("invalid text content: {err}"),
				})?;
				if let Some(open) = stack.last_mut() {
					open.text.push_str(&text);
				}
			}
			Ok(Event::CData(e)) => {
				if let Some(open) = stack.last_mut() {
					open.text.push_str(&String::from_utf8_lossy(e.as_ref()));
				}
			}
			Ok(Event::Eof) => break,
			Ok(_) => {}
			Err(source) => {
				return Err(RemapError::XmlSyntax {
					position: reader.error_position(),
					source,
				});
			}
		}
	}

	if let Some(open) = stack.last() {
		return Err(RemapError::XmlStructure {
			message: format!("unclosed element <{}>", display_name(&open.name)),
		});
	}

	root.ok_or_else(|| RemapError::XmlStructure {
		message: "empty document: no root element found".to_string(),
	})
}

fn start_element(e: &BytesStart<'_>) -> Result<ElementNode> {
	let raw_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
	let mut element = ElementNode::new(QualifiedName::parse(&raw_name));

	for attr in e.attributes() {
		let attr = attr.map_err(|err| RemapError::XmlStructure {
			message: format!("invalid attribute in <{raw_name}>: {err}"),
		})?;
		let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
		let value = attr
			.unescape_value()
			.map_err(|err| RemapError::XmlStructure {
				message: format!("invalid value for attribute {key} in <{raw_name}>: {err}"),
			})?
			.into_owned();

		if key == "xmlns" {
			element.namespaces.insert(String::new(), value);
		} else if let Some(prefix) = key.strip_prefix("xmlns:") {
			element.namespaces.insert(prefix.to_string(), value);
		} else {
			element.attributes.push((QualifiedName::parse(&key), value));
		}
	}

	Ok(element)
}

/// Hand a finished element to its parent, or make it the root.
fn attach(
	stack: &mut [ElementNode],
	root: &mut Option<ElementNode>,
	element: ElementNode,
) -> Result<()> {
	if let Some(parent) = stack.last_mut() {
		parent.children.push(element);
		return Ok(());
	}

	if root.is_some() {
		return Err(RemapError::XmlStructure {
			message: format!("multiple root elements, found <{}>", display_name(&element.name)),
		});
	}
	*root = Some(element);
	Ok(())
}

fn display_name(name: &QualifiedName) -> String {
	match &name.prefix {
		Some(prefix) => format!("{prefix}:{}", name.local),
		None => name.local.clone(),
	}
}
