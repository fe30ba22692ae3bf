use indexmap::IndexMap;

/// A tag or attribute name with an optional namespace prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QualifiedName {
	/// Namespace prefix as written in the document (`m` in `m:item`).
	pub prefix: Option<String>,

	/// Local part of the name.
	pub local: String,
}

impl QualifiedName {
	pub fn new(local: impl Into<String>) -> Self {
		QualifiedName {
			prefix: None,
			local: local.into(),
		}
	}

	pub fn prefixed(prefix: impl Into<String>, local: impl Into<String>) -> Self {
		QualifiedName {
			prefix: Some(prefix.into()),
			local: local.into(),
		}
	}

	/// Split a raw `prefix:local` name at the first colon.
	pub fn parse(raw: &str) -> Self {
		match raw.split_once(':') {
			Some((prefix, local)) => QualifiedName::prefixed(prefix, local),
			None => QualifiedName::new(raw),
		}
	}
}

/// One element of a parsed markup document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
	/// Tag name.
	pub name: QualifiedName,

	/// Attributes in document order. Namespace declarations are not attributes.
	pub attributes: Vec<(QualifiedName, String)>,

	/// Child elements in document order, duplicates allowed.
	pub children: Vec<ElementNode>,

	/// Text directly under this element, not under its children.
	pub text: String,

	/// Namespaces declared on this element: prefix to URI, `""` for the default.
	pub namespaces: IndexMap<String, String>,
}

impl ElementNode {
	pub fn new(name: QualifiedName) -> Self {
		ElementNode {
			name,
			..Default::default()
		}
	}

	pub fn with_attribute(mut self, name: QualifiedName, value: impl Into<String>) -> Self {
		self.attributes.push((name, value.into()));
		self
	}

	pub fn with_child(mut self, child: ElementNode) -> Self {
		self.children.push(child);
		self
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = text.into();
		self
	}

	pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
		self.namespaces.insert(prefix.into(), uri.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_qualified_name() {
		assert_eq!(QualifiedName::parse("item"), QualifiedName::new("item"));
		assert_eq!(
			QualifiedName::parse("m:item"),
			QualifiedName::prefixed("m", "item")
		);
	}
}
