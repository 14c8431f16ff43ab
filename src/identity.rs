use serde::{Deserialize, Serialize};

/// Which of the two session pages the relay was loaded on.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
	/// Guest page; the server has not bound anyone to the session.
	Join,
	/// Member page; the server renders the bound identifier into the document.
	Leave,
}

impl PageKind {
	/// Picks the page kind when the config does not name one.
	/// Only member pages render an identifier element.
	pub fn detect(has_identifier: bool) -> Self {
		match has_identifier {
			true => Self::Leave,
			false => Self::Join,
		}
	}
}

/// The user the server has bound to this session, computed once per page load.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct SessionIdentity(Option<String>);

impl SessionIdentity {
	pub fn anonymous() -> Self {
		Self(None)
	}

	/// Builds the identity from the text rendered into the identifier element.
	/// Blank text means nobody is bound.
	pub fn from_rendered(text: &str) -> Self {
		let text = text.trim();
		match text.is_empty() {
			true => Self(None),
			false => Self(Some(text.to_owned())),
		}
	}

	/// Resolves the identity for a page kind, given the identifier element's text if one exists.
	pub fn for_page(kind: PageKind, rendered: Option<&str>) -> Self {
		match (kind, rendered) {
			(PageKind::Join, _) => Self::anonymous(),
			(PageKind::Leave, Some(text)) => Self::from_rendered(text),
			(PageKind::Leave, None) => {
				log::warn!(target: "relay", "Leave page has no identifier element, treating the session as anonymous.");
				Self::anonymous()
			}
		}
	}

	pub fn user(&self) -> Option<&str> {
		self.0.as_deref()
	}

	pub fn into_inner(self) -> Option<String> {
		self.0
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn detect_page() {
		assert_eq!(PageKind::detect(true), PageKind::Leave);
		assert_eq!(PageKind::detect(false), PageKind::Join);
	}

	#[test]
	fn join_is_always_anonymous() {
		let identity = SessionIdentity::for_page(PageKind::Join, Some("user@example.com"));
		assert_eq!(identity.user(), None);
	}

	#[test]
	fn leave_uses_rendered_text() {
		let identity = SessionIdentity::for_page(PageKind::Leave, Some("  user@example.com\n"));
		assert_eq!(identity.user(), Some("user@example.com"));
	}

	#[test]
	fn blank_identifier_is_anonymous() {
		assert_eq!(SessionIdentity::from_rendered(" \t\n"), SessionIdentity::anonymous());
		assert_eq!(SessionIdentity::for_page(PageKind::Leave, None).into_inner(), None);
	}

	#[test]
	fn page_kind_names() -> anyhow::Result<()> {
		assert_eq!(serde_json::from_str::<PageKind>("\"leave\"")?, PageKind::Leave);
		assert_eq!(serde_json::to_string(&PageKind::Join)?, "\"join\"");
		Ok(())
	}
}
