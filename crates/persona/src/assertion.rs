/// Signed identity token handed out by the widget after a successful login.
/// Opaque to the page; it is only ever forwarded to the backend for verification.
#[derive(Clone, PartialEq, Eq)]
pub struct Assertion(String);

impl Assertion {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<String> for Assertion {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for Assertion {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}

// Tokens are credentials, keep them out of logs.
impl std::fmt::Debug for Assertion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Assertion({} bytes)", self.0.len())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn debug_hides_token() {
		let assertion = Assertion::new("eyJhbGciOiJSUzI1NiJ9.secret");
		let printed = format!("{assertion:?}");
		assert!(!printed.contains("secret"));
		assert_eq!(printed, "Assertion(27 bytes)");
	}

	#[test]
	fn conversions() {
		assert_eq!(Assertion::from("tok123").as_str(), "tok123");
		assert_eq!(Assertion::from("tok123".to_owned()), Assertion::new("tok123"));
	}
}
