use crate::{identity::PageKind, Error};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest delay `setTimeout` honours; larger values fire immediately.
pub const MAX_REQUEST_TIMEOUT_MS: u32 = i32::MAX as u32;

/// Element id of the optional JSON block that overrides [`RelayConfig`] defaults.
pub static CONFIG_ELEMENT_ID: &str = "relay-config";

/// Page-level settings, read from an inline `<script type="application/json">` block.
/// Every field may be omitted.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
	pub signin_path: String,
	pub signout_path: String,
	pub signin_controls: Vec<String>,
	pub signout_controls: Vec<String>,
	pub identifier_element: String,
	pub request_timeout_ms: u32,
	pub page: Option<PageKind>,
}

impl Default for RelayConfig {
	fn default() -> Self {
		Self {
			signin_path: "/persona/signin".into(),
			signout_path: "/persona/signout".into(),
			signin_controls: vec!["signin".into(), "signin2".into()],
			signout_controls: vec!["signout".into()],
			identifier_element: "identifier".into(),
			request_timeout_ms: 30_000,
			page: None,
		}
	}
}

impl RelayConfig {
	pub fn from_json(text: &str) -> Result<Self, Error> {
		let config: Self = serde_json::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), Error> {
		if !(1..=MAX_REQUEST_TIMEOUT_MS).contains(&self.request_timeout_ms) {
			return Err(Error::TimeoutOutOfRange(self.request_timeout_ms));
		}
		Ok(())
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.request_timeout_ms as u64)
	}

	/// Resolves the configured endpoint paths against the page origin.
	pub fn endpoints(&self, origin: &str) -> Result<Endpoints, Error> {
		let base = url::Url::parse(origin)?;
		Ok(Endpoints {
			signin: base.join(&self.signin_path)?,
			signout: base.join(&self.signout_path)?,
		})
	}
}

#[derive(Clone, PartialEq, Debug)]
pub struct Endpoints {
	pub signin: url::Url,
	pub signout: url::Url,
}
