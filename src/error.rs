use std::{sync::Arc, time::Duration};

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
	#[error(transparent)]
	Request(Arc<reqwest::Error>),
	#[error("request timed out after {0:?}")]
	TimedOut(Duration),
	#[error(transparent)]
	Provider(#[from] persona::Error),
	#[error(transparent)]
	Url(#[from] url::ParseError),
	#[error("request_timeout_ms must be between 1 and 2147483647, got {0}")]
	TimeoutOutOfRange(u32),
	#[error("invalid relay config: {0}")]
	Config(Arc<serde_json::Error>),
	#[error("{0}")]
	Dom(String),
}

impl From<reqwest::Error> for Error {
	fn from(value: reqwest::Error) -> Self {
		Self::Request(Arc::new(value))
	}
}

impl From<serde_json::Error> for Error {
	fn from(value: serde_json::Error) -> Self {
		Self::Config(Arc::new(value))
	}
}

#[derive(thiserror::Error, Debug)]
#[error("Missing browser object {0}.")]
pub struct MissingBrowserObject(pub &'static str);
