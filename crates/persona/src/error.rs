use wasm_bindgen::JsCast;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
	/// `navigator.id` is not installed, usually because the widget script failed to load.
	#[error("identity widget is unavailable: {0}")]
	Unavailable(String),
	/// The widget threw while handling a call.
	#[error("identity widget rejected {call}: {reason}")]
	Rejected { call: &'static str, reason: String },
}

impl Error {
	/// Converts a value thrown by `call`. `installed` is whether `navigator.id` existed at the time.
	pub(crate) fn from_js(call: &'static str, installed: bool, value: wasm_bindgen::JsValue) -> Self {
		let reason = match value.as_string() {
			Some(reason) => reason,
			None => match value.dyn_ref::<js_sys::Error>() {
				Some(error) => String::from(error.message()),
				None => format!("{value:?}"),
			},
		};
		Self::thrown(call, installed, reason)
	}

	fn thrown(call: &'static str, installed: bool, reason: String) -> Self {
		match installed {
			true => Self::Rejected { call, reason },
			false => Self::Unavailable(reason),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn throw_without_widget_is_unavailable() {
		let error = Error::thrown("request", false, "navigator.id is undefined".into());
		assert_eq!(error, Error::Unavailable("navigator.id is undefined".into()));
	}

	#[test]
	fn type_error_inside_loaded_widget_is_rejected() {
		let error = Error::thrown("watch", true, "onlogin is not a function".into());
		assert_eq!(
			error,
			Error::Rejected {
				call: "watch",
				reason: "onlogin is not a function".into()
			}
		);
		assert_eq!(error.to_string(), "identity widget rejected watch: onlogin is not a function");
	}
}
