use crate::{Assertion, Error, IdentityProvider, Watch};
use wasm_bindgen::{prelude::*, JsValue};

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(catch, js_namespace = ["navigator", "id"], js_name = watch)]
	fn id_watch(options: &js_sys::Object) -> Result<(), JsValue>;

	#[wasm_bindgen(catch, js_namespace = ["navigator", "id"], js_name = request)]
	fn id_request() -> Result<(), JsValue>;

	#[wasm_bindgen(catch, js_namespace = ["navigator", "id"], js_name = logout)]
	fn id_logout() -> Result<(), JsValue>;
}

/// The widget installed by `https://login.persona.org/include.js`.
///
/// Every call is made through a catching binding, so a page whose widget script
/// never loaded gets [`Error::Unavailable`] instead of a thrown exception.
#[derive(Clone, Copy, Default, Debug)]
pub struct NavigatorId;

impl NavigatorId {
	/// Whether the widget script has installed `navigator.id`.
	pub fn installed() -> bool {
		let Ok(navigator) = js_sys::Reflect::get(&js_sys::global(), &"navigator".into()) else {
			return false;
		};
		if navigator.is_undefined() || navigator.is_null() {
			return false;
		}
		let Ok(id) = js_sys::Reflect::get(&navigator, &"id".into()) else {
			return false;
		};
		!id.is_undefined() && !id.is_null()
	}

	fn thrown(call: &'static str, value: JsValue) -> Error {
		Error::from_js(call, Self::installed(), value)
	}

	fn watch_options(watch: Watch) -> Result<js_sys::Object, JsValue> {
		let options = js_sys::Object::new();
		let user = match &watch.logged_in_user {
			Some(user) => JsValue::from_str(user),
			None => JsValue::NULL,
		};
		js_sys::Reflect::set(&options, &"loggedInUser".into(), &user)?;

		let on_login = watch.on_login.clone();
		let onlogin = Closure::<dyn Fn(String)>::new(move |token: String| {
			log::debug!(target: "persona", "onlogin fired");
			on_login(Assertion::from(token));
		});
		let on_logout = watch.on_logout.clone();
		let onlogout = Closure::<dyn Fn()>::new(move || {
			log::debug!(target: "persona", "onlogout fired");
			on_logout();
		});
		js_sys::Reflect::set(&options, &"onlogin".into(), onlogin.as_ref())?;
		js_sys::Reflect::set(&options, &"onlogout".into(), onlogout.as_ref())?;

		// The widget holds on to the handlers until the page unloads.
		onlogin.forget();
		onlogout.forget();
		Ok(options)
	}
}

impl IdentityProvider for NavigatorId {
	fn watch(&self, watch: Watch) -> Result<(), Error> {
		log::debug!(target: "persona", "Registering {watch:?}");
		let options = Self::watch_options(watch).map_err(|err| Self::thrown("watch", err))?;
		id_watch(&options).map_err(|err| Self::thrown("watch", err))
	}

	fn request(&self) -> Result<(), Error> {
		log::debug!(target: "persona", "Requesting login");
		id_request().map_err(|err| Self::thrown("request", err))
	}

	fn logout(&self) -> Result<(), Error> {
		log::debug!(target: "persona", "Requesting logout");
		id_logout().map_err(|err| Self::thrown("logout", err))
	}
}
