use crate::{Assertion, Error};
use std::rc::Rc;

/// Observer registration passed to [`IdentityProvider::watch`].
///
/// The widget compares `logged_in_user` against its own session and fires exactly one of
/// the two handlers at load time to reconcile them, and again after every later change.
#[derive(Clone)]
pub struct Watch {
	pub logged_in_user: Option<String>,
	pub on_login: Rc<dyn Fn(Assertion)>,
	pub on_logout: Rc<dyn Fn()>,
}

impl Watch {
	pub fn new<L, O>(logged_in_user: Option<String>, on_login: L, on_logout: O) -> Self
	where
		L: Fn(Assertion) + 'static,
		O: Fn() + 'static,
	{
		Self {
			logged_in_user,
			on_login: Rc::new(on_login),
			on_logout: Rc::new(on_logout),
		}
	}

	pub fn login(&self, assertion: Assertion) {
		(self.on_login)(assertion);
	}

	pub fn logout(&self) {
		(self.on_logout)();
	}
}

impl std::fmt::Debug for Watch {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Watch").field("logged_in_user", &self.logged_in_user).finish_non_exhaustive()
	}
}

/// The three entry points a page uses on the identity widget.
pub trait IdentityProvider {
	fn watch(&self, watch: Watch) -> Result<(), Error>;

	/// Opens the provider's login popup.
	fn request(&self) -> Result<(), Error>;

	/// Ends the provider-side session. The provider reports it through the watched logout handler.
	fn logout(&self) -> Result<(), Error>;
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for Rc<T> {
	fn watch(&self, watch: Watch) -> Result<(), Error> {
		(**self).watch(watch)
	}

	fn request(&self) -> Result<(), Error> {
		(**self).request()
	}

	fn logout(&self) -> Result<(), Error> {
		(**self).logout()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::cell::RefCell;

	#[test]
	fn handlers_receive_events() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let watch = Watch::new(
			Some("user@example.com".into()),
			{
				let seen = seen.clone();
				move |assertion: Assertion| seen.borrow_mut().push(format!("login:{}", assertion.as_str()))
			},
			{
				let seen = seen.clone();
				move || seen.borrow_mut().push("logout".into())
			},
		);
		watch.login("tok123".into());
		watch.clone().logout();
		assert_eq!(*seen.borrow(), vec!["login:tok123".to_owned(), "logout".to_owned()]);
	}

	#[test]
	fn debug_shows_user_only() {
		let watch = Watch::new(None, |_| {}, || {});
		assert_eq!(format!("{watch:?}"), "Watch { logged_in_user: None, .. }");
	}
}
