use crate::{
	backend::HttpBackend,
	config::{RelayConfig, CONFIG_ELEMENT_ID},
	error::MissingBrowserObject,
	identity::{PageKind, SessionIdentity},
	relay::{self, EventSender, PageControl, Relay, RelayEvent},
	Error,
};
use gloo_events::EventListener;
use persona::NavigatorId;
use web_sys::{Document, Window};

pub struct BrowserPage {
	window: Window,
}

impl PageControl for BrowserPage {
	fn reload(&self) {
		if let Err(err) = self.window.location().reload() {
			log::error!(target: "browser", "Failed to reload the page: {err:?}");
		}
	}

	fn alert(&self, message: &str) {
		if let Err(err) = self.window.alert_with_message(message) {
			log::error!(target: "browser", "Failed to show alert {message:?}: {err:?}");
		}
	}
}

/// Reads the inline config block, falling back to defaults when the page has none.
fn read_config(document: &Document) -> Result<RelayConfig, Error> {
	let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
		return Ok(RelayConfig::default());
	};
	let text = element.text_content().unwrap_or_default();
	RelayConfig::from_json(&text)
}

/// Forwards clicks on each existing control as `event`. Returns how many controls were found.
fn bind_clicks(document: &Document, ids: &[String], events: &EventSender, event: fn() -> RelayEvent) -> usize {
	let mut bound = 0;
	for id in ids {
		let Some(element) = document.get_element_by_id(id) else {
			log::debug!(target: "browser", "No #{id} control on this page.");
			continue;
		};
		let events = events.clone();
		// Controls live as long as the page does.
		EventListener::new(&element, "click", move |_| relay::send_event(&events, event())).forget();
		bound += 1;
	}
	bound
}

/// Boots the relay on the current page: reads config and session identity, binds the
/// sign-in and sign-out controls, and spawns the relay on the browser's event loop.
pub fn start() -> anyhow::Result<()> {
	let window = web_sys::window().ok_or(MissingBrowserObject("window"))?;
	let document = window.document().ok_or(MissingBrowserObject("document"))?;
	let config = read_config(&document)?;

	let rendered = document
		.get_element_by_id(&config.identifier_element)
		.map(|element| element.text_content().unwrap_or_default());
	let kind = config.page.unwrap_or_else(|| PageKind::detect(rendered.is_some()));
	let identity = SessionIdentity::for_page(kind, rendered.as_deref());
	log::info!(target: "browser", "Starting identity relay on the {kind:?} page as {:?}.", identity.user());

	let (events, receiver) = relay::channel();
	let signin = bind_clicks(&document, &config.signin_controls, &events, || RelayEvent::SigninClicked);
	let signout = bind_clicks(&document, &config.signout_controls, &events, || RelayEvent::SignoutClicked);
	log::debug!(target: "browser", "Bound {signin} sign-in and {signout} sign-out controls.");

	let origin = window
		.location()
		.origin()
		.map_err(|err| Error::Dom(format!("Cannot read page origin: {err:?}")))?;
	let backend = HttpBackend::new(config.endpoints(&origin)?, config.request_timeout())?;
	let relay = Relay::new(NavigatorId, backend, BrowserPage { window }, identity);
	wasm_bindgen_futures::spawn_local(relay.run(events, receiver));
	Ok(())
}
