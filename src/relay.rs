use crate::{
	backend::{SessionBackend, StatusCode},
	identity::SessionIdentity,
	Error,
};
use futures::{
	future::LocalBoxFuture,
	stream::{FuturesUnordered, StreamExt},
	FutureExt,
};
use persona::{Assertion, IdentityProvider, Watch};
use std::rc::Rc;

/// Something that happened on the page which the relay has to react to.
#[derive(Debug)]
pub enum RelayEvent {
	SigninClicked,
	SignoutClicked,
	LoginObserved(Assertion),
	LogoutObserved,
}

pub type EventSender = async_channel::Sender<RelayEvent>;
pub type EventReceiver = async_channel::Receiver<RelayEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
	async_channel::unbounded()
}

/// Forwards an event from a browser callback, which has nowhere to return an error to.
pub fn send_event(events: &EventSender, event: RelayEvent) {
	if let Err(err) = events.try_send(event) {
		log::error!(target: "relay", "Dropped {:?}, the relay is no longer running.", err.into_inner());
	}
}

/// Browser-level effects of a finished request.
pub trait PageControl {
	fn reload(&self);
	/// Blocking notification shown to the user.
	fn alert(&self, message: &str);
}

impl<T: PageControl + ?Sized> PageControl for Rc<T> {
	fn reload(&self) {
		(**self).reload()
	}

	fn alert(&self, message: &str) {
		(**self).alert(message)
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
	Verify,
	SignOut,
}

/// State carried by one outbound request until it completes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PendingRequest {
	pub id: u64,
	pub action: Action,
}

#[derive(Debug)]
pub struct Completion {
	pub request: PendingRequest,
	pub result: Result<StatusCode, Error>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
	Reload,
	Failed { message: String },
}

impl Completion {
	pub fn outcome(&self) -> Outcome {
		match &self.result {
			Ok(200) => Outcome::Reload,
			Ok(status) => Outcome::Failed {
				message: format!("XMLHttpRequest error: {status}"),
			},
			Err(err) => Outcome::Failed {
				message: format!("XMLHttpRequest error: {err}"),
			},
		}
	}
}

enum Step {
	Event(Option<RelayEvent>),
	Completed(Completion),
}

/// Bridges the identity widget and the session backend for one page load.
///
/// Clicks and widget callbacks arrive as [`RelayEvent`]s. Login and logout observations each
/// start one backend request; every request completes independently of the others and
/// either reloads the page (200) or alerts and logs out at the provider (anything else).
pub struct Relay<P, B, U> {
	provider: P,
	backend: B,
	page: U,
	identity: SessionIdentity,
	next_request_id: u64,
	in_flight: usize,
}

impl<P, B, U> Relay<P, B, U>
where
	P: IdentityProvider + 'static,
	B: SessionBackend + 'static,
	U: PageControl + 'static,
{
	pub fn new(provider: P, backend: B, page: U, identity: SessionIdentity) -> Self {
		Self {
			provider,
			backend,
			page,
			identity,
			next_request_id: 0,
			in_flight: 0,
		}
	}

	/// Registers the page's watch with the provider and handles events until every sender is gone.
	///
	/// `events` is consumed by the watch registration; clones of it are how the rest of the
	/// page feeds the relay.
	pub async fn run(mut self, events: EventSender, receiver: EventReceiver) {
		if let Err(err) = self.register(events) {
			log::error!(target: "relay", "Failed to watch the identity provider: {err}");
		}

		let mut pending = FuturesUnordered::<LocalBoxFuture<'static, Completion>>::new();
		loop {
			let step = futures::select! {
				event = receiver.recv().fuse() => Step::Event(event.ok()),
				completion = pending.select_next_some() => Step::Completed(completion),
			};
			match step {
				Step::Event(Some(event)) => {
					if let Some(request) = self.handle_event(event) {
						pending.push(request);
					}
				}
				Step::Event(None) => break,
				Step::Completed(completion) => self.complete(completion),
			}
		}

		while let Some(completion) = pending.next().await {
			self.complete(completion);
		}
		log::debug!(target: "relay", "Event channel closed, relay stopped.");
	}

	fn register(&self, events: EventSender) -> Result<(), Error> {
		let on_login = events.clone();
		let on_logout = events;
		let watch = Watch::new(
			self.identity.user().map(str::to_owned),
			move |assertion| send_event(&on_login, RelayEvent::LoginObserved(assertion)),
			move || send_event(&on_logout, RelayEvent::LogoutObserved),
		);
		self.provider.watch(watch)?;
		Ok(())
	}

	fn handle_event(&mut self, event: RelayEvent) -> Option<LocalBoxFuture<'static, Completion>> {
		log::debug!(target: "relay", "Handling {event:?}");
		match event {
			RelayEvent::SigninClicked => {
				if let Err(err) = self.provider.request() {
					log::warn!(target: "relay", "Cannot start login: {err}");
				}
				None
			}
			RelayEvent::SignoutClicked => {
				if let Err(err) = self.provider.logout() {
					log::warn!(target: "relay", "Cannot start logout: {err}");
				}
				None
			}
			RelayEvent::LoginObserved(assertion) => {
				let response = self.backend.verify(&assertion);
				Some(self.track(Action::Verify, response))
			}
			RelayEvent::LogoutObserved => {
				let response = self.backend.sign_out();
				Some(self.track(Action::SignOut, response))
			}
		}
	}

	fn track(
		&mut self,
		action: Action,
		response: LocalBoxFuture<'static, Result<StatusCode, Error>>,
	) -> LocalBoxFuture<'static, Completion> {
		self.next_request_id += 1;
		self.in_flight += 1;
		let request = PendingRequest {
			id: self.next_request_id,
			action,
		};
		if self.in_flight > 1 {
			log::debug!(target: "relay", "Sent {request:?} while {} other requests are in flight.", self.in_flight - 1);
		} else {
			log::debug!(target: "relay", "Sent {request:?}");
		}
		Box::pin(async move {
			let result = response.await;
			Completion { request, result }
		})
	}

	fn complete(&mut self, completion: Completion) {
		self.in_flight = self.in_flight.saturating_sub(1);
		match completion.outcome() {
			Outcome::Reload => {
				log::info!(target: "relay", "{:?} succeeded, reloading.", completion.request);
				self.page.reload();
			}
			Outcome::Failed { message } => {
				log::error!(target: "relay", "{:?} failed: {message}", completion.request);
				self.page.alert(&message);
				if let Err(err) = self.provider.logout() {
					log::warn!(target: "relay", "Cannot log out at the provider: {err}");
				}
			}
		}
	}
}
