use crate::{
	config::{Endpoints, MAX_REQUEST_TIMEOUT_MS},
	Error,
};
use futures::future::{Either, LocalBoxFuture};
use persona::Assertion;
use reqwest::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use std::{rc::Rc, time::Duration};

/// HTTP status code of a request that reached the server.
pub type StatusCode = u16;

/// The two session endpoints on the website's backend.
///
/// Each future resolves once, with the response status or the reason no response arrived.
/// The backend answers 200 when the assertion was verified and the session is bound,
/// or when the session was cleared.
pub trait SessionBackend {
	fn verify(&self, assertion: &Assertion) -> LocalBoxFuture<'static, Result<StatusCode, Error>>;
	fn sign_out(&self) -> LocalBoxFuture<'static, Result<StatusCode, Error>>;
}

impl<T: SessionBackend + ?Sized> SessionBackend for Rc<T> {
	fn verify(&self, assertion: &Assertion) -> LocalBoxFuture<'static, Result<StatusCode, Error>> {
		(**self).verify(assertion)
	}

	fn sign_out(&self) -> LocalBoxFuture<'static, Result<StatusCode, Error>> {
		(**self).sign_out()
	}
}

/// Url-encoded form body carrying the assertion.
pub fn form_body(assertion: &Assertion) -> String {
	format!("assertion={}", urlencoding::encode(assertion.as_str()))
}

#[derive(Clone)]
pub struct HttpBackend {
	client: reqwest::Client,
	endpoints: Endpoints,
	timeout: Duration,
}

impl HttpBackend {
	pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, Error> {
		let client = reqwest::Client::builder().build()?;
		Ok(Self {
			client,
			endpoints,
			timeout,
		})
	}

	fn verify_request(&self, assertion: &Assertion) -> reqwest::RequestBuilder {
		let body = form_body(assertion);
		// Fetch computes Content-Length and Connection itself and drops these two,
		// they are kept for servers reached through other transports.
		self.client
			.post(self.endpoints.signin.clone())
			.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
			.header(CONTENT_LENGTH, body.len())
			.header(CONNECTION, "close")
			.body(body)
	}

	fn sign_out_request(&self) -> reqwest::RequestBuilder {
		self.client.get(self.endpoints.signout.clone())
	}
}

impl SessionBackend for HttpBackend {
	fn verify(&self, assertion: &Assertion) -> LocalBoxFuture<'static, Result<StatusCode, Error>> {
		log::debug!(target: "relay", "POST {}", self.endpoints.signin);
		Box::pin(send_within(self.verify_request(assertion), self.timeout))
	}

	fn sign_out(&self) -> LocalBoxFuture<'static, Result<StatusCode, Error>> {
		log::debug!(target: "relay", "GET {}", self.endpoints.signout);
		Box::pin(send_within(self.sign_out_request(), self.timeout))
	}
}

/// Delay handed to `setTimeout`, kept inside the range browsers honour.
fn timer_millis(timeout: Duration) -> u32 {
	u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX).clamp(1, MAX_REQUEST_TIMEOUT_MS)
}

async fn send_within(request: reqwest::RequestBuilder, timeout: Duration) -> Result<StatusCode, Error> {
	let send = Box::pin(async move {
		let response = request.send().await?;
		Ok::<_, Error>(response.status().as_u16())
	});
	let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(timer_millis(timeout)));
	match futures::future::select(send, timer).await {
		Either::Left((result, _)) => result,
		Either::Right(((), _)) => Err(Error::TimedOut(timeout)),
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::config::RelayConfig;

	fn backend() -> anyhow::Result<HttpBackend> {
		let config = RelayConfig::default();
		Ok(HttpBackend::new(config.endpoints("http://localhost:1616")?, config.request_timeout())?)
	}

	#[test]
	fn form_body_plain_token() {
		assert_eq!(form_body(&Assertion::new("tok123")), "assertion=tok123");
	}

	#[test]
	fn form_body_keeps_url_safe_characters() {
		let token = "eyJhbGci.eyJwdWIi-_~xyz";
		assert_eq!(form_body(&Assertion::new(token)), format!("assertion={token}"));
	}

	#[test]
	fn form_body_escapes_reserved_characters() {
		assert_eq!(form_body(&Assertion::new("a+b=c&d")), "assertion=a%2Bb%3Dc%26d");
	}

	#[test]
	fn verify_request_shape() -> anyhow::Result<()> {
		let request = backend()?.verify_request(&Assertion::new("tok123")).build()?;
		assert_eq!(request.method(), reqwest::Method::POST);
		assert_eq!(request.url().as_str(), "http://localhost:1616/persona/signin");
		let headers = request.headers();
		assert_eq!(headers[CONTENT_TYPE], "application/x-www-form-urlencoded");
		assert_eq!(headers[CONTENT_LENGTH], "16");
		assert_eq!(headers[CONNECTION], "close");
		let body = request.body().and_then(|body| body.as_bytes());
		assert_eq!(body, Some(&b"assertion=tok123"[..]));
		Ok(())
	}

	#[test]
	fn timer_delay_stays_in_browser_range() {
		assert_eq!(timer_millis(Duration::from_secs(30)), 30_000);
		assert_eq!(timer_millis(Duration::from_millis(u64::from(MAX_REQUEST_TIMEOUT_MS))), MAX_REQUEST_TIMEOUT_MS);
		assert_eq!(timer_millis(Duration::from_millis(3_000_000_000)), MAX_REQUEST_TIMEOUT_MS);
		assert_eq!(timer_millis(Duration::from_secs(u64::MAX)), MAX_REQUEST_TIMEOUT_MS);
		assert_eq!(timer_millis(Duration::ZERO), 1);
	}

	#[test]
	fn sign_out_request_shape() -> anyhow::Result<()> {
		let request = backend()?.sign_out_request().build()?;
		assert_eq!(request.method(), reqwest::Method::GET);
		assert_eq!(request.url().as_str(), "http://localhost:1616/persona/signout");
		assert!(request.body().is_none());
		assert!(request.headers().get(CONTENT_TYPE).is_none());
		Ok(())
	}
}
