#[cfg(target_family = "wasm")]
fn main() {
	use identity_relay::logging;
	logging::wasm::init(logging::default_level());
	if let Err(err) = identity_relay::browser::start() {
		log::error!(target: "browser", "Identity relay did not start: {err:?}");
	}
}

#[cfg(not(target_family = "wasm"))]
fn main() -> anyhow::Result<()> {
	anyhow::bail!("identity-relay runs inside a browser page, build it for wasm32-unknown-unknown")
}
