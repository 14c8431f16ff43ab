pub use log::Level;

#[cfg(target_family = "wasm")]
pub mod wasm {
	/// Routes `log` records to the browser console and panics to `console.error`.
	pub fn init(level: super::Level) {
		console_error_panic_hook::set_once();
		super::report_init(console_log::init_with_level(level));
	}
}

/// Reports a failed logger install through whichever logger is already in place.
pub fn report_init(result: Result<(), log::SetLoggerError>) {
	if let Err(err) = result {
		log::warn!(target: "browser", "Keeping the existing logger: {err}");
	}
}

/// Debug builds log everything the relay does; release builds keep to state changes.
pub fn default_level() -> Level {
	match cfg!(debug_assertions) {
		true => Level::Debug,
		false => Level::Info,
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::sync::Mutex;

	struct Recorder(Mutex<Vec<String>>);

	impl log::Log for Recorder {
		fn enabled(&self, _: &log::Metadata) -> bool {
			true
		}

		fn log(&self, record: &log::Record) {
			if let Ok(mut lines) = self.0.lock() {
				lines.push(format!("{} {}", record.level(), record.args()));
			}
		}

		fn flush(&self) {}
	}

	static RECORDER: Recorder = Recorder(Mutex::new(Vec::new()));

	#[test]
	fn second_install_is_reported() -> anyhow::Result<()> {
		log::set_logger(&RECORDER).map_err(|err| anyhow::anyhow!("{err}"))?;
		log::set_max_level(log::LevelFilter::Trace);

		report_init(log::set_logger(&RECORDER));
		let lines = RECORDER.0.lock().map_err(|err| anyhow::anyhow!("{err}"))?;
		// Other tests in this binary log through the recorder too.
		let reported = lines.iter().filter(|line| line.starts_with("WARN Keeping the existing logger")).count();
		assert_eq!(reported, 1);
		Ok(())
	}

	#[test]
	fn release_level() {
		let expected = match cfg!(debug_assertions) {
			true => Level::Debug,
			false => Level::Info,
		};
		assert_eq!(default_level(), expected);
	}
}
