//! The host-facing surface of the crate.
//!
//! The host runtime hands over its arguments as loosely typed values, which
//! are represented here as [`serde_json::Value`]s. Every failure is reported
//! as an [`Error`] whose [code] is one of the fixed strings the host expects,
//! and whose [kind] names the exception class to raise.
//!
//! [code]: Error::code
//! [kind]: Error::kind
use serde_json::Value;
use crate::accent::{Effect, EffectKind, GradientColor, Mode};
use crate::platform::{Native, OsVersion, Platform, WindowHandle};
use crate::toggler::Toggler;
use crate::Error;

/// The functions exported to the host, bound to a platform.
#[derive(Debug, Clone, Default)]
pub struct Bindings<P = Native> {
	toggler: Toggler<P>,
}

impl Bindings<Native> {
	pub fn native() -> Self {
		Self { toggler: Toggler::native() }
	}
}

impl<P: Platform> Bindings<P> {
	pub fn new(platform: P) -> Self {
		Self { toggler: Toggler::new(platform) }
	}

	/// Fails unless the running system supports window vibrancy.
	pub fn check_platform(&self) -> Result<OsVersion, Error> {
		self.toggler.check_platform()
	}

	/// `setVibrancy(windowHandle, mode)` or
	/// `setVibrancy(windowHandle, effect, red, green, blue, opacity)`.
	///
	/// In the short form, `mode` is one of the numbered [presets]. In the long
	/// form, `effect` is 0 for blur and 1 for acrylic, and the color channels
	/// are clamped to the `0..=255` range.
	///
	/// [presets]: Mode
	pub fn set_vibrancy(&self, args: &[Value]) -> Result<(), Error> {
		let version = self.toggler.check_platform()?;
		let window = window_argument(args)?;

		let effect = match args {
			[_, mode] => preset(mode)?,
			[_, effect, red, green, blue, opacity] => Effect {
				kind: custom_kind(effect)?,
				color: GradientColor::from_rgba(
					channel(red, "red")?,
					channel(green, "green")?,
					channel(blue, "blue")?,
					channel(opacity, "opacity")?),
			},
			_ => return Err(Error::InvalidArguments(format!(
				"setVibrancy takes 2 or 6 arguments, but {} were given",
				args.len())))
		};

		self.toggler.enable_on(&version, window, effect)
	}

	/// `disableVibrancy(windowHandle)`.
	pub fn disable_vibrancy(&self, args: &[Value]) -> Result<(), Error> {
		self.toggler.check_platform()?;
		let window = window_argument(args)?;

		self.toggler.disable_on(window)
	}
}

/// The window handle in the first argument. Null and zero both mean that no
/// window was given.
fn window_argument(args: &[Value]) -> Result<WindowHandle, Error> {
	let handle = match args.first() {
		None | Some(Value::Null) => return Err(Error::WindowNotGiven),
		Some(value) => integer(value, "window handle")?,
	};
	if handle == 0 {
		return Err(Error::WindowNotGiven)
	}

	isize::try_from(handle)
		.map(WindowHandle)
		.map_err(|_| Error::InvalidArguments(format!(
			"window handle {} is out of range",
			handle)))
}

fn preset(value: &Value) -> Result<Effect, Error> {
	let code = integer(value, "mode")?;
	Mode::from_code(code)
		.map(Mode::effect)
		.ok_or(Error::InvalidMode(code))
}

fn custom_kind(value: &Value) -> Result<EffectKind, Error> {
	match integer(value, "effect")? {
		0 => Ok(EffectKind::Blur),
		1 => Ok(EffectKind::Acrylic),
		other => Err(Error::InvalidMode(other)),
	}
}

fn number(value: &Value, what: &str) -> Result<f64, Error> {
	value.as_f64()
		.ok_or_else(|| Error::InvalidArguments(format!(
			"{} must be a number, got {}",
			what,
			value)))
}

/// Integers arrive from the host as doubles, so whole doubles are fine too.
fn integer(value: &Value, what: &str) -> Result<i64, Error> {
	if let Some(integer) = value.as_i64() {
		return Ok(integer)
	}

	let number = number(value, what)?;
	if number.fract() == 0.0 && number >= i64::MIN as f64 && number <= i64::MAX as f64 {
		Ok(number as i64)
	} else {
		Err(Error::InvalidArguments(format!(
			"{} must be an integer, got {}",
			what,
			number)))
	}
}

fn channel(value: &Value, what: &str) -> Result<u8, Error> {
	Ok(number(value, what)?.clamp(0.0, 255.0) as u8)
}
