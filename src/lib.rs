/// Operating system seam: version information and the composition call.
pub mod platform;
pub use platform::{OsVersion, Platform, WindowHandle};

/// Data structures handed to the compositor.
pub mod accent;
pub use accent::{Effect, EffectKind, GradientColor, Mode};

/// Enabling and disabling the accent effect of a window.
mod toggler;
pub use toggler::*;

/// The functions exposed to the host scripting runtime.
pub mod binding;

/// The C ABI through which a host loads those functions.
pub mod ffi;

/// Vibrancy themes and options, as configured by the host.
pub mod theme;
pub use theme::{EffectChoice, Theme, VibrancyOptions};

/// Public interface for windows implementing `HasRawWindowHandle`.
mod vibrancy;
pub use vibrancy::*;

/// Error types that may be triggered from vibrancy functions.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
	/// The running operating system does not support accent policies.
	#[error("the current platform does not support window vibrancy")]
	UnsupportedPlatform,
	/// No window handle was given to the call.
	#[error("no window handle was given")]
	WindowNotGiven,
	/// The arguments were of the wrong count or type.
	#[error("invalid arguments: {0}")]
	InvalidArguments(String),
	/// The requested mode is not one of the known presets.
	#[error("unknown vibrancy mode {0}")]
	InvalidMode(i64),
	/// The library or the entry point could not be resolved.
	#[error("could not find \"{name}\": {reason}")]
	SymbolResolutionFailed {
		/// The name of the library or symbol that could not be found.
		name: &'static str,
		/// What the system reported when resolving it.
		reason: String,
	},
}

/// The class of exception the host should raise for an [`Error`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
	/// The arguments given by the caller were unacceptable.
	TypeError,
	/// The environment could not satisfy the request.
	Error,
}

impl Error {
	/// The fixed string code reported to the host for this error.
	pub fn code(&self) -> &'static str {
		match self {
			Error::UnsupportedPlatform => "NOT_MATCHING_PLATFORM",
			Error::WindowNotGiven => "WINDOW_NOT_GIVEN",
			Error::InvalidArguments(_) | Error::InvalidMode(_) => "UNKNOWN",
			Error::SymbolResolutionFailed { .. } => "FAIL_LOAD_DLL",
		}
	}

	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::WindowNotGiven
			| Error::InvalidArguments(_)
			| Error::InvalidMode(_) => ErrorKind::TypeError,
			Error::UnsupportedPlatform
			| Error::SymbolResolutionFailed { .. } => ErrorKind::Error,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn codes_match_the_host_contract() {
		assert_eq!(Error::UnsupportedPlatform.code(), "NOT_MATCHING_PLATFORM");
		assert_eq!(Error::WindowNotGiven.code(), "WINDOW_NOT_GIVEN");
		assert_eq!(Error::InvalidArguments("x".into()).code(), "UNKNOWN");
		assert_eq!(Error::InvalidMode(7).code(), "UNKNOWN");
		assert_eq!(
			Error::SymbolResolutionFailed {
				name: "user32.dll",
				reason: "gone".into()
			}.code(),
			"FAIL_LOAD_DLL");
	}

	#[test]
	fn argument_failures_are_type_errors() {
		assert_eq!(Error::InvalidMode(3).kind(), ErrorKind::TypeError);
		assert_eq!(Error::WindowNotGiven.kind(), ErrorKind::TypeError);
		assert_eq!(Error::UnsupportedPlatform.kind(), ErrorKind::Error);
	}
}
