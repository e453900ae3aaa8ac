//! The symbols a host runtime loads from the shared library.
//!
//! Each export takes the call's arguments as a NUL-terminated JSON array,
//! such as `[1234, 1]`, and returns an [`Outcome`]. On failure the outcome
//! names the exception class to raise and carries the error code as a static
//! NUL-terminated string, which the host must not free.
use std::ffi::{c_char, CStr};
use serde_json::Value;
use crate::binding::Bindings;
use crate::platform::Platform;
use crate::{Error, ErrorKind};

/// The class of exception the host should raise, if any.
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ExceptionClass {
	/// The call succeeded.
	None = 0,
	TypeError = 1,
	Error = 2,
}

impl From<ErrorKind> for ExceptionClass {
	fn from(kind: ErrorKind) -> Self {
		match kind {
			ErrorKind::TypeError => ExceptionClass::TypeError,
			ErrorKind::Error => ExceptionClass::Error,
		}
	}
}

/// The result of an exported call, as seen by the host.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct Outcome {
	class: ExceptionClass,
	/// Null on success, a static error code otherwise.
	code: *const c_char,
}
impl Outcome {
	const SUCCESS: Self = Self {
		class: ExceptionClass::None,
		code: std::ptr::null(),
	};

	fn failure(error: &Error) -> Self {
		log::debug!("reporting {} to the host: {}", error.code(), error);
		Self {
			class: error.kind().into(),
			code: code_of(error).as_ptr(),
		}
	}

	pub fn class(&self) -> ExceptionClass {
		self.class
	}

	/// The error code, or `None` if the call succeeded.
	pub fn code(&self) -> Option<&'static str> {
		if self.code.is_null() {
			return None
		}

		/* Codes only ever come from the literals in `code_of`. */
		unsafe { CStr::from_ptr(self.code) }.to_str().ok()
	}
}

fn code_of(error: &Error) -> &'static CStr {
	match error {
		Error::UnsupportedPlatform => c"NOT_MATCHING_PLATFORM",
		Error::WindowNotGiven => c"WINDOW_NOT_GIVEN",
		Error::InvalidArguments(_) | Error::InvalidMode(_) => c"UNKNOWN",
		Error::SymbolResolutionFailed { .. } => c"FAIL_LOAD_DLL",
	}
}

/// `setVibrancy(windowHandle, mode)` or
/// `setVibrancy(windowHandle, effect, red, green, blue, opacity)`.
///
/// # Safety
/// `args` must either be null or point to a NUL-terminated string that stays
/// valid for the duration of the call.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn setVibrancy(args: *const c_char) -> Outcome {
	dispatch(&Bindings::native(), args, Bindings::set_vibrancy)
}

/// `disableVibrancy(windowHandle)`.
///
/// # Safety
/// `args` must either be null or point to a NUL-terminated string that stays
/// valid for the duration of the call.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn disableVibrancy(args: *const c_char) -> Outcome {
	dispatch(&Bindings::native(), args, Bindings::disable_vibrancy)
}

/// Decodes the arguments and runs the call.
///
/// Arguments that cannot be decoded are reported only after the platform
/// check, so that an unsupported platform always wins.
unsafe fn dispatch<P: Platform>(
	bindings: &Bindings<P>,
	args: *const c_char,
	call: fn(&Bindings<P>, &[Value]) -> Result<(), Error>) -> Outcome {

	let result = match arguments(args) {
		Ok(args) => call(bindings, &args),
		Err(error) => bindings.check_platform().and(Err(error)),
	};

	match result {
		Ok(()) => Outcome::SUCCESS,
		Err(error) => Outcome::failure(&error),
	}
}

/// A null pointer stands for a call made with no arguments.
unsafe fn arguments(args: *const c_char) -> Result<Vec<Value>, Error> {
	if args.is_null() {
		return Ok(Vec::new())
	}

	let text = CStr::from_ptr(args)
		.to_str()
		.map_err(|what| Error::InvalidArguments(format!(
			"arguments are not valid UTF-8: {}",
			what)))?;

	serde_json::from_str(text)
		.map_err(|what| Error::InvalidArguments(format!(
			"arguments are not a JSON array: {}",
			what)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;
	use std::ffi::CString;
	use crate::accent::CompositionAttributeData;
	use crate::platform::{OsVersion, WindowHandle};

	#[derive(Default)]
	struct Counter {
		calls: Cell<usize>,
	}
	impl Platform for Counter {
		fn version(&self) -> Option<OsVersion> {
			Some(OsVersion { major: 10, minor: 0, build: 22631 })
		}

		fn set_window_composition_attribute(
			&self,
			_window: WindowHandle,
			_data: &mut CompositionAttributeData<'_>) -> Result<bool, Error> {

			self.calls.set(self.calls.get() + 1);
			Ok(true)
		}
	}

	fn run<'c>(
		bindings: &Bindings<&'c Counter>,
		args: &str,
		call: fn(&Bindings<&'c Counter>, &[Value]) -> Result<(), Error>) -> Outcome {

		let args = CString::new(args).unwrap();
		unsafe { dispatch(bindings, args.as_ptr(), call) }
	}

	#[test]
	fn success_has_no_code() {
		let counter = Counter::default();
		let bindings = Bindings::new(&counter);

		let outcome = run(&bindings, "[4660, 1]", Bindings::set_vibrancy);
		assert_eq!(outcome.class(), ExceptionClass::None);
		assert_eq!(outcome.code(), None);

		let outcome = run(&bindings, "[4660]", Bindings::disable_vibrancy);
		assert_eq!(outcome.class(), ExceptionClass::None);
		assert_eq!(counter.calls.get(), 2);
	}

	#[test]
	fn failures_carry_class_and_code() {
		let counter = Counter::default();
		let bindings = Bindings::new(&counter);

		let outcome = run(&bindings, "[4660, 9]", Bindings::set_vibrancy);
		assert_eq!(outcome.class(), ExceptionClass::TypeError);
		assert_eq!(outcome.code(), Some("UNKNOWN"));

		let outcome = run(&bindings, "[]", Bindings::disable_vibrancy);
		assert_eq!(outcome.code(), Some("WINDOW_NOT_GIVEN"));

		let outcome = unsafe {
			dispatch(&bindings, std::ptr::null(), Bindings::set_vibrancy)
		};
		assert_eq!(outcome.code(), Some("WINDOW_NOT_GIVEN"));
		assert_eq!(counter.calls.get(), 0);
	}

	#[test]
	fn garbage_arguments_are_unknown() {
		let counter = Counter::default();
		let bindings = Bindings::new(&counter);

		let outcome = run(&bindings, "{\"hwnd\": 1}", Bindings::set_vibrancy);
		assert_eq!(outcome.class(), ExceptionClass::TypeError);
		assert_eq!(outcome.code(), Some("UNKNOWN"));
	}

	#[test]
	fn codes_agree_with_the_error_type() {
		let errors = [
			Error::UnsupportedPlatform,
			Error::WindowNotGiven,
			Error::InvalidArguments(String::new()),
			Error::InvalidMode(4),
			Error::SymbolResolutionFailed { name: "user32.dll", reason: String::new() },
		];
		for error in errors {
			assert_eq!(code_of(&error).to_str(), Ok(error.code()));
		}
	}

	#[cfg(not(windows))]
	#[test]
	fn exports_report_the_platform_first() {
		let outcome = unsafe { setVibrancy(c"not json".as_ptr()) };
		assert_eq!(outcome.class(), ExceptionClass::Error);
		assert_eq!(outcome.code(), Some("NOT_MATCHING_PLATFORM"));

		let outcome = unsafe { disableVibrancy(std::ptr::null()) };
		assert_eq!(outcome.code(), Some("NOT_MATCHING_PLATFORM"));
	}
}
