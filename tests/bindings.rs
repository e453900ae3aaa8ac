use std::cell::RefCell;
use serde_json::{json, Value};
use vibrancy_wrapper::accent::{AccentPolicy, AccentState, CompositionAttributeData};
use vibrancy_wrapper::binding::Bindings;
use vibrancy_wrapper::{Error, ErrorKind, GradientColor, OsVersion, Platform, WindowHandle};

/// Stand-in for Windows that remembers the accent policy of every window.
struct Compositor {
	version: Option<OsVersion>,
	library: bool,
	calls: RefCell<Vec<(WindowHandle, AccentPolicy)>>,
}
impl Compositor {
	fn windows(build: u32) -> Self {
		Self {
			version: Some(OsVersion { major: 10, minor: 0, build }),
			library: true,
			calls: RefCell::new(Vec::new()),
		}
	}

	fn last_state(&self, window: WindowHandle) -> Option<AccentState> {
		self.calls.borrow()
			.iter()
			.rev()
			.find(|(handle, _)| *handle == window)
			.map(|(_, policy)| policy.state)
	}
}
impl Platform for Compositor {
	fn version(&self) -> Option<OsVersion> {
		self.version
	}

	fn set_window_composition_attribute(
		&self,
		window: WindowHandle,
		data: &mut CompositionAttributeData<'_>) -> Result<bool, Error> {

		if !self.library {
			return Err(Error::SymbolResolutionFailed {
				name: "user32.dll\\SetWindowCompositionAttribute",
				reason: "not found".into(),
			})
		}

		self.calls.borrow_mut().push((window, *data.policy()));
		Ok(true)
	}
}

fn code(result: Result<(), Error>) -> &'static str {
	result.unwrap_err().code()
}

#[test]
fn zero_arguments_mean_no_window() {
	let compositor = Compositor::windows(19045);
	let bindings = Bindings::new(&compositor);

	assert_eq!(code(bindings.set_vibrancy(&[])), "WINDOW_NOT_GIVEN");
	assert_eq!(code(bindings.disable_vibrancy(&[])), "WINDOW_NOT_GIVEN");
	assert!(compositor.calls.borrow().is_empty());
}

#[test]
fn zero_window_is_not_given() {
	let compositor = Compositor::windows(19045);
	let bindings = Bindings::new(&compositor);

	assert_eq!(code(bindings.set_vibrancy(&[json!(0), json!(0)])), "WINDOW_NOT_GIVEN");
	assert_eq!(code(bindings.disable_vibrancy(&[json!(0)])), "WINDOW_NOT_GIVEN");
	assert!(compositor.calls.borrow().is_empty());
}

#[test]
fn non_numeric_window_is_unknown() {
	let compositor = Compositor::windows(19045);
	let bindings = Bindings::new(&compositor);

	assert_eq!(code(bindings.set_vibrancy(&[json!("window"), json!(0)])), "UNKNOWN");
	assert_eq!(code(bindings.disable_vibrancy(&[json!({ "hwnd": 1 })])), "UNKNOWN");
	assert!(compositor.calls.borrow().is_empty());
}

#[test]
fn platform_is_checked_before_arguments() {
	let compositor = Compositor {
		version: None,
		library: true,
		calls: RefCell::new(Vec::new()),
	};
	let bindings = Bindings::new(&compositor);

	assert_eq!(code(bindings.set_vibrancy(&[])), "NOT_MATCHING_PLATFORM");
	assert_eq!(code(bindings.disable_vibrancy(&[json!("x")])), "NOT_MATCHING_PLATFORM");

	let unsupported = Bindings::new(vibrancy_wrapper::platform::Unsupported);
	assert_eq!(code(unsupported.set_vibrancy(&[json!(1), json!(0)])), "NOT_MATCHING_PLATFORM");
}

#[test]
fn unknown_mode_is_a_type_error_without_a_call() {
	let compositor = Compositor::windows(19045);
	let bindings = Bindings::new(&compositor);

	let error = bindings.set_vibrancy(&[json!(100), json!(9)]).unwrap_err();
	assert_eq!(error, Error::InvalidMode(9));
	assert_eq!(error.kind(), ErrorKind::TypeError);
	assert!(compositor.calls.borrow().is_empty());
}

#[test]
fn disable_enable_disable_ends_disabled() {
	let compositor = Compositor::windows(19045);
	let bindings = Bindings::new(&compositor);
	let window = WindowHandle(100);

	bindings.disable_vibrancy(&[json!(100)]).unwrap();
	bindings.set_vibrancy(&[json!(100), json!(1)]).unwrap();
	assert_eq!(compositor.last_state(window), Some(AccentState::AcrylicBlurBehind));

	bindings.disable_vibrancy(&[json!(100)]).unwrap();
	assert_eq!(compositor.last_state(window), Some(AccentState::Disabled));
	assert_eq!(compositor.calls.borrow().len(), 3);
}

#[test]
fn missing_library_fails_to_load() {
	let compositor = Compositor {
		library: false,
		..Compositor::windows(19045)
	};
	let bindings = Bindings::new(&compositor);

	assert_eq!(code(bindings.set_vibrancy(&[json!(1), json!(2)])), "FAIL_LOAD_DLL");
	assert_eq!(code(bindings.disable_vibrancy(&[json!(1)])), "FAIL_LOAD_DLL");
}

#[test]
fn six_argument_form_carries_the_color() {
	let compositor = Compositor::windows(19045);
	let bindings = Bindings::new(&compositor);

	let args: Vec<Value> = vec![
		json!(5), json!(1), json!(34), json!(34), json!(34), json!(136.4)];
	bindings.set_vibrancy(&args).unwrap();

	let calls = compositor.calls.borrow();
	assert_eq!(calls[0].1.state, AccentState::AcrylicBlurBehind);
	assert_eq!(calls[0].1.color(), GradientColor::from_rgba(34, 34, 34, 136));
}

#[test]
fn wrong_argument_count_is_unknown() {
	let compositor = Compositor::windows(19045);
	let bindings = Bindings::new(&compositor);

	assert_eq!(code(bindings.set_vibrancy(&[json!(5)])), "UNKNOWN");
	assert_eq!(code(bindings.set_vibrancy(&[json!(5), json!(1), json!(2)])), "UNKNOWN");
}

#[test]
fn presets_map_to_accent_states() {
	let compositor = Compositor::windows(19045);
	let bindings = Bindings::new(&compositor);

	bindings.set_vibrancy(&[json!(1), json!(0)]).unwrap();
	bindings.set_vibrancy(&[json!(2), json!(2)]).unwrap();

	assert_eq!(
		compositor.last_state(WindowHandle(1)),
		Some(AccentState::TransparentGradient));
	assert_eq!(compositor.last_state(WindowHandle(2)), Some(AccentState::BlurBehind));
}
