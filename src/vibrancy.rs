use raw_window_handle::HasRawWindowHandle;
#[cfg(windows)]
use raw_window_handle::RawWindowHandle;
use crate::accent::Effect;
use crate::platform::WindowHandle;
use crate::theme::VibrancyOptions;
use crate::toggler::Toggler;
use crate::Error;

/// Gives the background of the given window the requested effect.
pub fn set_vibrancy<H: HasRawWindowHandle>(window: &H, effect: Effect) -> Result<(), Error> {
	let toggler = Toggler::native();
	let version = toggler.check_platform()?;
	toggler.enable_on(&version, handle_of(window)?, effect)
}

/// Removes whatever effect the background of the given window has.
pub fn disable_vibrancy<H: HasRawWindowHandle>(window: &H) -> Result<(), Error> {
	let toggler = Toggler::native();
	toggler.check_platform()?;
	toggler.disable_on(handle_of(window)?)
}

/// Applies vibrancy options to the given window.
///
/// `prefers_dark` picks the tint of appearance-based themes.
pub fn apply_options<H: HasRawWindowHandle>(
	window: &H,
	options: &VibrancyOptions,
	prefers_dark: bool) -> Result<(), Error> {

	let toggler = Toggler::native();
	let version = toggler.check_platform()?;
	let window = handle_of(window)?;
	toggler.enable_on(&version, window, options.resolve(&version, prefers_dark))
}

/// The raw handle of the window, if it is one we know how to accent.
///
/// Callers check the platform first, so that every system reports the same
/// error no matter the kind of window handed in.
#[cfg(windows)]
fn handle_of<H: HasRawWindowHandle>(window: &H) -> Result<WindowHandle, Error> {
	match window.raw_window_handle() {
		RawWindowHandle::Win32(handle) if handle.hwnd.is_null() =>
			Err(Error::WindowNotGiven),
		RawWindowHandle::Win32(handle) =>
			Ok(WindowHandle(handle.hwnd as isize)),
		/* Windows.UI.Composition would be needed for UWP windows. */
		_ => Err(Error::UnsupportedPlatform),
	}
}

/// No window handle can be accented outside of Windows.
#[cfg(not(windows))]
fn handle_of<H: HasRawWindowHandle>(_window: &H) -> Result<WindowHandle, Error> {
	Err(Error::UnsupportedPlatform)
}
