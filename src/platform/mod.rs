use crate::accent::CompositionAttributeData;
use crate::Error;

#[cfg(windows)]
pub mod windows;

/// The platform the crate was built for.
#[cfg(windows)]
pub type Native = windows::Win32;

/// The platform the crate was built for.
#[cfg(not(windows))]
pub type Native = Unsupported;

/// Build number for Windows 10 1803, the first to offer acrylic blur.
pub const WINDOWS_10_1803: u32 = 17134;

/// An opaque platform window identifier, such as a `HWND`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WindowHandle(pub isize);

/// The version of the running operating system.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct OsVersion {
	pub major: u32,
	pub minor: u32,
	pub build: u32,
}
impl OsVersion {
	/// Whether accent policies are available at all.
	///
	/// Windows 11 still reports itself as major version 10.
	pub fn supports_accent(&self) -> bool {
		self.major >= 10
	}

	pub fn supports_acrylic(&self) -> bool {
		self.major > 10 || (self.major == 10 && self.build >= WINDOWS_10_1803)
	}
}

/// The operations the toggler needs from the operating system.
pub trait Platform {
	/// The version of the operating system, if it could be determined.
	fn version(&self) -> Option<OsVersion>;

	/// Resolves `SetWindowCompositionAttribute` and invokes it once with the
	/// given data, returning whatever the call itself returned.
	///
	/// Implementations must not keep anything they acquired to perform the
	/// call once they return.
	fn set_window_composition_attribute(
		&self,
		window: WindowHandle,
		data: &mut CompositionAttributeData<'_>) -> Result<bool, Error>;
}

impl<P: Platform + ?Sized> Platform for &P {
	fn version(&self) -> Option<OsVersion> {
		(**self).version()
	}

	fn set_window_composition_attribute(
		&self,
		window: WindowHandle,
		data: &mut CompositionAttributeData<'_>) -> Result<bool, Error> {

		(**self).set_window_composition_attribute(window, data)
	}
}

/// Stand-in for systems without window composition attributes.
#[derive(Debug, Copy, Clone, Default)]
pub struct Unsupported;
impl Platform for Unsupported {
	fn version(&self) -> Option<OsVersion> {
		None
	}

	fn set_window_composition_attribute(
		&self,
		_window: WindowHandle,
		_data: &mut CompositionAttributeData<'_>) -> Result<bool, Error> {

		Err(Error::UnsupportedPlatform)
	}
}
