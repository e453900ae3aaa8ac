use std::ffi::{c_void, CStr};
use cstr::cstr;
use winapi::shared::minwindef::{BOOL, DWORD, FARPROC, HMODULE};
use winapi::shared::ntdef::{NTSTATUS, ULONG, WCHAR};
use winapi::shared::windef::HWND;
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::libloaderapi::{FreeLibrary, GetProcAddress, LoadLibraryA};
use winapi::um::winbase::{FORMAT_MESSAGE_ALLOCATE_BUFFER, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS, FormatMessageW, LocalFree};
use winapi::um::winnt::{LANG_NEUTRAL, LPWSTR, MAKELANGID, SUBLANG_NEUTRAL};
use crate::accent::CompositionAttributeData;
use crate::platform::{OsVersion, Platform, WindowHandle};
use crate::Error;

/// Type for a pointer to the `SetWindowCompositionAttribute` function, found in
/// `user32.dll`. This function is responsible for requesting special window
/// composition effects, such as background blur and acrylic.
type __SetWindowCompositionAttribute =
	unsafe extern "system" fn(HWND, *mut c_void) -> BOOL;

/// Type for a pointer to the `RtlGetVersion` function, found in `ntdll.dll`.
/// Unlike `GetVersionEx`, it reports the real version of the system regardless
/// of the compatibility manifest of the executable.
type __RtlGetVersion =
	unsafe extern "system" fn(*mut OperatingSystemVersionInfoWide) -> NTSTATUS;

lazy_static::lazy_static! {
	/// The version of Windows the program is running under, if available.
	static ref VERSION: Option<OsVersion> = query_version();
}

/// The Windows platform.
#[derive(Debug, Copy, Clone, Default)]
pub struct Win32;
impl Platform for Win32 {
	fn version(&self) -> Option<OsVersion> {
		*VERSION
	}

	fn set_window_composition_attribute(
		&self,
		window: WindowHandle,
		data: &mut CompositionAttributeData<'_>) -> Result<bool, Error> {

		let library = Library::open(cstr!("user32.dll"))
			.ok_or_else(|| Error::SymbolResolutionFailed {
				name: "user32.dll",
				reason: WinError::last().to_string()
			})?;

		let address = library.symbol(cstr!("SetWindowCompositionAttribute"))
			.ok_or_else(|| Error::SymbolResolutionFailed {
				name: "user32.dll\\SetWindowCompositionAttribute",
				reason: WinError::last().to_string()
			})?;

		let result = unsafe {
			let function = std::mem
				::transmute
				::<_, __SetWindowCompositionAttribute>(address);
			function(
				window.0 as HWND,
				data as *mut CompositionAttributeData<'_> as *mut c_void)
		};

		/* The library gets released here, after the last use of the function
		 * pointer we got out of it. */
		drop(library);
		Ok(result != 0)
	}
}

/// A loaded dynamic library, released when dropped.
struct Library(HMODULE);
impl Library {
	/// Loads the library with the given name, if it is available.
	fn open(name: &CStr) -> Option<Self> {
		let handle = unsafe { LoadLibraryA(name.as_ptr()) };
		if handle.is_null() {
			None
		} else {
			Some(Self(handle))
		}
	}

	/// Looks up an exported symbol. The address is only valid for as long as
	/// the library is loaded.
	fn symbol(&self, name: &CStr) -> Option<FARPROC> {
		let address = unsafe { GetProcAddress(self.0, name.as_ptr()) };
		if address.is_null() {
			None
		} else {
			Some(address)
		}
	}
}
impl Drop for Library {
	fn drop(&mut self) {
		unsafe {
			FreeLibrary(self.0);
		}
	}
}

/// Asks `ntdll.dll` for the version of the running system.
fn query_version() -> Option<OsVersion> {
	let byte_size = match ULONG::try_from(
		std::mem::size_of::<OperatingSystemVersionInfoWide>()) {

		Ok(size) => size,
		Err(_) => {
			log::error!(
				"OperatingSystemVersionInfoWide does not fit its own size \
				 field. This points towards a broken build environment.");
			return None
		}
	};

	let mut version = OperatingSystemVersionInfoWide {
		byte_size,
		major_version: 0,
		minor_version: 0,
		build_number: 0,
		platform_id: 0,
		service_pack: [0; 128]
	};

	let library = match Library::open(cstr!("ntdll.dll")) {
		Some(library) => library,
		None => {
			/* This may happen in sandboxed environments such as UWP. */
			log::warn!(
				"Ntdll.dll is not available: {}. Window vibrancy will be \
				 reported as unsupported.",
				WinError::last());
			return None
		}
	};

	let address = match library.symbol(cstr!("RtlGetVersion")) {
		Some(address) => address,
		None => {
			log::warn!(
				"RtlGetVersion is not available: {}. Window vibrancy will be \
				 reported as unsupported.",
				WinError::last());
			return None
		}
	};

	let result = unsafe {
		let function = std::mem
			::transmute
			::<_, __RtlGetVersion>(address);
		function(&mut version as *mut _)
	};
	if result != 0 {
		log::error!(
			"RtlGetVersion returned {} when it should have been an \
			 infallible function, whose only valid return value is \
			 STATUS_SUCCESS. This may be indicative of a bug.",
			result);
		return None
	}

	log::debug!(
		"running on Windows {}.{} build {}",
		version.major_version,
		version.minor_version,
		version.build_number);

	Some(OsVersion {
		major: version.major_version,
		minor: version.minor_version,
		build: version.build_number,
	})
}

/// An error code reported by Windows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WinError(DWORD);
impl WinError {
	/// The error code of the last failed call on this thread.
	pub fn last() -> Self {
		Self(unsafe { GetLastError() })
	}

	/// Retrieve the message for this error message from Windows, if available.
	pub fn message(&self) -> Option<String> {
		let mut buffer: LPWSTR = std::ptr::null_mut();
		let size = unsafe {
			FormatMessageW(
				FORMAT_MESSAGE_ALLOCATE_BUFFER
					| FORMAT_MESSAGE_FROM_SYSTEM
					| FORMAT_MESSAGE_IGNORE_INSERTS,
				std::ptr::null_mut(),
				self.0,
				MAKELANGID(LANG_NEUTRAL, SUBLANG_NEUTRAL) as DWORD,
				&mut buffer as *mut LPWSTR as *mut _,
				0,
				std::ptr::null_mut())
		};
		if size == 0 {
			return None
		}

		let slice = unsafe {
			std::slice::from_raw_parts(buffer, size as usize)
		};
		let message = std::char::decode_utf16(slice.iter().cloned())
			.map(|c| c.unwrap_or('_'))
			.collect::<String>()
			.trim()
			.to_string();

		/* Free the buffer FormatMessageW allocated for us. */
		unsafe {
			LocalFree(buffer as *mut _);
		}

		Some(message)
	}
}
impl std::fmt::Display for WinError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self.message() {
			Some(message) =>
				write!(f, "{} (0x{:08x})", message, self.0),
			None =>
				write!(f, "0x{:08x}", self.0),
		}
	}
}
impl std::error::Error for WinError {}

/// The operating system version information, as `RTL_OSVERSIONINFOW`.
#[repr(C)]
struct OperatingSystemVersionInfoWide {
	/// The size of this structure.
	///
	/// This field must be set to the size of the structure, in bytes, before
	/// it's first passed on to Windows, even though it appears to be
	/// write-only.
	byte_size: ULONG,
	major_version: ULONG,
	minor_version: ULONG,
	/// The build number of the operating system.
	///
	/// In Windows 10 and 11 the major and minor versions are not enough to
	/// determine available functionality, and this value has to be used.
	build_number: ULONG,
	platform_id: ULONG,
	/// The service-pack version string. Left untouched if no service pack is
	/// installed.
	service_pack: [WCHAR; 128],
}
