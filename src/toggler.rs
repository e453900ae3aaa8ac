use crate::accent::{AccentPolicy, CompositionAttributeData, Effect, EffectKind};
use crate::platform::{Native, OsVersion, Platform, WindowHandle};
use crate::Error;

/// Applies and clears the accent effect of windows.
///
/// The toggler holds no state of its own. Whatever state persists between
/// calls is kept by the compositor.
#[derive(Debug, Clone, Default)]
pub struct Toggler<P = Native> {
	platform: P,
}

impl Toggler<Native> {
	/// A toggler for the platform the crate was built for.
	pub fn native() -> Self {
		Self { platform: Native::default() }
	}
}

impl<P: Platform> Toggler<P> {
	pub fn new(platform: P) -> Self {
		Self { platform }
	}

	pub fn platform(&self) -> &P {
		&self.platform
	}

	/// Fails unless the running system supports accent policies.
	pub fn check_platform(&self) -> Result<OsVersion, Error> {
		match self.platform.version() {
			Some(version) if version.supports_accent() => Ok(version),
			_ => Err(Error::UnsupportedPlatform),
		}
	}

	/// Gives the window the requested effect.
	pub fn enable(&self, window: WindowHandle, effect: Effect) -> Result<(), Error> {
		let version = self.check_platform()?;
		self.enable_on(&version, window, effect)
	}

	/// Clears whatever effect the window has.
	pub fn disable(&self, window: WindowHandle) -> Result<(), Error> {
		self.check_platform()?;
		self.disable_on(window)
	}

	/// Like [`enable`](Self::enable), for a version already checked.
	pub(crate) fn enable_on(
		&self,
		version: &OsVersion,
		window: WindowHandle,
		effect: Effect) -> Result<(), Error> {

		let acrylic = version.supports_acrylic();
		if effect.kind == EffectKind::Acrylic && !acrylic {
			log::warn!(
				"acrylic blur needs Windows 10 1803 or later, but this is \
				 build {}. Falling back to blur behind.",
				version.build);
		}

		self.apply(window, AccentPolicy::for_effect(effect, acrylic))
	}

	pub(crate) fn disable_on(&self, window: WindowHandle) -> Result<(), Error> {
		self.apply(window, AccentPolicy::disabled())
	}

	fn apply(&self, window: WindowHandle, mut policy: AccentPolicy) -> Result<(), Error> {
		log::debug!("setting the accent policy of {:?} to {:?}", window, policy);

		let mut data = CompositionAttributeData::accent_policy(&mut policy);
		let accepted = self.platform.set_window_composition_attribute(window, &mut data)?;
		if !accepted {
			log::debug!(
				"SetWindowCompositionAttribute reported failure for {:?}",
				window);
		}

		Ok(())
	}
}
