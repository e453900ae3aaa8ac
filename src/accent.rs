use std::ffi::c_void;
use std::marker::PhantomData;

/// A tint color in the layout expected by the compositor.
///
/// The alpha channel lives in bits 24 to 31 and the color in bits 0 to 23,
/// with red in the lowest byte, followed by green and then blue.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct GradientColor(u32);
impl GradientColor {
	/// No tint at all.
	pub const NONE: Self = Self(0);

	/// Mostly transparent white, used by the [transparent gradient] preset.
	///
	/// [transparent gradient]: Mode::TransparentGradient
	pub const TRANSPARENT_WHITE: Self = Self::from_rgba(0xff, 0xff, 0xff, 0x40);

	/// Dark red, used by the [acrylic] preset.
	///
	/// [acrylic]: Mode::Acrylic
	pub const DARK_RED: Self = Self::from_rgba(0x40, 0x00, 0x00, 0xb0);

	pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
		Self(
			(alpha as u32) << 24
				| (blue as u32) << 16
				| (green as u32) << 8
				| red as u32)
	}

	/// The packed value.
	pub const fn bits(self) -> u32 {
		self.0
	}

	pub const fn alpha(self) -> u8 {
		(self.0 >> 24) as u8
	}

	/// The color channels, as `(red, green, blue)`.
	pub const fn rgb(self) -> (u8, u8, u8) {
		(self.0 as u8, (self.0 >> 8) as u8, (self.0 >> 16) as u8)
	}
}

/// The presets selectable by number from the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mode {
	/// A transparent white gradient.
	TransparentGradient,
	/// Acrylic blur tinted dark red.
	Acrylic,
	/// Plain blur with no tint.
	Blur,
}
impl Mode {
	/// Looks up the preset with the given number, if there is one.
	pub fn from_code(code: i64) -> Option<Self> {
		match code {
			0 => Some(Mode::TransparentGradient),
			1 => Some(Mode::Acrylic),
			2 => Some(Mode::Blur),
			_ => None,
		}
	}

	pub fn effect(self) -> Effect {
		match self {
			Mode::TransparentGradient => Effect {
				kind: EffectKind::TransparentGradient,
				color: GradientColor::TRANSPARENT_WHITE,
			},
			Mode::Acrylic => Effect {
				kind: EffectKind::Acrylic,
				color: GradientColor::DARK_RED,
			},
			Mode::Blur => Effect {
				kind: EffectKind::Blur,
				color: GradientColor::NONE,
			},
		}
	}
}

/// The kinds of background treatment a window may be given.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EffectKind {
	TransparentGradient,
	Acrylic,
	Blur,
}

/// A background treatment together with its tint.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Effect {
	pub kind: EffectKind,
	pub color: GradientColor,
}
impl From<Mode> for Effect {
	fn from(mode: Mode) -> Self {
		mode.effect()
	}
}

/// The data for the accent policy attribute.
///
/// This structure defines the fields expected by the [accent policy attribute],
/// meaning all accesses to which must be done through it. Failure to uphold
/// this requirement may result in undefined behavior.
///
/// [accent policy attribute]: WindowCompositionAttribute::AccentPolicy
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AccentPolicy {
	/// The state of the accent policy.
	pub state: AccentState,
	/// Extra flags, whose meaning is determined by the state value.
	pub accent_flags: i32,
	/// The tint of the effect, bit-for-bit a [`GradientColor`].
	pub gradient_color: i32,
	/// The identification number of the transition animation.
	pub animation_id: i32,
}
impl AccentPolicy {
	/// The policy that leaves the window as-is. All other fields must be zero.
	pub const fn disabled() -> Self {
		Self {
			state: AccentState::Disabled,
			accent_flags: 0,
			gradient_color: 0,
			animation_id: 0,
		}
	}

	/// Builds the policy for an effect.
	///
	/// When `acrylic_available` is false, acrylic falls back to blur behind
	/// but keeps its tint.
	pub fn for_effect(effect: Effect, acrylic_available: bool) -> Self {
		let state = match effect.kind {
			EffectKind::TransparentGradient => AccentState::TransparentGradient,
			EffectKind::Acrylic if acrylic_available => AccentState::AcrylicBlurBehind,
			EffectKind::Acrylic | EffectKind::Blur => AccentState::BlurBehind,
		};

		Self {
			state,
			accent_flags: 0,
			gradient_color: effect.color.bits() as i32,
			animation_id: 0,
		}
	}

	pub fn color(&self) -> GradientColor {
		GradientColor(self.gradient_color as u32)
	}
}

/// The states the accent policy may assume.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AccentState {
	/// Disable accenting of the window.
	///
	/// This is the default state for most windows, and it still allows for
	/// semitransparent windows.
	Disabled = 0,
	/// Draw a color gradient on the background layer of the window.
	Gradient = 1,
	/// Draw a semitransparent color gradient on the background layer of the window.
	TransparentGradient = 2,
	/// Blur what's behind the window, in the manner of Aero Glass.
	BlurBehind = 3,
	/// Blur what's behind the window with the acrylic material.
	///
	/// Only available from Windows 10 1803 onwards. The gradient color tints
	/// the material.
	AcrylicBlurBehind = 4,
}

/// The window composition attributes.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WindowCompositionAttribute {
	/// The accent policy of the window.
	///
	/// This attribute tells the compositor, somewhat counter-intuitively, the
	/// way the background layer of the window should be treated.
	AccentPolicy = 19,
}

/// The structure informing the composition attributes of the window.
///
/// This structure has the same layout and size as the undocumented
/// `WINCOMPATTRDATA` structure passed on to `SetWindowCompositionAttribute`.
/// It holds on to the policy it points at for as long as it lives.
#[repr(C)]
#[derive(Debug)]
pub struct CompositionAttributeData<'a> {
	/// The number of the attribute which is intended to be changed.
	attribute: WindowCompositionAttribute,
	/// A pointer to the structure containing the data for the attribute.
	data: *mut c_void,
	/// The size, in bytes, of the attribute data structure.
	data_size: usize,
	_policy: PhantomData<&'a mut AccentPolicy>,
}
impl<'a> CompositionAttributeData<'a> {
	pub fn accent_policy(policy: &'a mut AccentPolicy) -> Self {
		Self {
			attribute: WindowCompositionAttribute::AccentPolicy,
			data: policy as *mut AccentPolicy as *mut c_void,
			data_size: std::mem::size_of::<AccentPolicy>(),
			_policy: PhantomData,
		}
	}

	pub fn attribute(&self) -> WindowCompositionAttribute {
		self.attribute
	}

	pub fn data_size(&self) -> usize {
		self.data_size
	}

	/// The policy this structure points at.
	pub fn policy(&self) -> &AccentPolicy {
		/* The pointer was built from a borrow that outlives us, and that
		 * borrow is exclusive, so nobody else can be touching the policy. */
		unsafe { &*(self.data as *const AccentPolicy) }
	}
}
