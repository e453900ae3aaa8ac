use serde::Deserialize;
use serde_json::Value;
use crate::accent::{Effect, EffectKind, GradientColor};
use crate::platform::OsVersion;

/// Tint used by the light theme.
pub const LIGHT: GradientColor = GradientColor::from_rgba(221, 221, 221, 136);

/// Tint used by the dark theme.
pub const DARK: GradientColor = GradientColor::from_rgba(34, 34, 34, 136);

/// The tint applied to the vibrancy.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(from = "ThemeRepr")]
pub enum Theme {
	Light,
	Dark,
	/// Light or dark, following the preference of the host.
	#[default]
	AppearanceBased,
	/// A color written as `RRGGBBAA`, optionally prefixed by `#`.
	Hex(String),
	/// A color as `[red, green, blue, alpha]`.
	Rgba([u8; 4]),
}
impl Theme {
	/// The tint for this theme. Colors that fail to parse give the light tint.
	pub fn color(&self, prefers_dark: bool) -> GradientColor {
		match self {
			Theme::Light => LIGHT,
			Theme::Dark => DARK,
			Theme::AppearanceBased if prefers_dark => DARK,
			Theme::AppearanceBased => LIGHT,
			Theme::Hex(hex) => parse_hex(hex).unwrap_or_else(|| {
				log::warn!("\"{}\" is not an RRGGBBAA color, using the light theme", hex);
				LIGHT
			}),
			Theme::Rgba([red, green, blue, alpha]) =>
				GradientColor::from_rgba(*red, *green, *blue, *alpha),
		}
	}
}

/// The ways a theme may be written by the host.
#[derive(Deserialize)]
#[serde(untagged)]
enum ThemeRepr {
	Name(String),
	Hex { hex: String },
	Rgba { rgba: [f64; 4] },
	/* Anything else gets the light theme. */
	Other(serde::de::IgnoredAny),
}
impl From<ThemeRepr> for Theme {
	fn from(repr: ThemeRepr) -> Self {
		match repr {
			ThemeRepr::Name(name) => match name.as_str() {
				"light" => Theme::Light,
				"dark" => Theme::Dark,
				/* Unknown names follow the host preference too. */
				_ => Theme::AppearanceBased,
			},
			ThemeRepr::Hex { hex } => Theme::Hex(hex),
			ThemeRepr::Rgba { rgba } => Theme::Rgba(rgba.map(channel)),
			ThemeRepr::Other(_) => Theme::Light,
		}
	}
}

fn channel(value: f64) -> u8 {
	value.clamp(0.0, 255.0) as u8
}

fn parse_hex(hex: &str) -> Option<GradientColor> {
	let hex = hex.strip_prefix('#').unwrap_or(hex);
	if hex.len() != 8 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
		return None
	}

	let byte = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
	Some(GradientColor::from_rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?))
}

/// The material requested by the host.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectChoice {
	/// Acrylic blur where available, plain blur elsewhere.
	#[default]
	Acrylic,
	Blur,
}

/// Vibrancy settings for a window.
///
/// Options the host may pass that concern window movement or focus handling
/// are accepted and ignored.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct VibrancyOptions {
	pub theme: Option<Theme>,
	pub effect: EffectChoice,
	/// Log option resolution at info level rather than debug.
	pub debug: bool,
}
impl VibrancyOptions {
	/// Reads options from a host value, which may either be an options object
	/// or a bare theme. Values that are neither give the defaults.
	///
	/// Only an options object whose `effect` or `debug` has the wrong type is
	/// rejected.
	pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
		let bare_theme = match value {
			Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) =>
				return Ok(Self::default()),
			Value::String(_) => true,
			Value::Object(map) => map.contains_key("hex") || map.contains_key("rgba"),
		};

		if bare_theme {
			Ok(Self {
				theme: Some(Theme::deserialize(value)?),
				..Self::default()
			})
		} else {
			Self::deserialize(value)
		}
	}

	/// Works out the effect these options ask for on the given system.
	///
	/// Without a theme the tint is the light one, whatever the host prefers.
	pub fn resolve(&self, version: &OsVersion, prefers_dark: bool) -> Effect {
		let kind = match self.effect {
			EffectChoice::Acrylic if version.supports_acrylic() => EffectKind::Acrylic,
			EffectChoice::Acrylic | EffectChoice::Blur => EffectKind::Blur,
		};
		let color = self.theme
			.as_ref()
			.map(|theme| theme.color(prefers_dark))
			.unwrap_or(LIGHT);

		let effect = Effect { kind, color };
		let level = if self.debug { log::Level::Info } else { log::Level::Debug };
		log::log!(level, "vibrancy options {:?} resolved to {:?}", self, effect);

		effect
	}
}
