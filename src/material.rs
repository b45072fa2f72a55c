//! Materials and color management
//!
//! Colors are authored as sRGB hex constants. A single [`ColorPolicy`]
//! decides how every one of them reaches the renderer, so no material
//! converts its own colors.

use serde::{Deserialize, Serialize};

/// How authored sRGB colors are fed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorPolicy {
    /// Hex values used as-is, no tone mapping, non-sRGB output
    Raw,
    /// Hex values linearized, ACES tone mapping, sRGB output
    #[default]
    LinearizedForPbr,
}

impl ColorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorPolicy::Raw => "raw",
            ColorPolicy::LinearizedForPbr => "pbr",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "raw" => Some(ColorPolicy::Raw),
            "pbr" | "linear" | "linearized" => Some(ColorPolicy::LinearizedForPbr),
            _ => None,
        }
    }

    /// Apply the policy to an authored color
    pub fn convert(&self, color: Color) -> Color {
        match self {
            ColorPolicy::Raw => color,
            ColorPolicy::LinearizedForPbr => color.to_linear(),
        }
    }

    pub fn tone_mapping(&self) -> bool {
        matches!(self, ColorPolicy::LinearizedForPbr)
    }

    /// Whether the output surface should encode to sRGB
    pub fn srgb_output(&self) -> bool {
        matches!(self, ColorPolicy::LinearizedForPbr)
    }
}

/// RGB color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a 0xRRGGBB constant
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn to_linear(self) -> Self {
        Self::rgb(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn scaled(self, k: f32) -> Self {
        Self::rgb(self.r * k, self.g * k, self.b * k)
    }
}

/// sRGB transfer function, inverse
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Lighting model used by a material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shading {
    /// Unlit
    Basic,
    /// Lambert diffuse plus Blinn-Phong specular
    Phong { shininess: f32 },
    /// Metal/rough approximation; samples the ball texture maps
    Standard { metalness: f32, roughness: f32 },
}

impl Shading {
    /// Shader mode index (must match the WGSL constants)
    pub fn mode(&self) -> u32 {
        match self {
            Shading::Basic => 0,
            Shading::Phong { .. } => 1,
            Shading::Standard { .. } => 2,
        }
    }
}

/// Reference from a primitive to its material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKey {
    CourtFloor,
    LineMarking,
    Support,
    Backboard,
    Rim,
    Net,
    Ball,
}

/// A resolved material, ready for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub shading: Shading,
}

impl Material {
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// Whether the material samples the ball texture maps
    pub fn uses_texture_maps(&self) -> bool {
        matches!(self.shading, Shading::Standard { .. })
    }
}

/// Authored colors (sRGB hex)
pub mod colors {
    pub const COURT_FLOOR: u32 = 0xc68642;
    pub const LINE: u32 = 0xffffff;
    pub const SUPPORT: u32 = 0x888888;
    pub const BACKBOARD: u32 = 0xffffff;
    pub const RIM: u32 = 0xff8c00;
    pub const NET: u32 = 0xffffff;
    pub const BALL: u32 = 0xffffff;
    pub const BACKGROUND: u32 = 0x000000;
}

const COURT_SHININESS: f32 = 50.0;
const DEFAULT_SHININESS: f32 = 30.0;
const BACKBOARD_OPACITY: f32 = 0.6;

/// Material table for one color policy
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    policy: ColorPolicy,
}

impl Palette {
    pub fn new(policy: ColorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ColorPolicy {
        self.policy
    }

    /// Authored color converted under this palette's policy
    pub fn color(&self, hex: u32) -> Color {
        self.policy.convert(Color::from_hex(hex))
    }

    pub fn resolve(&self, key: MaterialKey) -> Material {
        let opaque = |hex: u32, shading: Shading| Material {
            color: self.color(hex),
            opacity: 1.0,
            shading,
        };

        match key {
            MaterialKey::CourtFloor => opaque(
                colors::COURT_FLOOR,
                Shading::Phong {
                    shininess: COURT_SHININESS,
                },
            ),
            MaterialKey::LineMarking => opaque(colors::LINE, Shading::Basic),
            MaterialKey::Support => opaque(
                colors::SUPPORT,
                Shading::Phong {
                    shininess: DEFAULT_SHININESS,
                },
            ),
            MaterialKey::Backboard => Material {
                opacity: BACKBOARD_OPACITY,
                ..opaque(
                    colors::BACKBOARD,
                    Shading::Phong {
                        shininess: DEFAULT_SHININESS,
                    },
                )
            },
            MaterialKey::Rim => opaque(
                colors::RIM,
                Shading::Phong {
                    shininess: DEFAULT_SHININESS,
                },
            ),
            MaterialKey::Net => opaque(colors::NET, Shading::Basic),
            MaterialKey::Ball => opaque(
                colors::BALL,
                Shading::Standard {
                    metalness: 0.0,
                    roughness: 1.0,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: [MaterialKey; 7] = [
        MaterialKey::CourtFloor,
        MaterialKey::LineMarking,
        MaterialKey::Support,
        MaterialKey::Backboard,
        MaterialKey::Rim,
        MaterialKey::Net,
        MaterialKey::Ball,
    ];

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0xc68642);
        assert!((c.r - 198.0 / 255.0).abs() < 1e-6);
        assert!((c.g - 134.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 66.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_raw_policy_passes_through() {
        let palette = Palette::new(ColorPolicy::Raw);
        let court = palette.resolve(MaterialKey::CourtFloor);
        assert_eq!(court.color, Color::from_hex(0xc68642));
    }

    #[test]
    fn test_linearized_policy_applies_to_every_material() {
        let raw = Palette::new(ColorPolicy::Raw);
        let pbr = Palette::new(ColorPolicy::LinearizedForPbr);
        for key in ALL_KEYS {
            assert_eq!(pbr.resolve(key).color, raw.resolve(key).color.to_linear());
        }
        // The rim is no exception
        let rim = pbr.resolve(MaterialKey::Rim).color;
        assert!((rim.g - srgb_to_linear(140.0 / 255.0)).abs() < 1e-6);
    }

    #[test]
    fn test_transfer_fixed_points() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert_eq!(Color::WHITE.to_linear().to_array().map(|c| c.round()), [1.0; 3]);
        // Mid-grey darkens
        assert!(srgb_to_linear(0.5) < 0.25);
    }

    #[test]
    fn test_only_backboard_is_transparent() {
        let palette = Palette::new(ColorPolicy::default());
        for key in ALL_KEYS {
            let transparent = palette.resolve(key).is_transparent();
            assert_eq!(transparent, key == MaterialKey::Backboard, "{key:?}");
        }
        assert_eq!(palette.resolve(MaterialKey::Backboard).opacity, 0.6);
    }

    #[test]
    fn test_policy_round_trips_through_str() {
        for policy in [ColorPolicy::Raw, ColorPolicy::LinearizedForPbr] {
            assert_eq!(ColorPolicy::from_str(policy.as_str()), Some(policy));
        }
        assert_eq!(ColorPolicy::from_str("RAW"), Some(ColorPolicy::Raw));
        assert_eq!(ColorPolicy::from_str("sepia"), None);
    }
}
