//! Ball texture maps and their load status
//!
//! Maps load asynchronously and independently. A failed map is logged and
//! stays failed; the ball keeps rendering with the default for that slot.

use serde::{Deserialize, Serialize};

/// Default folder of the ball's metal/rough texture set
pub const DEFAULT_TEXTURE_PATH: &str = "assets/basketball-classic-ball/Tex_Metal_Rough/";

/// One of the ball's texture maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallMap {
    BaseColor,
    Normal,
    Roughness,
}

impl BallMap {
    pub const ALL: [BallMap; 3] = [BallMap::BaseColor, BallMap::Normal, BallMap::Roughness];

    pub fn file_name(&self) -> &'static str {
        match self {
            BallMap::BaseColor => "basketballball_bball_Mat_BaseColor.jpg",
            BallMap::Normal => "basketballball_bball_Mat_Normal.jpg",
            BallMap::Roughness => "basketballball_bball_Mat_Roughness.jpg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BallMap::BaseColor => "BaseColor",
            BallMap::Normal => "Normal",
            BallMap::Roughness => "Roughness",
        }
    }

    /// Color data is sRGB encoded; normal and roughness are linear data
    pub fn is_srgb(&self) -> bool {
        matches!(self, BallMap::BaseColor)
    }

    /// Index into per-map arrays
    pub fn index(&self) -> usize {
        match self {
            BallMap::BaseColor => 0,
            BallMap::Normal => 1,
            BallMap::Roughness => 2,
        }
    }

    /// RGBA8 texel used until the map resolves (white, flat normal, fully rough)
    pub fn default_texel(&self) -> [u8; 4] {
        match self {
            BallMap::BaseColor => [255, 255, 255, 255],
            BallMap::Normal => [128, 128, 255, 255],
            BallMap::Roughness => [255, 255, 255, 255],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureStatus {
    Pending,
    Loaded,
    Failed(String),
}

/// Load tracking for the ball's texture set
#[derive(Debug, Clone)]
pub struct BallTextures {
    base_path: String,
    status: [TextureStatus; 3],
}

impl Default for BallTextures {
    fn default() -> Self {
        Self::new(DEFAULT_TEXTURE_PATH)
    }
}

impl BallTextures {
    pub fn new(base_path: impl Into<String>) -> Self {
        let mut base_path = base_path.into();
        if !base_path.is_empty() && !base_path.ends_with('/') {
            base_path.push('/');
        }
        Self {
            base_path,
            status: [
                TextureStatus::Pending,
                TextureStatus::Pending,
                TextureStatus::Pending,
            ],
        }
    }

    pub fn url(&self, map: BallMap) -> String {
        format!("{}{}", self.base_path, map.file_name())
    }

    pub fn status(&self, map: BallMap) -> &TextureStatus {
        &self.status[map.index()]
    }

    /// Record a successful load. Returns false if the map had already settled.
    pub fn mark_loaded(&mut self, map: BallMap) -> bool {
        if self.is_settled(map) {
            return false;
        }
        log::info!("{} texture loaded successfully!", map.label());
        self.status[map.index()] = TextureStatus::Loaded;
        true
    }

    /// Record a failed load. Failure is terminal for this map.
    pub fn mark_failed(&mut self, map: BallMap, reason: impl Into<String>) -> bool {
        if self.is_settled(map) {
            return false;
        }
        let reason = reason.into();
        log::error!("Error loading {} texture: {}", map.label(), reason);
        self.status[map.index()] = TextureStatus::Failed(reason);
        true
    }

    pub fn is_settled(&self, map: BallMap) -> bool {
        self.status[map.index()] != TextureStatus::Pending
    }

    pub fn all_settled(&self) -> bool {
        BallMap::ALL.iter().all(|m| self.is_settled(*m))
    }

    pub fn loaded_count(&self) -> usize {
        self.status
            .iter()
            .filter(|s| **s == TextureStatus::Loaded)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let textures = BallTextures::new("/textures");
        assert_eq!(
            textures.url(BallMap::Normal),
            "/textures/basketballball_bball_Mat_Normal.jpg"
        );
        let textures = BallTextures::default();
        assert_eq!(
            textures.url(BallMap::BaseColor),
            "assets/basketball-classic-ball/Tex_Metal_Rough/basketballball_bball_Mat_BaseColor.jpg"
        );
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut textures = BallTextures::default();
        assert!(textures.mark_failed(BallMap::Roughness, "404"));
        assert!(!textures.mark_loaded(BallMap::Roughness));
        assert_eq!(
            textures.status(BallMap::Roughness),
            &TextureStatus::Failed("404".to_string())
        );
    }

    #[test]
    fn test_maps_settle_independently() {
        let mut textures = BallTextures::default();
        assert!(!textures.all_settled());
        textures.mark_loaded(BallMap::BaseColor);
        textures.mark_failed(BallMap::Normal, "decode error");
        assert!(!textures.all_settled());
        assert_eq!(textures.status(BallMap::Roughness), &TextureStatus::Pending);
        textures.mark_loaded(BallMap::Roughness);
        assert!(textures.all_settled());
        assert_eq!(textures.loaded_count(), 2);
    }

    #[test]
    fn test_only_base_color_is_srgb() {
        let srgb: Vec<BallMap> = BallMap::ALL.into_iter().filter(|m| m.is_srgb()).collect();
        assert_eq!(srgb, vec![BallMap::BaseColor]);
        for (i, map) in BallMap::ALL.iter().enumerate() {
            assert_eq!(map.index(), i);
        }
    }
}
