//! Core data structures for sprite sheets.

use thiserror::Error;

/// Errors raised while building a sprite catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog contains no sprites
    #[error("Sprite catalog is empty")]
    Empty,
    /// A sprite declares zero frames
    #[error("Sprite {index} has no frames")]
    NoFrames { index: usize },
    /// A sprite declares a zero width or height
    #[error("Sprite {index} has invalid dimensions {width}x{height}")]
    InvalidDimensions { index: usize, width: u32, height: u32 },
    /// The TOML source could not be parsed
    #[cfg(feature = "toml")]
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Native dimensions and frame count of one animal's sprite sheet.
///
/// The sheet itself is a horizontal filmstrip; frame `i` starts at
/// `i * width` in native pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteDescriptor {
    /// Number of frames in the filmstrip
    pub frame_count: u32,
    /// Width of a single frame in native pixels
    pub width: u32,
    /// Height of a single frame in native pixels
    pub height: u32,
}

impl SpriteDescriptor {
    /// Create a new descriptor.
    pub const fn new(frame_count: u32, width: u32, height: u32) -> Self {
        Self {
            frame_count,
            width,
            height,
        }
    }

    /// Whether this sprite gets the third step of a pet pulse.
    #[inline]
    pub fn is_long(&self, threshold: u32) -> bool {
        self.frame_count > threshold
    }
}

/// The animals shipped with the zoo, in display order.
pub const DEFAULT_SPRITES: [SpriteDescriptor; 7] = [
    SpriteDescriptor::new(32, 245, 184),
    SpriteDescriptor::new(35, 320, 240),
    SpriteDescriptor::new(32, 480, 402),
    SpriteDescriptor::new(26, 220, 220),
    SpriteDescriptor::new(32, 220, 220),
    SpriteDescriptor::new(40, 220, 275),
    SpriteDescriptor::new(8, 400, 300),
];

/// Ordered, validated list of sprites. The position of a sprite is its id.
///
/// ## Example
///
/// ```rust
/// use petting_zoo_view::{SpriteCatalog, SpriteDescriptor};
///
/// let catalog = SpriteCatalog::new(vec![
///     SpriteDescriptor::new(8, 400, 300),
///     SpriteDescriptor::new(32, 220, 220),
/// ])
/// .unwrap();
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.frame_count(1), 32);
///
/// assert!(SpriteCatalog::new(vec![]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpriteCatalog {
    sprites: Vec<SpriteDescriptor>,
}

impl SpriteCatalog {
    /// Build a catalog, rejecting empty lists and degenerate sprites.
    pub fn new(sprites: Vec<SpriteDescriptor>) -> Result<Self, CatalogError> {
        if sprites.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, sprite) in sprites.iter().enumerate() {
            if sprite.frame_count == 0 {
                return Err(CatalogError::NoFrames { index });
            }
            if sprite.width == 0 || sprite.height == 0 {
                return Err(CatalogError::InvalidDimensions {
                    index,
                    width: sprite.width,
                    height: sprite.height,
                });
            }
        }
        Ok(Self { sprites })
    }

    /// Parse a catalog from TOML made of `[[sprite]]` tables.
    ///
    /// ```toml
    /// [[sprite]]
    /// frame_count = 8
    /// width = 400
    /// height = 300
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        #[derive(serde::Deserialize)]
        struct CatalogFile {
            #[serde(default)]
            sprite: Vec<SpriteDescriptor>,
        }

        let file: CatalogFile = toml::from_str(s)?;
        Self::new(file.sprite)
    }

    /// Number of sprites. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Get a sprite by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&SpriteDescriptor> {
        self.sprites.get(index)
    }

    /// Get a sprite by index.
    ///
    /// Panics if `index` is out of range; gif indices are controller
    /// invariants, so a bad one is a programming error.
    #[inline]
    pub fn sprite(&self, index: usize) -> &SpriteDescriptor {
        &self.sprites[index]
    }

    /// Frame count of the sprite at `index`. Panics like [`Self::sprite`].
    #[inline]
    pub fn frame_count(&self, index: usize) -> u32 {
        self.sprite(index).frame_count
    }

    /// Iterate over all sprites in order.
    pub fn iter(&self) -> impl Iterator<Item = &SpriteDescriptor> {
        self.sprites.iter()
    }
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        Self {
            sprites: DEFAULT_SPRITES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = SpriteCatalog::default();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.sprite(1), &SpriteDescriptor::new(35, 320, 240));
        assert_eq!(catalog.frame_count(6), 8);
        assert!(catalog.iter().all(|s| s.frame_count >= 1));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(SpriteCatalog::new(Vec::new()), Err(CatalogError::Empty));
    }

    #[test]
    fn test_rejects_degenerate_sprites() {
        let err = SpriteCatalog::new(vec![
            SpriteDescriptor::new(4, 10, 10),
            SpriteDescriptor::new(0, 10, 10),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::NoFrames { index: 1 });

        let err = SpriteCatalog::new(vec![SpriteDescriptor::new(4, 0, 10)]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidDimensions {
                index: 0,
                width: 0,
                height: 10
            }
        );
        assert_eq!(err.to_string(), "Sprite 0 has invalid dimensions 0x10");
    }

    #[test]
    fn test_is_long() {
        assert!(!SpriteDescriptor::new(8, 1, 1).is_long(20));
        assert!(!SpriteDescriptor::new(20, 1, 1).is_long(20));
        assert!(SpriteDescriptor::new(21, 1, 1).is_long(20));
    }

    #[test]
    fn test_get_out_of_range() {
        let catalog = SpriteCatalog::default();
        assert!(catalog.get(7).is_none());
        assert!(catalog.get(0).is_some());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml() {
        let catalog = SpriteCatalog::from_toml_str(
            r#"
            [[sprite]]
            frame_count = 8
            width = 400
            height = 300

            [[sprite]]
            frame_count = 26
            width = 220
            height = 220
            "#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.frame_count(1), 26);

        assert_eq!(SpriteCatalog::from_toml_str(""), Err(CatalogError::Empty));
    }
}
