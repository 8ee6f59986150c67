//! Sprite display: where to crop the sprite sheet for the current state.

use crate::{ControllerState, SpriteCatalog};

/// Full-page background image, relative to the asset root.
pub const BACKGROUND_ASSET: &str = "pexels-photo-4588065.jpg";

/// Path of the sprite sheet for a gif, relative to the asset root.
pub fn sprite_asset_path(gif_index: usize) -> String {
    format!("gifs/animal_{gif_index}.png")
}

/// Join an asset root and a relative asset path.
pub fn asset_url(asset_root: &str, path: &str) -> String {
    if asset_root.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", asset_root.trim_end_matches('/'), path)
    }
}

/// Everything needed to draw the current frame.
///
/// This is a platform-agnostic description; the web binding turns it into
/// inline styles, other hosts can crop the sheet themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteView {
    /// URL of the sprite sheet
    pub asset: String,
    /// Horizontal crop offset into the scaled sheet in pixels
    pub offset_x: i64,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Size of the whole scaled sheet as (width, height)
    pub sheet_size: (u64, u32),
}

impl SpriteView {
    /// Compute the view for a state.
    ///
    /// Out-of-range frame indices give offsets outside the sheet; they are
    /// passed through so the host shows whatever lies there.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use petting_zoo_view::{ControllerState, SpriteCatalog, SpriteView};
    ///
    /// let state = ControllerState { gif_index: 1, frame_index: 5 };
    /// let view = SpriteView::compute(&SpriteCatalog::default(), state, 2, "");
    ///
    /// assert_eq!(view.offset_x, 3200);
    /// assert_eq!((view.width, view.height), (640, 480));
    /// assert_eq!(view.background_position(), "-3200px -0px");
    /// ```
    pub fn compute(catalog: &SpriteCatalog, state: ControllerState, scale: u32, asset_root: &str) -> Self {
        let sprite = catalog.sprite(state.gif_index);
        let width = sprite.width.saturating_mul(scale);
        let height = sprite.height.saturating_mul(scale);
        Self {
            asset: asset_url(asset_root, &sprite_asset_path(state.gif_index)),
            offset_x: state.frame_index.saturating_mul(i64::from(width)),
            width,
            height,
            sheet_size: (sprite.frame_count as u64 * width as u64, height),
        }
    }

    /// CSS `background-image` value.
    pub fn background_image(&self) -> String {
        format!("url('{}')", self.asset)
    }

    /// CSS `background-position` value; the sheet moves left as frames advance.
    pub fn background_position(&self) -> String {
        if self.offset_x >= 0 {
            format!("-{}px -0px", self.offset_x)
        } else {
            format!("{}px -0px", self.offset_x.unsigned_abs())
        }
    }

    /// Whether the crop window lies fully inside the sheet.
    pub fn in_sheet(&self) -> bool {
        self.offset_x >= 0
            && (self.offset_x as u64).saturating_add(u64::from(self.width)) <= self.sheet_size.0
    }
}
