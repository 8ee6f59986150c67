//! Mapping pointer positions over the sprite container to frame indices.

use log::{trace, warn};

use crate::config::PointerConfig;

/// A raw pointer-move event from the host UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Horizontal screen coordinate in CSS pixels
    pub x: f64,
    /// Whether the event came from the user rather than a script
    pub trusted: bool,
}

impl PointerSample {
    pub fn new(x: f64, trusted: bool) -> Self {
        Self { x, trusted }
    }

    /// Whether this sample should drive the frame scrubber.
    ///
    /// Untrusted events, non-finite coordinates and events at even x
    /// coordinates are dropped. The last rule halves the event volume while
    /// scrubbing.
    pub fn is_accepted(&self) -> bool {
        self.trusted && self.x.is_finite() && self.x % 2.0 != 0.0
    }
}

/// Horizontal geometry of the sprite container as laid out on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerGeometry {
    /// Left edge in screen coordinates
    pub left: f64,
    /// Rendered width in pixels
    pub width: f64,
}

impl ContainerGeometry {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }
}

/// Pointer-to-frame mapping for one sprite.
///
/// ## Example
///
/// ```rust
/// use petting_zoo_view::{ContainerGeometry, FrameMapper};
///
/// let mapper = FrameMapper::default();
/// let container = ContainerGeometry::new(0.0, 440.0);
///
/// assert_eq!(FrameMapper::frame_width_px(440.0, 32), 13.0);
/// assert_eq!(mapper.frame_at(container, 32, 30.0), Some(0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameMapper {
    calibration: f64,
}

impl Default for FrameMapper {
    fn default() -> Self {
        Self::new(PointerConfig::default())
    }
}

impl FrameMapper {
    pub fn new(config: PointerConfig) -> Self {
        Self {
            calibration: config.calibration,
        }
    }

    /// Pixels the pointer must travel to move one frame.
    #[inline]
    pub fn frame_width_px(container_width: f64, frame_count: u32) -> f64 {
        (container_width / frame_count as f64).floor()
    }

    /// Frame index under `pointer_x`.
    ///
    /// The result is not clamped and may fall outside `[0, frame_count)`.
    /// Returns `None` when the container is narrower than one pixel per
    /// frame, or when the geometry is not finite.
    pub fn frame_at(&self, container: ContainerGeometry, frame_count: u32, pointer_x: f64) -> Option<i64> {
        let frame_width = Self::frame_width_px(container.width, frame_count);
        if frame_width.is_nan() || frame_width < 1.0 {
            warn!(
                "container {}px too narrow for {} frames",
                container.width, frame_count
            );
            return None;
        }
        let frame = ((pointer_x - container.left) / frame_width - self.calibration).floor();
        if !frame.is_finite() {
            warn!("pointer x={} left={} gives no frame", pointer_x, container.left);
            return None;
        }
        Some(frame as i64)
    }

    /// Filter a sample and map it, as the container's move handler does.
    pub fn map_sample(
        &self,
        container: ContainerGeometry,
        frame_count: u32,
        sample: PointerSample,
    ) -> Option<i64> {
        if !sample.is_accepted() {
            trace!("dropped pointer sample {:?}", sample);
            return None;
        }
        let frame = self.frame_at(container, frame_count, sample.x)?;
        trace!("pointer x={} -> frame {}", sample.x, frame);
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_mapping() {
        let mapper = FrameMapper::default();
        let container = ContainerGeometry::new(0.0, 440.0);
        assert_eq!(FrameMapper::frame_width_px(440.0, 32), 13.0);
        // floor(30 / 13 - 2) = floor(0.307..) = 0
        assert_eq!(mapper.frame_at(container, 32, 30.0), Some(0));
    }

    #[test]
    fn test_left_offset_and_negative_frames() {
        let mapper = FrameMapper::default();
        let container = ContainerGeometry::new(100.0, 440.0);
        // Pointer at the left edge lands before the first frame
        assert_eq!(mapper.frame_at(container, 32, 100.0), Some(-2));
        // floor(139 / 13 - 2) = floor(8.69..) = 8
        assert_eq!(mapper.frame_at(container, 32, 239.0), Some(8));
        // Right edge overshoots the last frame
        assert_eq!(mapper.frame_at(container, 32, 539.0), Some(31));
        assert_eq!(mapper.frame_at(container, 32, 600.0), Some(36));
    }

    #[test]
    fn test_custom_calibration() {
        let mapper = FrameMapper::new(PointerConfig { calibration: 0.0 });
        let container = ContainerGeometry::new(0.0, 440.0);
        assert_eq!(mapper.frame_at(container, 32, 30.0), Some(2));
    }

    #[test]
    fn test_degenerate_container() {
        let mapper = FrameMapper::default();
        let container = ContainerGeometry::new(0.0, 20.0);
        assert_eq!(mapper.frame_at(container, 32, 11.0), None);
    }

    #[test]
    fn test_sample_filter() {
        assert!(PointerSample::new(31.0, true).is_accepted());
        assert!(!PointerSample::new(30.0, true).is_accepted());
        assert!(!PointerSample::new(31.0, false).is_accepted());
        assert!(PointerSample::new(30.5, true).is_accepted());
        assert!(!PointerSample::new(0.0, true).is_accepted());
        assert!(!PointerSample::new(f64::INFINITY, true).is_accepted());
        assert!(!PointerSample::new(f64::NEG_INFINITY, true).is_accepted());
        assert!(!PointerSample::new(f64::NAN, true).is_accepted());
    }

    #[test]
    fn test_non_finite_geometry() {
        let mapper = FrameMapper::default();
        assert_eq!(mapper.frame_at(ContainerGeometry::new(0.0, f64::NAN), 32, 31.0), None);
        assert_eq!(mapper.frame_at(ContainerGeometry::new(f64::INFINITY, 440.0), 32, 31.0), None);
        assert_eq!(mapper.frame_at(ContainerGeometry::new(0.0, 440.0), 32, f64::INFINITY), None);
    }

    #[test_log::test]
    fn test_map_sample_filters() {
        let mapper = FrameMapper::default();
        let container = ContainerGeometry::new(0.0, 440.0);
        assert_eq!(mapper.map_sample(container, 32, PointerSample::new(30.0, true)), None);
        assert_eq!(mapper.map_sample(container, 32, PointerSample::new(31.0, false)), None);
        assert_eq!(mapper.map_sample(container, 32, PointerSample::new(31.0, true)), Some(0));
    }

    proptest! {
        #[test]
        fn even_or_untrusted_never_maps(x in -2000i32..2000, trusted in any::<bool>()) {
            let mapper = FrameMapper::default();
            let container = ContainerGeometry::new(0.0, 440.0);
            let sample = PointerSample::new(x as f64, trusted);
            if x % 2 == 0 || !trusted {
                prop_assert_eq!(mapper.map_sample(container, 32, sample), None);
            } else {
                prop_assert!(mapper.map_sample(container, 32, sample).is_some());
            }
        }
    }
}
