//! Geometry snapshots and pull progress.
//!
//! Offsets use a flipped coordinate space: `0` is the top of the content,
//! negative values are above it. A snapshot is taken per event and thrown
//! away afterwards.

use crate::edge::Edge;
use crate::host::ScrollHost;

/// Visible offset and sizes of a scroll view at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollGeometry {
    /// Distance from the top of the content to the top of the viewport.
    pub offset: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

impl ScrollGeometry {
    pub const fn new(offset: f32, viewport_height: f32, content_height: f32) -> Self {
        Self {
            offset,
            viewport_height,
            content_height,
        }
    }

    /// Reads the current geometry from the host.
    pub fn capture(host: &dyn ScrollHost) -> Self {
        Self::new(
            host.visible_offset(),
            host.viewport_height(),
            host.content_height(),
        )
    }

    /// True when any component is NaN or infinite.
    pub fn is_degenerate(&self) -> bool {
        !(self.offset.is_finite()
            && self.viewport_height.is_finite()
            && self.content_height.is_finite())
    }

    /// Content height used for the bottom edge. Content shorter than the
    /// viewport still fills it, otherwise a short list would report a
    /// bottom pull while sitting at rest.
    pub fn scrollable_height(&self) -> f32 {
        self.content_height.max(self.viewport_height).max(0.0)
    }

    /// Largest offset reachable without over-pulling the bottom edge.
    pub fn max_offset(&self) -> f32 {
        (self.scrollable_height() - self.viewport_height.max(0.0)).max(0.0)
    }

    /// Progress of a pull past the top edge: `-offset / trigger_height`.
    pub fn top_progress(&self, trigger_height: f32) -> f32 {
        if !pullable(trigger_height) || self.is_degenerate() || self.offset > 0.0 {
            return 0.0;
        }
        -self.offset / trigger_height
    }

    /// Progress of a pull past the bottom edge:
    /// `(offset + viewport - content) / trigger_height`.
    pub fn bottom_progress(&self, trigger_height: f32) -> f32 {
        if !pullable(trigger_height) || self.is_degenerate() {
            return 0.0;
        }
        let overshoot = self.offset + self.viewport_height.max(0.0) - self.scrollable_height();
        if overshoot < 0.0 {
            return 0.0;
        }
        overshoot / trigger_height
    }

    pub fn progress(&self, edge: Edge, trigger_height: f32) -> f32 {
        match edge {
            Edge::Top => self.top_progress(trigger_height),
            Edge::Bottom => self.bottom_progress(trigger_height),
        }
    }
}

fn pullable(trigger_height: f32) -> bool {
    trigger_height.is_finite() && trigger_height > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_progress_is_offset_over_height() {
        let geometry = ScrollGeometry::new(-20.0, 500.0, 1000.0);
        assert_eq!(geometry.top_progress(40.0), 0.5);
        assert_eq!(geometry.bottom_progress(40.0), 0.0);
    }

    #[test]
    fn top_progress_grows_as_offset_decreases() {
        let mut previous = -1.0;
        for step in 0..=40 {
            let offset = -(step as f32) * 2.5;
            let progress = ScrollGeometry::new(offset, 500.0, 1000.0).top_progress(40.0);
            assert_eq!(progress, -offset / 40.0);
            assert!(progress > previous);
            previous = progress;
        }
    }

    #[test]
    fn progress_is_unbounded_while_over_pulling() {
        let geometry = ScrollGeometry::new(-50.0, 500.0, 500.0);
        assert_eq!(geometry.top_progress(40.0), 1.25);
    }

    #[test]
    fn bottom_progress_measures_overshoot_past_content() {
        // max offset is 500, 30px past it
        let geometry = ScrollGeometry::new(530.0, 500.0, 1000.0);
        assert_eq!(geometry.bottom_progress(40.0), 0.75);
        assert_eq!(geometry.top_progress(40.0), 0.0);
    }

    #[test]
    fn scrolled_into_the_middle_reports_no_pull() {
        let geometry = ScrollGeometry::new(250.0, 500.0, 1000.0);
        assert_eq!(geometry.progress(Edge::Top, 40.0), 0.0);
        assert_eq!(geometry.progress(Edge::Bottom, 40.0), 0.0);
    }

    #[test]
    fn short_content_is_measured_against_the_viewport() {
        let geometry = ScrollGeometry::new(0.0, 500.0, 120.0);
        assert_eq!(geometry.bottom_progress(40.0), 0.0);
        assert_eq!(geometry.max_offset(), 0.0);

        let pulled = ScrollGeometry::new(20.0, 500.0, 120.0);
        assert_eq!(pulled.bottom_progress(40.0), 0.5);
    }

    #[test]
    fn zero_trigger_height_means_no_pull() {
        let geometry = ScrollGeometry::new(-50.0, 500.0, 500.0);
        assert_eq!(geometry.top_progress(0.0), 0.0);
        assert_eq!(geometry.bottom_progress(0.0), 0.0);
        assert_eq!(geometry.top_progress(-10.0), 0.0);
    }

    #[test]
    fn degenerate_geometry_never_produces_nan() {
        let geometry = ScrollGeometry::new(f32::NAN, 500.0, 500.0);
        assert!(geometry.is_degenerate());
        assert_eq!(geometry.top_progress(40.0), 0.0);

        let geometry = ScrollGeometry::new(10.0, f32::INFINITY, 500.0);
        assert_eq!(geometry.bottom_progress(40.0), 0.0);
    }
}
