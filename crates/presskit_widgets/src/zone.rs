//! Hit-test zones
//!
//! A button is hit tested against three rects, all centered on its
//! position:
//!
//! - **base**: the content size of the idle visual
//! - **expand**: a forgiving rect that accepts new touches
//! - **safe**: a wider rect that keeps a pressed touch alive while dragging
//!
//! Expand and safe never shrink below the base rect. The configured sizes
//! are stored as given and clamped against the current content size each
//! time they are read, so replacing the idle visual re-floors both zones.

use presskit_core::{Point, Rect, Size};

/// Which zone to compute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Base,
    Expand,
    Safe,
}

/// Compute a zone rect centered on `position`
///
/// `Base` ignores `configured`; the other kinds use
/// `max(content, configured)` per axis.
pub fn compute_zone(kind: ZoneKind, position: Point, content: Size, configured: Size) -> Rect {
    let size = match kind {
        ZoneKind::Base => content,
        ZoneKind::Expand | ZoneKind::Safe => content.max(configured),
    };
    Rect::from_center(position, size)
}

/// Inclusive containment; zero-size zones contain nothing
pub fn contains_point(rect: &Rect, point: Point) -> bool {
    rect.contains(point)
}

/// Configured expand and safe sizes of one button
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Zones {
    expand: Size,
    safe: Size,
}

impl Zones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested expand size
    pub fn set_expand(&mut self, size: Size) {
        self.expand = size;
    }

    /// Set the requested safe size
    pub fn set_safe(&mut self, size: Size) {
        self.safe = size;
    }

    /// Effective expand size for the given content size
    pub fn expand(&self, content: Size) -> Size {
        content.max(self.expand)
    }

    /// Effective safe size for the given content size
    pub fn safe(&self, content: Size) -> Size {
        content.max(self.safe)
    }

    /// Zone rect of the given kind
    pub fn rect(&self, kind: ZoneKind, position: Point, content: Size) -> Rect {
        let configured = match kind {
            ZoneKind::Base => Size::ZERO,
            ZoneKind::Expand => self.expand,
            ZoneKind::Safe => self.safe,
        };
        compute_zone(kind, position, content, configured)
    }

    /// Whether a point lies in base ∪ expand (press acceptance)
    pub fn accepts(&self, position: Point, content: Size, point: Point) -> bool {
        contains_point(&self.rect(ZoneKind::Base, position, content), point)
            || contains_point(&self.rect(ZoneKind::Expand, position, content), point)
    }

    /// Whether a point lies in the safe zone (drag tolerance)
    pub fn tolerates(&self, position: Point, content: Size, point: Point) -> bool {
        contains_point(&self.rect(ZoneKind::Safe, position, content), point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: Size = Size::new(100.0, 40.0);
    const CENTER: Point = Point::new(200.0, 100.0);

    #[test]
    fn test_effective_size_is_per_axis_max() {
        let samples = [
            Size::ZERO,
            Size::new(50.0, 20.0),
            Size::new(150.0, 20.0),
            Size::new(50.0, 90.0),
            Size::new(100.0, 40.0),
            Size::new(300.0, 300.0),
            Size::new(-10.0, -10.0),
        ];

        for configured in samples {
            let mut zones = Zones::new();
            zones.set_expand(configured);
            zones.set_safe(configured);

            let expected = Size::new(
                CONTENT.width.max(configured.width),
                CONTENT.height.max(configured.height),
            );
            assert_eq!(zones.expand(CONTENT), expected, "expand for {configured:?}");
            assert_eq!(zones.safe(CONTENT), expected, "safe for {configured:?}");

            let base = zones.rect(ZoneKind::Base, CENTER, CONTENT);
            assert!(zones.rect(ZoneKind::Expand, CENTER, CONTENT).contains_rect(&base));
            assert!(zones.rect(ZoneKind::Safe, CENTER, CONTENT).contains_rect(&base));
        }
    }

    #[test]
    fn test_zones_refloor_with_content() {
        let mut zones = Zones::new();
        zones.set_expand(Size::new(120.0, 60.0));

        assert_eq!(zones.expand(CONTENT), Size::new(120.0, 60.0));
        // Bigger idle visual raises the floor
        assert_eq!(zones.expand(Size::new(200.0, 30.0)), Size::new(200.0, 60.0));
    }

    #[test]
    fn test_compute_zone_centered() {
        let rect = compute_zone(ZoneKind::Expand, CENTER, CONTENT, Size::new(120.0, 60.0));
        assert_eq!(rect, Rect::new(140.0, 70.0, 120.0, 60.0));

        let base = compute_zone(ZoneKind::Base, CENTER, CONTENT, Size::new(999.0, 999.0));
        assert_eq!(base.size, CONTENT);
    }

    #[test]
    fn test_accepts_and_tolerates() {
        let mut zones = Zones::new();
        zones.set_expand(Size::new(140.0, 60.0));
        zones.set_safe(Size::new(300.0, 200.0));

        assert!(zones.accepts(CENTER, CONTENT, CENTER));
        // Inside expand, outside base
        assert!(zones.accepts(CENTER, CONTENT, Point::new(265.0, 100.0)));
        // Outside expand, inside safe
        let near = Point::new(300.0, 100.0);
        assert!(!zones.accepts(CENTER, CONTENT, near));
        assert!(zones.tolerates(CENTER, CONTENT, near));
        // Outside everything
        assert!(!zones.tolerates(CENTER, CONTENT, Point::new(400.0, 100.0)));
    }

    #[test]
    fn test_empty_content_is_inert() {
        let zones = Zones::new();
        assert!(!zones.accepts(CENTER, Size::ZERO, CENTER));
        assert!(!zones.tolerates(CENTER, Size::ZERO, CENTER));
    }
}
