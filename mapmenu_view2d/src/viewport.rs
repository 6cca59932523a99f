// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect};

const MIN_MAP_UNITS_PER_PIXEL: f64 = 1e-9;
const MAX_MAP_UNITS_PER_PIXEL: f64 = 1e9;

/// North-up viewport over a map plane.
///
/// `MapViewport` tracks a rectangle in device space, the map coordinate shown
/// at its center, and the resolution in map units per pixel. Device y grows
/// downwards while map y grows northwards; the transforms account for the
/// flip.
#[derive(Clone, Debug)]
pub struct MapViewport {
    view_rect: Rect,
    center: Point,
    map_units_per_pixel: f64,
    map_to_view: Affine,
    view_to_map: Affine,
}

impl MapViewport {
    /// Creates a viewport covering `view_rect` centered on `center`.
    ///
    /// - The resolution is clamped to `[1e-9, 1e9]` map units per pixel.
    /// - Non-finite or non-positive resolutions fall back to `1.0`.
    #[must_use]
    pub fn new(view_rect: Rect, center: Point, map_units_per_pixel: f64) -> Self {
        let map_units_per_pixel = if map_units_per_pixel.is_finite() && map_units_per_pixel > 0.0
        {
            map_units_per_pixel.clamp(MIN_MAP_UNITS_PER_PIXEL, MAX_MAP_UNITS_PER_PIXEL)
        } else {
            1.0
        };
        let mut vp = Self {
            view_rect,
            center,
            map_units_per_pixel,
            map_to_view: Affine::IDENTITY,
            view_to_map: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Map units covered by one device pixel.
    #[must_use]
    pub fn map_units_per_pixel(&self) -> f64 {
        self.map_units_per_pixel
    }

    /// Converts a map point into device coordinates.
    #[must_use]
    pub fn map_to_view_point(&self, pt: Point) -> Point {
        self.map_to_view * pt
    }

    /// Converts a device point into map coordinates.
    #[must_use]
    pub fn view_to_map_point(&self, pt: Point) -> Point {
        self.view_to_map * pt
    }

    fn rebuild_transforms(&mut self) {
        let inv = 1.0 / self.map_units_per_pixel;
        // Map → view: center the map, scale with a y flip, then move to the view center.
        self.map_to_view = Affine::translate(self.view_rect.center().to_vec2())
            * Affine::scale_non_uniform(inv, -inv)
            * Affine::translate(-self.center.to_vec2());
        self.view_to_map = self.map_to_view.inverse();
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::MapViewport;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn map_view_roundtrip_is_north_up() {
        let vp = MapViewport::new(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Point::new(10.0, 20.0),
            0.5,
        );

        assert!(close(
            vp.map_to_view_point(Point::new(10.0, 20.0)),
            Point::new(400.0, 300.0)
        ));
        // North is up on screen.
        let north = vp.map_to_view_point(Point::new(10.0, 30.0));
        assert!(north.y < 300.0);

        let map_pt = Point::new(-3.0, 44.0);
        assert!(close(vp.view_to_map_point(vp.map_to_view_point(map_pt)), map_pt));
    }

    #[test]
    fn offset_view_rect_is_centered() {
        let vp = MapViewport::new(Rect::new(100.0, 50.0, 300.0, 250.0), Point::ZERO, 2.0);
        assert!(close(vp.view_to_map_point(Point::new(200.0, 150.0)), Point::ZERO));
        assert!(close(
            vp.view_to_map_point(Point::new(210.0, 150.0)),
            Point::new(20.0, 0.0)
        ));
    }

    #[test]
    fn invalid_resolution_falls_back() {
        let vp = MapViewport::new(Rect::new(0.0, 0.0, 10.0, 10.0), Point::ZERO, f64::NAN);
        assert_eq!(vp.map_units_per_pixel(), 1.0);
        let tiny = MapViewport::new(Rect::new(0.0, 0.0, 10.0, 10.0), Point::ZERO, 1e-12);
        assert_eq!(tiny.map_units_per_pixel(), 1e-9);
    }
}
