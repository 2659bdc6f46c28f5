//! Camera placement for the viewport
//!
//! All positions are in tile units. The camera origin is the fractional
//! top-left tile of the viewport; it is computed fresh every frame:
//!
//! 1. center the viewport on the anchor (usually the player)
//! 2. confine it to any camera region containing the anchor
//! 3. confine it to the map, which always wins over regions
//! 4. snap it to the pixel grid so scrolling never shimmers

use std::ops::RangeInclusive;

use bevy::math::{UVec2, Vec2};
use puzzle_map_core::CameraRegion;

/// Origin that centers `anchor` in a viewport of the given size
pub fn center_on(anchor: Vec2, viewport: UVec2) -> Vec2 {
    let margin = (viewport.as_vec2() - Vec2::ONE) / 2.0;
    anchor - margin
}

/// Keep the viewport inside every region that contains the anchor
///
/// Regions are applied in declaration order, so a later overlapping region
/// has the final say. Each axis is clamped independently.
pub fn clamp_to_regions(
    origin: Vec2,
    anchor: Vec2,
    viewport: UVec2,
    regions: &[CameraRegion],
) -> Vec2 {
    let size = viewport.as_vec2();
    regions
        .iter()
        .filter(|region| region.contains(anchor))
        .fold(origin, |origin, region| {
            Vec2::new(
                origin
                    .x
                    .min(region.right as f32 - size.x)
                    .max(region.left as f32),
                origin
                    .y
                    .min(region.bottom as f32 - size.y)
                    .max(region.top as f32),
            )
        })
}

/// Keep the viewport inside `[0, map - viewport]` on each axis
///
/// A map smaller than the viewport pins the origin to 0.
pub fn clamp_to_map(origin: Vec2, viewport: UVec2, map: UVec2) -> Vec2 {
    let max = map.as_vec2() - viewport.as_vec2();
    origin.min(max).max(Vec2::ZERO)
}

/// Round to the nearest whole pixel of a tile `tile_px` pixels in size
pub fn snap_to_pixels(position: Vec2, tile_px: UVec2) -> Vec2 {
    let px = tile_px.as_vec2();
    (position * px + Vec2::splat(0.5)).floor() / px
}

/// Full camera placement: center, regions, map bounds, then pixel snap
pub fn camera_origin(
    anchor: Vec2,
    viewport: UVec2,
    map: UVec2,
    regions: &[CameraRegion],
    tile_px: UVec2,
) -> Vec2 {
    let origin = center_on(anchor, viewport);
    let origin = clamp_to_regions(origin, anchor, viewport, regions);
    let origin = clamp_to_map(origin, viewport, map);
    snap_to_pixels(origin, tile_px)
}

/// Inclusive range of cells to draw for a camera origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRange {
    pub x: RangeInclusive<u32>,
    pub y: RangeInclusive<u32>,
}

/// Cells that can be visible from `origin`
///
/// One extra cell is included on the low side (unless already at 0) so that
/// actors sliding out of view are still drawn, and the high side is rounded up
/// for the same reason. Returns `None` for an empty map.
pub fn draw_range(origin: Vec2, viewport: UVec2, map: UVec2) -> Option<DrawRange> {
    if map.x == 0 || map.y == 0 {
        return None;
    }
    let axis = |start: f32, size: u32, limit: u32| {
        let mut low = start.floor().max(0.0) as u32;
        if low > 0 {
            low -= 1;
        }
        let high = ((start + size as f32).ceil().max(0.0) as u32).min(limit - 1);
        low.min(high)..=high
    };
    Some(DrawRange {
        x: axis(origin.x, viewport.x, map.x),
        y: axis(origin.y, viewport.y, map.y),
    })
}
