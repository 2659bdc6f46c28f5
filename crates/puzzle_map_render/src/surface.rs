//! Raster surface helpers
//!
//! Surfaces are plain `RgbaImage`s. Copies composite source-over, and every
//! operation clips to the destination, so callers can pass partially
//! off-screen rectangles.

use image::{imageops, GenericImageView, Rgba, RgbaImage};

/// Make every pixel fully transparent
pub fn clear(surface: &mut RgbaImage) {
    for pixel in surface.pixels_mut() {
        *pixel = Rgba([0, 0, 0, 0]);
    }
}

/// Composite a `w` × `h` pixel block of `src` at (`sx`, `sy`) onto `dst` at (`dx`, `dy`)
pub fn blit_region(
    dst: &mut RgbaImage,
    src: &RgbaImage,
    sx: i64,
    sy: i64,
    dx: i64,
    dy: i64,
    w: u32,
    h: u32,
) {
    let Some(clip) = clip_source(src, sx, sy, w, h) else {
        return;
    };
    let block = src.view(clip.x, clip.y, clip.w, clip.h);
    imageops::overlay(dst, &*block, dx + clip.shift_x, dy + clip.shift_y);
}

/// Composite a solid (possibly translucent) rectangle onto `dst`
pub fn fill_rect(dst: &mut RgbaImage, x: i64, y: i64, w: u32, h: u32, color: Rgba<u8>) {
    let Some(clip) = clip_source(dst, x, y, w, h) else {
        return;
    };
    let patch = RgbaImage::from_pixel(clip.w, clip.h, color);
    imageops::overlay(dst, &patch, clip.x as i64, clip.y as i64);
}

/// Composite a solid rectangle whose corner sits at a fractional pixel position
///
/// Pixels only partly covered by the rectangle get its alpha scaled by the
/// covered fraction, so a half-pixel offset shows as a soft edge.
pub fn fill_rect_subpixel(dst: &mut RgbaImage, x: f32, y: f32, w: u32, h: u32, color: Rgba<u8>) {
    for (col, cols, cover_x) in coverage_spans(x, w) {
        for (row, rows, cover_y) in coverage_spans(y, h) {
            let alpha = (color[3] as f32 * cover_x * cover_y).round() as u8;
            if alpha == 0 {
                continue;
            }
            let Rgba([r, g, b, _]) = color;
            fill_rect(dst, col, row, cols, rows, Rgba([r, g, b, alpha]));
        }
    }
}

/// Split `[start, start + len)` into whole-pixel runs of equal coverage
fn coverage_spans(start: f32, len: u32) -> Vec<(i64, u32, f32)> {
    let first = start.floor();
    let fraction = start - first;
    let first = first as i64;
    if fraction == 0.0 {
        return vec![(first, len, 1.0)];
    }
    let mut spans = vec![(first, 1, 1.0 - fraction)];
    if len > 1 {
        spans.push((first + 1, len - 1, 1.0));
    }
    spans.push((first + len as i64, 1, fraction));
    spans
}

/// Part of a requested rectangle that lies inside an image
struct Clip {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    /// How far the clipped origin moved from the requested one
    shift_x: i64,
    shift_y: i64,
}

fn clip_source(image: &RgbaImage, x: i64, y: i64, w: u32, h: u32) -> Option<Clip> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w as i64).min(image.width() as i64);
    let y1 = (y + h as i64).min(image.height() as i64);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Clip {
        x: x0 as u32,
        y: y0 as u32,
        w: (x1 - x0) as u32,
        h: (y1 - y0) as u32,
        shift_x: x0 - x,
        shift_y: y0 - y,
    })
}

/// Shift one row left by `amount` pixels
///
/// The rightmost `amount` pixels keep their old contents.
pub fn shift_row_left(surface: &mut RgbaImage, row: u32, amount: u32) {
    let width = surface.width();
    if row >= surface.height() || amount == 0 || amount >= width {
        return;
    }
    for x in 0..width - amount {
        let pixel = *surface.get_pixel(x + amount, row);
        surface.put_pixel(x, row, pixel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[test]
    fn test_blit_clips_to_destination() {
        let src = RgbaImage::from_pixel(4, 4, RED);
        let mut dst = RgbaImage::new(4, 4);
        blit_region(&mut dst, &src, 0, 0, -2, 2, 4, 4);
        assert_eq!(*dst.get_pixel(0, 2), RED);
        assert_eq!(*dst.get_pixel(1, 3), RED);
        assert_eq!(*dst.get_pixel(2, 2), CLEAR);
        assert_eq!(*dst.get_pixel(0, 1), CLEAR);
    }

    #[test]
    fn test_blit_keeps_destination_under_transparent_source() {
        let src = RgbaImage::new(2, 2);
        let mut dst = RgbaImage::from_pixel(2, 2, RED);
        blit_region(&mut dst, &src, 0, 0, 0, 0, 2, 2);
        assert_eq!(*dst.get_pixel(1, 1), RED);
    }

    #[test]
    fn test_blit_clips_to_source() {
        let mut src = RgbaImage::new(2, 2);
        src.put_pixel(0, 0, RED);
        let mut dst = RgbaImage::new(4, 4);
        // a block hanging off the top-left of the source keeps its placement
        blit_region(&mut dst, &src, -1, -1, 0, 0, 3, 3);
        assert_eq!(*dst.get_pixel(1, 1), RED);
        assert_eq!(*dst.get_pixel(0, 0), CLEAR);
        assert_eq!(*dst.get_pixel(2, 2), CLEAR);

        blit_region(&mut dst, &src, 5, 5, 0, 0, 2, 2);
        assert_eq!(dst.pixels().filter(|p| **p == RED).count(), 1);
    }

    #[test]
    fn test_fill_blends_translucent_color() {
        let mut dst = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        fill_rect(&mut dst, -3, 0, 4, 1, Rgba([255, 0, 0, 128]));
        let blended = *dst.get_pixel(0, 0);
        assert!(blended[0] > 100 && blended[2] > 100);
        assert_eq!(*dst.get_pixel(1, 0), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_fill_and_clear() {
        let mut dst = RgbaImage::new(3, 3);
        fill_rect(&mut dst, 1, 1, 5, 5, RED);
        assert_eq!(*dst.get_pixel(0, 0), CLEAR);
        assert_eq!(*dst.get_pixel(2, 2), RED);
        clear(&mut dst);
        assert!(dst.pixels().all(|p| *p == CLEAR));
    }

    #[test]
    fn test_subpixel_fill_softens_partial_pixels() {
        let mut dst = RgbaImage::new(4, 1);
        fill_rect_subpixel(&mut dst, 0.5, 0.0, 2, 1, Rgba([255, 0, 0, 200]));
        assert!(dst.get_pixel(0, 0)[3].abs_diff(100) <= 1);
        assert_eq!(dst.get_pixel(1, 0)[3], 200);
        assert!(dst.get_pixel(2, 0)[3].abs_diff(100) <= 1);
        assert_eq!(*dst.get_pixel(3, 0), CLEAR);

        let mut aligned = RgbaImage::new(4, 1);
        fill_rect_subpixel(&mut aligned, 1.0, 0.0, 2, 1, Rgba([255, 0, 0, 200]));
        assert_eq!(*aligned.get_pixel(0, 0), CLEAR);
        assert_eq!(aligned.get_pixel(2, 0)[3], 200);
    }

    #[test]
    fn test_shift_row_left() {
        let mut surface = RgbaImage::new(4, 1);
        surface.put_pixel(2, 0, RED);
        shift_row_left(&mut surface, 0, 2);
        assert_eq!(*surface.get_pixel(0, 0), RED);
        // the vacated tail keeps its old pixels
        assert_eq!(*surface.get_pixel(2, 0), RED);
        assert_eq!(*surface.get_pixel(1, 0), CLEAR);
    }
}
