//! Wireframe preview of a paint list: every primitive's bounding box drawn
//! in isometric projection, coloured by what it represents.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use paint::map::TILE_SIZE;
use paint::{InteractionKind, PaintPrimitive, TileCoord};
use thiserror::Error;
use tracing::debug;

use crate::atomic_io::{write_output, OutputWriteError};

pub(crate) const MAX_PREVIEW_SIDE: u32 = 4096;
const MARGIN: i32 = 4;
const BACKGROUND: Rgba<u8> = Rgba([24, 24, 32, 255]);

#[derive(Debug, Error)]
pub(crate) enum PreviewError {
    #[error("preview of {width}x{height} pixels exceeds the {max}px limit")]
    TooLarge { width: u32, height: u32, max: u32 },
    #[error("failed to encode preview: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write preview: {0}")]
    Write(#[from] OutputWriteError),
}

fn interaction_colour(kind: InteractionKind) -> Rgba<u8> {
    match kind {
        InteractionKind::Terrain => Rgba([96, 160, 72, 255]),
        InteractionKind::Water => Rgba([64, 128, 224, 255]),
        InteractionKind::Park => Rgba([224, 200, 96, 255]),
        InteractionKind::Ride => Rgba([224, 96, 96, 255]),
        InteractionKind::Sprite => Rgba([240, 240, 240, 255]),
    }
}

/// Lowest corner of a tile once the map is turned to face the camera.
fn tile_view_origin(tile: TileCoord, rotation: u8) -> (i32, i32) {
    let (x, y) = tile.world();
    match rotation & 3 {
        0 => (x, y),
        1 => (y, -(x + TILE_SIZE)),
        2 => (-(x + TILE_SIZE), -(y + TILE_SIZE)),
        _ => (-(y + TILE_SIZE), x),
    }
}

fn project((x, y, z): (i32, i32, i32), zoom: u8) -> (i32, i32) {
    let screen_x = y - x;
    let screen_y = (x + y) / 2 - z;
    (screen_x >> zoom, screen_y >> zoom)
}

/// Screen positions of the eight corners of a primitive's bounding box.
/// Corner `n` takes the far side of axis `k` when bit `k` of `n` is set.
fn box_corners(primitive: &PaintPrimitive, zoom: u8) -> [(i32, i32); 8] {
    let (origin_x, origin_y) = tile_view_origin(primitive.tile, primitive.rotation);
    let (off_x, off_y, off_z) = primitive.bounds.offset;
    let (len_x, len_y, len_z) = primitive.bounds.length;
    let near = (
        origin_x + i32::from(off_x),
        origin_y + i32::from(off_y),
        i32::from(off_z),
    );
    let far = (
        near.0 + i32::from(len_x),
        near.1 + i32::from(len_y),
        near.2 + i32::from(len_z),
    );
    let mut corners = [(0, 0); 8];
    for (index, corner) in corners.iter_mut().enumerate() {
        let pick = |bit: usize, low: i32, high: i32| if index & bit == 0 { low } else { high };
        *corner = project(
            (pick(1, near.0, far.0), pick(2, near.1, far.1), pick(4, near.2, far.2)),
            zoom,
        );
    }
    corners
}

pub(crate) fn render_preview(
    primitives: &[PaintPrimitive],
    zoom: u8,
) -> Result<RgbaImage, PreviewError> {
    let boxes: Vec<(InteractionKind, [(i32, i32); 8])> = primitives
        .iter()
        .map(|primitive| (primitive.interaction, box_corners(primitive, zoom)))
        .collect();

    let points = boxes.iter().flat_map(|(_, corners)| corners.iter().copied());
    let (min_x, min_y, max_x, max_y) = points.fold(
        (i32::MAX, i32::MAX, i32::MIN, i32::MIN),
        |(min_x, min_y, max_x, max_y), (x, y)| (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)),
    );
    let (min_x, min_y, max_x, max_y) = if boxes.is_empty() {
        (0, 0, 0, 0)
    } else {
        (min_x, min_y, max_x, max_y)
    };

    let width = (i64::from(max_x) - i64::from(min_x) + 1 + 2 * i64::from(MARGIN)) as u64;
    let height = (i64::from(max_y) - i64::from(min_y) + 1 + 2 * i64::from(MARGIN)) as u64;
    if width > u64::from(MAX_PREVIEW_SIDE) || height > u64::from(MAX_PREVIEW_SIDE) {
        return Err(PreviewError::TooLarge {
            width: width.min(u64::from(u32::MAX)) as u32,
            height: height.min(u64::from(u32::MAX)) as u32,
            max: MAX_PREVIEW_SIDE,
        });
    }

    let mut image = RgbaImage::from_pixel(width as u32, height as u32, BACKGROUND);
    let shift = |(x, y): (i32, i32)| (x - min_x + MARGIN, y - min_y + MARGIN);
    for (kind, corners) in &boxes {
        let colour = interaction_colour(*kind);
        for from in 0..corners.len() {
            for bit in [1, 2, 4] {
                if from & bit == 0 {
                    draw_line(&mut image, shift(corners[from]), shift(corners[from | bit]), colour);
                }
            }
        }
    }
    Ok(image)
}

/// Renders and writes the preview PNG, returning its size in pixels.
pub(crate) fn write_preview(
    path: &Path,
    primitives: &[PaintPrimitive],
    zoom: u8,
) -> Result<(u32, u32), PreviewError> {
    let image = render_preview(primitives, zoom)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    write_output(path, &bytes)?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "preview_written"
    );
    Ok(image.dimensions())
}

fn draw_line(image: &mut RgbaImage, from: (i32, i32), to: (i32, i32), colour: Rgba<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let step_x = if x < to.0 { 1 } else { -1 };
    let step_y = if y < to.1 { 1 } else { -1 };
    let mut error = dx + dy;
    loop {
        put_pixel_clipped(image, x, y, colour);
        if x == to.0 && y == to.1 {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += step_x;
        }
        if doubled <= dx {
            error += dx;
            y += step_y;
        }
    }
}

fn put_pixel_clipped(image: &mut RgbaImage, x: i32, y: i32, colour: Rgba<u8>) {
    if x < 0 || y < 0 || x as u32 >= image.width() || y as u32 >= image.height() {
        return;
    }
    image.put_pixel(x as u32, y as u32, colour);
}

#[cfg(test)]
mod tests {
    use super::*;
    use paint::ImageId;
    use tempfile::TempDir;

    fn terrain_box(tile: TileCoord) -> PaintPrimitive {
        PaintPrimitive::new(ImageId::new(1), (0, 0), (32, 32, 0), 0).located(
            tile,
            0,
            InteractionKind::Terrain,
        )
    }

    #[test]
    fn empty_list_is_a_blank_margin() {
        let image = render_preview(&[], 0).expect("preview");
        assert_eq!(image.dimensions(), (9, 9));
        assert!(image.pixels().all(|pixel| *pixel == BACKGROUND));
    }

    #[test]
    fn flat_tile_is_a_diamond_outline() {
        let image = render_preview(&[terrain_box(TileCoord::new(0, 0))], 0).expect("preview");
        // A 32x32 footprint spans 64 pixels across and 32 down.
        assert_eq!(image.dimensions(), (65 + 8, 33 + 8));
        let colour = interaction_colour(InteractionKind::Terrain);
        assert_eq!(*image.get_pixel(4 + 32, 4), colour);
        assert_eq!(*image.get_pixel(4 + 32, 4 + 16), BACKGROUND);
    }

    #[test]
    fn zoom_halves_the_preview() {
        let image = render_preview(&[terrain_box(TileCoord::new(0, 0))], 1).expect("preview");
        assert_eq!(image.dimensions(), (33 + 8, 17 + 8));
    }

    #[test]
    fn rotation_moves_the_tile_not_its_shape() {
        let rotated = PaintPrimitive::new(ImageId::new(1), (0, 0), (32, 32, 0), 0).located(
            TileCoord::new(2, 1),
            3,
            InteractionKind::Ride,
        );
        let image = render_preview(&[rotated], 0).expect("preview");
        assert_eq!(image.dimensions(), (65 + 8, 33 + 8));
    }

    #[test]
    fn oversized_maps_are_refused() {
        let err = render_preview(
            &[terrain_box(TileCoord::new(0, 0)), terrain_box(TileCoord::new(0, 400))],
            0,
        )
        .expect_err("too large");
        assert!(matches!(err, PreviewError::TooLarge { .. }));
    }

    #[test]
    fn writes_a_readable_png() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("previews").join("park.png");
        let size = write_preview(&path, &[terrain_box(TileCoord::new(1, 1))], 0).expect("write");

        let decoded = image::open(&path).expect("decode png").to_rgba8();
        assert_eq!(decoded.dimensions(), size);
    }
}
