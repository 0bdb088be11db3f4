//! Cliff faces along the four edges of a surface tile.
//!
//! Each face is walked upward one land step at a time from the lower of the
//! neighbour's two edge corners to the tile's own corners. The front edges
//! (bottom left, bottom right) also cut tunnel openings queued in the tunnel
//! runs; the back edges only draw walls, or a thin connector strip when the
//! view is not cut away underground.

use crate::config::ViewFlags;
use crate::geometry::tables::{
    capped_tunnel, edge_style_images, tunnel_image, tunnel_shape, tunnel_z_correction,
};
use crate::geometry::{Edge, ImageId};
use crate::session::{AttachedImage, PaintContext, PaintSink, TunnelRun};

use super::descriptor::{EdgeCorners, TileDescriptor, ABSENT_NEIGHBOUR_HEIGHT};

const WALL_BOUND_HEIGHT: i16 = 15;

/// Corner heights of one face in land steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FaceSpan {
    own_first: u16,
    own_second: u16,
    neighbour_first: u16,
    neighbour_second: u16,
}

impl FaceSpan {
    fn new(own: (u8, u8), neighbour: (u8, u8)) -> Self {
        Self {
            own_first: u16::from(own.0),
            own_second: u16::from(own.1),
            neighbour_first: u16::from(neighbour.0),
            neighbour_second: u16::from(neighbour.1),
        }
    }

    /// True when the tile does not rise above its neighbour on this edge.
    fn is_hidden(&self) -> bool {
        self.own_first <= self.neighbour_first && self.own_second <= self.neighbour_second
    }
}

#[derive(Debug, Clone, Copy)]
struct FaceGeometry {
    offset: (i16, i16),
    bounds: (i16, i16),
    tunnel_bounds: (i16, i16),
    tunnel_top_offset: (i16, i16),
}

fn face_geometry(edge: Edge) -> FaceGeometry {
    match edge {
        Edge::TopLeft => FaceGeometry {
            offset: (0, -2),
            bounds: (30, 0),
            tunnel_bounds: (1, 1),
            tunnel_top_offset: (0, 0),
        },
        Edge::TopRight => FaceGeometry {
            offset: (-2, 0),
            bounds: (0, 30),
            tunnel_bounds: (1, 1),
            tunnel_top_offset: (0, 0),
        },
        Edge::BottomLeft => FaceGeometry {
            offset: (30, 0),
            bounds: (0, 30),
            tunnel_bounds: (32, 1),
            tunnel_top_offset: (0, 31),
        },
        Edge::BottomRight => FaceGeometry {
            offset: (0, 30),
            bounds: (30, 0),
            tunnel_bounds: (1, 32),
            tunnel_top_offset: (31, 0),
        },
    }
}

fn land_span(edge: Edge, own: &TileDescriptor, neighbour: &TileDescriptor) -> FaceSpan {
    let corners = EdgeCorners::of(edge, &own.corners, &neighbour.corners);
    if neighbour.exists() {
        FaceSpan::new(corners.own, corners.neighbour)
    } else {
        FaceSpan::new(corners.own, (ABSENT_NEIGHBOUR_HEIGHT, ABSENT_NEIGHBOUR_HEIGHT))
    }
}

/// Span of a water face, or `None` when the neighbour holds water at the
/// same level.
fn water_span(
    edge: Edge,
    water_level: u8,
    own: &TileDescriptor,
    neighbour: &TileDescriptor,
) -> Option<FaceSpan> {
    let corners = EdgeCorners::of(edge, &own.corners, &neighbour.corners);
    match neighbour.surface {
        Some(surface) if surface.water_height() == water_level => None,
        Some(_) => Some(FaceSpan::new(
            (water_level, water_level),
            corners.neighbour,
        )),
        None => Some(FaceSpan::new(
            corners.own,
            (ABSENT_NEIGHBOUR_HEIGHT, ABSENT_NEIGHBOUR_HEIGHT),
        )),
    }
}

fn wall(
    ctx: &PaintContext,
    sink: &mut impl PaintSink,
    image: u32,
    offset: (i16, i16),
    geometry: &FaceGeometry,
    step: u16,
) {
    let primitive = ctx.primitive(
        ImageId::new(image),
        offset,
        (geometry.bounds.0, geometry.bounds.1, WALL_BOUND_HEIGHT),
        (step * 16) as i16,
    );
    sink.add_parent(primitive);
}

/// Lower filler piece used when the neighbour's two corners differ.
/// Returns the cursor after it.
fn place_filler(
    ctx: &PaintContext,
    sink: &mut impl PaintSink,
    base: u32,
    geometry: &FaceGeometry,
    span: &FaceSpan,
    filler_offset: u32,
) -> u16 {
    let mut cursor = span.neighbour_first.min(span.neighbour_second);
    if span.neighbour_first != span.neighbour_second
        && cursor != span.own_first
        && cursor != span.own_second
    {
        wall(ctx, sink, base + filler_offset, geometry.offset, geometry, cursor);
        cursor += 1;
    }
    cursor
}

/// Sloped cap closing the face. Nothing is drawn when both corners are reached.
fn place_cap(
    ctx: &PaintContext,
    sink: &mut impl PaintSink,
    base: u32,
    geometry: &FaceGeometry,
    span: &FaceSpan,
    cursor: u16,
) {
    let cap_offset = if cursor >= span.own_first {
        if cursor >= span.own_second {
            return;
        }
        2
    } else {
        1
    };
    wall(ctx, sink, base + cap_offset, geometry.offset, geometry, cursor);
}

fn walk_back_face(
    ctx: &PaintContext,
    sink: &mut impl PaintSink,
    base: u32,
    geometry: &FaceGeometry,
    span: &FaceSpan,
    plain_wall_offset: (i16, i16),
) {
    let filler_offset = if span.neighbour_second > span.neighbour_first {
        4
    } else {
        3
    };
    let mut cursor = place_filler(ctx, sink, base, geometry, span, filler_offset);
    while cursor < span.own_first && cursor < span.own_second {
        wall(ctx, sink, base, plain_wall_offset, geometry, cursor);
        cursor += 1;
    }
    place_cap(ctx, sink, base, geometry, span, cursor);
}

fn tunnel_run(ctx: &mut PaintContext, edge: Edge) -> &mut TunnelRun {
    match edge {
        Edge::BottomRight => &mut ctx.tunnels.right,
        _ => &mut ctx.tunnels.left,
    }
}

fn walk_front_face(
    ctx: &mut PaintContext,
    sink: &mut impl PaintSink,
    edge: Edge,
    edge_style: u8,
    base: u32,
    span: &FaceSpan,
) {
    let geometry = face_geometry(edge);
    let filler_offset = if span.neighbour_second >= span.neighbour_first {
        4
    } else {
        3
    };
    let mut cursor = place_filler(ctx, sink, base, &geometry, span, filler_offset);

    loop {
        if cursor >= span.own_first || cursor >= span.own_second {
            place_cap(ctx, sink, base, &geometry, span, cursor);
            return;
        }

        let front = tunnel_run(ctx, edge).front();
        if u16::from(front.height) != cursor {
            // A wall goes in even when skipping stale entries lands on the
            // cursor; that entry is then stale at the next step.
            let run = tunnel_run(ctx, edge);
            while u16::from(run.front().height) < cursor {
                run.advance();
            }
            wall(ctx, sink, base, geometry.offset, &geometry, cursor);
            cursor += 1;
            continue;
        }

        let mut kind = front.kind;
        let top = cursor + u16::from(tunnel_shape(kind).height);
        if top > span.neighbour_first || top > span.own_first {
            kind = capped_tunnel(kind);
        }
        let shape = tunnel_shape(kind);
        let correction = tunnel_z_correction(kind);
        let z = (cursor * 16) as i16;
        let image = tunnel_image(edge_style, kind) + if edge == Edge::BottomRight { 2 } else { 0 };

        let mut lower_z = z + correction;
        let mut lower_length = i16::from(shape.bound_length) * 16;
        if lower_z < 16 {
            lower_z += 16;
            lower_length -= 16;
        }
        let lower = ctx
            .primitive(
                ImageId::new(image),
                geometry.offset,
                (
                    geometry.tunnel_bounds.0,
                    geometry.tunnel_bounds.1,
                    lower_length - 1,
                ),
                z,
            )
            .with_bound_offset((0, 0, lower_z));
        sink.add_parent(lower);

        let mut upper_z = z + correction;
        let mut upper_length = i16::from(shape.bound_length) * 16;
        if upper_z == 0 {
            upper_z += 16;
            upper_length -= 16;
        }
        let upper = ctx
            .primitive(
                ImageId::new(image + 1),
                geometry.offset,
                (
                    geometry.tunnel_bounds.0,
                    geometry.tunnel_bounds.1,
                    upper_length - 1,
                ),
                z,
            )
            .with_bound_offset((
                geometry.tunnel_top_offset.0,
                geometry.tunnel_top_offset.1,
                upper_z,
            ));
        sink.add_parent(upper);

        cursor += u16::from(shape.height);
        tunnel_run(ctx, edge).advance();
    }
}

fn is_underground(ctx: &PaintContext) -> bool {
    ctx.config.has(ViewFlags::UNDERGROUND_INSIDE)
}

/// Back face of the land. `height` is the tile's base in land steps.
pub fn paint_land_side_top(
    ctx: &PaintContext,
    sink: &mut impl PaintSink,
    edge: Edge,
    height: u8,
    edge_style: u8,
    own: &TileDescriptor,
    neighbour: &TileDescriptor,
) {
    if !edge.is_top() {
        return;
    }
    let span = land_span(edge, own, neighbour);
    if span.is_hidden() {
        return;
    }

    let images = edge_style_images(edge_style);
    let left_step = if edge == Edge::TopLeft { 3 } else { 0 };

    if !is_underground(ctx) {
        let incline = i32::from(span.own_second) - i32::from(span.own_first) + 1;
        let image = ImageId::new(images.top_connector + left_step).offset_signed(incline);
        let y = (i16::from(height) - span.own_first as i16) * 16;
        sink.attach(AttachedImage::new(image).at((0, y)));
        return;
    }

    let base = images.underground + if edge == Edge::TopLeft { 5 } else { 0 };
    let geometry = face_geometry(edge);
    walk_back_face(ctx, sink, base, &geometry, &span, geometry.offset);
}

/// Front face of the land, cutting any tunnels queued at its heights.
pub fn paint_land_side_bottom(
    ctx: &mut PaintContext,
    sink: &mut impl PaintSink,
    edge: Edge,
    edge_style: u8,
    own: &TileDescriptor,
    neighbour: &TileDescriptor,
) {
    if edge.is_top() {
        return;
    }
    let span = land_span(edge, own, neighbour);
    if span.is_hidden() {
        return;
    }
    let images = edge_style_images(edge_style);
    let base = (if is_underground(ctx) {
        images.underground
    } else {
        images.land
    }) + if edge == Edge::BottomRight { 5 } else { 0 };
    walk_front_face(ctx, sink, edge, edge_style, base, &span);
}

/// Back face of the water body. `water_level` is in land steps.
pub fn paint_water_side_top(
    ctx: &PaintContext,
    sink: &mut impl PaintSink,
    edge: Edge,
    water_level: u8,
    edge_style: u8,
    own: &TileDescriptor,
    neighbour: &TileDescriptor,
) {
    if !edge.is_top() {
        return;
    }
    let Some(span) = water_span(edge, water_level, own, neighbour) else {
        return;
    };
    if span.is_hidden() {
        return;
    }
    let images = edge_style_images(edge_style);
    let base = (if is_underground(ctx) {
        images.underground
    } else {
        images.water
    }) + if edge == Edge::TopLeft { 5 } else { 0 };
    let geometry = face_geometry(edge);
    walk_back_face(ctx, sink, base, &geometry, &span, (0, 0));
}

/// Front face of the water body.
pub fn paint_water_side_bottom(
    ctx: &mut PaintContext,
    sink: &mut impl PaintSink,
    edge: Edge,
    water_level: u8,
    edge_style: u8,
    own: &TileDescriptor,
    neighbour: &TileDescriptor,
) {
    if edge.is_top() {
        return;
    }
    let Some(span) = water_span(edge, water_level, own, neighbour) else {
        return;
    };
    if span.is_hidden() {
        return;
    }
    let images = edge_style_images(edge_style);
    let base = (if is_underground(ctx) {
        images.underground
    } else {
        images.land
    }) + if edge == Edge::BottomRight { 5 } else { 0 };
    walk_front_face(ctx, sink, edge, edge_style, base, &span);
}
