use std::f32::consts::{PI, TAU};

use geneva_cad::{BooleanOp, Sketch, SketchPlane, SketchResult};
use glam::Vec2;

use crate::material::Paint;
use crate::params::GenevaParams;
use crate::part::Part;

/// Slotted Geneva wheel
///
/// A disc with one locking cut-out per slot on the axes between the slots,
/// the radial slots themselves, and a bearing bore from the underside.
pub fn geneva_wheel(params: &GenevaParams) -> SketchResult<Part> {
    let cross = params.dimensions().cross;
    let slots = params.slot_count;
    let mut part = Part::new("geneva_wheel");

    let mut base = Sketch::new("base", SketchPlane::xy());
    base.add_circle(Vec2::ZERO, cross.width / 2.0)?;
    part.extrude("base", base, 0.0, cross.thickness, BooleanOp::New);

    for k in 0..slots {
        let angle = k as f32 * TAU / slots as f32;
        let mut cut = Sketch::new(format!("locking cut {k}"), SketchPlane::xy());
        cut.add_circle(Vec2::from_angle(angle) * cross.cut_offset, cross.cut_radius)?;
        part.extrude(
            format!("locking cut {k}"),
            cut,
            0.0,
            cross.thickness,
            BooleanOp::Cut,
        );
    }

    for k in 0..slots {
        let orientation = k as f32 * TAU / slots as f32 + PI / slots as f32;
        let corners = slot_corners(
            orientation,
            cross.center_slot_offset,
            cross.slot_length,
            cross.slot_width,
        );
        let lines: Vec<(Vec2, Vec2)> = (0..corners.len())
            .map(|i| (corners[i], corners[(i + 1) % corners.len()]))
            .collect();

        let mut slot = Sketch::new(format!("slot {k}"), SketchPlane::xy());
        slot.add_polygon_from_lines(&lines)?;
        part.extrude(
            format!("slot {k}"),
            slot,
            0.0,
            cross.thickness,
            BooleanOp::Cut,
        );
    }

    let mut bore = Sketch::new("bearing bore", SketchPlane::xy());
    bore.add_circle(Vec2::ZERO, params.bearing.outer_diameter / 2.0)?;
    part.extrude(
        "bearing bore",
        bore,
        0.0,
        cross.bearing_hole_depth,
        BooleanOp::Cut,
    );

    part.paint(Paint::Brown);
    Ok(part)
}

/// Corners of a radial slot centered `offset` from the axis
fn slot_corners(orientation: f32, offset: f32, length: f32, width: f32) -> [Vec2; 4] {
    let along = Vec2::from_angle(orientation);
    let across = -along.perp();
    let center = along * offset;
    let half_length = along * (length / 2.0);
    let half_width = across * (width / 2.0);
    [
        center - half_length + half_width,
        center - half_length - half_width,
        center + half_length - half_width,
        center + half_length + half_width,
    ]
}
