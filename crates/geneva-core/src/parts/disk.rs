use geneva_cad::{BooleanOp, Pencil, Sketch, SketchPlane, SketchResult};
use glam::Vec2;

use crate::material::Paint;
use crate::params::GenevaParams;
use crate::part::Part;

/// Drive disk: a stepped lathe with a bearing pocket, a locking cut-out and
/// two pins
pub fn drive_disk(params: &GenevaParams) -> SketchResult<Part> {
    let dims = params.dimensions();
    let disk = dims.disk;
    let mut part = Part::new("drive_disk");

    // Half section in the YZ plane, revolved about Z
    let mut section = Sketch::new("section", SketchPlane::yz());
    let pen = Pencil::new()
        .line_to(0.0, disk.pocket_depth)
        .line(disk.pocket_radius, 0.0)
        .line(0.0, -disk.pocket_depth);
    let y = pen.y();
    let pen = pen.line_to(disk.lower_radius, y).line(0.0, disk.step_height);
    let y = pen.y();
    let pen = pen.line_to(disk.upper_radius, y).line(0.0, disk.step_height);
    let y = pen.y();
    section.add_path(pen.line_to(0.0, y))?;
    let axis = section.axis(Vec2::ZERO, Vec2::Y)?;
    part.lathe("disk", section, axis);

    let step = SketchPlane::xy().offset(disk.step_height);

    let mut lock = Sketch::new("locking cut", step);
    lock.add_circle(
        Vec2::new(0.0, dims.pin_distance),
        dims.sliding_circle_diameter / 2.0,
    )?;
    part.extrude(
        "locking cut",
        lock,
        0.0,
        disk.step_height + params.lip_height,
        BooleanOp::Cut,
    );

    let mut turning = Sketch::new("turning pin", SketchPlane::xy().offset(disk.thickness));
    turning.add_circle(
        Vec2::new(disk.turning_pin_offset, 0.0),
        params.pin_diameter / 2.0,
    )?;
    part.extrude("turning pin", turning, 0.0, params.pin_height, BooleanOp::Join);

    let mut sliding = Sketch::new("sliding pin", step);
    sliding.add_circle(Vec2::new(0.0, dims.crank_radius), params.pin_diameter / 2.0)?;
    part.extrude("sliding pin", sliding, 0.0, params.pin_height, BooleanOp::Join);

    part.paint(Paint::Beige);
    Ok(part)
}
