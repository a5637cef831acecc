use geneva_cad::{BooleanOp, Sketch, SketchPlane, SketchResult};
use glam::Vec2;

use crate::material::Paint;
use crate::params::GenevaParams;
use crate::part::Part;

/// Rounded base plate with a lip and an axle pin under each bearing
///
/// The disk side (-X) carries its bearing at the disk height, the wheel
/// side (+X) one plate thickness higher.
pub fn base_plate(params: &GenevaParams) -> SketchResult<Part> {
    let dims = params.dimensions();
    let mut part = Part::new("plate");

    let mut outline = Sketch::new("outline", SketchPlane::xy());
    outline.add_rounded_rectangle(
        Vec2::ZERO,
        params.base_length,
        params.base_width,
        params.fillet_radius,
    )?;
    part.extrude("plate", outline, 0.0, params.plate_thickness, BooleanOp::New);

    let sides = [
        ("disk", -dims.pin_distance / 2.0, dims.circles_part_height),
        ("wheel", dims.pin_distance / 2.0, dims.cross_part_height),
    ];
    for (side, x, height) in sides {
        let center = Vec2::new(x, 0.0);

        let mut lip = Sketch::new(format!("{side} lip"), SketchPlane::xy());
        lip.add_circle(center, params.plate_lip_diameter / 2.0)?;
        part.extrude(
            format!("{side} lip"),
            lip,
            params.plate_thickness,
            height,
            BooleanOp::Join,
        );

        let seat = height - params.bearing_plate_offset;
        let mut pin = Sketch::new(format!("{side} pin"), SketchPlane::xy());
        pin.add_circle(center, params.plate_pin_diameter / 2.0)?;
        part.extrude(
            format!("{side} pin"),
            pin,
            seat,
            seat + params.bearing.height,
            BooleanOp::Join,
        );
    }

    part.paint(Paint::Plywood);
    Ok(part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geneva_cad::{BuildOptions, MeshKernel};

    #[test]
    fn test_plate_features() {
        let part = base_plate(&GenevaParams::default()).unwrap();
        assert_eq!(part.feature_count(), 5);
        assert_eq!(part.paint, Paint::Plywood);
    }

    #[test]
    fn test_plate_extent() {
        let part = base_plate(&GenevaParams::default()).unwrap();
        let kernel = MeshKernel::new();
        let mesh = part.build(&kernel, &BuildOptions::default()).unwrap();

        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.x, -50.0, epsilon = 1e-4);
        assert_relative_eq!(max.x, 50.0, epsilon = 1e-4);
        assert_relative_eq!(max.y, 25.0, epsilon = 1e-4);
        assert_relative_eq!(min.z, 0.0);
        // Wheel-side pin tops out at 9 - 3 + 6
        assert_relative_eq!(max.z, 12.0, epsilon = 1e-4);
    }

    #[test]
    fn test_plate_pins_sit_under_bearings() {
        let part = base_plate(&GenevaParams::default()).unwrap();
        let kernel = MeshKernel::new();
        let mesh = part.build(&kernel, &BuildOptions::default()).unwrap();

        // Above the wheel lip only the wheel pin remains
        let high: Vec<_> = mesh
            .vertices
            .iter()
            .filter(|v| v[2] > 10.5)
            .collect();
        assert!(!high.is_empty());
        for v in high {
            assert!((v[0] - 25.0).abs() <= 3.0 + 1e-4, "vertex {v:?} off the pin");
        }
    }
}
