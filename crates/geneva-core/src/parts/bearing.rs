use geneva_cad::{BooleanOp, Sketch, SketchPlane, SketchResult};
use glam::Vec2;

use crate::material::Paint;
use crate::params::BearingSpec;
use crate::part::Part;

/// 626 deep groove ball bearing envelope: a ring with a through bore
pub fn ball_bearing_626d(bearing: &BearingSpec) -> SketchResult<Part> {
    let mut part = Part::new("ball_bearing_626d");

    let mut outer = Sketch::new("outer", SketchPlane::xy());
    outer.add_circle(Vec2::ZERO, bearing.outer_diameter / 2.0)?;
    part.extrude("outer cylinder", outer, 0.0, bearing.height, BooleanOp::New);

    let mut bore = Sketch::new("bore", SketchPlane::xy());
    bore.add_circle(Vec2::ZERO, bearing.inner_diameter / 2.0)?;
    part.extrude("bore", bore, 0.0, bearing.height, BooleanOp::Cut);

    part.paint(Paint::Grey);
    Ok(part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geneva_cad::{BuildOptions, MeshKernel};

    #[test]
    fn test_bearing_envelope() {
        let part = ball_bearing_626d(&BearingSpec::default()).unwrap();
        let kernel = MeshKernel::new();
        let mesh = part.build(&kernel, &BuildOptions::default()).unwrap();

        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 6.0);
        assert_relative_eq!(max.x, 9.5, epsilon = 1e-4);

        let ring = std::f32::consts::PI * (9.5f32.powi(2) - 3.0f32.powi(2)) * 6.0;
        assert_relative_eq!(mesh.volume(), ring, max_relative = 0.01);
        assert_eq!(part.paint, Paint::Grey);
    }
}
