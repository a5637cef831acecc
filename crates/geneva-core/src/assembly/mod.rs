//! Assemblies of placed parts
//!
//! An assembly is a tree: each component is a part or a nested assembly
//! with a transform relative to its parent.

mod transform;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::build::BuildError;
use crate::params::GenevaParams;
use crate::part::Part;
use crate::parts;

pub use transform::TransformBuilder;

/// What a component places
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ComponentKind {
    Part(Part),
    Assembly(Assembly),
}

impl From<Part> for ComponentKind {
    fn from(part: Part) -> Self {
        ComponentKind::Part(part)
    }
}

impl From<Assembly> for ComponentKind {
    fn from(assembly: Assembly) -> Self {
        ComponentKind::Assembly(assembly)
    }
}

/// A placed child of an assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Name, unique among its siblings
    pub name: String,
    pub kind: ComponentKind,
    /// Placement relative to the parent assembly
    pub transform: Mat4,
}

/// A part together with its world placement
#[derive(Debug, Clone)]
pub struct PlacedPart<'a> {
    /// Slash-separated component names from the root
    pub path: String,
    pub part: &'a Part,
    pub world_transform: Mat4,
}

/// Assembly-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssemblyError {
    #[error("Component '{0}' already exists in assembly '{1}'")]
    DuplicateName(String, String),
}

/// Tree of placed parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assembly {
    pub name: String,
    components: Vec<Component>,
}

impl Assembly {
    /// Create a new empty assembly
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// Add a part or sub-assembly at `transform`
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        item: impl Into<ComponentKind>,
        transform: Mat4,
    ) -> Result<(), AssemblyError> {
        let name = name.into();
        if self.components.iter().any(|c| c.name == name) {
            return Err(AssemblyError::DuplicateName(name, self.name.clone()));
        }
        self.components.push(Component {
            name,
            kind: item.into(),
            transform,
        });
        Ok(())
    }

    /// Direct children
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of parts in the whole tree
    pub fn part_count(&self) -> usize {
        self.components
            .iter()
            .map(|c| match &c.kind {
                ComponentKind::Part(_) => 1,
                ComponentKind::Assembly(sub) => sub.part_count(),
            })
            .sum()
    }

    /// Depth-first list of every part with its world transform
    ///
    /// World transforms compose as `parent * local`.
    pub fn flatten(&self) -> Vec<PlacedPart<'_>> {
        let mut parts = Vec::with_capacity(self.part_count());
        self.flatten_into("", Mat4::IDENTITY, &mut parts);
        parts
    }

    fn flatten_into<'a>(&'a self, prefix: &str, parent: Mat4, out: &mut Vec<PlacedPart<'a>>) {
        for component in &self.components {
            let path = if prefix.is_empty() {
                component.name.clone()
            } else {
                format!("{prefix}/{}", component.name)
            };
            let world = parent * component.transform;
            match &component.kind {
                ComponentKind::Part(part) => out.push(PlacedPart {
                    path,
                    part,
                    world_transform: world,
                }),
                ComponentKind::Assembly(sub) => sub.flatten_into(&path, world, out),
            }
        }
    }
}

/// The base plate with a bearing seated over each axle pin
pub fn plate_with_bearings(params: &GenevaParams) -> Result<Assembly, BuildError> {
    params.validate()?;
    let dims = params.dimensions();
    let mut assembly = Assembly::new("plate_with_bearings");

    assembly.add_component("plate", parts::base_plate(params)?, Mat4::IDENTITY)?;

    let disk_bearing = TransformBuilder::new()
        .translate_x(-dims.pin_distance / 2.0)
        .translate_z(dims.circles_part_height - params.bearing_plate_offset)
        .build();
    assembly.add_component(
        "disk_bearing",
        parts::ball_bearing_626d(&params.bearing)?,
        disk_bearing,
    )?;

    let wheel_bearing = TransformBuilder::new()
        .translate_x(dims.pin_distance / 2.0)
        .translate_z(dims.cross_part_height - params.bearing_plate_offset)
        .build();
    assembly.add_component(
        "wheel_bearing",
        parts::ball_bearing_626d(&params.bearing)?,
        wheel_bearing,
    )?;

    Ok(assembly)
}

/// The complete drive: plate assembly, drive disk and Geneva wheel
pub fn geneva_drive(params: &GenevaParams) -> Result<Assembly, BuildError> {
    let dims = params.dimensions();
    let mut assembly = Assembly::new("geneva_drive");

    assembly.add_component(
        "plate_with_bearings",
        plate_with_bearings(params)?,
        Mat4::IDENTITY,
    )?;

    let disk = TransformBuilder::new()
        .translate_z(dims.circles_part_height)
        .translate_x(-dims.pin_distance / 2.0)
        .build();
    assembly.add_component("drive_disk", parts::drive_disk(params)?, disk)?;

    let wheel = TransformBuilder::new()
        .translate_z(dims.cross_part_height)
        .translate_x(dims.pin_distance / 2.0)
        .build();
    assembly.add_component("geneva_wheel", parts::geneva_wheel(params)?, wheel)?;

    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_plate_with_bearings_layout() {
        let assembly = plate_with_bearings(&GenevaParams::default()).unwrap();
        let placed = assembly.flatten();
        assert_eq!(placed.len(), 3);

        let origin = |name: &str| {
            placed
                .iter()
                .find(|p| p.path == name)
                .map(|p| p.world_transform.transform_point3(Vec3::ZERO))
                .unwrap()
        };
        assert_eq!(origin("plate"), Vec3::ZERO);
        assert_eq!(origin("disk_bearing"), Vec3::new(-25.0, 0.0, 4.0));
        assert_eq!(origin("wheel_bearing"), Vec3::new(25.0, 0.0, 6.0));
    }

    #[test]
    fn test_geneva_drive_paths_and_placements() {
        let assembly = geneva_drive(&GenevaParams::default()).unwrap();
        assert_eq!(assembly.part_count(), 5);

        let placed = assembly.flatten();
        let paths: Vec<&str> = placed.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "plate_with_bearings/plate",
                "plate_with_bearings/disk_bearing",
                "plate_with_bearings/wheel_bearing",
                "drive_disk",
                "geneva_wheel",
            ]
        );

        let disk = placed[3].world_transform.transform_point3(Vec3::ZERO);
        let wheel = placed[4].world_transform.transform_point3(Vec3::ZERO);
        assert_eq!(disk, Vec3::new(-25.0, 0.0, 7.0));
        assert_eq!(wheel, Vec3::new(25.0, 0.0, 9.0));
    }

    #[test]
    fn test_nested_transforms_compose() {
        let mut inner = Assembly::new("inner");
        inner
            .add_component(
                "part",
                Part::new("part"),
                TransformBuilder::new().translate_x(1.0).build(),
            )
            .unwrap();
        let mut outer = Assembly::new("outer");
        outer
            .add_component(
                "inner",
                inner,
                TransformBuilder::new().translate_z(2.0).build(),
            )
            .unwrap();

        let placed = outer.flatten();
        assert_eq!(placed[0].path, "inner/part");
        assert_eq!(
            placed[0].world_transform.transform_point3(Vec3::ZERO),
            Vec3::new(1.0, 0.0, 2.0)
        );
    }

    #[test]
    fn test_duplicate_component_names_rejected() {
        let mut assembly = Assembly::new("a");
        assembly
            .add_component("p", Part::new("p"), Mat4::IDENTITY)
            .unwrap();
        let err = assembly.add_component("p", Part::new("q"), Mat4::IDENTITY);
        assert!(matches!(err, Err(AssemblyError::DuplicateName(..))));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = GenevaParams {
            slot_count: 2,
            ..Default::default()
        };
        assert!(matches!(geneva_drive(&params), Err(BuildError::Params(_))));
    }
}
