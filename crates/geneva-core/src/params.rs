//! Base parameters and derived dimensions of the drive
//!
//! All lengths are millimetres. [`GenevaParams`] holds the handful of
//! numbers a user would tweak; [`Dimensions`] is everything the parts
//! derive from them.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Ball bearing envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BearingSpec {
    pub height: f32,
    pub outer_diameter: f32,
    pub inner_diameter: f32,
}

impl Default for BearingSpec {
    /// 626 bearing: 6 x 19 x 6
    fn default() -> Self {
        Self {
            height: 6.0,
            outer_diameter: 19.0,
            inner_diameter: 6.0,
        }
    }
}

/// User-facing parameters of the Geneva drive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenevaParams {
    /// Plate extent along Y
    pub base_width: f32,
    /// Plate extent along X
    pub base_length: f32,
    /// Diameter of the pins on the drive disk
    pub pin_diameter: f32,
    pub bearing: BearingSpec,
    pub plate_thickness: f32,
    /// Height of the pins on the drive disk
    pub pin_height: f32,
    pub lip_height: f32,
    /// Radial clearance between the locking disk and the wheel cut-outs
    pub disk_tolerance: f32,
    /// How far a bearing sinks below the part it carries
    pub bearing_plate_offset: f32,
    /// Diameter of the axle pins on the plate
    pub plate_pin_diameter: f32,
    /// Diameter of the spacer lips under each bearing
    pub plate_lip_diameter: f32,
    /// Corner radius of the plate
    pub fillet_radius: f32,
    pub disk_thickness: f32,
    /// Locking circle diameter as a fraction of the disk diameter
    pub sliding_circle_ratio: f32,
    /// Turning pin position as a fraction of the locking circle radius
    pub turning_pin_ratio: f32,
    /// Extra slot width over the drive pin diameter
    pub slot_clearance: f32,
    /// Wheel thickness above the bearing
    pub cross_extra_thickness: f32,
    /// Material left above the wheel bearing bore
    pub bearing_hole_floor: f32,
    /// Number of slots in the wheel
    pub slot_count: u32,
}

impl Default for GenevaParams {
    fn default() -> Self {
        Self {
            base_width: 50.0,
            base_length: 100.0,
            pin_diameter: 4.0,
            bearing: BearingSpec::default(),
            plate_thickness: 2.0,
            pin_height: 8.0,
            lip_height: 2.0,
            disk_tolerance: 0.5,
            bearing_plate_offset: 3.0,
            plate_pin_diameter: 6.0,
            plate_lip_diameter: 8.0,
            fillet_radius: 5.0,
            disk_thickness: 5.0,
            sliding_circle_ratio: 0.8,
            turning_pin_ratio: 0.8,
            slot_clearance: 1.0,
            cross_extra_thickness: 1.0,
            bearing_hole_floor: 1.0,
            slot_count: 4,
        }
    }
}

/// Parameter validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must lie in (0, 1], got {value}")]
    RatioOutOfRange { name: &'static str, value: f32 },
    #[error("Bearing bore {inner} must be smaller than its outer diameter {outer}")]
    BearingBore { inner: f32, outer: f32 },
    #[error("Bearing offset {offset} must be less than the bearing height {height}")]
    BearingOffset { offset: f32, height: f32 },
    #[error("A Geneva wheel needs at least 3 slots, got {0}")]
    SlotCount(u32),
    #[error("Derived slot length {0} is not positive")]
    SlotLength(f32),
    #[error("Plate pins at +/-{spacing} do not fit on a plate {length} long")]
    PinSpacing { spacing: f32, length: f32 },
    #[error("Plate pin diameter {pin} exceeds its lip diameter {lip}")]
    PinLargerThanLip { pin: f32, lip: f32 },
    #[error("Fillet radius {radius} exceeds half the shorter plate side {side}")]
    Fillet { radius: f32, side: f32 },
    #[error("Disk geometry is inconsistent: {0}")]
    Disk(String),
}

/// Dimensions of the slotted wheel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossDimensions {
    /// Outer diameter of the wheel
    pub width: f32,
    /// Distance of the locking cut-out centers from the wheel axis
    pub cut_offset: f32,
    pub cut_radius: f32,
    /// Radius at which a slot opens
    pub slot_start_offset: f32,
    /// Radius of the slot centers
    pub center_slot_offset: f32,
    pub slot_length: f32,
    pub slot_width: f32,
    pub thickness: f32,
    /// Depth of the bearing bore from the underside
    pub bearing_hole_depth: f32,
}

/// Dimensions of the drive disk
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiskDimensions {
    pub thickness: f32,
    pub step_height: f32,
    /// Depth of the bearing pocket on the underside
    pub pocket_depth: f32,
    pub pocket_radius: f32,
    /// Radius of the lower step (the disk itself)
    pub lower_radius: f32,
    /// Radius of the upper locking step
    pub upper_radius: f32,
    /// Radial position of the turning pin on the top face
    pub turning_pin_offset: f32,
}

/// Everything the parts derive from [`GenevaParams`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    /// Distance between the disk and wheel axes
    pub pin_distance: f32,
    /// Radius of the sliding pin on the drive disk
    pub crank_radius: f32,
    pub disk_diameter: f32,
    pub sliding_circle_diameter: f32,
    /// Height at which the drive disk sits above the plate origin
    pub circles_part_height: f32,
    /// Height at which the wheel sits above the plate origin
    pub cross_part_height: f32,
    pub disk: DiskDimensions,
    pub cross: CrossDimensions,
}

impl GenevaParams {
    /// Check every invariant the parts rely on
    pub fn validate(&self) -> Result<(), ParamsError> {
        let lengths = [
            ("base_width", self.base_width),
            ("base_length", self.base_length),
            ("pin_diameter", self.pin_diameter),
            ("bearing.height", self.bearing.height),
            ("bearing.outer_diameter", self.bearing.outer_diameter),
            ("bearing.inner_diameter", self.bearing.inner_diameter),
            ("plate_thickness", self.plate_thickness),
            ("pin_height", self.pin_height),
            ("lip_height", self.lip_height),
            ("bearing_plate_offset", self.bearing_plate_offset),
            ("plate_pin_diameter", self.plate_pin_diameter),
            ("plate_lip_diameter", self.plate_lip_diameter),
            ("disk_thickness", self.disk_thickness),
            ("slot_clearance", self.slot_clearance),
            ("cross_extra_thickness", self.cross_extra_thickness),
            ("bearing_hole_floor", self.bearing_hole_floor),
        ];
        for (name, value) in lengths {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ParamsError::NotPositive { name, value });
            }
        }
        if !(self.disk_tolerance >= 0.0 && self.disk_tolerance.is_finite()) {
            return Err(ParamsError::NotPositive {
                name: "disk_tolerance",
                value: self.disk_tolerance,
            });
        }
        if !(self.fillet_radius >= 0.0 && self.fillet_radius.is_finite()) {
            return Err(ParamsError::NotPositive {
                name: "fillet_radius",
                value: self.fillet_radius,
            });
        }
        for (name, value) in [
            ("sliding_circle_ratio", self.sliding_circle_ratio),
            ("turning_pin_ratio", self.turning_pin_ratio),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ParamsError::RatioOutOfRange { name, value });
            }
        }

        if self.bearing.inner_diameter >= self.bearing.outer_diameter {
            return Err(ParamsError::BearingBore {
                inner: self.bearing.inner_diameter,
                outer: self.bearing.outer_diameter,
            });
        }
        if self.bearing_plate_offset >= self.bearing.height {
            return Err(ParamsError::BearingOffset {
                offset: self.bearing_plate_offset,
                height: self.bearing.height,
            });
        }
        if self.slot_count < 3 {
            return Err(ParamsError::SlotCount(self.slot_count));
        }
        if self.plate_pin_diameter > self.plate_lip_diameter {
            return Err(ParamsError::PinLargerThanLip {
                pin: self.plate_pin_diameter,
                lip: self.plate_lip_diameter,
            });
        }
        let side = self.base_width.min(self.base_length);
        if self.fillet_radius * 2.0 > side {
            return Err(ParamsError::Fillet {
                radius: self.fillet_radius,
                side,
            });
        }

        let dims = self.dimensions();
        let spacing = dims.pin_distance / 2.0 + self.plate_lip_diameter / 2.0;
        if spacing > self.base_length / 2.0 {
            return Err(ParamsError::PinSpacing {
                spacing,
                length: self.base_length,
            });
        }
        if dims.cross.slot_length <= 0.0 {
            return Err(ParamsError::SlotLength(dims.cross.slot_length));
        }

        let disk = dims.disk;
        if disk.pocket_depth >= disk.thickness {
            return Err(ParamsError::Disk(format!(
                "bearing pocket depth {} reaches through the disk thickness {}",
                disk.pocket_depth, disk.thickness
            )));
        }
        if !(disk.pocket_radius < disk.upper_radius && disk.upper_radius < disk.lower_radius) {
            return Err(ParamsError::Disk(format!(
                "radii must grow outwards: pocket {}, upper step {}, lower step {}",
                disk.pocket_radius, disk.upper_radius, disk.lower_radius
            )));
        }
        if dims.cross.bearing_hole_depth <= 0.0 {
            return Err(ParamsError::Disk(format!(
                "wheel thickness {} leaves no room for the bearing bore",
                dims.cross.thickness
            )));
        }
        Ok(())
    }

    /// Compute derived dimensions
    pub fn dimensions(&self) -> Dimensions {
        let pin_distance = self.base_length * 0.5;
        let crank_radius = pin_distance * (PI / self.slot_count.max(1) as f32).sin();
        let disk_diameter = 2.0 * crank_radius + self.pin_diameter;
        let sliding_circle_diameter = disk_diameter * self.sliding_circle_ratio;
        let circles_part_height = self.plate_thickness + self.lip_height + self.bearing_plate_offset;
        let cross_part_height = circles_part_height + self.plate_thickness;

        let step_height = self.disk_thickness / 2.0;
        let disk = DiskDimensions {
            thickness: self.disk_thickness,
            step_height,
            pocket_depth: self.bearing.height - self.bearing_plate_offset,
            pocket_radius: self.bearing.outer_diameter / 2.0,
            lower_radius: disk_diameter / 2.0,
            upper_radius: (sliding_circle_diameter - self.disk_tolerance) / 2.0,
            turning_pin_offset: self.turning_pin_ratio * sliding_circle_diameter / 2.0,
        };

        let width = sliding_circle_diameter;
        let slot_start_offset = pin_distance - disk_diameter / 2.0;
        let center_slot_offset = width / 2.0;
        let thickness =
            self.cross_extra_thickness + self.bearing.height - self.bearing_plate_offset;
        let cross = CrossDimensions {
            width,
            cut_offset: pin_distance,
            cut_radius: sliding_circle_diameter / 2.0,
            slot_start_offset,
            center_slot_offset,
            slot_length: (center_slot_offset - slot_start_offset) * 2.0,
            slot_width: self.pin_diameter + self.slot_clearance,
            thickness,
            bearing_hole_depth: thickness - self.bearing_hole_floor,
        };

        Dimensions {
            pin_distance,
            crank_radius,
            disk_diameter,
            sliding_circle_diameter,
            circles_part_height,
            cross_part_height,
            disk,
            cross,
        }
    }
}
