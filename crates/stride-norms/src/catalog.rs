use serde::{Deserialize, Serialize};
use ts_rs::TS;

use stride_core::models::value::{Bilateral, MeasurementValue};
use stride_core::models::visit::Visit;

use crate::error::NormsError;

/// The seven physiological domains, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DomainId {
    Clinimetrics,
    Flexibility,
    Balance,
    Gait,
    Endurance,
    Aerobic,
    Power,
}

impl DomainId {
    pub const ALL: [DomainId; 7] = [
        DomainId::Clinimetrics,
        DomainId::Flexibility,
        DomainId::Balance,
        DomainId::Gait,
        DomainId::Endurance,
        DomainId::Aerobic,
        DomainId::Power,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DomainId::Clinimetrics => "Clinimetrics",
            DomainId::Flexibility => "Flexibility",
            DomainId::Balance => "Balance",
            DomainId::Gait => "Gait",
            DomainId::Endurance => "Endurance",
            DomainId::Aerobic => "Aerobic",
            DomainId::Power => "Power",
        }
    }

    /// Measurement keys of this domain, in the fixed order both scoring
    /// and comparison reports iterate.
    pub fn measurements(&self) -> &'static [MeasurementKey] {
        use MeasurementKey::*;
        match self {
            DomainId::Clinimetrics => &[Bmi, Waist, Obp, Grip],
            DomainId::Flexibility => &[BackScratch, SitAndReach, ShoulderFlexion],
            DomainId::Balance => &[
                SingleLegEyesOpen,
                SingleLegEyesClosed,
                FunctionalReach,
                PosturalSway,
            ],
            DomainId::Gait => &[GaitSpeed, Tug, TugDualTask, StepReaction],
            DomainId::Endurance => &[ChairStand30, ArmCurl30, WallSit],
            DomainId::Aerobic => &[WalkDistance, StepTest2],
            DomainId::Power => &[StairClimbPower, SitToStand5, VerticalJump],
        }
    }

    /// Free-text comments recorded for this domain on a visit.
    pub fn comments<'a>(&self, visit: &'a Visit) -> &'a str {
        match self {
            DomainId::Clinimetrics => &visit.clinimetrics.comments,
            DomainId::Flexibility => &visit.flexibility.comments,
            DomainId::Balance => &visit.balance.comments,
            DomainId::Gait => &visit.gait.comments,
            DomainId::Endurance => &visit.endurance.comments,
            DomainId::Aerobic => &visit.aerobic.comments,
            DomainId::Power => &visit.power.comments,
        }
    }
}

/// Whether a measurement is recorded once or once per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Cardinality {
    Single,
    Bilateral,
}

/// The value shape a measurement records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValueShape {
    /// Plain finite number.
    Plain,
    /// Distance plus a 2-minute/6-minute protocol variant.
    WalkDistance,
    /// Repetitions plus the resistance the test was administered with.
    WeightedReps,
}

/// Physiologically recordable bounds for a measurement; entries outside
/// them are data-entry errors, not clinical findings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlausibleRange {
    pub min: f64,
    pub max: f64,
}

impl PlausibleRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A measurement read off a visit: one value, or an independent pair.
pub enum Recorded<'a> {
    Single(&'a MeasurementValue),
    Bilateral(&'a Bilateral),
}

/// Every measurement the instrument defines. Closed: the resolver, scorer,
/// and comparison builder all dispatch on this enum exhaustively, so a new
/// measurement cannot be added without a label, shape, and normative table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MeasurementKey {
    // Clinimetrics
    Bmi,
    Waist,
    Obp,
    Grip,
    // Flexibility
    BackScratch,
    SitAndReach,
    ShoulderFlexion,
    // Balance
    SingleLegEyesOpen,
    SingleLegEyesClosed,
    FunctionalReach,
    PosturalSway,
    // Gait
    GaitSpeed,
    Tug,
    TugDualTask,
    StepReaction,
    // Endurance
    ChairStand30,
    ArmCurl30,
    WallSit,
    // Aerobic
    WalkDistance,
    StepTest2,
    // Power
    StairClimbPower,
    SitToStand5,
    VerticalJump,
}

impl MeasurementKey {
    pub const ALL: [MeasurementKey; 23] = [
        MeasurementKey::Bmi,
        MeasurementKey::Waist,
        MeasurementKey::Obp,
        MeasurementKey::Grip,
        MeasurementKey::BackScratch,
        MeasurementKey::SitAndReach,
        MeasurementKey::ShoulderFlexion,
        MeasurementKey::SingleLegEyesOpen,
        MeasurementKey::SingleLegEyesClosed,
        MeasurementKey::FunctionalReach,
        MeasurementKey::PosturalSway,
        MeasurementKey::GaitSpeed,
        MeasurementKey::Tug,
        MeasurementKey::TugDualTask,
        MeasurementKey::StepReaction,
        MeasurementKey::ChairStand30,
        MeasurementKey::ArmCurl30,
        MeasurementKey::WallSit,
        MeasurementKey::WalkDistance,
        MeasurementKey::StepTest2,
        MeasurementKey::StairClimbPower,
        MeasurementKey::SitToStand5,
        MeasurementKey::VerticalJump,
    ];

    pub fn domain(&self) -> DomainId {
        use MeasurementKey::*;
        match self {
            Bmi | Waist | Obp | Grip => DomainId::Clinimetrics,
            BackScratch | SitAndReach | ShoulderFlexion => DomainId::Flexibility,
            SingleLegEyesOpen | SingleLegEyesClosed | FunctionalReach | PosturalSway => {
                DomainId::Balance
            }
            GaitSpeed | Tug | TugDualTask | StepReaction => DomainId::Gait,
            ChairStand30 | ArmCurl30 | WallSit => DomainId::Endurance,
            WalkDistance | StepTest2 => DomainId::Aerobic,
            StairClimbPower | SitToStand5 | VerticalJump => DomainId::Power,
        }
    }

    pub fn label(&self) -> &'static str {
        use MeasurementKey::*;
        match self {
            Bmi => "Body Mass Index",
            Waist => "Waist Circumference (cm)",
            Obp => "Orthostatic BP Drop (mmHg)",
            Grip => "Grip Strength (lb)",
            BackScratch => "Back Scratch (in)",
            SitAndReach => "Chair Sit-and-Reach (in)",
            ShoulderFlexion => "Shoulder Flexion (deg)",
            SingleLegEyesOpen => "Single-Leg Stand, Eyes Open (s)",
            SingleLegEyesClosed => "Single-Leg Stand, Eyes Closed (s)",
            FunctionalReach => "Functional Reach (cm)",
            PosturalSway => "Postural Sway (mm)",
            GaitSpeed => "Gait Speed (m/s)",
            Tug => "Timed Up-and-Go (s)",
            TugDualTask => "TUG Dual-Task (s)",
            StepReaction => "Step Reaction Time (ms)",
            ChairStand30 => "30-Second Chair Stand (reps)",
            ArmCurl30 => "30-Second Arm Curl (reps)",
            WallSit => "Wall Sit (s)",
            WalkDistance => "Total Walk Distance (m)",
            StepTest2 => "2-Minute Step Test (steps)",
            StairClimbPower => "Stair Climb Power (W)",
            SitToStand5 => "Five-Times Sit-to-Stand (s)",
            VerticalJump => "Vertical Jump (cm)",
        }
    }

    /// Short code used by stored records and the API surface.
    pub fn code(&self) -> &'static str {
        use MeasurementKey::*;
        match self {
            Bmi => "bmi",
            Waist => "waist",
            Obp => "obp",
            Grip => "grip",
            BackScratch => "bscratch",
            SitAndReach => "snr",
            ShoulderFlexion => "shflex",
            SingleLegEyesOpen => "slseo",
            SingleLegEyesClosed => "slsec",
            FunctionalReach => "freach",
            PosturalSway => "sway",
            GaitSpeed => "gspeed",
            Tug => "tug",
            TugDualTask => "tugdt",
            StepReaction => "srt",
            ChairStand30 => "cs30",
            ArmCurl30 => "acurl",
            WallSit => "wsit",
            WalkDistance => "twd",
            StepTest2 => "step2",
            StairClimbPower => "scp",
            SitToStand5 => "sts5",
            VerticalJump => "vjump",
        }
    }

    /// Direct catalog lookup by short code. Unknown codes are an error
    /// here; use `NormativeTables::resolve_code` for the tolerant path.
    pub fn from_code(code: &str) -> Result<MeasurementKey, NormsError> {
        MeasurementKey::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or_else(|| NormsError::UnknownMeasurement(code.to_string()))
    }

    pub fn cardinality(&self) -> Cardinality {
        use MeasurementKey::*;
        match self {
            Grip | BackScratch | SitAndReach | SingleLegEyesOpen | SingleLegEyesClosed
            | ArmCurl30 => Cardinality::Bilateral,
            _ => Cardinality::Single,
        }
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            MeasurementKey::WalkDistance => ValueShape::WalkDistance,
            MeasurementKey::ArmCurl30 => ValueShape::WeightedReps,
            _ => ValueShape::Plain,
        }
    }

    pub fn plausible_range(&self) -> PlausibleRange {
        use MeasurementKey::*;
        let (min, max) = match self {
            Bmi => (10.0, 60.0),
            Waist => (40.0, 200.0),
            Obp => (0.0, 120.0),
            Grip => (0.0, 250.0),
            BackScratch => (-30.0, 15.0),
            SitAndReach => (-30.0, 15.0),
            ShoulderFlexion => (0.0, 180.0),
            SingleLegEyesOpen => (0.0, 120.0),
            SingleLegEyesClosed => (0.0, 120.0),
            FunctionalReach => (0.0, 60.0),
            PosturalSway => (0.0, 200.0),
            GaitSpeed => (0.0, 3.0),
            Tug => (2.0, 120.0),
            TugDualTask => (2.0, 180.0),
            StepReaction => (200.0, 5000.0),
            ChairStand30 => (0.0, 60.0),
            ArmCurl30 => (0.0, 60.0),
            WallSit => (0.0, 600.0),
            WalkDistance => (0.0, 1200.0),
            StepTest2 => (0.0, 250.0),
            StairClimbPower => (0.0, 600.0),
            SitToStand5 => (2.0, 120.0),
            VerticalJump => (0.0, 60.0),
        };
        PlausibleRange { min, max }
    }

    /// Read this measurement's recorded value(s) off a visit snapshot.
    pub fn read<'a>(&self, visit: &'a Visit) -> Recorded<'a> {
        use MeasurementKey::*;
        match self {
            Bmi => Recorded::Single(&visit.clinimetrics.bmi),
            Waist => Recorded::Single(&visit.clinimetrics.waist),
            Obp => Recorded::Single(&visit.clinimetrics.obp),
            Grip => Recorded::Bilateral(&visit.clinimetrics.grip),
            BackScratch => Recorded::Bilateral(&visit.flexibility.bscratch),
            SitAndReach => Recorded::Bilateral(&visit.flexibility.snr),
            ShoulderFlexion => Recorded::Single(&visit.flexibility.shflex),
            SingleLegEyesOpen => Recorded::Bilateral(&visit.balance.slseo),
            SingleLegEyesClosed => Recorded::Bilateral(&visit.balance.slsec),
            FunctionalReach => Recorded::Single(&visit.balance.freach),
            PosturalSway => Recorded::Single(&visit.balance.sway),
            GaitSpeed => Recorded::Single(&visit.gait.gspeed),
            Tug => Recorded::Single(&visit.gait.tug),
            TugDualTask => Recorded::Single(&visit.gait.tugdt),
            StepReaction => Recorded::Single(&visit.gait.srt),
            ChairStand30 => Recorded::Single(&visit.endurance.cs30),
            ArmCurl30 => Recorded::Bilateral(&visit.endurance.acurl),
            WallSit => Recorded::Single(&visit.endurance.wsit),
            WalkDistance => Recorded::Single(&visit.aerobic.twd),
            StepTest2 => Recorded::Single(&visit.aerobic.step2),
            StairClimbPower => Recorded::Single(&visit.power.scp),
            SitToStand5 => Recorded::Single(&visit.power.sts5),
            VerticalJump => Recorded::Single(&visit.power.vjump),
        }
    }
}
