use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use stride_core::models::patient::Gender;

use crate::catalog::MeasurementKey;

/// Clinically expected band for one measurement at one age/gender. At most
/// one shape is populated per table entry, except that an advisory `text`
/// may accompany a numeric bound; display always prefers the text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormativeRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl NormativeRange {
    pub fn at_least(min: f64) -> Self {
        NormativeRange {
            min: Some(min),
            ..Default::default()
        }
    }

    pub fn at_most(max: f64) -> Self {
        NormativeRange {
            max: Some(max),
            ..Default::default()
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        NormativeRange {
            min: Some(min),
            max: Some(max),
            text: None,
        }
    }

    /// A range stated as a rule of thumb rather than numeric bounds.
    pub fn advisory(text: &str) -> Self {
        NormativeRange {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    /// Attach an advisory display text to a numeric range.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// "No normative comparison available" — the tolerant result for
    /// measurement codes the catalog does not know.
    pub fn empty() -> Self {
        NormativeRange::default()
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.text.is_none()
    }
}

/// One age band: applies to every age in `[from_age, ∞)` until shadowed by
/// an older band listed before it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeBand {
    pub from_age: i16,
    pub range: NormativeRange,
}

fn band(from_age: i16, range: NormativeRange) -> AgeBand {
    AgeBand { from_age, range }
}

/// Band lists for one measurement, split by gender where the instrument's
/// norms differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderBands {
    Shared(Vec<AgeBand>),
    ByGender {
        male: Vec<AgeBand>,
        female: Vec<AgeBand>,
    },
}

impl GenderBands {
    pub fn for_gender(&self, gender: Gender) -> &[AgeBand] {
        match self {
            GenderBands::Shared(bands) => bands,
            GenderBands::ByGender { male, female } => match gender {
                Gender::Male => male,
                Gender::Female => female,
            },
        }
    }

    fn lists(&self) -> Vec<&[AgeBand]> {
        match self {
            GenderBands::Shared(bands) => vec![bands],
            GenderBands::ByGender { male, female } => vec![male, female],
        }
    }
}

/// The complete normative reference table: one band set per catalog key.
///
/// Built once at startup (or injected for tests and future pediatric
/// extensions) and never mutated; the resolver reads it as a value, not
/// as global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormativeTables {
    bands: BTreeMap<MeasurementKey, GenderBands>,
}

impl NormativeTables {
    /// Process-wide standard instrument tables.
    pub fn standard() -> &'static NormativeTables {
        static STANDARD: LazyLock<NormativeTables> = LazyLock::new(|| {
            let tables = NormativeTables::build_standard();
            debug_assert!(tables.verify().is_empty(), "{:?}", tables.verify());
            tables
        });
        &STANDARD
    }

    pub fn new(bands: BTreeMap<MeasurementKey, GenderBands>) -> Self {
        NormativeTables { bands }
    }

    pub(crate) fn bands_for(&self, key: MeasurementKey) -> Option<&GenderBands> {
        self.bands.get(&key)
    }

    fn build_standard() -> NormativeTables {
        let mut bands = BTreeMap::new();
        // Exhaustive over the catalog: a key without a table entry cannot
        // compile its way in here silently.
        for key in MeasurementKey::ALL {
            bands.insert(key, standard_bands(key));
        }
        NormativeTables { bands }
    }

    /// Structural invariant check: every band list is ordered oldest-first
    /// and terminates in a `from_age: 0` baseline, so lookup is total over
    /// non-negative ages with no gap and no overlap.
    pub fn verify(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (key, gender_bands) in &self.bands {
            for list in gender_bands.lists() {
                match list.last() {
                    None => problems.push(format!("{key:?}: empty band list")),
                    Some(last) if last.from_age != 0 => {
                        problems.push(format!("{key:?}: no baseline band (last from_age {})", last.from_age));
                    }
                    Some(_) => {}
                }
                for pair in list.windows(2) {
                    if pair[0].from_age <= pair[1].from_age {
                        problems.push(format!(
                            "{key:?}: bands out of order ({} then {})",
                            pair[0].from_age, pair[1].from_age
                        ));
                    }
                }
                for b in list {
                    if b.range.is_empty() {
                        problems.push(format!("{key:?}: empty range at from_age {}", b.from_age));
                    }
                }
            }
        }
        problems
    }
}

fn shared(bands: Vec<AgeBand>) -> GenderBands {
    GenderBands::Shared(bands)
}

fn by_gender(male: Vec<AgeBand>, female: Vec<AgeBand>) -> GenderBands {
    GenderBands::ByGender { male, female }
}

/// Standard adult normative bands per measurement. Lists are oldest-first;
/// the final `from_age: 0` band is the baseline-adult default the lookup
/// falls through to.
fn standard_bands(key: MeasurementKey) -> GenderBands {
    use MeasurementKey::*;
    use NormativeRange as R;
    match key {
        Bmi => shared(vec![band(0, R::between(18.5, 29.9))]),
        Waist => by_gender(
            vec![band(0, R::at_most(102.0))],
            vec![band(0, R::at_most(88.0))],
        ),
        Obp => shared(vec![band(0, R::advisory("≤ 20/10 mmHg drop"))]),
        Grip => by_gender(
            vec![
                band(85, R::at_least(60.0)),
                band(80, R::at_least(68.0)),
                band(75, R::at_least(74.0)),
                band(70, R::at_least(80.0)),
                band(65, R::at_least(88.0)),
                band(60, R::at_least(96.0)),
                band(0, R::at_least(105.0)),
            ],
            vec![
                band(85, R::at_least(40.0)),
                band(80, R::at_least(46.0)),
                band(75, R::at_least(52.0)),
                band(70, R::at_least(57.0)),
                band(65, R::at_least(62.0)),
                band(60, R::at_least(68.0)),
                band(0, R::at_least(74.0)),
            ],
        ),
        BackScratch => by_gender(
            vec![
                band(80, R::at_least(-8.0)),
                band(70, R::at_least(-6.5)),
                band(60, R::at_least(-5.5)),
                band(0, R::at_least(-4.0)),
            ],
            vec![
                band(80, R::at_least(-5.5)),
                band(70, R::at_least(-4.0)),
                band(60, R::at_least(-3.0)),
                band(0, R::at_least(-2.0)),
            ],
        ),
        SitAndReach => by_gender(
            vec![
                band(80, R::at_least(-5.5)),
                band(70, R::at_least(-3.5)),
                band(60, R::at_least(-2.5)),
                band(0, R::at_least(-0.5)),
            ],
            vec![
                band(80, R::at_least(-4.5)),
                band(70, R::at_least(-2.0)),
                band(60, R::at_least(-0.5)),
                band(0, R::at_least(0.5)),
            ],
        ),
        ShoulderFlexion => by_gender(
            vec![
                band(75, R::at_least(150.0)),
                band(60, R::at_least(160.0)),
                band(0, R::at_least(165.0)),
            ],
            vec![
                band(75, R::at_least(145.0)),
                band(60, R::at_least(155.0)),
                band(0, R::at_least(160.0)),
            ],
        ),
        SingleLegEyesOpen => by_gender(
            vec![
                band(80, R::at_least(5.0)),
                band(70, R::at_least(12.0)),
                band(60, R::at_least(22.0)),
                band(0, R::at_least(28.0)),
            ],
            vec![
                band(80, R::at_least(4.0)),
                band(70, R::at_least(11.0)),
                band(60, R::at_least(20.0)),
                band(0, R::at_least(27.0)),
            ],
        ),
        SingleLegEyesClosed => by_gender(
            vec![
                band(80, R::at_least(2.0)),
                band(70, R::at_least(3.0)),
                band(60, R::at_least(5.0)),
                band(0, R::at_least(8.0)),
            ],
            vec![
                band(80, R::at_least(2.0)),
                band(70, R::at_least(3.0)),
                band(60, R::at_least(4.0)),
                band(0, R::at_least(7.0)),
            ],
        ),
        FunctionalReach => by_gender(
            vec![
                band(75, R::at_least(26.0)),
                band(60, R::at_least(30.0)),
                band(0, R::at_least(33.0)),
            ],
            vec![
                band(75, R::at_least(24.0)),
                band(60, R::at_least(27.0)),
                band(0, R::at_least(30.0)),
            ],
        ),
        PosturalSway => shared(vec![
            band(75, R::at_most(30.0)),
            band(60, R::at_most(25.0)),
            band(0, R::at_most(20.0)),
        ]),
        GaitSpeed => by_gender(
            vec![
                band(85, R::at_least(0.8)),
                band(75, R::at_least(0.9)),
                band(65, R::at_least(1.0)),
                band(0, R::at_least(1.1)),
            ],
            vec![
                band(85, R::at_least(0.7)),
                band(75, R::at_least(0.85)),
                band(65, R::at_least(0.95)),
                band(0, R::at_least(1.05)),
            ],
        ),
        Tug => by_gender(
            vec![
                band(80, R::at_most(11.5)),
                band(70, R::at_most(9.9)),
                band(60, R::at_most(9.0)),
                band(0, R::at_most(8.5)),
            ],
            vec![
                band(80, R::at_most(12.0)),
                band(70, R::at_most(10.2)),
                band(60, R::at_most(9.4)),
                band(0, R::at_most(9.0)),
            ],
        ),
        TugDualTask => by_gender(
            vec![
                band(80, R::at_most(14.5)),
                band(70, R::at_most(12.5)),
                band(60, R::at_most(11.5)),
                band(0, R::at_most(11.0)),
            ],
            vec![
                band(80, R::at_most(15.0)),
                band(70, R::at_most(13.0)),
                band(60, R::at_most(12.0)),
                band(0, R::at_most(11.5)),
            ],
        ),
        StepReaction => shared(vec![band(
            0,
            R::at_most(1200.0).with_text("< 1200 ms"),
        )]),
        ChairStand30 => by_gender(
            vec![
                band(85, R::at_least(8.0)),
                band(75, R::at_least(10.0)),
                band(65, R::at_least(12.0)),
                band(0, R::at_least(14.0)),
            ],
            vec![
                band(85, R::at_least(7.0)),
                band(75, R::at_least(9.0)),
                band(65, R::at_least(11.0)),
                band(0, R::at_least(13.0)),
            ],
        ),
        ArmCurl30 => by_gender(
            vec![
                band(85, R::at_least(10.0)),
                band(75, R::at_least(13.0)),
                band(65, R::at_least(15.0)),
                band(0, R::at_least(16.0)),
            ],
            vec![
                band(85, R::at_least(9.0)),
                band(75, R::at_least(11.0)),
                band(65, R::at_least(13.0)),
                band(0, R::at_least(14.0)),
            ],
        ),
        WallSit => by_gender(
            vec![
                band(75, R::at_least(20.0)),
                band(65, R::at_least(30.0)),
                band(0, R::at_least(45.0)),
            ],
            vec![
                band(75, R::at_least(15.0)),
                band(65, R::at_least(25.0)),
                band(0, R::at_least(35.0)),
            ],
        ),
        WalkDistance => by_gender(
            vec![
                band(85, R::at_least(350.0)),
                band(75, R::at_least(420.0)),
                band(65, R::at_least(480.0)),
                band(0, R::at_least(520.0)),
            ],
            vec![
                band(85, R::at_least(310.0)),
                band(75, R::at_least(390.0)),
                band(65, R::at_least(450.0)),
                band(0, R::at_least(490.0)),
            ],
        ),
        StepTest2 => by_gender(
            vec![
                band(85, R::at_least(55.0)),
                band(75, R::at_least(70.0)),
                band(65, R::at_least(85.0)),
                band(0, R::at_least(95.0)),
            ],
            vec![
                band(85, R::at_least(50.0)),
                band(75, R::at_least(65.0)),
                band(65, R::at_least(80.0)),
                band(0, R::at_least(90.0)),
            ],
        ),
        StairClimbPower => by_gender(
            vec![
                band(75, R::at_least(110.0)),
                band(65, R::at_least(150.0)),
                band(0, R::at_least(180.0)),
            ],
            vec![
                band(75, R::at_least(80.0)),
                band(65, R::at_least(110.0)),
                band(0, R::at_least(135.0)),
            ],
        ),
        SitToStand5 => by_gender(
            vec![
                band(80, R::at_most(14.8)),
                band(70, R::at_most(12.6)),
                band(60, R::at_most(11.4)),
                band(0, R::at_most(10.0)),
            ],
            vec![
                band(80, R::at_most(15.5)),
                band(70, R::at_most(13.0)),
                band(60, R::at_most(11.8)),
                band(0, R::at_most(10.5)),
            ],
        ),
        VerticalJump => by_gender(
            vec![
                band(75, R::at_least(12.0)),
                band(65, R::at_least(17.0)),
                band(0, R::at_least(22.0)),
            ],
            vec![
                band(75, R::at_least(9.0)),
                band(65, R::at_least(13.0)),
                band(0, R::at_least(17.0)),
            ],
        ),
    }
}
