use jiff::civil::{date, Date};
use uuid::Uuid;

use stride_core::models::patient::{Gender, Patient};
use stride_core::models::value::{MeasurementValue, WalkProtocol};
use stride_core::models::visit::Visit;
use stride_norms::catalog::{DomainId, MeasurementKey};
use stride_report::build_comparison;
use stride_report::compare::ComparisonRow;
use stride_report::error::ReportError;

fn patient(dob: Date, gender: Gender) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        name: "A. Tester".to_string(),
        date_of_birth: dob,
        gender,
        external_record_id: None,
        created_at: jiff::Timestamp::UNIX_EPOCH,
        updated_at: jiff::Timestamp::UNIX_EPOCH,
    }
}

fn visit(patient: &Patient, on: Date) -> Visit {
    let json = serde_json::json!({
        "id": Uuid::new_v4(),
        "patient_id": patient.id,
        "date": on,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
    });
    serde_json::from_value(json).unwrap()
}

/// 29 measurement rows (bilateral keys emit a row per side) plus one
/// trailing comments row per domain.
const EXPECTED_ROWS: usize = 29 + 7;

#[test]
fn rows_follow_catalog_order_and_grouping() {
    // Born 1952-03-10; later visit 2024-06-01 → age 72.
    let p = patient(date(1952, 3, 10), Gender::Male);
    let v1 = visit(&p, date(2023, 11, 15));
    let v2 = visit(&p, date(2024, 6, 1));

    let rows = build_comparison(&p, &[v1, v2]).unwrap();
    assert_eq!(rows.len(), EXPECTED_ROWS);

    assert_eq!(rows[0].domain, DomainId::Clinimetrics);
    assert_eq!(rows[0].label, "Body Mass Index");
    assert_eq!(rows.last().unwrap().domain, DomainId::Power);
    assert_eq!(rows.last().unwrap().label, "Comments");

    // Domains never interleave.
    let mut seen = Vec::new();
    for row in &rows {
        if seen.last() != Some(&row.domain) {
            assert!(!seen.contains(&row.domain), "domain {:?} split apart", row.domain);
            seen.push(row.domain);
        }
    }
    assert_eq!(seen.len(), 7);
}

#[test]
fn bilateral_measurements_emit_a_row_per_side() {
    let p = patient(date(1952, 3, 10), Gender::Male);
    let mut v1 = visit(&p, date(2023, 11, 15));
    v1.clinimetrics.grip.left = MeasurementValue::Number(82.0);
    let v2 = visit(&p, date(2024, 6, 1));

    let rows = build_comparison(&p, &[v1, v2]).unwrap();
    let grip: Vec<&ComparisonRow> = rows
        .iter()
        .filter(|r| r.label.starts_with("Grip Strength"))
        .collect();
    assert_eq!(grip.len(), 2);
    assert_eq!(grip[0].label, "Grip Strength (lb) (L)");
    assert_eq!(grip[1].label, "Grip Strength (lb) (R)");
    // Age 72, male: the [70, 75) grip band.
    assert_eq!(grip[0].normative, "≥ 80");
    assert_eq!(grip[1].normative, "≥ 80");
    assert_eq!(grip[0].value_a, "82");
    assert_eq!(grip[0].value_b, "NT");
}

#[test]
fn nt_and_advisory_ranges_render_distinctly() {
    let p = patient(date(1950, 1, 1), Gender::Female);
    let v1 = visit(&p, date(2024, 2, 1));
    let mut v2 = visit(&p, date(2024, 8, 1));
    v2.gait.srt = MeasurementValue::Number(1040.0);
    v2.aerobic.twd = MeasurementValue::Walk {
        distance: 455.0,
        protocol: WalkProtocol::SixMinute,
    };

    let rows = build_comparison(&p, &[v1, v2]).unwrap();

    let srt = rows.iter().find(|r| r.label.starts_with("Step Reaction")).unwrap();
    assert_eq!(srt.normative, "< 1200 ms");
    assert_eq!(srt.value_a, "NT");
    assert_eq!(srt.value_b, "1040");

    let obp = rows.iter().find(|r| r.label.starts_with("Orthostatic")).unwrap();
    assert_eq!(obp.normative, "≤ 20/10 mmHg drop");

    let twd = rows.iter().find(|r| r.label.starts_with("Total Walk")).unwrap();
    assert_eq!(twd.value_b, "455 (6 min)");
}

#[test]
fn swapping_visits_swaps_only_the_value_columns() {
    let p = patient(date(1947, 7, 4), Gender::Female);
    let mut v1 = visit(&p, date(2023, 5, 1));
    v1.gait.tug = MeasurementValue::Number(10.9);
    let mut v2 = visit(&p, date(2024, 5, 1));
    v2.gait.tug = MeasurementValue::Number(9.7);

    let ab = build_comparison(&p, &[v1.clone(), v2.clone()]).unwrap();
    let ba = build_comparison(&p, &[v2, v1]).unwrap();

    assert_eq!(ab.len(), ba.len());
    for (x, y) in ab.iter().zip(&ba) {
        assert_eq!(x.label, y.label);
        assert_eq!(x.normative, y.normative);
        assert_eq!(x.value_a, y.value_b);
        assert_eq!(x.value_b, y.value_a);
    }
}

#[test]
fn comments_surface_as_one_trailing_row_per_domain() {
    let p = patient(date(1950, 1, 1), Gender::Male);
    let mut v1 = visit(&p, date(2024, 2, 1));
    v1.balance.comments = "Unsteady on foam surface.".to_string();
    let v2 = visit(&p, date(2024, 8, 1));

    let rows = build_comparison(&p, &[v1, v2]).unwrap();
    let comment_rows: Vec<&ComparisonRow> =
        rows.iter().filter(|r| r.label == "Comments").collect();
    assert_eq!(comment_rows.len(), 7);

    let balance = comment_rows
        .iter()
        .find(|r| r.domain == DomainId::Balance)
        .unwrap();
    assert_eq!(balance.normative, "-");
    assert_eq!(balance.value_a, "Unsteady on foam surface.");
    assert_eq!(balance.value_b, "-");

    // The comments row closes its domain group.
    for domain in DomainId::ALL {
        let last_of_domain = rows.iter().rev().find(|r| r.domain == domain).unwrap();
        assert_eq!(last_of_domain.label, "Comments");
    }
}

#[test]
fn one_visit_is_an_invalid_request() {
    let p = patient(date(1950, 1, 1), Gender::Male);
    let v1 = visit(&p, date(2024, 2, 1));

    let err = build_comparison(&p, &[v1]).unwrap_err();
    assert!(matches!(
        err,
        ReportError::InvalidComparisonRequest { supplied: 1 }
    ));
}

#[test]
fn three_visits_are_an_invalid_request() {
    let p = patient(date(1950, 1, 1), Gender::Male);
    let visits = vec![
        visit(&p, date(2024, 2, 1)),
        visit(&p, date(2024, 5, 1)),
        visit(&p, date(2024, 8, 1)),
    ];

    let err = build_comparison(&p, &visits).unwrap_err();
    assert!(matches!(
        err,
        ReportError::InvalidComparisonRequest { supplied: 3 }
    ));
}

#[test]
fn foreign_visit_is_a_patient_mismatch() {
    let p = patient(date(1950, 1, 1), Gender::Male);
    let other = patient(date(1962, 9, 30), Gender::Female);
    let v1 = visit(&p, date(2024, 2, 1));
    let stray = visit(&other, date(2024, 3, 1));
    let stray_id = stray.id;

    let err = build_comparison(&p, &[v1, stray]).unwrap_err();
    match err {
        ReportError::PatientMismatch {
            patient_id,
            visit_id,
        } => {
            assert_eq!(patient_id, p.id);
            assert_eq!(visit_id, stray_id);
        }
        other => panic!("expected PatientMismatch, got {other:?}"),
    }
}

#[test]
fn visit_before_birth_surfaces_invalid_age() {
    let p = patient(date(1990, 1, 1), Gender::Female);
    let v1 = visit(&p, date(1980, 1, 1));
    let v2 = visit(&p, date(1981, 1, 1));

    let err = build_comparison(&p, &[v1, v2]).unwrap_err();
    assert!(matches!(err, ReportError::Norms(_)));
}

#[test]
fn unknown_resolver_codes_still_format_as_dash() {
    use stride_norms::tables::NormativeTables;
    use stride_report::format::format_normative_range;

    let range = NormativeTables::standard()
        .resolve_code("vo2max", 70, Gender::Male)
        .unwrap();
    assert!(range.is_empty());
    assert_eq!(format_normative_range(&range), "-");

    // Known codes resolve to the catalog key's range.
    assert_eq!(
        NormativeTables::standard()
            .resolve_code("grip", 72, Gender::Male)
            .unwrap(),
        NormativeTables::standard()
            .resolve(MeasurementKey::Grip, 72, Gender::Male)
            .unwrap()
    );
}
