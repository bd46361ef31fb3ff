use assert_matches::assert_matches;
use proptest::prelude::*;

use curvesweep::{
    intersect::{crossings, meeting_point},
    CurveDesc, CurveIdx, Curves, Error, Event, EventKind, Point, Sweeper,
};

fn sweep(descs: &[CurveDesc]) -> Sweeper {
    let mut s = Sweeper::from_descs(descs.iter().copied()).unwrap();
    s.check_invariants();
    while s.step().is_ok() {
        s.check_invariants();
    }
    s
}

#[test]
fn lines_crossing_at_the_origin() {
    let s = sweep(&[
        CurveDesc::line(1.0, 0.0, -5.0, 5.0),
        CurveDesc::line(-1.0, 0.0, -5.0, 5.0),
    ]);
    assert_eq!(s.intersections(), &[Point::new(0.0, 0.0)]);
}

#[test]
fn parallel_lines() {
    let s = sweep(&[
        CurveDesc::line(1.0, 0.0, -5.0, 5.0),
        CurveDesc::line(1.0, 1.0, -5.0, 5.0),
    ]);
    assert!(s.intersections().is_empty());
}

#[test]
fn parabola_cut_by_a_line() {
    let s = sweep(&[
        CurveDesc::new(1.0, 0.0, 0.0, -2.0, 2.0),
        CurveDesc::line(0.0, 1.0, -2.0, 2.0),
    ]);
    let xs: Vec<f64> = s.intersections().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![-1.0, 1.0]);
}

#[test]
fn parabola_below_a_line() {
    let s = sweep(&[
        CurveDesc::new(1.0, 0.0, 0.0, -1.0, 1.0),
        CurveDesc::line(0.0, 10.0, -1.0, 1.0),
    ]);
    assert!(s.intersections().is_empty());
}

#[test]
fn separated_crossing_is_dropped() {
    // 0 and 2 would cross at x = 3, but 1 gets between them first.
    let mut s = Sweeper::from_descs([
        CurveDesc::line(-1.0, 4.0, 0.0, 6.0),
        CurveDesc::line(1.0, 0.0, 0.0, 6.0),
        CurveDesc::line(0.0, 1.0, 0.0, 6.0),
    ])
    .unwrap();

    for _ in 0..3 {
        assert_eq!(s.step().unwrap().kind, EventKind::Start);
    }
    assert_eq!(s.active(), &[CurveIdx(0), CurveIdx(2), CurveIdx(1)]);

    let report = s.step().unwrap();
    assert_eq!(report.kind, EventKind::Intersection);
    assert_eq!(report.x, 1.0);
    assert_eq!(s.active(), &[CurveIdx(0), CurveIdx(1), CurveIdx(2)]);
    let crossing_xs: Vec<f64> = s
        .pending()
        .filter(|ev| ev.kind() == EventKind::Intersection)
        .map(Event::x)
        .collect();
    assert_eq!(crossing_xs, vec![2.0]);

    s.run();
    s.check_invariants();
    assert_eq!(
        s.intersections(),
        &[
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 1.0)
        ]
    );
}

#[test]
fn stepping_past_the_end() {
    let mut s = Sweeper::from_descs([CurveDesc::line(0.0, 0.0, 0.0, 1.0)]).unwrap();
    s.run();
    let x = s.x();
    assert_eq!(s.step(), Err(Error::EmptyQueue));
    assert_eq!(s.step(), Err(Error::EmptyQueue));
    assert_eq!(s.x(), x);
}

#[test]
fn snapshot_json() {
    let mut s = Sweeper::from_descs([
        CurveDesc::line(1.0, 0.0, -1.0, 1.0),
        CurveDesc::line(-1.0, 0.0, -1.0, 1.0),
    ])
    .unwrap();
    s.step().unwrap();
    s.step().unwrap();

    let snapshot = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(snapshot["x"], -1.0);
    assert_eq!(snapshot["active"], serde_json::json!([1, 0]));
    assert_matches!(snapshot["pending"].as_array(), Some(pending) if pending.len() == 3);
    assert_eq!(
        snapshot["pending"][0]["Intersection"]["at"],
        serde_json::json!({ "x": 0.0, "y": 0.0 })
    );
}

fn desc() -> impl Strategy<Value = CurveDesc> {
    (
        prop_oneof![Just(0.0), -4.0..4.0],
        -10.0..10.0,
        -10.0..10.0,
        -10.0..10.0,
        0.1..20.0,
    )
        .prop_map(|(a, b, c, t1, len)| CurveDesc::new(a, b, c, t1, t1 + len))
}

// Short lines with slopes -1, 0 and 1 and integer offsets and endpoints.
// All their crossings are at exactly representable points, and they often
// meet three at a time, overlap, or start and end on one another.
fn grid_line() -> impl Strategy<Value = CurveDesc> {
    (-1i32..=1, -3i32..=3, -4i32..=3, 1i32..=4).prop_map(|(b, c, t1, len)| {
        CurveDesc::line(f64::from(b), f64::from(c), f64::from(t1), f64::from(t1 + len))
    })
}

// The number of places where two curves meet, checking every pair. A meeting
// at the point where one of the curves starts isn't a crossing.
fn brute_force_count(descs: &[CurveDesc]) -> usize {
    let curves = Curves::from_descs(descs.iter().copied()).unwrap();
    let mut count = 0;
    for i in curves.indices() {
        for j in curves.indices().filter(|&j| j > i) {
            let (ci, cj) = (&curves[i], &curves[j]);
            count += crossings(ci, cj, ci.t1().max(cj.t1())).len();
        }
    }
    count
}

proptest! {
    #[test]
    fn finds_every_crossing(descs in prop::collection::vec(desc(), 0..12)) {
        let s = sweep(&descs);
        if s.unresolved().is_empty() {
            prop_assert_eq!(s.intersections().len(), brute_force_count(&descs));
        }
    }

    #[test]
    fn degenerate_meetings_are_reported(descs in prop::collection::vec(grid_line(), 0..10)) {
        let s = sweep(&descs);
        prop_assert!(
            s.intersections().len() == brute_force_count(&descs) || !s.unresolved().is_empty(),
            "found {:?} with nothing unresolved",
            s.intersections()
        );
    }

    #[test]
    fn sweep_invariants(descs in prop::collection::vec(desc(), 0..12)) {
        let s = sweep(&descs);
        prop_assert!(s.active().is_empty());
        prop_assert!(s.is_done());
    }

    #[test]
    fn only_real_crossings(descs in prop::collection::vec(desc(), 0..12)) {
        let s = sweep(&descs);
        let curves = Curves::from_descs(descs.iter().copied()).unwrap();
        let mut possible = Vec::new();
        for i in curves.indices() {
            for j in curves.indices().filter(|&j| j > i) {
                let (ci, cj) = (&curves[i], &curves[j]);
                for t in crossings(ci, cj, f64::NEG_INFINITY) {
                    possible.push(meeting_point(ci, cj, t));
                }
            }
        }

        prop_assert!(s.intersections().len() <= possible.len());
        for p in s.intersections() {
            prop_assert!(possible.contains(p), "{p:?} isn't a crossing");
        }
    }
}
