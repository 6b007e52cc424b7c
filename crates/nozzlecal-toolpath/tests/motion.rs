use nozzlecal_core::{Command, Point, PrinterConfiguration};
use nozzlecal_toolpath::{ExtrusionModel, GenerationSession};
use std::f64::consts::{FRAC_PI_4, SQRT_2};

const EPS: f64 = 1e-9;

fn flat_printer() -> PrinterConfiguration {
    PrinterConfiguration {
        rotation_degrees: 0.0,
        ..PrinterConfiguration::default()
    }
}

fn skewed_printer() -> PrinterConfiguration {
    let mut printer = PrinterConfiguration {
        center: Point::new(20.0, -10.0),
        rotation_degrees: 15.0,
        ..PrinterConfiguration::default()
    };
    printer.tools[0].x_offset = 0.3;
    printer.tools[0].y_offset = -0.2;
    printer
}

fn last_target(session: &GenerationSession<'_>) -> Point {
    let (x, y) = session
        .stream()
        .last()
        .and_then(Command::target)
        .expect("last command should be a motion");
    Point::new(x, y)
}

fn last_arc(session: &GenerationSession<'_>) -> (bool, Point, Point) {
    match session.stream().last() {
        Some(&Command::Arc {
            clockwise,
            x,
            y,
            i,
            j,
            ..
        }) => (clockwise, Point::new(x, y), Point::new(i, j)),
        other => panic!("expected an arc, got {:?}", other),
    }
}

#[test]
fn test_cursor_is_sum_of_deltas() {
    let printer = skewed_printer();
    let mut session = GenerationSession::new(&printer).unwrap();
    session.tool_change(0).unwrap();
    session.move_to(Point::new(5.0, 5.0));

    let deltas = [
        Point::new(3.0, 0.0),
        Point::new(0.0, -2.5),
        Point::new(-1.25, 4.0),
        Point::new(0.0, 0.0),
        Point::new(7.5, 7.5),
    ];
    let mut expected = Point::new(5.0, 5.0);
    for (i, delta) in deltas.iter().enumerate() {
        if i % 2 == 0 {
            session.line(*delta).unwrap();
        } else {
            session.move_by(*delta);
        }
        expected += *delta;
    }

    assert!(session.cursor().distance_to(expected) < EPS);
    // emitted position is offset and rotated, the cursor is not
    let emitted = last_target(&session);
    let transform = session.transform();
    let machine = transform.rotate_about_center(expected + Point::new(0.3, -0.2));
    assert!(emitted.distance_to(machine) < EPS);
    assert!(emitted.distance_to(expected) > 1.0);
}

#[test]
fn test_line_output() {
    let printer = flat_printer();
    let mut session = GenerationSession::new(&printer).unwrap();
    session.tool_change(0).unwrap();
    session.move_to(Point::ORIGIN);
    session.line(Point::new(10.0, 0.0)).unwrap();
    session.move_by(Point::new(0.0, 2.0));

    let lines: Vec<String> = session.stream().lines().collect();
    assert_eq!(
        lines,
        vec![
            "T1",
            "G1 X0.000 Y0.000 F1800",
            "G1 X10.000 Y0.000 E0.3659 F1800",
            "G1 X10.000 Y2.000",
        ]
    );
}

#[test]
fn test_offset_slot_shifts_output_only() {
    let mut printer = flat_printer();
    printer.tools[2].x_offset = 0.5;
    let mut session = GenerationSession::new(&printer).unwrap();
    session.set_offset_slot(2).unwrap();
    session.move_to(Point::new(1.0, 1.0));

    assert_eq!(
        session.stream().last().unwrap().to_string(),
        "G1 X1.500 Y1.000 F1800"
    );
    assert_eq!(session.cursor(), Point::new(1.0, 1.0));
}

#[test]
fn test_quarter_turn_center() {
    let printer = skewed_printer();
    let deltas = [
        Point::new(1.0, 1.0),
        Point::new(-0.375, 0.375),
        Point::new(0.375, -0.375),
        Point::new(2.0, 0.0),
    ];

    for delta in deltas {
        for clockwise in [true, false] {
            let mut session = GenerationSession::new(&printer).unwrap();
            session.tool_change(0).unwrap();
            session.move_to(Point::new(3.0, 4.0));
            let start = last_target(&session);

            session.quarter_turn(delta, clockwise).unwrap();
            let (cw, end, ij) = last_arc(&session);
            let center = start + ij;
            let radius = delta.length() / SQRT_2;

            assert_eq!(cw, clockwise);
            assert!((start.distance_to(center) - radius).abs() < EPS);
            assert!((end.distance_to(center) - radius).abs() < EPS);
            // subtends 90 degrees in the commanded sense
            assert!((start - center).dot(end - center).abs() < EPS);
            let sweep = (start - center).cross(end - center);
            assert_eq!(sweep < 0.0, clockwise);
        }
    }
}

#[test]
fn test_u_turn_center_is_midpoint() {
    let printer = skewed_printer();
    for delta in [Point::new(0.0, 0.75), Point::new(-1.0, 0.0)] {
        for clockwise in [true, false] {
            let mut session = GenerationSession::new(&printer).unwrap();
            session.tool_change(0).unwrap();
            session.move_to(Point::new(-2.0, 1.0));
            let start = last_target(&session);

            session.u_turn(delta, clockwise).unwrap();
            let (cw, end, ij) = last_arc(&session);
            let center = start + ij;
            let midpoint = (start + end) * 0.5;

            assert_eq!(cw, clockwise);
            assert!(center.distance_to(midpoint) < EPS);
            assert!((start.distance_to(center) - delta.length() / 2.0).abs() < EPS);
        }
    }
}

#[test]
fn test_arc_extrusion_uses_arc_length() {
    let printer = flat_printer();
    let model = ExtrusionModel::from_config(&printer);
    let mut session = GenerationSession::new(&printer).unwrap();
    session.tool_change(0).unwrap();
    session.move_to(Point::ORIGIN);
    session.quarter_turn(Point::new(1.0, 1.0), true).unwrap();

    match session.stream().last() {
        Some(&Command::Arc { e, x, y, .. }) => {
            let expected = model.feed_length_for_bead(FRAC_PI_4 * SQRT_2, &printer.tools[0]);
            assert!((e - expected).abs() < EPS);
            assert!((x - 1.0).abs() < EPS && (y - 1.0).abs() < EPS);
        }
        other => panic!("expected an arc, got {:?}", other),
    }
}

#[test]
fn test_square_traversal_order() {
    let printer = flat_printer();
    let mut session = GenerationSession::new(&printer).unwrap();
    session.tool_change(0).unwrap();
    session.move_to(Point::ORIGIN);
    session.square(Point::new(4.0, 2.0), true).unwrap();
    session.square(Point::new(4.0, 2.0), false).unwrap();

    let targets: Vec<(f64, f64)> = session
        .stream()
        .iter()
        .filter(|c| matches!(c, Command::Line { .. }))
        .filter_map(Command::target)
        .collect();
    assert_eq!(
        targets,
        vec![
            (4.0, 0.0),
            (4.0, 2.0),
            (0.0, 2.0),
            (0.0, 0.0),
            (0.0, 2.0),
            (4.0, 2.0),
            (4.0, 0.0),
            (0.0, 0.0),
        ]
    );
    assert_eq!(session.cursor(), Point::ORIGIN);
}

#[test]
fn test_retraction_output() {
    let printer = flat_printer();
    let mut session = GenerationSession::new(&printer).unwrap();
    session.tool_change(0).unwrap();
    session.retract().unwrap();
    session.reretract().unwrap();
    session.extrude(15.0);

    let lines: Vec<String> = session.stream().lines().skip(1).collect();
    assert_eq!(
        lines,
        vec![
            "G1 Z0.850 E-5.0000 F4800",
            "G1 Z0.350 E5.0000 F4800",
            "G1 E15.0000 F1800",
        ]
    );
}

#[test]
fn test_retraction_disabled_emits_nothing() {
    let printer = PrinterConfiguration {
        enable_retraction: false,
        ..flat_printer()
    };
    let mut session = GenerationSession::new(&printer).unwrap();
    session.retract().unwrap();
    session.reretract().unwrap();
    assert!(session.stream().is_empty());
}

#[test]
fn test_zero_length_line_is_not_an_error() {
    let printer = flat_printer();
    let mut session = GenerationSession::new(&printer).unwrap();
    session.tool_change(0).unwrap();
    session.move_to(Point::ORIGIN);
    session.line(Point::ORIGIN).unwrap();
    assert_eq!(
        session.stream().last().unwrap().to_string(),
        "G1 X0.000 Y0.000 E0.0000 F1800"
    );
}
