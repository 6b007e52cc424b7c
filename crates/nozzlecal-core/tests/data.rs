use nozzlecal_core::{GenerationError, PatternParameters, Point, PrinterConfiguration};

#[test]
fn test_partial_printer_json() {
    let printer: PrinterConfiguration = serde_json::from_str(
        r#"{
            "tools": [
                { "id": 0, "nozzle_diameter": 0.6 },
                { "id": 3, "x_offset": -0.1 }
            ],
            "center": { "x": 100.0, "y": 80.0 },
            "rotation_degrees": 0.0
        }"#,
    )
    .unwrap();

    assert_eq!(printer.tools.len(), 2);
    assert_eq!(printer.tools[0].nozzle_diameter, 0.6);
    assert_eq!(printer.tools[0].retraction_distance, 5.0);
    assert_eq!(printer.tools[1].x_offset, -0.1);
    assert_eq!(printer.center, Point::new(100.0, 80.0));
    assert_eq!(printer.layer_height, 0.2);
    assert_eq!(printer.find_tools(&[3, 0]).unwrap(), vec![1, 0]);
    assert!(printer.validate().is_ok());
}

#[test]
fn test_partial_pattern_json() {
    let params: PatternParameters =
        serde_json::from_str(r#"{ "width": 40.0, "length": 10.0, "spacing": 0.5 }"#).unwrap();

    assert_eq!(params.pitch, 1.0);
    assert_eq!(params.repetitions(), 5);
    assert_eq!(params.total_one_dir_width(1), 80.5);
}

#[test]
fn test_invalid_tool_rejected() {
    let printer: PrinterConfiguration =
        serde_json::from_str(r#"{ "tools": [ { "id": 1, "nozzle_diameter": 0.0 } ] }"#).unwrap();

    match printer.validate() {
        Err(GenerationError::InvalidConfiguration { reason }) => {
            assert!(reason.contains("nozzle diameter of tool 1"));
        }
        other => panic!("expected configuration error, got {:?}", other),
    }
}
