//! Serde serialization/deserialization round-trip tests.
//!
//! These tests verify that the public data types can be serialized to JSON
//! and deserialized back, producing equal values.

#![cfg(feature = "serde")]

use rulegrid_core::*;

/// Helper: serialize to JSON string, deserialize back, assert equality.
fn roundtrip<T>(value: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(value).expect("serialize failed");
    let restored: T = serde_json::from_str(&json).expect("deserialize failed");
    assert_eq!(*value, restored, "round-trip mismatch for JSON: {json}");
}

fn sample_table() -> Table {
    let ops = vec![
        PathOp::move_to(0.0, 0.0),
        PathOp::line_to(100.0, 0.0),
        PathOp::line_to(100.0, 60.0),
        PathOp::line_to(0.0, 60.0),
        PathOp::line_to(0.0, 0.0),
        PathOp::move_to(50.0, 0.0),
        PathOp::line_to(50.0, 60.0),
    ];
    analyze_page(ops, &GridSettings::default())
        .value
        .remove(0)
        .with_contents(|cell| format!("cell {}", cell.key()))
}

// --- Geometry types ---

#[test]
fn test_serde_point() {
    roundtrip(&Point::new(12.5, -3.25));
}

#[test]
fn test_serde_rect() {
    roundtrip(&Rect::new(10.0, 20.0, 300.0, 40.0));
}

#[test]
fn test_serde_line_info() {
    roundtrip(&LineInfo::new(Point::new(100.0, 10.0), Point::new(0.0, 10.2)));
}

#[test]
fn test_serde_path_op() {
    roundtrip(&PathOp::move_to(1.0, 2.0));
    roundtrip(&PathOp::line_to(3.0, 4.0));
}

// --- Settings ---

#[test]
fn test_serde_settings() {
    roundtrip(&GridSettings::default());
    roundtrip(&GridSettings {
        proximity: Proximity::Symmetric,
        coordinate_snap: Some(1.5),
        ..GridSettings::default()
    });
}

// --- Tables ---

#[test]
fn test_serde_table() {
    let table = sample_table();
    assert_eq!(table.cells().len(), 2);
    roundtrip(&table);
}

#[test]
fn test_deserialized_table_restores_cell_order_and_counts() {
    // Cells out of order, and a row the declared counts do not cover.
    let json = r#"{
        "cells": [
            {"bounds": {"x": 0.0, "y": 20.0, "width": 50.0, "height": 20.0}, "content": "b", "row": 1, "col": 0},
            {"bounds": {"x": 0.0, "y": 0.0, "width": 50.0, "height": 20.0}, "content": "a", "row": 0, "col": 0}
        ],
        "row_count": 1,
        "col_count": 1,
        "bounds": {"x": 0.0, "y": 0.0, "width": 50.0, "height": 40.0}
    }"#;
    let table: Table = serde_json::from_str(json).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows().len(), 2);
    assert_eq!(table.cell(0, 0).unwrap().content, "a");
    assert_eq!(table.cell(1, 0).unwrap().content, "b");
    assert_eq!(table.to_map().keys().collect::<Vec<_>>(), vec!["R1C1", "R2C1"]);
}

#[test]
fn test_serde_page_tables() {
    roundtrip(&PageTables {
        page: 3,
        tables: vec![sample_table()],
    });
}

#[test]
fn test_table_map_serializes_in_row_major_order() {
    let json = serde_json::to_string(&sample_table().to_map()).unwrap();
    assert_eq!(json, r#"{"R1C1":"cell R1C1","R1C2":"cell R1C2"}"#);
}

// --- Diagnostics ---

#[test]
fn test_serde_diagnostic() {
    roundtrip(
        &Diagnostic::new(DiagnosticCode::MalformedOperand, "non-numeric operands")
            .on_page(1)
            .at_operator(7)
            .with_element("l"),
    );
    roundtrip(&Diagnostic::new(
        DiagnosticCode::Other("custom".to_string()),
        "something else",
    ));
}
