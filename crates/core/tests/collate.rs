use colate_core::sheet::{write_rows, ReadOptions, Row, Sheet, SheetError};
use colate_core::{run, CollateConfig, CollateError, CollateEvent, ColumnTemplates, Collator};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn rows(data: &[&[&str]]) -> Vec<Row> {
    data.iter()
        .map(|row| row.iter().map(|s| (*s).to_string()).collect())
        .collect()
}

fn workbook(dir: &Path, name: &str, sheet: &str, data: &[&[&str]]) -> PathBuf {
    let path = dir.join(name);
    write_rows(&path, sheet, &rows(data)).unwrap();
    path
}

// ===== Collator =====

#[test]
fn test_file_order_preserved() {
    let dir = tempdir().unwrap();
    let a = workbook(dir.path(), "A.xlsx", "Sheet1", &[&["a1"], &["a2"]]);
    let b = workbook(dir.path(), "B.xlsx", "Sheet1", &[&["b1"]]);

    let config = CollateConfig::default();
    let templates = ColumnTemplates::parse("{{ file_name }},{{ row_num }}").unwrap();
    let mut events = Vec::new();

    let collation = Collator::new(&config, &templates)
        .collate(&[a, b], &mut events)
        .unwrap();

    assert_eq!(
        collation.matrix.rows(),
        rows(&[
            &["A.xlsx", "0", "a1"],
            &["A.xlsx", "1", "a2"],
            &["B.xlsx", "0", "b1"],
        ])
        .as_slice()
    );
    assert_eq!(collation.files, 2);
    assert_eq!(collation.template_failures, 0);
}

#[test]
fn test_row_limit_caps_each_file() {
    let dir = tempdir().unwrap();
    let a = workbook(
        dir.path(),
        "a.xlsx",
        "Sheet1",
        &[&["1"], &["2"], &["3"], &["4"], &["5"]],
    );
    let b = workbook(dir.path(), "b.xlsx", "Sheet1", &[&["6"], &["7"], &["8"]]);

    let config = CollateConfig::default().with_row_limit(2);
    let templates = ColumnTemplates::parse("{{ file_name }}").unwrap();
    let mut events = Vec::new();

    let collation = Collator::new(&config, &templates)
        .collate(&[a, b], &mut events)
        .unwrap();

    assert_eq!(
        collation.matrix.rows(),
        rows(&[
            &["a.xlsx", "1"],
            &["a.xlsx", "2"],
            &["b.xlsx", "6"],
            &["b.xlsx", "7"],
        ])
        .as_slice()
    );
}

#[test]
fn test_row_start_skips_headers_and_renumbers() {
    let dir = tempdir().unwrap();
    let a = workbook(
        dir.path(),
        "a.xlsx",
        "Data",
        &[&["Title"], &["Region", "Sales"], &["North", "10"], &["", "20"]],
    );

    let config = CollateConfig::default()
        .with_sheet_name("Data")
        .with_row_start(2);
    let templates = ColumnTemplates::parse("{{ row_num }}").unwrap();
    let mut events = Vec::new();

    let collation = Collator::new(&config, &templates)
        .collate(&[a], &mut events)
        .unwrap();

    // The first row after the offset is the fill-down baseline
    assert_eq!(
        collation.matrix.rows(),
        rows(&[&["0", "North", "10"], &["1", "North", "20"]]).as_slice()
    );
}

#[test]
fn test_fill_down_runs_before_templates() {
    let dir = tempdir().unwrap();
    let a = workbook(
        dir.path(),
        "a.xlsx",
        "Sheet1",
        &[&["g1", "x"], &["", "y"], &["g2", "z"], &["", "w"]],
    );

    let config = CollateConfig::default();
    let templates = ColumnTemplates::parse("{{ cells[0] }}").unwrap();
    let mut events = Vec::new();

    let collation = Collator::new(&config, &templates)
        .collate(&[a], &mut events)
        .unwrap();

    let firsts: Vec<&str> = collation
        .matrix
        .rows()
        .iter()
        .map(|r| r[0].as_str())
        .collect();
    assert_eq!(firsts, vec!["g1", "g1", "g2", "g2"]);

    let fills = events
        .iter()
        .filter(|e| matches!(e, CollateEvent::CellFilled { .. }))
        .count();
    assert_eq!(fills, 2);
}

#[test]
fn test_trailing_blank_cells_are_filled() {
    let dir = tempdir().unwrap();
    let a = workbook(
        dir.path(),
        "a.xlsx",
        "Sheet1",
        &[&["g", "cat"], &["x", ""], &["y", ""]],
    );

    let config = CollateConfig::default();
    let templates = ColumnTemplates::parse("").unwrap();
    let mut events = Vec::new();

    let collation = Collator::new(&config, &templates)
        .collate(&[a], &mut events)
        .unwrap();

    assert_eq!(
        collation.matrix.rows(),
        rows(&[&["g", "cat"], &["x", "cat"], &["y", "cat"]]).as_slice()
    );
    assert!(events.contains(&CollateEvent::CellFilled {
        file: "a.xlsx".to_string(),
        row: 2,
        column: 1,
        value: "cat".to_string()
    }));
}

#[test]
fn test_template_failure_does_not_abort() {
    let dir = tempdir().unwrap();
    let a = workbook(dir.path(), "a.xlsx", "Sheet1", &[&["x"], &["y"]]);
    let b = workbook(dir.path(), "b.xlsx", "Sheet1", &[&["z"]]);

    let config = CollateConfig::default();
    let templates = ColumnTemplates::parse("{{ nonexistent.field }},{{ file_name }}").unwrap();
    let mut events = Vec::new();

    let collation = Collator::new(&config, &templates)
        .collate(&[a, b], &mut events)
        .unwrap();

    assert_eq!(
        collation.matrix.rows(),
        rows(&[&["", "a.xlsx", "x"], &["", "a.xlsx", "y"], &["", "b.xlsx", "z"]]).as_slice()
    );
    assert_eq!(collation.template_failures, 3);
    assert_eq!(events.iter().filter(|e| e.is_warning()).count(), 3);
}

#[test]
fn test_ragged_rows_are_not_padded() {
    let dir = tempdir().unwrap();
    let a = workbook(dir.path(), "a.xlsx", "Sheet1", &[&["1", "2", "3"]]);
    let b = workbook(dir.path(), "b.xlsx", "Sheet1", &[&["4"]]);

    let config = CollateConfig::default();
    let templates = ColumnTemplates::parse("{{ file_name }}").unwrap();
    let mut events = Vec::new();

    let collation = Collator::new(&config, &templates)
        .collate(&[a, b], &mut events)
        .unwrap();

    assert_eq!(collation.matrix.width_range(), Some((2, 4)));
}

#[test]
fn test_reader_failure_is_fatal() {
    let dir = tempdir().unwrap();
    let a = workbook(dir.path(), "a.xlsx", "Sheet1", &[&["x"]]);
    let b = workbook(dir.path(), "b.xlsx", "Other", &[&["y"]]);

    let config = CollateConfig::default();
    let templates = ColumnTemplates::parse("{{ file_name }}").unwrap();
    let mut events = Vec::new();

    let result = Collator::new(&config, &templates).collate(&[a, b], &mut events);

    assert!(matches!(
        result,
        Err(CollateError::Sheet(SheetError::SheetNotFound { .. }))
    ));
}

#[test]
fn test_events_follow_pipeline_order() {
    let dir = tempdir().unwrap();
    let a = workbook(dir.path(), "a.xlsx", "Sheet1", &[&["x"]]);

    let config = CollateConfig::default();
    let templates = ColumnTemplates::parse("{{ file_name }}").unwrap();
    let mut events = Vec::new();

    Collator::new(&config, &templates)
        .collate(&[a], &mut events)
        .unwrap();

    assert_eq!(
        events,
        vec![
            CollateEvent::FileStarted {
                file: "a.xlsx".to_string()
            },
            CollateEvent::RowsRead {
                file: "a.xlsx".to_string(),
                rows: 1
            },
            CollateEvent::TemplateEvaluated {
                file: "a.xlsx".to_string(),
                row: 0,
                template: 0,
                value: "a.xlsx".to_string()
            },
            CollateEvent::FileCompleted {
                file: "a.xlsx".to_string(),
                rows: 1
            },
        ]
    );
}

// ===== End-to-end run =====

#[test]
fn test_run_round_trip() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    workbook(input.path(), "second.xlsx", "Data", &[&["s1", "v"], &["", "w"]]);
    workbook(input.path(), "First.XLSX", "Data", &[&["f1", "v"]]);
    std::fs::write(input.path().join("ignored.csv"), "a,b\n").unwrap();

    let out_path = output.path().join("merged.xlsx");
    let config = CollateConfig::default()
        .with_input_dir(input.path())
        .with_output_path(&out_path)
        .with_sheet_name("Data")
        .with_column_templates("{{ file_name }},{{ row_num }}");
    let mut events = Vec::new();

    let collation = run(&config, &mut events).unwrap();

    let expected = rows(&[
        &["First.XLSX", "0", "f1", "v"],
        &["second.xlsx", "0", "s1", "v"],
        &["second.xlsx", "1", "s1", "w"],
    ]);
    assert_eq!(collation.matrix.rows(), expected.as_slice());

    let written = Sheet::read(&out_path, "Data", &ReadOptions::default()).unwrap();
    assert_eq!(written.rows(), collation.matrix.rows());

    assert!(matches!(
        events.last(),
        Some(CollateEvent::OutputWritten { rows: 3, .. })
    ));
}

#[test]
fn test_run_round_trip_keeps_trailing_blank_cells() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    workbook(input.path(), "a.xlsx", "Sheet1", &[&["x"], &["y"]]);

    let out_path = output.path().join("merged.xlsx");
    let config = CollateConfig::default()
        .with_input_dir(input.path())
        .with_output_path(&out_path)
        .with_column_templates("{{ file_name }},{{ cells[5] }}")
        .with_column_position(9);
    let mut events = Vec::new();

    let collation = run(&config, &mut events).unwrap();

    assert_eq!(
        collation.matrix.rows(),
        rows(&[&["x", "a.xlsx", ""], &["y", "a.xlsx", ""]]).as_slice()
    );
    assert_eq!(collation.template_failures, 2);

    let written = Sheet::read(&out_path, "Sheet1", &ReadOptions::default()).unwrap();
    assert_eq!(written.rows(), collation.matrix.rows());
}

#[test]
fn test_run_bad_template_touches_nothing() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    workbook(input.path(), "a.xlsx", "Sheet1", &[&["x"]]);

    let out_path = output.path().join("merged.xlsx");
    let config = CollateConfig::default()
        .with_input_dir(input.path())
        .with_output_path(&out_path)
        .with_column_templates("{% if %}");
    let mut events = Vec::new();

    let result = run(&config, &mut events);

    assert!(matches!(result, Err(CollateError::TemplateCompile { .. })));
    assert!(events.is_empty());
    assert!(!out_path.exists());
}

#[test]
fn test_run_missing_sheet_writes_no_output() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    workbook(input.path(), "a.xlsx", "Sheet1", &[&["x"]]);
    workbook(input.path(), "b.xlsx", "Elsewhere", &[&["y"]]);

    let out_path = output.path().join("merged.xlsx");
    let config = CollateConfig::default()
        .with_input_dir(input.path())
        .with_output_path(&out_path);
    let mut events = Vec::new();

    let result = run(&config, &mut events);

    assert!(result.is_err());
    assert!(!out_path.exists());
}

#[test]
fn test_run_empty_directory_writes_empty_sheet() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    let out_path = output.path().join("merged.xlsx");
    let config = CollateConfig::default()
        .with_input_dir(input.path())
        .with_output_path(&out_path)
        .with_sheet_name("Merged");
    let mut events = Vec::new();

    let collation = run(&config, &mut events).unwrap();

    assert!(collation.matrix.is_empty());
    assert_eq!(Sheet::sheet_names(&out_path).unwrap(), vec!["Merged".to_string()]);
}
