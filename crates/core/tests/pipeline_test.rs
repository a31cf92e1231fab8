use hotspot::config::{ColumnConfig, DatasetConfig};
use hotspot::prelude::*;
use hotspot::{HotspotError, ScanMode};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_csv_run_end_to_end() {
    let _ = env_logger::builder().is_test(true).try_init();
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    // Rows 0 and 3 share a location, row 2 is isolated.
    write_file(
        input.path(),
        "Dayton.csv",
        "RecoveryDate,Latitude,Longitude\n\
         2016-03-01,39.1000,-84.5000\n\
         2016-03-02,39.1001,-84.5000\n\
         2016-03-09,39.2000,-84.5000\n\
         2016-03-11,39.1000,-84.5000\n",
    );

    let config = RunConfig::default()
        .with_input_dir(input.path())
        .with_search(SearchConfig::default().with_worker_count(3))
        .select_datasets(&["Akron", "Dayton"]);
    config.validate().unwrap();

    let writer = CsvResultWriter::create(output.path().join("500ft Search Radius -- test")).unwrap();
    let summary = Pipeline::new(&config, &CsvLoader::default(), &writer).run();

    assert!(!summary.is_success());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].name, "Akron");
    assert!(summary.failures[0].error.is_input_error());
    assert!(!writer.dir().join("Akron.csv").exists());

    assert_eq!(summary.reports.len(), 1);
    let report = &summary.reports[0];
    assert_eq!(report.name, "Dayton");
    assert_eq!(report.mode, ScanMode::SelfJoin);
    assert_eq!(report.stats.query_points, 4);
    assert_eq!(report.stats.hotspots, 3);
    assert_eq!(report.output, writer.dir().join("Dayton.csv"));

    assert_eq!(
        read_lines(&report.output),
        vec!["id,match_count,matches", "0,1,1", "1,2,0;3", "3,1,1"]
    );
}

#[test]
fn test_csv_asymmetric_run_with_id_columns() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_file(
        input.path(),
        "overdoses.csv",
        "Id,Latitude,Longitude\n\
         od-1,39.1031,-84.5120\n\
         od-2,39.1032,-84.5121\n\
         od-3,39.1400,-84.5120\n",
    );
    write_file(
        input.path(),
        "schools.csv",
        "Id,Latitude,Longitude\n\
         hughes,39.1030,-84.5120\n\
         walnut-hills,39.1300,-84.4900\n",
    );

    let config = RunConfig::default()
        .with_input_dir(input.path())
        .with_columns(ColumnConfig {
            id: Some("Id".to_string()),
            ..ColumnConfig::default()
        })
        .with_datasets(vec![DatasetConfig::asymmetric(
            "schools",
            "overdoses.csv",
            "schools.csv",
        )]);

    let writer = CsvResultWriter::create(output.path()).unwrap();
    let summary = Pipeline::new(&config, &CsvLoader::new(config.columns.clone()), &writer).run();
    assert!(summary.is_success());

    let report = &summary.reports[0];
    assert_eq!(report.mode, ScanMode::Asymmetric);
    assert_eq!(report.stats.query_points, 2);
    assert_eq!(report.stats.reference_points, 3);
    assert_eq!(
        read_lines(&report.output),
        vec!["id,match_count,matches", "hughes,2,od-1;od-2"]
    );
}

#[test]
fn test_bad_rows_skip_only_their_dataset() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_file(input.path(), "Akron.csv", "Latitude,Longitude\n41.08,-81.51\n91.5,-81.51\n");
    write_file(input.path(), "Columbus.csv", "Lat,Long\n39.96,-83.00\n");
    write_file(
        input.path(),
        "Cleveland.csv",
        "Latitude,Longitude\n41.4993,-81.6944\n41.4994,-81.6944\n",
    );

    let config = RunConfig::default()
        .with_input_dir(input.path())
        .select_datasets(&["Akron", "Columbus", "Cleveland"]);
    let writer = CsvResultWriter::create(output.path()).unwrap();
    let summary = Pipeline::new(&config, &CsvLoader::default(), &writer).run();

    let failed: Vec<&str> = summary.failures.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(failed, vec!["Akron", "Columbus"]);
    assert!(matches!(
        summary.failures[1].error,
        HotspotError::MissingColumn { .. }
    ));
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].stats.hotspots, 2);
}

#[test]
fn test_limit_caps_rows_per_file() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let mut rows = String::from("Latitude,Longitude\n");
    for i in 0..150 {
        rows.push_str(&format!("{},-84.5\n", 39.1 + i as f64 * 0.00001));
    }
    write_file(input.path(), "Cincinnati.csv", &rows);

    let config = RunConfig::default()
        .with_input_dir(input.path())
        .with_max_points(100)
        .select_datasets(&["Cincinnati"]);
    let writer = CsvResultWriter::create(output.path()).unwrap();
    let summary = Pipeline::new(&config, &CsvLoader::default(), &writer).run();

    assert!(summary.is_success());
    assert_eq!(summary.reports[0].stats.query_points, 100);
    assert_eq!(read_lines(&summary.reports[0].output).len(), 101);
}

#[test]
fn test_limit_ignores_rows_past_the_cap() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_file(
        input.path(),
        "Dayton.csv",
        "Latitude,Longitude\n39.1,-84.5\n39.1001,-84.5\n95.0,-84.5\n",
    );

    let capped = RunConfig::default()
        .with_input_dir(input.path())
        .with_max_points(2)
        .select_datasets(&["Dayton"]);
    let writer = CsvResultWriter::create(output.path()).unwrap();
    let summary = Pipeline::new(&capped, &CsvLoader::default(), &writer).run();

    assert!(summary.is_success(), "failures: {:?}", summary.failures);
    assert_eq!(summary.reports[0].stats.query_points, 2);
    assert_eq!(summary.reports[0].stats.hotspots, 2);

    let uncapped = RunConfig::default()
        .with_input_dir(input.path())
        .select_datasets(&["Dayton"]);
    let summary = Pipeline::new(&uncapped, &CsvLoader::default(), &writer).run();
    assert!(matches!(
        summary.failures[0].error,
        HotspotError::InvalidInput(_)
    ));
}

#[test]
fn test_config_file_drives_run() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_file(
        input.path(),
        "Toledo.csv",
        "Latitude,Longitude\n41.6528,-83.5379\n41.6529,-83.5379\n",
    );

    let config_path = input.path().join("hotspot.toml");
    fs::write(
        &config_path,
        format!(
            "input_dir = {:?}\nprogress_interval = 0\n\n[search]\nsearch_radius_feet = 20.0\nworker_count = 2\n\n[[datasets]]\nname = \"Toledo\"\n",
            input.path().display().to_string()
        ),
    )
    .unwrap();

    let config = RunConfig::load(&config_path).unwrap();
    assert_eq!(config.search.search_radius_feet, 20.0);

    let writer = CsvResultWriter::create(output.path()).unwrap();
    let summary = Pipeline::new(&config, &CsvLoader::default(), &writer).run();

    // The two rows are about 36 ft apart, outside a 20 ft radius.
    assert!(summary.is_success());
    assert_eq!(summary.reports[0].stats.hotspots, 0);
    assert_eq!(read_lines(&summary.reports[0].output), vec!["id,match_count,matches"]);
}
