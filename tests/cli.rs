use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const DESCRIPTOR: &str = r#"{
    "variables": [
        {"name": "count", "kind": "uint16"},
        {"name": "b", "kind": "byte"},
        {"name": "sst", "kind": "grid",
         "array": {"name": "sst", "kind": "array",
                   "template": {"name": "sst", "kind": "float32"},
                   "dimensions": [{"name": "lat", "size": 2}, {"name": "lon", "size": 3}]},
         "maps": [
            {"name": "lat", "kind": "array", "template": {"name": "lat", "kind": "float32"},
             "dimensions": [{"name": "lat", "size": 2}]},
            {"name": "lon", "kind": "array", "template": {"name": "lon", "kind": "float32"},
             "dimensions": [{"name": "lon", "size": 3}]}
         ]}
    ],
    "attributes": {
        "b": {"type": "table", "values": {
            "valid_min": {"type": "byte", "values": [0]},
            "valid_max": {"type": "byte", "values": [200]},
            "scale_factor": {"type": "float32", "values": [2.0]}
        }},
        "sst": {"type": "table", "values": {
            "units": {"type": "string", "values": ["K"]},
            "_FillValue": {"type": "float32", "values": [-999.0]}
        }},
        "NC_GLOBAL": {"type": "table", "values": {
            "title": {"type": "string", "values": ["Test run"]}
        }}
    },
    "values": {
        "b": {"kind": "byte", "value": 150},
        "sst": {"kind": "grid", "value": {
            "array": {"type": "float32", "values": [1.5, 2.5, -999.0, 4.0, 5.0, 6.0]},
            "maps": [
                {"type": "float32", "values": [-10.0, 10.0]},
                {"type": "float32", "values": [0.0, 1.0, 2.0]}
            ]
        }}
    }
}"#;

fn descriptor(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn test_prints_types_and_sets() {
    let file = descriptor(DESCRIPTOR);
    Command::cargo_bin("dapmath")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("count: count"))
        .stdout(predicate::str::contains("DiscreteRange(count=65536)"))
        .stdout(predicate::str::contains("LinearRange(lower=0, upper=400, count=101)"))
        .stdout(predicate::str::contains("sst: ((lon, lat) -> sst[K])"));
}

#[test]
fn test_values_are_materialized() {
    let file = descriptor(DESCRIPTOR);
    Command::cargo_bin("dapmath")
        .unwrap()
        .arg(file.path())
        .arg("--values")
        .assert()
        .success()
        .stdout(predicate::str::contains("b = 300"))
        .stdout(predicate::str::contains("sst: [1.5000, 2.5000, NaN, 4, 5, 6]"));
}

#[test]
fn test_single_variable_and_globals() {
    let file = descriptor(DESCRIPTOR);
    Command::cargo_bin("dapmath")
        .unwrap()
        .arg(file.path())
        .args(["--variable", "b", "--globals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b: b"))
        .stdout(predicate::str::contains("count:").not())
        .stdout(predicate::str::contains("title = \"Test run\""));
}

#[test]
fn test_unknown_variable_fails() {
    let file = descriptor(DESCRIPTOR);
    Command::cargo_bin("dapmath")
        .unwrap()
        .arg(file.path())
        .args(["--variable", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Variable 'nope' not found"));
}

#[test]
fn test_unsupported_list_fails() {
    let file = descriptor(
        r#"{"variables": [
            {"name": "l", "kind": "list",
             "template": {"name": "s", "kind": "structure",
                          "members": [{"name": "a", "kind": "int16"}]}}
        ]}"#,
    );
    Command::cargo_bin("dapmath")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to adapt variable 'l'"));
}

#[test]
fn test_missing_descriptor_fails() {
    Command::cargo_bin("dapmath")
        .unwrap()
        .arg("/nonexistent/dataset.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read descriptor"));
}

#[test]
fn test_config_and_log_file() {
    let file = descriptor(DESCRIPTOR);
    let config = descriptor(r#"{"index_suffix": "_row", "unpacker_cache_capacity": 2}"#);
    let seq = descriptor(
        r#"{"variables": [
            {"name": "obs", "kind": "sequence",
             "members": [{"name": "t", "kind": "float64"}, {"name": "p", "kind": "float64"}]}
        ]}"#,
    );
    let log = tempfile::tempdir().unwrap();
    let log_path = log.path().join("dapmath.log");

    Command::cargo_bin("dapmath")
        .unwrap()
        .arg(seq.path())
        .arg("--config")
        .arg(config.path())
        .arg("--log")
        .arg(&log_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("obs: (obs_row -> (t, p))"));
    assert!(log_path.exists());

    Command::cargo_bin("dapmath")
        .unwrap()
        .arg(file.path())
        .arg("--tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("└── sst (Float32): sst[K]"));
}
