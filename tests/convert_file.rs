use std::fs;

use boundary_graph::application::{convert_file, ConvertOptions};
use boundary_graph::infrastructure::{load_graph, save_graph};
use boundary_graph::ConvertError;

const INPUT: &str = "6.0,48.0,6.2,48.1,6.4,48.2\n6.4,48.2,6.6,48.3\n";

#[test]
fn converts_file_and_writes_expected_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Germany.geojson");
    let output = dir.path().join("Germany.json");
    fs::write(&input, INPUT).unwrap();

    let graph = convert_file(&input, &ConvertOptions::default()).unwrap();
    save_graph(&graph, &output).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    let nodes = obj["nodes"].as_array().unwrap();
    let edges = obj["edges"].as_array().unwrap();
    assert_eq!(nodes.len(), 4);
    let x = nodes[3]["location"]["x"].as_f64().unwrap();
    let y = nodes[3]["location"]["y"].as_f64().unwrap();
    assert!((x - 40.0).abs() < 1e-9 && (y - 65.0).abs() < 1e-9);
    let pairs: Vec<(u64, u64)> = edges
        .iter()
        .map(|e| (e["source"].as_u64().unwrap(), e["target"].as_u64().unwrap()))
        .collect();
    assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
    assert!(!dir.path().join("Germany.json.tmp").exists());
}

#[test]
fn saved_graph_loads_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.json");
    fs::write(&input, INPUT).unwrap();

    let graph = convert_file(&input, &ConvertOptions::default()).unwrap();
    save_graph(&graph, &output).unwrap();
    let loaded = load_graph(&output).unwrap();

    assert_eq!(loaded.edges().collect::<Vec<_>>(), graph.edges().collect::<Vec<_>>());
    assert_eq!(loaded.node_count(), graph.node_count());
    for (a, b) in loaded.nodes().zip(graph.nodes()) {
        assert!(a.distance(b) < 1e-9);
    }
}

#[test]
fn missing_input_is_input_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(&dir.path().join("nope.txt"), &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::InputNotFound { .. }));
}

#[test]
fn malformed_input_names_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.txt");
    fs::write(&input, "6.0,48.0,6.2,48.1\n6.0,48.0,6.2\n").unwrap();

    let err = convert_file(&input, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::MalformedLine { line: 2, .. }));
}

#[test]
fn unwritable_output_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    fs::write(&input, INPUT).unwrap();
    let output = dir.path().join("missing-dir").join("out.json");

    let graph = convert_file(&input, &ConvertOptions::default()).unwrap();
    let err = save_graph(&graph, &output).unwrap_err();
    assert!(matches!(err, ConvertError::OutputWriteFailure { .. }));
    assert!(!output.exists());
}

#[test]
fn load_rejects_dangling_edges() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    let text = r#"{"nodes":[{"location":{"x":1.0,"y":2.0}}],"edges":[{"source":0,"target":5}]}"#;
    fs::write(&path, text).unwrap();
    assert!(matches!(load_graph(&path), Err(ConvertError::InvalidDocument(_))));
}

#[test]
fn save_replaces_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.json");
    fs::write(&input, INPUT).unwrap();
    fs::write(&output, "stale").unwrap();

    let graph = convert_file(&input, &ConvertOptions::default()).unwrap();
    save_graph(&graph, &output).unwrap();
    assert_eq!(load_graph(&output).unwrap().node_count(), 4);
}
