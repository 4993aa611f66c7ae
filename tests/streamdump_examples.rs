//! End-to-end checks against the JSON traces in tests/fixtures/.
//!
//! Covers:
//! - tracer short names and long camelCase names both load
//! - the linear split and two-graph walkthroughs
//! - construction errors surface with stable codes
//! - unrecognised graph types load as non-standard graphs
//! - descriptor projection and YAML config

use pretty_assertions::assert_eq;
use std::path::PathBuf;

use streamdump_viz::model::{StreamExclusion, ROOT_CODEC};
use streamdump_viz::streamdump_types::NodeDescriptor;
use streamdump_viz::{
    CodecId, ConsistencyError, GraphId, NodeId, StreamId, StreamdumpError, StreamdumpGraph,
    ViewAction, ViewConfig,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load(name: &str, config: ViewConfig) -> StreamdumpGraph {
    let path = fixtures_dir().join(name);
    let json = std::fs::read_to_string(&path).expect("read fixture");
    StreamdumpGraph::from_json_str(&json, config).expect("build graph from fixture")
}

fn ids(nodes: &[NodeId]) -> Vec<String> {
    nodes.iter().map(ToString::to_string).collect()
}

fn edge_pairs(graph: &StreamdumpGraph) -> Vec<(String, String)> {
    graph
        .visible_graph()
        .unwrap()
        .edges
        .iter()
        .map(|e| (e.source.to_string(), e.target.to_string()))
        .collect()
}

fn pair(source: &str, target: &str) -> (String, String) {
    (source.to_string(), target.to_string())
}

// =============================================================================
// LINEAR SPLIT
// =============================================================================

#[test]
fn test_linear_split_order_and_path() {
    let graph = load("linear_split.json", ViewConfig::default());

    let order: Vec<u32> = graph.dag().dag_order().iter().map(|c| c.raw()).collect();
    assert_eq!(order, vec![0, 1, 2, 3]);

    let path: Vec<u32> = graph
        .largest_compression_path()
        .iter()
        .map(|s| s.codec.raw())
        .collect();
    assert_eq!(path, vec![0, 1, 2]);
    assert!(graph.real_edge(StreamId(2)).unwrap().in_largest_path);
    assert!(!graph.real_edge(StreamId(3)).unwrap().in_largest_path);
}

#[test]
fn test_linear_split_normalization() {
    let graph = load("linear_split.json", ViewConfig::default());

    // the root's input sentinel and C2's terminal stream draw nothing
    assert!(graph.store().codec(ROOT_CODEC).unwrap().inputs.is_empty());
    assert_eq!(
        graph.store().stream(StreamId(4)).unwrap().exclusion,
        Some(StreamExclusion::Terminal)
    );
    assert!(graph.real_edge(StreamId(0)).is_none());
    assert!(graph.real_edge(StreamId(4)).is_none());
    assert_eq!(graph.edges().len(), 3);

    assert_eq!(
        graph.real_edge(StreamId(2)).unwrap().label,
        "#0 (S2) | Numeric\n60 [60.00%]\n15 [4]"
    );
}

#[test]
fn test_linear_split_collapse() {
    let mut graph = load("linear_split.json", ViewConfig::default());

    let focus = graph.apply("toggle:C1".parse().unwrap()).unwrap();
    assert_eq!(ids(&focus), vec!["C1"]);

    let visible = graph.visible_graph().unwrap();
    assert_eq!(ids(&visible.nodes), vec!["C0", "C1"]);
    assert_eq!(edge_pairs(&graph), vec![pair("C0", "C1")]);

    graph.apply("toggle:C1".parse().unwrap()).unwrap();
    assert_eq!(
        ids(&graph.visible_graph().unwrap().nodes),
        vec!["C0", "C1", "C2", "C3"]
    );
}

#[test]
fn test_linear_split_descriptors() {
    let graph = load("linear_split.json", ViewConfig::default());
    let view = graph.view().unwrap();

    let Some(NodeDescriptor::Codec(custom)) = view.node("C3") else {
        panic!("C3 should be visible");
    };
    assert_eq!(custom.kind, "Custom");
    assert_eq!(custom.header, "acme.entropy (1000) (C3)");
    assert_eq!(custom.detail, "Custom | 2");
    // the tracer writes "" on success
    assert_eq!(custom.failure_message, None);
    assert!(!custom.collapsible);

    let Some(NodeDescriptor::Codec(delta)) = view.node("C2") else {
        panic!("C2 should be visible");
    };
    // its only output was terminal and got dropped
    assert!(!delta.collapsible);
    assert!(delta.in_largest_path);
}

// =============================================================================
// TWO GRAPHS
// =============================================================================

#[test]
fn test_two_graphs_initial_view() {
    let graph = load("two_graphs.json", ViewConfig::default());
    let visible = graph.visible_graph().unwrap();

    assert_eq!(
        ids(&visible.nodes),
        vec!["C0", "G0", "C1", "C2", "G1", "C3"]
    );
    assert_eq!(
        edge_pairs(&graph),
        vec![pair("C0", "C1"), pair("C1", "C2"), pair("C2", "C3")]
    );
}

#[test]
fn test_two_graphs_proxy_synthesis() {
    let graph = load("two_graphs.json", ViewConfig::default());

    let outgoing: Vec<String> = graph
        .outgoing_proxies(GraphId(0))
        .map(|e| e.id.to_string())
        .collect();
    assert_eq!(outgoing, vec!["proxy-G0-S3-G1", "proxy-G0-S3-C3"]);

    let incoming: Vec<String> = graph
        .incoming_proxies(GraphId(1))
        .map(|e| e.id.to_string())
        .collect();
    assert_eq!(incoming, vec!["proxy-G0-S3-G1", "proxy-C2-S3-G1"]);
}

#[test]
fn test_two_graphs_collapse_uses_proxy() {
    let mut graph = load("two_graphs.json", ViewConfig::default());
    graph.apply(ViewAction::ToggleCollapse(GraphId(0).into())).unwrap();

    let view = graph.view().unwrap();
    let nodes: Vec<&str> = view.nodes.iter().map(NodeDescriptor::id).collect();
    assert_eq!(nodes, vec!["C0", "G0", "G1", "C3"]);

    let edge = view.edge_between("G0", "C3").unwrap();
    assert_eq!(edge.id, "proxy-G0-S3-C3");
    assert_eq!(edge.stream_ids, vec!["S3"]);
    assert!(view.edge_between("C2", "C3").is_none());
}

#[test]
fn test_two_graphs_descriptors() {
    let graph = load("two_graphs.json", ViewConfig::default());
    let view = graph.view().unwrap();

    let Some(NodeDescriptor::Graph(entropy)) = view.node("G1") else {
        panic!("G1 should be visible");
    };
    assert_eq!(entropy.graph_type, "Static");
    assert_eq!(entropy.header, "zl.entropy_graph (G1)");

    let Some(NodeDescriptor::Codec(tokenize)) = view.node("C1") else {
        panic!("C1 should be visible");
    };
    assert!(tokenize.has_local_params);
    assert_eq!(tokenize.owning_graph.as_deref(), Some("G0"));

    let Some(NodeDescriptor::Codec(huffman)) = view.node("C3") else {
        panic!("C3 should be visible");
    };
    assert_eq!(huffman.failure_message.as_deref(), Some("table overflow"));
}

#[test]
fn test_startup_collapse_of_standard_graphs() {
    let config = ViewConfig::default().with_startup_collapse(true);
    let mut graph = load("two_graphs.json", config);

    let visible = graph.visible_graph().unwrap();
    assert_eq!(ids(&visible.nodes), vec!["C0", "G0"]);
    assert_eq!(edge_pairs(&graph), vec![pair("C0", "G0")]);

    let focus = graph.apply("standard:expand".parse().unwrap()).unwrap();
    assert_eq!(ids(&focus), vec!["G0"]);
    assert_eq!(graph.visible_graph().unwrap().nodes.len(), 6);
}

#[test]
fn test_yaml_config_drives_startup() {
    let config = ViewConfig::from_yaml_str(
        "collapse_standard_graphs: true\nmark_largest_path: false\nshare_precision: 1\n",
    )
    .unwrap();
    let graph = load("two_graphs.json", config);

    assert!(graph.is_collapsed(GraphId(0).into()));
    assert!(graph.codec_nodes().iter().all(|n| !n.in_largest_path));
    assert_eq!(
        graph.real_edge(StreamId(1)).unwrap().label,
        "#0 (S1) | Serialized\n100 [100.0%]\n100 [1]"
    );
}

// =============================================================================
// ERRORS
// =============================================================================

fn build_err(json: &str) -> StreamdumpError {
    StreamdumpGraph::from_json_str(json, ViewConfig::default()).unwrap_err()
}

#[test]
fn test_invalid_json() {
    assert_eq!(build_err("{ not json").code(), "INVALID_JSON");
}

#[test]
fn test_empty_trace() {
    assert_eq!(build_err(r#"{"codecs": []}"#).code(), "EMPTY_TRACE");
}

#[test]
fn test_missing_root_input() {
    let err = build_err(r#"{"codecs": [{"name": "root"}]}"#);
    assert!(matches!(
        err,
        StreamdumpError::Consistency(ConsistencyError::MissingRootInput)
    ));
}

#[test]
fn test_multiple_terminal_streams() {
    let json = r#"{
        "codecs": [{"name": "root", "inputStreamIds": [0], "outputStreamIds": [1, 2]}],
        "streams": [{}, {"compressedSize": 3}, {"compressedSize": 4}]
    }"#;
    let StreamdumpError::Consistency(err) = build_err(json) else {
        panic!("expected a consistency error");
    };
    assert_eq!(
        err,
        ConsistencyError::MultipleTerminalStreams {
            codec: CodecId(0),
            streams: vec![StreamId(1), StreamId(2)],
        }
    );
}

#[test]
fn test_cycle_rejected() {
    let json = r#"{
        "codecs": [
            {"name": "root", "inputStreamIds": [0], "outputStreamIds": [1]},
            {"name": "a", "inputStreamIds": [1, 3], "outputStreamIds": [2]},
            {"name": "b", "inputStreamIds": [2], "outputStreamIds": [3]}
        ],
        "streams": [{}, {}, {}, {}]
    }"#;
    assert_eq!(build_err(json).code(), "CYCLE");
}

#[test]
fn test_unknown_graph_type_left_expanded() {
    let json = r#"{
        "codecs": [
            {"name": "root", "inputStreamIds": [0], "outputStreamIds": [1]},
            {"name": "a", "inputStreamIds": [1]}
        ],
        "streams": [{}, {"compressedSize": 4}],
        "graphs": [{"graphType": "recursive", "codecIds": [1]}]
    }"#;
    let config = ViewConfig::default().with_startup_collapse(true);
    let graph = StreamdumpGraph::from_json_str(json, config).unwrap();

    assert!(!graph.is_collapsed(GraphId(0).into()));
    assert!(graph.is_visible(CodecId(1).into()));

    let view = graph.view().unwrap();
    let Some(NodeDescriptor::Graph(group)) = view.node("G0") else {
        panic!("G0 should be visible");
    };
    assert_eq!(group.graph_type, "Unknown");
}

#[test]
fn test_lookup_errors_leave_state_untouched() {
    let mut graph = load("two_graphs.json", ViewConfig::default());
    let before = graph.visible_graph().unwrap();

    let err = graph.apply("hide:G7".parse().unwrap()).unwrap_err();
    assert_eq!(err.code(), "UNKNOWN_GRAPH");
    assert_eq!(graph.visible_graph().unwrap(), before);
}
