//! Graph builder: trace -> normalized entities -> DAG -> edge view models.

use super::view_model::{CodecNode, EdgeSlot, EdgeView, GraphNode};
use super::StreamdumpGraph;
use crate::config::ViewConfig;
use crate::dag::CodecDag;
use crate::error::ConsistencyError;
use crate::model::{
    Codec, CodecId, EdgeId, EntityStore, FunctionGraph, GraphId, GraphType, NodeId, Stream,
    StreamExclusion, StreamId, ROOT_CODEC, ROOT_INPUT_STREAM,
};
use std::collections::HashMap;
use streamdump_types::{SerializedGraph, SerializedStreamdump};

/// Serialized endpoint hints, checked against the stamped endpoints.
type EndpointHint = (Option<u32>, Option<u32>);

#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        codecs = trace.codecs.len(),
        streams = trace.streams.len(),
        graphs = trace.graphs.len()
    )
)]
pub(super) fn build(
    trace: SerializedStreamdump,
    config: ViewConfig,
) -> Result<StreamdumpGraph, ConsistencyError> {
    if trace.codecs.is_empty() {
        return Err(ConsistencyError::EmptyTrace);
    }

    // Step 1: entities, indexed by position
    let hints: Vec<EndpointHint> = trace
        .streams
        .iter()
        .map(|s| (s.source_codec, s.target_codec))
        .collect();
    let mut streams: Vec<Stream> = trace
        .streams
        .iter()
        .enumerate()
        .map(|(idx, raw)| Stream::from_serialized(StreamId::from_index(idx), raw))
        .collect();
    let mut codecs: Vec<Codec> = trace
        .codecs
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| Codec::from_serialized(CodecId::from_index(idx), raw))
        .collect();
    let graphs: Vec<FunctionGraph> = trace
        .graphs
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| graph_from_serialized(GraphId::from_index(idx), raw))
        .collect();

    // Step 2: codec -> owning graph
    stamp_owning_graphs(&mut codecs, &graphs)?;

    // Step 3: stream -> source/target codec
    stamp_stream_endpoints(&codecs, &mut streams)?;
    check_endpoint_hints(&streams, &hints);

    // Steps 4-5: normalization
    drop_terminal_streams(&mut codecs, &mut streams)?;
    drop_root_input(&mut codecs, &mut streams)?;
    check_normalized(&codecs, &streams)?;

    let store = EntityStore {
        codecs,
        streams,
        graphs,
    };

    // Step 6: DAG index
    let dag = CodecDag::build(&store)?;

    // Step 7: one real edge per surviving stream
    let mut edges = Vec::new();
    let mut stream_edges = HashMap::new();
    for (stream, source, target) in store.surviving_streams() {
        stream_edges.insert(stream.id, EdgeSlot(edges.len()));
        edges.push(EdgeView {
            id: EdgeId::Stream(stream.id),
            stream: stream.id,
            source: NodeId::Codec(source),
            target: NodeId::Codec(target),
            label: stream.label(config.share_precision),
            in_largest_path: false,
        });
    }

    let codec_nodes = store.codecs().iter().map(|c| CodecNode::new(c.id)).collect();
    let graph_nodes = store.graphs().iter().map(|g| GraphNode::new(g.id)).collect();

    let mut graph = StreamdumpGraph {
        store,
        dag,
        codec_nodes,
        graph_nodes,
        edges,
        stream_edges,
        config,
    };

    // Step 8: proxies across graph boundaries
    graph.synthesize_proxies();

    tracing::debug!(
        codecs = graph.codec_nodes.len(),
        real_edges = graph.stream_edges.len(),
        total_edges = graph.edges.len(),
        "built streamdump graph"
    );

    Ok(graph)
}

fn graph_from_serialized(id: GraphId, raw: SerializedGraph) -> FunctionGraph {
    let graph_type = raw.graph_type.parse::<GraphType>().unwrap_or_else(|tag: String| {
        tracing::warn!(graph = %id, %tag, "unrecognised graph type, treating as non-standard");
        GraphType::Unknown
    });

    FunctionGraph {
        id,
        graph_type,
        name: raw.name,
        failure_message: raw.failure_message.filter(|m| !m.is_empty()),
        local_params: raw.local_params.into(),
        codecs: raw.codec_ids.into_iter().map(CodecId).collect(),
    }
}

fn stamp_owning_graphs(
    codecs: &mut [Codec],
    graphs: &[FunctionGraph],
) -> Result<(), ConsistencyError> {
    for graph in graphs {
        for &codec_id in &graph.codecs {
            let codec = codecs
                .get_mut(codec_id.index())
                .ok_or(ConsistencyError::UnknownCodec {
                    graph: graph.id,
                    codec: codec_id,
                })?;
            match codec.owning_graph {
                Some(first) if first != graph.id => {
                    return Err(ConsistencyError::CodecInMultipleGraphs {
                        codec: codec_id,
                        first,
                        second: graph.id,
                    });
                }
                _ => codec.owning_graph = Some(graph.id),
            }
        }
    }
    Ok(())
}

fn stamp_stream_endpoints(codecs: &[Codec], streams: &mut [Stream]) -> Result<(), ConsistencyError> {
    for codec in codecs {
        for &stream_id in &codec.outputs {
            let stream = streams
                .get_mut(stream_id.index())
                .ok_or(ConsistencyError::UnknownStream {
                    codec: codec.id,
                    stream: stream_id,
                })?;
            match stream.source {
                Some(first) if first != codec.id => {
                    return Err(ConsistencyError::StreamMultipleSources {
                        stream: stream_id,
                        first,
                        second: codec.id,
                    });
                }
                _ => stream.source = Some(codec.id),
            }
        }

        for &stream_id in &codec.inputs {
            let stream = streams
                .get_mut(stream_id.index())
                .ok_or(ConsistencyError::UnknownStream {
                    codec: codec.id,
                    stream: stream_id,
                })?;
            match stream.target {
                Some(first) if first != codec.id => {
                    return Err(ConsistencyError::StreamMultipleTargets {
                        stream: stream_id,
                        first,
                        second: codec.id,
                    });
                }
                _ => stream.target = Some(codec.id),
            }
        }
    }
    Ok(())
}

/// The codec lists are authoritative; disagreeing hints are only reported.
fn check_endpoint_hints(streams: &[Stream], hints: &[EndpointHint]) {
    for (stream, &(source_hint, target_hint)) in streams.iter().zip(hints) {
        if let Some(hint) = source_hint {
            if stream.source != Some(CodecId(hint)) {
                tracing::warn!(
                    stream = %stream.id,
                    hint,
                    stamped = ?stream.source,
                    "serialized source codec disagrees with codec output lists"
                );
            }
        }
        if let Some(hint) = target_hint {
            if stream.target != Some(CodecId(hint)) {
                tracing::warn!(
                    stream = %stream.id,
                    hint,
                    stamped = ?stream.target,
                    "serialized target codec disagrees with codec input lists"
                );
            }
        }
    }
}

/// Store buffers have a producer but no consumer and draw no edge.
fn drop_terminal_streams(
    codecs: &mut [Codec],
    streams: &mut [Stream],
) -> Result<(), ConsistencyError> {
    let mut terminal_by_codec: HashMap<CodecId, Vec<StreamId>> = HashMap::new();

    for stream in streams.iter_mut() {
        // S0 is the root input; drop_root_input reports it
        if stream.id == ROOT_INPUT_STREAM || stream.target.is_some() {
            continue;
        }
        let source = stream
            .source
            .ok_or(ConsistencyError::TerminalStreamWithoutSource { stream: stream.id })?;
        stream.exclusion = Some(StreamExclusion::Terminal);
        terminal_by_codec.entry(source).or_default().push(stream.id);
    }

    let mut sources: Vec<_> = terminal_by_codec.into_iter().collect();
    sources.sort_by_key(|(codec, _)| *codec);

    for (codec_id, terminal) in sources {
        if terminal.len() > 1 {
            return Err(ConsistencyError::MultipleTerminalStreams {
                codec: codec_id,
                streams: terminal,
            });
        }
        if let Some(codec) = codecs.get_mut(codec_id.index()) {
            codec.outputs.retain(|s| !terminal.contains(s));
        }
        tracing::debug!(codec = %codec_id, stream = ?terminal, "dropped terminal stream");
    }
    Ok(())
}

/// S0 feeds the root from outside the pipeline; the root ends with no inputs.
fn drop_root_input(codecs: &mut [Codec], streams: &mut [Stream]) -> Result<(), ConsistencyError> {
    let sentinel = streams
        .get_mut(ROOT_INPUT_STREAM.index())
        .ok_or(ConsistencyError::MissingRootInput)?;

    if sentinel.target != Some(ROOT_CODEC) {
        return Err(ConsistencyError::RootInputTarget {
            found: sentinel.target,
        });
    }
    if let Some(source_codec) = sentinel.source {
        return Err(ConsistencyError::RootInputProduced { source_codec });
    }

    let root = codecs
        .get_mut(ROOT_CODEC.index())
        .ok_or(ConsistencyError::EmptyTrace)?;
    if root.inputs != [ROOT_INPUT_STREAM] {
        return Err(ConsistencyError::RootInputs {
            inputs: root.inputs.clone(),
        });
    }

    root.inputs.clear();
    sentinel.exclusion = Some(StreamExclusion::RootInput);
    Ok(())
}

fn check_normalized(codecs: &[Codec], streams: &[Stream]) -> Result<(), ConsistencyError> {
    if let Some(stream) = streams
        .iter()
        .find(|s| !s.is_excluded() && s.source.is_none())
    {
        return Err(ConsistencyError::StreamWithoutSource { stream: stream.id });
    }
    if let Some(codec) = codecs
        .iter()
        .find(|c| c.id != ROOT_CODEC && c.inputs.is_empty())
    {
        return Err(ConsistencyError::AdditionalRoot { codec: codec.id });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{linear_split, two_graphs, TraceBuilder};
    use super::*;
    use pretty_assertions::assert_eq;

    fn build_default(trace: SerializedStreamdump) -> Result<StreamdumpGraph, ConsistencyError> {
        build(trace, ViewConfig::default())
    }

    #[test]
    fn test_linear_split_normalizes() {
        let graph = build_default(linear_split()).unwrap();

        let root = graph.store().codec(ROOT_CODEC).unwrap();
        assert!(root.inputs.is_empty());
        assert_eq!(
            graph.store().stream(ROOT_INPUT_STREAM).unwrap().exclusion,
            Some(StreamExclusion::RootInput)
        );
        assert_eq!(graph.stream_edges.len(), 3);
        assert_eq!(
            graph.real_edge(StreamId(2)).unwrap().label,
            "#0 (S2) | Serialized\n60 [60.00%]\n60 [1]"
        );
    }

    #[test]
    fn test_terminal_stream_dropped() {
        let trace = TraceBuilder::new()
            .codec("leaf")
            .edge(0, 1, 10)
            .stream(1, None, 10, 100.0)
            .build();
        let graph = build_default(trace).unwrap();

        let leaf = graph.store().codec(CodecId(1)).unwrap();
        assert!(leaf.outputs.is_empty());
        assert_eq!(
            graph.store().stream(StreamId(2)).unwrap().exclusion,
            Some(StreamExclusion::Terminal)
        );
        assert!(graph.real_edge(StreamId(2)).is_none());
    }

    #[test]
    fn test_multiple_terminal_streams_rejected() {
        let trace = TraceBuilder::new()
            .codec("leaf")
            .edge(0, 1, 10)
            .stream(1, None, 5, 50.0)
            .stream(1, None, 5, 50.0)
            .build();
        assert_eq!(
            build_default(trace).unwrap_err(),
            ConsistencyError::MultipleTerminalStreams {
                codec: CodecId(1),
                streams: vec![StreamId(2), StreamId(3)],
            }
        );
    }

    #[test]
    fn test_terminal_stream_without_source() {
        let mut trace = linear_split();
        trace.streams.push(Default::default());
        assert_eq!(
            build_default(trace).unwrap_err(),
            ConsistencyError::TerminalStreamWithoutSource {
                stream: StreamId(4)
            }
        );
    }

    #[test]
    fn test_root_input_preconditions() {
        let mut trace = linear_split();
        trace.codecs[0].input_stream_ids.clear();
        assert_eq!(
            build_default(trace).unwrap_err(),
            ConsistencyError::RootInputTarget { found: None }
        );

        let mut trace = linear_split();
        trace.codecs[0].input_stream_ids.push(99);
        assert!(matches!(
            build_default(trace).unwrap_err(),
            ConsistencyError::UnknownStream { .. }
        ));

        let mut trace = TraceBuilder::new().codec("a").edge(0, 1, 1).build();
        trace.codecs[1].input_stream_ids.push(0);
        assert_eq!(
            build_default(trace).unwrap_err(),
            ConsistencyError::StreamMultipleTargets {
                stream: StreamId(0),
                first: CodecId(0),
                second: CodecId(1),
            }
        );
    }

    #[test]
    fn test_root_with_extra_input() {
        let mut trace = TraceBuilder::new().codec("a").edge(0, 1, 1).build();
        trace.streams.push(Default::default());
        trace.codecs[0].input_stream_ids.push(2);
        trace.codecs[1].output_stream_ids.push(2);
        assert_eq!(
            build_default(trace).unwrap_err(),
            ConsistencyError::RootInputs {
                inputs: vec![StreamId(0), StreamId(2)]
            }
        );
    }

    #[test]
    fn test_additional_root_rejected() {
        let trace = TraceBuilder::new()
            .codec("a")
            .codec("orphan")
            .edge(0, 1, 1)
            .build();
        assert_eq!(
            build_default(trace).unwrap_err(),
            ConsistencyError::AdditionalRoot { codec: CodecId(2) }
        );
    }

    #[test]
    fn test_cycle_rejected() {
        let trace = TraceBuilder::new()
            .codec("a")
            .codec("b")
            .edge(0, 1, 1)
            .edge(1, 2, 1)
            .edge(2, 1, 1)
            .build();
        assert_eq!(
            build_default(trace).unwrap_err(),
            ConsistencyError::Cycle {
                unresolved: vec![CodecId(1), CodecId(2)]
            }
        );
    }

    #[test]
    fn test_graph_errors() {
        let trace = TraceBuilder::new()
            .codec("a")
            .edge(0, 1, 1)
            .graph("standard", &[1])
            .graph("static", &[1])
            .build();
        assert_eq!(
            build_default(trace).unwrap_err(),
            ConsistencyError::CodecInMultipleGraphs {
                codec: CodecId(1),
                first: GraphId(0),
                second: GraphId(1),
            }
        );

        let trace = TraceBuilder::new().graph("standard", &[7]).build();
        assert_eq!(
            build_default(trace).unwrap_err(),
            ConsistencyError::UnknownCodec {
                graph: GraphId(0),
                codec: CodecId(7),
            }
        );
    }

    #[test]
    fn test_unknown_graph_type_is_non_standard() {
        let trace = TraceBuilder::new()
            .codec("a")
            .edge(0, 1, 5)
            .graph("recursive", &[1])
            .build();
        let graph = build_default(trace).unwrap();

        let group = graph.store().graph(GraphId(0)).unwrap();
        assert_eq!(group.graph_type, GraphType::Unknown);
        assert!(!group.is_standard());
        assert_eq!(group.detail(), "Unknown | 1 codecs");
    }

    #[test]
    fn test_empty_trace() {
        assert_eq!(
            build_default(SerializedStreamdump::default()).unwrap_err(),
            ConsistencyError::EmptyTrace
        );
    }

    #[test]
    fn test_hints_do_not_override_codec_lists() {
        let mut trace = linear_split();
        trace.streams[2].source_codec = Some(3);
        trace.streams[2].target_codec = Some(2);
        let graph = build_default(trace).unwrap();
        let stream = graph.store().stream(StreamId(2)).unwrap();
        assert_eq!(stream.source, Some(CodecId(1)));
        assert_eq!(stream.target, Some(CodecId(2)));
    }

    #[test]
    fn test_owning_graph_stamped() {
        let graph = build_default(two_graphs()).unwrap();
        assert_eq!(graph.owning_graph(CodecId(1)), Some(GraphId(0)));
        assert_eq!(graph.owning_graph(CodecId(3)), Some(GraphId(1)));
        assert_eq!(graph.owning_graph(ROOT_CODEC), None);
    }
}
