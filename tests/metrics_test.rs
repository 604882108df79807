use graphlens::degree::{profile, DegreeKind};
use graphlens::metrics::compute;
use graphlens::{select, Graph, PropertyMap, SelectionPolicy};

fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
    let mut b = Graph::builder();
    for id in nodes {
        b.add_node(*id, PropertyMap::new()).unwrap();
    }
    for (s, t) in edges {
        b.add_edge(*s, *t, PropertyMap::new()).unwrap();
    }
    b.build()
}

#[test]
fn test_single_self_loop() {
    let g = graph(&["A"], &[("A", "A")]);
    let report = compute(&g);

    assert_eq!(report.density, 0.0);
    assert_eq!(report.weakly_connected_components, 1);
    assert_eq!(profile(&g, DegreeKind::Total), vec![2]);
}

#[test]
fn test_complete_digraph() {
    let nodes = ["a", "b", "c"];
    let mut edges = Vec::new();
    for s in nodes {
        for t in nodes {
            if s != t {
                edges.push((s, t));
            }
        }
    }
    let report = compute(&graph(&nodes, &edges));

    assert!((report.density - 1.0).abs() < 1e-12);
    assert!((report.average_clustering - 1.0).abs() < 1e-12);
    assert_eq!(report.strongly_connected_components, 1);
    assert_eq!(report.assortativity, None);
}

#[test]
fn test_components_on_dag_with_islands() {
    let report = compute(&graph(
        &["a", "b", "c", "d", "e"],
        &[("a", "b"), ("b", "c"), ("a", "c"), ("d", "e")],
    ));
    assert_eq!(report.weakly_connected_components, 2);
    assert_eq!(report.strongly_connected_components, 5);
    // a, b, c form a triangle in the projection; d, e have degree 1
    assert!((report.average_clustering - 3.0 / 5.0).abs() < 1e-12);
}

#[test]
fn test_metrics_on_empty_kcore() {
    let g = graph(&["a", "b"], &[("a", "b")]);
    let sub = select(&g, SelectionPolicy::KCore(2)).unwrap();
    let report = compute(sub.graph());

    assert!(report.is_empty());
    assert_eq!(report.weakly_connected_components, 0);
    assert_eq!(report.strongly_connected_components, 0);
    assert_eq!(report.density, 0.0);
}

#[test]
fn test_metrics_serialize_none_as_null() {
    let report = compute(&graph(&["a", "b"], &[("a", "b")]));
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["assortativity"].is_null());
    assert_eq!(json["node_count"], 2);
}
