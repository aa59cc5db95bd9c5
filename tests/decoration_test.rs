//! Status decoration pipeline: precedence, completion barrier, failures.

mod common;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use common::mock::MockOracle;
use port_deptree::domain::builder::GraphBuilder;
use port_deptree::domain::decorator::{DecorationStopped, StatusDecorator, lookup_status};
use port_deptree::domain::graph::DependencyGraph;
use port_deptree::domain::node::NodeStatus;
use port_deptree::domain::ports::OracleError;

#[test]
fn test_missing_wins_over_outdated() {
    let oracle = MockOracle::new().missing("perl5").outdated("perl5");
    assert_eq!(lookup_status(&oracle, "perl5").unwrap(), NodeStatus::Missing);
    assert_eq!(oracle.outdated_count("perl5"), 0, "absent ports are not checked for upgrades");
}

#[test]
fn test_outdated_when_installed() {
    let oracle = MockOracle::new().outdated("glib2");
    assert_eq!(lookup_status(&oracle, "glib2").unwrap(), NodeStatus::Outdated);
    assert_eq!(lookup_status(&oracle, "ncurses").unwrap(), NodeStatus::Installed);
}

#[test]
fn test_delayed_oracle_leaves_no_unknown_status() {
    let oracle = Arc::new(
        MockOracle::new()
            .with_deps("a", &[("library", "b"), ("build", "c"), ("runtime", "d")])
            .with_deps("b", &[("library", "e")])
            .missing("c")
            .outdated("d")
            .with_status_delay(Duration::from_millis(20)),
    );
    let mut builder = GraphBuilder::new(oracle.clone()).unwrap();
    builder.traverse("a", &[]).unwrap();
    let graph = builder.finish().unwrap();

    assert_eq!(graph.node_count(), 5);
    assert!(graph.nodes().all(|node| node.status != NodeStatus::Unknown));
    assert_eq!(graph.node("c").unwrap().status, NodeStatus::Missing);
    assert_eq!(graph.node("d").unwrap().status, NodeStatus::Outdated);
    assert_eq!(graph.node("e").unwrap().status, NodeStatus::Installed);
}

#[test]
fn test_finish_reports_decorated_count() {
    let graph = DependencyGraph::new();
    let oracle = Arc::new(MockOracle::new().missing("xz"));
    let decorator = StatusDecorator::spawn(oracle, graph.clone()).unwrap();
    for name in ["xz", "zlib"] {
        graph.add_node(name);
        decorator.enqueue(name).unwrap();
    }

    assert_eq!(decorator.finish().unwrap(), 2);
    assert_eq!(graph.node_data("xz").unwrap().status, NodeStatus::Missing);
    assert_eq!(graph.node_data("zlib").unwrap().status, NodeStatus::Installed);
}

#[test]
fn test_status_failure_surfaces_at_finish() {
    let oracle = Arc::new(MockOracle::new().with_deps("a", &[("library", "b")]).unavailable("b"));
    let graph = DependencyGraph::new();
    let decorator = StatusDecorator::spawn(oracle, graph.clone()).unwrap();
    graph.add_node("b");
    decorator.enqueue("b").unwrap();

    let err = decorator.finish().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<OracleError>(),
        Some(OracleError::Unavailable { .. })
    ));
}

#[test]
fn test_status_failure_fails_the_build() {
    let oracle = Arc::new(
        MockOracle::new()
            .with_deps("a", &[("library", "b")])
            .status_unavailable("b"),
    );
    let mut builder = GraphBuilder::new(oracle).unwrap();
    // The worker may stop before or after the walk ends.
    let err = match builder.traverse("a", &[]) {
        Ok(_) => builder.finish().unwrap_err(),
        Err(err) => err,
    };
    assert!(format!("{:#}", err).contains("Failed to determine status of b"));
}

#[test]
fn test_status_failure_stops_traversal_early() {
    let mut oracle = MockOracle::new().with_list_delay(Duration::from_millis(5));
    for i in 0..50 {
        let parent = format!("p{}", i);
        let child = format!("p{}", i + 1);
        oracle = oracle.with_deps(&parent, &[("library", child.as_str())]);
    }
    let oracle = Arc::new(oracle.status_unavailable("p0"));
    let mut builder = GraphBuilder::new(oracle.clone()).unwrap();

    let err = builder.traverse("p0", &[]).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Status decoration failed"), "{}", message);
    assert!(message.contains("Failed to determine status of p0"), "{}", message);
    assert!(
        oracle.total_list_count() < 25,
        "walk continued for {} ports",
        oracle.total_list_count()
    );
    assert!(builder.traverse("p0", &[]).is_err());
    assert!(builder.finish().is_err());
}

#[test]
fn test_enqueue_fails_after_worker_stopped() {
    let oracle = Arc::new(MockOracle::new().status_unavailable("b"));
    let graph = DependencyGraph::new();
    let decorator = StatusDecorator::spawn(oracle, graph.clone()).unwrap();
    graph.add_node("b");
    decorator.enqueue("b").unwrap();

    while !decorator.is_stopped() {
        thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(decorator.enqueue("c"), Err(DecorationStopped));
    assert!(decorator.finish().is_err());
}
