use std::collections::HashSet;

use redline_core::{DistributionError, Distributor, KeyHash, Node, RandomDistributor};

fn replicas(count: usize) -> Vec<Node<String>> {
    (0..count)
        .map(|i| Node::new(format!("replica-{i}"), format!("redis://10.0.0.{i}:6379")))
        .collect()
}

#[test]
fn test_fresh_distributor_has_no_backend() {
    let mut distributor: RandomDistributor<Node<String>> = RandomDistributor::new();
    let keys: [&[u8]; 3] = [b"", b"user:1", b"session:abc"];
    for key in keys {
        assert_eq!(distributor.get(key), Err(DistributionError::EmptyNodeSet));
    }
}

#[test]
fn test_selection_stays_within_registered_set() {
    let nodes = replicas(4);
    let mut distributor = RandomDistributor::seeded(2024);
    for node in &nodes {
        distributor.add(node.clone(), None);
    }

    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let selected = distributor.get(b"any").unwrap();
        let position = nodes
            .iter()
            .position(|node| node == selected)
            .expect("selected node must be registered");
        seen.insert(position);
    }

    assert_eq!(seen.len(), 4, "every node should be picked at least once");
}

#[test]
fn test_removed_node_is_never_selected() {
    let nodes = replicas(2);
    let (x, y) = (nodes[0].clone(), nodes[1].clone());
    let mut distributor = RandomDistributor::new();
    distributor.add(x.clone(), None);
    distributor.add(y.clone(), None);
    distributor.remove(&x);

    for _ in 0..1_000 {
        let selected = distributor.get(b"key").unwrap();
        assert_ne!(selected, &x);
        assert_eq!(selected, &y);
    }
}

#[test]
fn test_remove_uses_identity_not_label() {
    let first = Node::new("replica", String::from("redis://10.0.0.1/"));
    let twin = Node::new("replica", String::from("redis://10.0.0.1/"));
    let mut distributor = RandomDistributor::seeded(3);
    distributor.add(first.clone(), None);
    distributor.remove(&twin);

    assert_eq!(distributor.len(), 1);
    assert_eq!(distributor.get(b"k").unwrap(), &first);
}

#[test]
fn test_remove_all_duplicates() {
    let node = replicas(1).remove(0);
    let mut distributor = RandomDistributor::seeded(5);
    distributor.add(node.clone(), Some(1));
    distributor.add(node.clone(), Some(5));
    assert_eq!(distributor.len(), 2);

    distributor.remove(&node);
    assert!(distributor.is_empty());
    assert_eq!(distributor.get(b"k"), Err(DistributionError::EmptyNodeSet));
}

#[test]
fn test_weights_do_not_skew_selection() {
    let nodes = replicas(2);
    let mut distributor = RandomDistributor::seeded(11);
    distributor.add(nodes[0].clone(), Some(1000));
    distributor.add(nodes[1].clone(), Some(1));

    let heavy = (0..10_000)
        .filter(|_| distributor.get(b"k").unwrap() == &nodes[0])
        .count();
    assert!(
        (4_000..6_000).contains(&heavy),
        "selection should stay uniform, got {heavy} of 10000"
    );
}

#[test]
fn test_works_through_trait_object() {
    let nodes = replicas(3);
    let mut distributor: Box<dyn Distributor<Node<String>>> =
        Box::new(RandomDistributor::seeded(9));
    for node in &nodes {
        distributor.add(node.clone(), None);
    }

    assert_eq!(distributor.hash(b"user:1"), KeyHash::KeyIndependent);
    assert!(nodes.contains(distributor.get(b"user:1").unwrap()));
}
