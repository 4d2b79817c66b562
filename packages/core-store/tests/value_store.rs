//! End-to-end behavior of trees, references and layered stores.

use std::rc::Rc;

use valuestore_core::{
    Error, LayeredStore, PropertyTree, SharedStore, TreeStore, ValueStoreRef,
};

fn sample_tree() -> PropertyTree {
    let mut pt = PropertyTree::new();
    pt.set_double("d", 0.1);
    pt.set_double("d/i", 10.0);
    pt.set_double("d/d", 0.2);
    pt.set_double("d/d/d", 0.3);
    pt.set_double("d/d/j", 11.0);
    pt
}

fn keys(refs: &[ValueStoreRef]) -> Vec<String> {
    refs.iter()
        .map(|r| r.key().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn simple_tree_store() {
    let pt = sample_tree();
    assert_eq!(pt.get_double("d").unwrap(), 0.1);
    assert_eq!(pt.get_int("d/i").unwrap(), 10);
    assert_eq!(pt.get_double("d/d").unwrap(), 0.2);
    assert_eq!(pt.get_double("d/d/d").unwrap(), 0.3);
    assert_eq!(pt.get_int("d/d/j").unwrap(), 11);

    let tree = pt.into_shared();
    let vpt = ValueStoreRef::from_store(TreeStore::shared(tree.clone()));

    assert!(!vpt.has_key("BLA"));
    assert!(vpt.has_key("d"));
    assert_eq!(vpt.get_double("d").get(), 0.1);
    assert!(vpt.has_key("d/d"));
    assert_eq!(vpt.get_double("d/d").get(), 0.2);

    let d_child = vpt.child("d");
    assert_eq!(d_child.key(), Some("d"));
    assert_eq!(d_child.get_double("").get(), 0.1);
    assert_eq!(d_child.get_double("d").get(), 0.2);

    let dd_child = d_child.child("d");
    assert_eq!(dd_child.get_double("d").get(), 0.3);

    assert_eq!(keys(&d_child.children()), vec!["i", "d"]);
    assert_eq!(keys(&dd_child.children()), vec!["d", "j"]);

    let top = vpt.children();
    assert_eq!(keys(&top), vec!["d"]);
    assert!((top[0].get_double("").get() - 0.1).abs() < 1e-16);
    assert!((top[0].get_double("d").get() - 0.2).abs() < 1e-16);
    assert_eq!(keys(&top[0].children()), vec!["i", "d"]);

    vpt.add_int("ai", 4).unwrap();
    assert_eq!(tree.borrow().get_int("ai").unwrap(), 4);
    assert_eq!(vpt.get_int("ai").get(), 4);

    let nd = vpt.child("nD");
    nd.add_int("i", 3).unwrap();
    assert_eq!(tree.borrow().get_int("nD/i").unwrap(), 3);
}

#[test]
fn convert_reference_to_tree() {
    let mut pt = sample_tree();
    pt.set_string("d/s", "BLA");
    let vpt = ValueStoreRef::from_store(TreeStore::new(pt));

    let snapshot = vpt.as_tree();
    assert_eq!(snapshot.get_double("d").unwrap(), 0.1);
    assert_eq!(snapshot.get_int("d/i").unwrap(), 10);
    assert_eq!(snapshot.get_double("d/d").unwrap(), 0.2);
    assert_eq!(snapshot.get_double("d/d/d").unwrap(), 0.3);
    assert_eq!(snapshot.get_string("d/s").unwrap(), "BLA");

    let child = vpt.child("d");
    assert_eq!(child.get_double(""), 0.1);
    assert_eq!(child.get_int("i"), 10);
    assert_eq!(child.get_double("d"), 0.2);
    assert_eq!(child.get_double("d/d"), 0.3);
    assert_eq!(child.get_string("s").get(), "BLA");

    let child_tree = child.as_tree();
    assert_eq!(child_tree.get_double("").unwrap(), 0.1);
    assert_eq!(child_tree.get_int("i").unwrap(), 10);
    assert_eq!(child_tree.get_double("d").unwrap(), 0.2);
    assert_eq!(child_tree.get_double("d/d").unwrap(), 0.3);
    assert_eq!(child_tree.get_string("s").unwrap(), "BLA");
}

#[test]
fn layered_value_store() {
    let mut pt = PropertyTree::new();
    pt.set_double("d", 0.1);
    let mut pt2 = PropertyTree::new();
    pt2.set_double("a", 0.1);
    let vpt = ValueStoreRef::from_store(TreeStore::new(pt));
    let vpt2 = ValueStoreRef::from_store(TreeStore::new(pt2));

    let lpt = ValueStoreRef::from_store(
        LayeredStore::new(vec![vpt.store().clone(), vpt2.store().clone()]).unwrap(),
    );

    assert!(!lpt.has_key("BLA"));
    assert!(lpt.has_key("d"));
    assert_eq!(lpt.get_double("d"), 0.1);
    assert!(lpt.has_key("a"));
    assert_eq!(lpt.get_double("a"), 0.1);

    // The layers outlive the references used to build them.
    drop(vpt);
    drop(vpt2);
    assert_eq!(lpt.get_double("d"), 0.1);
}

#[test]
fn absent_in_every_layer_for_every_type() {
    let layers: Vec<SharedStore> = vec![
        Rc::new(TreeStore::new(sample_tree())),
        Rc::new(TreeStore::new(PropertyTree::new())),
    ];
    let root = ValueStoreRef::from_store(LayeredStore::new(layers).unwrap());
    for path in ["BLA", "d/x", "d/d/d/d", "a/b/c"] {
        assert!(!root.has_key(path));
        assert!(root.get_bool(path).is_absent());
        assert!(root.get_int(path).is_absent());
        assert!(root.get_double(path).is_absent());
        assert!(root.get_string(path).is_absent());
        assert!(root.leaf(path).is_none());
    }
}

#[test]
fn integer_widening() {
    let mut pt = PropertyTree::new();
    pt.set_int("p", 10);
    pt.set_double("q", 2.5);
    let root = ValueStoreRef::from_store(TreeStore::new(pt));

    assert_eq!(root.get_int("p"), 10);
    assert_eq!(root.get_double("p"), 10.0);
    assert_eq!(root.get_double("q"), 2.5);
    assert!(root.get_int("q").is_absent());
    assert!(root.get_string("p").is_absent());
    assert!(root.has_key("q"));
}

#[test]
fn exact_decimals_survive() {
    let root = ValueStoreRef::from_store(TreeStore::new(sample_tree()));
    assert_eq!(root.get_double("d").get(), 0.1);
    assert_eq!(root.get_double("d/d").get(), 0.2);
    assert_eq!(root.get_double("d/d/d").get(), 0.3);
}

#[test]
fn repeated_reads_are_identical() {
    let root = ValueStoreRef::from_store(TreeStore::new(sample_tree()));
    let first = keys(&root.child("d").children());
    let second = keys(&root.child("d").children());
    assert_eq!(first, second);
    assert_eq!(root.get_double("d/d"), root.get_double("d/d"));
}

#[test]
fn round_trip_through_fresh_reference() {
    let tree = PropertyTree::new().into_shared();
    let writer = ValueStoreRef::from_store(TreeStore::shared(tree.clone()));
    writer.add_bool("flag", true).unwrap();
    writer.add_int("n", -7).unwrap();
    writer.add_double("x", 0.3).unwrap();
    writer.add_string("name", "BLA").unwrap();

    let reader = ValueStoreRef::from_store(TreeStore::shared(tree));
    assert!(reader.get_bool("flag").get());
    assert_eq!(reader.get_int("n"), -7);
    assert_eq!(reader.get_double("x"), 0.3);
    assert_eq!(reader.get_string("name"), "BLA");
}

#[test]
fn snapshot_is_disconnected() {
    let tree = sample_tree().into_shared();
    let root = ValueStoreRef::from_store(TreeStore::shared(tree.clone()));
    let snapshot = root.child("d").as_tree();

    tree.borrow_mut().set_double("d/d", 42.0);
    tree.borrow_mut().remove("d/i");
    assert_eq!(snapshot.get_double("d").unwrap(), 0.2);
    assert_eq!(snapshot.get_int("i").unwrap(), 10);
}

#[test]
fn layered_store_rejects_writes() {
    let tree = sample_tree().into_shared();
    let top: SharedStore = Rc::new(TreeStore::shared(tree.clone()));
    let root = ValueStoreRef::from_store(LayeredStore::new(vec![top]).unwrap());

    let err = root.add_int("ai", 4).unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
    assert!(!tree.borrow().has_key("ai"));
}

#[test]
#[should_panic(expected = "empty access")]
fn forcing_an_absent_value_panics() {
    let root = ValueStoreRef::from_store(TreeStore::new(sample_tree()));
    root.get_double("BLA").get();
}
