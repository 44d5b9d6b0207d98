use pretty_assertions::assert_eq;
use pytree_core::{
    Error, NAMESPACE, Registry, Tree, TreeSpec, tree_flatten, tree_iter, tree_leaves,
    tree_structure, tree_unflatten,
};
use serde_json::json;

fn registry() -> Registry<Tree> {
    let mut registry = Registry::with_builtins();
    registry
        .register_object(NAMESPACE, "Point")
        .expect("fresh registry");
    registry
}

fn samples() -> Vec<Tree> {
    vec![
        Tree::None,
        Tree::Int(7),
        Tree::list(Vec::new()),
        Tree::tuple([Tree::Int(1), Tree::list([Tree::Int(2), Tree::Int(3)])]),
        Tree::dict([
            ("a", Tree::Int(1)),
            ("b", Tree::dict([("c", Tree::Int(2))])),
        ]),
        Tree::list([
            Tree::None,
            Tree::tuple([Tree::from("s")]),
            Tree::object("Point", [("x", Tree::Float(0.5)), ("y", Tree::Bool(true))]),
            Tree::object("Opaque", [("inner", Tree::Int(9))]),
        ]),
        Tree::from(json!({"z": [1, {"y": null}], "a": []})),
    ]
}

#[test]
fn scenario_a_pair_of_int_and_list() {
    let registry = registry();
    let tree = Tree::tuple([Tree::Int(1), Tree::list([Tree::Int(2), Tree::Int(3)])]);

    let (leaves, spec) = tree_flatten(tree.clone(), &registry, None).unwrap();
    assert_eq!(leaves, vec![Tree::Int(1), Tree::Int(2), Tree::Int(3)]);
    assert_eq!(spec.num_leaves(), 3);
    assert_eq!(spec.num_children(), 2);

    let rebuilt = spec
        .unflatten(vec![Tree::Int(1), Tree::Int(2), Tree::Int(3)])
        .unwrap();
    assert_eq!(rebuilt, tree);
}

#[test]
fn scenario_b_none_is_a_leaf() {
    let registry = registry();
    let (leaves, spec) = tree_flatten(Tree::None, &registry, None).unwrap();
    assert_eq!(leaves, vec![Tree::None]);
    assert_eq!(spec, TreeSpec::LEAF);
    assert_eq!(spec.num_leaves(), 1);

    let walked: Vec<Tree> = tree_iter(Tree::None, &registry, None)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(walked, vec![Tree::None]);
}

#[test]
fn scenario_c_nested_mapping_keeps_insertion_order() {
    let registry = registry();
    let tree = Tree::dict([
        ("a", Tree::Int(1)),
        ("b", Tree::dict([("c", Tree::Int(2))])),
    ]);

    let (leaves, spec) = tree_flatten(tree.clone(), &registry, None).unwrap();
    assert_eq!(leaves, vec![Tree::Int(1), Tree::Int(2)]);
    let rendered = "TreeSpec({'a': *, 'b': {'c': *}}, namespace='torch')";
    assert_eq!(spec.to_string(), rendered);

    let rebuilt = spec.unflatten(leaves).unwrap();
    assert_eq!(rebuilt, tree);

    // Reverse-alphabetical keys stay in the order they were inserted.
    let tree = Tree::dict([("z", Tree::Int(1)), ("a", Tree::Int(2))]);
    let (leaves, spec) = tree_flatten(tree.clone(), &registry, None).unwrap();
    assert_eq!(leaves, vec![Tree::Int(1), Tree::Int(2)]);
    assert_eq!(spec.unflatten(leaves).unwrap(), tree);
}

#[test]
fn scenario_d_unregistered_object_is_opaque() {
    let registry = registry();
    let obj = Tree::object("Handle", [("fd", Tree::Int(3))]);

    let (leaves, spec) = tree_flatten(obj.clone(), &registry, None).unwrap();
    assert_eq!(leaves, vec![obj.clone()]);
    assert_eq!(spec, TreeSpec::LEAF);

    let walked = tree_leaves(obj.clone(), &registry, None).unwrap();
    assert_eq!(walked, vec![obj]);
}

#[test]
fn round_trip_reproduces_every_sample() {
    let registry = registry();
    for tree in samples() {
        let (leaves, spec) = tree_flatten(tree.clone(), &registry, None).unwrap();
        assert_eq!(leaves.len(), spec.num_leaves());
        assert_eq!(tree_unflatten(leaves, &spec).unwrap(), tree);
    }
}

#[test]
fn walker_and_flatten_agree_on_leaf_order() {
    let registry = registry();
    let tuples = |t: &Tree| matches!(t, Tree::Tuple(_));
    let objects = |t: &Tree| matches!(t, Tree::Object { .. });
    let big_ints = |t: &Tree| matches!(t, Tree::Int(i) if *i > 1);
    let predicates: [Option<&dyn Fn(&Tree) -> bool>; 4] =
        [None, Some(&tuples), Some(&objects), Some(&big_ints)];
    for tree in samples() {
        for is_leaf in &predicates {
            let walked = tree_leaves(tree.clone(), &registry, *is_leaf).unwrap();
            let (flat, spec) = tree_flatten(tree.clone(), &registry, *is_leaf).unwrap();
            assert_eq!(walked, flat);
            assert_eq!(spec.num_leaves(), flat.len());
        }
    }
}

#[test]
fn structure_matches_flatten_spec() {
    let registry = registry();
    for tree in samples() {
        let spec = tree_structure(tree.clone(), &registry, None).unwrap();
        let (_, from_flatten) = tree_flatten(tree, &registry, None).unwrap();
        assert_eq!(spec, from_flatten);
    }
}

#[test]
fn predicate_leaves_round_trip_untouched() {
    let registry = registry();
    let tree = Tree::list([
        Tree::tuple([Tree::Int(1), Tree::Int(2)]),
        Tree::tuple([Tree::Int(3)]),
    ]);
    let is_tuple = |t: &Tree| matches!(t, Tree::Tuple(_));
    let (leaves, spec) = tree_flatten(tree.clone(), &registry, Some(&is_tuple)).unwrap();
    assert_eq!(leaves.len(), 2);
    assert_eq!(spec.to_string(), "TreeSpec([*, *], namespace='torch')");
    assert_eq!(spec.unflatten(leaves).unwrap(), tree);
}

#[test]
fn length_mismatch_in_both_directions() {
    let registry = registry();
    let tree = Tree::tuple([Tree::Int(1), Tree::list([Tree::Int(2), Tree::Int(3)])]);
    let (_, spec) = tree_flatten(tree, &registry, None).unwrap();

    let err = spec.unflatten(Vec::new()).unwrap_err();
    assert_eq!(
        err,
        Error::LengthMismatch {
            supplied: 0,
            expected: 3,
            spec: spec.to_string(),
        }
    );

    let padded = vec![Tree::Int(0); 4];
    let err = tree_unflatten(padded, &spec).unwrap_err();
    assert_eq!(
        err.to_string(),
        "treespec.unflatten(leaves): `leaves` has length 4 but the spec refers to a pytree \
         that holds 3 items (TreeSpec((*, [*, *]), namespace='torch'))"
    );
}

#[test]
fn type_mismatch_regardless_of_leaves() {
    for leaves in [Vec::new(), vec![Tree::Int(1)], vec![Tree::None; 3]] {
        let not_a_spec = Tree::list([Tree::Int(1)]);
        let err = tree_unflatten(leaves, &not_a_spec).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }
}

#[test]
fn single_child_containers_are_never_leaf_specs() {
    let registry = registry();
    for tree in [
        Tree::list([Tree::Int(1)]),
        Tree::tuple([Tree::None]),
        Tree::dict([("only", Tree::Int(1))]),
        Tree::object("Point", [("x", Tree::Int(1))]),
    ] {
        let spec = tree_structure(tree, &registry, None).unwrap();
        assert_eq!(spec.num_leaves(), 1);
        assert!(!spec.is_leaf());
    }
}

#[test]
fn specs_are_shareable_across_threads() {
    let registry = registry();
    let tree = Tree::dict([("a", Tree::Int(1)), ("b", Tree::Int(2))]);
    let (_, spec) = tree_flatten(tree, &registry, None).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let spec = spec.clone();
            std::thread::spawn(move || spec.unflatten(vec![Tree::Int(i), Tree::Int(i + 1)]))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let i = i as i64;
        let tree = handle.join().unwrap().unwrap();
        let expected = Tree::dict([("a", Tree::Int(i)), ("b", Tree::Int(i + 1))]);
        assert_eq!(tree, expected);
    }
}

#[test]
fn json_leaves_keep_their_exact_value() {
    let registry = registry();
    let input = json!({
        "id": 18446744073709551615u64,
        "n": [-3, 2.5, 9223372036854775807i64],
    });
    let (leaves, spec) = tree_flatten(Tree::from(input.clone()), &registry, None).unwrap();
    assert_eq!(leaves[0], Tree::UInt(u64::MAX));
    assert_eq!(serde_json::to_value(&leaves[0]).unwrap(), json!(u64::MAX));

    let rebuilt = spec.unflatten(leaves).unwrap();
    assert_eq!(serde_json::to_value(&rebuilt).unwrap(), input);
}
