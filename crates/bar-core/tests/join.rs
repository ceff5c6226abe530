// File: crates/bar-core/tests/join.rs
// Purpose: Keyed enter/update/exit classification and element reconciliation against a scene.

use bar_core::{diff, ElementSet, Phase, Scene, Surface, Tag};

#[test]
fn diff_classifies_keys() {
    let d = diff(&[1, 2, 3], &[2, 3, 4, 5]);
    assert_eq!(d.update, vec![(0, 1), (1, 2)]);
    assert_eq!(d.enter, vec![2, 3]);
    assert_eq!(d.exit, vec![0]);

    // repeated desired keys only claim one drawn element
    let d = diff(&["a"], &["a", "a"]);
    assert_eq!(d.update, vec![(0, 0)]);
    assert_eq!(d.enter, vec![1]);
    assert!(d.exit.is_empty());
}

#[test]
fn element_set_reconciles_positional_keys() {
    let mut scene = Scene::new();
    let layer = scene.append(scene.root(), Tag::Group);
    let mut set: ElementSet<usize> = ElementSet::new();

    let create = |s: &mut Scene| s.append(layer, Tag::Rect);
    let mut phases = Vec::new();
    let stats = set.reconcile(&mut scene, &[0, 1, 2], create, |s, n, i, p| {
        s.set_attr(n, "x", (i as f64).into());
        phases.push(p);
    });
    assert_eq!((stats.entered, stats.updated, stats.exited), (3, 0, 0));
    assert!(phases.iter().all(|p| *p == Phase::Enter));
    let first: Vec<_> = set.nodes().collect();

    let stats = set.reconcile(&mut scene, &[0], create, |s, n, i, _| {
        s.set_attr(n, "x", (i as f64 * 10.0).into());
    });
    assert_eq!((stats.entered, stats.updated, stats.exited), (0, 1, 2));
    assert_eq!(set.nodes().collect::<Vec<_>>(), vec![first[0]], "survivor keeps its element");
    assert_eq!(scene.children(layer), vec![first[0]]);

    let stats = set.reconcile(&mut scene, &[0, 1, 2, 3], create, |_, _, _, _| {});
    assert_eq!((stats.entered, stats.updated, stats.exited), (3, 1, 0));
    assert_eq!(scene.children(layer).len(), 4);
    assert_eq!(scene.children(layer), set.nodes().collect::<Vec<_>>(), "element order follows data order");

    assert_eq!(set.clear(&mut scene), 4);
    assert!(scene.children(layer).is_empty());
}

#[test]
fn element_set_prunes_externally_removed_nodes() {
    let mut scene = Scene::new();
    let layer = scene.append(scene.root(), Tag::Group);
    let mut set: ElementSet<usize> = ElementSet::new();
    set.reconcile(&mut scene, &[0, 1], |s| s.append(layer, Tag::Rect), |_, _, _, _| {});
    let doomed = set.nodes().next().unwrap();
    scene.remove(doomed);
    set.prune(&scene);
    assert_eq!(set.len(), 1);
    assert_eq!(set.keys().copied().collect::<Vec<_>>(), vec![1]);
}
