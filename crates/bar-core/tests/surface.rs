// File: crates/bar-core/tests/surface.rs
// Purpose: Validate the retained scene: tree edits, class selection, markup and slot recycling.

use bar_core::{AttrValue, Scene, Surface, Tag, Transform};

#[test]
fn append_insert_and_remove() {
    let mut scene = Scene::new();
    let root = scene.root();
    let svg = scene.append(root, Tag::Svg);
    let a = scene.append(svg, Tag::Group);
    let c = scene.append(svg, Tag::Group);
    let b = scene.insert_before(svg, Tag::Group, c);
    assert_eq!(scene.children(svg), vec![a, b, c]);

    let leaf = scene.append(b, Tag::Rect);
    scene.remove(b);
    assert_eq!(scene.children(svg), vec![a, c]);
    assert!(!scene.contains(b));
    assert!(!scene.contains(leaf), "subtree goes with its parent");

    // dead handles are inert
    scene.set_attr(leaf, "x", AttrValue::Number(1.0));
    scene.remove(leaf);
    assert!(scene.attr(leaf, "x").is_none());

    // removing the container is refused
    scene.remove(root);
    assert!(scene.contains(root));
}

#[test]
fn insert_before_non_child_appends() {
    let mut scene = Scene::new();
    let root = scene.root();
    let g = scene.append(root, Tag::Group);
    let other = scene.append(root, Tag::Group);
    let x = scene.insert_before(g, Tag::Rect, other);
    assert_eq!(scene.children(g), vec![x]);
}

#[test]
fn set_attr_replaces_in_place() {
    let mut scene = Scene::new();
    let r = scene.append(scene.root(), Tag::Rect);
    scene.set_attr(r, "x", AttrValue::Number(1.0));
    scene.set_attr(r, "y", AttrValue::Number(2.0));
    scene.set_attr(r, "x", AttrValue::Number(3.0));
    assert_eq!(scene.attr_number(r, "x"), Some(3.0));
    assert_eq!(scene.markup(r), "<rect x=\"3\" y=\"2\"/>\n");
}

#[test]
fn select_all_matches_class_tokens_below_scope() {
    let mut scene = Scene::new();
    let root = scene.root();
    let g = scene.append(root, Tag::Group);
    scene.set_class(g, "x axis");
    let inner = scene.append(g, Tag::Group);
    scene.set_class(inner, "axis-like");
    let bar = scene.append(root, Tag::Rect);
    scene.set_class(bar, "bar");

    assert_eq!(scene.select_all(root, "axis"), vec![g]);
    assert_eq!(scene.select_all(root, "bar"), vec![bar]);
    assert!(scene.select_all(g, "axis").is_empty(), "scope itself is excluded");
    assert_eq!(scene.count_class("axis"), 1);
}

#[test]
fn markup_escapes_and_formats() {
    let mut scene = Scene::new();
    let svg = scene.append(scene.root(), Tag::Svg);
    scene.set_attr(svg, "width", AttrValue::Number(600.0));
    let g = scene.append(svg, Tag::Group);
    scene.set_attr(g, "transform", Transform::Translate(70.0, 20.0).into());
    scene.set_style(g, "fill", "black");
    let t = scene.append(g, Tag::Text);
    scene.set_attr(t, "dx", AttrValue::Em(-0.8));
    scene.set_attr(t, "transform", Transform::Rotate(-90.0).into());
    scene.set_text(t, "R&D <\"q\">");

    let svg_text = scene.to_svg_string().expect("svg present");
    let want = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"600\">\n\
                \x20 <g transform=\"translate(70,20)\" style=\"fill: black\">\n\
                \x20   <text dx=\"-0.8em\" transform=\"rotate(-90)\">R&amp;D &lt;&quot;q&quot;&gt;</text>\n\
                \x20 </g>\n\
                </svg>\n";
    assert_eq!(svg_text, want);
}

#[test]
fn recycled_slots_do_not_revive_stale_handles() {
    let mut scene = Scene::new();
    let root = scene.root();
    let old = scene.append(root, Tag::Rect);
    scene.set_attr(old, "x", AttrValue::Number(1.0));
    scene.remove(old);

    let fresh = scene.append(root, Tag::Rect);
    assert_eq!(fresh.index(), old.index(), "slot is reused");
    assert_ne!(fresh, old);
    assert!(!scene.contains(old));
    assert!(scene.attr(fresh, "x").is_none());
    scene.set_attr(old, "x", AttrValue::Number(9.0));
    assert!(scene.attr(fresh, "x").is_none());
    assert_eq!(scene.len(), 2);
}

#[test]
fn append_under_removed_parent_yields_dead_handle() {
    let mut scene = Scene::new();
    let root = scene.root();
    let g = scene.append(root, Tag::Group);
    scene.remove(g);

    for _ in 0..100 {
        let orphan = scene.append(g, Tag::Rect);
        assert!(!scene.contains(orphan));
        scene.set_attr(orphan, "x", AttrValue::Number(1.0));
        assert!(scene.attr(orphan, "x").is_none());
        let late = scene.insert_before(g, Tag::Rect, orphan);
        assert!(!scene.contains(late));
    }
    assert_eq!(scene.len(), 1, "only the container is live");
    assert_eq!(scene.capacity(), 2, "orphan slots are recycled");
}
