// File: crates/bar-core/src/join.rs
// Summary: Keyed enter/update/exit diff and an ownership-tracked element collection that applies it.

use std::collections::HashMap;
use std::hash::Hash;

use crate::surface::{NodeId, Surface};

/// Three-way classification of desired keys against currently drawn keys.
/// Indices refer to positions in the `desired` and `current` slices passed to [`diff`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diff {
    /// Desired positions with no drawn counterpart.
    pub enter: Vec<usize>,
    /// `(desired, current)` pairs sharing a key.
    pub update: Vec<(usize, usize)>,
    /// Current positions whose key is no longer desired (or is a repeat).
    pub exit: Vec<usize>,
}

pub fn diff<K: Hash + Eq>(current: &[K], desired: &[K]) -> Diff {
    let mut by_key: HashMap<&K, usize> = HashMap::with_capacity(current.len());
    for (i, k) in current.iter().enumerate() {
        by_key.entry(k).or_insert(i);
    }

    let mut out = Diff::default();
    let mut claimed = vec![false; current.len()];
    for (d, k) in desired.iter().enumerate() {
        match by_key.get(k) {
            Some(&c) if !claimed[c] => {
                claimed[c] = true;
                out.update.push((d, c));
            }
            _ => out.enter.push(d),
        }
    }
    out.exit = claimed
        .iter()
        .enumerate()
        .filter_map(|(c, &taken)| (!taken).then_some(c))
        .collect();
    out
}

/// Whether a node handed to the attribute callback was just created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Update,
}

/// Counts from one reconcile pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Drawn elements bound to data keys, kept in data order.
#[derive(Clone, Debug)]
pub struct ElementSet<K> {
    entries: Vec<(K, NodeId)>,
}

impl<K> Default for ElementSet<K> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: Hash + Eq + Clone> ElementSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|(_, n)| *n)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Reconcile against `desired`: remove exits, create enters with `create`, then
    /// call `apply(surface, node, desired_index, phase)` for every surviving node.
    pub fn reconcile<S, C, A>(
        &mut self,
        surface: &mut S,
        desired: &[K],
        mut create: C,
        mut apply: A,
    ) -> JoinStats
    where
        S: Surface + ?Sized,
        C: FnMut(&mut S) -> NodeId,
        A: FnMut(&mut S, NodeId, usize, Phase),
    {
        let current: Vec<K> = self.entries.iter().map(|(k, _)| k.clone()).collect();
        let plan = diff(&current, desired);

        for &c in &plan.exit {
            surface.remove(self.entries[c].1);
        }

        let mut next: Vec<Option<NodeId>> = vec![None; desired.len()];
        for &(d, c) in &plan.update {
            let node = self.entries[c].1;
            apply(surface, node, d, Phase::Update);
            next[d] = Some(node);
        }
        for &d in &plan.enter {
            let node = create(surface);
            apply(surface, node, d, Phase::Enter);
            next[d] = Some(node);
        }

        self.entries = desired
            .iter()
            .cloned()
            .zip(next)
            .filter_map(|(k, n)| n.map(|n| (k, n)))
            .collect();

        JoinStats { entered: plan.enter.len(), updated: plan.update.len(), exited: plan.exit.len() }
    }

    /// Remove every tracked node from the surface.
    pub fn clear<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let n = self.entries.len();
        for (_, node) in self.entries.drain(..) {
            surface.remove(node);
        }
        n
    }

    /// Drop entries whose nodes were removed behind the set's back.
    pub fn prune<S: Surface + ?Sized>(&mut self, surface: &S) {
        self.entries.retain(|(_, n)| surface.contains(*n));
    }
}
