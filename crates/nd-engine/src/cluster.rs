//! Union-find clustering of verified similar pairs into duplicate groups.
//!
//! Grouping is transitive: if A~B and B~C, all three share a group even when
//! A and C fall below the threshold on their own.

use std::collections::HashMap;

use nd_core::{pair_key, DuplicateGroup, ScoredItem, SimilarPair, TextItem};

/// Disjoint-set forest with path compression and union by rank.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Add a singleton set and return its element.
    pub fn make_set(&mut self) -> usize {
        let x = self.parent.len();
        self.parent.push(x);
        self.rank.push(0);
        x
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`. Returns false if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Build duplicate groups from accepted pairs.
///
/// The representative of each group is the first of its ids encountered while
/// walking `pairs` in order. Members carry their similarity to the
/// representative, or 0 when they only joined transitively. Ids missing from
/// `items` are skipped.
pub fn cluster(pairs: &[SimilarPair], items: &HashMap<&str, &TextItem>) -> Vec<DuplicateGroup> {
    let mut uf = UnionFind::default();
    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    let mut ids: Vec<&str> = Vec::new();
    let mut similarity: HashMap<(String, String), f64> = HashMap::new();

    for pair in pairs {
        let a = *slot_of.entry(pair.id1.as_str()).or_insert_with(|| {
            ids.push(pair.id1.as_str());
            uf.make_set()
        });
        let b = *slot_of.entry(pair.id2.as_str()).or_insert_with(|| {
            ids.push(pair.id2.as_str());
            uf.make_set()
        });
        uf.union(a, b);
        similarity.insert(pair.key(), pair.similarity);
    }

    let mut members_by_root: HashMap<usize, Vec<&str>> = HashMap::new();
    let mut root_order: Vec<usize> = Vec::new();
    for (slot, id) in ids.iter().enumerate() {
        let root = uf.find(slot);
        members_by_root
            .entry(root)
            .or_insert_with(|| {
                root_order.push(root);
                Vec::new()
            })
            .push(*id);
    }

    let mut groups = Vec::new();
    for root in root_order {
        let members = &members_by_root[&root];
        if members.len() < 2 {
            continue;
        }
        let rep_id = members[0];
        let Some(representative) = items.get(rep_id) else {
            continue;
        };
        let mut duplicates: Vec<ScoredItem> = members[1..]
            .iter()
            .filter_map(|id| {
                let item = items.get(id)?;
                let sim = similarity.get(&pair_key(rep_id, id)).copied().unwrap_or(0.0);
                Some(ScoredItem {
                    item: (*item).clone(),
                    similarity: sim,
                })
            })
            .collect();
        if duplicates.is_empty() {
            continue;
        }
        duplicates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        groups.push(DuplicateGroup {
            representative: (*representative).clone(),
            duplicates,
        });
    }
    groups
}
