use alloc::vec;
use alloc::vec::Vec;

use crate::detect::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    pub label: u32,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub pixel_count: u32,
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent[root_b] = root_a;
        }
    }
}

#[inline]
fn distance_sq(a: Point, b: Point) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    dx * dx + dy * dy
}

/// Single-link clustering over the point set: points with Euclidean distance
/// strictly below `link_distance` share a label, closed transitively, so two
/// far-apart points still merge through a chain of close ones. Returns the
/// label count and a label array parallel to `points`, labels numbered in
/// first-seen scan order. Quadratic in the point count.
pub fn cluster_points(points: &[Point], link_distance: f64) -> (u32, Vec<u32>) {
    let limit_sq = link_distance * link_distance;
    let mut set = DisjointSet::new(points.len());
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if distance_sq(points[i], points[j]) < limit_sq {
                set.union(i, j);
            }
        }
    }

    let mut labels = vec![0u32; points.len()];
    let mut roots: Vec<usize> = Vec::new();
    for idx in 0..points.len() {
        let root = set.find(idx);
        let slot = match roots.iter().position(|&seen| seen == root) {
            Some(slot) => slot,
            None => {
                roots.push(root);
                roots.len() - 1
            }
        };
        labels[idx] = slot as u32;
    }
    (roots.len() as u32, labels)
}

/// Clusters the point set and reduces each label to its centroid and pixel
/// count. Centroids are the real-valued mean; `truncate_centroids` switches
/// to integer division for parity with drivers that kept integer sums.
pub fn extract_blobs(points: &[Point], link_distance: f64, truncate_centroids: bool) -> Vec<Blob> {
    let (n_labels, labels) = cluster_points(points, link_distance);
    let mut sums_x = vec![0u64; n_labels as usize];
    let mut sums_y = vec![0u64; n_labels as usize];
    let mut counts = vec![0u32; n_labels as usize];
    for (point, &label) in points.iter().zip(&labels) {
        sums_x[label as usize] += point.x as u64;
        sums_y[label as usize] += point.y as u64;
        counts[label as usize] += 1;
    }

    let mut blobs = Vec::with_capacity(n_labels as usize);
    for label in 0..n_labels {
        let idx = label as usize;
        let count = counts[idx];
        let (centroid_x, centroid_y) = if truncate_centroids {
            (
                (sums_x[idx] / count as u64) as f64,
                (sums_y[idx] / count as u64) as f64,
            )
        } else {
            (
                sums_x[idx] as f64 / count as f64,
                sums_y[idx] as f64 / count as f64,
            )
        };
        blobs.push(Blob {
            label,
            centroid_x,
            centroid_y,
            pixel_count: count,
        });
    }
    blobs
}

/// Drops every blob whose centroid sits below the HUD cutoff line
/// (`centroid_y > cutoff_frac * frame_height`). Survivors keep their order
/// and centroid values.
pub fn retain_above_hud(blobs: Vec<Blob>, frame_height: u32, cutoff_frac: f64) -> Vec<Blob> {
    let cutoff = cutoff_frac * frame_height as f64;
    blobs
        .into_iter()
        .filter(|blob| blob.centroid_y <= cutoff)
        .collect()
}
