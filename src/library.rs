use crate::helix::TripleHelix;
use crate::params::ParameterTable;
use crate::scorer::score_helix;
use rayon::prelude::*;
use serde::Serialize;

/// Aggregate error of one library pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct LibraryStats {
    pub count: usize,
    pub sum_deviation: f64,
    pub sum_squared_deviation: f64,
    /// Index and deviation of the record with the largest |deviation|.
    pub worst: Option<(usize, f64)>,
}

impl LibraryStats {
    pub fn mean_deviation(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum_deviation / self.count as f64
        }
    }

    pub fn rms_deviation(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.sum_squared_deviation / self.count as f64).sqrt()
        }
    }

    /// Summary of already-scored helices, in index order.
    pub fn collect(helices: &[TripleHelix]) -> Self {
        let mut stats = LibraryStats::default();
        for (i, h) in helices.iter().enumerate() {
            let d = h.score.deviation;
            stats.count += 1;
            stats.sum_deviation += d;
            stats.sum_squared_deviation += d * d;
            if stats.worst.map_or(true, |(_, w)| d.abs() > w.abs()) {
                stats.worst = Some((i, d));
            }
        }
        stats
    }
}

/// Scores `helices[start..stop)` in order. Out-of-range bounds are clamped.
pub fn score_range(params: &ParameterTable, helices: &mut [TripleHelix], start: usize, stop: usize) {
    let stop = stop.min(helices.len());
    let start = start.min(stop);
    for helix in &mut helices[start..stop] {
        score_helix(params, helix);
    }
}

/// Worker count actually used for a requested count (0 = all cores).
pub fn resolve_workers(requested: usize) -> usize {
    if requested > 0 {
        requested
    } else {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(2)
    }
}

/// Rescores the whole library across `workers` disjoint contiguous chunks
/// and returns the aggregate error.
pub fn score_library(params: &ParameterTable, helices: &mut [TripleHelix], workers: usize) -> LibraryStats {
    if helices.is_empty() {
        return LibraryStats::default();
    }
    let workers = resolve_workers(workers);
    let chunk = helices.len().div_ceil(workers).max(1);

    helices.par_chunks_mut(chunk).for_each(|part| {
        let len = part.len();
        score_range(params, part, 0, len);
    });

    // Index-order sum; identical for any worker count.
    LibraryStats::collect(helices)
}
