use std::cmp::Ordering;

use super::Bisector;
use crate::{Point, SiteIdx};

/// The beachline: an interleaved sequence of regions and boundaries.
#[derive(Clone)]
pub struct Beachline {
    /// `[region1, boundary1, region2, boundary2, ..., regionN]`, stored as pairs of a region
    /// and its right boundary. The last pair carries a placeholder boundary that is never read.
    regions: Vec<(SiteIdx, Bisector)>,
}
impl std::fmt::Debug for Beachline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for (i, (site, boundary)) in self.regions.iter().enumerate() {
            list.entry(site);
            if i + 1 < self.regions.len() {
                list.entry(boundary);
            }
        }
        list.finish()
    }
}
impl Beachline {
    pub(super) fn new(first_region: SiteIdx) -> Self {
        Self {
            regions: vec![(first_region, Bisector::nil())],
        }
    }

    /// The sites of each region, left to right. A site may appear more than once.
    pub fn sites(&self) -> impl Iterator<Item = SiteIdx> + '_ {
        self.regions.iter().map(|(p, _)| *p)
    }

    /// Append a region for a site on the same height as the first one, separated by a vertical
    /// boundary.
    pub(super) fn push_cohorizontal(&mut self, sites: &[Point], q: SiteIdx) -> SiteIdx {
        let last = self.regions.len() - 1;
        let p = self.regions[last].0;
        self.regions[last].1 = Bisector::new(sites, p, q).c_plus(sites);
        self.regions.push((q, Bisector::nil()));
        p
    }

    /// Find the region containing `p`.
    ///
    /// The regions cover the whole line, so there is always one. A point on a boundary goes to
    /// the region on its left.
    pub(super) fn find_region(&self, sites: &[Point], p: Point) -> usize {
        self.regions[..self.regions.len() - 1]
            .iter()
            .position(|(_, b)| b.star_cmp(sites, p) == Ordering::Less)
            .unwrap_or(self.regions.len() - 1)
    }

    /// Find the index of region `r`, whose neighbors are `q` and `s`.
    pub(super) fn find_region3(&self, q: SiteIdx, r: SiteIdx, s: SiteIdx) -> Option<usize> {
        self.regions
            .windows(3)
            .position(|w| q == w[0].0 && r == w[1].0 && s == w[2].0)
            .map(|i| i + 1)
    }

    /// Insert a region right after the region at `region_idx`, splitting off its right part.
    pub(super) fn split2(&mut self, region_idx: usize, region: (Bisector, SiteIdx)) {
        let (p, mut h) = self.regions[region_idx];
        let (hl, q) = region;

        if h.a == p {
            h.a = q;
        } else {
            h.b = q;
        }

        self.regions
            .splice(region_idx..=region_idx, [(p, hl), (q, h)]);
    }

    /// Insert a region inside the region at `region_idx`, which ends up on both sides of it.
    pub(super) fn split3(&mut self, region_idx: usize, region: (Bisector, SiteIdx, Bisector)) {
        let (p, h) = self.regions[region_idx];
        let (hl, q, hr) = region;
        self.regions
            .splice(region_idx..=region_idx, [(p, hl), (q, hr), (p, h)]);
    }

    /// Remove the region at `region_idx`; its neighbors now share `boundary`.
    pub(super) fn merge(&mut self, region_idx: usize, boundary: Bisector) {
        self.regions.remove(region_idx);
        self.regions[region_idx - 1].1 = boundary
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn region(&self, idx: usize) -> SiteIdx {
        self.regions[idx].0
    }

    pub fn right_boundary(&self, idx: usize) -> Option<Bisector> {
        if idx + 1 >= self.regions.len() {
            return None;
        }
        Some(self.regions[idx].1)
    }

    pub fn left_boundary(&self, idx: usize) -> Option<Bisector> {
        if idx == 0 {
            return None;
        }
        Some(self.regions[idx - 1].1)
    }
}
