//! The half-edge Voronoi diagram, and the [`DiagramBuilder`] contract that produces it.
//!
//! Every edge separates two cells and is stored twice, once per cell, as a pair of twins. An
//! edge runs counter-clockwise around its own cell, so the cell is on its left: `vertex0` is
//! where it starts and `vertex1` where it ends. A missing vertex means the edge goes to infinity
//! on that side.

use std::collections::HashMap;

use crate::error::BuildError;
use crate::sweep::{self, SiteCell};
use crate::{Point, SiteIdx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// What kind of input a cell was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCategory {
    SinglePoint,
    SegmentStartPoint,
    SegmentEndPoint,
    Segment,
}

/// A segment site. Part of the construction contract, but no builder here accepts them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p0: Point,
    pub p1: Point,
}

#[derive(Debug, Clone)]
pub struct DiagramCell {
    source_index: usize,
    source_category: SourceCategory,
    incident_edge: Option<EdgeId>,
}
impl DiagramCell {
    /// Index of the generating site in the slice given to the builder.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn source_category(&self) -> SourceCategory {
        self.source_category
    }

    pub fn contains_point(&self) -> bool {
        self.source_category != SourceCategory::Segment
    }

    /// Any edge of this cell, or `None` if the diagram has a single site.
    pub fn incident_edge(&self) -> Option<EdgeId> {
        self.incident_edge
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    cell: CellId,
    twin: Option<EdgeId>,
    next: EdgeId,
    vertex0: Option<VertexId>,
    vertex1: Option<VertexId>,
}
impl Edge {
    pub fn cell(&self) -> CellId {
        self.cell
    }

    pub fn twin(&self) -> Option<EdgeId> {
        self.twin
    }

    /// The following edge counter-clockwise around the same cell. Unbounded cells wrap around
    /// through infinity.
    pub fn next(&self) -> EdgeId {
        self.next
    }

    pub fn vertex0(&self) -> Option<VertexId> {
        self.vertex0
    }

    pub fn vertex1(&self) -> Option<VertexId> {
        self.vertex1
    }

    pub fn is_finite(&self) -> bool {
        self.vertex0.is_some() && self.vertex1.is_some()
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagram {
    cells: Vec<DiagramCell>,
    edges: Vec<Edge>,
    vertices: Vec<Point>,
}
impl Diagram {
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &DiagramCell)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn cell(&self, id: CellId) -> Option<&DiagramCell> {
        self.cells.get(id.0)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    pub fn vertex(&self, id: VertexId) -> Option<Point> {
        self.vertices.get(id.0).copied()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The edges around `cell`, counter-clockwise.
    pub fn cell_edges(&self, cell: CellId) -> impl Iterator<Item = EdgeId> + '_ {
        let first = self.cell(cell).and_then(DiagramCell::incident_edge);
        let mut current = first;
        std::iter::from_fn(move || {
            let id = current?;
            let next = self.edges[id.0].next;
            current = (Some(next) != first).then_some(next);
            Some(id)
        })
    }
}

/// Constructs a Voronoi diagram from point sites (and, in principle, segment sites).
///
/// `cell.source_index()` of the result indexes `sites`.
pub trait DiagramBuilder {
    fn build(&self, sites: &[Point], segments: &[Segment]) -> Result<Diagram, BuildError>;
}

/// Builds diagrams with the Fortune sweep in [`crate::sweep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepBuilder;

impl DiagramBuilder for SweepBuilder {
    fn build(&self, sites: &[Point], segments: &[Segment]) -> Result<Diagram, BuildError> {
        if !segments.is_empty() {
            return Err(BuildError::SegmentsUnsupported(segments.len()));
        }
        if let Some((index, p)) = sites.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(BuildError::NonFiniteSite {
                index,
                x: p.x,
                y: p.y,
            });
        }

        let cells = sweep::compute_cells(sites)?;
        let diagram = assemble(&cells);
        log::debug!(
            "built diagram: {} cells, {} half-edges, {} vertices",
            diagram.num_cells(),
            diagram.num_edges(),
            diagram.vertices.len()
        );
        Ok(diagram)
    }
}

/// Turn per-site cells into half-edges.
///
/// The edge facing `neighbors[i]` lies between the vertex shared with the previous neighbor and
/// the one shared with the next, which are `points[i - 1]` and `points[i]`.
fn assemble(site_cells: &[SiteCell]) -> Diagram {
    let mut diagram = Diagram::default();
    let mut vertex_ids: HashMap<Point, VertexId> = HashMap::new();
    let mut by_sites: HashMap<(SiteIdx, SiteIdx), EdgeId> = HashMap::new();

    let mut vertex = |diagram: &mut Diagram, p: Point| -> Option<VertexId> {
        if p.is_nan() {
            return None;
        }
        Some(*vertex_ids.entry(p).or_insert_with(|| {
            diagram.vertices.push(p);
            VertexId(diagram.vertices.len() - 1)
        }))
    };

    for (c, site_cell) in site_cells.iter().enumerate() {
        let n = site_cell.neighbors.len();
        let first = diagram.edges.len();

        for (i, &neighbor) in site_cell.neighbors.iter().enumerate() {
            let vertex0 = vertex(&mut diagram, site_cell.points[(i + n - 1) % n]);
            let vertex1 = vertex(&mut diagram, site_cell.points[i]);

            let id = EdgeId(diagram.edges.len());
            by_sites.insert((c as SiteIdx, neighbor), id);
            diagram.edges.push(Edge {
                cell: CellId(c),
                twin: None,
                next: EdgeId(first + (i + 1) % n),
                vertex0,
                vertex1,
            });
        }

        diagram.cells.push(DiagramCell {
            source_index: c,
            source_category: SourceCategory::SinglePoint,
            incident_edge: (n > 0).then_some(EdgeId(first)),
        });
    }

    for (&(a, b), &id) in by_sites.iter() {
        diagram.edges[id.0].twin = by_sites.get(&(b, a)).copied();
        if diagram.edges[id.0].twin.is_none() {
            log::warn!("sites {} and {} are not mutual neighbors", a, b);
        }
    }

    diagram
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};

    fn build(sites: &[Point]) -> Diagram {
        SweepBuilder.build(sites, &[]).unwrap()
    }

    fn random_sites(seed: u64, n: usize) -> Vec<Point> {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Point::new(rng.gen::<f64>() * 400.0, rng.gen::<f64>() * 300.0))
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn rejects_segments() {
        let sites = [Point::new(0.0, 0.0)];
        let segments = [Segment {
            p0: Point::new(0.0, 0.0),
            p1: Point::new(1.0, 1.0),
        }];
        assert_eq!(
            SweepBuilder.build(&sites, &segments).unwrap_err(),
            BuildError::SegmentsUnsupported(1)
        );
    }

    #[test]
    fn rejects_nan_sites() {
        let sites = [Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        assert!(matches!(
            SweepBuilder.build(&sites, &[]),
            Err(BuildError::NonFiniteSite { index: 1, .. })
        ));
    }

    #[test]
    fn empty_and_single() {
        assert!(build(&[]).is_empty());

        let diagram = build(&[Point::new(1.0, 2.0)]);
        assert_eq!(diagram.num_cells(), 1);
        assert_eq!(diagram.num_edges(), 0);
        let (_, cell) = diagram.cells().next().unwrap();
        assert_eq!(cell.incident_edge(), None);
    }

    #[test]
    fn two_sites_share_one_infinite_line() {
        let diagram = build(&[Point::new(0.0, 0.0), Point::new(2.0, 1.0)]);

        assert_eq!(diagram.num_cells(), 2);
        assert_eq!(diagram.num_edges(), 2);
        assert!(diagram.vertices().is_empty());

        for (id, edge) in diagram.edges() {
            assert!(edge.is_infinite());
            assert_eq!(edge.vertex0(), None);
            assert_eq!(edge.vertex1(), None);
            let twin = diagram.edge(edge.twin().unwrap()).unwrap();
            assert_eq!(twin.twin(), Some(id));
            assert_ne!(twin.cell(), edge.cell());
        }
    }

    #[test]
    fn triangle() {
        let sites = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 1.0),
            Point::new(1.0, 3.0),
        ];
        let diagram = build(&sites);

        assert_eq!(diagram.num_cells(), 3);
        assert_eq!(diagram.num_edges(), 6);
        assert_eq!(diagram.vertices().len(), 1);

        let center = diagram.vertices()[0];
        let r = center.dist(sites[0]);
        assert!(close(center.dist(sites[1]), r));
        assert!(close(center.dist(sites[2]), r));

        // every edge is a ray out of the circumcenter
        for (_, edge) in diagram.edges() {
            assert!(edge.is_infinite());
            assert_eq!(edge.vertex0().is_some() as u8 + edge.vertex1().is_some() as u8, 1);
        }
    }

    #[test]
    fn edges_run_counter_clockwise() {
        let sites = random_sites(7, 10);
        let diagram = build(&sites);

        for (_, edge) in diagram.edges() {
            let (Some(v0), Some(v1)) = (edge.vertex0(), edge.vertex1()) else {
                continue;
            };
            let (v0, v1) = (diagram.vertex(v0).unwrap(), diagram.vertex(v1).unwrap());
            let site = sites[diagram.cell(edge.cell()).unwrap().source_index()];
            // the cell's site is on the left of the edge
            assert!((v1 - v0).perp_dot(site - v0) > 0.0);
        }
    }

    #[test]
    fn cell_edges_cycle() {
        let sites = random_sites(11, 10);
        let diagram = build(&sites);

        let mut seen = 0;
        for (id, _) in diagram.cells() {
            for e in diagram.cell_edges(id) {
                assert_eq!(diagram.edge(e).unwrap().cell(), id);
                seen += 1;
            }
        }
        assert_eq!(seen, diagram.num_edges());
    }

    proptest! {
        #[test]
        fn twins_are_consistent(seed: u64, n in 2usize..16) {
            let sites = random_sites(seed, n);
            let diagram = build(&sites);

            prop_assert_eq!(diagram.num_cells(), n);
            for (id, cell) in diagram.cells() {
                prop_assert_eq!(cell.source_index(), id.0);
                prop_assert_eq!(cell.source_category(), SourceCategory::SinglePoint);
                prop_assert!(cell.contains_point());
            }

            for (id, edge) in diagram.edges() {
                let twin_id = edge.twin().unwrap();
                let twin = diagram.edge(twin_id).unwrap();
                prop_assert_eq!(twin.twin(), Some(id));
                prop_assert_ne!(twin.cell(), edge.cell());
                prop_assert_eq!(twin.vertex0(), edge.vertex1());
                prop_assert_eq!(twin.vertex1(), edge.vertex0());
            }

            // vertices are equidistant from the two sites of every edge touching them
            for (_, edge) in diagram.edges() {
                let a = sites[edge.cell().0];
                let b = sites[diagram.edge(edge.twin().unwrap()).unwrap().cell().0];
                for v in [edge.vertex0(), edge.vertex1()].into_iter().flatten() {
                    let v = diagram.vertex(v).unwrap();
                    prop_assert!(close(v.dist(a), v.dist(b)));
                }
            }
        }
    }
}
