//! Turning diagram edges into finite segments for drawing.

use crate::diagram::{CellId, Diagram, EdgeId, SourceCategory, VertexId};
use crate::error::TopologyError;
use crate::scale::ScaleTransform;
use crate::Point;

/// A finite, drawable edge in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedEdge {
    pub tail: Point,
    pub head: Point,
}

/// The segment to draw for `edge`: its own vertices if it is finite, otherwise the clipped ray.
pub fn renderable_edge(
    diagram: &Diagram,
    edge: EdgeId,
    sites: &[Point],
    scale: &ScaleTransform,
) -> Result<ClippedEdge, TopologyError> {
    let e = diagram.edge(edge).ok_or(TopologyError::UnknownEdge(edge))?;
    match (e.vertex0(), e.vertex1()) {
        (Some(v0), Some(v1)) => Ok(ClippedEdge {
            tail: vertex(diagram, v0)?,
            head: vertex(diagram, v1)?,
        }),
        _ => clip_infinite_edge(diagram, edge, sites, scale),
    }
}

/// Make an unbounded edge finite.
///
/// The edge lies on the bisector of the sites of its cell and its twin's cell. Each missing
/// endpoint is placed on that bisector, measured from the midpoint of the two sites, far enough
/// that the larger coordinate of the offset equals `scale.span()`. Once drawn, the segment
/// reaches past the viewport border. Existing endpoints are kept.
///
/// `sites` must be the pixel-space sites the diagram was built from.
pub fn clip_infinite_edge(
    diagram: &Diagram,
    edge: EdgeId,
    sites: &[Point],
    scale: &ScaleTransform,
) -> Result<ClippedEdge, TopologyError> {
    let e = diagram.edge(edge).ok_or(TopologyError::UnknownEdge(edge))?;
    let twin_id = e.twin().ok_or(TopologyError::MissingTwin(edge))?;
    let twin = diagram
        .edge(twin_id)
        .ok_or(TopologyError::MissingTwin(edge))?;

    let p1 = point_site(diagram, e.cell(), sites)?;
    let p2 = point_site(diagram, twin.cell(), sites)?;

    let origin = p1.midpoint(p2);
    // (p2 - p1) turned a quarter counter-clockwise: runs from vertex0 to vertex1.
    let direction = Point::new(p1.y - p2.y, p2.x - p1.x);

    let longest = direction.x.abs().max(direction.y.abs());
    if longest == 0.0 {
        return Err(TopologyError::CoincidentSites(edge));
    }
    let koef = scale.span() / longest;

    let tail = match e.vertex0() {
        Some(v) => vertex(diagram, v)?,
        None => origin - direction * koef,
    };
    let head = match e.vertex1() {
        Some(v) => vertex(diagram, v)?,
        None => origin + direction * koef,
    };

    Ok(ClippedEdge { tail, head })
}

/// The site of `cell`, which must come from a single point.
fn point_site(diagram: &Diagram, cell: CellId, sites: &[Point]) -> Result<Point, TopologyError> {
    let c = diagram
        .cell(cell)
        .ok_or(TopologyError::UnknownCell(cell))?;

    if c.source_category() != SourceCategory::SinglePoint {
        return Err(TopologyError::NotPointSite {
            cell,
            category: c.source_category(),
        });
    }

    let index = c.source_index();
    sites
        .get(index)
        .copied()
        .ok_or(TopologyError::SiteOutOfRange {
            cell,
            index,
            len: sites.len(),
        })
}

fn vertex(diagram: &Diagram, id: VertexId) -> Result<Point, TopologyError> {
    diagram.vertex(id).ok_or(TopologyError::UnknownVertex(id))
}
