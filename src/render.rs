//! The viewer's state: sites, scaling, and the diagram built from them.
//!
//! Rebuilding is never done while painting. A paint that finds the viewport changed only
//! schedules a rebuild and returns; the host then calls [`RenderState::run_scheduled`] on its next
//! loop turn, which does the work and asks for a repaint. Any number of resizes in between
//! collapse into one rebuild for the size current at that moment.

use crate::clip::renderable_edge;
use crate::config::{RebuildTrigger, ViewerConfig};
use crate::diagram::{Diagram, DiagramBuilder, SweepBuilder};
use crate::error::TopologyError;
use crate::scale::ScaleTransform;
use crate::sites::SiteGenerator;
use crate::Point;

/// Somewhere to draw, in pixel coordinates.
pub trait Surface {
    fn draw_point(&mut self, p: Point);
    fn draw_line(&mut self, a: Point, b: Point);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    RebuildPending,
}

/// Keys the viewer tells apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// The host should exit.
    Quit,
    /// New sites were drawn and a rebuild is pending.
    Regenerated,
    /// Not handled here.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    Drawn { points: usize, edges: usize },
    /// The viewport changed; nothing was drawn and a rebuild is now pending.
    RebuildScheduled,
    /// A rebuild is already pending; nothing was drawn.
    RebuildInFlight,
    /// The viewport has no area.
    Degenerate,
}

pub struct RenderState<B = SweepBuilder> {
    builder: B,
    generator: SiteGenerator,
    site_count: usize,
    trigger: RebuildTrigger,

    /// Unit-square sites.
    sites: Vec<Point>,
    scale: ScaleTransform,
    /// `sites` mapped through `scale`; what `diagram` was built from.
    pixel_sites: Vec<Point>,
    diagram: Option<Diagram>,

    /// Latest size reported by the host.
    viewport: (f64, f64),
    /// Size the current scaling was computed for.
    last_size: (f64, f64),
    phase: Phase,
}

impl RenderState<SweepBuilder> {
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_builder(config, SweepBuilder)
    }
}

impl<B: DiagramBuilder> RenderState<B> {
    pub fn with_builder(config: &ViewerConfig, builder: B) -> Self {
        let mut generator = match config.seed {
            Some(seed) => SiteGenerator::seeded(seed),
            None => SiteGenerator::from_entropy(),
        };
        let sites = generator.generate(config.site_count);

        Self {
            builder,
            generator,
            site_count: config.site_count,
            trigger: config.rebuild_trigger,
            sites,
            scale: ScaleTransform::default(),
            pixel_sites: Vec::new(),
            diagram: None,
            viewport: (config.width, config.height),
            last_size: (0.0, 0.0),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn pixel_sites(&self) -> &[Point] {
        &self.pixel_sites
    }

    pub fn scale(&self) -> &ScaleTransform {
        &self.scale
    }

    pub fn diagram(&self) -> Option<&Diagram> {
        self.diagram.as_ref()
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn last_width(&self) -> f64 {
        self.last_size.0
    }

    pub fn last_height(&self) -> f64 {
        self.last_size.1
    }

    /// Record the viewport size. Takes effect at the next paint.
    pub fn resize(&mut self, width: f64, height: f64) {
        log::trace!("resize to {}x{}", width, height);
        self.viewport = (width, height);
    }

    pub fn key_press(&mut self, key: Key, text: &str) -> KeyResponse {
        if key == Key::Escape {
            return KeyResponse::Quit;
        }
        if text.is_empty() {
            return KeyResponse::Ignored;
        }

        self.sites = self.generator.generate(self.site_count);
        self.phase = Phase::RebuildPending;
        log::debug!("regenerated {} sites, rebuild pending", self.sites.len());
        KeyResponse::Regenerated
    }

    /// Draw the sites and the diagram edges, each undirected edge once.
    ///
    /// Draws nothing if a rebuild is pending or the viewport changed since the last one. A
    /// topology error aborts the pass midway.
    pub fn paint(&mut self, surface: &mut impl Surface) -> Result<PaintOutcome, TopologyError> {
        if self.phase == Phase::RebuildPending {
            return Ok(PaintOutcome::RebuildInFlight);
        }

        if self.trigger.is_stale(self.last_size, self.viewport) {
            log::debug!(
                "viewport {:?} -> {:?}, rebuild pending",
                self.last_size,
                self.viewport
            );
            self.phase = Phase::RebuildPending;
            return Ok(PaintOutcome::RebuildScheduled);
        }

        // Under `RebuildTrigger::Width` a collapsed height is not stale, but there is still
        // nothing to draw on.
        let (width, height) = self.viewport;
        if self.scale.is_degenerate() || ScaleTransform::compute(width, height).is_degenerate() {
            return Ok(PaintOutcome::Degenerate);
        }

        for &p in &self.pixel_sites {
            surface.draw_point(p);
        }

        let mut edges = 0;
        if let Some(diagram) = &self.diagram {
            for (id, edge) in diagram.edges() {
                if edge.twin().is_some_and(|twin| twin < id) {
                    continue;
                }
                let segment = renderable_edge(diagram, id, &self.pixel_sites, &self.scale)?;
                surface.draw_line(segment.tail, segment.head);
                edges += 1;
            }
        }

        Ok(PaintOutcome::Drawn {
            points: self.pixel_sites.len(),
            edges,
        })
    }

    /// Run a pending rebuild. Returns `true` if one ran, meaning the host should repaint.
    pub fn run_scheduled(&mut self) -> bool {
        if self.phase != Phase::RebuildPending {
            return false;
        }
        self.rebuild();
        self.phase = Phase::Idle;
        true
    }

    fn rebuild(&mut self) {
        let (width, height) = self.viewport;
        self.last_size = self.viewport;

        let scale = ScaleTransform::compute(width, height);
        if scale.is_degenerate() {
            log::warn!("viewport {}x{} has no area, dropping the diagram", width, height);
            self.scale = scale;
            self.pixel_sites.clear();
            self.diagram = None;
            return;
        }

        let pixel_sites: Vec<Point> = self.sites.iter().map(|&p| scale.to_pixel(p)).collect();
        match self.builder.build(&pixel_sites, &[]) {
            Ok(diagram) => {
                log::info!(
                    "rebuilt diagram for {}x{}: {} sites, {} edges",
                    width,
                    height,
                    pixel_sites.len(),
                    diagram.num_edges() / 2
                );
                self.scale = scale;
                self.pixel_sites = pixel_sites;
                self.diagram = Some(diagram);
            }
            Err(err) => log::error!("failed to build diagram, keeping the previous one: {}", err),
        }
    }
}
