use crate::sites::DEFAULT_SITE_COUNT;

/// Which viewport change makes the diagram stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebuildTrigger {
    /// Only a width change. A height-only resize keeps the old scaling until the next rebuild.
    Width,
    /// A change of either dimension.
    #[default]
    Size,
}

impl RebuildTrigger {
    /// Whether going from `last` to `current` (both `(width, height)`) needs a rebuild.
    pub fn is_stale(self, last: (f64, f64), current: (f64, f64)) -> bool {
        match self {
            RebuildTrigger::Width => last.0 != current.0,
            RebuildTrigger::Size => last != current,
        }
    }
}

/// Settings for one viewer session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub site_count: usize,
    /// `None` seeds the site generator from OS entropy.
    pub seed: Option<u64>,
    /// Initial window size, in pixels.
    pub width: f64,
    pub height: f64,
    pub rebuild_trigger: RebuildTrigger,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            site_count: DEFAULT_SITE_COUNT,
            seed: None,
            width: 400.0,
            height: 300.0,
            rebuild_trigger: RebuildTrigger::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_ignores_height() {
        let t = RebuildTrigger::Width;
        assert!(!t.is_stale((400.0, 300.0), (400.0, 500.0)));
        assert!(t.is_stale((400.0, 300.0), (401.0, 300.0)));
    }

    #[test]
    fn size_sees_both() {
        let t = RebuildTrigger::Size;
        assert!(t.is_stale((400.0, 300.0), (400.0, 500.0)));
        assert!(t.is_stale((400.0, 300.0), (401.0, 300.0)));
        assert!(!t.is_stale((400.0, 300.0), (400.0, 300.0)));
    }

    #[test]
    fn defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.site_count, 10);
        assert_eq!((config.width, config.height), (400.0, 300.0));
        assert_eq!(config.rebuild_trigger, RebuildTrigger::Size);
    }
}
