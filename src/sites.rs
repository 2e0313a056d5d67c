use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Point;

/// Number of sites shown by default.
pub const DEFAULT_SITE_COUNT: usize = 10;

/// Draws sites uniformly from the unit square.
///
/// The random source is owned by the generator and advances with every call, so each
/// [`generate`](Self::generate) gives a fresh set.
#[derive(Debug, Clone)]
pub struct SiteGenerator {
    rng: SmallRng,
}

impl SiteGenerator {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Reproducible sequence of site sets.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// `count` sites with both coordinates in `[0, 1)`.
    pub fn generate(&mut self, count: usize) -> Vec<Point> {
        (0..count)
            .map(|_| Point::new(self.rng.gen(), self.rng.gen()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fresh_sites_on_every_call() {
        let mut generator = SiteGenerator::seeded(76);
        let a = generator.generate(DEFAULT_SITE_COUNT);
        let b = generator.generate(DEFAULT_SITE_COUNT);

        assert_eq!(a.len(), DEFAULT_SITE_COUNT);
        assert_eq!(b.len(), DEFAULT_SITE_COUNT);
        assert_ne!(a, b);
    }

    #[test]
    fn same_seed_same_sites() {
        let a = SiteGenerator::seeded(3).generate(5);
        let b = SiteGenerator::seeded(3).generate(5);
        assert_eq!(a, b);
    }

    #[test]
    fn entropy_seeds_differ() {
        let a = SiteGenerator::from_entropy().generate(DEFAULT_SITE_COUNT);
        let b = SiteGenerator::from_entropy().generate(DEFAULT_SITE_COUNT);
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn inside_unit_square(seed: u64, count in 1usize..64) {
            let sites = SiteGenerator::seeded(seed).generate(count);
            prop_assert_eq!(sites.len(), count);
            for p in sites {
                prop_assert!((0.0..1.0).contains(&p.x));
                prop_assert!((0.0..1.0).contains(&p.y));
            }
        }
    }
}
