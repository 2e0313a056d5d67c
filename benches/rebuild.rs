use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use voronoi_viewport::{DiagramBuilder, Point, ScaleTransform, SweepBuilder};

/// Build the diagram of `number` random sites ten times, rescaled to a different viewport each
/// time like a window being dragged.
fn rebuild(number: usize) {
    let mut rng = SmallRng::from_seed([76; 32]); // chosen by fair dice roll
    let sites = (0..number)
        .map(|_| Point::new(rng.gen(), rng.gen()))
        .collect::<Vec<_>>();

    for i in 0..10 {
        let scale = ScaleTransform::compute(400.0 + 40.0 * i as f64, 300.0);
        let pixel_sites = sites.iter().map(|&p| scale.to_pixel(p)).collect::<Vec<_>>();
        if let Err(err) = SweepBuilder.build(&pixel_sites, &[]) {
            println!("{} sites: {}", number, err);
        }
    }
}

fn main() {
    let mut n = 1;
    println!(" i |     N |    elapsed | increase ");
    let mut times: Vec<Duration> = Vec::new();
    for i in 0..=14 {
        let start = Instant::now();
        rebuild(n);
        let elapsed = start.elapsed();
        let increase = times
            .last()
            .map(|t| elapsed.as_secs_f64() / t.as_secs_f64())
            .unwrap_or(f64::NAN);
        println!("{:>2} | {:>5} | {:>10.3?} | {:.2}", i, n, elapsed, increase);

        times.push(elapsed);

        n *= 2;
    }
}
