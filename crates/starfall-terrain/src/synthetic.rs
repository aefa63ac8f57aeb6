//! Seeded synthetic landing sites for ground combat.
//!
//! A flat base with a handful of smooth hills. The same seed always gives
//! the same terrain, so ground sessions stay deterministic.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::heightfield::{Heightfield, HeightfieldHeader};

/// Default grid resolution of a landing site.
pub const LANDING_SITE_SIZE: u32 = 129;

/// World units per cell of a landing site.
pub const LANDING_SITE_CELL: f32 = 2.0;

const HILL_COUNT: usize = 12;
const HILL_MAX_HEIGHT: f32 = 18.0;

struct Hill {
    x: f32,
    z: f32,
    height: f32,
    radius: f32,
}

/// Generate a landing site centred on `(center_x, center_z)`.
pub fn generate_landing_site(seed: u64, center_x: f32, center_z: f32) -> Heightfield {
    let header =
        HeightfieldHeader::centered(center_x, center_z, LANDING_SITE_SIZE, LANDING_SITE_CELL);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let extent = (LANDING_SITE_SIZE - 1) as f32 * LANDING_SITE_CELL;
    let hills: Vec<Hill> = (0..HILL_COUNT)
        .map(|_| Hill {
            x: header.origin_x + rng.gen_range(0.0..extent),
            z: header.origin_z + rng.gen_range(0.0..extent),
            height: rng.gen_range(2.0..HILL_MAX_HEIGHT),
            radius: rng.gen_range(10.0..40.0),
        })
        .collect();

    let mut heights = Vec::with_capacity((header.width * header.depth) as usize);
    for row in 0..header.depth {
        for col in 0..header.width {
            let x = header.origin_x + col as f32 * header.cell_size;
            let z = header.origin_z + row as f32 * header.cell_size;
            let h: f32 = hills
                .iter()
                .map(|hill| {
                    let d2 = (x - hill.x).powi(2) + (z - hill.z).powi(2);
                    hill.height * (-d2 / (hill.radius * hill.radius)).exp()
                })
                .sum();
            heights.push(h);
        }
    }

    Heightfield { header, heights }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_core::terrain::HeightProvider;

    #[test]
    fn test_same_seed_same_terrain() {
        let a = generate_landing_site(99, 0.0, 0.0);
        let b = generate_landing_site(99, 0.0, 0.0);
        assert_eq!(a.heights, b.heights);
    }

    #[test]
    fn test_different_seed_different_terrain() {
        let a = generate_landing_site(1, 0.0, 0.0);
        let b = generate_landing_site(2, 0.0, 0.0);
        assert_ne!(a.heights, b.heights);
    }

    #[test]
    fn test_landing_site_shape() {
        let site = generate_landing_site(5, 100.0, -40.0);
        assert_eq!(
            site.heights.len(),
            (LANDING_SITE_SIZE * LANDING_SITE_SIZE) as usize
        );
        assert!(site.min_height() >= 0.0);
        assert!(site.max_height() > 0.0, "hills should rise above the base");
        let h = site.height_at(100.0, -40.0);
        assert!(h.is_finite());
    }
}
