use rand::Rng;

use crate::config::Settings;
use crate::entity::PointEntity;
use crate::vec3::Vec3;

/// Number of stars [`add_stars`] creates for a given grid resolution: both
/// axes run from -1 to 1 inclusive in steps of `2 / count`.
pub fn grid_size(count: u32) -> usize {
    let per_axis = count as usize + 1;
    per_axis * per_axis
}

/// Seed a grid of stars over x, y in [-1, 1] and append them to `entities`.
///
/// Depths are drawn from between `-max_z` and `1` rather than the visible
/// range, so stars drift into view over time instead of all starting there.
/// Existing entities are kept. Returns how many were added.
pub fn add_stars(
    entities: &mut Vec<PointEntity>,
    settings: &Settings,
    count: u32,
    rng: &mut impl Rng,
) -> usize {
    if count == 0 {
        return 0;
    }

    let step = 2.0 / count as f64;
    let (z_lo, z_hi) = ordered(-settings.max_z, 1.0);
    let added = grid_size(count);
    entities.reserve(added);

    for i in 0..=count {
        let x = -1.0 + i as f64 * step;
        for j in 0..=count {
            let y = -1.0 + j as f64 * step;
            let z = if z_lo < z_hi {
                rng.gen_range(z_lo..=z_hi)
            } else {
                z_lo
            };
            entities.push(PointEntity::new_star(
                Vec3::new(x, y, z),
                Vec3::ZERO,
                settings.star_shape,
            ));
        }
    }

    tracing::debug!(count, added, "added stars");
    added
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
