//! Deterministic synthetic test images
//!
//! All generators return samples on the 0-255 intensity scale used by
//! decoded 8-bit images, except the binary helpers which return 0/1 masks.

use imagetools_core::Grid;

/// Horizontal ramp from 0 at the left edge to 255 at the right edge.
pub fn gradient(width: u32, height: u32) -> Grid {
    let span = (width.max(2) - 1) as f32;
    Grid::from_fn(width, height, move |x, _| 255.0 * x as f32 / span)
        .expect("non-zero pattern size")
}

/// Checkerboard of `cell x cell` squares alternating between `low` and `high`.
pub fn checkerboard(width: u32, height: u32, cell: u32, low: f32, high: f32) -> Grid {
    let cell = cell.max(1);
    Grid::from_fn(width, height, move |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 { low } else { high }
    })
    .expect("non-zero pattern size")
}

/// Binary mask with a filled axis-aligned rectangle.
pub fn filled_rect(width: u32, height: u32, x0: u32, y0: u32, w: u32, h: u32) -> Grid {
    Grid::from_fn(width, height, move |x, y| {
        if x >= x0 && x < x0 + w && y >= y0 && y < y0 + h { 1.0 } else { 0.0 }
    })
    .expect("non-zero pattern size")
}

/// Binary mask with a filled disc.
pub fn disc(width: u32, height: u32, cx: f32, cy: f32, radius: f32) -> Grid {
    Grid::from_fn(width, height, move |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        if dx * dx + dy * dy <= radius * radius { 1.0 } else { 0.0 }
    })
    .expect("non-zero pattern size")
}

/// Smooth "scene" made of overlapping sinusoids, in [0, 255].
///
/// `phase` shifts the pattern; scenes with different phases share their
/// structure but differ in where the bright and dark areas fall.
pub fn scene(width: u32, height: u32, phase: f32) -> Grid {
    let fx = std::f32::consts::TAU / width as f32;
    let fy = std::f32::consts::TAU / height as f32;
    Grid::from_fn(width, height, move |x, y| {
        let u = x as f32 * fx;
        let v = y as f32 * fy;
        let s = (1.5 * u + phase).sin() + (2.5 * v - 0.5 * phase).cos() + (u + v + phase).sin();
        127.5 + 42.5 * s
    })
    .expect("non-zero pattern size")
}

/// Deterministic small perturbation in `[-amplitude, amplitude]`.
///
/// Used to build near-identical copies of a scene (e.g. re-encoding noise).
pub fn perturb(grid: &Grid, amplitude: f32) -> Grid {
    let w = grid.width();
    let src = grid.clone();
    Grid::from_fn(w, grid.height(), move |x, y| {
        let h = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)) % 2001;
        let noise = (h as f32 / 1000.0) - 1.0;
        src.get_pixel_unchecked(x, y) + amplitude * noise
    })
    .expect("non-zero pattern size")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_range() {
        let g = gradient(256, 4);
        assert_eq!(g.min_value(), 0.0);
        assert_eq!(g.max_value(), 255.0);
    }

    #[test]
    fn test_filled_rect_count() {
        let r = filled_rect(16, 16, 4, 4, 8, 6);
        assert_eq!(r.sum(), 48.0);
    }

    #[test]
    fn test_scene_range() {
        let s = scene(64, 48, 0.3);
        assert!(s.min_value() >= 0.0);
        assert!(s.max_value() <= 255.0);
    }

    #[test]
    fn test_perturb_bounded() {
        let s = scene(32, 32, 0.0);
        let p = perturb(&s, 0.5);
        let err = s.absolute_error(&p).unwrap();
        assert!(err.max_error <= 0.5 + 1e-4);
    }
}
