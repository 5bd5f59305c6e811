//! Snapping utilities (eg. snap to a grid).

/// The number of nanometers in a micron.
pub const NM_PER_UM: f64 = 1e3;

/// Snaps `pos`, in microns, to the nearest multiple of `grid` nanometers.
///
/// Ties are rounded to the even multiple so that snapping has no directional bias.
///
/// # Panics
///
/// Panics if `grid` is zero.
///
/// # Examples
///
/// ```
/// use geometry::snap::snap_to_grid_nm;
///
/// assert_eq!(snap_to_grid_nm(0.3, 250), 0.25);
/// assert_eq!(snap_to_grid_nm(0.125, 250), 0.);
/// assert_eq!(snap_to_grid_nm(0.375, 250), 0.5);
/// assert_eq!(snap_to_grid_nm(0.625, 250), 0.5);
/// ```
pub fn snap_to_grid_nm(pos: f64, grid: u32) -> f64 {
    assert!(grid > 0);
    let grid = grid as f64;
    (pos * NM_PER_UM / grid).round_ties_even() * grid / NM_PER_UM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_is_idempotent() {
        for grid in [1, 2, 5, 10] {
            for i in -200..200 {
                let pos = i as f64 * 0.00137;
                let once = snap_to_grid_nm(pos, grid);
                assert_eq!(snap_to_grid_nm(once, grid), once);
            }
        }
    }
}
