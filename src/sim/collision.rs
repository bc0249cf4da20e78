//! Axis-aligned collision tests and the magnet pull step
//!
//! The world is box-shaped, so all gameplay collision is AABB overlap with
//! an inward padding that forgives sprite-edge near misses.

use glam::Vec2;

use crate::consts::*;

/// AABB overlap test. `padding` shrinks both boxes inward; with a padding
/// large enough to invert a box the test simply never reports overlap.
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2, padding: f32) -> bool {
    a_pos.x + padding < b_pos.x + b_size.x - padding
        && a_pos.x + a_size.x - padding > b_pos.x + padding
        && a_pos.y + padding < b_pos.y + b_size.y - padding
        && a_pos.y + a_size.y - padding > b_pos.y + padding
}

/// Whether a coin center sits inside the magnet capture radius
pub fn in_magnet_range(coin_center: Vec2, player_center: Vec2) -> bool {
    coin_center.distance(player_center) <= MAGNET_RADIUS
}

/// Pull a coin center one step toward the player center. The step length
/// is capped by the remaining distance, so repeated steps strictly shrink
/// the gap and never overshoot into oscillation.
pub fn magnet_step(coin_center: Vec2, player_center: Vec2) -> Vec2 {
    let to_player = player_center - coin_center;
    let dist = to_player.length();
    if dist <= f32::EPSILON {
        return coin_center;
    }
    coin_center + to_player / dist * MAGNET_PULL.min(dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn overlapping_boxes_hit() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(120.0, 110.0);
        let size = Vec2::new(40.0, 40.0);
        assert!(aabb_overlap(a, size, b, size, 0.0));
        assert!(aabb_overlap(b, size, a, size, 0.0));
    }

    #[test]
    fn disjoint_boxes_miss() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(200.0, 100.0);
        let size = Vec2::new(40.0, 40.0);
        assert!(!aabb_overlap(a, size, b, size, 0.0));
    }

    #[test]
    fn touching_edges_do_not_count() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(140.0, 100.0);
        let size = Vec2::new(40.0, 40.0);
        assert!(!aabb_overlap(a, size, b, size, 0.0));
    }

    #[test]
    fn padding_forgives_shallow_overlap() {
        let a = Vec2::new(100.0, 100.0);
        // Overlaps by 8px on x, less than twice the padding
        let b = Vec2::new(132.0, 100.0);
        let size = Vec2::new(40.0, 40.0);
        assert!(aabb_overlap(a, size, b, size, 0.0));
        assert!(!aabb_overlap(a, size, b, size, HITBOX_PADDING));
    }

    #[test]
    fn magnet_step_closes_the_gap_monotonically() {
        let player = Vec2::new(120.0, 250.0);
        let mut coin = Vec2::new(220.0, 200.0);
        let mut last = coin.distance(player);
        while last > 1.0 {
            coin = magnet_step(coin, player);
            let now = coin.distance(player);
            assert!(now < last, "distance grew: {now} >= {last}");
            last = now;
        }
    }

    #[test]
    fn magnet_step_never_overshoots() {
        let player = Vec2::new(120.0, 250.0);
        // Closer than one pull step
        let coin = Vec2::new(123.0, 250.0);
        let pulled = magnet_step(coin, player);
        assert!((pulled - player).length() < 0.001);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in 0.0f32..800.0, ay in 0.0f32..400.0,
            bx in 0.0f32..800.0, by in 0.0f32..400.0,
            pad in 0.0f32..8.0,
        ) {
            let size = Vec2::new(40.0, 40.0);
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(
                aabb_overlap(a, size, b, size, pad),
                aabb_overlap(b, size, a, size, pad)
            );
        }

        /// Padding only ever removes hits, it cannot create one
        #[test]
        fn padding_is_conservative(
            ax in 0.0f32..800.0, ay in 0.0f32..400.0,
            bx in 0.0f32..800.0, by in 0.0f32..400.0,
        ) {
            let size = Vec2::new(40.0, 40.0);
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            if aabb_overlap(a, size, b, size, HITBOX_PADDING) {
                prop_assert!(aabb_overlap(a, size, b, size, 0.0));
            }
        }
    }
}
