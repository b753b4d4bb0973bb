//! Mapping between wheel segments and angles.
//!
//! The pointer is fixed at the top of the wheel. Segment `i` of `n` covers
//! the wheel-frame arc `[boundary(i), boundary(i + 1))`, measured clockwise
//! from the wheel's zero mark. Rotating the wheel clockwise by `θ` brings the
//! wheel-frame angle `-θ (mod 2π)` under the pointer.
//!
//! Every boundary is computed through [`boundary`] so that the forward
//! mapping ([`index_to_angle_range`]) and the inverse ([`angle_to_index`])
//! agree exactly, including on the boundaries themselves.

use std::f64::consts::TAU;
use std::ops::Range;

/// Angular width of one segment on a wheel with `segment_count` segments.
pub fn segment_width(segment_count: usize) -> f64 {
    if segment_count == 0 {
        return TAU;
    }
    TAU / segment_count as f64
}

/// Wheel-frame angle at which segment `k` starts.
///
/// `boundary(n, n)` is exactly `2π`, closing the last arc.
pub fn boundary(k: usize, segment_count: usize) -> f64 {
    if segment_count == 0 || k >= segment_count {
        return TAU;
    }
    k as f64 * TAU / segment_count as f64
}

/// Normalise an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Wheel-frame arc covered by segment `index`.
pub fn index_to_angle_range(index: usize, segment_count: usize) -> Range<f64> {
    boundary(index, segment_count)..boundary(index + 1, segment_count)
}

/// Segment containing the wheel-frame `angle`.
///
/// An angle exactly on a boundary belongs to the segment whose arc starts
/// there. Returns `None` for an empty wheel.
pub fn angle_to_index(angle: f64, segment_count: usize) -> Option<usize> {
    if segment_count == 0 {
        return None;
    }
    let a = normalize_angle(angle);
    let estimate = (a / TAU * segment_count as f64).floor();
    let mut index = if estimate.is_finite() && estimate > 0.0 {
        (estimate as usize).min(segment_count - 1)
    } else {
        0
    };

    // Correct the floating point estimate against the exact boundaries
    while index > 0 && a < boundary(index, segment_count) {
        index -= 1;
    }
    while index + 1 < segment_count && a >= boundary(index + 1, segment_count) {
        index += 1;
    }
    Some(index)
}

/// Wheel-frame angle sitting under the pointer for a clockwise `rotation`.
pub fn pointer_angle(rotation: f64) -> f64 {
    normalize_angle(-rotation)
}

/// Segment under the pointer after a clockwise `rotation`.
pub fn index_under_pointer(rotation: f64, segment_count: usize) -> Option<usize> {
    angle_to_index(pointer_angle(rotation), segment_count)
}

/// Rotation in `[0, 2π)` that rests segment `index` under the pointer.
///
/// `offset` shifts the landing point away from the segment centre as a
/// fraction of the segment width and is clamped to `[-0.45, 0.45]`, which
/// keeps the pointer strictly inside the segment.
pub fn resting_rotation(index: usize, segment_count: usize, offset: f64) -> f64 {
    let offset = if offset.is_finite() {
        offset.clamp(-0.45, 0.45)
    } else {
        0.0
    };
    let range = index_to_angle_range(index, segment_count);
    let width = range.end - range.start;
    let target = range.start + width * (0.5 + offset);
    normalize_angle(-target)
}

/// Wheel-frame angle at the middle of segment `index`, used to place labels.
pub fn segment_center(index: usize, segment_count: usize) -> f64 {
    let range = index_to_angle_range(index, segment_count);
    (range.start + range.end) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_segment_width_even_split() {
        assert!((segment_width(4) - TAU / 4.0).abs() < 1e-12);
        assert_eq!(segment_width(0), TAU);
    }

    #[test]
    fn test_last_boundary_closes_circle() {
        for n in 1..64 {
            assert_eq!(boundary(n, n), TAU);
            assert_eq!(index_to_angle_range(n - 1, n).end, TAU);
        }
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!((normalize_angle(TAU + 1.0) - 1.0).abs() < 1e-12);
        assert!((normalize_angle(-1.0) - (TAU - 1.0)).abs() < 1e-12);
        assert_eq!(normalize_angle(TAU), 0.0);
        assert!(normalize_angle(-1e-18) < TAU);
    }

    #[test]
    fn test_angle_to_index_empty_wheel() {
        assert_eq!(angle_to_index(1.0, 0), None);
        assert_eq!(index_under_pointer(1.0, 0), None);
    }

    #[test]
    fn test_boundaries_belong_to_starting_segment() {
        for n in 1..97 {
            for i in 0..n {
                let range = index_to_angle_range(i, n);
                assert_eq!(angle_to_index(range.start, n), Some(i), "start of {i}/{n}");
                assert_eq!(
                    angle_to_index(range.end, n),
                    Some((i + 1) % n),
                    "end of {i}/{n}"
                );
            }
        }
    }

    #[test]
    fn test_just_below_boundary_stays_in_previous_segment() {
        for n in 2..40 {
            for i in 1..n {
                let start = boundary(i, n);
                let below = start - 1e-9;
                assert_eq!(angle_to_index(below, n), Some(i - 1));
            }
        }
    }

    #[test]
    fn test_pointer_reads_segment_zero_at_rest() {
        // Unrotated wheel: the zero mark sits under the pointer
        assert_eq!(index_under_pointer(0.0, 8), Some(0));
    }

    #[test]
    fn test_clockwise_rotation_brings_last_segment_under_pointer() {
        let n = 8;
        let small = segment_width(n) / 4.0;
        assert_eq!(index_under_pointer(small, n), Some(n - 1));
    }

    #[test]
    fn test_resting_rotation_lands_on_index() {
        for n in 1..50 {
            for i in 0..n {
                for offset in [-0.45, -0.2, 0.0, 0.2, 0.45] {
                    let rotation = resting_rotation(i, n, offset);
                    assert_eq!(index_under_pointer(rotation, n), Some(i));
                }
            }
        }
    }

    #[test]
    fn test_resting_rotation_clamps_offset() {
        let n = 6;
        let clamped = resting_rotation(2, n, 5.0);
        assert_eq!(clamped, resting_rotation(2, n, 0.45));
        assert_eq!(resting_rotation(2, n, f64::NAN), resting_rotation(2, n, 0.0));
    }

    #[test]
    fn test_segment_center_inside_range() {
        let range = index_to_angle_range(3, 10);
        let center = segment_center(3, 10);
        assert!(range.contains(&center));
    }

    proptest! {
        #[test]
        fn angle_to_index_inverts_ranges(n in 1usize..500, raw in 0usize..500, frac in 0.0f64..1.0) {
            let i = raw % n;
            let range = index_to_angle_range(i, n);
            let angle = range.start + (range.end - range.start) * frac;
            prop_assume!(angle < range.end);
            prop_assert_eq!(angle_to_index(angle, n), Some(i));
        }

        #[test]
        fn full_turns_do_not_change_pointer_index(
            n in 1usize..64,
            raw in 0usize..64,
            offset in -0.4f64..0.4,
            turns in 0u32..20,
        ) {
            let i = raw % n;
            let rotation = resting_rotation(i, n, offset) + f64::from(turns) * TAU;
            prop_assert_eq!(index_under_pointer(rotation, n), Some(i));
        }
    }
}
