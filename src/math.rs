//! Pixel snapping helpers.

/// Round half up, matching how pointer coordinates are snapped to pixels.
pub(crate) fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(74.5), 75);
        assert_eq!(round_half_up(74.49), 74);
        assert_eq!(round_half_up(-0.5), 0);
    }
}
