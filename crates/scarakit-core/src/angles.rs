//! Angle and rounding helpers

/// Maps an angle in degrees into the canonical range (-180, 180].
pub fn map_angle_deg(angle_deg: f64) -> f64 {
    let wrapped = angle_deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Nearest integer, halves rounded up.
pub fn nint(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_angle_range() {
        assert_eq!(map_angle_deg(0.0), 0.0);
        assert_eq!(map_angle_deg(180.0), 180.0);
        assert_eq!(map_angle_deg(-180.0), 180.0);
        assert_eq!(map_angle_deg(190.0), -170.0);
        assert_eq!(map_angle_deg(-190.0), 170.0);
        assert_eq!(map_angle_deg(720.0 + 45.0), 45.0);
        assert_eq!(map_angle_deg(-90.0), -90.0);
    }

    #[test]
    fn test_nint() {
        assert_eq!(nint(6.2), 6);
        assert_eq!(nint(2.5), 3);
        assert_eq!(nint(0.49), 0);
        assert_eq!(nint(-1.2), -1);
    }
}
