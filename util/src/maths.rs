//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Point2;
use num_traits::Float;

/// Clamp a value into the range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float,
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Arithmetic mean of the values, or `None` if there are none.
pub fn mean<T>(values: &[T]) -> Option<T>
where
    T: Float,
{
    if values.is_empty() {
        return None;
    }

    let sum = values.iter().fold(T::zero(), |acc, v| acc + *v);

    T::from(values.len()).map(|n| sum / n)
}

/// Euclidean distance between two points.
pub fn distance(point_0: &Point2<f64>, point_1: &Point2<f64>) -> f64 {
    nalgebra::distance(point_0, point_1)
}

/// Bearing of `to` as seen from `from`, measured from the positive X axis.
///
/// Units: degrees, in the range [-180, 180]
pub fn bearing_deg(from: &Point2<f64>, to: &Point2<f64>) -> f64 {
    let delta = to - from;
    delta.y.atan2(delta.x).to_degrees()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&20.0, &-15.0, &15.0), 15.0);
        assert_eq!(clamp(&-20.0, &-15.0, &15.0), -15.0);
        assert_eq!(clamp(&0.5, &-1.0, &1.0), 0.5);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean::<f64>(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_distance_and_bearing() {
        let a = Point2::new(1.0, 1.0);
        let b = Point2::new(4.0, 5.0);

        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
        assert!((bearing_deg(&a, &Point2::new(1.0, 3.0)) - 90.0).abs() < 1e-12);
        assert!((bearing_deg(&a, &Point2::new(0.0, 1.0)) - 180.0).abs() < 1e-12);
        assert!((bearing_deg(&a, &Point2::new(2.0, 0.0)) + 45.0).abs() < 1e-12);
    }
}
