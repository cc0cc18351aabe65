// First-difference series

use crate::core::format::{AggregatedPoint, DeltaPoint};

/// Value difference between consecutive points; the first delta is 0.
/// No division by elapsed time, so uneven spacing is fine.
pub fn deltas(points: &[AggregatedPoint]) -> Vec<DeltaPoint> {
    let mut out = Vec::with_capacity(points.len());
    let mut previous: Option<f64> = None;

    for point in points {
        let delta = match previous {
            Some(prev) => point.value - prev,
            None => 0.0,
        };
        out.push(DeltaPoint {
            timestamp: point.timestamp,
            delta,
        });
        previous = Some(point.value);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(timestamp: f64, value: f64) -> AggregatedPoint {
        AggregatedPoint { timestamp, value }
    }

    #[test]
    fn test_deltas_basic() {
        let points = [point(0.0, 10.0), point(1.0, 12.5), point(7.0, 11.0)];
        let d = deltas(&points);
        assert_eq!(d.len(), 3);
        assert_eq!(d[0].delta, 0.0);
        assert_eq!(d[1].delta, 2.5);
        assert_eq!(d[2].delta, -1.5);
        // timestamps copied verbatim, uneven spacing untouched
        assert_eq!(d[2].timestamp, 7.0);
    }

    #[test]
    fn test_deltas_match_pairwise_difference() {
        let points: Vec<AggregatedPoint> = (0..50)
            .map(|i| point(i as f64 * 1000.0, (i as f64).powi(2) * 0.1 - 42.0))
            .collect();
        let d = deltas(&points);
        assert_eq!(d[0].delta, 0.0);
        for i in 1..points.len() {
            assert_eq!(d[i].delta, points[i].value - points[i - 1].value);
            assert_eq!(d[i].timestamp, points[i].timestamp);
        }
    }

    #[test]
    fn test_deltas_edge_lengths() {
        assert!(deltas(&[]).is_empty());
        let single = deltas(&[point(5.0, -42.3)]);
        assert_eq!(single, vec![DeltaPoint { timestamp: 5.0, delta: 0.0 }]);
    }
}
