//! Point-to-path distances on the sphere, in meters.
//!
//! Distances use the haversine formula on a mean-radius sphere. Segment
//! projection is planar in degree space and then measured with haversine,
//! which is accurate for the short segments trail paths are made of.

use geo_types::{Line, LineString};

use crate::geometry::BBox;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters per degree of latitude (and per degree of longitude at the
/// equator). Used to convert a radius to a conservative degree window.
const METERS_PER_DEGREE: f64 = 110_574.0;

/// Haversine distance between two points in meters.
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let half_dlat = ((lat2 - lat1) / 2.0).to_radians();
    let half_dlng = ((lng2 - lng1) / 2.0).to_radians();

    let h = half_dlat.sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * half_dlng.sin().powi(2);

    // sqrt(h) can drift a hair above 1.0 for near-antipodal points
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

/// Minimum distance in meters from a point to any segment of `path`.
///
/// A path with fewer than two vertices has no segments and yields
/// `f64::INFINITY`.
pub fn min_distance_to_line_string(lat: f64, lng: f64, path: &LineString<f64>) -> f64 {
    path.lines()
        .map(|seg| segment_distance(lat, lng, &seg))
        .fold(f64::INFINITY, f64::min)
}

fn segment_distance(lat: f64, lng: f64, seg: &Line<f64>) -> f64 {
    let (a, b) = (seg.start, seg.end);
    let (dx, dy) = (b.x - a.x, b.y - a.y);

    if dx == 0.0 && dy == 0.0 {
        return haversine_distance(lat, lng, a.y, a.x);
    }

    // Planar projection in degree space, clamped to the segment
    let t = (((lng - a.x) * dx + (lat - a.y) * dy) / (dx * dx + dy * dy)).clamp(0.0, 1.0);
    haversine_distance(lat, lng, a.y + t * dy, a.x + t * dx)
}

/// Bounding box that conservatively covers a radius around a point.
///
/// The longitude span is inflated by the cosine of the latitude so the box
/// always contains the true circle; near the poles the cosine is clamped to
/// keep the span finite. Intended as an index prefilter only — callers must
/// refine candidates with exact distances.
pub fn radius_bbox(lat: f64, lng: f64, radius_meters: f64) -> BBox {
    let delta_lat = radius_meters / METERS_PER_DEGREE;
    let cos_lat = lat.to_radians().cos().abs().max(0.01);
    let delta_lng = radius_meters / (METERS_PER_DEGREE * cos_lat);

    BBox::new(
        (lat - delta_lat).max(-90.0),
        (lat + delta_lat).min(90.0),
        (lng - delta_lng).max(-180.0),
        (lng + delta_lng).min(180.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{expect_line_string, parse_wkt};

    fn path(wkt: &str) -> LineString<f64> {
        expect_line_string(parse_wkt(wkt).unwrap()).unwrap()
    }

    #[test]
    fn test_haversine_dublin_to_cork() {
        let d = haversine_distance(53.3498, -6.2603, 51.8985, -8.4756);
        assert!((d - 220_000.0).abs() < 2_500.0, "got {}", d);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let d = haversine_distance(53.0, -6.0, 54.0, -6.0);
        assert!((d - 111_195.0).abs() < 200.0, "got {}", d);
    }

    #[test]
    fn test_haversine_identical_points() {
        assert_eq!(haversine_distance(53.25, -6.26, 53.25, -6.26), 0.0);
    }

    #[test]
    fn test_vertex_on_path_measures_zero() {
        let p = path("LINESTRING(-6.26 53.25, -6.27 53.26)");
        assert!(min_distance_to_line_string(53.25, -6.26, &p) < 1e-6);
    }

    #[test]
    fn test_interior_projection_beats_endpoints() {
        // Horizontal path at lat 53.25; query point 0.01 degrees north of
        // its midpoint
        let p = path("LINESTRING(-6.30 53.25, -6.20 53.25)");
        let d = min_distance_to_line_string(53.26, -6.25, &p);
        assert!((d - 1_112.0).abs() < 30.0, "got {}", d);
        assert!(d < haversine_distance(53.26, -6.25, 53.25, -6.30));
    }

    #[test]
    fn test_beyond_the_end_clamps_to_endpoint() {
        let p = path("LINESTRING(-6.30 53.25, -6.25 53.25)");
        let d = min_distance_to_line_string(53.25, -6.20, &p);
        let to_endpoint = haversine_distance(53.25, -6.20, 53.25, -6.25);
        assert!((d - to_endpoint).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_vertex_degenerates_to_point() {
        let p = path("LINESTRING(-6.26 53.25, -6.26 53.25)");
        let d = min_distance_to_line_string(53.26, -6.26, &p);
        let direct = haversine_distance(53.26, -6.26, 53.25, -6.26);
        assert!((d - direct).abs() < 1e-9);
    }

    #[test]
    fn test_path_without_segments_is_infinite() {
        let empty = LineString::<f64>::new(vec![]);
        assert_eq!(
            min_distance_to_line_string(53.25, -6.26, &empty),
            f64::INFINITY
        );
    }

    #[test]
    fn test_radius_bbox_contains_circle() {
        let lat = 53.25;
        let lng = -6.26;
        let radius = 50_000.0;
        let bbox = radius_bbox(lat, lng, radius);

        // Walk the circle; every point within the radius must fall in the box
        for step in 0..36 {
            let theta = f64::from(step) * 10.0_f64.to_radians();
            let delta_lat = (radius / EARTH_RADIUS_METERS).to_degrees() * theta.cos();
            let delta_lng =
                (radius / EARTH_RADIUS_METERS).to_degrees() * theta.sin() / lat.to_radians().cos();
            assert!(
                bbox.contains_point(lat + delta_lat, lng + delta_lng),
                "circle point at step {} escaped the bbox",
                step
            );
        }
    }

    #[test]
    fn test_radius_bbox_clamps_at_pole() {
        let bbox = radius_bbox(89.9, 0.0, 100_000.0);
        assert!(bbox.max_lat <= 90.0);
        assert!(bbox.min_lng >= -180.0);
        assert!(bbox.max_lng <= 180.0);
    }
}
