//! Shared query-parameter types and parsers.
//!
//! Coordinate-pair parameters follow the GeoJSON axis order, longitude
//! first, matching the coordinates inside feature bodies.

use crate::error::{Result, ServerError};
use serde::Deserialize;
use trailmap_spatial::BBox;

/// Common list-endpoint parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Viewport filter: `minLng,minLat,maxLng,maxLat`.
    pub in_bbox: Option<String>,
}

impl ListParams {
    pub fn bbox(&self) -> Result<Option<BBox>> {
        self.in_bbox.as_deref().map(parse_bbox).transpose()
    }
}

/// Parse `minLng,minLat,maxLng,maxLat`.
pub fn parse_bbox(raw: &str) -> Result<BBox> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 4 {
        return Err(ServerError::bad_request(
            "in_bbox must be minLng,minLat,maxLng,maxLat",
        ));
    }
    let mut values = [0.0_f64; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| ServerError::bad_request(format!("invalid in_bbox value: {}", part)))?;
    }
    let [min_lng, min_lat, max_lng, max_lat] = values;
    if min_lng > max_lng || min_lat > max_lat {
        return Err(ServerError::bad_request("in_bbox min must not exceed max"));
    }
    Ok(BBox::new(min_lat, max_lat, min_lng, max_lng))
}

/// Parse `lng,lat` into `(lng, lat)`.
pub fn parse_point(raw: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        return Err(ServerError::bad_request("point must be lng,lat"));
    }
    let lng: f64 = parts[0]
        .trim()
        .parse()
        .map_err(|_| ServerError::bad_request(format!("invalid point value: {}", parts[0])))?;
    let lat: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| ServerError::bad_request(format!("invalid point value: {}", parts[1])))?;
    Ok((lng, lat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_parses_geojson_axis_order() {
        let bbox = parse_bbox("-6.5,53.0,-6.0,53.5").unwrap();
        assert_eq!(bbox.min_lng, -6.5);
        assert_eq!(bbox.min_lat, 53.0);
        assert_eq!(bbox.max_lng, -6.0);
        assert_eq!(bbox.max_lat, 53.5);
    }

    #[test]
    fn bbox_rejects_malformed_input() {
        assert!(parse_bbox("-6.5,53.0,-6.0").is_err());
        assert!(parse_bbox("a,b,c,d").is_err());
        assert!(parse_bbox("-6.0,53.0,-6.5,53.5").is_err());
    }

    #[test]
    fn point_parses_lng_lat() {
        assert_eq!(parse_point("-6.26,53.25").unwrap(), (-6.26, 53.25));
        assert!(parse_point("-6.26").is_err());
        assert!(parse_point("west,north").is_err());
    }
}
