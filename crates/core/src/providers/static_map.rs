/// Zoom level of country map thumbnails.
pub const MAP_ZOOM: u8 = 5;
/// Map image size as `WIDTHxHEIGHT`.
pub const MAP_SIZE: &str = "600x300";

/// Static map image URL centred on `(lat, lng)` with a marker there.
///
/// Pure formatting; no request is made.
pub fn build_static_map_url(base_url: &str, lat: f64, lng: f64) -> String {
    format!(
        "{base_url}?center={lat},{lng}&zoom={MAP_ZOOM}&size={MAP_SIZE}&markers={lat},{lng},red-pushpin"
    )
}
