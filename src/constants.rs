//! Stable application-wide constants.
//!
//! Values here are structural invariants and default fallbacks for
//! env-var-based configuration. For the knobs that are read at startup, see
//! [`Config`](crate::config::Config).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Geocoding provider ---

/// LocationIQ autocomplete endpoint.
pub const LOCATIONIQ_AUTOCOMPLETE_URL: &str = "https://api.locationiq.com/v1/autocomplete";
/// Maximum predictions requested per query.
pub const DEFAULT_GEOCODER_RESULT_LIMIT: u32 = 10;
/// Country filter passed as `countrycodes`. The client ships for India.
pub const DEFAULT_GEOCODER_COUNTRY_CODES: &str = "in";
/// Ask the provider to collapse duplicate places.
pub const DEFAULT_GEOCODER_DEDUPE: bool = true;
/// Response cache TTL: 10 minutes. Overridden by `GEOCODER_CACHE_TTL`.
pub const DEFAULT_GEOCODER_CACHE_TTL_SECONDS: u64 = 600;
/// Response cache capacity. Overridden by `GEOCODER_CACHE_MAX_ENTRIES`.
pub const DEFAULT_GEOCODER_CACHE_MAX_ENTRIES: u64 = 500;

// --- Autocomplete ---

/// Quiet period after the last keystroke before a query is issued.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
/// Queries shorter than this (in characters) never reach the network.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

// --- Map viewport ---
// The fallback center is Bengaluru; it is only shown before the first
// location fix arrives.

/// Fallback region center latitude.
pub const DEFAULT_REGION_LATITUDE: f64 = 12.9716;
/// Fallback region center longitude.
pub const DEFAULT_REGION_LONGITUDE: f64 = 77.5946;
/// Span used for single-point and fallback regions (degrees).
pub const DEFAULT_REGION_DELTA: f64 = 0.01;
/// No region span is ever smaller than this (degrees).
pub const MIN_REGION_DELTA: f64 = 0.005;
/// Bounding-box span multiplier so both endpoints sit inside the viewport edge.
pub const REGION_PADDING_FACTOR: f64 = 1.3;

// --- Driver markers ---

/// Largest per-axis offset (degrees) between the user and a driver marker.
/// 0.005 deg is roughly 550 m of latitude.
pub const DEFAULT_MARKER_MAX_OFFSET_DEG: f64 = 0.005;
/// Upper bound accepted for `MARKER_MAX_OFFSET_DEG` (roughly 5.5 km).
pub const MAX_MARKER_OFFSET_DEG: f64 = 0.05;
