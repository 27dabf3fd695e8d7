use crate::constants::*;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub geocoder: GeocoderConfig,
    pub autocomplete: AutocompleteConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub api_key: String,
    /// Override for proxies and tests; defaults to LocationIQ.
    pub base_url: String,
    pub result_limit: u32,
    /// Comma-separated ISO country codes, sent as `countrycodes`.
    pub country_codes: String,
    pub dedupe: bool,
    pub cache_ttl_seconds: u64,
    pub cache_max_entries: u64,
}

impl GeocoderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: LOCATIONIQ_AUTOCOMPLETE_URL.to_string(),
            result_limit: DEFAULT_GEOCODER_RESULT_LIMIT,
            country_codes: DEFAULT_GEOCODER_COUNTRY_CODES.to_string(),
            dedupe: DEFAULT_GEOCODER_DEDUPE,
            cache_ttl_seconds: DEFAULT_GEOCODER_CACHE_TTL_SECONDS,
            cache_max_entries: DEFAULT_GEOCODER_CACHE_MAX_ENTRIES,
        }
    }

    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::new(
            env::var("LOCATIONIQ_API_KEY").map_err(|_| "LOCATIONIQ_API_KEY must be set")?,
        );

        Ok(Self {
            base_url: env::var("LOCATIONIQ_BASE_URL").unwrap_or(defaults.base_url.clone()),
            result_limit: env_or("GEOCODER_RESULT_LIMIT", defaults.result_limit)?,
            country_codes: env::var("GEOCODER_COUNTRY_CODES")
                .unwrap_or(defaults.country_codes.clone()),
            dedupe: env_flag("GEOCODER_DEDUPE", defaults.dedupe)?,
            cache_ttl_seconds: env_or("GEOCODER_CACHE_TTL", defaults.cache_ttl_seconds)?,
            cache_max_entries: env_or("GEOCODER_CACHE_MAX_ENTRIES", defaults.cache_max_entries)?,
            ..defaults
        })
    }
}

#[derive(Debug, Clone)]
pub struct AutocompleteConfig {
    /// Quiet period after the last keystroke before a query fires
    pub debounce: Duration,

    /// Queries with fewer characters clear the list without a request
    pub min_query_chars: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
        }
    }
}

impl AutocompleteConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let min_query_chars = env_or("AUTOCOMPLETE_MIN_QUERY_LEN", defaults.min_query_chars)?;
        if min_query_chars == 0 {
            return Err("AUTOCOMPLETE_MIN_QUERY_LEN must be at least 1".to_string());
        }

        Ok(Self {
            debounce: Duration::from_millis(env_or(
                "AUTOCOMPLETE_DEBOUNCE_MS",
                defaults.debounce.as_millis() as u64,
            )?),
            min_query_chars,
        })
    }
}

#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Fallback center shown before any location is known
    pub default_latitude: f64,
    pub default_longitude: f64,

    /// Span used for fallback and single-point regions
    pub default_delta: f64,

    /// Floor applied to every computed span
    pub min_delta: f64,

    /// Multiplier applied to the two-point bounding box span, must exceed 1
    pub padding_factor: f64,

    /// Largest per-axis offset (degrees) between the user and a driver marker
    pub marker_max_offset_deg: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_latitude: DEFAULT_REGION_LATITUDE,
            default_longitude: DEFAULT_REGION_LONGITUDE,
            default_delta: DEFAULT_REGION_DELTA,
            min_delta: MIN_REGION_DELTA,
            padding_factor: REGION_PADDING_FACTOR,
            marker_max_offset_deg: DEFAULT_MARKER_MAX_OFFSET_DEG,
        }
    }
}

impl MapConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            default_latitude: env_or("MAP_DEFAULT_LATITUDE", defaults.default_latitude)?,
            default_longitude: env_or("MAP_DEFAULT_LONGITUDE", defaults.default_longitude)?,
            default_delta: env_or("MAP_DEFAULT_DELTA", defaults.default_delta)?,
            min_delta: env_or("MAP_MIN_DELTA", defaults.min_delta)?,
            padding_factor: env_or("MAP_PADDING_FACTOR", defaults.padding_factor)?,
            marker_max_offset_deg: env_or(
                "MARKER_MAX_OFFSET_DEG",
                defaults.marker_max_offset_deg,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.default_latitude) {
            return Err("MAP_DEFAULT_LATITUDE must be between -90 and 90".to_string());
        }
        if !(-180.0..=180.0).contains(&self.default_longitude) {
            return Err("MAP_DEFAULT_LONGITUDE must be between -180 and 180".to_string());
        }
        if !is_positive(self.default_delta) || !is_positive(self.min_delta) {
            return Err("MAP_DEFAULT_DELTA and MAP_MIN_DELTA must be positive".to_string());
        }
        if !(self.padding_factor.is_finite() && self.padding_factor > 1.0) {
            return Err("MAP_PADDING_FACTOR must be greater than 1".to_string());
        }
        if !(is_positive(self.marker_max_offset_deg)
            && self.marker_max_offset_deg <= MAX_MARKER_OFFSET_DEG)
        {
            return Err(format!(
                "MARKER_MAX_OFFSET_DEG must be in (0, {}]",
                MAX_MARKER_OFFSET_DEG
            ));
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            geocoder: GeocoderConfig::from_env()?,
            autocomplete: AutocompleteConfig::from_env()?,
            map: MapConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Like [`env_or`] for booleans, also accepting the `1`/`0` LocationIQ uses.
fn env_flag(key: &str, default: bool) -> Result<bool, String> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(format!("Invalid {}", key)),
        },
        Err(_) => Ok(default),
    }
}

/// Finite and strictly greater than zero. NaN fails.
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Read `key`, falling back to `default` when unset. A set but unparsable
/// value is an error naming the variable.
fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| format!("Invalid {}", key)),
        Err(_) => Ok(default),
    }
}
