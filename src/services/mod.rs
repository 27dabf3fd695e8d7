pub mod autocomplete;
pub mod geocoder;
pub mod map_view;
pub mod markers;
pub mod region;
