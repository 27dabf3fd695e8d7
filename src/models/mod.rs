pub mod coordinates;
pub mod driver;
pub mod prediction;
pub mod region;
pub mod selection;

pub use coordinates::{Coordinate, Location};
pub use driver::{Driver, Marker};
pub use prediction::{PlaceAddress, Prediction, SelectedPlace};
pub use region::Region;
pub use selection::{MapSnapshot, SearchField, SelectionState};
