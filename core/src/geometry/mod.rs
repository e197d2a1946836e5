pub mod coordinate;
pub mod vector;

pub use coordinate::Coordinate;
pub use vector::{Displacement, GeometryError, VectorDirection};
