pub mod compound;

pub use compound::{project, CompoundProjection, ProjectionInput, YearlySnapshot};
