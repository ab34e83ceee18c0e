pub mod crisis;
pub mod fx;
pub mod growth;
pub mod market;
pub mod portfolio;
pub mod radar;
pub mod tax;
pub mod tiers;
