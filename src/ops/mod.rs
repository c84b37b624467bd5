pub mod aggregate;
pub mod deps;
pub mod epic;
pub mod group;
pub mod normalize;
pub mod placement;
pub mod timeframe;
