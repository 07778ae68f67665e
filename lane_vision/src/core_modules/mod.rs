pub mod lane_aggregator;
pub mod line_fit;
pub mod region;
pub mod segment;
