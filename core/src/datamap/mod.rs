pub mod category;
pub mod dataset;
pub mod filter;
pub mod flow;
pub mod format;
pub mod group;
pub mod lookup;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod render;
