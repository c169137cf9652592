pub mod filter;
pub mod ids;
pub mod normalize;
pub mod outbound;
pub mod store;
