pub mod normalize;
pub mod window;
