pub mod links;
pub mod movement;
pub mod shimmer;

pub use links::*;
pub use movement::*;
pub use shimmer::*;
