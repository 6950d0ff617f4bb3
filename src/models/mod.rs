pub mod gallery;
pub mod generation;
pub mod stream;

pub use gallery::*;
pub use generation::*;
pub use stream::*;
