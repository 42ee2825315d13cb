//! Quiz session module

mod handle;
mod machine;
mod view;


pub use handle::*;
pub use machine::*;
pub use view::*;
