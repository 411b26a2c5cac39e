pub mod renderer;

pub use renderer::{Cell, Renderer, cell_grid};
