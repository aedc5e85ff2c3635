pub mod persistence;

pub use persistence::{load_graph, read_lines, save_graph};
