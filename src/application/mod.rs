pub mod services;

pub use services::{
    convert_file, convert_lines, parse_line, summarize, ConvertOptions, GraphBuilder,
    GraphSummary,
};
