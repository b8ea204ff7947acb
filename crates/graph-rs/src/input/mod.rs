pub mod edgelist;
pub mod graph_text;

pub use graph_text::{GraphText, LoadOptions, ParseError};
