mod label;
mod reader;
mod types;
mod writer;

pub use label::{LabelFields, parse_label};
pub use reader::MessageReader;
pub use types::*;
pub use writer::MessageWriter;
