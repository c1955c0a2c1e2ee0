pub mod completion;
pub mod parse;
pub mod scrape;
pub mod show;

mod render;
