mod reader;
mod stats;

pub use reader::{ReadLimits, TextReader, TextSnapshot};
pub use stats::{SENTENCE_MARKS, TextStats};
