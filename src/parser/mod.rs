pub mod payload;
pub mod regex;

pub use payload::PayloadParser;
pub use regex::RegexPatterns;
