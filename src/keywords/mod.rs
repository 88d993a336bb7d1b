pub mod tfidf;
pub mod tokenizer;

pub use tfidf::*;
pub use tokenizer::*;
