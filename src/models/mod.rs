pub mod native;
pub mod seq2seq;
pub mod vocab;
