pub mod dtos;
pub mod handlers;
pub mod prompt;

pub use dtos::{AnswerRequest, AnswerResponse};
pub use handlers::generate_answer;
