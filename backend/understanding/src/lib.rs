//! Vision understanding: turn table images into structured records.

pub mod extractor;
pub mod mock;
pub mod prompt;
pub mod response;
pub mod vision;

pub use extractor::Extractor;
pub use mock::MockVisionProvider;
pub use prompt::build_prompt;
pub use response::{parse_records, strip_code_fences};
pub use vision::OpenAiVisionProvider;
