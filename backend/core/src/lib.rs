pub mod error;
pub mod traits;
pub mod types;

pub use error::{ConfigError, ExtractError};
pub use traits::{VisionProvider, VisionRequest, VisionResponse};
pub use types::{
    BatchResult, EncodedImage, ExtractionRecord, FieldList, ImageRef, DEFAULT_FIELDS,
    FILENAME_FIELD,
};
