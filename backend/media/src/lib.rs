pub mod image;

pub use crate::image::{encode_image, sniff_mime_type};
