mod decode;
mod engine;

pub use decode::decode_image;
pub use engine::TesseractEngine;
