pub mod image;
pub mod media;
pub mod music;
