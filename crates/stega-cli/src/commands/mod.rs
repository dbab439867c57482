pub mod hide;
pub mod quality;
pub mod unveil;
