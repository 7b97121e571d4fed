pub mod image;
pub mod text;

pub use image::Image;
pub use text::Text;
