mod images;

pub use images::ImageDirectory;
