pub mod analysis;
pub mod annual;
pub mod landing;
