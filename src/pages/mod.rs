pub mod auth;
pub mod history;
pub mod landing;
pub mod upload;
