pub mod datasets;
pub mod documentation;
pub mod home;
pub mod landing;
pub mod login;
pub mod prediction;
pub mod prediction_detail;
pub mod settings;
pub mod signup;
