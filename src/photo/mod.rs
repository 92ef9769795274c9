pub mod catalog;
pub mod gender;
pub mod generator;
pub mod selector;

pub use catalog::{AgeBucket, Ethnicity, Gender, PersonProfile, PhotoCatalog, PhotoError};
pub use gender::{infer_gender, known_gender};
pub use generator::{GeneratedPhoto, PhotoGenerator};
pub use selector::{select_photo, PhotoSelector};
