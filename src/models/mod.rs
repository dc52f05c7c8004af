pub mod course;

pub use course::{Course, CourseForm, FormErrors, NewCourse};
