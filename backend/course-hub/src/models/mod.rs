/// Data models for course-hub
///
/// This module defines structures for:
/// - User: registered accounts and the public `Owner` projection
/// - Post: short text posts with an optional image and a like counter
/// - Course: course listings with a once-per-learner rating
/// - Image: opaque uploaded blob attached to a post or course
pub mod course;
pub mod image;
pub mod post;
pub mod user;

pub use course::{normalize_url, Course, CourseChanges, CourseInput, CourseType, NewCourse};
pub use image::Image;
pub use post::{NewPost, Post, PostChanges, PostInput};
pub use user::{AuthRequest, Owner, User};
