// Assessment/quiz engine.
// grading is pure; engine owns the store workflows; handlers are the HTTP surface.

pub mod engine;
pub mod grading;
pub mod handlers;
pub mod question_bank;
