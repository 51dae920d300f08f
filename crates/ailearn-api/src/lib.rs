//! AI Learn API Client
//!
//! Typed access to the platform's lesson, quiz, mini-game and code-execution
//! endpoints.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;

pub use client::{ApiClient, LessonApi, RequestOptions, DEFAULT_QUIZ_QUESTIONS};
pub use error::{ApiError, Result};
pub use models::{
    Course, CourseDetail, ExecutionRequest, ExecutionResult, Game, GameResponse, Health, Lesson,
    LessonBody, LessonInfo, LessonSummary, Module, PracticeChallenge, Question, Quiz,
    QuizResponse,
};
