//! HTTP client for the AI Learn backend.
//!
//! [`ApiClient::request`] is the single low-level entry point; every domain
//! method is a thin specialization of it. There are no retries, timeouts or
//! cancellation: a failure is logged and handed back to the caller.
//!
//! # Example
//!
//! ```no_run
//! use ailearn_api::{ApiClient, LessonApi};
//!
//! # async fn example() -> ailearn_api::Result<()> {
//! let client = ApiClient::new("http://localhost:8000");
//! for course in client.courses().await? {
//!     println!("{} ({} modules)", course.name, course.module_count);
//! }
//! # Ok(())
//! # }
//! ```

#![allow(async_fn_in_trait)]

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::endpoints;
use crate::error::{ApiError, Result};
use crate::models::{
    Course, CourseDetail, ExecutionRequest, ExecutionResult, GameResponse, Health, Lesson,
    QuizResponse,
};

/// Number of quiz questions requested when the caller has no preference.
pub const DEFAULT_QUIZ_QUESTIONS: u32 = 5;

// ============================================================================
// LessonApi
// ============================================================================

/// Backend capabilities consumed by the application controller.
///
/// [`ApiClient`] is the HTTP implementation; tests substitute in-memory ones.
pub trait LessonApi {
    /// Lists all courses.
    async fn courses(&self) -> Result<Vec<Course>>;

    /// Fetches the module and lesson tree of a course.
    async fn course_modules(&self, course_id: &str) -> Result<CourseDetail>;

    /// Fetches a lesson, asking the backend to regenerate its AI content when
    /// `regenerate` is set.
    async fn lesson(&self, lesson_id: &str, regenerate: bool) -> Result<Lesson>;

    /// Fetches a quiz of `num_questions` questions for a lesson.
    async fn quiz(&self, lesson_id: &str, num_questions: u32) -> Result<QuizResponse>;

    /// Fetches the mini-game for a lesson.
    async fn game(&self, lesson_id: &str) -> Result<GameResponse>;

    /// Submits code for execution on the backend.
    async fn execute_code(&self, code: &str, language: &str) -> Result<ExecutionResult>;

    /// Fetches the user's progress.
    async fn user_progress(&self) -> Result<serde_json::Value>;
}

// ============================================================================
// RequestOptions
// ============================================================================

/// Per-request options merged into the defaults by [`ApiClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// Extra headers; these override the defaults.
    pub headers: HeaderMap,
    /// Raw request body.
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    /// Options for a plain `GET`.
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    /// Options for a `POST` carrying `body` serialized as JSON.
    pub fn post_json(body: &impl Serialize) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            body: Some(serde_json::to_string(body)?),
            ..Self::default()
        })
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn with_header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

// ============================================================================
// ApiClient
// ============================================================================

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    ///
    /// An empty base URL keeps endpoint paths relative (same origin).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, reqwest::Client::new())
    }

    /// Creates a client that sends through an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL prefix.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for an endpoint.
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Sends a request and decodes the JSON response.
    ///
    /// `Content-Type: application/json` is always sent unless `options`
    /// overrides it. Non-success statuses become [`ApiError::Status`]; bodies
    /// that are not valid JSON for `T` become [`ApiError::Decode`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!(method = %options.method, url = %url, "Sending API request");

        let result = self.send(&url, options).await;
        if let Err(ref e) = result {
            error!(url = %url, error = %e, "API request failed");
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, url: &str, options: RequestOptions) -> Result<T> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(options.headers);

        let mut builder = self.http.request(options.method, url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::decode(url, e.to_string()))
    }

    /// Checks whether the backend is up.
    pub async fn health(&self) -> Result<Health> {
        self.request(endpoints::HEALTH, RequestOptions::get()).await
    }
}

impl LessonApi for ApiClient {
    async fn courses(&self) -> Result<Vec<Course>> {
        self.request(endpoints::COURSES, RequestOptions::get()).await
    }

    async fn course_modules(&self, course_id: &str) -> Result<CourseDetail> {
        self.request(&endpoints::course_modules(course_id), RequestOptions::get())
            .await
    }

    async fn lesson(&self, lesson_id: &str, regenerate: bool) -> Result<Lesson> {
        let params = if regenerate { "?regenerate=true" } else { "" };
        let endpoint = format!("{}{params}", endpoints::lesson(lesson_id));
        self.request(&endpoint, RequestOptions::get()).await
    }

    async fn quiz(&self, lesson_id: &str, num_questions: u32) -> Result<QuizResponse> {
        let endpoint = format!(
            "{}?num_questions={num_questions}",
            endpoints::quiz(lesson_id)
        );
        self.request(&endpoint, RequestOptions::get()).await
    }

    async fn game(&self, lesson_id: &str) -> Result<GameResponse> {
        self.request(&endpoints::game(lesson_id), RequestOptions::get())
            .await
    }

    async fn execute_code(&self, code: &str, language: &str) -> Result<ExecutionResult> {
        let body = ExecutionRequest {
            code: code.to_string(),
            language: language.to_string(),
            stdin: None,
        };
        self.request(endpoints::EXECUTE_CODE, RequestOptions::post_json(&body)?)
            .await
    }

    async fn user_progress(&self) -> Result<serde_json::Value> {
        self.request(endpoints::USER_PROGRESS, RequestOptions::get())
            .await
    }
}
