use serde::{Deserialize, Serialize};

/// A job posting as returned by the jobs endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub city: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub experience_required: String,
    pub education_required: String,
    pub description: String,
    pub requirements: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Job {
    /// Salary band for display, e.g. "8000-15000"
    pub fn salary_range(&self) -> String {
        format!("{}-{}", self.salary_min, self.salary_max)
    }
}

/// Filter and pagination parameters for the job listing endpoint.
/// `None` fields are omitted from the query string.
#[derive(Debug, Clone, Serialize)]
pub struct JobQuery {
    pub skip: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Default for JobQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 10,
            keyword: None,
            city: None,
            salary_min: None,
            salary_max: None,
            experience: None,
            education: None,
            category: None,
        }
    }
}
