use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::extraction::pipeline::ExtractedRecord;

/// Placeholder for a metadata field missing from the source document.
pub const NOT_AVAILABLE: &str = "N/A";

const COMPANY_KEY: &str = "com.linkedin.voyager.deco.jobs.web.shared.WebCompactJobPostingCompany";
const WORKPLACE_TYPE_KEY: &str = "urn:li:fs_workplaceType:2";
const OFFSITE_APPLY_KEY: &str = "com.linkedin.voyager.jobs.OffsiteApply";
const ONSITE_APPLY_KEY: &str = "com.linkedin.voyager.jobs.ComplexOnsiteApply";

/// One search result from the job source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// e.g. `urn:li:fsd_jobPosting:3812345678`. Missing reads as empty, which has no id.
    #[serde(default)]
    pub entity_urn: String,
    /// Epoch milliseconds, as a number or numeric string. Anything else reads as `None`.
    #[serde(default, deserialize_with = "lenient_epoch_millis")]
    pub listed_at: Option<i64>,
}

impl SearchHit {
    /// The posting id: the last `:`-separated segment of the URN.
    pub fn job_id(&self) -> Option<&str> {
        self.entity_urn
            .rsplit(':')
            .next()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Parameters for a single source query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub keywords: String,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    50
}

/// Posting metadata derived from a source detail document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostingMetadata {
    pub title: String,
    pub company: String,
    pub company_url: String,
    pub location: String,
    pub workplace_type: String,
    pub listed_at: Option<i64>,
    pub description: String,
    pub apply_url: String,
}

impl PostingMetadata {
    pub fn from_details(details: &Value) -> Self {
        let company = details
            .get("companyDetails")
            .and_then(|v| v.get(COMPANY_KEY))
            .and_then(|v| v.get("companyResolutionResult"));

        Self {
            title: str_or_na(details.get("title")),
            company: str_or_na(company.and_then(|c| c.get("name"))),
            company_url: str_or_na(company.and_then(|c| c.get("url"))),
            location: str_or_na(details.get("formattedLocation")),
            workplace_type: str_or_na(
                details
                    .get("workplaceTypesResolutionResults")
                    .and_then(|v| v.get(WORKPLACE_TYPE_KEY))
                    .and_then(|v| v.get("localizedName")),
            ),
            listed_at: details.get("listedAt").and_then(epoch_millis),
            description: details
                .get("description")
                .and_then(|v| v.get("text"))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            apply_url: apply_url(details),
        }
    }
}

/// Offsite apply wins when present and non-empty; otherwise the onsite variant.
fn apply_url(details: &Value) -> String {
    let methods = details.get("applyMethod");
    let offsite = methods
        .and_then(|m| m.get(OFFSITE_APPLY_KEY))
        .filter(|v| !is_empty_value(v));
    let method = offsite.or_else(|| methods.and_then(|m| m.get(ONSITE_APPLY_KEY)));
    str_or_na(method.and_then(|m| m.get("companyApplyUrl")))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn str_or_na(value: Option<&Value>) -> String {
    value
        .and_then(|v| v.as_str())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn epoch_millis(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn lenient_epoch_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(epoch_millis))
}

/// Renders epoch milliseconds as `YYYY-MM-DD HH:MM` (UTC); "N/A" when absent.
pub fn format_listed_time(listed_at: Option<i64>) -> String {
    listed_at
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// The flat record returned to callers, cached, and exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    #[serde(rename = "Listed Date")]
    pub listed_date: String,
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Workplace Type")]
    pub workplace_type: String,
    #[serde(rename = "Skills")]
    pub skills: Vec<String>,
    #[serde(rename = "Experience Level")]
    pub experience_level: String,
    #[serde(rename = "Salary")]
    pub salary: String,
    #[serde(rename = "Apply URL")]
    pub apply_url: String,
}

impl JobResult {
    pub fn assemble(metadata: PostingMetadata, record: ExtractedRecord) -> Self {
        Self {
            listed_date: format_listed_time(metadata.listed_at),
            job_title: metadata.title,
            company: metadata.company,
            location: metadata.location,
            workplace_type: metadata.workplace_type,
            skills: record.skills.into_iter().collect(),
            experience_level: record.experience_level,
            salary: record.salary,
            apply_url: metadata.apply_url,
        }
    }
}
