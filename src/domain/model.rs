use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the job postings CSV. Columns beyond these are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date_posted: Option<String>,
    // 幾乎全為空值，讀入但不參與分析
    #[serde(default, skip_serializing)]
    pub work_type: Option<String>,
    #[serde(default, skip_serializing)]
    pub employment_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleCategory {
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "Data Engineer")]
    DataEngineer,
    #[serde(rename = "Data Analyst")]
    DataAnalyst,
    #[serde(rename = "AI/ML Engineer")]
    AIMLEngineer,
    #[serde(rename = "Other")]
    Other,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 5] = [
        RoleCategory::DataScientist,
        RoleCategory::DataEngineer,
        RoleCategory::DataAnalyst,
        RoleCategory::AIMLEngineer,
        RoleCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoleCategory::DataScientist => "Data Scientist",
            RoleCategory::DataEngineer => "Data Engineer",
            RoleCategory::DataAnalyst => "Data Analyst",
            RoleCategory::AIMLEngineer => "AI/ML Engineer",
            RoleCategory::Other => "Other",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A posting after classification and location parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPosting {
    pub posting: JobPosting,
    pub role: RoleCategory,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCount {
    pub state: String,
    pub job_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCount {
    pub role: RoleCategory,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCount {
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCount {
    pub company: String,
    pub job_count: usize,
}

/// Presentation hints for a plotting front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x: String,
    pub y: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Choropleth,
    Pie,
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_postings: usize,
    pub state_counts: Vec<StateCount>,
    pub role_counts: Vec<RoleCount>,
    pub date_counts: Vec<DateCount>,
    pub top_companies: Vec<CompanyCount>,
    pub charts: Vec<ChartSpec>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub classified: Vec<ClassifiedPosting>,
    pub report: AnalysisReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_category_labels() {
        assert_eq!(RoleCategory::AIMLEngineer.to_string(), "AI/ML Engineer");
        assert_eq!(
            serde_json::to_string(&RoleCategory::DataScientist).unwrap(),
            "\"Data Scientist\""
        );
    }

    #[test]
    fn test_posting_deserializes_with_missing_columns() {
        let data = "id,title,company\n42,Data Analyst,\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let posting: JobPosting = rdr.deserialize().next().unwrap().unwrap();

        assert_eq!(posting.id, "42");
        assert_eq!(posting.title.as_deref(), Some("Data Analyst"));
        assert_eq!(posting.company, None);
        assert_eq!(posting.location, None);
    }
}
