//! Grouping and counting over classified postings.
//!
//! Every function here is pure; the pipeline feeds it the rows produced by
//! the classifier and serializes whatever comes back.

use crate::domain::classifier::classify_opt;
use crate::domain::model::{
    AnalysisReport, ChartKind, ChartSpec, ClassifiedPosting, CompanyCount, DateCount, JobPosting,
    RoleCategory, RoleCount, StateCount,
};
use chrono::NaiveDate;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

pub const DEFAULT_TOP_COMPANIES: usize = 20;

static STATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r", ([A-Z]{2})").unwrap());

/// Two-letter US state code from a location like "Austin, TX" or
/// "Austin, TX, United States". Case-sensitive; the first match wins.
pub fn extract_state(location: &str) -> Option<String> {
    STATE_RE
        .captures(location)
        .map(|caps| caps[1].to_string())
}

pub fn classify_postings(postings: Vec<JobPosting>) -> Vec<ClassifiedPosting> {
    postings
        .into_iter()
        .map(|posting| {
            let role = classify_opt(posting.title.as_deref());
            let state = posting.location.as_deref().and_then(extract_state);
            ClassifiedPosting {
                posting,
                role,
                state,
            }
        })
        .collect()
}

/// Counts values, most frequent first, ties broken by key ascending.
fn value_counts<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn count_states(rows: &[ClassifiedPosting]) -> Vec<StateCount> {
    value_counts(rows.iter().filter_map(|r| r.state.as_deref()))
        .into_iter()
        .map(|(state, job_count)| StateCount { state, job_count })
        .collect()
}

pub fn count_roles(rows: &[ClassifiedPosting]) -> Vec<RoleCount> {
    let mut counts: HashMap<RoleCategory, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.role).or_insert(0) += 1;
    }

    let mut counts: Vec<RoleCount> = counts
        .into_iter()
        .map(|(role, count)| RoleCount { role, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.role.cmp(&b.role)));
    counts
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Postings per day, in chronological order.
pub fn count_dates(rows: &[ClassifiedPosting]) -> Vec<DateCount> {
    let mut counts: Vec<DateCount> =
        value_counts(rows.iter().filter_map(|r| non_blank(&r.posting.date_posted)))
            .into_iter()
            .map(|(date, count)| DateCount { date, count })
            .collect();
    counts.sort_by(|a, b| compare_dates(&a.date, &b.date));
    counts
}

pub fn top_companies(rows: &[ClassifiedPosting], n: usize) -> Vec<CompanyCount> {
    value_counts(rows.iter().filter_map(|r| non_blank(&r.posting.company)))
        .into_iter()
        .take(n)
        .map(|(company, job_count)| CompanyCount { company, job_count })
        .collect()
}

/// Number of distinct posting ids.
pub fn total_postings(rows: &[ClassifiedPosting]) -> usize {
    rows.iter()
        .map(|r| r.posting.id.trim())
        .filter(|id| !id.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

pub fn chart_specs(total: usize, top_n: usize) -> Vec<ChartSpec> {
    vec![
        ChartSpec {
            kind: ChartKind::Choropleth,
            title: "Job Listings by U.S. State".to_string(),
            x: "state".to_string(),
            y: "job_count".to_string(),
            labels: Vec::new(),
            annotation: Some(format!("Number of Data/AI jobs in the USA:{}", total)),
        },
        ChartSpec {
            kind: ChartKind::Pie,
            title: "Distribution of Data Roles".to_string(),
            x: "role".to_string(),
            y: "count".to_string(),
            labels: Vec::new(),
            annotation: None,
        },
        ChartSpec {
            kind: ChartKind::Line,
            title: "Number of Posts Over Time".to_string(),
            x: "date".to_string(),
            y: "count".to_string(),
            labels: Vec::new(),
            annotation: None,
        },
        ChartSpec {
            kind: ChartKind::Bar,
            title: format!("Top {} Companies Hiring Data/AI Roles", top_n),
            x: "company".to_string(),
            y: "job_count".to_string(),
            labels: vec![
                ("job_count".to_string(), "Number of Jobs".to_string()),
                ("company".to_string(), "Company".to_string()),
            ],
            annotation: None,
        },
    ]
}

pub fn analyze(rows: &[ClassifiedPosting], top_n: usize) -> AnalysisReport {
    let total = total_postings(rows);
    AnalysisReport {
        total_postings: total,
        state_counts: count_states(rows),
        role_counts: count_roles(rows),
        date_counts: count_dates(rows),
        top_companies: top_companies(rows, top_n),
        charts: chart_specs(total, top_n),
    }
}
