//! Rule-based job title classifier.
//!
//! A title is lowercased and trimmed, then checked against an ordered rule
//! list. The first rule that matches decides the category; titles that match
//! nothing fall through to [`RoleCategory::Other`].

use crate::domain::model::RoleCategory;
use regex::Regex;
use std::sync::LazyLock;

/// AI/ML keywords are matched as whole tokens so that e.g. "maintain" or
/// "html" do not count as "ai" / "ml". "machine learning" may be hyphenated.
static AI_ML_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(machine[\s-]+learning|ai/ml|ai|ml)\b").unwrap());

/// One classification rule: every keyword must be contained in the title.
struct Rule {
    category: RoleCategory,
    all_of: &'static [&'static str],
}

const DATA_RULES: [Rule; 3] = [
    Rule {
        category: RoleCategory::DataScientist,
        all_of: &["data", "scientist"],
    },
    Rule {
        category: RoleCategory::DataEngineer,
        all_of: &["data", "engineer"],
    },
    Rule {
        category: RoleCategory::DataAnalyst,
        all_of: &["data", "analyst"],
    },
];

fn normalized(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Maps a free-text job title to exactly one [`RoleCategory`].
///
/// Never fails: empty or whitespace-only titles are [`RoleCategory::Other`].
pub fn classify(title: &str) -> RoleCategory {
    let norm = normalized(title);
    if norm.is_empty() {
        return RoleCategory::Other;
    }

    for rule in &DATA_RULES {
        if rule.all_of.iter().all(|kw| norm.contains(kw)) {
            return rule.category;
        }
    }

    if AI_ML_RE.is_match(&norm) {
        return RoleCategory::AIMLEngineer;
    }

    RoleCategory::Other
}

/// Same as [`classify`], with a missing title treated as empty.
pub fn classify_opt(title: Option<&str>) -> RoleCategory {
    classify(title.unwrap_or_default())
}
