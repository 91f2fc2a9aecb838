//! Prompt construction for structured extraction

use jobsift_domain::{AnalysisVariant, RawRecord};

const EXTRACTION_INSTRUCTIONS: &str = "Extract tech details from this job post.";

const FIELD_GUIDANCE: &str = "\
Rules:
- Use lowercase for every entry in languages, frameworks, tools and cloud_platforms.
- List each technology once; do not invent technologies the post does not mention.
- work_setting is one of: Remote, Hybrid, On-site, Unknown.
- seniority_level is one of: Junior, Mid, Senior, Lead, Unknown.
- min_years_experience is the lower bound when a range is given; null when not stated.
- salary_range is the salary text as written in the post, or null.";

const COMPLEX_GUIDANCE: &str = "\
- domain_knowledge lists industry or business knowledge, e.g. \"e-commerce\", \"banking\", \"hipaa compliance\".
- salary is null when the post states no compensation. Never report 0 for an unstated amount.
- salary.interval is one of: hourly, yearly, monthly, Unknown. Currency defaults to EUR.";

/// Builds extraction prompts for one analysis variant
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    variant: AnalysisVariant,
    max_description_chars: usize,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(variant: AnalysisVariant, max_description_chars: usize) -> Self {
        Self {
            variant,
            max_description_chars,
        }
    }

    /// Build the complete extraction prompt for `record`
    pub fn build(&self, record: &RawRecord) -> String {
        let mut prompt = String::new();

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(FIELD_GUIDANCE);
        prompt.push('\n');
        if self.variant == AnalysisVariant::Complex {
            prompt.push_str(COMPLEX_GUIDANCE);
            prompt.push('\n');
        }
        prompt.push('\n');

        prompt.push_str("JOB TITLE: ");
        prompt.push_str(record.title.trim());
        prompt.push_str("\n\n");
        prompt.push_str(truncate_chars(record.description.trim(), self.max_description_chars));

        prompt
    }
}

/// Longest prefix of `text` with at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobsift_domain::RecordId;

    fn record(description: &str) -> RawRecord {
        RawRecord {
            id: RecordId::new("r1"),
            title: " Platform Engineer ".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_title_and_description() {
        let prompt = PromptBuilder::new(AnalysisVariant::Simple, 1000)
            .build(&record("Kubernetes and Terraform on AWS."));

        assert!(prompt.starts_with("Extract tech details from this job post."));
        assert!(prompt.ends_with("JOB TITLE: Platform Engineer\n\nKubernetes and Terraform on AWS."));
        assert!(!prompt.contains("domain_knowledge"));
    }

    #[test]
    fn test_complex_prompt_mentions_salary_rules() {
        let prompt = PromptBuilder::new(AnalysisVariant::Complex, 1000).build(&record("x"));
        assert!(prompt.contains("domain_knowledge"));
        assert!(prompt.contains("Never report 0"));
    }

    #[test]
    fn test_description_is_truncated() {
        let prompt = PromptBuilder::new(AnalysisVariant::Simple, 5).build(&record("abcdefghij"));
        assert!(prompt.ends_with("\n\nabcde"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("äöü", 10), "äöü");
        assert_eq!(truncate_chars("", 3), "");
    }
}
