//! Parse LLM output into validated extraction fields

use crate::error::ExtractorError;
use jobsift_domain::{AnalysisVariant, ComplexAnalysis, ExtractedFields, SimpleAnalysis};
use serde_json::Value;

/// Parse and validate an LLM response for `variant`
///
/// The result is normalized: tags lowercased and deduplicated, free text
/// trimmed, an amount-less salary collapsed to absent.
pub fn parse_response(
    response: &str,
    variant: AnalysisVariant,
) -> Result<ExtractedFields, ExtractorError> {
    let json_str = extract_json(response)?;

    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    if !value.is_object() {
        return Err(ExtractorError::Validation(
            "Expected a JSON object".to_string(),
        ));
    }

    let fields = match variant {
        AnalysisVariant::Simple => serde_json::from_value::<SimpleAnalysis>(value)
            .map(ExtractedFields::Simple),
        AnalysisVariant::Complex => serde_json::from_value::<ComplexAnalysis>(value)
            .map(ExtractedFields::Complex),
    }
    .map_err(|e| ExtractorError::Validation(e.to_string()))?;

    Ok(fields.normalize())
}

/// Extract the JSON document from a response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(ExtractorError::InvalidFormat("Empty response".to_string()));
    }

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the info string ("json") on the opening fence line
        let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
        let body = body.trim_end();
        let body = body.strip_suffix("```").unwrap_or(body).trim();
        if body.is_empty() {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }
        return Ok(body);
    }

    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    // Prose around the object
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&trimmed[start..=end]),
        _ => Err(ExtractorError::InvalidFormat(
            "No JSON object in response".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobsift_domain::{SeniorityLevel, WorkSetting};

    const SIMPLE: &str = r#"{
        "title": "Data Engineer",
        "company": "Acme",
        "languages": ["Python", "SQL", "python"],
        "frameworks": ["Spark"],
        "tools": ["Airflow"],
        "cloud_platforms": ["GCP"],
        "work_setting": "on site",
        "min_years_experience": 3,
        "seniority_level": "Mid",
        "salary_range": null
    }"#;

    #[test]
    fn test_parse_simple() {
        let fields = parse_response(SIMPLE, AnalysisVariant::Simple).unwrap();
        let base = fields.base();
        assert_eq!(base.languages, vec!["python", "sql"]);
        assert_eq!(base.work_setting, WorkSetting::OnSite);
        assert_eq!(base.seniority_level, SeniorityLevel::Mid);
        assert_eq!(fields.variant(), AnalysisVariant::Simple);
    }

    #[test]
    fn test_parse_code_block() {
        let response = format!("```json\n{}\n```", SIMPLE);
        assert!(parse_response(&response, AnalysisVariant::Simple).is_ok());

        let response = format!("```\n{}\n```\n", SIMPLE);
        assert!(parse_response(&response, AnalysisVariant::Simple).is_ok());
    }

    #[test]
    fn test_parse_with_surrounding_prose() {
        let response = format!("Here is the result:\n{}\nHope this helps.", SIMPLE);
        assert!(parse_response(&response, AnalysisVariant::Simple).is_ok());
    }

    #[test]
    fn test_parse_complex_salary_collapse() {
        let response = SIMPLE.replacen(
            "\"title\"",
            "\"domain_knowledge\": [\"Logistics\"], \"salary\": {\"min_amount\": null, \"max_amount\": null, \"currency\": \"EUR\", \"interval\": \"Unknown\"}, \"title\"",
            1,
        );
        match parse_response(&response, AnalysisVariant::Complex).unwrap() {
            ExtractedFields::Complex(complex) => {
                assert_eq!(complex.salary, None);
                assert_eq!(complex.domain_knowledge, vec!["logistics"]);
            }
            other => panic!("Expected complex fields, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json() {
        let result = parse_response("This is not JSON", AnalysisVariant::Simple);
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_code_block() {
        let result = parse_response("```json\n```", AnalysisVariant::Simple);
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_array_is_validation_error() {
        let result = parse_response("[1, 2]", AnalysisVariant::Simple);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_field_is_validation_error() {
        let result = parse_response(r#"{"title": "x"}"#, AnalysisVariant::Simple);
        assert!(matches!(result, Err(ExtractorError::Validation(_))));
    }
}
