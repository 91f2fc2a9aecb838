//! Analysis module - typed fields returned by the extraction service
//!
//! Two variants exist, selected per run:
//! - `Simple`: tech tags, work setting, experience, seniority, free-text salary
//! - `Complex`: `Simple` plus domain knowledge and a structured `Salary`
//!
//! Deserialization is deliberately forgiving about *spelling* (enum casing,
//! numbers sent as strings) and strict about *shape*: a missing required field
//! or a wrong type is a validation failure the extractor retries.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Work arrangement of a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub enum WorkSetting {
    /// Fully remote
    Remote,
    /// Mix of remote and office days
    Hybrid,
    /// Office based
    #[serde(rename = "On-site")]
    OnSite,
    /// Not stated
    Unknown,
}

impl WorkSetting {
    /// Canonical label as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkSetting::Remote => "Remote",
            WorkSetting::Hybrid => "Hybrid",
            WorkSetting::OnSite => "On-site",
            WorkSetting::Unknown => "Unknown",
        }
    }

    /// Parse leniently; anything unrecognised is `Unknown`
    pub fn parse(s: &str) -> Self {
        match squash(s).as_str() {
            "remote" | "fullyremote" => WorkSetting::Remote,
            "hybrid" => WorkSetting::Hybrid,
            "onsite" | "inoffice" | "office" | "onpremise" => WorkSetting::OnSite,
            _ => WorkSetting::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for WorkSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or(WorkSetting::Unknown))
    }
}

/// Seniority of the advertised role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub enum SeniorityLevel {
    /// Entry level
    Junior,
    /// Intermediate
    Mid,
    /// Senior individual contributor
    Senior,
    /// Lead / principal
    Lead,
    /// Not stated
    Unknown,
}

impl SeniorityLevel {
    /// Canonical label as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityLevel::Junior => "Junior",
            SeniorityLevel::Mid => "Mid",
            SeniorityLevel::Senior => "Senior",
            SeniorityLevel::Lead => "Lead",
            SeniorityLevel::Unknown => "Unknown",
        }
    }

    /// Parse leniently; anything unrecognised is `Unknown`
    pub fn parse(s: &str) -> Self {
        match squash(s).as_str() {
            "junior" | "entry" | "entrylevel" | "graduate" => SeniorityLevel::Junior,
            "mid" | "midlevel" | "intermediate" => SeniorityLevel::Mid,
            "senior" => SeniorityLevel::Senior,
            "lead" | "principal" | "staff" => SeniorityLevel::Lead,
            _ => SeniorityLevel::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for SeniorityLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or(SeniorityLevel::Unknown))
    }
}

/// Pay period of a structured salary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, JsonSchema)]
pub enum SalaryInterval {
    /// Per hour
    #[serde(rename = "hourly")]
    Hourly,
    /// Per year
    #[serde(rename = "yearly")]
    Yearly,
    /// Per month
    #[serde(rename = "monthly")]
    Monthly,
    /// Not stated
    #[default]
    Unknown,
}

impl SalaryInterval {
    /// Canonical label as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryInterval::Hourly => "hourly",
            SalaryInterval::Yearly => "yearly",
            SalaryInterval::Monthly => "monthly",
            SalaryInterval::Unknown => "Unknown",
        }
    }

    /// Parse leniently; anything unrecognised is `Unknown`
    pub fn parse(s: &str) -> Self {
        match squash(s).as_str() {
            "hourly" | "hour" | "perhour" => SalaryInterval::Hourly,
            "yearly" | "year" | "annual" | "annually" | "peryear" => SalaryInterval::Yearly,
            "monthly" | "month" | "permonth" => SalaryInterval::Monthly,
            _ => SalaryInterval::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for SalaryInterval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// Structured compensation (Complex variant only)
///
/// A salary with no amounts is not a zero salary: it collapses to "absent"
/// during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Salary {
    /// Lower bound of the stated range
    #[serde(default, deserialize_with = "lenient_f64")]
    #[schemars(with = "Option<f64>")]
    pub min_amount: Option<f64>,

    /// Upper bound of the stated range
    #[serde(default, deserialize_with = "lenient_f64")]
    #[schemars(with = "Option<f64>")]
    pub max_amount: Option<f64>,

    /// ISO currency code
    #[serde(default = "default_currency")]
    pub currency: Option<String>,

    /// Pay period
    #[serde(default)]
    pub interval: SalaryInterval,
}

fn default_currency() -> Option<String> {
    Some("EUR".to_string())
}

impl Salary {
    /// Whether no amount was stated (absent or zero on both ends)
    pub fn is_empty(&self) -> bool {
        let stated = |amount: Option<f64>| amount.is_some_and(|a| a != 0.0 && a.is_finite());
        !stated(self.min_amount) && !stated(self.max_amount)
    }

    /// Collapse an amount-less salary to `None` and fill the currency default
    pub fn normalize(mut self) -> Option<Self> {
        if self.is_empty() {
            return None;
        }
        let currency = self
            .currency
            .take()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty());
        self.currency = currency.or_else(default_currency);
        Some(self)
    }

    fn to_value(&self) -> Value {
        json!({
            "min_amount": self.min_amount,
            "max_amount": self.max_amount,
            "currency": self.currency,
            "interval": self.interval.as_str(),
        })
    }
}

/// Fields extracted for the Simple variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SimpleAnalysis {
    /// Job title as understood by the model
    pub title: String,

    /// Hiring company as understood by the model
    pub company: String,

    /// Programming languages, lowercase
    pub languages: Vec<String>,

    /// Frameworks and libraries, lowercase
    pub frameworks: Vec<String>,

    /// Tooling, e.g. docker, kubernetes, git, jira
    pub tools: Vec<String>,

    /// Cloud providers, e.g. aws, azure, gcp
    pub cloud_platforms: Vec<String>,

    /// Remote / Hybrid / On-site
    pub work_setting: WorkSetting,

    /// Minimum years of experience; lower bound if a range was stated
    #[serde(default, deserialize_with = "lenient_u32")]
    #[schemars(with = "Option<u32>")]
    pub min_years_experience: Option<u32>,

    /// Seniority of the role
    pub seniority_level: SeniorityLevel,

    /// Free-text salary if mentioned
    #[serde(default)]
    pub salary_range: Option<String>,
}

impl SimpleAnalysis {
    /// Lowercase and trim tags, drop blanks and repeats, trim free text
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.company = self.company.trim().to_string();
        self.languages = normalize_tags(self.languages);
        self.frameworks = normalize_tags(self.frameworks);
        self.tools = normalize_tags(self.tools);
        self.cloud_platforms = normalize_tags(self.cloud_platforms);
        self.salary_range = self
            .salary_range
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    fn insert_fields(&self, map: &mut Map<String, Value>) {
        map.insert("title".into(), Value::String(self.title.clone()));
        map.insert("company".into(), Value::String(self.company.clone()));
        map.insert("languages".into(), json!(self.languages));
        map.insert("frameworks".into(), json!(self.frameworks));
        map.insert("tools".into(), json!(self.tools));
        map.insert("cloud_platforms".into(), json!(self.cloud_platforms));
        map.insert("work_setting".into(), json!(self.work_setting.as_str()));
        map.insert("min_years_experience".into(), json!(self.min_years_experience));
        map.insert("seniority_level".into(), json!(self.seniority_level.as_str()));
        map.insert("salary_range".into(), json!(self.salary_range));
    }
}

/// Fields extracted for the Complex variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplexAnalysis {
    /// Everything the Simple variant extracts
    #[serde(flatten)]
    pub base: SimpleAnalysis,

    /// Industry knowledge, e.g. "e-commerce", "hipaa compliance"
    #[serde(default)]
    pub domain_knowledge: Vec<String>,

    /// Structured salary; absent when no compensation is stated
    #[serde(default)]
    pub salary: Option<Salary>,
}

impl ComplexAnalysis {
    /// Normalize the base fields, domain tags and salary
    pub fn normalize(self) -> Self {
        Self {
            base: self.base.normalize(),
            domain_knowledge: normalize_tags(self.domain_knowledge),
            salary: self.salary.and_then(Salary::normalize),
        }
    }
}

/// Which extraction schema a run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisVariant {
    /// Tech tags, setting, experience, seniority, salary text
    Simple,
    /// Simple plus domain knowledge and structured salary
    #[default]
    Complex,
}

const SIMPLE_FIELDS: &[&str] = &[
    "title",
    "company",
    "languages",
    "frameworks",
    "tools",
    "cloud_platforms",
    "work_setting",
    "min_years_experience",
    "seniority_level",
    "salary_range",
];

const COMPLEX_FIELDS: &[&str] = &[
    "title",
    "company",
    "languages",
    "frameworks",
    "tools",
    "cloud_platforms",
    "work_setting",
    "min_years_experience",
    "seniority_level",
    "salary_range",
    "domain_knowledge",
    "salary",
];

impl AnalysisVariant {
    /// Declared field order of the extraction schema
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            AnalysisVariant::Simple => SIMPLE_FIELDS,
            AnalysisVariant::Complex => COMPLEX_FIELDS,
        }
    }

    /// Variant name as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisVariant::Simple => "simple",
            AnalysisVariant::Complex => "complex",
        }
    }
}

impl fmt::Display for AnalysisVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(AnalysisVariant::Simple),
            "complex" => Ok(AnalysisVariant::Complex),
            other => Err(format!("Invalid analysis variant: {}", other)),
        }
    }
}

/// Validated extraction result of either variant
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedFields {
    /// Simple variant result
    Simple(SimpleAnalysis),
    /// Complex variant result
    Complex(ComplexAnalysis),
}

impl ExtractedFields {
    /// Variant this result belongs to
    pub fn variant(&self) -> AnalysisVariant {
        match self {
            ExtractedFields::Simple(_) => AnalysisVariant::Simple,
            ExtractedFields::Complex(_) => AnalysisVariant::Complex,
        }
    }

    /// Fields shared by both variants
    pub fn base(&self) -> &SimpleAnalysis {
        match self {
            ExtractedFields::Simple(simple) => simple,
            ExtractedFields::Complex(complex) => &complex.base,
        }
    }

    /// Apply the variant's normalization rules
    pub fn normalize(self) -> Self {
        match self {
            ExtractedFields::Simple(simple) => ExtractedFields::Simple(simple.normalize()),
            ExtractedFields::Complex(complex) => ExtractedFields::Complex(complex.normalize()),
        }
    }

    /// Flatten into a field map keyed by the variant's field names
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        self.base().insert_fields(&mut map);
        if let ExtractedFields::Complex(complex) = self {
            map.insert("domain_knowledge".into(), json!(complex.domain_knowledge));
            map.insert(
                "salary".into(),
                complex.salary.as_ref().map(Salary::to_value).unwrap_or(Value::Null),
            );
        }
        map
    }
}

/// Lowercase, trim, drop blanks and keep first occurrence of each tag
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Lowercase and strip everything but alphanumerics, for lenient enum matching
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                Ok(u32::try_from(v).ok())
            } else if let Some(v) = n.as_f64() {
                Ok((v >= 0.0 && v.is_finite()).then(|| v.floor() as u32))
            } else {
                Ok(None)
            }
        }
        Some(Value::String(s)) => {
            let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                Ok(None)
            } else {
                digits.parse().map(Some).map_err(D::Error::custom)
            }
        }
        Some(other) => Err(D::Error::custom(format!("expected integer, got {}", other))),
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => {
            let cleaned: String = s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
            if cleaned.is_empty() {
                return Ok(None);
            }
            let (number, multiplier) = match cleaned.strip_suffix(['k', 'K']) {
                Some(stripped) => (stripped, 1000.0),
                None => (cleaned.as_str(), 1.0),
            };
            number
                .parse::<f64>()
                .map(|v| Some(v * multiplier))
                .map_err(D::Error::custom)
        }
        Some(other) => Err(D::Error::custom(format!("expected number, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_json() -> Value {
        json!({
            "title": " Senior Rust Engineer ",
            "company": "Acme",
            "languages": [" Rust", "PYTHON", "rust", ""],
            "frameworks": ["Axum"],
            "tools": ["Docker", " Git "],
            "cloud_platforms": ["AWS"],
            "work_setting": "remote",
            "min_years_experience": "3-5 years",
            "seniority_level": "SENIOR",
            "salary_range": "  "
        })
    }

    #[test]
    fn test_simple_normalization() {
        let parsed: SimpleAnalysis = serde_json::from_value(simple_json()).unwrap();
        let analysis = parsed.normalize();

        assert_eq!(analysis.title, "Senior Rust Engineer");
        assert_eq!(analysis.languages, vec!["rust", "python"]);
        assert_eq!(analysis.tools, vec!["docker", "git"]);
        assert_eq!(analysis.cloud_platforms, vec!["aws"]);
        assert_eq!(analysis.work_setting, WorkSetting::Remote);
        assert_eq!(analysis.min_years_experience, Some(3));
        assert_eq!(analysis.seniority_level, SeniorityLevel::Senior);
        assert_eq!(analysis.salary_range, None);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut value = simple_json();
        value.as_object_mut().unwrap().remove("languages");
        assert!(serde_json::from_value::<SimpleAnalysis>(value).is_err());
    }

    #[test]
    fn test_wrong_shape_fails() {
        let mut value = simple_json();
        value["tools"] = json!("docker");
        assert!(serde_json::from_value::<SimpleAnalysis>(value).is_err());
    }

    #[test]
    fn test_enum_parsing_is_lenient() {
        assert_eq!(WorkSetting::parse("On site"), WorkSetting::OnSite);
        assert_eq!(WorkSetting::parse("ON-SITE"), WorkSetting::OnSite);
        assert_eq!(WorkSetting::parse("flexible"), WorkSetting::Unknown);
        assert_eq!(SeniorityLevel::parse("Mid-Level"), SeniorityLevel::Mid);
        assert_eq!(SalaryInterval::parse("Annual"), SalaryInterval::Yearly);
        assert_eq!(SalaryInterval::parse(""), SalaryInterval::Unknown);
    }

    #[test]
    fn test_null_salary_amounts_collapse_to_absent() {
        let mut value = simple_json();
        value["domain_knowledge"] = json!(["FinTech"]);
        value["salary"] = json!({"min_amount": null, "max_amount": null, "interval": "yearly"});

        let complex: ComplexAnalysis = serde_json::from_value(value).unwrap();
        let complex = complex.normalize();

        assert_eq!(complex.salary, None);
        assert_eq!(complex.domain_knowledge, vec!["fintech"]);
    }

    #[test]
    fn test_zero_salary_amounts_collapse_to_absent() {
        let salary = Salary {
            min_amount: Some(0.0),
            max_amount: None,
            currency: None,
            interval: SalaryInterval::Unknown,
        };
        assert!(salary.normalize().is_none());
    }

    #[test]
    fn test_salary_keeps_stated_amounts() {
        let salary: Salary =
            serde_json::from_value(json!({"min_amount": "40k", "max_amount": 50000, "currency": null}))
                .unwrap();
        let salary = salary.normalize().unwrap();
        assert_eq!(salary.min_amount, Some(40_000.0));
        assert_eq!(salary.max_amount, Some(50_000.0));
        assert_eq!(salary.currency.as_deref(), Some("EUR"));
        assert_eq!(salary.interval, SalaryInterval::Unknown);
    }

    #[test]
    fn test_complex_defaults_when_optional_fields_missing() {
        let complex: ComplexAnalysis = serde_json::from_value(simple_json()).unwrap();
        assert!(complex.domain_knowledge.is_empty());
        assert!(complex.salary.is_none());
    }

    #[test]
    fn test_to_map_follows_field_names() {
        let simple: SimpleAnalysis = serde_json::from_value(simple_json()).unwrap();
        let fields = ExtractedFields::Simple(simple.clone()).normalize();
        let map = fields.to_map();
        for name in AnalysisVariant::Simple.field_names() {
            assert!(map.contains_key(*name), "missing {}", name);
        }
        assert_eq!(map.len(), AnalysisVariant::Simple.field_names().len());

        let complex = ExtractedFields::Complex(ComplexAnalysis {
            base: simple,
            domain_knowledge: vec![],
            salary: None,
        });
        let map = complex.to_map();
        assert_eq!(map.len(), AnalysisVariant::Complex.field_names().len());
        assert_eq!(map["salary"], Value::Null);
        assert_eq!(map["work_setting"], json!("Remote"));
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!("Simple".parse::<AnalysisVariant>(), Ok(AnalysisVariant::Simple));
        assert_eq!("complex".parse::<AnalysisVariant>(), Ok(AnalysisVariant::Complex));
        assert!("deep".parse::<AnalysisVariant>().is_err());
        assert_eq!(AnalysisVariant::default(), AnalysisVariant::Complex);
    }
}
