use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub title: String,
    pub overview: String,
    pub difficulty_level: DifficultyLevel,
    pub requirements: Requirements,
    pub deliverables: Deliverables,
    pub evaluation_criteria: EvaluationCriteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stretch_goals: Option<Vec<StretchGoal>>,
    pub submission_instructions: SubmissionInstructions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_artifacts: Option<SampleArtifacts>,
    pub technical_context: TechnicalContext,
}

/// Unlike the extractor's seniority, unknown labels are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Junior,
    Mid,
    Senior,
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DifficultyLevel::Junior => "junior",
            DifficultyLevel::Mid => "mid",
            DifficultyLevel::Senior => "senior",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    pub functional: Vec<String>,
    pub non_functional: Vec<String>,
    pub technical_stack: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverables {
    pub repository_format: String,
    pub readme_requirements: Vec<String>,
    pub code_structure: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<String>>,
}

/// One rubric line. `weight` is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub weight: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationCriteria {
    pub correctness: Criterion,
    pub code_quality: Criterion,
    pub testing: Criterion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Criterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Criterion>,
}

impl EvaluationCriteria {
    fn named(&self) -> Vec<(&'static str, &Criterion)> {
        let mut criteria = vec![
            ("correctness", &self.correctness),
            ("code_quality", &self.code_quality),
            ("testing", &self.testing),
        ];
        if let Some(c) = &self.architecture {
            criteria.push(("architecture", c));
        }
        if let Some(c) = &self.documentation {
            criteria.push(("documentation", c));
        }
        criteria
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StretchGoal {
    pub title: String,
    pub description: String,
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionInstructions {
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleArtifacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_samples: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalContext {
    pub extracted_tools: Vec<String>,
    pub frameworks: Vec<String>,
    pub responsibilities: Vec<String>,
}

impl Challenge {
    /// Checks the constraints serde cannot express. Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }
        if self.overview.trim().is_empty() {
            return Err("overview is empty".to_string());
        }
        if !self
            .requirements
            .functional
            .iter()
            .any(|r| !r.trim().is_empty())
        {
            return Err("no functional requirements".to_string());
        }
        for (name, criterion) in self.evaluation_criteria.named() {
            if !(0.0..=100.0).contains(&criterion.weight) {
                return Err(format!(
                    "{name} weight {} is outside 0..=100",
                    criterion.weight
                ));
            }
        }
        Ok(())
    }
}
