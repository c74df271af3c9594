//! Result contracts of the AI analysis service
//!
//! Every field defaults when absent so a partial answer still renders.

use serde::{Deserialize, Serialize};

/// Request body of every analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub owner: String,
    pub repo: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueClassification {
    pub classification: String,
    pub priority: String,
    pub suggested_labels: Vec<String>,
    pub reasoning: String,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassifiedIssue {
    pub issue_number: u64,
    pub issue_title: String,
    pub analysis: IssueClassification,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssigneeCandidate {
    pub developer_name: String,
    pub score: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssigneeRecommendation {
    pub issue_number: u64,
    pub issue_title: String,
    pub recommended_assignees: Vec<AssigneeCandidate>,
}

/// `analyze-issues`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueAnalysisResponse {
    pub repo: String,
    pub issues_analyzed: u64,
    pub classifications: Vec<ClassifiedIssue>,
    pub assignee_recommendations: Vec<AssigneeRecommendation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PrIntelligence {
    pub summary: String,
    pub risk_level: String,
    pub review_checklist: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzedPr {
    pub pr_number: u64,
    pub pr_title: String,
    pub analysis: PrIntelligence,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewerCandidate {
    pub developer_name: String,
    pub confidence_score: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewerRecommendation {
    pub pr_number: u64,
    pub pr_title: String,
    pub suggested_reviewers: Vec<ReviewerCandidate>,
}

/// `analyze-prs`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PrAnalysisResponse {
    pub repo: String,
    pub prs_analyzed: u64,
    pub pr_intelligence: Vec<AnalyzedPr>,
    pub reviewer_recommendations: Vec<ReviewerRecommendation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeveloperWorkload {
    pub developer_name: String,
    pub open_issues: u64,
    pub pending_reviews: u64,
    pub load_score: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkloadAnalysis {
    pub developer_workload: Vec<DeveloperWorkload>,
    pub ai_recommendation: String,
}

/// `analyze-workload`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkloadResponse {
    pub repo: String,
    pub analysis: WorkloadAnalysis,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryInfo {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    pub language: Option<String>,
    pub license: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CodeQualityIndicators {
    pub repository_size: String,
    pub community_engagement: String,
    pub maintenance_status: String,
    pub documentation: String,
    pub license: String,
    pub contributors: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryAnalysis {
    pub overview: String,
    pub key_features: Vec<String>,
    pub technology_stack: Vec<String>,
    pub architecture_insights: String,
    pub code_quality_indicators: CodeQualityIndicators,
    pub recommendations: Vec<String>,
}

/// `analyze-repository`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryAnalysisResponse {
    pub repository_info: RepositoryInfo,
    pub analysis: RepositoryAnalysis,
}
