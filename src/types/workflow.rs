//! Payload types of the YouTube workflows, as the dashboard consumes them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A YouTube niche with trend metrics and plotting coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeNiche {
    /// The search query that identified this niche
    pub query: String,
    /// Sum of views across trending videos in this niche
    pub view_sum: u64,
    /// Relative search volume score
    pub rsv: f64,
    /// Rank by view count (lower is better)
    pub view_rank: u32,
    /// Rank by search volume (lower is better)
    pub rsv_rank: u32,
    /// Combined score (higher is better)
    pub score: f64,
    pub x: f64,
    pub y: f64,
    /// Cluster identifier
    pub niche: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicheScoutResult {
    pub run_date: String,
    pub trending_niches: Vec<YouTubeNiche>,
    /// Highest-scoring niches, best first
    pub top_niches: Vec<YouTubeNiche>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeVideo {
    pub video_id: String,
    pub title: String,
    pub channel_id: String,
    pub channel_name: String,
    pub view_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    pub published_at: String,
    /// ISO 8601 duration, e.g. `PT15M30S`
    pub duration: String,
    pub tags: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeChannel {
    pub channel_id: String,
    pub channel_name: String,
    pub subscribers: u64,
    pub total_views: u64,
    pub video_count: u32,
    pub recent_upload_count: u32,
    /// Growth over the last 30 days
    pub thirty_day_delta: f64,
    pub primary_topics: Vec<String>,
}

/// A content gap: a keyword and how well each side covers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeGap {
    pub keyword: String,
    pub seed_coverage: f64,
    /// Competitor channel name -> coverage
    pub competitor_coverage: BTreeMap<String, f64>,
    pub opportunity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoppaItem {
    pub item: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeBlueprint {
    pub positioning: String,
    pub content_pillars: Vec<String>,
    /// Format -> share of output
    pub format_mix: BTreeMap<String, f64>,
    /// Week label -> content ideas
    pub roadmap: BTreeMap<String, Vec<String>>,
    pub ai_production_tips: Vec<String>,
    pub coppa_checklist: Vec<CoppaItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintResult {
    pub run_date: String,
    pub seed_url: String,
    pub seed_data: YouTubeVideo,
    pub top_channels: Vec<YouTubeChannel>,
    pub gap_analysis: Vec<YouTubeGap>,
    pub blueprint: YouTubeBlueprint,
    pub blueprint_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Once,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            "monthly" => Some(Frequency::Monthly),
            "once" => Some(Frequency::Once),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Scheduled,
    Running,
    Completed,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSchedule {
    pub id: String,
    pub workflow_type: super::WorkflowKind,
    pub parameters: serde_json::Map<String, serde_json::Value>,
    pub frequency: Frequency,
    pub next_run: String,
    pub status: ScheduleStatus,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: String,
}

/// Historical record of a workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowHistoryEntry {
    pub id: String,
    pub workflow_type: super::WorkflowKind,
    pub parameters: serde_json::Map<String, serde_json::Value>,
    pub status: RunStatus,
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    pub user_id: String,
}
