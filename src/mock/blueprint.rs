//! Seed-to-blueprint mock: seed video, competitors, gap table and strategy.

use super::{capitalize, MockContext, MockSeed, DAY_MS};
use crate::types::{
    BlueprintResult, CoppaItem, YouTubeBlueprint, YouTubeChannel, YouTubeGap, YouTubeVideo,
};
use std::collections::BTreeMap;

pub const CHANNEL_COUNT: usize = 10;
pub const GAP_COUNT: usize = 15;

const NICHES: [&str; 10] = [
    "mobile gaming",
    "coding tutorials",
    "fitness",
    "cooking",
    "travel",
    "guitar",
    "home automation",
    "gardening",
    "digital art",
    "language learning",
];

const OFF_NICHE: u32 = 0;
const OFF_CHANNEL_ID: u32 = 100;
const OFF_VIEWS: u32 = 200;
const OFF_LIKES: u32 = 300;
const OFF_COMMENTS: u32 = 400;
const OFF_PUBLISHED: u32 = 500;
const OFF_MINUTES: u32 = 600;
const OFF_SECONDS: u32 = 700;
const OFF_RUN_DATE: u32 = 800;
const OFF_TOP_CHANNEL_ID: u32 = 800;
const OFF_SUBSCRIBERS: u32 = 900;
const OFF_TOTAL_VIEWS: u32 = 1000;
const OFF_VIDEO_COUNT: u32 = 1100;
const OFF_RECENT_UPLOADS: u32 = 1200;
const OFF_DELTA: u32 = 1300;
const OFF_SEED_COVERAGE: u32 = 1400;
const OFF_COMPETITOR_A: u32 = 1500;
const OFF_COMPETITOR_B: u32 = 1600;
const OFF_COMPETITOR_C: u32 = 1700;
const OFF_OPPORTUNITY: u32 = 1800;

const AI_PRODUCTION_TIPS: [&str; 5] = [
    "Use Whisper API for automatic transcription and subtitles",
    "Stable Diffusion for thumbnail concepts (then refine manually)",
    "Bannerbear API for production-ready thumbnails with templates",
    "GPT-4 for script outlines, focusing on hook, value delivery, CTA",
    "Voice consistency checker to maintain brand tone and style",
];

const COPPA_CHECKLIST: [(&str, &str); 5] = [
    ("Content appropriate for all ages", "Required"),
    ("No collection of personal information from children", "Required"),
    ("Comments disabled if targeting children under 13", "Required"),
    ("Correct audience setting in YouTube Studio", "Required"),
    ("No call to actions that lead to external websites", "Recommended"),
];

/// Caller inputs that shape an otherwise synthetic blueprint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlueprintHints {
    pub niche: Option<String>,
    pub seed_url: Option<String>,
}

pub fn blueprint_result(seed: &MockSeed, hints: &BlueprintHints) -> BlueprintResult {
    let mut ctx = seed.context();
    build(&mut ctx, seed, hints)
}

/// `v=` parameter of a YouTube watch URL.
fn video_id_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == "v")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

fn build(ctx: &mut MockContext, seed: &MockSeed, hints: &BlueprintHints) -> BlueprintResult {
    // drawn unconditionally so the offsets stay aligned with or without hints
    let picked = NICHES[ctx.pick(OFF_NICHE, NICHES.len())];
    let niche = hints
        .niche
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(picked)
        .to_string();
    let brand = capitalize(&niche);

    let video_id = hints
        .seed_url
        .as_deref()
        .and_then(video_id_from_url)
        .unwrap_or_else(|| format!("v{}", ctx.tag_hex(8)));
    let seed_url = hints
        .seed_url
        .clone()
        .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={video_id}"));

    let seed_data = YouTubeVideo {
        video_id,
        title: format!("Top {niche} Tips for 2025"),
        channel_id: format!("channel{}", ctx.int(OFF_CHANNEL_ID, 1000, 0)),
        channel_name: format!("{brand} Pro"),
        view_count: ctx.int(OFF_VIEWS, 2_000_000, 500_000),
        like_count: Some(ctx.int(OFF_LIKES, 100_000, 10_000)),
        comment_count: Some(ctx.int(OFF_COMMENTS, 10_000, 1_000)),
        published_at: ctx.before_anchor(OFF_PUBLISHED, 30.0 * DAY_MS),
        duration: format!(
            "PT{}M{}S",
            ctx.int(OFF_MINUTES, 20, 5),
            ctx.int(OFF_SECONDS, 60, 0)
        ),
        tags: vec![
            niche.clone(),
            format!("{niche} tips"),
            format!("{niche} tutorials"),
            format!("2025 {niche}"),
        ],
        description: format!(
            "The best {niche} tips for 2025, including new recommendations and performance tips."
        ),
    };

    let top_channels: Vec<YouTubeChannel> = (0..CHANNEL_COUNT as u32)
        .map(|i| YouTubeChannel {
            channel_id: format!("channel{}", ctx.int(i + OFF_TOP_CHANNEL_ID, 1000, 0)),
            channel_name: format!("{brand}{}", 60 - i * 5),
            subscribers: ctx.int(i + OFF_SUBSCRIBERS, 5_000_000, 500_000),
            total_views: ctx.int(i + OFF_TOTAL_VIEWS, 250_000_000, 10_000_000),
            video_count: ctx.int(i + OFF_VIDEO_COUNT, 500, 50) as u32,
            recent_upload_count: ctx.int(i + OFF_RECENT_UPLOADS, 10, 2) as u32,
            thirty_day_delta: ctx.sample(i + OFF_DELTA) * 0.3,
            primary_topics: vec![
                niche.clone(),
                format!("{niche} tips"),
                "tutorials".into(),
                "reviews".into(),
                "industry news".into(),
            ],
        })
        .collect();

    let keywords: [&str; GAP_COUNT] = [
        niche.as_str(),
        "tips",
        "tutorials",
        "beginners",
        "advanced",
        "strategy",
        "tricks",
        "performance",
        "equipment",
        "accessories",
        "reviews",
        "industry",
        "monetization",
        "community",
        "trends",
    ];
    let gap_analysis: Vec<YouTubeGap> = keywords
        .iter()
        .zip(0u32..)
        .map(|(keyword, i)| {
            let mut competitor_coverage = BTreeMap::new();
            competitor_coverage.insert(
                format!("{brand}60"),
                ctx.sample(i + OFF_COMPETITOR_A) * 0.8,
            );
            competitor_coverage.insert(
                format!("{brand}55"),
                ctx.sample(i + OFF_COMPETITOR_B) * 0.7,
            );
            competitor_coverage.insert(
                format!("{brand}50"),
                ctx.sample(i + OFF_COMPETITOR_C) * 0.6,
            );
            YouTubeGap {
                keyword: keyword.to_string(),
                seed_coverage: ctx.sample(i + OFF_SEED_COVERAGE) * 0.8 + 0.2,
                competitor_coverage,
                opportunity_score: ctx.sample(i + OFF_OPPORTUNITY) * 0.8 + 0.1,
            }
        })
        .collect();

    let run_date = match seed {
        MockSeed::Fresh => ctx.anchor_iso(),
        MockSeed::Deterministic { .. } => ctx.before_anchor(OFF_RUN_DATE, DAY_MS),
    };

    BlueprintResult {
        run_date,
        seed_url,
        seed_data,
        top_channels,
        gap_analysis,
        blueprint: strategy(&niche, &brand),
        blueprint_url: "#".into(),
    }
}

fn strategy(niche: &str, brand: &str) -> YouTubeBlueprint {
    let mut format_mix = BTreeMap::new();
    format_mix.insert("long_form".to_string(), 0.6);
    format_mix.insert("shorts".to_string(), 0.3);
    format_mix.insert("livestream".to_string(), 0.1);

    let mut roadmap = BTreeMap::new();
    roadmap.insert(
        "Week 1".to_string(),
        vec![
            format!("{niche} Tips: Deep dive on performance optimization"),
            "Shorts: Quick tips on settings".to_string(),
            format!("Comparative: {brand}60 vs our approach to {niche} Tips"),
        ],
    );
    roadmap.insert(
        "Week 2".to_string(),
        vec![
            "Performance Optimization: Top 10 tips".to_string(),
            "Shorts: One-minute quick wins".to_string(),
            "Livestream Q&A: Answer performance questions".to_string(),
        ],
    );
    roadmap.insert(
        "Week 3".to_string(),
        vec![
            "Industry Updates: New developments coming in 2025".to_string(),
            "Shorts: 30-second review of trending item".to_string(),
            "Tutorial: How to optimize settings".to_string(),
        ],
    );
    roadmap.insert(
        "Week 4".to_string(),
        vec![
            format!("{niche} Tips: Accessory guide for enthusiasts"),
            "Shorts: Hidden features to boost efficiency".to_string(),
            "Interview: Professional workflow".to_string(),
        ],
    );

    YouTubeBlueprint {
        positioning: format!(
            "A channel focused on {niche} Tips and Strategy, distinguished by filling the content gap around performance optimization that even top creators like {brand}60 haven't fully covered."
        ),
        content_pillars: vec![
            format!("{niche} Tips & Tricks"),
            "Performance Optimization".to_string(),
            "Industry Updates".to_string(),
        ],
        format_mix,
        roadmap,
        ai_production_tips: AI_PRODUCTION_TIPS.iter().map(|s| s.to_string()).collect(),
        coppa_checklist: COPPA_CHECKLIST
            .iter()
            .map(|(item, status)| CoppaItem {
                item: item.to_string(),
                status: status.to_string(),
            })
            .collect(),
    }
}
