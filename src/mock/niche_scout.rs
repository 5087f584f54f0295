//! Niche-scout mock: 20 trending niches and the top 10 by score.

use super::{MockContext, MockSeed, DAY_MS};
use crate::types::{NicheScoutResult, YouTubeNiche};

pub const TRENDING_COUNT: usize = 20;
pub const TOP_COUNT: usize = 10;

const QUERIES: [&str; 10] = [
    "mobile gaming tips",
    "coding tutorials",
    "fitness workouts",
    "cooking recipes",
    "travel vlogs",
    "guitar lessons",
    "home automation",
    "gardening tips",
    "digital art",
    "language learning",
];

const CLUSTERS: u64 = 5;

// Per-field offsets into the seeded sequence. Changing any of these changes
// every deterministic payload already handed out.
const OFF_QUERY: u32 = 0;
const OFF_VIEW_SUM: u32 = 100;
const OFF_RSV: u32 = 200;
const OFF_RSV_RANK: u32 = 300;
const OFF_SCORE: u32 = 400;
const OFF_X: u32 = 500;
const OFF_Y: u32 = 600;
const OFF_CLUSTER: u32 = 700;
const OFF_RUN_DATE: u32 = 800;

pub fn niche_scout_result(seed: &MockSeed) -> NicheScoutResult {
    let mut ctx = seed.context();
    build(&mut ctx, seed)
}

fn build(ctx: &mut MockContext, seed: &MockSeed) -> NicheScoutResult {
    let trending_niches: Vec<YouTubeNiche> = (0..TRENDING_COUNT as u32)
        .map(|i| YouTubeNiche {
            query: QUERIES[ctx.pick(i + OFF_QUERY, QUERIES.len())].to_string(),
            view_sum: ctx.int(i + OFF_VIEW_SUM, 5_000_000, 1_000_000),
            rsv: ctx.sample(i + OFF_RSV) * 100.0,
            view_rank: i + 1,
            rsv_rank: ctx.int(i + OFF_RSV_RANK, TRENDING_COUNT as u64, 1) as u32,
            score: ctx.sample(i + OFF_SCORE) * 0.5 + 0.5,
            x: ctx.sample(i + OFF_X) * 100.0,
            y: ctx.sample(i + OFF_Y) * 100.0,
            niche: ctx.int(i + OFF_CLUSTER, CLUSTERS, 0) as u32,
        })
        .collect();

    let mut top_niches = trending_niches.clone();
    // stable sort keeps generation order among equal scores
    top_niches.sort_by(|a, b| b.score.total_cmp(&a.score));
    top_niches.truncate(TOP_COUNT);

    let run_date = match seed {
        MockSeed::Fresh => ctx.anchor_iso(),
        MockSeed::Deterministic { .. } => ctx.before_anchor(OFF_RUN_DATE, DAY_MS),
    };

    NicheScoutResult {
        run_date,
        trending_niches,
        top_niches,
        visualization_url: None,
    }
}
