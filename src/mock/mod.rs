//! 模拟数据模块：上游不可用时生成结构有效的替代结果。
//!
//! # Mock Data Synthesizer
//!
//! Produces structurally valid substitute payloads when the upstream agent
//! cannot be reached, or when a caller asks for a previously issued mock result
//! by id.
//!
//! ## Modes
//!
//! | Seed | Randomness | Identifier |
//! |------|------------|------------|
//! | [`MockSeed::Fresh`] | thread-local RNG | `mock-<operation>-<unix millis>` |
//! | [`MockSeed::Deterministic`] | `fract(sin(seed + offset) * 10000)` | caller supplied |
//!
//! In deterministic mode every field draws from a fixed offset, so the same id
//! always yields the same payload, timestamps included.
//!
//! Generators are pure functions building a fresh value per call; nothing is
//! shared between calls.

pub mod blueprint;
pub mod niche_scout;
pub mod schedules;

pub use blueprint::{blueprint_result, BlueprintHints};
pub use niche_scout::niche_scout_result;
pub use schedules::{schedule_echo, scheduled_workflows, workflow_history};

use crate::types::Operation;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Identifiers starting with this prefix denote synthesized results.
pub const MOCK_ID_PREFIX: &str = "mock-";

/// Anchor for deterministic timestamps when the id carries none (2025-05-01T00:00:00Z).
const FIXED_ANCHOR_SECS: i64 = 1_746_057_600;

/// Smallest trailing number accepted as a Unix-millis timestamp (2001-09-09).
const MIN_ANCHOR_MILLIS: i64 = 1_000_000_000_000;

pub(crate) const DAY_MS: f64 = 86_400_000.0;

pub fn is_mock_id(id: &str) -> bool {
    id.starts_with(MOCK_ID_PREFIX)
}

/// New identifier for a fresh mock of `operation`.
pub fn fresh_id(operation: Operation) -> String {
    format!(
        "{}{}-{}",
        MOCK_ID_PREFIX,
        operation.id_prefix(),
        Utc::now().timestamp_millis()
    )
}

/// 32-bit polynomial string hash (`h = h * 31 + unit`) over UTF-16 code units.
///
/// Kept bit-compatible with the dashboard's own hash so ids hash identically
/// on both sides.
pub fn hash_code(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Pure `(seed, offset) -> [0, 1)` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededSequence {
    seed: u32,
}

impl SeededSequence {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn at(&self, offset: u32) -> f64 {
        let x = (self.seed as f64 + offset as f64).sin() * 10_000.0;
        let v = x - x.floor();
        // guard the rounding edge where x - floor(x) lands on 1.0
        if v >= 1.0 {
            0.0
        } else {
            v
        }
    }
}

/// Derivation key for a mock payload.
#[derive(Debug, Clone, PartialEq)]
pub enum MockSeed {
    Fresh,
    Deterministic {
        /// Signed [`hash_code`] of the identifier; the sequence seed is its magnitude.
        hash: i32,
        anchor: DateTime<Utc>,
    },
}

impl MockSeed {
    pub fn fresh() -> Self {
        MockSeed::Fresh
    }

    /// Deterministic seed derived from an identifier.
    pub fn for_id(id: &str) -> Self {
        MockSeed::Deterministic {
            hash: hash_code(id),
            anchor: anchor_for_id(id),
        }
    }

    pub(crate) fn context(&self) -> MockContext {
        match self {
            MockSeed::Fresh => {
                let mut rng = StdRng::from_rng(&mut rand::rng());
                let tag = rng.random::<i32>();
                MockContext {
                    sampler: Sampler::Fresh(rng),
                    anchor: Utc::now(),
                    tag,
                }
            }
            MockSeed::Deterministic { hash, anchor } => MockContext {
                sampler: Sampler::Seeded(SeededSequence::new(hash.unsigned_abs())),
                anchor: *anchor,
                tag: *hash,
            },
        }
    }
}

/// Timestamp anchor for deterministic payloads.
///
/// Ids minted by [`fresh_id`] end in their creation time; reuse it so that
/// re-fetched mocks keep a plausible date. Anything else gets a fixed anchor.
pub fn anchor_for_id(id: &str) -> DateTime<Utc> {
    id.rsplit('-')
        .next()
        .and_then(|tail| tail.parse::<i64>().ok())
        .filter(|ms| *ms >= MIN_ANCHOR_MILLIS)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_else(fixed_anchor)
}

fn fixed_anchor() -> DateTime<Utc> {
    Utc.timestamp_opt(FIXED_ANCHOR_SECS, 0)
        .single()
        .unwrap_or_default()
}

enum Sampler {
    Seeded(SeededSequence),
    Fresh(StdRng),
}

/// Per-call generation state.
pub(crate) struct MockContext {
    sampler: Sampler,
    anchor: DateTime<Utc>,
    /// Stable 32-bit tag for synthesized identifiers (the id hash, or random when fresh).
    tag: i32,
}

impl MockContext {
    /// Value in [0, 1) for the field at `offset`.
    pub(crate) fn sample(&mut self, offset: u32) -> f64 {
        match &mut self.sampler {
            Sampler::Seeded(seq) => seq.at(offset),
            Sampler::Fresh(rng) => rng.random::<f64>(),
        }
    }

    /// `floor(sample * span) + base`
    pub(crate) fn int(&mut self, offset: u32, span: u64, base: u64) -> u64 {
        (self.sample(offset) * span as f64).floor() as u64 + base
    }

    /// Index into a slice of `len` items.
    pub(crate) fn pick(&mut self, offset: u32, len: usize) -> usize {
        ((self.sample(offset) * len as f64).floor() as usize).min(len.saturating_sub(1))
    }

    /// Timestamp `sample * window_ms` before the anchor, ISO 8601 with millis.
    pub(crate) fn before_anchor(&mut self, offset: u32, window_ms: f64) -> String {
        let back = (self.sample(offset) * window_ms).floor() as i64;
        iso(self.anchor - chrono::Duration::milliseconds(back))
    }

    pub(crate) fn anchor_iso(&self) -> String {
        iso(self.anchor)
    }

    /// First `len` characters of the tag in signed hex, e.g. `-1a2b3c4`.
    pub(crate) fn tag_hex(&self, len: usize) -> String {
        let hex = if self.tag < 0 {
            format!("-{:x}", self.tag.unsigned_abs())
        } else {
            format!("{:x}", self.tag)
        };
        hex.chars().take(len).collect()
    }
}

pub(crate) fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
