//! 类型模块：代理请求、操作以及工作流结果的数据类型。
//!
//! # Types Module
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ProxyRequest`] | One logical call: operation, parameters, upstream envelope |
//! | [`Operation`] | The operations the proxy routes |
//! | [`UpstreamEnvelope`] | `{intent, data, task_id, trace_id}` body sent upstream |
//! | [`NicheScoutResult`] | Trend analysis result |
//! | [`BlueprintResult`] | Channel strategy result |
//! | [`WorkflowSchedule`], [`WorkflowHistoryEntry`] | Scheduling and history records |

pub mod request;
pub mod workflow;

pub use request::{
    BlueprintParams, NicheScoutParams, Operation, ParamValue, ProxyRequest, ScheduleRequest,
    UpstreamEnvelope, WorkflowKind,
};
pub use workflow::{
    BlueprintResult, CoppaItem, Frequency, NicheScoutResult, RunStatus, ScheduleStatus,
    WorkflowHistoryEntry, WorkflowSchedule, YouTubeBlueprint, YouTubeChannel, YouTubeGap,
    YouTubeNiche, YouTubeVideo,
};
