mod judge_vm;
mod log_vm;
mod problem_vm;
mod review_vm;
mod time_fmt;

pub use judge_vm::{JudgeVm, result_label, verdict_class, verdict_label};
pub use log_vm::{LogEntryVm, map_log_entries};
pub use problem_vm::{MAX_VISIBLE_TAGS, ProblemVm, difficulty_class, platform_class};
pub use review_vm::{ReviewItemVm, map_review_items, understanding_label};
pub use time_fmt::{format_datetime, format_relative_day};
