use practice_core::model::{Platform, Problem};

/// Tags shown on a problem card.
pub const MAX_VISIBLE_TAGS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemVm {
    pub id: String,
    pub title: String,
    pub platform: String,
    pub platform_class: &'static str,
    pub difficulty: String,
    pub difficulty_class: &'static str,
    pub tags: Vec<String>,
    pub url: Option<String>,
}

impl From<&Problem> for ProblemVm {
    fn from(problem: &Problem) -> Self {
        Self {
            id: problem.id().to_string(),
            title: problem.title().to_string(),
            platform: problem.platform().to_string(),
            platform_class: platform_class(problem.platform()),
            difficulty: problem.difficulty().to_string(),
            difficulty_class: difficulty_class(problem.difficulty()),
            tags: problem
                .tags()
                .iter()
                .take(MAX_VISIBLE_TAGS)
                .cloned()
                .collect(),
            url: problem.url().map(str::to_string),
        }
    }
}

#[must_use]
pub fn platform_class(platform: Platform) -> &'static str {
    match platform {
        Platform::Boj => "platform-boj",
        Platform::LeetCode => "platform-leetcode",
        Platform::Programmers => "platform-programmers",
        Platform::Custom => "platform-custom",
    }
}

#[must_use]
pub fn difficulty_class(difficulty: &str) -> &'static str {
    match difficulty.to_lowercase().as_str() {
        "easy" => "difficulty-easy",
        "medium" => "difficulty-medium",
        "hard" => "difficulty-hard",
        _ => "difficulty-unknown",
    }
}
