//! Built-in problem list used by the start screen.

use crate::model::{Platform, Problem, ProblemId, extract_problem_key};

struct SampleProblem {
    id: &'static str,
    title: &'static str,
    platform: Platform,
    difficulty: &'static str,
    tags: &'static [&'static str],
    url: &'static str,
}

const SAMPLE_PROBLEMS: &[SampleProblem] = &[
    SampleProblem {
        id: "dummy-1",
        title: "Two Sum",
        platform: Platform::LeetCode,
        difficulty: "Easy",
        tags: &["Array", "Hash Table"],
        url: "https://leetcode.com/problems/two-sum/",
    },
    SampleProblem {
        id: "dummy-2",
        title: "Binary Search",
        platform: Platform::Boj,
        difficulty: "Easy",
        tags: &["Array", "Binary Search"],
        url: "https://www.acmicpc.net/problem/1920",
    },
    SampleProblem {
        id: "dummy-3",
        title: "Valid Parentheses",
        platform: Platform::LeetCode,
        difficulty: "Easy",
        tags: &["Stack", "String"],
        url: "https://leetcode.com/problems/valid-parentheses/",
    },
    SampleProblem {
        id: "dummy-4",
        title: "Merge Two Sorted Lists",
        platform: Platform::LeetCode,
        difficulty: "Easy",
        tags: &["Linked List", "Recursion"],
        url: "https://leetcode.com/problems/merge-two-sorted-lists/",
    },
    SampleProblem {
        id: "dummy-5",
        title: "Maximum Subarray",
        platform: Platform::Boj,
        difficulty: "Medium",
        tags: &["Array", "Divide and Conquer", "DP"],
        url: "https://www.acmicpc.net/problem/1912",
    },
    SampleProblem {
        id: "dummy-6",
        title: "Climbing Stairs",
        platform: Platform::Boj,
        difficulty: "Easy",
        tags: &["Math", "DP", "Memoization"],
        url: "https://www.acmicpc.net/problem/2579",
    },
    SampleProblem {
        id: "dummy-7",
        title: "Best Time to Buy and Sell Stock",
        platform: Platform::LeetCode,
        difficulty: "Easy",
        tags: &["Array", "DP"],
        url: "https://leetcode.com/problems/best-time-to-buy-and-sell-stock/",
    },
    SampleProblem {
        id: "dummy-8",
        title: "Valid Anagram",
        platform: Platform::Boj,
        difficulty: "Easy",
        tags: &["Hash Table", "String", "Sorting"],
        url: "https://www.acmicpc.net/problem/6996",
    },
];

impl SampleProblem {
    fn build(&self) -> Option<Problem> {
        Problem::new(
            ProblemId::new(self.id),
            self.title,
            self.platform,
            self.difficulty,
            self.tags.iter().map(|tag| (*tag).to_string()).collect(),
            Some(self.url.to_string()),
        )
        .ok()
    }
}

/// A searchable, read-only list of problems.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProblemCatalog {
    problems: Vec<Problem>,
}

impl ProblemCatalog {
    #[must_use]
    pub fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    /// The sample problems shipped with the app.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(SAMPLE_PROBLEMS.iter().filter_map(SampleProblem::build).collect())
    }

    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    #[must_use]
    pub fn get(&self, id: &ProblemId) -> Option<&Problem> {
        self.problems.iter().find(|problem| problem.id() == id)
    }

    /// Look a problem up by URL, number, or slug.
    ///
    /// A problem matches when the key extracted from its URL equals the key
    /// extracted from `input`, or when its URL contains that key.
    #[must_use]
    pub fn search(&self, input: &str) -> Option<&Problem> {
        let key = extract_problem_key(input)?;
        self.problems.iter().find(|problem| {
            problem.url().is_some_and(|url| {
                extract_problem_key(url).as_deref() == Some(key.as_str()) || url.contains(&key)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = ProblemCatalog::builtin();
        assert_eq!(catalog.problems().len(), SAMPLE_PROBLEMS.len());
        assert!(catalog.get(&ProblemId::new("dummy-5")).is_some());
    }

    #[test]
    fn search_by_number_url_and_slug() {
        let catalog = ProblemCatalog::builtin();

        let by_number = catalog.search("1920").unwrap();
        assert_eq!(by_number.title(), "Binary Search");

        let by_url = catalog
            .search("https://www.acmicpc.net/problem/1912")
            .unwrap();
        assert_eq!(by_url.title(), "Maximum Subarray");

        let by_slug = catalog
            .search("https://leetcode.com/problems/valid-parentheses")
            .unwrap();
        assert_eq!(by_slug.title(), "Valid Parentheses");
    }

    #[test]
    fn search_misses_return_none() {
        let catalog = ProblemCatalog::builtin();
        assert!(catalog.search("99999").is_none());
        assert!(catalog.search("   ").is_none());
        assert!(catalog.search("two-sum").is_none());
    }
}
