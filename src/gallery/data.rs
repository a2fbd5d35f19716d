//! Static demo data for the gallery screens.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workflow {
    pub name: &'static str,
    pub description: &'static str,
    pub steps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub summary: &'static str,
}

/// One menu row: the value routed on enter, and what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const WORKFLOWS: &[Workflow] = &[
    Workflow { name: "release-notes", description: "Draft notes from merged changes", steps: 4 },
    Workflow { name: "triage", description: "Label and route new issues", steps: 3 },
    Workflow { name: "bump-deps", description: "Update lockfile and run the suite", steps: 5 },
    Workflow { name: "changelog", description: "Append the unreleased section", steps: 2 },
    Workflow { name: "flaky-hunt", description: "Rerun failed jobs and bisect", steps: 6 },
    Workflow { name: "docs-sync", description: "Regenerate reference pages", steps: 3 },
    Workflow { name: "perf-baseline", description: "Record benchmark numbers", steps: 4 },
    Workflow { name: "security-scan", description: "Audit dependencies for advisories", steps: 2 },
    Workflow { name: "onboarding", description: "Walk a new contributor through setup", steps: 7 },
    Workflow { name: "cleanup", description: "Close stale branches and drafts", steps: 3 },
];

pub const SKILLS: &[Skill] = &[
    Skill { name: "rust-review", summary: "Review a diff for ownership and error handling" },
    Skill { name: "sql-explain", summary: "Read a query plan and suggest indexes" },
    Skill { name: "git-bisect", summary: "Find the commit that broke a test" },
    Skill { name: "log-digest", summary: "Summarise a noisy log file" },
    Skill { name: "api-sketch", summary: "Outline endpoints from a data model" },
    Skill { name: "test-gap", summary: "List branches without coverage" },
    Skill { name: "migration", summary: "Plan a schema change with rollback" },
    Skill { name: "release", summary: "Tag, build and publish artifacts" },
];

pub const TAGS: &[&str] = &[
    "backend", "frontend", "infra", "docs", "ci", "security", "perf", "ux", "data", "mobile", "cli", "api",
    "testing", "release", "design", "ops",
];

pub const ACTIONS: &[MenuEntry] = &[
    MenuEntry { value: "use", label: "Use", description: "Run the workflow now" },
    MenuEntry { value: "refine", label: "Refine", description: "Edit steps before running" },
    MenuEntry { value: "append-to-agents", label: "Append", description: "Add to the agents file" },
    MenuEntry { value: "promote-to-skill", label: "Promote", description: "Turn into a reusable skill" },
    MenuEntry { value: "delete", label: "Delete", description: "Remove the workflow" },
];

pub const NESTED_ACTIONS: &[MenuEntry] = &[
    MenuEntry { value: "run-dry", label: "Dry run", description: "Print steps without running" },
    MenuEntry { value: "run-step", label: "Step", description: "Run one step at a time" },
    MenuEntry { value: "export", label: "Export", description: "Write the workflow as TOML" },
];
