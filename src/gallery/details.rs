//! Detail panels attached by the gallery's `v` key.
//!
//! Prose is stored unwrapped and wrapped with `textwrap` at build time so
//! it reads correctly inside the detail box on an 80-column terminal.

use crate::core::detail::{Detail, DetailOptions};

const WRAP_WIDTH: usize = 68;

/// Wrap each paragraph and separate them with a blank row.
fn paragraphs(texts: &[&str]) -> Vec<String> {
    let mut rows = Vec::new();
    for (i, text) in texts.iter().enumerate() {
        if i > 0 {
            rows.push(String::new());
        }
        rows.extend(textwrap::wrap(text, WRAP_WIDTH).into_iter().map(|line| line.into_owned()));
    }
    rows
}

pub fn todo() -> Detail {
    Detail::new(DetailOptions {
        title: "Todo".to_string(),
        meta: vec![
            "status: open".to_string(),
            "owner: platform".to_string(),
            "due: 2026-11-02".to_string(),
        ],
        block: None,
        body: paragraphs(&[
            "Ship the release-notes workflow behind the leader menu so it can be started from any \
             screen without leaving the keyboard.",
            "The draft step reads merged pull requests since the last tag, groups them by label and \
             writes a markdown section per group. Anything without a label lands under \
             \"Other changes\" so nothing is silently dropped.",
            "Review step: the draft opens in the detail panel first. J and K scroll it; v closes \
             it again. Enter confirms and hands the text to the publish step.",
            "Open items: decide whether dependency bumps get their own section, and whether the \
             contributor list should be sorted by first contribution or alphabetically.",
            "Rollout: enable it for the tooling repositories first, watch the publish step for \
             a week, then turn it on everywhere. Keep the old script around until two releases \
             have gone out through the new path.",
            "Risks: labels are inconsistent across repositories, so grouping may need a mapping \
             table. Large releases can produce drafts longer than one screen, which is fine \
             because the panel scrolls, but the summary at the top should stay short.",
            "Done when the workflow runs end to end on the staging repository and the output \
             matches the hand-written notes for the previous two releases.",
        ]),
        shortcuts: "J/K scroll • v close".to_string(),
    })
}

pub fn skill() -> Detail {
    Detail::new(DetailOptions {
        title: "Skill".to_string(),
        meta: vec![
            "name: rust-review".to_string(),
            "description: Review a diff for ownership and error handling".to_string(),
        ],
        block: Some(vec![
            "$ tessel --screen list2".to_string(),
            "> rust".to_string(),
        ]),
        body: paragraphs(&[
            "Reads the staged diff and comments on borrow scopes that could be shortened, \
             clones that exist only to satisfy the borrow checker, and error paths that \
             discard context.",
            "Suggestions are grouped per file. Each one names the line range and the change, \
             never a rewrite of the whole function.",
        ]),
        shortcuts: "J/K scroll • v close".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Primitive;
    use crate::core::detail::USABLE_ROWS;

    #[test]
    fn test_paragraphs_wrap_and_separate() {
        let rows = paragraphs(&["one two three", "four"]);
        assert_eq!(rows, vec!["one two three", "", "four"]);
        let text = "word ".repeat(40);
        let long = paragraphs(&[text.as_str()]);
        assert!(long.len() > 1);
        assert!(long.iter().all(|r| r.len() <= WRAP_WIDTH));
    }

    #[test]
    fn test_todo_is_long_enough_to_scroll() {
        let detail = todo();
        assert!(detail.total() > USABLE_ROWS);
        assert!(detail.max_top() > 0);
    }

    #[test]
    fn test_skill_shows_block_after_meta() {
        let slot = Primitive::<()>::slot(&skill());
        assert_eq!(slot.content[1].text(), "name: rust-review");
        assert_eq!(slot.content[4].text(), "$ tessel --screen list2");
    }
}
