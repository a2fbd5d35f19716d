//! # Gallery
//!
//! A registry of demo screens exercising every primitive and layout. The
//! binary runs it; tests use it as a realistic end-to-end fixture.
//!
//! | Screen            | Primitive | Shows                                |
//! |-------------------|-----------|--------------------------------------|
//! | `list`            | List      | columns, search, drill-in on enter   |
//! | `list2`           | List      | prompt row, custom finder, preview   |
//! | `variant-compact` | List      | flow layout, two columns             |
//! | `variant-tri`     | List      | flow layout, three columns           |
//! | `actions`         | Action    | top-tier menu, leader shortcuts      |
//! | `actions-wide`    | Action    | menu in flow layout                  |
//! | `actions-detail`  | Action    | menu with a scrollable preview       |
//! | `actions-nested`  | Action    | nested menu, esc goes back           |
//! | `about`, `help`   | Static    | read-only pages                      |
//!
//! Tab cycles through the first seven in that order.

mod data;
mod details;

use std::fmt;
use std::str::FromStr;

use crate::core::action::action;
use crate::core::error::{Error, Result};
use crate::core::list::{Col, List, ListOptions, contains_any};
use crate::core::slot::{Cell, Line, Slot, Tone, blank, row};
use crate::core::text::Align;
use crate::core::{Intent, StaticPrimitive, Tier};
use crate::tui::{KeyBinding, KeyMap, LeaderAction, LeaderKey, Runtime, RuntimeConfig, Theme};

use data::{ACTIONS, MenuEntry, NESTED_ACTIONS, SKILLS, Skill, TAGS, WORKFLOWS, Workflow};

pub const PROJECT_URL: &str = concat!("https://docs.rs/", env!("CARGO_PKG_NAME"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    List,
    List2,
    VariantCompact,
    VariantTri,
    Actions,
    ActionsWide,
    ActionsDetail,
    ActionsNested,
    About,
    Help,
}

impl Demo {
    pub const ALL: [Demo; 10] = [
        Demo::List,
        Demo::List2,
        Demo::VariantCompact,
        Demo::VariantTri,
        Demo::Actions,
        Demo::ActionsWide,
        Demo::ActionsDetail,
        Demo::ActionsNested,
        Demo::About,
        Demo::Help,
    ];

    /// Tab order.
    pub const CYCLE: [Demo; 7] = [
        Demo::List,
        Demo::List2,
        Demo::VariantCompact,
        Demo::VariantTri,
        Demo::Actions,
        Demo::ActionsWide,
        Demo::ActionsDetail,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Demo::List => "list",
            Demo::List2 => "list2",
            Demo::VariantCompact => "variant-compact",
            Demo::VariantTri => "variant-tri",
            Demo::Actions => "actions",
            Demo::ActionsWide => "actions-wide",
            Demo::ActionsDetail => "actions-detail",
            Demo::ActionsNested => "actions-nested",
            Demo::About => "about",
            Demo::Help => "help",
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Demo::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| Error::UnknownScreen(s.to_string()))
    }
}

// ============================================================================
// Screens
// ============================================================================

fn workflows(leader: KeyBinding) -> Result<List<Workflow, Demo>> {
    let cols = vec![
        Col::new(16, |w: &Workflow| w.name.to_string()).tone(Tone::Accent),
        Col::new(38, |w: &Workflow| w.description.to_string()).tone(Tone::Dim),
        Col::new(5, |w: &Workflow| format!("{} st", w.steps)).align(Align::Right),
    ];
    List::new(
        ListOptions::new(format!("Workflows ({})", WORKFLOWS.len()), WORKFLOWS.to_vec(), cols)
            .shortcuts(format!("/ search • enter actions • {leader} more"))
            .search(true)
            .intent(|_| Some(Intent::Screen(Demo::ActionsNested))),
    )
}

fn skills() -> Result<List<Skill, Demo>> {
    let cols = vec![
        Col::new(12, |s: &Skill| s.name.to_string()),
        Col::new(46, |s: &Skill| s.summary.to_string()).tone(Tone::Dim),
    ];
    List::new(
        ListOptions::new("Skills", SKILLS.to_vec(), cols)
            .shortcuts("/ filter • v preview • enter run")
            .search(true)
            .prompt(true)
            .page(5)
            .find(contains_any(|s: &Skill| vec![s.name, s.summary]))
            .intent(|s: &Skill| Some(Intent::Action(format!("skill:{}", s.name))))
            .view(|_| Some(Intent::Detail("skill".to_string()))),
    )
}

fn tags(columns: usize) -> Result<List<&'static str, Demo>> {
    let cols = vec![Col::new(10, |t: &&'static str| t.to_string())];
    List::new(
        ListOptions::new(format!("Tags ({columns} columns)"), TAGS.to_vec(), cols)
            .shortcuts("/ search • enter pick")
            .search(true)
            .page(5)
            .flow(columns)
            .intent(|t: &&'static str| Some(Intent::Action(format!("tag:{t}")))),
    )
}

fn menu_cols() -> Vec<Col<MenuEntry>> {
    vec![
        Col::new(8, |m: &MenuEntry| m.label.to_string()),
        Col::new(30, |m: &MenuEntry| m.description.to_string()).tone(Tone::Dim),
    ]
}

fn menu(title: &str, entries: &[MenuEntry], shortcuts: &str) -> ListOptions<MenuEntry, Demo> {
    ListOptions::new(title, entries.to_vec(), menu_cols())
        .shortcuts(shortcuts)
        .intent(|m: &MenuEntry| Some(Intent::Action(m.value.to_string())))
}

fn about(leader: KeyBinding) -> StaticPrimitive {
    StaticPrimitive::new(move || {
        Slot::page(
            "About",
            vec![
                row(format!("tessel {}", env!("CARGO_PKG_VERSION")), Tone::Accent),
                blank(),
                row("Lists, menus and detail panels for the terminal.", Tone::Normal),
                row("Every screen here is built from the same primitives.", Tone::Normal),
                blank(),
                row(PROJECT_URL, Tone::Dim),
            ],
            format!("{leader} g project page"),
        )
    })
}

fn help(leader: KeyBinding) -> StaticPrimitive {
    StaticPrimitive::new(move || {
        let chord = leader.to_string();
        let keys = [
            ("↑↓ j k", "move"),
            ("enter", "confirm"),
            ("/", "search"),
            ("tab", "next screen"),
            ("v  J K", "preview, scroll preview"),
            (chord.as_str(), "more options"),
            ("esc", "back or close"),
        ];
        let rows = keys
            .iter()
            .map(|(k, what)| {
                Line::new(vec![
                    Cell::new(format!("{k:<10}"), Tone::Accent),
                    Cell::new(*what, Tone::Normal),
                ])
            })
            .collect();
        Slot::page("Help", rows, "")
    })
}

fn leader_tables() -> Vec<(Demo, Vec<LeaderKey<Demo>>)> {
    let act = |value: &str| LeaderAction::Intent(Intent::Action(value.to_string()));
    let menu_table = vec![
        LeaderKey::new('u', "use", act("use")),
        LeaderKey::new('r', "refine", act("refine")),
        LeaderKey::new('a', "append", act("append-to-agents")),
        LeaderKey::new('p', "promote", act("promote-to-skill")),
        LeaderKey::new('d', "delete", act("delete")),
    ];
    vec![
        (
            Demo::List,
            vec![
                LeaderKey::new('c', "create", act("create")),
                LeaderKey::new('w', "open actions", LeaderAction::Enter),
            ],
        ),
        (Demo::List2, vec![LeaderKey::new('p', "preview", LeaderAction::View)]),
        (Demo::Actions, menu_table.clone()),
        (
            Demo::ActionsDetail,
            vec![
                LeaderKey::new('p', "preview", LeaderAction::View),
                LeaderKey::new('u', "use", act("use")),
            ],
        ),
        (Demo::ActionsNested, menu_table),
        (
            Demo::About,
            vec![LeaderKey::new('g', "project page", LeaderAction::Intent(Intent::Link(PROJECT_URL.to_string())))],
        ),
    ]
}

/// Full gallery wiring with default keys and theme. `leader` only feeds
/// the on-screen hints; the runtime reads the chord from its [`KeyMap`].
pub fn config(initial: Demo, leader: KeyBinding) -> Result<RuntimeConfig<Demo>> {
    let wide = action(
        menu("Actions (wide)", ACTIONS, "enter confirm").flow(2),
        Tier::Top,
    )?;
    let preview = action(
        menu("Actions (preview)", ACTIONS, "enter confirm • v preview • J/K scroll")
            .view(|_| Some(Intent::Detail("todo".to_string()))),
        Tier::Top,
    )?;

    let mut cfg = RuntimeConfig::new(initial, Demo::About, Demo::Help)
        .screen(Demo::List, workflows(leader)?)
        .screen(Demo::List2, skills()?)
        .screen(Demo::VariantCompact, tags(2)?)
        .screen(Demo::VariantTri, tags(3)?)
        .screen(Demo::Actions, action(menu("Actions", ACTIONS, &format!("enter confirm • {leader} more")), Tier::Top)?)
        .screen(Demo::ActionsWide, wide)
        .screen(Demo::ActionsDetail, preview)
        .screen(Demo::ActionsNested, action(menu("Run options", NESTED_ACTIONS, "enter run"), Tier::Nested)?)
        .screen(Demo::About, about(leader))
        .screen(Demo::Help, help(leader))
        .detail("todo", details::todo())
        .detail("skill", details::skill())
        .cycle(Demo::CYCLE.to_vec());
    for (id, table) in leader_tables() {
        cfg = cfg.leader(id, table);
    }
    Ok(cfg)
}

/// Build the gallery runtime.
pub fn runtime(initial: Demo, keys: KeyMap, theme: Theme) -> Result<Runtime<Demo>> {
    Runtime::new(config(initial, keys.leader)?.keys(keys).theme(theme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ch, ctrl, key};
    use crate::tui::Effect;
    use crossterm::event::KeyCode;
    use std::time::Instant;

    fn gallery() -> Runtime<Demo> {
        runtime(Demo::List, KeyMap::default(), Theme::default()).unwrap()
    }

    #[test]
    fn test_names_round_trip() {
        for demo in Demo::ALL {
            assert_eq!(demo.name().parse::<Demo>().unwrap(), demo);
        }
        assert!(matches!("nope".parse::<Demo>(), Err(Error::UnknownScreen(s)) if s == "nope"));
    }

    #[test]
    fn test_every_screen_renders_full_panel() {
        for demo in Demo::ALL {
            let rt = runtime(demo, KeyMap::default(), Theme::default()).unwrap();
            assert_eq!(rt.render(80).unwrap().len(), crate::tui::panel::PANEL_HEIGHT, "{demo}");
        }
    }

    #[test]
    fn test_tab_visits_cycle_in_order() {
        let mut rt = gallery();
        let now = Instant::now();
        for expected in Demo::CYCLE.iter().skip(1).chain([Demo::List].iter()) {
            rt.handle_key(&key(KeyCode::Tab), now).unwrap();
            assert_eq!(rt.screen(), *expected);
        }
    }

    #[test]
    fn test_list_enter_drills_into_nested_menu() {
        let mut rt = gallery();
        let now = Instant::now();
        rt.handle_key(&key(KeyCode::Enter), now).unwrap();
        assert_eq!(rt.screen(), Demo::ActionsNested);
        rt.handle_key(&key(KeyCode::Esc), now).unwrap();
        assert_eq!(rt.screen(), Demo::List);
    }

    #[test]
    fn test_skills_filter_by_summary() {
        let mut rt = runtime(Demo::List2, KeyMap::default(), Theme::default()).unwrap();
        let now = Instant::now();
        rt.handle_key(&ch('/'), now).unwrap();
        for c in "plan".chars() {
            rt.handle_key(&ch(c), now).unwrap();
        }
        let slot = rt.current().unwrap().slot();
        assert!(slot.content[slot.active[0]].text().contains("sql-explain"));
        assert_eq!(slot.content[0].text(), "> plan");
    }

    #[test]
    fn test_hints_follow_rebound_leader() {
        let keys = KeyMap {
            leader: KeyBinding::ctrl('g'),
            ..KeyMap::default()
        };
        let mut rt = runtime(Demo::List, keys, Theme::default()).unwrap();
        let footer = crate::tui::panel::footer(&rt.current().unwrap().slot());
        assert!(footer.starts_with("/ search • enter actions • ctrl+g more"));
        assert!(!footer.contains("ctrl+x"));

        rt.handle_key(&ch('H'), Instant::now()).unwrap();
        let slot = rt.current().unwrap().slot();
        assert!(slot.content.iter().any(|l| l.text().starts_with("ctrl+g")));
    }

    #[test]
    fn test_about_leader_opens_link() {
        let mut rt = gallery();
        let now = Instant::now();
        rt.handle_key(&ch('?'), now).unwrap();
        rt.handle_key(&ctrl('x'), now).unwrap();
        let effect = rt.handle_key(&ch('g'), now).unwrap();
        assert_eq!(effect, Effect::Link(PROJECT_URL.to_string()));
    }

    #[test]
    fn test_preview_menu_attaches_todo() {
        let mut rt = runtime(Demo::ActionsDetail, KeyMap::default(), Theme::default()).unwrap();
        rt.handle_key(&ch('v'), Instant::now()).unwrap();
        assert_eq!(rt.detail(), Some("todo"));
        assert!(rt.render(80).unwrap().len() > crate::tui::panel::PANEL_HEIGHT);
    }
}
