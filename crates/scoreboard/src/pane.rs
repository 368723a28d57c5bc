//! One viewer's scoreboard pane and the minimal-update line diff
//!
//! A pane mirrors what the host currently shows to a single viewer: the
//! sidebar title, the ordered sidebar lines with their rank scores, and one
//! team whose entries share display options. Each mutation returns the
//! [`PaneDelta`] that brings the host's copy in line with the pane.
//!
//! ## Line scores
//!
//! Line `i` of an `n`-line update is written with score `n - i`, so the
//! first line renders at the top of a descending-score sidebar. Line text is
//! the update key, so repeated texts are made unique by appending
//! [`RESET_MARKER`] until no earlier line in the same update matches.
//!
//! ## Diff
//!
//! ```text
//! 1. score every new line, disambiguating duplicates
//! 2. previous lines missing from the new set  -> ResetScore
//! 3. retained lines whose on-screen state is still valid -> elided
//! 4. everything else                           -> SetScore
//! 5. emit removals first, then writes (top to bottom)
//! ```
//!
//! A retained line is elided when its on-screen score already equals its new
//! score, or when it kept its position and the resulting on-screen order
//! (elided lines keeping their old scores) is still strictly descending. If
//! positional elision would break the order, only exact-score elision is used.

use arcade_core::{PaneDelta, PaneOp, TeamOption, RESET_MARKER};
use std::collections::{BTreeSet, HashMap};

/// A single viewer's scoreboard state
#[derive(Debug, Clone, Default)]
pub struct DisplayPane {
    title: Option<String>,
    /// Disambiguated lines of the last update, top first
    lines: Vec<String>,
    /// Score currently on screen for each line in `lines`
    scores: HashMap<String, i32>,
    entries: BTreeSet<String>,
    /// Options already pushed to the host; absent means never pushed
    options: HashMap<TeamOption, bool>,
}

impl DisplayPane {
    /// An empty pane with nothing pushed yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines of the last update, top first, after disambiguation
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Score currently on screen for a line
    pub fn score_of(&self, line: &str) -> Option<i32> {
        self.scores.get(line).copied()
    }

    /// On-screen lines with their scores, highest score first
    pub fn rendered(&self) -> Vec<(String, i32)> {
        let mut rendered: Vec<(String, i32)> = self
            .scores
            .iter()
            .map(|(line, score)| (line.clone(), *score))
            .collect();
        rendered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rendered
    }

    /// Current sidebar title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Team entries on this pane
    pub fn entries(&self) -> &BTreeSet<String> {
        &self.entries
    }

    /// Whether a display name is a team entry on this pane
    pub fn has_entry(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    /// The value last pushed for a team option
    pub fn option(&self, option: TeamOption) -> Option<bool> {
        self.options.get(&option).copied()
    }

    /// Change the sidebar title
    pub fn set_title(&mut self, title: impl Into<String>) -> PaneDelta {
        let title = title.into();
        let mut delta = PaneDelta::new();
        if self.title.as_deref() != Some(title.as_str()) {
            self.title = Some(title.clone());
            delta.push(PaneOp::SetTitle { title });
        }
        delta
    }

    /// Set a team option; emits nothing if the host already has this value
    pub fn set_option(&mut self, option: TeamOption, enabled: bool) -> PaneDelta {
        let mut delta = PaneDelta::new();
        if self.options.insert(option, enabled) != Some(enabled) {
            delta.push(PaneOp::SetOption { option, enabled });
        }
        delta
    }

    /// Push an option and every team entry regardless of the mirror
    ///
    /// Repairs a host copy that drifted from this pane. Adding an entry the
    /// host already has is a no-op on the host side.
    pub fn reassert(&mut self, option: TeamOption, enabled: bool) -> PaneDelta {
        self.options.insert(option, enabled);
        let mut delta = PaneDelta::new();
        delta.push(PaneOp::SetOption { option, enabled });
        for name in &self.entries {
            delta.push(PaneOp::AddEntry { name: name.clone() });
        }
        delta
    }

    /// Add a display name to the team; emits nothing if already present
    pub fn add_entry(&mut self, name: &str) -> PaneDelta {
        let mut delta = PaneDelta::new();
        if self.entries.insert(name.to_string()) {
            delta.push(PaneOp::AddEntry {
                name: name.to_string(),
            });
        }
        delta
    }

    /// Remove a display name from the team; emits nothing if absent
    pub fn remove_entry(&mut self, name: &str) -> PaneDelta {
        let mut delta = PaneDelta::new();
        if self.entries.remove(name) {
            delta.push(PaneOp::RemoveEntry {
                name: name.to_string(),
            });
        }
        delta
    }

    /// Replace the sidebar lines, returning the minimal update
    pub fn set_lines<I, S>(&mut self, lines: I) -> PaneDelta
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let count = lines.len() as i32;

        let mut next: HashMap<String, i32> = HashMap::with_capacity(lines.len());
        for (i, line) in lines.iter_mut().enumerate() {
            while next.contains_key(line.as_str()) {
                line.push_str(RESET_MARKER);
            }
            next.insert(line.clone(), count - i as i32);
        }

        let removals: Vec<String> = self
            .lines
            .iter()
            .filter(|line| !next.contains_key(line.as_str()))
            .cloned()
            .collect();

        let elided = self.elided(&lines, &next);

        let mut delta = PaneDelta::new();
        for line in removals {
            self.scores.remove(&line);
            delta.push(PaneOp::ResetScore { line });
        }
        for line in &lines {
            if elided.contains(line.as_str()) {
                continue;
            }
            let score = next[line.as_str()];
            self.scores.insert(line.clone(), score);
            delta.push(PaneOp::SetScore {
                line: line.clone(),
                score,
            });
        }
        self.lines = lines;
        delta
    }

    /// Retained lines that need no write
    fn elided<'a>(&self, lines: &'a [String], next: &HashMap<String, i32>) -> BTreeSet<&'a str> {
        let previous_position: HashMap<&str, usize> = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line.as_str(), i))
            .collect();

        let exact: BTreeSet<&str> = lines
            .iter()
            .filter(|line| self.scores.get(line.as_str()) == next.get(line.as_str()))
            .map(String::as_str)
            .collect();

        let positional: BTreeSet<&str> = lines
            .iter()
            .enumerate()
            .filter(|(i, line)| {
                previous_position.get(line.as_str()) == Some(i) && self.scores.contains_key(line.as_str())
            })
            .map(|(_, line)| line.as_str())
            .collect();

        let candidate: BTreeSet<&str> = exact.union(&positional).copied().collect();
        let order_holds = lines
            .iter()
            .map(|line| {
                if candidate.contains(line.as_str()) {
                    self.scores[line.as_str()]
                } else {
                    next[line.as_str()]
                }
            })
            .collect::<Vec<i32>>()
            .windows(2)
            .all(|pair| pair[0] > pair[1]);

        if order_holds {
            candidate
        } else {
            exact
        }
    }
}
