//! Per-tick bookkeeping of running tools.
//!
//! One tracker belongs to exactly one script execution: the executor feeds
//! it every successful match in line order, calls `advance_tick()` once per
//! simulated tick, and reads back the active set (in execution-priority
//! order) to apply per-tick effects. A script restart discards the tracker
//! state via `reset()`.

use std::collections::HashMap;
use std::sync::Arc;

use tickscript_types::ActiveTool;

use crate::matcher::ToolMatch;
use crate::registry::ToolRegistry;

/// Tracks which tools are currently running and for how much longer.
#[derive(Debug)]
pub struct ActiveToolTracker {
    registry: Arc<ToolRegistry>,
    /// At most one instance per tool name: re-activation replaces.
    active: HashMap<String, ActiveTool>,
}

impl ActiveToolTracker {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry, active: HashMap::new() }
    }

    /// Apply a successful match to the active set.
    ///
    /// An off match removes the tool's instance (no-op if it wasn't
    /// running). A non-off match on a tracked tool inserts or replaces its
    /// instance, taking the duration from the schema's duration slot; a
    /// missing or non-numeric slot means the tool runs unbounded. One-shot
    /// tools leave the active set untouched.
    pub fn apply(&mut self, matched: &ToolMatch) {
        let Some(schema) = self.registry.get(&matched.tool) else {
            // Matches only come out of this registry; a miss here is a bug
            // in the caller, not in the script.
            debug_assert!(false, "match for uncatalogued tool: {}", matched.tool);
            return;
        };

        if matched.is_off {
            if self.active.remove(&matched.tool).is_some() {
                tracing::debug!(tool = %matched.tool, "tool turned off");
            }
            return;
        }

        if !schema.registers_active_state {
            return;
        }

        let ticks = schema
            .duration_index
            .and_then(|index| matched.args.get(index))
            .and_then(|slot| slot.ticks());
        tracing::debug!(tool = %matched.tool, ticks = ?ticks, "tool activated");
        self.active
            .insert(matched.tool.clone(), ActiveTool::new(matched.tool.as_str(), matched.span, ticks));
    }

    /// Advance one simulated tick: decrement every finite duration and
    /// remove instances that reach zero. Unbounded instances are untouched.
    pub fn advance_tick(&mut self) {
        self.active.retain(|name, tool| match tool.ticks_remaining.as_mut() {
            Some(ticks) => {
                *ticks = ticks.saturating_sub(1);
                if *ticks == 0 {
                    tracing::debug!(tool = %name, "tool expired");
                    false
                } else {
                    true
                }
            }
            None => true,
        });
    }

    /// Whether the named tool is currently running.
    pub fn is_active(&self, tool: &str) -> bool {
        self.active.contains_key(tool)
    }

    /// The running tool for `name`, if any.
    pub fn get(&self, tool: &str) -> Option<&ActiveTool> {
        self.active.get(tool)
    }

    /// Number of running tools.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no tool is running.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Snapshot of the active set, ordered by catalogue priority ascending.
    ///
    /// The executor applies per-tick effects in exactly this order; it is
    /// deterministic for identical active sets regardless of activation
    /// order.
    pub fn active_tools(&self) -> Vec<ActiveTool> {
        let mut tools: Vec<ActiveTool> = self.active.values().cloned().collect();
        tools.sort_by_key(|t| {
            self.registry.get(&t.tool).map(|s| s.priority).unwrap_or(u32::MAX)
        });
        tools
    }

    /// Discard all running tools (script restart, or the `stop` tool).
    pub fn reset(&mut self) {
        if !self.active.is_empty() {
            tracing::debug!(count = self.active.len(), "clearing active tools");
        }
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_invocation;
    use tickscript_types::{Span, Token};

    fn tracker() -> ActiveToolTracker {
        ActiveToolTracker::new(Arc::new(ToolRegistry::with_builtin_tools()))
    }

    fn matched(tracker: &ActiveToolTracker, line: &[&str]) -> ToolMatch {
        let tokens: Vec<Token> = line
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let span = Span::new(0, i as u32 * 10, i as u32 * 10 + text.len() as u32);
                if text.chars().next().is_some_and(|c| c.is_ascii_digit() || c == '-') {
                    Token::number(*text, span)
                } else {
                    Token::word(*text, span)
                }
            })
            .collect();
        match_invocation(&tracker.registry, &tokens[0], &tokens[1..]).unwrap()
    }

    #[test]
    fn test_duration_boundary_is_exact() {
        let mut tracker = tracker();
        let m = matched(&tracker, &["duck", "20"]);
        tracker.apply(&m);

        for _ in 0..19 {
            tracker.advance_tick();
        }
        assert!(tracker.is_active("duck"), "still active after 19 ticks");
        tracker.advance_tick();
        assert!(!tracker.is_active("duck"), "removed exactly on the 20th tick");
    }

    #[test]
    fn test_unbounded_tool_survives_ticks() {
        let mut tracker = tracker();
        tracker.apply(&matched(&tracker, &["strafe", "vec"]));
        for _ in 0..1000 {
            tracker.advance_tick();
        }
        assert!(tracker.is_active("strafe"));
    }

    #[test]
    fn test_off_removes_instance() {
        let mut tracker = tracker();
        tracker.apply(&matched(&tracker, &["duck", "20"]));
        assert!(tracker.is_active("duck"));
        tracker.apply(&matched(&tracker, &["duck", "off"]));
        assert!(!tracker.is_active("duck"));
        // off on an inactive tool is a no-op
        tracker.apply(&matched(&tracker, &["duck", "off"]));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_reactivation_replaces() {
        let mut tracker = tracker();
        tracker.apply(&matched(&tracker, &["duck", "5"]));
        tracker.apply(&matched(&tracker, &["duck", "50"]));
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.get("duck").unwrap().ticks_remaining, Some(50));
    }

    #[test]
    fn test_one_shot_tools_are_not_tracked() {
        let mut tracker = tracker();
        tracker.apply(&matched(&tracker, &["use", "spam"]));
        tracker.apply(&matched(&tracker, &["zoom", "in"]));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_active_tools_ordered_by_priority() {
        let mut tracker = tracker();
        // Activated in reverse priority order on purpose.
        tracker.apply(&matched(&tracker, &["decel", "100"]));
        tracker.apply(&matched(&tracker, &["strafe", "vec"]));
        tracker.apply(&matched(&tracker, &["duck", "20"]));

        let names: Vec<String> =
            tracker.active_tools().into_iter().map(|t| t.tool).collect();
        assert_eq!(names, ["duck", "strafe", "decel"]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut tracker = tracker();
        tracker.apply(&matched(&tracker, &["duck", "20"]));
        tracker.apply(&matched(&tracker, &["strafe", "vec"]));
        tracker.reset();
        assert!(tracker.is_empty());
        assert!(tracker.active_tools().is_empty());
    }
}
