//! The `UserProgress` snapshot and its pure transforms.
//!
//! Every mutation of a user's journey goes through one of the
//! transforms below: current snapshot in, new snapshot out. The
//! orchestrator persists the result; nothing here touches storage.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::badge;
use crate::plan::PlanSelection;

/// Consecutive trailing run length of completed plan days.
///
/// `{1,2,3,5,6}` has a streak of 2: the trailing run `5,6`. This counts
/// plan days, not calendar days.
pub fn streak_of(completed: &BTreeSet<u32>) -> u32 {
    let mut iter = completed.iter().rev();
    let Some(&last) = iter.next() else { return 0 };
    let mut streak = 1;
    let mut prev = last;
    for &day in iter {
        if day + 1 != prev {
            break;
        }
        streak += 1;
        prev = day;
    }
    streak
}

/// The complete picture of one user's journey, across every plan
/// context they have ever used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProgress {
    /// Completed day-numbers in the *currently active* context. Always
    /// a copy of `all_progress[selection.context_key()]`.
    pub completed_ids: BTreeSet<u32>,
    /// Completion history per context key; the durable superset.
    pub all_progress: HashMap<String, BTreeSet<u32>>,
    /// Notes per day-number. Not partitioned by context.
    pub notes: BTreeMap<u32, String>,
    pub streak: u32,
    pub unlocked_badges: Vec<String>,
    pub plan_start_date: NaiveDate,
    pub selection: PlanSelection,
    pub last_access: Option<DateTime<Utc>>,
}

impl Default for UserProgress {
    /// Fresh journey: whole-Bible plan starting January 1st of the
    /// current year, nothing completed.
    fn default() -> Self {
        let year = Local::now().year();
        UserProgress {
            completed_ids: BTreeSet::new(),
            all_progress: HashMap::new(),
            notes: BTreeMap::new(),
            streak: 0,
            unlocked_badges: Vec::new(),
            plan_start_date: NaiveDate::from_ymd_opt(year, 1, 1)
                .expect("January 1st exists in every year"),
            selection: PlanSelection::WholeBible,
            last_access: None,
        }
    }
}

/// What a completion toggle changed, for write-through to the remote
/// store.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    pub day: u32,
    /// True if the day is now complete, false if it was un-completed.
    pub completed: bool,
    pub context_key: String,
    pub streak: u32,
    /// Badge ids crossed by this toggle, in catalog order.
    pub newly_unlocked: Vec<String>,
}

impl UserProgress {
    pub fn context_key(&self) -> String {
        self.selection.context_key()
    }

    /// Toggle one day's completion in the active context.
    ///
    /// Recomputes the streak and evaluates badge unlocks. Notes are
    /// left untouched; completion and notes are independent axes.
    pub fn toggle_day(&self, day: u32) -> (UserProgress, ToggleOutcome) {
        let context_key = self.context_key();
        let mut next = self.clone();

        let bucket = next.all_progress.entry(context_key.clone()).or_default();
        let completed = bucket.insert(day);
        if !completed {
            bucket.remove(&day);
        }
        next.completed_ids = bucket.clone();
        next.streak = streak_of(&next.completed_ids);

        let newly_unlocked: Vec<String> = badge::newly_unlocked(next.streak, &next.unlocked_badges)
            .into_iter()
            .map(|b| b.id.to_string())
            .collect();
        next.unlocked_badges.extend(newly_unlocked.iter().cloned());

        let outcome = ToggleOutcome {
            day,
            completed,
            context_key,
            streak: next.streak,
            newly_unlocked,
        };
        (next, outcome)
    }

    pub fn with_note(&self, day: u32, text: impl Into<String>) -> UserProgress {
        let mut next = self.clone();
        next.notes.insert(day, text.into());
        next
    }

    pub fn without_note(&self, day: u32) -> UserProgress {
        let mut next = self.clone();
        next.notes.remove(&day);
        next
    }

    pub fn with_start_date(&self, date: NaiveDate) -> UserProgress {
        let mut next = self.clone();
        next.plan_start_date = date;
        next
    }

    /// Switch the active plan, swapping the visible checklist to the
    /// new context's bucket. History under every other key is kept.
    pub fn with_selection(&self, selection: PlanSelection) -> UserProgress {
        let mut next = self.clone();
        next.selection = selection;
        next.completed_ids = next
            .all_progress
            .get(&next.context_key())
            .cloned()
            .unwrap_or_default();
        next.streak = streak_of(&next.completed_ids);
        next
    }

    /// Re-derive `completed_ids` and the streak from `all_progress`.
    /// Used after reconstructing a snapshot from remote rows.
    pub fn rederive_current_context(&mut self) {
        self.completed_ids = self
            .all_progress
            .get(&self.context_key())
            .cloned()
            .unwrap_or_default();
        self.streak = streak_of(&self.completed_ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::CustomPlanConfig;

    fn custom(book: &str, days: u32) -> PlanSelection {
        PlanSelection::Custom(CustomPlanConfig {
            book_name: book.to_string(),
            days,
        })
    }

    #[test]
    fn streak_of_empty_set_is_zero() {
        assert_eq!(streak_of(&BTreeSet::new()), 0);
    }

    #[test]
    fn streak_of_single_day_is_one() {
        assert_eq!(streak_of(&[1].into_iter().collect()), 1);
    }

    #[test]
    fn streak_counts_only_the_trailing_run() {
        assert_eq!(streak_of(&[1, 2, 3, 5, 6].into_iter().collect()), 2);
        assert_eq!(streak_of(&[1, 2, 3, 4, 5].into_iter().collect()), 5);
        assert_eq!(streak_of(&[3, 9].into_iter().collect()), 1);
    }

    #[test]
    fn toggling_twice_restores_the_original_state() {
        let initial = UserProgress::default();
        let (once, outcome) = initial.toggle_day(7);
        assert!(outcome.completed);
        assert!(once.completed_ids.contains(&7));

        let (twice, outcome) = once.toggle_day(7);
        assert!(!outcome.completed);
        assert_eq!(twice.completed_ids, initial.completed_ids);
        assert_eq!(twice.streak, 0);
    }

    #[test]
    fn toggle_updates_the_active_bucket_and_streak() {
        let mut progress = UserProgress::default();
        for day in [5, 6] {
            progress = progress.toggle_day(day).0;
        }
        assert_eq!(progress.streak, 2);
        assert_eq!(
            progress.all_progress.get("whole_bible").unwrap(),
            &progress.completed_ids
        );
    }

    #[test]
    fn completing_in_one_context_leaves_others_untouched() {
        let progress = UserProgress::default().toggle_day(3).0;
        let in_gospels = progress.with_selection(PlanSelection::Fixed("gospels".to_string()));

        assert!(in_gospels.completed_ids.is_empty());
        assert_eq!(
            in_gospels.all_progress.get("whole_bible").unwrap().len(),
            1
        );

        let back = in_gospels.with_selection(PlanSelection::WholeBible);
        assert!(back.completed_ids.contains(&3));
    }

    #[test]
    fn switching_custom_book_switches_buckets_and_restores_on_return() {
        let mut progress = UserProgress::default().with_selection(custom("Ester", 10));
        for day in 1..=5 {
            progress = progress.toggle_day(day).0;
        }
        assert_eq!(progress.streak, 5);
        let ester: Vec<u32> = progress.completed_ids.iter().copied().collect();
        assert_eq!(ester, vec![1, 2, 3, 4, 5]);

        let in_rute = progress.with_selection(custom("Rute", 4));
        assert!(in_rute.completed_ids.is_empty());
        assert_eq!(in_rute.streak, 0);
        assert_eq!(
            in_rute.all_progress.get("custom_Ester").unwrap().len(),
            5
        );

        let back = in_rute.with_selection(custom("Ester", 10));
        let restored: Vec<u32> = back.completed_ids.iter().copied().collect();
        assert_eq!(restored, vec![1, 2, 3, 4, 5]);
        assert_eq!(back.streak, 5);
    }

    #[test]
    fn badges_unlock_on_streak_and_are_never_revoked() {
        let mut progress = UserProgress::default();
        for day in 1..=7 {
            progress = progress.toggle_day(day).0;
        }
        assert!(progress.unlocked_badges.contains(&"streak_7".to_string()));

        // Breaking the streak keeps the badge.
        for day in 1..=7 {
            progress = progress.toggle_day(day).0;
        }
        assert_eq!(progress.streak, 0);
        assert!(progress.unlocked_badges.contains(&"streak_7".to_string()));
    }

    #[test]
    fn badge_unlock_is_reported_exactly_once() {
        let mut progress = UserProgress::default();
        let mut reported = Vec::new();
        for day in 1..=8 {
            let (next, outcome) = progress.toggle_day(day);
            reported.extend(outcome.newly_unlocked);
            progress = next;
        }
        assert_eq!(reported, vec!["streak_7".to_string()]);
        assert_eq!(
            progress
                .unlocked_badges
                .iter()
                .filter(|b| *b == "streak_7")
                .count(),
            1
        );
    }

    #[test]
    fn notes_and_completion_are_independent() {
        let progress = UserProgress::default().with_note(4, "bom capítulo");
        assert!(progress.completed_ids.is_empty());

        let (toggled, _) = progress.toggle_day(4);
        assert_eq!(toggled.notes.get(&4).map(String::as_str), Some("bom capítulo"));

        let cleared = toggled.without_note(4);
        assert!(cleared.notes.get(&4).is_none());
        assert!(cleared.completed_ids.contains(&4));
    }

    #[test]
    fn notes_survive_a_context_switch() {
        let progress = UserProgress::default()
            .with_note(2, "global")
            .with_selection(custom("Rute", 4));
        assert_eq!(progress.notes.get(&2).map(String::as_str), Some("global"));
    }

    #[test]
    fn snapshot_roundtrips_through_json_with_defaults() {
        let (progress, _) = UserProgress::default()
            .with_selection(custom("Ester", 10))
            .toggle_day(1);
        let json = serde_json::to_string(&progress).unwrap();
        let back: UserProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);

        // Forward-compatible: an empty blob is a default snapshot.
        let minimal: UserProgress = serde_json::from_str("{}").unwrap();
        assert_eq!(minimal.selection, PlanSelection::WholeBible);
        assert_eq!(minimal.streak, 0);
    }
}
