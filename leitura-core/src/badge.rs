//! Achievement badges.
//!
//! Badges unlock when the streak crosses a threshold and are never
//! revoked, even if the streak later drops.

/// A streak achievement definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub days_required: u32,
}

/// Catalog of streak badges, ordered by threshold.
pub const ACHIEVEMENT_BADGES: &[Badge] = &[
    Badge {
        id: "streak_7",
        label: "Início Firme",
        description: "Completou 7 dias de leitura consecutiva.",
        days_required: 7,
    },
    Badge {
        id: "streak_30",
        label: "Hábito Criado",
        description: "Alcançou 30 dias seguidos de devocional.",
        days_required: 30,
    },
    Badge {
        id: "streak_100",
        label: "Centenário",
        description: "Uma jornada incrível de 100 dias na Palavra.",
        days_required: 100,
    },
    Badge {
        id: "streak_365",
        label: "Bíblia Completa",
        description: "Você leu a Bíblia toda em um ano!",
        days_required: 365,
    },
];

pub fn badge_by_id(id: &str) -> Option<&'static Badge> {
    ACHIEVEMENT_BADGES.iter().find(|b| b.id == id)
}

/// Badges whose threshold the given streak has crossed and which are
/// not already in the unlocked set.
pub fn newly_unlocked(streak: u32, unlocked: &[String]) -> Vec<&'static Badge> {
    ACHIEVEMENT_BADGES
        .iter()
        .filter(|badge| streak >= badge.days_required && !unlocked.iter().any(|u| u == badge.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_unlocks_below_the_first_threshold() {
        assert!(newly_unlocked(6, &[]).is_empty());
    }

    #[test]
    fn crossing_a_threshold_unlocks_exactly_that_badge() {
        let unlocked = newly_unlocked(7, &[]);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "streak_7");
    }

    #[test]
    fn a_long_streak_unlocks_every_badge_up_to_it() {
        let ids: Vec<_> = newly_unlocked(100, &[]).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["streak_7", "streak_30", "streak_100"]);
    }

    #[test]
    fn already_unlocked_badges_are_not_reported_again() {
        let have = vec!["streak_7".to_string()];
        let ids: Vec<_> = newly_unlocked(30, &have).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["streak_30"]);
    }
}
