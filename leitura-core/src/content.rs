//! Static plan content and pacing math.
//!
//! Everything here is pure table lookup and arithmetic: which plan day
//! a calendar date falls on, and which book/chapters a plan day covers.
//! The sync engine itself only ever sees day-numbers; this module is
//! what the UI uses to turn them into readings.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::error::{LeituraError, LeituraResult};
use crate::plan::PlanSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BibleBook {
    pub name: &'static str,
    pub chapters: u32,
}

/// The 66 books in canonical order with chapter counts.
pub const BIBLE_BOOKS: &[BibleBook] = &[
    BibleBook { name: "Gênesis", chapters: 50 },
    BibleBook { name: "Êxodo", chapters: 40 },
    BibleBook { name: "Levítico", chapters: 27 },
    BibleBook { name: "Números", chapters: 36 },
    BibleBook { name: "Deuteronômio", chapters: 34 },
    BibleBook { name: "Josué", chapters: 24 },
    BibleBook { name: "Juízes", chapters: 21 },
    BibleBook { name: "Rute", chapters: 4 },
    BibleBook { name: "1 Samuel", chapters: 31 },
    BibleBook { name: "2 Samuel", chapters: 24 },
    BibleBook { name: "1 Reis", chapters: 22 },
    BibleBook { name: "2 Reis", chapters: 25 },
    BibleBook { name: "1 Crônicas", chapters: 29 },
    BibleBook { name: "2 Crônicas", chapters: 36 },
    BibleBook { name: "Esdras", chapters: 10 },
    BibleBook { name: "Neemias", chapters: 13 },
    BibleBook { name: "Ester", chapters: 10 },
    BibleBook { name: "Jó", chapters: 42 },
    BibleBook { name: "Salmos", chapters: 150 },
    BibleBook { name: "Provérbios", chapters: 31 },
    BibleBook { name: "Eclesiastes", chapters: 12 },
    BibleBook { name: "Cânticos", chapters: 8 },
    BibleBook { name: "Isaías", chapters: 66 },
    BibleBook { name: "Jeremias", chapters: 52 },
    BibleBook { name: "Lamentações", chapters: 5 },
    BibleBook { name: "Ezequiel", chapters: 48 },
    BibleBook { name: "Daniel", chapters: 12 },
    BibleBook { name: "Oseias", chapters: 14 },
    BibleBook { name: "Joel", chapters: 3 },
    BibleBook { name: "Amós", chapters: 9 },
    BibleBook { name: "Obadias", chapters: 1 },
    BibleBook { name: "Jonas", chapters: 4 },
    BibleBook { name: "Miqueias", chapters: 7 },
    BibleBook { name: "Naum", chapters: 3 },
    BibleBook { name: "Habacuque", chapters: 3 },
    BibleBook { name: "Sofonias", chapters: 3 },
    BibleBook { name: "Ageu", chapters: 2 },
    BibleBook { name: "Zacarias", chapters: 14 },
    BibleBook { name: "Malaquias", chapters: 4 },
    BibleBook { name: "Mateus", chapters: 28 },
    BibleBook { name: "Marcos", chapters: 16 },
    BibleBook { name: "Lucas", chapters: 24 },
    BibleBook { name: "João", chapters: 21 },
    BibleBook { name: "Atos", chapters: 28 },
    BibleBook { name: "Romanos", chapters: 16 },
    BibleBook { name: "1 Coríntios", chapters: 16 },
    BibleBook { name: "2 Coríntios", chapters: 13 },
    BibleBook { name: "Gálatas", chapters: 6 },
    BibleBook { name: "Efésios", chapters: 6 },
    BibleBook { name: "Filipenses", chapters: 4 },
    BibleBook { name: "Colossenses", chapters: 4 },
    BibleBook { name: "1 Tessalonicenses", chapters: 5 },
    BibleBook { name: "2 Tessalonicenses", chapters: 3 },
    BibleBook { name: "1 Timóteo", chapters: 6 },
    BibleBook { name: "2 Timóteo", chapters: 4 },
    BibleBook { name: "Tito", chapters: 3 },
    BibleBook { name: "Filemom", chapters: 1 },
    BibleBook { name: "Hebreus", chapters: 13 },
    BibleBook { name: "Tiago", chapters: 5 },
    BibleBook { name: "1 Pedro", chapters: 5 },
    BibleBook { name: "2 Pedro", chapters: 3 },
    BibleBook { name: "1 João", chapters: 5 },
    BibleBook { name: "2 João", chapters: 1 },
    BibleBook { name: "3 João", chapters: 1 },
    BibleBook { name: "Judas", chapters: 1 },
    BibleBook { name: "Apocalipse", chapters: 22 },
];

pub fn book_by_name(name: &str) -> Option<&'static BibleBook> {
    BIBLE_BOOKS.iter().find(|b| b.name == name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingPlan {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub days: u32,
    /// Books covered by the plan; empty means the whole Bible.
    pub books: &'static [&'static str],
}

/// The fixed plan catalog. The custom plan is not listed here since its
/// book and duration come from the user's `CustomPlanConfig`.
pub const READING_PLANS: &[ReadingPlan] = &[
    ReadingPlan {
        id: "whole_bible",
        label: "Bíblia Completa",
        description: "Gênesis a Apocalipse em 1 ano (365 dias).",
        days: 365,
        books: &[],
    },
    ReadingPlan {
        id: "pentateuch",
        label: "Pentateuco",
        description: "Os 5 livros da Lei: Gênesis a Deuteronômio.",
        days: 90,
        books: &["Gênesis", "Êxodo", "Levítico", "Números", "Deuteronômio"],
    },
    ReadingPlan {
        id: "historical",
        label: "Livros Históricos",
        description: "A história de Israel: Josué a Ester.",
        days: 90,
        books: &[
            "Josué", "Juízes", "Rute", "1 Samuel", "2 Samuel", "1 Reis", "2 Reis", "1 Crônicas",
            "2 Crônicas", "Esdras", "Neemias", "Ester",
        ],
    },
    ReadingPlan {
        id: "poetic",
        label: "Sapienciais e Poéticos",
        description: "Sabedoria e Salmos: Jó a Cânticos.",
        days: 60,
        books: &["Jó", "Salmos", "Provérbios", "Eclesiastes", "Cânticos"],
    },
    ReadingPlan {
        id: "prophetic",
        label: "Livros Proféticos",
        description: "Mensagens dos Profetas: Isaías a Malaquias.",
        days: 90,
        books: &[
            "Isaías", "Jeremias", "Lamentações", "Ezequiel", "Daniel", "Oseias", "Joel", "Amós",
            "Obadias", "Jonas", "Miqueias", "Naum", "Habacuque", "Sofonias", "Ageu", "Zacarias",
            "Malaquias",
        ],
    },
    ReadingPlan {
        id: "gospels",
        label: "Evangelhos",
        description: "Vida de Jesus: Mateus, Marcos, Lucas e João.",
        days: 45,
        books: &["Mateus", "Marcos", "Lucas", "João"],
    },
    ReadingPlan {
        id: "acts",
        label: "Atos dos Apóstolos",
        description: "O início da Igreja Primitiva.",
        days: 14,
        books: &["Atos"],
    },
    ReadingPlan {
        id: "epistles",
        label: "Cartas (Epístolas)",
        description: "Doutrina para a Igreja: Romanos a Judas.",
        days: 60,
        books: &[
            "Romanos", "1 Coríntios", "2 Coríntios", "Gálatas", "Efésios", "Filipenses",
            "Colossenses", "1 Tessalonicenses", "2 Tessalonicenses", "1 Timóteo", "2 Timóteo",
            "Tito", "Filemom", "Hebreus", "Tiago", "1 Pedro", "2 Pedro", "1 João", "2 João",
            "3 João", "Judas",
        ],
    },
    ReadingPlan {
        id: "revelation",
        label: "Apocalipse",
        description: "A revelação do fim dos tempos.",
        days: 14,
        books: &["Apocalipse"],
    },
    ReadingPlan {
        id: "new_testament",
        label: "Novo Testamento Completo",
        description: "De Mateus a Apocalipse.",
        days: 120,
        books: &[
            "Mateus", "Marcos", "Lucas", "João", "Atos", "Romanos", "1 Coríntios", "2 Coríntios",
            "Gálatas", "Efésios", "Filipenses", "Colossenses", "1 Tessalonicenses",
            "2 Tessalonicenses", "1 Timóteo", "2 Timóteo", "Tito", "Filemom", "Hebreus", "Tiago",
            "1 Pedro", "2 Pedro", "1 João", "2 João", "3 João", "Judas", "Apocalipse",
        ],
    },
    ReadingPlan {
        id: "old_testament",
        label: "Antigo Testamento Completo",
        description: "De Gênesis a Malaquias.",
        days: 260,
        books: &[
            "Gênesis", "Êxodo", "Levítico", "Números", "Deuteronômio", "Josué", "Juízes", "Rute",
            "1 Samuel", "2 Samuel", "1 Reis", "2 Reis", "1 Crônicas", "2 Crônicas", "Esdras",
            "Neemias", "Ester", "Jó", "Salmos", "Provérbios", "Eclesiastes", "Cânticos", "Isaías",
            "Jeremias", "Lamentações", "Ezequiel", "Daniel", "Oseias", "Joel", "Amós", "Obadias",
            "Jonas", "Miqueias", "Naum", "Habacuque", "Sofonias", "Ageu", "Zacarias", "Malaquias",
        ],
    },
];

pub fn plan_by_id(id: &str) -> Option<&'static ReadingPlan> {
    READING_PLANS.iter().find(|p| p.id == id)
}

/// Like `plan_by_id`, but an unknown id is an error the caller can show.
pub fn require_plan(id: &str) -> LeituraResult<&'static ReadingPlan> {
    plan_by_id(id).ok_or_else(|| LeituraError::PlanNotFound(id.to_string()))
}

/// Which plan day (1-based) a calendar date falls on, given the plan's
/// start date. May be <= 0 before the start, or past the plan length.
pub fn plan_day_for_date(target: NaiveDate, start: NaiveDate) -> i64 {
    (target - start).num_days() + 1
}

/// Total length of the selected plan in days.
pub fn total_days(selection: &PlanSelection) -> u32 {
    match selection {
        PlanSelection::Custom(config) => config.days.max(1),
        other => plan_by_id(other.plan_id())
            .map(|p| p.days)
            // Unknown plan ids pace like the whole-Bible plan.
            .unwrap_or(365),
    }
}

/// Whether a day-number addresses a real day of the selected plan.
pub fn day_in_plan(day: u32, selection: &PlanSelection) -> bool {
    day >= 1 && day <= total_days(selection)
}

/// The reading assigned to one plan day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEntry {
    /// Plan day after clamping into 1..=total_days.
    pub day: u32,
    pub date: NaiveDate,
    pub book_name: String,
    pub start_chapter: u32,
    pub end_chapter: u32,
    pub chapters_to_read: Vec<u32>,
    /// Human-readable range, e.g. "Salmos 3-5" or "Rute 4 - 1 Samuel 2".
    pub reading_range: String,
}

fn active_books(selection: &PlanSelection) -> Vec<BibleBook> {
    match selection {
        PlanSelection::Custom(config) => book_by_name(&config.book_name)
            .map(|b| vec![*b])
            // An unknown book still yields a 1-chapter placeholder so
            // the entry math stays total.
            .unwrap_or_else(|| {
                vec![BibleBook {
                    name: "Gênesis",
                    chapters: 1,
                }]
            }),
        other => {
            let names = plan_by_id(other.plan_id()).map(|p| p.books).unwrap_or(&[]);
            if names.is_empty() {
                BIBLE_BOOKS.to_vec()
            } else {
                BIBLE_BOOKS
                    .iter()
                    .filter(|b| names.contains(&b.name))
                    .copied()
                    .collect()
            }
        }
    }
}

/// Locate the book and chapter that a cumulative chapter number lands
/// on within the given book list.
fn book_and_chapter(cumulative: u32, books: &[BibleBook]) -> (String, u32) {
    let mut remaining = cumulative;
    for book in books {
        if remaining <= book.chapters {
            return (book.name.to_string(), remaining);
        }
        remaining -= book.chapters;
    }
    let last = books.last().expect("book list is never empty");
    (last.name.to_string(), last.chapters)
}

/// Compute the reading for a plan day, clamping the day into range.
pub fn entry_for_day(day_of_plan: i64, selection: &PlanSelection, start: NaiveDate) -> DailyEntry {
    let max_days = total_days(selection);
    let day = day_of_plan.clamp(1, max_days as i64) as u32;

    let books = active_books(selection);
    let total_chapters: u32 = books.iter().map(|b| b.chapters).sum();

    // Cumulative chapter window for this day: day d covers chapters
    // floor((d-1) * total / len) + 1 ..= floor(d * total / len).
    let start_cumulative =
        ((day as u64 - 1) * total_chapters as u64 / max_days as u64) as u32 + 1;
    let end_cumulative = (day as u64 * total_chapters as u64 / max_days as u64) as u32;

    let start_cumulative = start_cumulative.min(total_chapters);
    let end_cumulative = end_cumulative.min(total_chapters).max(start_cumulative);

    let (start_book, start_chapter) = book_and_chapter(start_cumulative, &books);
    let (end_book, end_chapter) = book_and_chapter(end_cumulative, &books);

    let (chapters_to_read, reading_range) = if start_book == end_book {
        (
            (start_chapter..=end_chapter).collect(),
            format!("{start_book} {start_chapter}-{end_chapter}"),
        )
    } else {
        // A day spanning two books only lists the first chapter; the
        // range string still shows the full span.
        (
            vec![start_chapter],
            format!("{start_book} {start_chapter} - {end_book} {end_chapter}"),
        )
    };

    DailyEntry {
        day,
        date: start + Duration::days(day as i64 - 1),
        book_name: start_book,
        start_chapter,
        end_chapter,
        chapters_to_read,
        reading_range,
    }
}

/// Completion percentage over the plan, ignoring day-numbers beyond the
/// plan length (stale entries from a longer plan's bucket).
pub fn completion_percent(completed: &BTreeSet<u32>, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let valid = completed.iter().filter(|&&d| d >= 1 && d <= total).count() as u32;
    (valid * 100) / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::CustomPlanConfig;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plan_day_is_one_on_the_start_date() {
        let start = date(2026, 1, 1);
        assert_eq!(plan_day_for_date(start, start), 1);
        assert_eq!(plan_day_for_date(date(2026, 1, 10), start), 10);
    }

    #[test]
    fn plan_day_is_nonpositive_before_the_start() {
        let start = date(2026, 3, 1);
        assert_eq!(plan_day_for_date(date(2026, 2, 28), start), 0);
        assert_eq!(plan_day_for_date(date(2026, 2, 20), start), -8);
    }

    #[test]
    fn custom_plan_paces_one_book_over_its_days() {
        let selection = PlanSelection::Custom(CustomPlanConfig {
            book_name: "Ester".to_string(),
            days: 10,
        });
        // 10 chapters over 10 days: one chapter per day.
        let entry = entry_for_day(3, &selection, date(2026, 1, 1));
        assert_eq!(entry.book_name, "Ester");
        assert_eq!(entry.chapters_to_read, vec![3]);
        assert_eq!(entry.reading_range, "Ester 3-3");
        assert_eq!(entry.date, date(2026, 1, 3));
    }

    #[test]
    fn days_outside_the_plan_clamp_to_the_edges() {
        let selection = PlanSelection::Fixed("acts".to_string());
        assert_eq!(entry_for_day(-5, &selection, date(2026, 1, 1)).day, 1);
        assert_eq!(entry_for_day(999, &selection, date(2026, 1, 1)).day, 14);
    }

    #[test]
    fn whole_bible_covers_all_chapters_on_the_last_day() {
        let entry = entry_for_day(365, &PlanSelection::WholeBible, date(2026, 1, 1));
        assert_eq!(entry.book_name, "Apocalipse");
        assert_eq!(entry.end_chapter, 22);
    }

    #[test]
    fn unknown_plan_id_is_a_plan_not_found_error() {
        assert!(require_plan("gospels").is_ok());
        let err = require_plan("marathon").unwrap_err();
        assert!(matches!(err, LeituraError::PlanNotFound(ref id) if id == "marathon"));
    }

    #[test]
    fn day_zero_and_days_past_the_end_are_out_of_plan() {
        let acts = PlanSelection::Fixed("acts".to_string());
        assert!(!day_in_plan(0, &acts));
        assert!(day_in_plan(1, &acts));
        assert!(day_in_plan(14, &acts));
        assert!(!day_in_plan(15, &acts));

        let custom = PlanSelection::Custom(CustomPlanConfig {
            book_name: "Rute".to_string(),
            days: 4,
        });
        assert!(!day_in_plan(0, &custom));
        assert!(!day_in_plan(5, &custom));
    }

    #[test]
    fn completion_percent_ignores_days_past_the_plan_length() {
        let completed: BTreeSet<u32> = [1, 2, 3, 400].into_iter().collect();
        // 3 valid days out of 14.
        assert_eq!(completion_percent(&completed, 14), 21);
        assert_eq!(completion_percent(&BTreeSet::new(), 14), 0);
        assert_eq!(completion_percent(&completed, 0), 0);
    }
}
