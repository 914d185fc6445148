//! Verse text retrieval.
//!
//! The reading itself comes from public Bible APIs: abibliadigital for
//! the Portuguese ACF text, with bible-api.com's Almeida translation as
//! a fallback when the primary is down. Book names are the app's
//! Portuguese names and get mapped to each API's own identifiers.

use serde::Deserialize;
use tracing::warn;

use crate::content::DailyEntry;
use crate::error::{LeituraError, LeituraResult};

const API_URL: &str = "https://www.abibliadigital.com.br/api";
/// Almeida Corrigida Fiel, public domain.
const VERSION: &str = "acf";
const FALLBACK_API_URL: &str = "https://bible-api.com";

/// App book name to abibliadigital abbreviation.
const API_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Gênesis", "gn"), ("Êxodo", "ex"), ("Levítico", "lv"), ("Números", "nm"),
    ("Deuteronômio", "dt"), ("Josué", "js"), ("Juízes", "jz"), ("Rute", "rt"),
    ("1 Samuel", "1sm"), ("2 Samuel", "2sm"), ("1 Reis", "1rs"), ("2 Reis", "2rs"),
    ("1 Crônicas", "1cr"), ("2 Crônicas", "2cr"), ("Esdras", "ed"), ("Neemias", "ne"),
    ("Ester", "et"), ("Jó", "job"), ("Salmos", "sl"), ("Provérbios", "pv"),
    ("Eclesiastes", "ec"), ("Cânticos", "ct"), ("Isaías", "is"), ("Jeremias", "jr"),
    ("Lamentações", "lm"), ("Ezequiel", "ez"), ("Daniel", "dn"), ("Oseias", "os"),
    ("Joel", "jl"), ("Amós", "am"), ("Obadias", "ob"), ("Jonas", "jn"),
    ("Miqueias", "mq"), ("Naum", "na"), ("Habacuque", "hc"), ("Sofonias", "sf"),
    ("Ageu", "ag"), ("Zacarias", "zc"), ("Malaquias", "ml"), ("Mateus", "mt"),
    ("Marcos", "mc"), ("Lucas", "lc"), ("João", "jo"), ("Atos", "at"),
    ("Romanos", "rm"), ("1 Coríntios", "1co"), ("2 Coríntios", "2co"), ("Gálatas", "gl"),
    ("Efésios", "ef"), ("Filipenses", "fp"), ("Colossenses", "cl"),
    ("1 Tessalonicenses", "1ts"), ("2 Tessalonicenses", "2ts"), ("1 Timóteo", "1tm"),
    ("2 Timóteo", "2tm"), ("Tito", "tt"), ("Filemom", "fm"), ("Hebreus", "hb"),
    ("Tiago", "tg"), ("1 Pedro", "1pe"), ("2 Pedro", "2pe"), ("1 João", "1jo"),
    ("2 João", "2jo"), ("3 João", "3jo"), ("Judas", "jd"), ("Apocalipse", "ap"),
];

/// App book name to the English name the fallback API understands.
const ENGLISH_NAMES: &[(&str, &str)] = &[
    ("Gênesis", "Genesis"), ("Êxodo", "Exodus"), ("Levítico", "Leviticus"),
    ("Números", "Numbers"), ("Deuteronômio", "Deuteronomy"), ("Josué", "Joshua"),
    ("Juízes", "Judges"), ("Rute", "Ruth"), ("1 Samuel", "1Samuel"),
    ("2 Samuel", "2Samuel"), ("1 Reis", "1Kings"), ("2 Reis", "2Kings"),
    ("1 Crônicas", "1Chronicles"), ("2 Crônicas", "2Chronicles"), ("Esdras", "Ezra"),
    ("Neemias", "Nehemiah"), ("Ester", "Esther"), ("Jó", "Job"), ("Salmos", "Psalms"),
    ("Provérbios", "Proverbs"), ("Eclesiastes", "Ecclesiastes"),
    ("Cânticos", "Song of Solomon"), ("Isaías", "Isaiah"), ("Jeremias", "Jeremiah"),
    ("Lamentações", "Lamentations"), ("Ezequiel", "Ezekiel"), ("Daniel", "Daniel"),
    ("Oseias", "Hosea"), ("Joel", "Joel"), ("Amós", "Amos"), ("Obadias", "Obadiah"),
    ("Jonas", "Jonah"), ("Miqueias", "Micah"), ("Naum", "Nahum"),
    ("Habacuque", "Habakkuk"), ("Sofonias", "Zephaniah"), ("Ageu", "Haggai"),
    ("Zacarias", "Zechariah"), ("Malaquias", "Malachi"), ("Mateus", "Matthew"),
    ("Marcos", "Mark"), ("Lucas", "Luke"), ("João", "John"), ("Atos", "Acts"),
    ("Romanos", "Romans"), ("1 Coríntios", "1Corinthians"),
    ("2 Coríntios", "2Corinthians"), ("Gálatas", "Galatians"), ("Efésios", "Ephesians"),
    ("Filipenses", "Philippians"), ("Colossenses", "Colossians"),
    ("1 Tessalonicenses", "1Thessalonians"), ("2 Tessalonicenses", "2Thessalonians"),
    ("1 Timóteo", "1Timothy"), ("2 Timóteo", "2Timothy"), ("Tito", "Titus"),
    ("Filemom", "Philemon"), ("Hebreus", "Hebrews"), ("Tiago", "James"),
    ("1 Pedro", "1Peter"), ("2 Pedro", "2Peter"), ("1 João", "1John"),
    ("2 João", "2John"), ("3 João", "3John"), ("Judas", "Jude"),
    ("Apocalipse", "Revelation"),
];

pub fn api_abbreviation(book_name: &str) -> Option<&'static str> {
    API_ABBREVIATIONS
        .iter()
        .find(|(name, _)| *name == book_name)
        .map(|(_, abbrev)| *abbrev)
}

pub fn english_name(book_name: &str) -> Option<&'static str> {
    ENGLISH_NAMES
        .iter()
        .find(|(name, _)| *name == book_name)
        .map(|(_, english)| *english)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibleVerse {
    pub number: u32,
    pub text: String,
}

/// One chapter's worth of verse text, under the app's book name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibleChapter {
    pub book_name: String,
    pub number: u32,
    pub verses: Vec<BibleVerse>,
}

#[derive(Deserialize)]
struct AcfVerse {
    number: u32,
    text: String,
}

#[derive(Deserialize)]
struct AcfChapterResponse {
    verses: Vec<AcfVerse>,
}

#[derive(Deserialize)]
struct AlmeidaVerse {
    verse: u32,
    text: String,
}

#[derive(Deserialize)]
struct AlmeidaChapterResponse {
    verses: Vec<AlmeidaVerse>,
}

fn chapter_from_acf(book_name: &str, number: u32, response: AcfChapterResponse) -> BibleChapter {
    BibleChapter {
        book_name: book_name.to_string(),
        number,
        verses: response
            .verses
            .into_iter()
            .map(|v| BibleVerse {
                number: v.number,
                text: v.text.trim().to_string(),
            })
            .collect(),
    }
}

fn chapter_from_almeida(
    book_name: &str,
    number: u32,
    response: AlmeidaChapterResponse,
) -> BibleChapter {
    BibleChapter {
        book_name: book_name.to_string(),
        number,
        verses: response
            .verses
            .into_iter()
            .map(|v| BibleVerse {
                number: v.verse,
                text: v.text.trim().to_string(),
            })
            .collect(),
    }
}

pub struct BibleClient {
    client: reqwest::Client,
}

impl Default for BibleClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BibleClient {
    pub fn new() -> Self {
        BibleClient {
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_primary(&self, book_name: &str, chapter: u32) -> LeituraResult<BibleChapter> {
        let abbrev = api_abbreviation(book_name)
            .ok_or_else(|| LeituraError::Remote(format!("no abbreviation for '{book_name}'")))?;
        let url = format!("{API_URL}/verses/{VERSION}/{abbrev}/{chapter}");
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: AcfChapterResponse = response.json().await?;
        Ok(chapter_from_acf(book_name, chapter, body))
    }

    async fn fetch_fallback(&self, book_name: &str, chapter: u32) -> LeituraResult<BibleChapter> {
        let english = english_name(book_name).unwrap_or(book_name);
        // almeida is the PT-BR translation on bible-api.com.
        let url = format!("{FALLBACK_API_URL}/{english}+{chapter}?translation=almeida");
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: AlmeidaChapterResponse = response.json().await?;
        Ok(chapter_from_almeida(book_name, chapter, body))
    }

    /// Fetch one chapter's text, falling back to the secondary API when
    /// the primary fails.
    pub async fn fetch_chapter(&self, book_name: &str, chapter: u32) -> LeituraResult<BibleChapter> {
        match self.fetch_primary(book_name, chapter).await {
            Ok(result) => Ok(result),
            Err(err) => {
                warn!("Primary Bible API failed for {book_name} {chapter}, trying fallback: {err}");
                self.fetch_fallback(book_name, chapter).await
            }
        }
    }

    /// Fetch every chapter of a daily reading concurrently. Chapters
    /// that fail on both APIs are skipped, never fatal.
    pub async fn fetch_reading(&self, entry: &DailyEntry) -> Vec<BibleChapter> {
        let fetches = entry
            .chapters_to_read
            .iter()
            .map(|&chapter| self.fetch_chapter(&entry.book_name, chapter));

        futures::future::join_all(fetches)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(chapter) => Some(chapter),
                Err(err) => {
                    warn!("Skipping unavailable chapter of {}: {err}", entry.book_name);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BIBLE_BOOKS;

    #[test]
    fn every_book_maps_to_both_apis() {
        for book in BIBLE_BOOKS {
            assert!(api_abbreviation(book.name).is_some(), "{}", book.name);
            assert!(english_name(book.name).is_some(), "{}", book.name);
        }
        assert_eq!(api_abbreviation("Salmos"), Some("sl"));
        assert_eq!(english_name("Cânticos"), Some("Song of Solomon"));
        assert_eq!(api_abbreviation("Crônicas de Nárnia"), None);
    }

    #[test]
    fn primary_response_parses_into_a_chapter() {
        let body = r#"{
            "book": { "name": "Ester", "author": "Desconhecido", "group": "Históricos" },
            "chapter": { "number": 3, "verses": 2 },
            "verses": [
                { "number": 1, "text": "Depois destas coisas... " },
                { "number": 2, "text": "E todos os servos do rei..." }
            ]
        }"#;
        let response: AcfChapterResponse = serde_json::from_str(body).unwrap();
        let chapter = chapter_from_acf("Ester", 3, response);

        assert_eq!(chapter.book_name, "Ester");
        assert_eq!(chapter.number, 3);
        assert_eq!(chapter.verses.len(), 2);
        assert_eq!(chapter.verses[0].number, 1);
        assert_eq!(chapter.verses[0].text, "Depois destas coisas...");
    }

    #[test]
    fn fallback_response_parses_into_a_chapter() {
        let body = r#"{
            "reference": "Ruth 1",
            "translation_id": "almeida",
            "verses": [
                { "book_id": "RUT", "book_name": "Ruth", "chapter": 1, "verse": 1, "text": "E sucedeu que...\n" }
            ]
        }"#;
        let response: AlmeidaChapterResponse = serde_json::from_str(body).unwrap();
        let chapter = chapter_from_almeida("Rute", 1, response);

        assert_eq!(chapter.book_name, "Rute");
        assert_eq!(chapter.verses[0].number, 1);
        assert_eq!(chapter.verses[0].text, "E sucedeu que...");
    }
}
