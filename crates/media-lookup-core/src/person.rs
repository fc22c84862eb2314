// Person details for display

use crate::listing::image_url;
use chrono::{Datelike, NaiveDate};
use media_lookup_models::{Gender, TmdbPerson, Translations};
use serde::Serialize;

/// Language used when the configured one has no text
pub const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonSummary {
    pub id: u64,
    pub name: String,
    pub gender: Option<Gender>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub age: Option<i32>,
    pub biography: String,
    pub place_of_birth: Option<String>,
    pub known_for_department: Option<String>,
    pub profile: Option<String>,
    pub images: Vec<String>,
}

impl PersonSummary {
    pub fn from_person(person: &TmdbPerson, today: NaiveDate) -> Self {
        let birthday = person.birthday.clone().filter(|d| !d.is_empty());
        let deathday = person.deathday.clone().filter(|d| !d.is_empty());
        let age = birthday
            .as_deref()
            .and_then(|born| calc_age(born, deathday.as_deref(), today));

        Self {
            id: person.id,
            name: person.name.clone(),
            gender: Gender::from_tmdb(person.gender),
            birthday,
            deathday,
            age,
            biography: fallback_text(person.biography.as_deref(), person.translations.as_ref(), |data| {
                data.biography.as_deref()
            }),
            place_of_birth: person.place_of_birth.clone().filter(|p| !p.is_empty()),
            known_for_department: person.known_for_department.clone(),
            profile: image_url(person.profile_path.as_deref()),
            images: person
                .images
                .profiles
                .iter()
                .filter_map(|image| image_url(image.file_path.as_deref()))
                .collect(),
        }
    }
}

/// Age in whole years at `deathday`, or at `today` while alive
///
/// A bare year (`"1971"`) is accepted and compared by year only.
pub fn calc_age(birthday: &str, deathday: Option<&str>, today: NaiveDate) -> Option<i32> {
    let reference = match deathday {
        Some(day) => parse_partial_date(day)?,
        None => (today.year(), Some((today.month(), today.day()))),
    };
    let born = parse_partial_date(birthday)?;

    let mut age = reference.0 - born.0;
    if let (Some((ref_month, ref_day)), Some((born_month, born_day))) = (reference.1, born.1) {
        if (ref_month, ref_day) < (born_month, born_day) {
            age -= 1;
        }
    }
    Some(age)
}

fn parse_partial_date(date: &str) -> Option<(i32, Option<(u32, u32)>)> {
    let mut parts = date.trim().split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month_day = match (parts.next(), parts.next()) {
        (Some(month), Some(day)) => Some((month.parse().ok()?, day.parse().ok()?)),
        _ => None,
    };
    Some((year, month_day))
}

/// Text in the request language, else the English translation, with `&amp;` unescaped
pub fn fallback_text<F>(value: Option<&str>, translations: Option<&Translations>, field: F) -> String
where
    F: Fn(&media_lookup_models::TranslationData) -> Option<&str>,
{
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        return value.replace("&amp;", "&");
    }

    translations
        .into_iter()
        .flat_map(|t| t.translations.iter())
        .filter(|t| t.iso_639_1 == FALLBACK_LANGUAGE)
        .find_map(|t| field(&t.data).filter(|v| !v.is_empty()))
        .map(|v| v.replace("&amp;", "&"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_lookup_models::{PersonImages, ProfileImage, Translation, TranslationData};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calc_age_before_and_after_birthday() {
        assert_eq!(calc_age("1995-12-27", None, day(2024, 12, 26)), Some(28));
        assert_eq!(calc_age("1995-12-27", None, day(2024, 12, 27)), Some(29));
    }

    #[test]
    fn test_calc_age_uses_deathday() {
        assert_eq!(calc_age("1926-06-01", Some("1962-08-04"), day(2024, 1, 1)), Some(36));
    }

    #[test]
    fn test_calc_age_bare_year_and_garbage() {
        assert_eq!(calc_age("1971", None, day(2024, 1, 1)), Some(53));
        assert_eq!(calc_age("unknown", None, day(2024, 1, 1)), None);
    }

    fn translations(biography: &str) -> Translations {
        Translations {
            translations: vec![
                Translation {
                    iso_639_1: "fr".to_string(),
                    data: TranslationData { overview: None, biography: Some("Acteur".to_string()) },
                },
                Translation {
                    iso_639_1: "en".to_string(),
                    data: TranslationData { overview: None, biography: Some(biography.to_string()) },
                },
            ],
        }
    }

    #[test]
    fn test_fallback_text_prefers_own_value() {
        let text = fallback_text(Some("Schauspieler &amp; Regisseur"), None, |d| d.biography.as_deref());
        assert_eq!(text, "Schauspieler & Regisseur");
    }

    #[test]
    fn test_fallback_text_uses_english_translation() {
        let t = translations("Actor &amp; director");
        assert_eq!(fallback_text(Some(""), Some(&t), |d| d.biography.as_deref()), "Actor & director");
        assert_eq!(fallback_text(None, None, |d| d.biography.as_deref()), "");
    }

    #[test]
    fn test_person_summary() {
        let person = TmdbPerson {
            id: 1190668,
            name: "Timothée Chalamet".to_string(),
            gender: Some(2),
            birthday: Some("1995-12-27".to_string()),
            deathday: None,
            biography: Some(String::new()),
            translations: Some(translations("Actor.")),
            place_of_birth: Some("New York City".to_string()),
            profile_path: Some("/a.jpg".to_string()),
            images: PersonImages {
                profiles: vec![
                    ProfileImage { file_path: Some("/a.jpg".to_string()), width: 500, height: 750 },
                    ProfileImage { file_path: None, width: 0, height: 0 },
                ],
            },
            ..Default::default()
        };
        let summary = PersonSummary::from_person(&person, day(2024, 1, 1));
        assert_eq!(summary.gender, Some(Gender::Male));
        assert_eq!(summary.age, Some(28));
        assert_eq!(summary.biography, "Actor.");
        assert_eq!(summary.profile.as_deref(), Some("https://image.tmdb.org/t/p/original/a.jpg"));
        assert_eq!(summary.images.len(), 1);
    }
}
