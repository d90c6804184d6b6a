//! Practice recommendations from chakra balance and recent emotions

use crate::domain::chakra::{Chakra, ChakraProfile, ChakraStatus};
use crate::domain::emotion::{mean_intensity, EmotionSample, HEAVY_EMOTIONS};
use chrono::{Duration, NaiveDate};

/// Average heavy-emotion intensity that triggers a grounding suggestion
pub const HEAVY_EMOTION_THRESHOLD: f64 = 6.0;
/// Days of emotion history considered
pub const EMOTION_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    TakeAssessment,
    Practice {
        chakra: Chakra,
        status: ChakraStatus,
        value: u8,
        suggestion: &'static str,
    },
    Grounding { average: f64 },
    Journal,
}

impl Recommendation {
    pub fn message(&self) -> String {
        match self {
            Recommendation::TakeAssessment => {
                "Take the chakra assessment to get personal practices: lights assess --quiz".to_string()
            }
            Recommendation::Practice {
                chakra,
                status,
                value,
                suggestion,
            } => format!("{} is {} ({}/10). {}", chakra, status, value, suggestion),
            Recommendation::Grounding { average } => format!(
                "Heavy emotions have averaged {:.1}/10 this week. Try five slow breaths, \
                naming five things you can see, then write about what is weighing on you.",
                average
            ),
            Recommendation::Journal => {
                "You have not journaled today yet. Even three sentences keep the streak alive: lights write".to_string()
            }
        }
    }
}

/// Inputs for building recommendations
pub struct RecommendationContext<'a> {
    pub today: NaiveDate,
    pub profile: &'a ChakraProfile,
    pub samples: &'a [EmotionSample],
    pub journaled_today: bool,
}

fn overactive_suggestion(chakra: Chakra) -> &'static str {
    match chakra {
        Chakra::Root | Chakra::Sacral | Chakra::SolarPlexus => {
            "Slow down: swap one demanding task for rest or a gentle walk."
        }
        Chakra::Heart | Chakra::Throat => {
            "Hold a boundary today: listen more, give a little less."
        }
        Chakra::ThirdEye | Chakra::Crown => {
            "Come back into the body: eat something warm, stretch, or walk barefoot."
        }
    }
}

pub fn recommend(ctx: &RecommendationContext<'_>) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if ctx.profile.is_unset() {
        recs.push(Recommendation::TakeAssessment);
    } else {
        let mut off_balance: Vec<_> = ctx
            .profile
            .readings()
            .into_iter()
            .filter(|r| r.status != ChakraStatus::Balanced)
            .collect();
        off_balance.sort_by_key(|r| r.value);

        for reading in off_balance {
            let Some(chakra) = reading.chakra else {
                continue;
            };
            let suggestion = match reading.status {
                ChakraStatus::Overactive => overactive_suggestion(chakra),
                _ => chakra.info().practice,
            };
            recs.push(Recommendation::Practice {
                chakra,
                status: reading.status,
                value: reading.value,
                suggestion,
            });
        }
    }

    let since = ctx.today - Duration::days(EMOTION_WINDOW_DAYS - 1);
    if let Some(average) = mean_intensity(ctx.samples, &HEAVY_EMOTIONS, since) {
        if average >= HEAVY_EMOTION_THRESHOLD {
            recs.push(Recommendation::Grounding { average });
        }
    }

    if !ctx.journaled_today {
        recs.push(Recommendation::Journal);
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    fn sample(label: &str, intensity: i64, raw: &str) -> EmotionSample {
        EmotionSample::new(label, intensity, DateTime::parse_from_rfc3339(raw).unwrap())
    }

    #[test]
    fn test_unset_profile_suggests_assessment() {
        let profile = ChakraProfile::default();
        let recs = recommend(&RecommendationContext {
            today: today(),
            profile: &profile,
            samples: &[],
            journaled_today: true,
        });
        assert_eq!(recs, vec![Recommendation::TakeAssessment]);
    }

    #[test]
    fn test_practices_ordered_lowest_first() {
        let mut profile = ChakraProfile::default();
        profile.set(Chakra::Heart, 3);
        profile.set(Chakra::Root, 2);
        profile.set(Chakra::Crown, 9);
        profile.set(Chakra::Throat, 6);

        let recs = recommend(&RecommendationContext {
            today: today(),
            profile: &profile,
            samples: &[],
            journaled_today: true,
        });

        let chakras: Vec<Chakra> = recs
            .iter()
            .filter_map(|r| match r {
                Recommendation::Practice { chakra, .. } => Some(*chakra),
                _ => None,
            })
            .collect();
        assert_eq!(chakras, vec![Chakra::Root, Chakra::Heart, Chakra::Crown]);
        assert!(recs[2].message().contains("Crown is overactive (9/10)"));
    }

    #[test]
    fn test_heavy_emotions_add_grounding() {
        let mut profile = ChakraProfile::default();
        profile.set(Chakra::Heart, 6);
        let samples = vec![
            sample("anxiety", 8, "2025-01-16T10:00:00+00:00"),
            sample("sadness", 6, "2025-01-17T10:00:00+00:00"),
            sample("anxiety", 1, "2025-01-01T10:00:00+00:00"),
        ];
        let recs = recommend(&RecommendationContext {
            today: today(),
            profile: &profile,
            samples: &samples,
            journaled_today: false,
        });
        assert_eq!(
            recs,
            vec![Recommendation::Grounding { average: 7.0 }, Recommendation::Journal]
        );
    }

    #[test]
    fn test_light_emotions_do_not_trigger_grounding() {
        let mut profile = ChakraProfile::default();
        profile.set(Chakra::Heart, 6);
        let samples = vec![sample("anger", 3, "2025-01-16T10:00:00+00:00")];
        let recs = recommend(&RecommendationContext {
            today: today(),
            profile: &profile,
            samples: &samples,
            journaled_today: true,
        });
        assert!(recs.is_empty());
    }
}
