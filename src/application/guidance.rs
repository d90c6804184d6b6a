//! Prompts and recommendations

use crate::domain::prompts::{focus_chakra, prompt_for};
use crate::domain::recommend::{recommend, Recommendation, RecommendationContext};
use crate::domain::{Chakra, StreakCalculator};
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;
use chrono::NaiveDate;

pub struct GuidanceService {
    repository: FileSystemRepository,
}

impl GuidanceService {
    pub fn new(repository: FileSystemRepository) -> Self {
        GuidanceService { repository }
    }

    /// Today's prompt, focused on `chakra` or on the profile's weakest chakra
    pub fn prompt(&self, today: NaiveDate, chakra: Option<Chakra>) -> Result<(Chakra, &'static str)> {
        let chakra = match chakra {
            Some(c) => c,
            None => focus_chakra(today, &self.repository.load_profile()?),
        };
        Ok((chakra, prompt_for(today, chakra)))
    }

    pub fn recommendations(&self, today: NaiveDate) -> Result<Vec<Recommendation>> {
        let profile = self.repository.load_profile()?;
        let samples = self.repository.load_emotions()?;
        let entries: Vec<_> = self
            .repository
            .list_entries()?
            .into_iter()
            .map(|stored| stored.entry)
            .collect();
        let journaled_today = StreakCalculator::new(today).summarize(&entries).journaled_today;

        Ok(recommend(&RecommendationContext {
            today,
            profile: &profile,
            samples: &samples,
            journaled_today,
        }))
    }
}
