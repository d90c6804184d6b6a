//! Emotion logging and trends

use crate::application::input::parse_assignments;
use crate::domain::{aggregate, EmotionPoint, EmotionReading, EmotionSample, Period};
use crate::error::{LightsError, Result};
use crate::infrastructure::FileSystemRepository;
use chrono::{DateTime, FixedOffset};

pub struct EmotionService {
    repository: FileSystemRepository,
}

impl EmotionService {
    pub fn new(repository: FileSystemRepository) -> Self {
        EmotionService { repository }
    }

    /// Append one sample per `label=intensity` pair, all stamped `now`
    pub fn log(&self, args: &[String], now: DateTime<FixedOffset>) -> Result<Vec<EmotionSample>> {
        if args.is_empty() {
            return Err(LightsError::InvalidInput(
                "No emotion given; pass LABEL=INTENSITY pairs".to_string(),
            ));
        }

        let samples: Vec<EmotionSample> = parse_assignments(args, "emotion sample")?
            .into_iter()
            .map(|(label, intensity)| EmotionSample::new(&label, intensity, now))
            .collect();

        self.repository.append_emotions(&samples)?;
        Ok(samples)
    }

    /// Averages per period; `limit` keeps only the most recent periods
    pub fn trends(&self, period: Period, limit: Option<usize>) -> Result<Vec<EmotionPoint>> {
        let readings: Vec<EmotionReading> = self
            .repository
            .load_emotions()?
            .iter()
            .map(EmotionReading::from)
            .collect();

        let mut points = aggregate(&readings, period);
        if let Some(n) = limit {
            let skip = points.len().saturating_sub(n);
            points.drain(..skip);
        }
        Ok(points)
    }

    pub fn samples(&self) -> Result<Vec<EmotionSample>> {
        self.repository.load_emotions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{Config, JournalRepository};
    use tempfile::TempDir;

    fn at(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    fn service() -> (TempDir, EmotionService) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new("sam")).unwrap();
        (temp, EmotionService::new(repo))
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_log_normalizes_and_persists() {
        let (_temp, service) = service();
        let logged = service
            .log(&args(&["Joy=8", "anxiety=15"]), at("2025-01-17T08:00:00+00:00"))
            .unwrap();
        assert_eq!(logged[0].emotion, "joy");
        assert_eq!(logged[1].intensity, 10);
        assert_eq!(service.samples().unwrap().len(), 2);
    }

    #[test]
    fn test_log_rejects_bad_pairs_without_writing() {
        let (_temp, service) = service();
        assert!(service.log(&args(&["joy=8", "calm"]), at("2025-01-17T08:00:00+00:00")).is_err());
        assert!(service.log(&[], at("2025-01-17T08:00:00+00:00")).is_err());
        assert!(service.samples().unwrap().is_empty());
    }

    #[test]
    fn test_trends_by_day_with_limit() {
        let (_temp, service) = service();
        service.log(&args(&["joy=4"]), at("2025-01-15T08:00:00+00:00")).unwrap();
        service.log(&args(&["joy=6"]), at("2025-01-16T08:00:00+00:00")).unwrap();
        service.log(&args(&["joy=8", "calm=2"]), at("2025-01-17T08:00:00+00:00")).unwrap();
        service.log(&args(&["joy=6"]), at("2025-01-17T20:00:00+00:00")).unwrap();

        let points = service.trends(Period::Day, Some(2)).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].period, "2025-01-16");
        assert_eq!(points[0].scores["calm"], 0.0);
        assert_eq!(points[1].period, "2025-01-17");
        assert_eq!(points[1].scores["joy"], 7.0);
        assert_eq!(points[1].scores["calm"], 2.0);
    }
}
