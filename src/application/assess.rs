//! Chakra assessment use cases

use crate::application::input::parse_assignments;
use crate::domain::assessment::Questionnaire;
use crate::domain::{Chakra, ChakraProfile};
use crate::error::{LightsError, Result};
use crate::infrastructure::FileSystemRepository;
use chrono::{DateTime, Utc};
use std::io::{BufRead, Write};

pub struct AssessService {
    repository: FileSystemRepository,
}

impl AssessService {
    pub fn new(repository: FileSystemRepository) -> Self {
        AssessService { repository }
    }

    pub fn profile(&self) -> Result<ChakraProfile> {
        self.repository.load_profile()
    }

    /// Apply `chakra=value` pairs on top of the stored profile and save it.
    /// Unnamed chakras keep their previous value.
    pub fn set_values(&self, args: &[String], now: DateTime<Utc>) -> Result<ChakraProfile> {
        if args.is_empty() {
            return Err(LightsError::InvalidInput(
                "No chakra values given; pass KEY=VALUE pairs or --quiz".to_string(),
            ));
        }

        let mut profile = self.repository.load_profile()?;
        for (key, value) in parse_assignments(args, "chakra value")? {
            let chakra = Chakra::parse(&key)
                .ok_or_else(|| LightsError::InvalidInput(format!("Unknown chakra: '{}'", key)))?;
            profile.set(chakra, value);
        }

        self.save(profile, now)
    }

    /// Ask every question on `output`, read one answer per line from `input`.
    /// Blank or unparseable lines count as skipped; end of input skips the rest.
    pub fn run_quiz<R, W>(&self, mut input: R, output: &mut W, now: DateTime<Utc>) -> Result<ChakraProfile>
    where
        R: BufRead,
        W: Write,
    {
        let mut quiz = Questionnaire::new();
        let total = quiz.questions().len();

        writeln!(output, "Rate each statement from 1 (disagree) to 5 (agree). Leave blank to skip.")?;
        for (index, question) in quiz.questions().iter().enumerate() {
            write!(output, "[{}/{}] {} ", index + 1, total, question.statement)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }
            if let Ok(answer) = line.trim().parse::<i64>() {
                quiz.answer(index, answer);
            }
        }

        log::info!("Quiz finished with {} of {} answers", quiz.answered(), total);
        self.save(quiz.score(), now)
    }

    fn save(&self, mut profile: ChakraProfile, now: DateTime<Utc>) -> Result<ChakraProfile> {
        profile.assessed_at = Some(now);
        self.repository.save_profile(&profile)?;
        Ok(profile)
    }
}
