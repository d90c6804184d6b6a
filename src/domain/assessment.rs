//! Chakra self-assessment questionnaire

use crate::domain::chakra::{Chakra, ChakraProfile};
use std::collections::BTreeMap;

/// Answer used when a question is skipped
pub const NEUTRAL_ANSWER: u8 = 3;

/// One agreement statement, answered on a 1 (disagree) to 5 (agree) scale
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub chakra: Chakra,
    pub statement: &'static str,
}

pub const QUESTIONS: [Question; 14] = [
    Question { chakra: Chakra::Root, statement: "I feel safe and secure in my daily life." },
    Question { chakra: Chakra::Root, statement: "I feel grounded and connected to my body." },
    Question { chakra: Chakra::Sacral, statement: "I enjoy creative activities and pleasure without guilt." },
    Question { chakra: Chakra::Sacral, statement: "I can feel and express my emotions freely." },
    Question { chakra: Chakra::SolarPlexus, statement: "I trust myself to make decisions." },
    Question { chakra: Chakra::SolarPlexus, statement: "I follow through on what I set out to do." },
    Question { chakra: Chakra::Heart, statement: "I give and receive love easily." },
    Question { chakra: Chakra::Heart, statement: "I am compassionate with myself when I make mistakes." },
    Question { chakra: Chakra::Throat, statement: "I say what I think and feel, even when it is hard." },
    Question { chakra: Chakra::Throat, statement: "I listen to others without planning my reply." },
    Question { chakra: Chakra::ThirdEye, statement: "I trust my intuition." },
    Question { chakra: Chakra::ThirdEye, statement: "I can see situations clearly and imagine solutions." },
    Question { chakra: Chakra::Crown, statement: "I feel connected to something larger than myself." },
    Question { chakra: Chakra::Crown, statement: "My life feels meaningful." },
];

/// Map a mean Likert answer (1-5) onto the chakra scale (1-10)
pub fn likert_to_value(mean: f64) -> i64 {
    let mean = mean.clamp(1.0, 5.0);
    (1.0 + (mean - 1.0) * 9.0 / 4.0).round() as i64
}

/// Collects answers and scores them into a profile
#[derive(Debug, Default)]
pub struct Questionnaire {
    answers: BTreeMap<usize, u8>,
}

impl Questionnaire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn questions(&self) -> &'static [Question] {
        &QUESTIONS
    }

    /// Record the answer for question `index`, clamped into [1, 5]
    pub fn answer(&mut self, index: usize, value: i64) {
        if index < QUESTIONS.len() {
            self.answers.insert(index, value.clamp(1, 5) as u8);
        }
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// Score every chakra; unanswered questions count as neutral
    pub fn score(&self) -> ChakraProfile {
        let mut profile = ChakraProfile::default();

        for chakra in Chakra::ALL {
            let answers: Vec<f64> = QUESTIONS
                .iter()
                .enumerate()
                .filter(|(_, q)| q.chakra == chakra)
                .map(|(i, _)| *self.answers.get(&i).unwrap_or(&NEUTRAL_ANSWER) as f64)
                .collect();
            let mean = answers.iter().sum::<f64>() / answers.len().max(1) as f64;
            profile.set(chakra, likert_to_value(mean));
        }

        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_chakra_has_questions() {
        for chakra in Chakra::ALL {
            assert!(QUESTIONS.iter().any(|q| q.chakra == chakra));
        }
    }

    #[test]
    fn test_likert_mapping_endpoints() {
        assert_eq!(likert_to_value(1.0), 1);
        assert_eq!(likert_to_value(5.0), 10);
        assert_eq!(likert_to_value(3.0), 6);
        assert_eq!(likert_to_value(0.0), 1);
        assert_eq!(likert_to_value(9.0), 10);
    }

    #[test]
    fn test_unanswered_quiz_scores_neutral() {
        let profile = Questionnaire::new().score();
        assert!(profile.readings().iter().all(|r| r.value == 6));
    }

    #[test]
    fn test_scores_per_chakra() {
        let mut quiz = Questionnaire::new();
        quiz.answer(0, 1);
        quiz.answer(1, 2);
        quiz.answer(6, 5);
        quiz.answer(7, 5);
        let profile = quiz.score();
        // mean 1.5 -> 1 + 0.5 * 2.25 = 2.125
        assert_eq!(profile.root, 2);
        assert_eq!(profile.heart, 10);
        assert_eq!(quiz.answered(), 4);
    }

    #[test]
    fn test_answers_are_clamped_and_bounded() {
        let mut quiz = Questionnaire::new();
        quiz.answer(0, 42);
        quiz.answer(1, 42);
        quiz.answer(99, 1);
        assert_eq!(quiz.answered(), 2);
        assert_eq!(quiz.score().root, 10);
    }
}
