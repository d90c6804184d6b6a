//! Guided journaling prompts

use crate::domain::chakra::{Chakra, ChakraProfile};
use chrono::{Datelike, NaiveDate};

fn prompts(chakra: Chakra) -> &'static [&'static str] {
    match chakra {
        Chakra::Root => &[
            "Where in your life do you feel most at home right now?",
            "What is one small thing that would help you feel more secure this week?",
            "Describe a moment today when you felt fully present in your body.",
        ],
        Chakra::Sacral => &[
            "What brought you pleasure today, however small?",
            "Which emotion have you been holding back, and what would it say?",
            "If you had a free afternoon to create anything, what would you make?",
        ],
        Chakra::SolarPlexus => &[
            "What is one decision you made recently that you are proud of?",
            "Where are you giving your power away, and how could you take it back?",
            "What would you attempt if you knew you could not fail?",
        ],
        Chakra::Heart => &[
            "Who made you feel cared for recently, and how?",
            "What would you say to a friend going through what you are going through?",
            "List three things you are grateful for today.",
        ],
        Chakra::Throat => &[
            "What truth have you been wanting to speak?",
            "When did you last feel truly heard?",
            "Write a letter you will never send.",
        ],
        Chakra::ThirdEye => &[
            "What is your intuition telling you that your mind keeps arguing with?",
            "Describe a recent dream or image that has stayed with you.",
            "What pattern keeps repeating in your life?",
        ],
        Chakra::Crown => &[
            "What gives your life meaning right now?",
            "When did you last feel awe?",
            "What would you like to let go of to feel lighter?",
        ],
    }
}

/// Deterministic prompt for a given day and chakra
pub fn prompt_for(date: NaiveDate, chakra: Chakra) -> &'static str {
    let options = prompts(chakra);
    options[date.ordinal0() as usize % options.len()]
}

/// Chakra to focus on: the weakest assessed one, or a daily rotation when unassessed
pub fn focus_chakra(date: NaiveDate, profile: &ChakraProfile) -> Chakra {
    if profile.is_unset() {
        Chakra::ALL[date.ordinal0() as usize % Chakra::ALL.len()]
    } else {
        profile.weakest()
    }
}
