//! Battle questions: generated arithmetic and authored free-text

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

/// Number of answer buttons under a generated question
pub const CHOICE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Integer result. Division truncates; the generator only builds exact ones.
    pub fn apply(&self, a: i64, b: i64) -> i64 {
        match self {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
            Operator::Div if b == 0 => 0,
            Operator::Div => a / b,
        }
    }
}

/// Multiple-choice arithmetic question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub answer: i64,
    /// Shuffled, unique, always contains `answer`
    pub choices: Vec<i64>,
}

impl Question {
    pub fn is_correct(&self, choice: i64) -> bool {
        choice == self.answer
    }

    /// Index of the correct button
    pub fn correct_choice(&self) -> Option<usize> {
        self.choices.iter().position(|&c| c == self.answer)
    }
}

/// Player-authored question answered by typing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomQuestion {
    pub question: String,
    pub answer: String,
}

impl CustomQuestion {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Case-insensitive match ignoring surrounding whitespace
    pub fn is_correct(&self, typed: &str) -> bool {
        normalize(typed) == normalize(&self.answer)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Procedural arithmetic questions
pub struct QuestionGenerator;

impl QuestionGenerator {
    /// Operators available at a difficulty; division starts at 2
    pub fn operators(difficulty: u32) -> &'static [Operator] {
        match difficulty {
            0 | 1 => &[Operator::Add, Operator::Sub, Operator::Mul],
            _ => &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div],
        }
    }

    /// Inclusive operand range at a difficulty
    pub fn operand_range(difficulty: u32) -> (i64, i64) {
        match difficulty {
            0 | 1 => (1, 10),
            2 => (1, 20),
            _ => (1, 100),
        }
    }

    pub fn generate(difficulty: u32, rng: &mut impl Rng) -> Question {
        let op = Self::operators(difficulty)
            .choose(rng)
            .copied()
            .unwrap_or(Operator::Add);
        let (lo, hi) = Self::operand_range(difficulty);

        let (a, b) = if op == Operator::Div {
            // dividend = divisor * quotient so the answer is whole
            let divisor = rng.random_range(1..=10);
            let quotient = rng.random_range(1..=10);
            (divisor * quotient, divisor)
        } else {
            (rng.random_range(lo..=hi), rng.random_range(lo..=hi))
        };

        Self::generate_with(op, a, b, rng)
    }

    /// Question for fixed operands; only the choices are random
    pub fn generate_with(op: Operator, a: i64, b: i64, rng: &mut impl Rng) -> Question {
        let answer = op.apply(a, b);
        Question {
            prompt: format!("What is {a} {} {b}?", op.symbol()),
            answer,
            choices: Self::choices(answer, rng),
        }
    }

    /// The answer plus three distinct nearby wrong answers, shuffled
    fn choices(answer: i64, rng: &mut impl Rng) -> Vec<i64> {
        let spread = (answer.abs() / 2).max(5);
        let mut choices = Vec::with_capacity(CHOICE_COUNT);
        choices.push(answer);
        while choices.len() < CHOICE_COUNT {
            let offset = rng.random_range(1..=spread);
            let wrong = if rng.random_bool(0.5) {
                answer + offset
            } else {
                answer - offset
            };
            if !choices.contains(&wrong) {
                choices.push(wrong);
            }
        }
        choices.shuffle(rng);
        choices
    }
}
