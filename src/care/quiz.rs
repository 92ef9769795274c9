//! Memory Quiz: multiple-choice questions about family and routine.

use serde::{Deserialize, Serialize};

use super::CareError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Family,
    Routine,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub kind: QuestionKind,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub hint: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: String,
    pub explanation: String,
    /// What the voice says back.
    pub spoken: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizRating {
    Excellent,
    Good,
    KeepPracticing,
}

impl QuizRating {
    /// 80% and up is excellent, 60% and up is good.
    pub fn from_score(score: usize, total: usize) -> Self {
        let percent = percent(score, total);
        if percent >= 80.0 {
            QuizRating::Excellent
        } else if percent >= 60.0 {
            QuizRating::Good
        } else {
            QuizRating::KeepPracticing
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            QuizRating::Excellent => "Excellent! Your memory is sharp!",
            QuizRating::Good => "Good work! Keep practicing!",
            QuizRating::KeepPracticing => "Keep practicing to improve your memory!",
        }
    }

    fn spoken_praise(self) -> &'static str {
        match self {
            QuizRating::Excellent => "Excellent work!",
            QuizRating::Good => "Good job!",
            QuizRating::KeepPracticing => "Keep practicing!",
        }
    }
}

fn percent(score: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        score as f64 * 100.0 / total as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    pub rating: QuizRating,
}

impl QuizSummary {
    pub fn percent(&self) -> f64 {
        percent(self.score, self.total)
    }

    pub fn spoken(&self) -> String {
        format!(
            "Quiz completed! You scored {} out of {}. {}",
            self.score,
            self.total,
            self.rating.spoken_praise()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizStep {
    /// Moved on to the question at this zero-based index.
    Question(usize),
    Finished(QuizSummary),
}

#[derive(Debug, Clone)]
pub struct MemoryQuiz {
    questions: Vec<QuizQuestion>,
    index: usize,
    selected: Option<String>,
    score: usize,
    finished: bool,
}

impl MemoryQuiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let finished = questions.is_empty();
        Self {
            questions,
            index: 0,
            selected: None,
            score: 0,
            finished,
        }
    }

    pub fn sample() -> Self {
        let q = |id: &str,
                 kind,
                 question: &str,
                 options: [&str; 4],
                 correct: &str,
                 hint: &str,
                 explanation: &str| QuizQuestion {
            id: id.to_string(),
            kind,
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct.to_string(),
            hint: hint.to_string(),
            explanation: explanation.to_string(),
        };
        Self::new(vec![
            q(
                "1",
                QuestionKind::Family,
                "What is your daughter Priya's profession?",
                ["Doctor", "Teacher", "Engineer", "Nurse"],
                "Teacher",
                "She works with children and loves gardening",
                "Priya is a teacher who lives in Mumbai and loves gardening and classical music.",
            ),
            q(
                "2",
                QuestionKind::Routine,
                "What time should you take your morning medications?",
                ["7:00 AM", "8:30 AM", "9:00 AM", "10:00 AM"],
                "8:30 AM",
                "It's after breakfast time",
                "Your morning medications should be taken at 8:30 AM, after breakfast.",
            ),
            q(
                "3",
                QuestionKind::Family,
                "How many grandchildren do you have?",
                ["1", "2", "3", "4"],
                "2",
                "Arjun has two children",
                "You have two grandchildren: Ananya and Rohan, who are Arjun's children.",
            ),
            q(
                "4",
                QuestionKind::Routine,
                "What's the first activity in your daily routine?",
                ["Eat breakfast", "Take morning walk", "Read newspaper", "Take medications"],
                "Take morning walk",
                "It's good to start the day with exercise",
                "Your day starts with a morning walk at 7:00 AM, which is great for your health.",
            ),
            q(
                "5",
                QuestionKind::General,
                "What should you do if you miss an important medication?",
                ["Skip it", "Take double next time", "Contact your doctor", "Take it anytime"],
                "Contact your doctor",
                "Safety first when it comes to medications",
                "Always contact your healthcare provider for guidance when you miss important medications.",
            ),
        ])
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.finished {
            None
        } else {
            self.questions.get(self.index)
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Answer chosen for the current question, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Progress through the quiz, counting the current question.
    pub fn progress_percent(&self) -> f64 {
        percent((self.index + 1).min(self.total()), self.total())
    }

    /// "Question 2: ... The options are: a, b, c, d"
    pub fn spoken_question(&self) -> Option<String> {
        self.current().map(|q| {
            format!(
                "Question {}: {}. The options are: {}",
                self.index + 1,
                q.question,
                q.options.join(", ")
            )
        })
    }

    pub fn answer(&mut self, option: &str) -> Result<AnswerFeedback, CareError> {
        let question = self.current().ok_or(CareError::QuizFinished)?;
        if self.selected.is_some() {
            return Err(CareError::AlreadyAnswered);
        }
        if !question.options.iter().any(|o| o == option) {
            return Err(CareError::InvalidOption(option.to_string()));
        }

        let correct = option == question.correct_answer;
        let spoken = if correct {
            format!("Correct! {}", question.explanation)
        } else {
            format!(
                "Not quite right. The correct answer is {}. {}",
                question.correct_answer, question.explanation
            )
        };
        let feedback = AnswerFeedback {
            correct,
            correct_answer: question.correct_answer.clone(),
            explanation: question.explanation.clone(),
            spoken,
        };

        if correct {
            self.score += 1;
        }
        self.selected = Some(option.to_string());
        tracing::debug!(question = self.index + 1, correct, "quiz answer");
        Ok(feedback)
    }

    /// Move past an answered question.
    pub fn advance(&mut self) -> Result<QuizStep, CareError> {
        if self.finished {
            return Err(CareError::QuizFinished);
        }
        if self.selected.is_none() {
            return Err(CareError::NotAnswered);
        }
        self.selected = None;

        if self.index + 1 < self.questions.len() {
            self.index += 1;
            Ok(QuizStep::Question(self.index))
        } else {
            self.finished = true;
            let summary = self.summary();
            tracing::info!(score = summary.score, total = summary.total, "quiz finished");
            Ok(QuizStep::Finished(summary))
        }
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            score: self.score,
            total: self.total(),
            rating: QuizRating::from_score(self.score, self.total()),
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.selected = None;
        self.score = 0;
        self.finished = self.questions.is_empty();
    }
}
