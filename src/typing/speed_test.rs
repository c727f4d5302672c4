use std::time::{Duration, Instant};

use chrono::Utc;
use rand::Rng;
use rust_i18n::t;

use crate::locale::Language;
use crate::typing::history::TypingResult;
use crate::typing::sentences;

/// Standard words-per-minute convention.
pub const CHARS_PER_WORD: f64 = 5.0;
/// Elapsed time is never treated as shorter than this.
pub const MIN_ELAPSED_MINUTES: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect(char),
    Pending,
    /// Typed past the end of the reference.
    Extra(char),
}

/// Produced once, when the input first equals the reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub result: TypingResult,
    pub sentence: String,
}

impl Completion {
    /// Conversational prompt handed to the mentor chat.
    pub fn summary(&self, lang: Language) -> String {
        t!(
            "typing.summary",
            locale = lang.code(),
            wpm = self.result.wpm,
            accuracy = self.result.accuracy,
            sentence = self.sentence
        )
        .into_owned()
    }
}

pub struct SpeedTest {
    reference: String,
    input: String,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    accuracy: u8,
    wpm: Option<u32>,
}

impl SpeedTest {
    pub fn new(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            input: String::new(),
            started_at: None,
            finished_at: None,
            accuracy: 100,
            wpm: None,
        }
    }

    pub fn start<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(sentences::pick(rng))
    }

    /// Throws away the current sentence, input and timers.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::start(rng);
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn accuracy(&self) -> u8 {
        self.accuracy
    }

    pub fn wpm(&self) -> Option<u32> {
        self.wpm
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start).as_secs_f64(),
            (Some(start), None) => now.saturating_duration_since(start).as_secs_f64(),
            _ => 0.0,
        }
    }

    /// Mismatched positions, including anything typed past the reference.
    pub fn errors(&self) -> usize {
        self.char_statuses()
            .iter()
            .filter(|s| matches!(s, CharStatus::Incorrect(_) | CharStatus::Extra(_)))
            .count()
    }

    /// Feed the whole input buffer after a change. Returns the completion the
    /// first time the buffer equals the reference exactly; input after that
    /// is ignored until restart.
    pub fn input_changed(&mut self, value: &str, now: Instant) -> Option<Completion> {
        if self.is_finished() {
            return None;
        }

        let started_at = *self.started_at.get_or_insert(now);
        self.input = value.to_string();
        self.accuracy = accuracy(&self.reference, value);

        if value != self.reference {
            return None;
        }

        self.finished_at = Some(now);
        let wpm = words_per_minute(
            self.reference.chars().count(),
            now.saturating_duration_since(started_at),
        );
        self.wpm = Some(wpm);

        Some(Completion {
            result: TypingResult {
                wpm,
                accuracy: self.accuracy,
                date: Utc::now(),
            },
            sentence: self.reference.clone(),
        })
    }

    pub fn push_char(&mut self, ch: char, now: Instant) -> Option<Completion> {
        if self.is_finished() {
            return None;
        }
        let mut value = self.input.clone();
        value.push(ch);
        self.input_changed(&value, now)
    }

    pub fn backspace(&mut self, now: Instant) -> Option<Completion> {
        if self.is_finished() || self.input.is_empty() {
            return None;
        }
        let mut value = self.input.clone();
        value.pop();
        self.input_changed(&value, now)
    }

    pub fn char_statuses(&self) -> Vec<CharStatus> {
        let typed: Vec<char> = self.input.chars().collect();
        let mut statuses: Vec<CharStatus> = self
            .reference
            .chars()
            .enumerate()
            .map(|(i, expected)| match typed.get(i) {
                Some(&actual) if actual == expected => CharStatus::Correct,
                Some(&actual) => CharStatus::Incorrect(actual),
                None => CharStatus::Pending,
            })
            .collect();
        let reference_len = statuses.len();
        statuses.extend(typed.iter().skip(reference_len).map(|&c| CharStatus::Extra(c)));
        statuses
    }
}

/// `round(100 * correct / typed)`, where `correct` counts positions whose char
/// equals the reference char at the same index. Empty input is 100.
pub fn accuracy(reference: &str, input: &str) -> u8 {
    let typed = input.chars().count();
    if typed == 0 {
        return 100;
    }
    let correct = input
        .chars()
        .zip(reference.chars())
        .filter(|(actual, expected)| actual == expected)
        .count();
    (100.0 * correct as f64 / typed as f64).round() as u8
}

pub fn words_per_minute(reference_len: usize, elapsed: Duration) -> u32 {
    let minutes = (elapsed.as_secs_f64() / 60.0).max(MIN_ELAPSED_MINUTES);
    ((reference_len as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_all(test: &mut SpeedTest, text: &str, start: Instant) -> Option<Completion> {
        let mut last = None;
        for ch in text.chars() {
            last = test.push_char(ch, start);
        }
        last
    }

    #[test]
    fn test_new_test_state() {
        let test = SpeedTest::new("hello");
        assert_eq!(test.accuracy(), 100);
        assert!(!test.is_started());
        assert!(!test.is_finished());
        assert_eq!(test.wpm(), None);
        assert_eq!(test.char_statuses(), vec![CharStatus::Pending; 5]);
    }

    #[test]
    fn test_empty_input_accuracy_is_100() {
        assert_eq!(accuracy("Dream big", ""), 100);
        let mut test = SpeedTest::new("abc");
        let now = Instant::now();
        test.push_char('x', now);
        test.backspace(now);
        assert_eq!(test.input(), "");
        assert_eq!(test.accuracy(), 100);
    }

    #[test]
    fn test_accuracy_counts_positional_matches() {
        assert_eq!(accuracy("abcd", "abxd"), 75);
        assert_eq!(accuracy("abc", "abc"), 100);
        assert_eq!(accuracy("abc", "xyz"), 0);
        // one of three correct rounds to 33
        assert_eq!(accuracy("abc", "axx"), 33);
        // two of three rounds to 67
        assert_eq!(accuracy("abc", "abx"), 67);
    }

    #[test]
    fn test_accuracy_past_reference_end_counts_as_wrong() {
        assert_eq!(accuracy("ab", "abcd"), 50);
    }

    #[test]
    fn test_first_keystroke_starts_timer() {
        let mut test = SpeedTest::new("abc");
        let t0 = Instant::now();
        test.push_char('a', t0);
        assert!(test.is_started());
        assert_eq!(test.elapsed_secs(t0 + Duration::from_secs(2)), 2.0);
    }

    #[test]
    fn test_prefix_does_not_complete() {
        let mut test = SpeedTest::new("Dream big");
        let done = type_all(&mut test, "Dream bi", Instant::now());
        assert!(done.is_none());
        assert!(!test.is_finished());
    }

    #[test]
    fn test_wrong_length_does_not_complete() {
        let mut test = SpeedTest::new("abc");
        assert!(type_all(&mut test, "abcd", Instant::now()).is_none());
        assert!(!test.is_finished());
        assert_eq!(test.errors(), 1);
    }

    #[test]
    fn test_completion_is_case_and_whitespace_sensitive() {
        let mut test = SpeedTest::new("Dream big.");
        let now = Instant::now();
        assert!(test.input_changed("dream big.", now).is_none());
        assert!(test.input_changed("Dream big. ", now).is_none());
        assert!(test.input_changed("Dream  big.", now).is_none());
        assert!(test.input_changed("Dream big.", now).is_some());
    }

    #[test]
    fn test_reference_example_36_wpm() {
        let sentence = "Dream big and dare to fail.";
        assert_eq!(sentence.chars().count(), 27);

        let mut test = SpeedTest::new(sentence);
        let t0 = Instant::now();
        test.input_changed("D", t0);
        let done = test
            .input_changed(sentence, t0 + Duration::from_secs(9))
            .expect("completes");
        assert_eq!(done.result.wpm, 36);
        assert_eq!(done.result.accuracy, 100);
        assert_eq!(test.wpm(), Some(36));
        assert!(test.is_finished());
    }

    #[test]
    fn test_instant_completion_uses_elapsed_floor() {
        assert_eq!(words_per_minute(27, Duration::ZERO), 540);
        assert_eq!(words_per_minute(27, Duration::from_millis(10)), 540);
        let mut test = SpeedTest::new("hi");
        let done = test.input_changed("hi", Instant::now()).unwrap();
        // (2 / 5) / 0.01
        assert_eq!(done.result.wpm, 40);
    }

    #[test]
    fn test_accuracy_freezes_after_completion() {
        let mut test = SpeedTest::new("ab");
        let now = Instant::now();
        test.input_changed("ax", now);
        assert_eq!(test.accuracy(), 50);
        let done = test.input_changed("ab", now).unwrap();
        assert_eq!(done.result.accuracy, 100);
        assert!(test.input_changed("abz", now).is_none());
        assert!(test.push_char('z', now).is_none());
        assert_eq!(test.input(), "ab");
        assert_eq!(test.accuracy(), 100);
    }

    #[test]
    fn test_char_statuses_mark_errors_and_extra() {
        let mut test = SpeedTest::new("abc");
        test.input_changed("axcd", Instant::now());
        assert_eq!(
            test.char_statuses(),
            vec![
                CharStatus::Correct,
                CharStatus::Incorrect('x'),
                CharStatus::Correct,
                CharStatus::Extra('d'),
            ]
        );
    }

    #[test]
    fn test_restart_resets_everything() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(1);
        let mut test = SpeedTest::start(&mut rng);
        let reference = test.reference().to_string();
        test.input_changed(&reference, Instant::now());
        assert!(test.is_finished());

        test.restart(&mut rng);
        assert!(!test.is_finished());
        assert!(!test.is_started());
        assert_eq!(test.input(), "");
        assert_eq!(test.accuracy(), 100);
        assert!(sentences::SENTENCES.contains(&test.reference()));
    }

    #[test]
    fn test_summary_mentions_stats_and_sentence() {
        let completion = Completion {
            result: TypingResult {
                wpm: 36,
                accuracy: 98,
                date: Utc::now(),
            },
            sentence: "Dream big and dare to fail.".to_string(),
        };
        let en = completion.summary(Language::En);
        assert_eq!(
            en,
            "I just finished a typing test. WPM: 36, Accuracy: 98%. Sentence: \"Dream big and dare to fail.\"."
        );
        let ta = completion.summary(Language::Ta);
        assert!(ta.contains("36"));
        assert!(ta.contains("98%"));
        assert!(ta.contains("Dream big and dare to fail."));
    }
}
