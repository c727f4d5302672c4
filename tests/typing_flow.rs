use std::time::{Duration, Instant};

use chrono::Utc;
use mentorbridge::locale::Language;
use mentorbridge::store::FileStore;
use mentorbridge::typing::sentences::SENTENCES;
use mentorbridge::typing::speed_test::{accuracy, words_per_minute};
use mentorbridge::typing::{HISTORY_CAPACITY, SpeedTest, TypingHistory, TypingResult};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

/// Type `text` one char per `step`.
fn type_evenly(test: &mut SpeedTest, text: &str, start: Instant, step: Duration) {
    for (i, ch) in text.chars().enumerate() {
        test.push_char(ch, start + step * i as u32);
    }
}

#[test]
fn dream_big_in_nine_seconds_is_36_wpm() {
    let sentence = "Dream big and dare to fail.";
    let mut test = SpeedTest::new(sentence);
    let start = Instant::now();

    let chars: Vec<char> = sentence.chars().collect();
    for ch in &chars[..chars.len() - 1] {
        assert!(test.push_char(*ch, start).is_none());
    }
    let done = test
        .push_char(chars[chars.len() - 1], start + Duration::from_secs(9))
        .expect("exact match completes the test");

    assert_eq!(done.result.wpm, 36);
    assert_eq!(done.result.accuracy, 100);
    assert_eq!(done.sentence, sentence);
    assert_eq!(
        done.summary(Language::En),
        "I just finished a typing test. WPM: 36, Accuracy: 100%. Sentence: \"Dream big and dare to fail.\"."
    );
}

#[test]
fn corrected_mistake_still_completes() {
    let mut test = SpeedTest::new("abc");
    let t0 = Instant::now();
    test.push_char('a', t0);
    test.push_char('x', t0);
    assert_eq!(test.accuracy(), 50);
    assert_eq!(test.errors(), 1);
    test.backspace(t0);
    test.push_char('b', t0);
    let done = test.push_char('c', t0 + Duration::from_secs(1));
    assert!(done.is_some());
    assert!(test.is_finished());
    // input after completion is ignored
    assert!(test.push_char('d', t0 + Duration::from_secs(2)).is_none());
    assert_eq!(test.input(), "abc");
}

#[test]
fn completion_only_on_exact_match() {
    let mut test = SpeedTest::new("ab");
    let t0 = Instant::now();
    assert!(test.input_changed("aB", t0).is_none());
    assert!(test.input_changed("ab ", t0).is_none());
    assert!(test.input_changed("ab", t0).is_some());
}

#[test]
fn instant_finish_uses_minimum_elapsed() {
    // 10 chars = 2 words over the 0.01 minute floor
    assert_eq!(words_per_minute(10, Duration::ZERO), 200);
    assert_eq!(words_per_minute(10, Duration::from_millis(100)), 200);
}

#[test]
fn accuracy_matches_positional_rule() {
    assert_eq!(accuracy("Practice makes perfect.", ""), 100);
    assert_eq!(accuracy("abcd", "abXd"), 75);
}

#[test]
fn every_pooled_sentence_can_be_completed() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut test = SpeedTest::start(&mut rng);
        assert!(SENTENCES.contains(&test.reference()));
        let reference = test.reference().to_string();
        type_evenly(&mut test, &reference, Instant::now(), Duration::from_millis(150));
        assert!(test.is_finished());
        assert!(test.wpm().is_some());
    }
}

#[test]
fn history_is_capped_fifo_and_persisted() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::with_base_dir(dir.path().to_path_buf()).unwrap();

    let mut history = TypingHistory::load(&store, HISTORY_CAPACITY);
    assert!(history.is_empty());
    for wpm in 1..=7 {
        history.record(TypingResult {
            wpm,
            accuracy: 100,
            date: Utc::now(),
        });
        history.save(&store).unwrap();
    }

    let reloaded = TypingHistory::load(&store, HISTORY_CAPACITY);
    let wpms: Vec<u32> = reloaded.entries().iter().map(|r| r.wpm).collect();
    assert_eq!(wpms, vec![3, 4, 5, 6, 7]);
    assert_eq!(reloaded.latest().map(|r| r.wpm), Some(7));
}
