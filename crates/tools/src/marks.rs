//! Student marks demo tool — a randomized static responder.
//!
//! Produces a per-subject marks report with a total and percentage.
//! Randomness is the only side effect; the tool never blocks.

use rand::Rng;

const SUBJECTS: [&str; 5] = ["Math", "Physics", "Chemistry", "English", "Biology"];
const MIN_MARK: u32 = 40;
const MAX_MARK: u32 = 100;

/// Generate a random marks report. The input context is ignored.
pub fn marks_report(_context: &str) -> String {
    let mut rng = rand::thread_rng();

    let marks: Vec<(&str, u32)> = SUBJECTS
        .iter()
        .map(|s| (*s, rng.gen_range(MIN_MARK..=MAX_MARK)))
        .collect();

    let total: u32 = marks.iter().map(|(_, m)| m).sum();
    let pct = total as f64 / SUBJECTS.len() as f64;

    let mut report = marks
        .iter()
        .map(|(s, m)| format!("{s}: {m}/100"))
        .collect::<Vec<_>>()
        .join("\n");
    report.push_str(&format!(
        "\nTotal: {}/{}\nPercentage: {:.2}%",
        total,
        SUBJECTS.len() * 100,
        pct
    ));
    report
}
