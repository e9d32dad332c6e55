//! All-time per-subject distribution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::session::FocusSession;

use super::round1;

/// One subject's slice of total study time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectShare {
    pub subject: String,
    /// Hours, to 1 decimal.
    pub hours: f64,
    /// Integer share of the grand total.
    pub percentage: u32,
}

/// Group all-time sessions by subject label, descending by hours, top 6.
///
/// Grouping is exact string match: "Matemática" and "matemática" are
/// distinct buckets. Returns an empty vec for an empty store.
pub fn subject_distribution(sessions: &[FocusSession]) -> Vec<SubjectShare> {
    let mut minutes_by_subject: HashMap<&str, u64> = HashMap::new();
    for session in sessions {
        *minutes_by_subject.entry(session.subject.as_str()).or_default() +=
            session.duration_min as u64;
    }

    let total_minutes: u64 = minutes_by_subject.values().sum();
    if total_minutes == 0 {
        return Vec::new();
    }

    let mut shares: Vec<SubjectShare> = minutes_by_subject
        .into_iter()
        .map(|(subject, minutes)| SubjectShare {
            subject: subject.to_owned(),
            hours: round1(minutes as f64 / 60.0),
            percentage: (minutes as f64 / total_minutes as f64 * 100.0).round() as u32,
        })
        .collect();

    // Descending by hours; ties broken by label to keep the order stable.
    shares.sort_by(|a, b| {
        b.hours
            .partial_cmp(&a.hours)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.subject.cmp(&b.subject))
    });
    shares.truncate(6);
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session(subject: &str, minutes: u32) -> FocusSession {
        FocusSession::new(subject, minutes, Utc::now(), true)
    }

    #[test]
    fn empty_store_yields_empty_distribution() {
        assert!(subject_distribution(&[]).is_empty());
    }

    #[test]
    fn groups_sum_and_sort_descending() {
        let sessions = vec![
            session("Matemática", 60),
            session("Matemática", 30),
            session("Física", 120),
            session("História", 30),
        ];
        let shares = subject_distribution(&sessions);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].subject, "Física");
        assert_eq!(shares[0].hours, 2.0);
        assert_eq!(shares[0].percentage, 50);
        assert_eq!(shares[1].subject, "Matemática");
        assert_eq!(shares[1].hours, 1.5);
        assert_eq!(shares[1].percentage, 38);
        assert_eq!(shares[2].subject, "História");
        assert_eq!(shares[2].percentage, 13);
    }

    #[test]
    fn percentages_sum_to_roughly_one_hundred() {
        let sessions = vec![
            session("a", 25),
            session("b", 45),
            session("c", 70),
            session("d", 30),
        ];
        let total: u32 = subject_distribution(&sessions)
            .iter()
            .map(|s| s.percentage)
            .sum();
        assert!((98..=102).contains(&total), "got {total}");
    }

    #[test]
    fn case_sensitive_labels_are_distinct_buckets() {
        let sessions = vec![session("Matemática", 60), session("matemática", 60)];
        assert_eq!(subject_distribution(&sessions).len(), 2);
    }

    #[test]
    fn truncates_to_the_top_six() {
        let sessions: Vec<FocusSession> = (0..9)
            .map(|i| session(&format!("materia-{i}"), 10 + i * 10))
            .collect();
        let shares = subject_distribution(&sessions);
        assert_eq!(shares.len(), 6);
        // Largest groups survive the cut.
        assert_eq!(shares[0].subject, "materia-8");
        assert_eq!(shares[5].subject, "materia-3");
    }
}
