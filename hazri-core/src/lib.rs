//! Attendance analytics and warning engine.
//!
//! Pure functions over an [`store::AttendanceStore`] seam: percentage
//! calculation per subject, aggregation per institute, goal resolution,
//! threshold evaluation, and the synchronous warning trigger that runs after
//! an attendance record is inserted. Analytics are re-derived on every call;
//! nothing here caches or schedules.

pub mod goal;
pub mod percentage;
pub mod store;
pub mod types;
pub mod warning;

pub use goal::resolve_goal;
pub use percentage::{institute_attendance, subject_attendance};
pub use warning::{evaluate, on_attendance_recorded};

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use crate::store::{AttendanceStore, NewWarning, RecordRef, StorageFailure};
    use crate::types::{ComputeStatus, DateWindow, Goal, Severity};
    use crate::{evaluate, institute_attendance, on_attendance_recorded, subject_attendance};

    /// In-memory store: a list of present-marks plus lookup tables, with
    /// switches that fail every call, one subject's counts, or only the
    /// warning inserts.
    #[derive(Default)]
    struct MemoryStore {
        present: Vec<(i32, i32, i32, NaiveDate)>,
        subjects: HashMap<i32, Vec<i32>>,
        goals: HashMap<(i32, i32), Goal>,
        records: HashMap<i32, RecordRef>,
        warnings: RefCell<Vec<NewWarning>>,
        broken: bool,
        broken_subject: Option<i32>,
        broken_inserts: bool,
    }

    impl MemoryStore {
        fn check(&self) -> Result<(), StorageFailure> {
            if self.broken {
                Err(StorageFailure::new("connection refused"))
            } else {
                Ok(())
            }
        }

        fn mark_present(&mut self, user: i32, institute: i32, subject: i32, date: &str) {
            self.present
                .push((user, institute, subject, date.parse().unwrap()));
        }
    }

    impl AttendanceStore for MemoryStore {
        fn count_present(
            &self,
            user_id: i32,
            institute_id: i32,
            subject_id: i32,
            window: DateWindow,
        ) -> Result<i64, StorageFailure> {
            self.check()?;
            if self.broken_subject == Some(subject_id) {
                return Err(StorageFailure::new("count query failed"));
            }
            Ok(self
                .present
                .iter()
                .filter(|(u, i, s, d)| {
                    *u == user_id
                        && *i == institute_id
                        && *s == subject_id
                        && *d >= window.start
                        && *d <= window.end
                })
                .count() as i64)
        }

        fn active_subjects(&self, institute_id: i32) -> Result<Vec<i32>, StorageFailure> {
            self.check()?;
            Ok(self.subjects.get(&institute_id).cloned().unwrap_or_default())
        }

        fn active_goal(
            &self,
            user_id: i32,
            institute_id: i32,
        ) -> Result<Option<Goal>, StorageFailure> {
            self.check()?;
            Ok(self.goals.get(&(user_id, institute_id)).copied())
        }

        fn attendance_record(&self, record_id: i32) -> Result<Option<RecordRef>, StorageFailure> {
            self.check()?;
            Ok(self.records.get(&record_id).copied())
        }

        fn insert_warning(&self, warning: NewWarning) -> Result<(), StorageFailure> {
            self.check()?;
            if self.broken_inserts {
                return Err(StorageFailure::new("insert failed"));
            }
            self.warnings.borrow_mut().push(warning);
            Ok(())
        }
    }

    fn window(start: &str, end: &str) -> DateWindow {
        DateWindow::new(start.parse().unwrap(), end.parse().unwrap())
    }

    fn ten_day_store_with_seven_marks() -> MemoryStore {
        let mut store = MemoryStore::default();
        store.subjects.insert(10, vec![100]);
        for day in 1..=7 {
            store.mark_present(1, 10, 100, &format!("2024-01-0{}", day));
        }
        store
    }

    #[test]
    fn seven_of_ten_days_is_seventy_percent() {
        let store = ten_day_store_with_seven_marks();
        let figures = subject_attendance(
            &store,
            1,
            10,
            100,
            Some(window("2024-01-01", "2024-01-10")),
        );
        assert_eq!(figures.attended, 7);
        assert_eq!(figures.total, 10);
        assert_eq!(figures.percentage, 70.00);
        assert_eq!(figures.status, ComputeStatus::Calculated);
    }

    #[test]
    fn total_never_drops_below_one_day() {
        // even a single-day window divides cleanly
        let mut store = MemoryStore::default();
        store.mark_present(1, 10, 100, "2024-01-01");
        let figures =
            subject_attendance(&store, 1, 10, 100, Some(window("2024-01-01", "2024-01-01")));
        assert_eq!(figures.total, 1);
        assert_eq!(figures.percentage, 100.00);
    }

    #[test]
    fn widening_the_window_never_loses_marks() {
        // attended is monotone in the window
        let store = ten_day_store_with_seven_marks();
        let narrow =
            subject_attendance(&store, 1, 10, 100, Some(window("2024-01-03", "2024-01-05")));
        let wide =
            subject_attendance(&store, 1, 10, 100, Some(window("2024-01-01", "2024-01-31")));
        assert!(wide.attended >= narrow.attended);
        assert_eq!(narrow.attended, 3);
        assert_eq!(wide.attended, 7);
    }

    #[test]
    fn identical_calls_return_identical_figures() {
        // reads are idempotent
        let store = ten_day_store_with_seven_marks();
        let w = Some(window("2024-01-01", "2024-01-10"));
        assert_eq!(
            subject_attendance(&store, 1, 10, 100, w),
            subject_attendance(&store, 1, 10, 100, w),
        );
    }

    #[test]
    fn storage_failure_collapses_to_error_status() {
        let store = MemoryStore {
            broken: true,
            ..MemoryStore::default()
        };
        let figures =
            subject_attendance(&store, 1, 10, 100, Some(window("2024-01-01", "2024-01-10")));
        assert_eq!(figures.status, ComputeStatus::Error);
        assert_eq!(figures.attended, 0);
        assert_eq!(figures.total, 0);
        assert_eq!(figures.percentage, 0.0);
    }

    #[test]
    fn institute_sums_per_subject_counts() {
        // institute figures are the per-subject sums, with the percentage
        // recomputed over "subject-days"
        let mut store = MemoryStore::default();
        store.subjects.insert(10, vec![100, 101, 102]);
        for day in 1..=7 {
            store.mark_present(1, 10, 100, &format!("2024-01-0{}", day));
        }
        for day in 1..=5 {
            store.mark_present(1, 10, 101, &format!("2024-01-0{}", day));
        }
        // subject 102 has no marks at all

        let w = window("2024-01-01", "2024-01-10");
        let aggregate = institute_attendance(&store, 1, 10, Some(w));
        let per_subject: Vec<_> = [100, 101, 102]
            .iter()
            .map(|&sid| subject_attendance(&store, 1, 10, sid, Some(w)))
            .collect();

        assert_eq!(
            aggregate.attended,
            per_subject.iter().map(|f| f.attended).sum::<i64>()
        );
        assert_eq!(
            aggregate.total,
            per_subject.iter().map(|f| f.total).sum::<i64>()
        );
        assert_eq!(aggregate.attended, 12);
        assert_eq!(aggregate.total, 30);
        assert_eq!(aggregate.percentage, 40.00);
        assert_eq!(aggregate.status, ComputeStatus::Calculated);
    }

    #[test]
    fn failed_subject_contributes_zeros_not_poison() {
        // one subject's lookup failing zeroes that subject only; the
        // surviving subjects still produce a calculated aggregate
        let mut store = ten_day_store_with_seven_marks();
        store.subjects.insert(10, vec![100, 101]);
        store.broken_subject = Some(101);

        let figures = institute_attendance(&store, 1, 10, Some(window("2024-01-01", "2024-01-10")));
        assert_eq!(figures.attended, 7);
        assert_eq!(figures.total, 10);
        assert_eq!(figures.percentage, 70.00);
        assert_eq!(figures.status, ComputeStatus::Calculated);
    }

    #[test]
    fn failed_subject_enumeration_is_an_institute_error() {
        let store = MemoryStore {
            broken: true,
            ..MemoryStore::default()
        };
        let figures = institute_attendance(&store, 1, 10, None);
        assert_eq!(figures.status, ComputeStatus::Error);
        assert_eq!(figures.total, 0);
    }

    #[test]
    fn institute_without_subjects_reports_no_classes() {
        let store = MemoryStore::default();
        let figures = institute_attendance(&store, 1, 10, None);
        assert_eq!(figures.attended, 0);
        assert_eq!(figures.total, 0);
        assert_eq!(figures.percentage, 0.0);
        assert_eq!(figures.status, ComputeStatus::NoClasses);
    }

    #[test]
    fn missing_goal_row_yields_defaults() {
        let store = MemoryStore::default();
        let goal = crate::resolve_goal(&store, 1, 10);
        assert_eq!(goal.target_percentage, 75.00);
        assert_eq!(goal.warning_threshold, 70.00);
    }

    #[test]
    fn failed_goal_lookup_yields_defaults() {
        let store = MemoryStore {
            broken: true,
            ..MemoryStore::default()
        };
        assert_eq!(crate::resolve_goal(&store, 1, 10), Goal::default());
    }

    /// A store where user 1 attended `present_days` of the last 31 days in
    /// subject 100 of institute 10 (the evaluator always uses the default
    /// trailing window, so marks are laid down relative to today).
    fn recent_store(present_days: i64) -> MemoryStore {
        let mut store = MemoryStore::default();
        store.subjects.insert(10, vec![100]);
        let today = chrono::Utc::today().naive_utc();
        for offset in 0..present_days {
            store
                .present
                .push((1, 10, 100, today - chrono::Duration::days(offset)));
        }
        store
    }

    #[test]
    fn exactly_at_threshold_is_warning_not_critical() {
        // A percentage equal to the warning threshold is not `< threshold`,
        // so only the below-target branch fires. evaluate() always uses the
        // default window, so pin the boundary with a goal sitting exactly on
        // the computed percentage.
        let mut store = recent_store(31); // 31 of 31 days -> 100%
        store.goals.insert(
            (1, 10),
            Goal {
                target_percentage: 110.0,
                warning_threshold: 100.0,
            },
        );
        let report = evaluate(&store, 1, 10, Some(100));
        assert_eq!(report.attendance.percentage, 100.00);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].severity, Severity::Warning);
        assert_eq!(
            report.warnings[0].message,
            "Attendance is below target (100%)"
        );
        assert_eq!(report.warnings[0].threshold, 110.0);
        assert!(report.has_warnings);
    }

    #[test]
    fn below_threshold_is_critical_only() {
        // A percentage under the warning threshold emits a single critical
        // entry, never both severities.
        let store = recent_store(20); // 20 of 31 days -> 64.52%
        let report = evaluate(&store, 1, 10, Some(100));
        assert_eq!(report.attendance.percentage, 64.52);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].severity, Severity::Critical);
        assert_eq!(
            report.warnings[0].message,
            "Attendance is critically low! (64.52%)"
        );
        assert_eq!(report.warnings[0].threshold, 70.00);
    }

    #[test]
    fn healthy_attendance_emits_nothing() {
        let store = recent_store(31); // 100% against default 75/70
        let report = evaluate(&store, 1, 10, Some(100));
        assert!(report.warnings.is_empty());
        assert!(!report.has_warnings);
    }

    #[test]
    fn at_most_one_warning_per_evaluation() {
        // one severity at most, whatever the attendance level
        for present in 0..=31 {
            let store = recent_store(present);
            let report = evaluate(&store, 1, 10, Some(100));
            assert!(report.warnings.len() <= 1);
        }
    }

    #[test]
    fn failed_computation_suppresses_warnings() {
        let store = MemoryStore {
            broken: true,
            ..MemoryStore::default()
        };
        let report = evaluate(&store, 1, 10, Some(100));
        assert_eq!(report.attendance.status, ComputeStatus::Error);
        assert!(report.warnings.is_empty());
        assert_eq!(report.goal, Goal::default());
    }

    #[test]
    fn institute_level_evaluation_uses_aggregate() {
        let mut store = recent_store(20);
        store.subjects.insert(10, vec![100, 101]); // 101 contributes zero marks
        let report = evaluate(&store, 1, 10, None);
        // 20 attended over 62 subject-days
        assert_eq!(report.attendance.attended, 20);
        assert_eq!(report.attendance.total, 62);
        assert_eq!(report.warnings[0].severity, Severity::Critical);
    }

    #[test]
    fn trigger_persists_one_unread_warning() {
        let mut store = recent_store(20);
        store.records.insert(
            555,
            RecordRef {
                user_id: 1,
                institute_id: 10,
                subject_id: 100,
                attendance_date: chrono::Utc::today().naive_utc(),
            },
        );

        assert!(on_attendance_recorded(&store, 555));
        let persisted = store.warnings.borrow();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].user_id, 1);
        assert_eq!(persisted[0].subject_id, Some(100));
        assert_eq!(persisted[0].severity, Severity::Critical);
        assert_eq!(persisted[0].threshold, 70.00);
    }

    #[test]
    fn trigger_with_unknown_record_is_a_noop() {
        let store = recent_store(20);
        assert!(!on_attendance_recorded(&store, 999));
        assert!(store.warnings.borrow().is_empty());
    }

    #[test]
    fn trigger_with_healthy_attendance_writes_nothing() {
        let mut store = recent_store(31);
        store.records.insert(
            555,
            RecordRef {
                user_id: 1,
                institute_id: 10,
                subject_id: 100,
                attendance_date: chrono::Utc::today().naive_utc(),
            },
        );
        assert!(!on_attendance_recorded(&store, 555));
        assert!(store.warnings.borrow().is_empty());
    }

    #[test]
    fn failed_warning_insert_reports_nothing_persisted() {
        // the evaluation succeeds but the insert fails; the trigger swallows
        // the failure and reports no warning created
        let mut store = recent_store(20);
        store.broken_inserts = true;
        store.records.insert(
            555,
            RecordRef {
                user_id: 1,
                institute_id: 10,
                subject_id: 100,
                attendance_date: chrono::Utc::today().naive_utc(),
            },
        );
        assert!(!on_attendance_recorded(&store, 555));
        assert!(store.warnings.borrow().is_empty());
    }

    #[test]
    fn repeated_triggers_append_repeated_rows() {
        // No write-side dedup: read-state is the only suppression.
        let mut store = recent_store(20);
        store.records.insert(
            555,
            RecordRef {
                user_id: 1,
                institute_id: 10,
                subject_id: 100,
                attendance_date: chrono::Utc::today().naive_utc(),
            },
        );
        assert!(on_attendance_recorded(&store, 555));
        assert!(on_attendance_recorded(&store, 555));
        assert_eq!(store.warnings.borrow().len(), 2);
    }
}
