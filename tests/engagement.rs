#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engage::libs::engagement::{query_engagement, EngagementFilter, EngagementSummary, MAX_ENGAGEMENT_SCORE};
    use engage::libs::record::{parse_date, EngagementRecord};
    use engage::libs::source::{FixtureSource, RecordSource};

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn record(user: &str, user_type: &str, actions: i64, date: &str) -> EngagementRecord {
        EngagementRecord::new(user, user_type, actions, day(date)).unwrap()
    }

    fn sample() -> Vec<EngagementRecord> {
        FixtureSource::sample().into_records()
    }

    fn users(records: &[EngagementRecord]) -> Vec<&str> {
        records.iter().map(|r| r.user()).collect()
    }

    #[test]
    fn test_filter_by_user_type() {
        let report = query_engagement(&sample(), &EngagementFilter::default().with_user_type("admin"));

        assert_eq!(users(&report.details), vec!["Gez", "Eve"]);
        assert_eq!(report.summary.active_users, 2);
        assert_eq!(report.summary.engagement_score, 27);
        assert_eq!(report.summary.avg_session_time.to_string(), "13m 30s");
    }

    #[test]
    fn test_filter_by_date_range() {
        let filter = EngagementFilter::default().with_from_date(day("2025-07-11")).with_to_date(day("2025-07-13"));
        let report = query_engagement(&sample(), &filter);

        assert_eq!(users(&report.details), vec!["Eve"]);
        assert_eq!(report.summary.active_users, 1);
        assert_eq!(report.summary.engagement_score, 15);
        assert_eq!(report.summary.avg_session_time.to_string(), "7m 30s");
    }

    #[test]
    fn test_single_date_bounds_are_inclusive() {
        let from = query_engagement(&sample(), &EngagementFilter::default().with_from_date(day("2025-07-12")));
        assert_eq!(users(&from.details), vec!["Bob", "Eve"]);

        let to = query_engagement(&sample(), &EngagementFilter::default().with_to_date(day("2025-07-12")));
        assert_eq!(users(&to.details), vec!["Gez", "Eve"]);
    }

    #[test]
    fn test_user_type_match_is_exact() {
        let report = query_engagement(&sample(), &EngagementFilter::default().with_user_type("Admin"));
        assert!(report.details.is_empty());

        let report = query_engagement(&sample(), &EngagementFilter::default().with_user_type("adm"));
        assert!(report.details.is_empty());
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let records = sample();
        let report = query_engagement(&records, &EngagementFilter::default());

        assert_eq!(report.details, records);
        assert_eq!(report.summary.active_users, 3);
        assert_eq!(report.summary.engagement_score, 35);
        assert_eq!(report.summary.avg_session_time.to_string(), "17m 30s");
    }

    #[test]
    fn test_empty_input_yields_zeroed_summary() {
        let report = query_engagement(&[], &EngagementFilter::default());

        assert_eq!(report.summary, EngagementSummary::default());
        assert_eq!(report.summary.avg_session_time.to_string(), "0m 0s");
        assert!(report.details.is_empty());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "summary": { "active_users": 0, "engagement_score": 0, "avg_session_time": "0m 0s" },
                "details": []
            })
        );
    }

    #[test]
    fn test_empty_result_after_filtering_yields_zeroed_summary() {
        let report = query_engagement(&sample(), &EngagementFilter::default().with_user_type("guest"));

        assert_eq!(report.summary.active_users, 0);
        assert_eq!(report.summary.engagement_score, 0);
        assert_eq!(report.summary.avg_session_time.to_string(), "0m 0s");
        assert!(report.details.is_empty());
    }

    #[test]
    fn test_inverted_date_range_matches_nothing() {
        let filter = EngagementFilter::default().with_from_date(day("2025-07-14")).with_to_date(day("2025-07-10"));
        assert!(query_engagement(&sample(), &filter).details.is_empty());
    }

    #[test]
    fn test_score_is_capped_at_one_hundred() {
        let records: Vec<EngagementRecord> = (0..40).map(|i| record(&format!("u{}", i), "client", 7, "2025-07-10")).collect();
        let report = query_engagement(&records, &EngagementFilter::default());

        assert_eq!(report.summary.engagement_score, MAX_ENGAGEMENT_SCORE);
        assert_eq!(report.summary.avg_session_time.to_string(), "140m 0s");
    }

    #[test]
    fn test_score_and_seconds_stay_in_range() {
        for n in 0..60i64 {
            let records: Vec<EngagementRecord> = (0..n).map(|i| record("u", "client", i * 3 + 1, "2025-07-10")).collect();
            let summary = query_engagement(&records, &EngagementFilter::default()).summary;

            assert!(summary.engagement_score <= 100);
            assert!(summary.avg_session_time.seconds < 60);
        }
    }

    #[test]
    fn test_huge_action_counts_do_not_overflow() {
        let records = vec![
            record("a", "client", i64::from(u32::MAX), "2025-07-10"),
            record("b", "client", i64::from(u32::MAX), "2025-07-11"),
        ];
        let summary = query_engagement(&records, &EngagementFilter::default()).summary;

        assert_eq!(summary.engagement_score, 100);
        assert_eq!(summary.avg_session_time.minutes, u64::from(u32::MAX));
        assert_eq!(summary.avg_session_time.seconds, 0);
    }

    #[test]
    fn test_active_users_counts_records_not_distinct_users() {
        let records = vec![
            record("Gez", "admin", 1, "2025-07-10"),
            record("Gez", "admin", 1, "2025-07-11"),
            record("Gez", "admin", 1, "2025-07-12"),
        ];
        let report = query_engagement(&records, &EngagementFilter::default());

        assert_eq!(report.summary.active_users, 3);
    }

    #[test]
    fn test_filter_is_stable_and_idempotent() {
        let records = vec![
            record("z", "admin", 1, "2025-07-15"),
            record("a", "client", 2, "2025-07-01"),
            record("m", "admin", 3, "2025-07-09"),
            record("b", "admin", 4, "2025-07-20"),
        ];
        let filter = EngagementFilter::default().with_user_type("admin");

        let once = query_engagement(&records, &filter);
        assert_eq!(users(&once.details), vec!["z", "m", "b"]);

        let twice = query_engagement(&once.details, &filter);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_query_does_not_touch_input() {
        let records = sample();
        let before = records.clone();
        let _ = query_engagement(&records, &EngagementFilter::default().with_user_type("client"));

        assert_eq!(records, before);
    }

    #[test]
    fn test_fixture_source_is_replaceable() {
        let mut source = FixtureSource::new(vec![record("Zed", "client", 3, "2025-08-01")]);
        let report = source.query(&EngagementFilter::default()).unwrap();

        assert_eq!(users(&report.details), vec!["Zed"]);
        assert_eq!(report.summary.avg_session_time.to_string(), "1m 30s");
    }

    #[test]
    fn test_concurrent_queries_share_input() {
        let records = std::sync::Arc::new(sample());

        let handles: Vec<_> = ["admin", "client", "admin", "client"]
            .into_iter()
            .map(|user_type| {
                let records = records.clone();
                std::thread::spawn(move || query_engagement(&records, &EngagementFilter::default().with_user_type(user_type)))
            })
            .collect();

        let scores: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap().summary.engagement_score).collect();
        assert_eq!(scores, vec![27, 8, 27, 8]);
    }
}
