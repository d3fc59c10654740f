//! Tests for the severity scale.

use crate::error::LoggerError;
use crate::logger::level::{IntoSeverity, LEVELS, Severity, label_of};

#[test]
fn test_labels_match_table() {
    let labels: Vec<&str> = Severity::all().iter().map(|s| s.label()).collect();
    assert_eq!(
        labels,
        vec![
            "emergency",
            "alert",
            "critical",
            "error",
            "warning",
            "notice",
            "info",
            "debug"
        ]
    );

    for (rank, label) in LEVELS {
        assert_eq!(label_of(i64::from(rank)).unwrap(), label);
    }
}

#[test]
fn test_ranks_are_contiguous_and_ordered() {
    for (idx, severity) in Severity::all().iter().enumerate() {
        assert_eq!(usize::from(severity.rank()), idx);
    }
    assert!(Severity::Emergency < Severity::Alert);
    assert!(Severity::Info < Severity::Debug);
}

#[test]
fn test_label_of_out_of_range() {
    for rank in [-1, 8, 99, i64::MAX] {
        match label_of(rank) {
            Err(LoggerError::InvalidSeverity { value }) => assert_eq!(value, rank.to_string()),
            other => panic!("expected InvalidSeverity for {}, got {:?}", rank, other),
        }
    }
}

#[test]
fn test_parse_rank_and_label() {
    assert_eq!("3".parse::<Severity>().unwrap(), Severity::Error);
    assert_eq!(" 7 ".parse::<Severity>().unwrap(), Severity::Debug);
    assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
    assert_eq!("EMERGENCY".parse::<Severity>().unwrap(), Severity::Emergency);
}

#[test]
fn test_parse_rejects_unknown_values() {
    for value in ["8", "-1", "verbose", "", "3.5"] {
        assert!(
            matches!(
                value.parse::<Severity>(),
                Err(LoggerError::InvalidSeverity { .. })
            ),
            "'{}' should be rejected",
            value
        );
    }
}

// The admission rule over every (event, threshold) pair.
#[test]
fn test_admitted_by_follows_rank() {
    for event in Severity::all() {
        for threshold in Severity::all() {
            assert_eq!(
                event.admitted_by(threshold),
                event.rank() <= threshold.rank(),
                "{} vs threshold {}",
                event,
                threshold
            );
        }
    }
}

#[test]
fn test_into_severity_conversions() {
    assert_eq!(Severity::Notice.into_severity().unwrap(), Severity::Notice);
    assert_eq!(5i64.into_severity().unwrap(), Severity::Notice);
    assert_eq!(6i32.into_severity().unwrap(), Severity::Info);
    assert_eq!(2u8.into_severity().unwrap(), Severity::Critical);
    assert_eq!("alert".into_severity().unwrap(), Severity::Alert);
    assert!(42u8.into_severity().is_err());
}

#[test]
fn test_display_uses_label() {
    assert_eq!(Severity::Critical.to_string(), "critical");
}
