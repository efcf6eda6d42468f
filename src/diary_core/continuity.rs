//! Gap detection between the last recorded day and the present.

use crate::errors::ContinuityError;
use chrono::NaiveDate;

/// Returns the dates strictly between `last_recorded` and `current`, oldest first.
///
/// Walks backward one calendar day at a time from `current` until it reaches
/// `last_recorded`, then reverses what it collected. Equal dates produce an empty
/// sequence.
///
/// # Errors
///
/// Returns `ContinuityError::TemporalInconsistency` if `current` is before
/// `last_recorded`.
///
/// # Examples
///
/// ```
/// use autodiary::diary_core::resolve_gap;
/// use chrono::NaiveDate;
///
/// let last = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
/// let today = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
/// let missing = resolve_gap(last, today).unwrap();
/// assert_eq!(
///     missing,
///     vec![
///         NaiveDate::from_ymd_opt(2021, 1, 2).unwrap(),
///         NaiveDate::from_ymd_opt(2021, 1, 3).unwrap(),
///     ]
/// );
/// ```
pub fn resolve_gap(
    last_recorded: NaiveDate,
    current: NaiveDate,
) -> Result<Vec<NaiveDate>, ContinuityError> {
    if current < last_recorded {
        return Err(ContinuityError::TemporalInconsistency {
            last: last_recorded,
            current,
        });
    }

    let mut missing = Vec::new();
    let mut cursor = current;
    while let Some(previous) = cursor.pred_opt() {
        if previous <= last_recorded {
            break;
        }
        missing.push(previous);
        cursor = previous;
    }
    missing.reverse();
    Ok(missing)
}

/// The only date an append may carry after `last_recorded`.
pub fn next_expected_date(last_recorded: NaiveDate) -> Option<NaiveDate> {
    last_recorded.succ_opt()
}
