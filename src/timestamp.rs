//! Timestamps used to name uploaded and generated files.

use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The current time in the server's local timezone, or UTC if the local
/// offset cannot be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// File name timestamp, e.g. "20240115_143005".
const FILE_TIMESTAMP_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year][month][day]_[hour][minute][second]");

/// File name timestamp with microseconds, e.g. "20240115_143005_000123".
const UNIQUE_TIMESTAMP_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year][month][day]_[hour][minute][second]_[subsecond digits:6]");

/// Format `date_time` as `YYYYMMDD_HHMMSS`.
///
/// # Errors
/// Returns [Error::InvalidTimestamp] if `date_time` cannot be formatted.
pub fn file_timestamp(date_time: OffsetDateTime) -> Result<String, Error> {
    date_time
        .format(FILE_TIMESTAMP_FORMAT)
        .map_err(|error| Error::InvalidTimestamp(error.to_string()))
}

/// Format `date_time` as `YYYYMMDD_HHMMSS_ffffff`, with microseconds so that
/// uploads in the same second get different names.
///
/// # Errors
/// Returns [Error::InvalidTimestamp] if `date_time` cannot be formatted.
pub fn unique_timestamp(date_time: OffsetDateTime) -> Result<String, Error> {
    date_time
        .format(UNIQUE_TIMESTAMP_FORMAT)
        .map_err(|error| Error::InvalidTimestamp(error.to_string()))
}

#[cfg(test)]
mod timestamp_tests {
    use time::macros::datetime;

    use super::{file_timestamp, unique_timestamp};

    #[test]
    fn formats_file_timestamp() {
        let date_time = datetime!(2024-01-05 09:03:07.012345 UTC);

        assert_eq!(file_timestamp(date_time).unwrap(), "20240105_090307");
    }

    #[test]
    fn formats_unique_timestamp() {
        let date_time = datetime!(2024-01-05 09:03:07.012345 UTC);

        assert_eq!(
            unique_timestamp(date_time).unwrap(),
            "20240105_090307_012345"
        );
    }

    #[test]
    fn pads_whole_second_with_zeros() {
        let date_time = datetime!(2024-12-31 23:59:59 UTC);

        assert_eq!(
            unique_timestamp(date_time).unwrap(),
            "20241231_235959_000000"
        );
    }
}
