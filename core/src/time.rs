//! Time related utils.
//!
//! NOS signs the `Date` header in a fixed English, RFC-822 like layout that
//! differs from RFC 7231 in one detail: the day of month is not zero padded.
//! chrono's `%a` and `%b` always render English names, so the output does not
//! depend on the host locale.

use chrono::NaiveDateTime;
use chrono::SubsecRound;
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Layout of the date body: "Wed, 8 Jul 2021 08:38:54"
const DATE_BODY: &str = "%a, %-d %b %Y %H:%M:%S";

/// Layout used for parsing. Padding flags are ignored when parsing, `%d`
/// accepts both "8" and "08".
const DATE_BODY_PARSE: &str = "%a, %d %b %Y %H:%M:%S";

/// Zone suffix appended to every formatted date. Always `GMT`, the time is
/// converted to UTC before formatting.
const ZONE_SUFFIX: &str = "GMT";

/// Create datetime of now, truncated to seconds.
pub fn now() -> DateTime {
    Utc::now().trunc_subsecs(0)
}

/// Format time into the date format NOS signs.
///
/// - `Wed, 28 Jul 2021 08:38:54 GMT`
/// - `Thu, 8 Jul 2021 08:38:54 GMT`
///
/// Fractional seconds are dropped.
pub fn format_date(t: DateTime) -> String {
    format!("{} {ZONE_SUFFIX}", t.format(DATE_BODY))
}

/// Parse the date body produced by [`format_date`] back into time.
///
/// The trailing zone is decorative: callers are expected to pass the body
/// only (`Wed, 28 Jul 2021 08:38:54`). A trailing `GMT` is tolerated and
/// ignored, the result is always interpreted as UTC.
///
/// Returns `None` for malformed input, including a weekday that doesn't
/// match the date.
pub fn parse_date(s: &str) -> Option<DateTime> {
    let s = s.trim();
    let body = s.strip_suffix(ZONE_SUFFIX).map(str::trim_end).unwrap_or(s);

    NaiveDateTime::parse_from_str(body, DATE_BODY_PARSE)
        .ok()
        .map(|t| t.and_utc())
}
