use crate::{TzRuleError, TzRuleResult};

use web_time::{SystemTime, UNIX_EPOCH};

/// Returns the system time in milliseconds since the Unix epoch.
pub(crate) fn get_system_milliseconds() -> TzRuleResult<i64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TzRuleError::general("Error fetching system time"))
        .and_then(|d| {
            i64::try_from(d.as_millis())
                .map_err(|_| TzRuleError::range().with_message("System time is out of range."))
        })
}
