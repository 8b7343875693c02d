//! Constants used throughout the front desk core crate.

/// Wire format for appointment date-times (local time, minute precision).
pub const APPOINTMENT_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Wire format for dates of birth.
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Default number of appointments per dashboard page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Minimum trimmed length of a first or last name.
pub const MIN_NAME_CHARS: usize = 2;

/// Minimum trimmed length of a phone number.
pub const MIN_PHONE_CHARS: usize = 10;

/// Environment variable holding the dashboard page size.
pub const PAGE_SIZE_ENV: &str = "FRONTDESK_PAGE_SIZE";

/// Environment variable holding the default sort key.
pub const DEFAULT_SORT_ENV: &str = "FRONTDESK_DEFAULT_SORT";

/// Environment variable selecting the seed source (`builtin`, `none` or a YAML file path).
pub const SEED_ENV: &str = "FRONTDESK_SEED";
