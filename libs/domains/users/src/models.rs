use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::{UserError, UserResult};

/// Wire format for dates: `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// User entity - matches SQL schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier, immutable once created
    pub id: i32,
    /// Display name
    pub name: String,
    /// Calendar date, no time or zone attached
    pub date_of_birth: NaiveDate,
}

/// User response DTO with the derived age
///
/// `age` is computed from `dob` at response-construction time and is never
/// persisted. It is omitted from JSON when zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    /// Date of birth formatted as `YYYY-MM-DD`
    pub dob: String,
    #[serde(default, skip_serializing_if = "age_is_zero")]
    pub age: i32,
}

fn age_is_zero(age: &i32) -> bool {
    *age == 0
}

impl UserResponse {
    /// Build a response from a stored user.
    ///
    /// Formats the date of birth and derives the age from the formatted
    /// string, so a malformed date surfaces as `InvalidDate` rather than a
    /// panic.
    pub fn from_user(user: &User) -> UserResult<Self> {
        let dob = user.date_of_birth.format(DATE_FORMAT).to_string();
        let age = calculate_age(&dob)?;

        Ok(Self {
            id: user.id,
            name: user.name.clone(),
            dob,
            age,
        })
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    /// Date of birth as `YYYY-MM-DD`
    #[validate(custom(function = validate_dob))]
    pub dob: String,
}

/// DTO for updating an existing user
///
/// Updates are a full replace, not a patch: both fields are required.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    /// Date of birth as `YYYY-MM-DD`
    #[validate(custom(function = validate_dob))]
    pub dob: String,
}

/// Query parameters for listing users
///
/// `page` is 1-based. Defaults and clamping are applied by the handler.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListUsersQuery {
    pub limit: Option<u64>,
    pub page: Option<u64>,
}

fn validate_dob(dob: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(dob, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::new("date_format").with_message("expected YYYY-MM-DD".into()))
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(dob: &str) -> UserResult<NaiveDate> {
    NaiveDate::parse_from_str(dob, DATE_FORMAT).map_err(|_| UserError::InvalidDate(dob.to_string()))
}

/// Calculate a user's age in whole years from a `YYYY-MM-DD` string.
///
/// Returns `InvalidDate` when the string does not parse.
pub fn calculate_age(dob: &str) -> UserResult<i32> {
    let date_of_birth = parse_date(dob)?;
    Ok(age_at(date_of_birth, Local::now().date_naive()))
}

/// Age in whole years as of `today`.
///
/// The "has the birthday happened yet" check compares day-of-year ordinals
/// rather than month/day pairs; around leap days this can differ by one
/// from the calendar answer. That behavior is load-bearing for existing
/// consumers and must not be corrected silently.
fn age_at(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if today.ordinal() < date_of_birth.ordinal() {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_age_before_birthday() {
        // Birthday (ordinal 166) is later in the year than June 1 (ordinal 152)
        assert_eq!(age_at(date("1990-06-15"), date("2024-06-01")), 33);
    }

    #[test]
    fn test_age_on_birthday() {
        assert_eq!(age_at(date("1990-06-15"), date("2024-06-15")), 34);
    }

    #[test]
    fn test_age_after_birthday() {
        assert_eq!(age_at(date("1990-06-15"), date("2024-07-01")), 34);
    }

    #[test]
    fn test_age_uses_day_of_year_ordinals() {
        // 2024 is a leap year, so March 1 is ordinal 61 while the birthday
        // (March 1, 1995) is ordinal 60. The ordinal comparison considers
        // the birthday already passed on Feb 29.
        assert_eq!(age_at(date("1995-03-01"), date("2024-02-29")), 29);
        // In a non-leap year the same comparison says not-yet on Feb 28
        assert_eq!(age_at(date("1995-03-01"), date("2023-02-28")), 27);
    }

    #[test]
    fn test_age_zero_for_newborn() {
        assert_eq!(age_at(date("2024-01-10"), date("2024-03-01")), 0);
    }

    #[test]
    fn test_calculate_age_invalid_date() {
        let err = calculate_age("not-a-date").unwrap_err();
        assert!(matches!(err, UserError::InvalidDate(_)));

        let err = calculate_age("2024-13-40").unwrap_err();
        assert!(matches!(err, UserError::InvalidDate(_)));
    }

    #[test]
    fn test_calculate_age_is_non_negative_for_past_dates() {
        let age = calculate_age("1990-06-15").unwrap();
        assert!(age >= 33);
    }

    #[test]
    fn test_from_user_round_trips_the_date() {
        let user = User {
            id: 7,
            name: "Ada".to_string(),
            date_of_birth: date("1990-06-15"),
        };

        let response = UserResponse::from_user(&user).unwrap();
        assert_eq!(response.id, 7);
        assert_eq!(response.name, "Ada");
        assert_eq!(response.dob, "1990-06-15");
        assert_eq!(parse_date(&response.dob).unwrap(), user.date_of_birth);
    }

    #[test]
    fn test_age_omitted_from_json_when_zero() {
        let response = UserResponse {
            id: 1,
            name: "Newborn".to_string(),
            dob: "2024-01-10".to_string(),
            age: 0,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("age").is_none());

        let response = UserResponse { age: 34, ..response };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["age"], 34);
    }

    #[test]
    fn test_create_user_validation() {
        let valid = CreateUser {
            name: "Ada Lovelace".to_string(),
            dob: "1990-06-15".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_name = CreateUser {
            name: "A".to_string(),
            dob: "1990-06-15".to_string(),
        };
        assert!(short_name.validate().is_err());

        let long_name = CreateUser {
            name: "x".repeat(101),
            dob: "1990-06-15".to_string(),
        };
        assert!(long_name.validate().is_err());

        let bad_date = CreateUser {
            name: "Ada Lovelace".to_string(),
            dob: "15/06/1990".to_string(),
        };
        assert!(bad_date.validate().is_err());
    }
}
