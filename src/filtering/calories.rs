use serde_json::Value;

/// Key under which the calorie display string lives in the nutrients object
pub const CALORIES_KEY: &str = "calories";

/// Reduce a display string such as `"389 kcal"` or `"1,024 cal"` to a number.
///
/// Every character that is not an ASCII digit or `.` is dropped and the rest
/// is parsed as a float. Returns `None` when nothing parsable remains.
#[must_use]
pub fn parse_calorie_string(display: &str) -> Option<f64> {
    let numeric: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Derive the calorie value from a recipe's nutrients object.
///
/// Only string entries qualify; a number, a nested object or a missing key
/// yields `None`, which keeps the recipe out of every calorie-filtered result.
#[must_use]
pub fn extract_calories(nutrients: Option<&Value>) -> Option<f64> {
    nutrients?
        .get(CALORIES_KEY)?
        .as_str()
        .and_then(parse_calorie_string)
}
