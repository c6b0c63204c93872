use chrono::NaiveDate;

use crate::game::Outcome;

pub const APP_NAME: &str = "Daily Define";
pub const FOOTER: &str = "define.today";

/// The copyable result text. There is nothing to share before a guess.
pub fn share_text(outcome: Outcome, date: NaiveDate) -> Option<String> {
    let outcome = outcome.label()?;
    Some(format!(
        "{APP_NAME}\n{}\n{outcome}\n{FOOTER}",
        date.format("%Y-%m-%d")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn incorrect_share_text() {
        assert_eq!(
            share_text(Outcome::Incorrect, may_first()).as_deref(),
            Some("Daily Define\n2024-05-01\nIncorrect\ndefine.today")
        );
    }

    #[test]
    fn correct_share_text() {
        assert_eq!(
            share_text(Outcome::Correct, may_first()).as_deref(),
            Some("Daily Define\n2024-05-01\nCorrect\ndefine.today")
        );
    }

    #[test]
    fn nothing_to_share_without_a_guess() {
        assert_eq!(share_text(Outcome::Unset, may_first()), None);
    }
}
