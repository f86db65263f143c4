//! The state of what a page shows: the selected month, the display currency
//! and whether the add form is open.
//!
//! The state lives in the query string. Pages decode it with [ViewQuery],
//! links derive the next state with [ViewState::dispatch] and encode it back
//! into a URL with [ViewState::url].

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

use crate::{currency::Currency, period::Period};

/// The query parameters of a page, e.g. `?month=0&year=2024&currency=ZAR&form=true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub month: Option<u8>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub form: bool,
}

/// Deserialize an optional field from its text, treating a blank value like
/// `currency=` as missing.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) if !text.trim().is_empty() => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// A change to the view requested through a link or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    SelectPeriod(Period),
    SelectCurrency(Currency),
    ToggleForm,
    CloseForm,
}

/// What a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub period: Period,
    pub currency: Currency,
    pub show_form: bool,
}

impl ViewState {
    /// Resolve `query` into a view state.
    ///
    /// A missing or invalid month selects the month of `today` and a missing
    /// currency selects `default_currency`.
    pub fn from_query(query: ViewQuery, today: Date, default_currency: Currency) -> Self {
        let period = match (query.year, query.month) {
            (Some(year), Some(month)) => Period::new(year, month).unwrap_or_else(|error| {
                tracing::debug!("ignoring selected month: {error}");
                Period::from_date(today)
            }),
            _ => Period::from_date(today),
        };

        Self {
            period,
            currency: query.currency.unwrap_or(default_currency),
            show_form: query.form,
        }
    }

    /// The state after applying `action`.
    #[must_use]
    pub fn dispatch(self, action: ViewAction) -> Self {
        match action {
            ViewAction::SelectPeriod(period) => Self { period, ..self },
            ViewAction::SelectCurrency(currency) => Self { currency, ..self },
            ViewAction::ToggleForm => Self {
                show_form: !self.show_form,
                ..self
            },
            ViewAction::CloseForm => Self {
                show_form: false,
                ..self
            },
        }
    }

    /// Encode the state as a query string without the leading '?'.
    pub fn query_string(&self) -> String {
        let query = ViewQuery {
            month: Some(self.period.month()),
            year: Some(self.period.year()),
            currency: Some(self.currency),
            form: self.show_form,
        };

        serde_urlencoded::to_string(&query).unwrap_or_else(|error| {
            tracing::error!("could not encode view state {self:?}: {error}");
            String::new()
        })
    }

    /// The URL of `endpoint` showing this state.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{endpoint}?{}", self.query_string())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        currency::Currency,
        period::Period,
        view_state::{ViewAction, ViewQuery, ViewState},
    };

    fn parse(query: &str) -> ViewQuery {
        serde_urlencoded::from_str(query).unwrap()
    }

    #[test]
    fn defaults_to_current_month_and_default_currency() {
        let state = ViewState::from_query(parse(""), date!(2024 - 03 - 15), Currency::Inr);

        assert_eq!(
            state,
            ViewState {
                period: Period::new(2024, 2).unwrap(),
                currency: Currency::Inr,
                show_form: false,
            }
        );
    }

    #[test]
    fn decodes_selected_month_currency_and_form() {
        let state = ViewState::from_query(
            parse("month=11&year=2023&currency=INR&form=true"),
            date!(2024 - 03 - 15),
            Currency::Zar,
        );

        assert_eq!(state.period, Period::new(2023, 11).unwrap());
        assert_eq!(state.currency, Currency::Inr);
        assert!(state.show_form);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let query = parse("month=&year=&currency=");

        assert_eq!(query, ViewQuery::default());
        assert_eq!(
            ViewState::from_query(query, date!(2024 - 03 - 15), Currency::Inr),
            ViewState {
                period: Period::new(2024, 2).unwrap(),
                currency: Currency::Inr,
                show_form: false,
            }
        );
    }

    #[test]
    fn unknown_currency_is_rejected() {
        assert!(serde_urlencoded::from_str::<ViewQuery>("currency=USD").is_err());
    }

    #[test]
    fn invalid_month_falls_back_to_today() {
        let state = ViewState::from_query(
            parse("month=12&year=2023"),
            date!(2024 - 03 - 15),
            Currency::Zar,
        );

        assert_eq!(state.period, Period::new(2024, 2).unwrap());
    }

    #[test]
    fn dispatch_only_changes_the_targeted_field() {
        let state = ViewState {
            period: Period::new(2024, 0).unwrap(),
            currency: Currency::Zar,
            show_form: true,
        };

        let selected = state.dispatch(ViewAction::SelectPeriod(Period::new(2023, 5).unwrap()));
        assert_eq!(selected.period, Period::new(2023, 5).unwrap());
        assert_eq!(selected.currency, Currency::Zar);
        assert!(selected.show_form);

        let toggled = state.dispatch(ViewAction::ToggleForm);
        assert!(!toggled.show_form);
        assert!(toggled.dispatch(ViewAction::ToggleForm).show_form);

        assert!(!state.dispatch(ViewAction::CloseForm).show_form);
        assert_eq!(
            state.dispatch(ViewAction::SelectCurrency(Currency::Inr)).currency,
            Currency::Inr
        );
    }

    #[test]
    fn url_round_trips_through_the_query_string() {
        let state = ViewState {
            period: Period::new(2023, 11).unwrap(),
            currency: Currency::Inr,
            show_form: false,
        };

        assert_eq!(
            state.url("/dashboard"),
            "/dashboard?month=11&year=2023&currency=INR"
        );

        let decoded = ViewState::from_query(
            parse(&state.query_string()),
            date!(2024 - 03 - 15),
            Currency::Zar,
        );
        assert_eq!(decoded, state);
    }
}
