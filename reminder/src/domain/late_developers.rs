//! Late-developer finder joining time-tracking data to the chat roster.
//!
//! A developer is late when their time-tracking account is active and no
//! hours were logged between Monday of the current week and today. Late
//! developers are reported by chat identifier, matched on email
//! case-insensitively, in the order the time-tracking service listed them.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Days, FixedOffset, Utc};
use mockable::Clock;
use tracing::debug;

use crate::domain::Error;
use crate::domain::ports::{
    BillablePeopleRetriever, DeveloperRetriever, LateDevelopersQuery, TimesheetPeriod,
};

use super::mapping::{map_developer_retriever_error, map_people_directory_error};

/// Domain service implementing [`LateDevelopersQuery`].
pub struct LateDevelopersFinder {
    developers: Arc<dyn DeveloperRetriever>,
    people: Arc<dyn BillablePeopleRetriever>,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
}

impl LateDevelopersFinder {
    /// Create the finder; `offset` decides which calendar day "today" is.
    pub fn new(
        developers: Arc<dyn DeveloperRetriever>,
        people: Arc<dyn BillablePeopleRetriever>,
        clock: Arc<dyn Clock>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            developers,
            people,
            clock,
            offset,
        }
    }
}

#[async_trait]
impl LateDevelopersQuery for LateDevelopersFinder {
    async fn find_late_developers(&self) -> Result<Vec<String>, Error> {
        let period = current_period(self.clock.utc(), self.offset);
        let developers = self
            .developers
            .retrieve_developers(&period)
            .await
            .map_err(map_developer_retriever_error)?;
        let people = self
            .people
            .retrieve_billable_people()
            .await
            .map_err(map_people_directory_error)?;

        let ids_by_email = people
            .into_iter()
            .map(|person| (person.email.to_lowercase(), person.id))
            .collect::<HashMap<_, _>>();

        let mut seen = HashSet::new();
        let mut late_ids = Vec::new();
        for developer in developers
            .iter()
            .filter(|developer| developer.is_active && !developer.has_submitted())
        {
            let Some(id) = ids_by_email.get(&developer.email.to_lowercase()) else {
                debug!(developer_id = developer.id, "late developer has no billable chat account");
                continue;
            };
            if seen.insert(id.as_str()) {
                late_ids.push(id.clone());
            }
        }
        Ok(late_ids)
    }
}

/// Monday of the week containing `now` (at `offset`) through that day.
fn current_period(now: DateTime<Utc>, offset: FixedOffset) -> TimesheetPeriod {
    let today = now.with_timezone(&offset).date_naive();
    let since_monday = Days::new(u64::from(today.weekday().num_days_from_monday()));
    TimesheetPeriod {
        from: today.checked_sub_days(since_monday).unwrap_or(today),
        to: today,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        BillablePerson, Developer, DeveloperRetrieverError, FixtureBillablePeopleRetriever,
        MockDeveloperRetriever,
    };
    use crate::test_support::FixedClock;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn developer(id: u64, email: &str, is_active: bool, logged_hours: f64) -> Developer {
        Developer {
            id,
            first_name: "First".to_owned(),
            last_name: "Last".to_owned(),
            email: email.to_owned(),
            is_active,
            logged_hours,
        }
    }

    fn person(id: &str, email: &str) -> BillablePerson {
        BillablePerson {
            id: id.to_owned(),
            email: email.to_owned(),
        }
    }

    #[fixture]
    fn roster() -> FixtureBillablePeopleRetriever {
        FixtureBillablePeopleRetriever::new(vec![
            person("W0123CHAN", "chandler@friends.com"),
            person("W123AMON", "monica@friends.com"),
            person("W789ROSS", "ross@friends.com"),
            person("W345JOEY", "joey@friends.com"),
        ])
    }

    fn finder(
        developers: MockDeveloperRetriever,
        people: FixtureBillablePeopleRetriever,
    ) -> LateDevelopersFinder {
        // Friday 2019-03-01 13:30 UTC.
        let now = Utc
            .with_ymd_and_hms(2019, 3, 1, 13, 30, 0)
            .single()
            .expect("valid time");
        LateDevelopersFinder::new(
            Arc::new(developers),
            Arc::new(people),
            Arc::new(FixedClock::new(now)),
            FixedOffset::east_opt(0).expect("offset"),
        )
    }

    fn developers_returning(list: Vec<Developer>) -> MockDeveloperRetriever {
        let mut developers = MockDeveloperRetriever::new();
        developers
            .expect_retrieve_developers()
            .times(1)
            .returning(move |_| Ok(list.clone()));
        developers
    }

    #[rstest]
    #[tokio::test]
    async fn reports_active_developers_without_hours_in_harvest_order(
        roster: FixtureBillablePeopleRetriever,
    ) {
        let developers = developers_returning(vec![
            developer(3, "ross@friends.com", true, 0.0),
            developer(1, "Chandler@Friends.com", true, 0.0),
            developer(2, "monica@friends.com", true, 32.5),
            developer(4, "joey@friends.com", false, 0.0),
        ]);

        let late = finder(developers, roster)
            .find_late_developers()
            .await
            .expect("query");

        assert_eq!(late, vec!["W789ROSS", "W0123CHAN"]);
    }

    #[rstest]
    #[tokio::test]
    async fn nobody_late_is_an_empty_list(roster: FixtureBillablePeopleRetriever) {
        let developers = developers_returning(vec![developer(2, "monica@friends.com", true, 8.0)]);

        let late = finder(developers, roster)
            .find_late_developers()
            .await
            .expect("query");

        assert!(late.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn developers_without_chat_accounts_are_dropped(roster: FixtureBillablePeopleRetriever) {
        let developers = developers_returning(vec![
            developer(9, "gunther@centralperk.com", true, 0.0),
            developer(1, "chandler@friends.com", true, 0.0),
            developer(10, "chandler@friends.com", true, 0.0),
        ]);

        let late = finder(developers, roster)
            .find_late_developers()
            .await
            .expect("query");

        assert_eq!(late, vec!["W0123CHAN"]);
    }

    #[rstest]
    #[tokio::test]
    async fn queries_monday_through_today(roster: FixtureBillablePeopleRetriever) {
        let mut developers = MockDeveloperRetriever::new();
        developers
            .expect_retrieve_developers()
            .withf(|period| period.from == date(2019, 2, 25) && period.to == date(2019, 3, 1))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let late = finder(developers, roster)
            .find_late_developers()
            .await
            .expect("query");

        assert!(late.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn retriever_failure_maps_to_service_unavailable(roster: FixtureBillablePeopleRetriever) {
        let mut developers = MockDeveloperRetriever::new();
        developers
            .expect_retrieve_developers()
            .times(1)
            .returning(|_| Err(DeveloperRetrieverError::timeout("30s elapsed")));

        let error = finder(developers, roster)
            .find_late_developers()
            .await
            .expect_err("must fail");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[case::monday(2019, 2, 25, 2019, 2, 25)]
    #[case::sunday(2019, 3, 3, 2019, 2, 25)]
    #[case::month_boundary(2019, 3, 1, 2019, 2, 25)]
    fn period_starts_on_monday(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] from_year: i32,
        #[case] from_month: u32,
        #[case] from_day: u32,
    ) {
        let now = Utc
            .with_ymd_and_hms(year, month, day, 9, 0, 0)
            .single()
            .expect("valid time");
        let period = current_period(now, FixedOffset::east_opt(0).expect("offset"));
        assert_eq!(period.from, date(from_year, from_month, from_day));
        assert_eq!(period.to, date(year, month, day));
    }
}
