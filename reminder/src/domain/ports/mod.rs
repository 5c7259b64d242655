//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod billable_people_retriever;
mod developer_retriever;
mod late_developers_query;
mod message_sender;

#[cfg(test)]
pub use billable_people_retriever::MockBillablePeopleRetriever;
#[cfg(any(test, feature = "test-support"))]
pub use billable_people_retriever::FixtureBillablePeopleRetriever;
pub use billable_people_retriever::{
    BillablePeopleRetriever, BillablePeopleRetrieverError, BillablePerson,
};
#[cfg(test)]
pub use developer_retriever::MockDeveloperRetriever;
pub use developer_retriever::{
    Developer, DeveloperRetriever, DeveloperRetrieverError, TimesheetPeriod,
};
#[cfg(test)]
pub use late_developers_query::MockLateDevelopersQuery;
#[cfg(any(test, feature = "test-support"))]
pub use late_developers_query::FixtureLateDevelopersQuery;
pub use late_developers_query::LateDevelopersQuery;
#[cfg(test)]
pub use message_sender::MockMessageSender;
#[cfg(any(test, feature = "test-support"))]
pub use message_sender::FixtureMessageSender;
pub use message_sender::{Message, MessageSendError, MessageSender, SendOutcome};
