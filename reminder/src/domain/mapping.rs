//! Port-error to domain-error mapping shared by the use cases.

use crate::domain::Error;
use crate::domain::ports::{BillablePeopleRetrieverError, DeveloperRetrieverError};

pub(super) fn map_people_directory_error(error: BillablePeopleRetrieverError) -> Error {
    match error {
        BillablePeopleRetrieverError::Decode { .. } => {
            Error::internal(format!("people directory returned unusable data: {error}"))
        }
        BillablePeopleRetrieverError::Transport { .. }
        | BillablePeopleRetrieverError::Rejected { .. } => {
            Error::service_unavailable(error.to_string())
        }
    }
}

pub(super) fn map_developer_retriever_error(error: DeveloperRetrieverError) -> Error {
    match error {
        DeveloperRetrieverError::Decode { .. } => {
            Error::internal(format!("time tracking returned unusable data: {error}"))
        }
        DeveloperRetrieverError::Transport { .. } | DeveloperRetrieverError::Timeout { .. } => {
            Error::service_unavailable(error.to_string())
        }
    }
}
