use crate::airtable::{Record, RecordSet, TableClient, TableError};
use serde::Deserialize;

/// Page cap for the unfiltered fetch. One page is enough for the tables
/// this serves; anything past the cap is invisible to the resolver.
const LIST_CAP: u32 = 100;

/// Shapes the assigned-person field takes in practice: a plain string, or
/// a list of linked-record tokens.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssignedTo {
    One(String),
    Many(Vec<String>),
}

impl AssignedTo {
    /// Linked-record tokens may embed the person id rather than equal it,
    /// so matching is substring containment. A person id that is a prefix
    /// of a longer token therefore also matches.
    fn matches(&self, person_id: &str) -> bool {
        match self {
            AssignedTo::One(value) => value.contains(person_id),
            AssignedTo::Many(values) => values.iter().any(|value| value.contains(person_id)),
        }
    }
}

/// Resolves which session records are assigned to a person.
///
/// Filtering happens client-side over an unfiltered fetch instead of with
/// a `filterByFormula` expression: the assigned-person column holds link
/// tokens that an exact-match formula under-matches.
#[derive(Clone)]
pub struct SessionResolver {
    client: TableClient,
    person_field: String,
}

impl SessionResolver {
    pub fn new(client: TableClient, person_field: impl Into<String>) -> Self {
        SessionResolver {
            client,
            person_field: person_field.into(),
        }
    }

    /// Returns the records assigned to `person_id`, shaped like the
    /// upstream list response. Any upstream failure aborts the whole
    /// operation; there are no partial results.
    pub async fn sessions_for(&self, person_id: &str) -> Result<RecordSet, TableError> {
        let all = self.client.list_records(Some(LIST_CAP)).await?;
        let fetched = all.records.len();

        let records: Vec<Record> = all
            .records
            .into_iter()
            .filter(|record| record_matches(record, &self.person_field, person_id))
            .collect();

        tracing::debug!(
            person_id,
            fetched,
            matched = records.len(),
            "filtered session records"
        );

        Ok(RecordSet { records })
    }
}

fn record_matches(record: &Record, person_field: &str, person_id: &str) -> bool {
    let Some(value) = record.fields.get(person_field) else {
        return false;
    };

    // A field that is neither a string nor a list of strings never matches.
    match serde_json::from_value::<AssignedTo>(value.clone()) {
        Ok(assigned) => assigned.matches(person_id),
        Err(_) => false,
    }
}
