//! Unique-author counting strategies.

use crate::corpus::Corpus;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Size of the deduplicated author table.
    #[default]
    Exact,
}

impl Cardinality {
    pub fn count(&self, corpus: &Corpus) -> usize {
        match self {
            Cardinality::Exact => corpus.users().len(),
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cardinality::Exact => "exact",
        })
    }
}
