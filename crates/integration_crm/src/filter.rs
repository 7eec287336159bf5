//! Customer search filters and their query-string encoding
//!
//! The customer endpoint takes nested array parameters in bracket notation:
//!
//! ```text
//! desired[0]=id&filter[0][key]=name.full&filter[0][value]=jane&relation=or
//! ```

/// Field paths understood by the customer endpoint
pub mod fields {
    /// Customer identifier
    pub const ID: &str = "id";
    /// Full display name
    pub const NAME_FULL: &str = "name.full";
    /// First name
    pub const NAME_FIRST: &str = "name.first";
    /// Middle name
    pub const NAME_MIDDLE: &str = "name.middle";
    /// Last name
    pub const NAME_LAST: &str = "name.last";
    /// Primary email address
    pub const PRIMARY_EMAIL: &str = "communication.email.primary.address";
    /// Face image URL from the driver's license scan
    pub const FACE_IMAGE: &str = "driversLicense.image.face";
}

/// Literal the API uses for "empty string" in comparisons
const EMPTY_LITERAL: &str = "''";

/// Comparison operator of a filter (equality when absent)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `!=`
    NotEqual,
}

impl Comparison {
    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotEqual => "!=",
        }
    }
}

/// How multiple filters combine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Any filter may match
    Or,
}

impl Relation {
    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Or => "or",
        }
    }
}

/// A single field filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    /// Field path
    pub key: &'static str,
    /// Value to compare against
    pub value: String,
    /// Operator, equality when `None`
    pub comparison: Option<Comparison>,
}

impl FieldFilter {
    /// `key == value`
    #[must_use]
    pub fn equals(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
            comparison: None,
        }
    }

    /// `key != ''`
    #[must_use]
    pub fn not_empty(key: &'static str) -> Self {
        Self {
            key,
            value: EMPTY_LITERAL.to_string(),
            comparison: Some(Comparison::NotEqual),
        }
    }
}

/// A customer search request: the fields to return plus the filters to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSearch {
    desired: Vec<&'static str>,
    filters: Vec<FieldFilter>,
    relation: Option<Relation>,
}

const CONTACT_FIELDS: [&str; 6] = [
    fields::ID,
    fields::NAME_FULL,
    fields::NAME_FIRST,
    fields::NAME_MIDDLE,
    fields::NAME_LAST,
    fields::PRIMARY_EMAIL,
];

impl CustomerSearch {
    /// Match `term` against the primary email or any name field
    #[must_use]
    pub fn by_name_or_email(term: &str) -> Self {
        let filters = [
            fields::PRIMARY_EMAIL,
            fields::NAME_FULL,
            fields::NAME_FIRST,
            fields::NAME_MIDDLE,
            fields::NAME_LAST,
        ]
        .into_iter()
        .map(|key| FieldFilter::equals(key, term))
        .collect();

        Self {
            desired: CONTACT_FIELDS.to_vec(),
            filters,
            relation: Some(Relation::Or),
        }
    }

    /// Match `email` against the primary email only
    #[must_use]
    pub fn by_exact_email(email: &str) -> Self {
        Self {
            desired: CONTACT_FIELDS.to_vec(),
            filters: vec![FieldFilter::equals(fields::PRIMARY_EMAIL, email)],
            relation: None,
        }
    }

    /// Find the face image of the customer with primary email `email`
    #[must_use]
    pub fn avatar_for(email: &str) -> Self {
        Self {
            desired: vec![fields::PRIMARY_EMAIL, fields::FACE_IMAGE],
            filters: vec![
                FieldFilter::equals(fields::PRIMARY_EMAIL, email),
                FieldFilter::not_empty(fields::PRIMARY_EMAIL),
                FieldFilter::not_empty(fields::FACE_IMAGE),
            ],
            relation: None,
        }
    }

    /// Requested fields
    #[must_use]
    pub fn desired(&self) -> &[&'static str] {
        &self.desired
    }

    /// Filters in order
    #[must_use]
    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// Filter relation, AND when `None`
    #[must_use]
    pub const fn relation(&self) -> Option<Relation> {
        self.relation
    }

    /// Encode as query-string pairs
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.desired.len() + self.filters.len() * 3 + 1);

        for (i, field) in self.desired.iter().enumerate() {
            pairs.push((format!("desired[{i}]"), (*field).to_string()));
        }

        for (i, filter) in self.filters.iter().enumerate() {
            pairs.push((format!("filter[{i}][key]"), filter.key.to_string()));
            pairs.push((format!("filter[{i}][value]"), filter.value.clone()));
            if let Some(comparison) = filter.comparison {
                pairs.push((
                    format!("filter[{i}][comparison]"),
                    comparison.as_str().to_string(),
                ));
            }
        }

        if let Some(relation) = self.relation {
            pairs.push(("relation".to_string(), relation.as_str().to_string()));
        }

        pairs
    }
}
