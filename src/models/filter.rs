use serde::{Deserialize, Serialize};

use crate::models::{macros::str_opt_ref, Model};

/// A content filter: which tags get spoilered or hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    /// The id of the filter.
    id: u64,
    /// The name of the filter.
    name: String,
    /// The description of the filter.
    description: String,
    /// The id of the user the filter belongs to. `None` for system filters.
    user_id: Option<u64>,
    /// The amount of users employing this filter.
    user_count: u32,
    /// Whether this is a system filter, usable by anyone.
    system: bool,
    /// Whether this is a public filter, usable by anyone.
    public: bool,
    /// Tag IDs this filter spoilers.
    spoilered_tag_ids: Vec<u64>,
    /// The complex spoiler filter.
    spoilered_complex: Option<String>,
    /// Tag IDs this filter hides.
    hidden_tag_ids: Vec<u64>,
    /// The complex hidden filter.
    hidden_complex: Option<String>,
}

impl Model for Filter {
    const NAME: &'static str = "Filter";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "user_id",
        "user_count",
        "system",
        "public",
        "spoilered_tag_ids",
        "spoilered_complex",
        "hidden_tag_ids",
        "hidden_complex",
    ];
}

impl Filter {
    /// Returns the filter's ID, usable as the `filter_id` parameter.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the filter's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the filter's description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owner's ID, `None` for system filters.
    pub fn user_id(&self) -> Option<u64> {
        self.user_id
    }

    /// Returns the number of users employing the filter.
    pub fn user_count(&self) -> u32 {
        self.user_count
    }

    /// Returns whether this is a system filter.
    pub fn system(&self) -> bool {
        self.system
    }

    /// Returns whether this filter is public.
    pub fn public(&self) -> bool {
        self.public
    }

    /// Returns the spoilered tag IDs.
    pub fn spoilered_tag_ids(&self) -> &[u64] {
        &self.spoilered_tag_ids
    }

    /// Returns the complex spoiler query, if any.
    pub fn spoilered_complex(&self) -> Option<&str> {
        str_opt_ref!(self.spoilered_complex)
    }

    /// Returns the hidden tag IDs.
    pub fn hidden_tag_ids(&self) -> &[u64] {
        &self.hidden_tag_ids
    }

    /// Returns the complex hide query, if any.
    pub fn hidden_complex(&self) -> Option<&str> {
        str_opt_ref!(self.hidden_complex)
    }
}
