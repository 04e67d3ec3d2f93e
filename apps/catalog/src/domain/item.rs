//! Inventory items.

use super::{Resource, ValidationErrors, non_blank};
use chrono::{DateTime, Utc};
use composable_crud_lifecycle::Entity;
use serde::{Deserialize, Serialize};

const QUANTITY_RULE: &str = "Quantity must be a non-negative integer";

/// A stocked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Server-assigned id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Units in stock
    pub quantity: u32,
}

/// Body of `POST /api/items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    /// Required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Defaults to 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

/// Body of `PUT /api/items/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New stock level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

impl ItemDraft {
    /// Draft with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            quantity: None,
        }
    }

    /// Set the initial quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

impl Resource for Item {
    type Draft = ItemDraft;
    type Patch = ItemPatch;

    const COLLECTION: &'static str = "items";
    const LABEL: &'static str = "Item";

    fn record_id(&self) -> u64 {
        self.id
    }

    fn from_draft(
        id: u64,
        draft: ItemDraft,
        _now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = non_blank(draft.name);
        errors.check(name.is_some(), "Name is required");

        let description = non_blank(draft.description);
        errors.check(description.is_some(), "Description is required");

        let quantity = u32::try_from(draft.quantity.unwrap_or(0)).ok();
        errors.check(quantity.is_some(), QUANTITY_RULE);

        match (name, description, quantity) {
            (Some(name), Some(description), Some(quantity)) => Ok(Self {
                id,
                name,
                description,
                quantity,
            }),
            _ => Err(errors),
        }
    }

    fn apply(&mut self, patch: ItemPatch, _now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = patch.name.map(|n| non_blank(Some(n)));
        errors.check(!matches!(name, Some(None)), "Name cannot be empty");

        let description = patch.description.map(|d| non_blank(Some(d)));
        errors.check(
            !matches!(description, Some(None)),
            "Description cannot be empty",
        );

        let quantity = patch.quantity.map(|q| u32::try_from(q).ok());
        errors.check(!matches!(quantity, Some(None)), QUANTITY_RULE);

        errors.finish(())?;

        if let Some(Some(name)) = name {
            self.name = name;
        }
        if let Some(Some(description)) = description {
            self.description = description;
        }
        if let Some(Some(quantity)) = quantity {
            self.quantity = quantity;
        }
        Ok(())
    }
}

impl Entity for Item {
    type Id = u64;
    type Draft = ItemDraft;
    type Patch = ItemPatch;

    const COLLECTION: &'static str = <Self as Resource>::COLLECTION;
    const LABEL: &'static str = <Self as Resource>::LABEL;

    fn id(&self) -> &u64 {
        &self.id
    }
}
