//! # Request Types
//!
//! Explicit input structs for every write operation, replacing the
//! loosely-typed field maps the routing layer receives. Optional-field
//! defaulting happens here via serde (`reorder_level` defaults to 10,
//! `quantity` defaults to 0 on item creation); everything else is
//! checked by `validate()` before any storage call.

use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::validation::{
    validate_initial_quantity, validate_item_price, validate_line_price, validate_line_quantity,
    validate_name, validate_reorder_level,
};
use crate::{error::ValidationError, DEFAULT_REORDER_LEVEL};

fn default_reorder_level() -> i64 {
    DEFAULT_REORDER_LEVEL
}

// =============================================================================
// Inventory Items
// =============================================================================

/// Payload for creating an inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItemRequest {
    pub item_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Initial stock level; defaults to 0. After creation, stock is only
    /// ever changed by recording sales and supply orders.
    #[serde(default)]
    pub quantity: i64,
    pub unit_price_cents: i64,
    #[serde(default = "default_reorder_level")]
    pub reorder_level: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewItemRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("item_name", &self.item_name)?;
        validate_item_price(self.unit_price_cents)?;
        validate_initial_quantity(self.quantity)?;
        validate_reorder_level(self.reorder_level)?;
        Ok(())
    }
}

/// Payload for updating an inventory item.
///
/// There is deliberately no `quantity` field: stock levels are owned by
/// the ledger engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub item_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit_price_cents: i64,
    #[serde(default = "default_reorder_level")]
    pub reorder_level: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdateItemRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("item_name", &self.item_name)?;
        validate_item_price(self.unit_price_cents)?;
        validate_reorder_level(self.reorder_level)?;
        Ok(())
    }
}

// =============================================================================
// Clients & Vendors
// =============================================================================

/// Payload for creating or updating a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClientRequest {
    pub client_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewClientRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("client_name", &self.client_name)
    }
}

/// Payload for creating or updating a vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVendorRequest {
    pub vendor_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewVendorRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("vendor_name", &self.vendor_name)
    }
}

// =============================================================================
// Sales
// =============================================================================

/// One line of a new sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSaleLine {
    pub item_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for recording a sale: a header plus at least one line item.
///
/// Lines are applied in the order given; repeated `item_id`s are applied
/// independently and their stock effects accumulate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSaleRequest {
    /// `None` = walk-in sale.
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    pub items: Vec<NewSaleLine>,
}

impl NewSaleRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptyLineItems { kind: "sale" });
        }

        for line in &self.items {
            validate_line_quantity(line.quantity)?;
            validate_line_price("unit_price_cents", line.unit_price_cents)?;
        }

        Ok(())
    }
}

// =============================================================================
// Supply Orders
// =============================================================================

/// One line of a new supply order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplyLine {
    pub item_id: i64,
    pub quantity: i64,
    pub cost_price_cents: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for recording a supply order. Structural mirror of
/// [`NewSaleRequest`]; line items increment stock instead of
/// decrementing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplyOrderRequest {
    /// `None` = unassigned.
    #[serde(default)]
    pub vendor_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    pub items: Vec<NewSupplyLine>,
}

impl NewSupplyOrderRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.items.is_empty() {
            return Err(ValidationError::EmptyLineItems {
                kind: "supply order",
            });
        }

        for line in &self.items {
            validate_line_quantity(line.quantity)?;
            validate_line_price("cost_price_cents", line.cost_price_cents)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_request_defaults() {
        // quantity and reorder_level omitted from the wire payload
        let req: NewItemRequest =
            serde_json::from_str(r#"{"item_name":"Bolt M6","unit_price_cents":250}"#).unwrap();

        assert_eq!(req.quantity, 0);
        assert_eq!(req.reorder_level, DEFAULT_REORDER_LEVEL);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn item_request_rejects_non_positive_price() {
        let req: NewItemRequest =
            serde_json::from_str(r#"{"item_name":"Bolt M6","unit_price_cents":0}"#).unwrap();

        assert_eq!(
            req.validate(),
            Err(ValidationError::MustBePositive {
                field: "unit_price_cents"
            })
        );
    }

    #[test]
    fn sale_request_rejects_empty_batch() {
        let req = NewSaleRequest {
            client_id: None,
            notes: None,
            items: vec![],
        };

        assert_eq!(
            req.validate(),
            Err(ValidationError::EmptyLineItems { kind: "sale" })
        );
    }

    #[test]
    fn sale_request_rejects_bad_lines() {
        let mut req = NewSaleRequest {
            client_id: Some(1),
            notes: None,
            items: vec![NewSaleLine {
                item_id: 1,
                quantity: 0,
                unit_price_cents: 100,
                notes: None,
            }],
        };
        assert!(req.validate().is_err());

        req.items[0].quantity = 1;
        req.items[0].unit_price_cents = -1;
        assert!(req.validate().is_err());

        req.items[0].unit_price_cents = 0; // free line is fine
        assert!(req.validate().is_ok());
    }

    #[test]
    fn supply_request_mirrors_sale_rules() {
        let req = NewSupplyOrderRequest {
            vendor_id: None,
            notes: None,
            items: vec![],
        };
        assert_eq!(
            req.validate(),
            Err(ValidationError::EmptyLineItems {
                kind: "supply order"
            })
        );

        let req: NewSupplyOrderRequest = serde_json::from_str(
            r#"{"items":[{"item_id":1,"quantity":10,"cost_price_cents":400}]}"#,
        )
        .unwrap();
        assert!(req.vendor_id.is_none());
        assert!(req.validate().is_ok());
    }
}
