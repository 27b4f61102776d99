//! Read-only order projection returned by searches

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One shipment joined with its location, owning company and optional carrier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mysql", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: i64,
    pub tracking_no: Option<String>,
    pub order_no: Option<String>,
    pub service: Option<String>,
    pub status: Option<String>,
    pub collected_by_type: Option<String>,
    pub recipient_phone: Option<String>,
    pub compartment_no: Option<i32>,
    pub time_created: NaiveDateTime,
    pub time_stored: Option<NaiveDateTime>,
    pub time_collected: Option<NaiveDateTime>,
    pub expires_at: Option<NaiveDateTime>,
    /// Comma-joined flag tokens, e.g. `EXPIRED,VIP`
    pub flags: Option<String>,
    pub location_name: Option<String>,
    pub location_type: Option<String>,
    pub city: Option<String>,
    pub company_name: Option<String>,
    pub carrier_name: Option<String>,
}

impl OrderRow {
    /// Flag tokens of the comma-joined column, split exactly as
    /// `FIND_IN_SET` splits them (no trimming)
    pub fn flag_tokens(&self) -> impl Iterator<Item = &str> {
        self.flags.as_deref().into_iter().flat_map(|f| f.split(','))
    }
}
