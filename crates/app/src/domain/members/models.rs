//! Member Models

use jiff::Timestamp;
use pantry::grades::Grade;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Identity of a member.
pub type MemberUuid = TypedUuid<Member>;

/// Identity of a member's shipping address.
pub type AddressUuid = TypedUuid<Address>;

/// A storefront member as the core sees it: grade and point balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub uuid: MemberUuid,
    pub grade: Grade,
    /// Point balance in whole currency units.
    pub points: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A shipping destination owned by a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub uuid: AddressUuid,
    pub owner: MemberUuid,
    pub recipient: String,
    /// Postal code; the leading digits drive the remote-region surcharge.
    pub postal_code: String,
    pub line1: String,
    pub line2: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
