//! Members Repository

use jiff::Timestamp;

use crate::{
    domain::members::{
        errors::PointsError,
        models::{Address, AddressUuid, Member, MemberUuid},
    },
    store::Transaction,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct MembersRepository;

impl MembersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn get_member(&self, tx: &Transaction, member: MemberUuid) -> Option<Member> {
        tx.tables_ref().members.get(&member).cloned()
    }

    pub(crate) fn insert_member(&self, tx: &mut Transaction, mut member: Member) -> Member {
        let now = Timestamp::now();
        member.created_at = now;
        member.updated_at = now;

        tx.tables().members.insert(member.uuid, member.clone());
        member
    }

    /// Adds to a member's point balance.
    pub(crate) fn credit_points(
        &self,
        tx: &mut Transaction,
        member: MemberUuid,
        amount: u64,
    ) -> Result<Member, PointsError> {
        let mut found = self.get_member(tx, member).ok_or(PointsError::NotFound)?;

        found.points += amount;
        found.updated_at = Timestamp::now();

        tx.tables().members.insert(found.uuid, found.clone());
        Ok(found)
    }

    /// Takes from a member's point balance, refusing to overdraw it.
    pub(crate) fn debit_points(
        &self,
        tx: &mut Transaction,
        member: MemberUuid,
        amount: u64,
    ) -> Result<Member, PointsError> {
        let mut found = self.get_member(tx, member).ok_or(PointsError::NotFound)?;

        if found.points < amount {
            return Err(PointsError::Insufficient {
                required: amount,
                available: found.points,
            });
        }

        found.points -= amount;
        found.updated_at = Timestamp::now();

        tx.tables().members.insert(found.uuid, found.clone());
        Ok(found)
    }

    /// Ownership-checked address lookup; a wrong owner reads as absent.
    pub(crate) fn get_address(
        &self,
        tx: &Transaction,
        address: AddressUuid,
        owner: MemberUuid,
    ) -> Option<Address> {
        tx.tables_ref()
            .addresses
            .get(&address)
            .filter(|found| found.owner == owner)
            .cloned()
    }

    pub(crate) fn insert_address(&self, tx: &mut Transaction, mut address: Address) -> Address {
        let now = Timestamp::now();
        address.created_at = now;
        address.updated_at = now;

        tx.tables().addresses.insert(address.uuid, address.clone());
        address
    }
}
