//! Diplomatic agreements between villages

use serde::{Deserialize, Serialize};

use crate::core::types::VillageId;

/// Kind of pact two villages can enter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgreementKind {
    Alliance,
    Trade,
    Defense,
    Cultural,
}

/// A time-bounded pact. Expiry is terminal: once `active` drops to
/// false the agreement is never revived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiplomaticAgreement {
    pub kind: AgreementKind,
    pub first: VillageId,
    pub second: VillageId,
    pub terms: Vec<String>,
    /// Days remaining before expiry
    pub days_remaining: f32,
    pub active: bool,
}

impl DiplomaticAgreement {
    pub fn new(
        kind: AgreementKind,
        first: VillageId,
        second: VillageId,
        terms: Vec<String>,
        days_remaining: f32,
    ) -> Self {
        Self {
            kind,
            first,
            second,
            terms,
            days_remaining,
            active: true,
        }
    }

    pub fn involves(&self, id: VillageId) -> bool {
        self.first == id || self.second == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involves_both_parties() {
        let pact = DiplomaticAgreement::new(
            AgreementKind::Alliance,
            VillageId(1),
            VillageId(2),
            vec![],
            30.0,
        );
        assert!(pact.involves(VillageId(1)));
        assert!(pact.involves(VillageId(2)));
        assert!(!pact.involves(VillageId(3)));
    }
}
