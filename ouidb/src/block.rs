use crate::{cidr_mask, HardwareAddr};

/// Default prefix length when a vendor list entry gives none: a classic OUI.
pub const DEFAULT_PREFIX_BITS: usize = 24;

/// A vendor assignment: every address whose first `prefix_bits` bits equal
/// `oui` belongs to `organization`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressBlock {
    pub oui: HardwareAddr,
    pub prefix_bits: usize,
    pub organization: String,
}

impl AddressBlock {
    /// `prefix_bits` wider than `oui` is clamped to its full width.
    pub fn new<S: Into<String>>(oui: HardwareAddr, prefix_bits: usize, organization: S) -> Self {
        let prefix_bits = prefix_bits.min(oui.bit_len());
        AddressBlock {
            oui,
            prefix_bits,
            organization: organization.into(),
        }
    }

    fn prefix_mask(&self) -> Vec<u8> {
        cidr_mask(self.prefix_bits, self.oui.bit_len())
    }

    /// Reports whether `address` falls inside this block.
    ///
    /// Only the address is masked; `oui` is compared as stored. An address of
    /// a different byte length than `oui` never matches.
    pub fn contains(&self, address: &HardwareAddr) -> bool {
        match address.mask(&self.prefix_mask()) {
            Some(masked) => masked == self.oui,
            None => false,
        }
    }

    /// True when no bit past `prefix_bits` is set in the stored `oui`. Blocks
    /// that fail this can never match anything through [`contains`](Self::contains).
    pub fn is_premasked(&self) -> bool {
        self.oui.mask(&self.prefix_mask()).as_ref() == Some(&self.oui)
    }
}
