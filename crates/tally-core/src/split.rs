//! Split policy: how an expense's cost is divided between the two parties.
//!
//! The policy only decides who *owes* what; who paid is a separate fact the
//! reconciliation engine combines with the shares later.

use serde::{Deserialize, Serialize};

use crate::entry::SplitMode;
use crate::error::{Result, TallyError};
use crate::money;

/// Tolerance, in cents, allowed between a custom split's share sum and the
/// entry total. Custom shares come from two independently rounded decimal
/// fields, so they can disagree with the total by a cent or two.
pub const CUSTOM_SPLIT_TOLERANCE_CENTS: i64 = 2;

/// How to divide an expense between the two parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Split {
    /// Both shares computed by even split (odd cent to party A).
    Even,
    /// Caller supplies both shares directly.
    Custom {
        share_a_cents: i64,
        share_b_cents: i64,
    },
}

impl Split {
    /// Compute the `(party_a_owes, party_b_owes)` pair for a total.
    ///
    /// Custom shares must reconcile to the total within
    /// [`CUSTOM_SPLIT_TOLERANCE_CENTS`]; otherwise this is a
    /// `SplitMismatch`. Negative custom shares are a validation error.
    pub fn shares(&self, total_cents: i64) -> Result<(i64, i64)> {
        match *self {
            Split::Even => Ok(money::split_even(total_cents)),
            Split::Custom {
                share_a_cents,
                share_b_cents,
            } => {
                if share_a_cents < 0 || share_b_cents < 0 {
                    return Err(TallyError::Validation(
                        "split shares must be non-negative".to_string(),
                    ));
                }
                let diff = (share_a_cents + share_b_cents - total_cents).abs();
                if diff > CUSTOM_SPLIT_TOLERANCE_CENTS {
                    return Err(TallyError::SplitMismatch {
                        total_cents,
                        share_a_cents,
                        share_b_cents,
                    });
                }
                Ok((share_a_cents, share_b_cents))
            }
        }
    }

    /// The mode recorded on the stored entry.
    pub fn mode(&self) -> SplitMode {
        match self {
            Split::Even => SplitMode::Even,
            Split::Custom { .. } => SplitMode::Custom,
        }
    }
}
