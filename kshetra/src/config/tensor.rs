//! Tensor configuration section.

use serde::{Deserialize, Serialize};

use crate::core::StorageOrder;

use super::defaults;

/// Tensor layout section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TensorSection {
    /// Storage order of tensors created from configuration
    #[serde(default = "defaults::storage_order")]
    pub order: StorageOrder,
}

impl Default for TensorSection {
    fn default() -> Self {
        Self {
            order: defaults::storage_order(),
        }
    }
}

impl TensorSection {
    /// Is the configured order C order?
    pub fn is_row_major(&self) -> bool {
        self.order.is_row_major()
    }
}
