//! Per-dispatch run parameters

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::reorder::bubble::BITS_PER_WORD;

/// Default formation threshold when the dispatcher does not supply one
pub const DEFAULT_MIN_TRIANGLES_PER_TREELET: u32 = 64;

/// Constant-buffer record supplied once per reorder dispatch
///
/// `element_count` bounds every index used against the node stores and
/// the bubble buffer. `min_triangles_per_treelet` is a policy threshold
/// consumed by treelet formation; it has no effect on the bitmap itself.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable, Serialize, Deserialize)]
pub struct ReorderParams {
    /// Number of hierarchy nodes in this dispatch
    pub element_count: u32,
    /// Minimum triangles a subtree must hold to form a treelet
    pub min_triangles_per_treelet: u32,
}

impl ReorderParams {
    pub fn new(element_count: u32, min_triangles_per_treelet: u32) -> Self {
        Self {
            element_count,
            min_triangles_per_treelet,
        }
    }

    /// Parameters with the default formation threshold
    pub fn with_defaults(element_count: u32) -> Self {
        Self::new(element_count, DEFAULT_MIN_TRIANGLES_PER_TREELET)
    }

    /// Validate parameters before they size any buffer
    pub fn validate(&self) -> Result<()> {
        if self.element_count == 0 {
            return Err(Error::Params(
                "element_count must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Bubble buffer size in 32-bit words for this dispatch
    pub fn bubble_word_count(&self) -> u32 {
        self.element_count.div_ceil(BITS_PER_WORD)
    }

    /// Save parameters to a JSON file
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize params: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate parameters from a JSON file
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)
            .map_err(|e| Error::Config(format!("Failed to parse params: {}", e)))?;
        params.validate()?;
        Ok(params)
    }
}
