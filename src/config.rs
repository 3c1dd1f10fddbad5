use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasmConfig {
    /// Prefix of synthesised branch labels (`label` -> `label1`, `label2`, ...)
    pub label_prefix: String,
    /// Number given to the first label allocated.
    pub first_label: u32,
}

impl Default for DisasmConfig {
    fn default() -> Self {
        Self {
            label_prefix: "label".to_string(),
            first_label: 1,
        }
    }
}

impl DisasmConfig {
    /// Name of the label allocated `nth` (zero-based).
    pub fn label_name(&self, nth: usize) -> String {
        let n = u64::from(self.first_label) + nth as u64;
        format!("{}{n}", self.label_prefix)
    }
}
