/// Identifies a selectable LLM provider+model pair.
///
/// Two descriptors refer to the same model when provider id and model id
/// match; the display name is presentation-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub provider_id: String,
    pub model_id: String,
    pub display_name: String,
}

impl ModelDescriptor {
    pub fn new(
        provider_id: impl Into<String>,
        model_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            model_id: model_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Identity comparison: provider id + model id, ignoring the display name.
    pub fn same_model(&self, other: &ModelDescriptor) -> bool {
        self.provider_id == other.provider_id && self.model_id == other.model_id
    }
}

/// Picks a valid current model from the persisted choice and the live list of
/// enabled models.
///
/// A saved model that still appears in the enabled list is reused; otherwise
/// the first enabled model wins. An empty list yields `None`, which the
/// pipeline later surfaces as the "model not configured" placeholder.
///
/// Pure: calling it twice with the same arguments returns the same result.
pub fn reconcile(
    saved: Option<&ModelDescriptor>,
    enabled: &[ModelDescriptor],
) -> Option<ModelDescriptor> {
    if let Some(saved) = saved {
        if let Some(found) = enabled.iter().find(|m| m.same_model(saved)) {
            return Some(found.clone());
        }
    }
    enabled.first().cloned()
}
