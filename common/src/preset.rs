use crate::req::{Preset, SensorType, Threshold};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Preset name cannot be empty")]
    EmptyName,
    #[error("Preset names cannot be the same")]
    DuplicateName,
    #[error("{0} thresholds must be set")]
    MissingThreshold(SensorType),
    #[error("{0} minimum cannot be above its maximum")]
    InvertedThreshold(SensorType),
    #[error("This preset is already applied!")]
    AlreadyApplied,
    #[error("Save the preset before applying it")]
    NotStored,
    #[error("Press Update to edit this preset")]
    ReadOnly,
}

/// Checks a preset before it is sent to the backend.
pub fn validate_preset(preset: &Preset) -> Result<(), FormError> {
    if preset.name.trim().is_empty() {
        return Err(FormError::EmptyName);
    }
    for kind in SensorType::ALL {
        let threshold = preset
            .threshold(kind)
            .ok_or(FormError::MissingThreshold(kind))?;
        if !threshold.is_set() {
            return Err(FormError::MissingThreshold(kind));
        }
        if threshold.min > threshold.max {
            return Err(FormError::InvertedThreshold(kind));
        }
    }
    Ok(())
}

/// A new preset may not reuse any stored name, an update only names of other presets.
pub fn check_unique_name(preset: &Preset, presets: &[Preset]) -> Result<(), FormError> {
    let taken = presets
        .iter()
        .filter(|p| preset.id.is_none() || p.id != preset.id)
        .any(|p| p.name == preset.name);
    if taken {
        return Err(FormError::DuplicateName);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Create(Preset),
    Update(i32, Preset),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyButton {
    pub label: &'static str,
    pub enabled: bool,
}

/// What the preset editor currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PresetForm {
    /// Read-only view of a stored preset.
    Viewing(Preset),
    /// Edits of a stored preset, `snapshot` is restored on cancel.
    Editing { draft: Preset, snapshot: Preset },
    Creating(Preset),
}

impl Default for PresetForm {
    fn default() -> Self {
        Self::Creating(Preset::blank())
    }
}

impl PresetForm {
    pub fn preset(&self) -> &Preset {
        match self {
            Self::Viewing(preset) | Self::Creating(preset) => preset,
            Self::Editing { draft, .. } => draft,
        }
    }

    fn preset_mut(&mut self) -> Option<&mut Preset> {
        match self {
            Self::Viewing(_) => None,
            Self::Creating(preset) => Some(preset),
            Self::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Viewing(_))
    }

    pub fn is_creating(&self) -> bool {
        matches!(self, Self::Creating(_))
    }

    /// Shows the stored preset with `id`, `None` if it is not in the list.
    pub fn select(presets: &[Preset], id: i32) -> Option<Self> {
        presets
            .iter()
            .find(|p| p.id == Some(id))
            .map(|p| Self::Viewing(p.clone()))
    }

    pub fn begin_update(&mut self) {
        if let Self::Viewing(preset) = self {
            let snapshot = preset.clone();
            *self = Self::Editing {
                draft: snapshot.clone(),
                snapshot,
            };
        }
    }

    pub fn cancel(&mut self) {
        if let Self::Editing { snapshot, .. } = self {
            *self = Self::Viewing(snapshot.clone());
        }
    }

    pub fn create_new(&mut self) {
        *self = Self::default();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(preset) = self.preset_mut() {
            preset.name = name.into();
        }
    }

    pub fn set_threshold(&mut self, threshold: Threshold) {
        if let Some(preset) = self.preset_mut() {
            preset.set_threshold(threshold);
        }
    }

    /// True while editing and the draft differs from the stored preset.
    pub fn is_dirty(&self) -> bool {
        match self {
            Self::Editing { draft, snapshot } => draft != snapshot,
            _ => false,
        }
    }

    /// The request to issue for "Save". Every error is local, nothing is sent.
    pub fn save(&self, presets: &[Preset]) -> Result<SaveRequest, FormError> {
        match self {
            Self::Viewing(_) => Err(FormError::ReadOnly),
            Self::Creating(preset) => {
                validate_preset(preset)?;
                check_unique_name(preset, presets)?;
                Ok(SaveRequest::Create(preset.clone()))
            }
            Self::Editing { draft, .. } => {
                validate_preset(draft)?;
                check_unique_name(draft, presets)?;
                let id = draft.id.ok_or(FormError::NotStored)?;
                Ok(SaveRequest::Update(id, draft.clone()))
            }
        }
    }

    /// Called once the backend accepted the save request.
    pub fn saved(&mut self) {
        if let Self::Editing { draft, .. } = self {
            *self = Self::Viewing(draft.clone());
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::Creating(_) => "Create new preset".to_string(),
            Self::Viewing(preset) => format!("{} preset", preset.name),
            Self::Editing { snapshot, .. } => format!("{} preset", snapshot.name),
        }
    }

    /// Only shown while viewing.
    pub fn apply_button(&self, current: Option<&Preset>, presets: &[Preset]) -> Option<ApplyButton> {
        let Self::Viewing(preset) = self else {
            return None;
        };
        let applied = preset.id.is_some() && current.map(|c| c.id) == Some(preset.id);
        let stored = preset.id.is_some() && presets.iter().any(|p| p.id == preset.id);
        Some(ApplyButton {
            label: if applied { "Applied" } else { "Apply" },
            enabled: stored && !applied,
        })
    }

    /// Id to post as the new current preset.
    pub fn apply(&self, current: Option<&Preset>) -> Result<i32, FormError> {
        let preset = match self {
            Self::Viewing(preset) => preset,
            _ => return Err(FormError::NotStored),
        };
        let id = preset.id.ok_or(FormError::NotStored)?;
        if let Some(current) = current {
            if current.id == Some(id) || current.name == preset.name {
                return Err(FormError::AlreadyApplied);
            }
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(id: Option<i32>, name: &str) -> Preset {
        Preset {
            id,
            name: name.to_string(),
            thresholds: vec![
                Threshold {
                    kind: SensorType::Temperature,
                    min: 18.0,
                    max: 26.0,
                },
                Threshold {
                    kind: SensorType::Humidity,
                    min: 40.0,
                    max: 70.0,
                },
                Threshold {
                    kind: SensorType::Co2,
                    min: 400.0,
                    max: 1200.0,
                },
            ],
        }
    }

    fn stored() -> Vec<Preset> {
        vec![preset(Some(1), "A"), preset(Some(2), "B")]
    }

    #[test]
    fn duplicate_new_name_is_rejected_locally() {
        let form = PresetForm::Creating(preset(None, "A"));
        assert_eq!(form.save(&stored()), Err(FormError::DuplicateName));
        assert_eq!(FormError::DuplicateName.to_string(), "Preset names cannot be the same");
    }

    #[test]
    fn new_preset_with_fresh_name_is_created() {
        let form = PresetForm::Creating(preset(None, "C"));
        assert_eq!(
            form.save(&stored()),
            Ok(SaveRequest::Create(preset(None, "C")))
        );
    }

    #[test]
    fn update_may_keep_its_own_name() {
        let mut form = PresetForm::select(&stored(), 1).unwrap();
        form.begin_update();
        assert_eq!(
            form.save(&stored()),
            Ok(SaveRequest::Update(1, preset(Some(1), "A")))
        );

        form.set_name("B");
        assert_eq!(form.save(&stored()), Err(FormError::DuplicateName));
    }

    #[test]
    fn blank_preset_fails_validation() {
        let mut form = PresetForm::default();
        assert_eq!(form.save(&[]), Err(FormError::EmptyName));

        form.set_name("Herbs");
        assert_eq!(
            form.save(&[]),
            Err(FormError::MissingThreshold(SensorType::Temperature))
        );

        let mut inverted = preset(None, "Herbs");
        inverted.set_threshold(Threshold {
            kind: SensorType::Co2,
            min: 900.0,
            max: 500.0,
        });
        assert_eq!(
            validate_preset(&inverted),
            Err(FormError::InvertedThreshold(SensorType::Co2))
        );
    }

    #[test]
    fn cancel_restores_the_snapshot() {
        let mut form = PresetForm::select(&stored(), 2).unwrap();
        form.begin_update();
        form.set_name("Renamed");
        form.set_threshold(Threshold {
            kind: SensorType::Humidity,
            min: 10.0,
            max: 20.0,
        });
        assert!(form.is_dirty());
        assert_eq!(form.title(), "B preset");

        form.cancel();
        assert_eq!(form, PresetForm::Viewing(preset(Some(2), "B")));
    }

    #[test]
    fn viewing_is_read_only() {
        let mut form = PresetForm::select(&stored(), 1).unwrap();
        form.set_name("changed");
        assert_eq!(form.preset().name, "A");
        assert!(!form.is_editable());
        assert_eq!(form.save(&stored()), Err(FormError::ReadOnly));
    }

    #[test]
    fn successful_update_returns_to_viewing() {
        let mut form = PresetForm::select(&stored(), 1).unwrap();
        form.begin_update();
        form.set_name("A2");
        form.saved();
        assert_eq!(form, PresetForm::Viewing(preset(Some(1), "A2")));
        assert_eq!(form.title(), "A2 preset");
    }

    #[test]
    fn unknown_selection_is_ignored() {
        assert_eq!(PresetForm::select(&stored(), 42), None);
    }

    #[test]
    fn create_new_starts_blank() {
        let mut form = PresetForm::select(&stored(), 1).unwrap();
        form.create_new();
        assert!(form.is_creating());
        assert_eq!(form.title(), "Create new preset");
        assert_eq!(form.preset().thresholds.len(), 3);
        assert!(form.preset().thresholds.iter().all(|t| !t.is_set()));
    }

    #[test]
    fn apply_button_states() {
        let presets = stored();
        let current = presets[0].clone();

        let form = PresetForm::select(&presets, 1).unwrap();
        assert_eq!(
            form.apply_button(Some(&current), &presets),
            Some(ApplyButton {
                label: "Applied",
                enabled: false
            })
        );
        assert_eq!(form.apply(Some(&current)), Err(FormError::AlreadyApplied));

        let form = PresetForm::select(&presets, 2).unwrap();
        assert_eq!(
            form.apply_button(Some(&current), &presets),
            Some(ApplyButton {
                label: "Apply",
                enabled: true
            })
        );
        assert_eq!(form.apply(Some(&current)), Ok(2));
        assert_eq!(form.apply(None), Ok(2));

        let mut editing = form.clone();
        editing.begin_update();
        assert_eq!(editing.apply_button(Some(&current), &presets), None);
        assert_eq!(PresetForm::default().apply_button(None, &presets), None);
    }

    #[test]
    fn current_preset_with_same_name_counts_as_applied() {
        let presets = stored();
        let current = preset(Some(7), "B");
        let form = PresetForm::select(&presets, 2).unwrap();
        assert_eq!(form.apply(Some(&current)), Err(FormError::AlreadyApplied));
        assert_eq!(
            FormError::AlreadyApplied.to_string(),
            "This preset is already applied!"
        );
    }

    #[test]
    fn deleted_preset_cannot_be_applied() {
        let presets = stored();
        let form = PresetForm::select(&presets, 2).unwrap();
        let remaining = vec![presets[0].clone()];
        assert_eq!(
            form.apply_button(None, &remaining).map(|b| b.enabled),
            Some(false)
        );
    }
}
