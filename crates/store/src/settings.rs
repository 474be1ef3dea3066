//! Letter defaults — the typed settings repository over `settings.json`.
//!
//! Settings are read and replaced as a whole: the settings page edits the
//! full document client-side and PUTs it back.

use chainletter_common::error::AppError;
use chainletter_common::types::Settings;

use crate::{SETTINGS_FILE, Store};

impl Store {
    /// Current letter defaults.
    pub fn get_settings(&self) -> Settings {
        self.inner.read().settings.clone()
    }

    /// Replace the letter defaults wholesale.
    ///
    /// The `default_*` references must point at entries of the lists being
    /// saved; a dangling reference is rejected.
    pub fn put_settings(&self, settings: Settings) -> Result<Settings, AppError> {
        if let Some(id) = settings.default_contact
            && !settings.points_of_contact.iter().any(|c| c.id == id)
        {
            return Err(AppError::Validation(format!(
                "default_contact {} does not match any point of contact",
                id
            )));
        }
        if let Some(id) = settings.default_activity
            && !settings.activities.iter().any(|a| a.id == id)
        {
            return Err(AppError::Validation(format!(
                "default_activity {} does not match any activity",
                id
            )));
        }
        if let Some(id) = settings.default_signature
            && !settings.signature_blocks.iter().any(|s| s.id == id)
        {
            return Err(AppError::Validation(format!(
                "default_signature {} does not match any signature block",
                id
            )));
        }

        let mut inner = self.inner.write();
        inner.settings = settings.clone();
        self.save(SETTINGS_FILE, &inner.settings)?;

        tracing::info!(
            contacts = settings.points_of_contact.len(),
            activities = settings.activities.len(),
            signatures = settings.signature_blocks.len(),
            "Settings saved"
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainletter_common::types::{ActivityNature, PointOfContact};
    use uuid::Uuid;

    fn contact(name: &str) -> PointOfContact {
        PointOfContact {
            id: Uuid::new_v4(),
            name: name.to_string(),
            title: "Inspector".to_string(),
            phone: "+39 06 0000 0000".to_string(),
            email: "poc@unit.example".to_string(),
            office: "Via Nazionale 1".to_string(),
        }
    }

    #[test]
    fn settings_roundtrip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let poc = contact("Rossi");
        {
            let store = Store::open(dir.path()).unwrap();
            let settings = Settings {
                points_of_contact: vec![poc.clone()],
                activities: vec![ActivityNature {
                    id: Uuid::new_v4(),
                    label: "Ransomware proceeds".to_string(),
                }],
                default_contact: Some(poc.id),
                default_letter_body: "Please monitor the listed addresses.".to_string(),
                ..Settings::default()
            };
            store.put_settings(settings).unwrap();
        }

        let reopened = Store::open(dir.path()).unwrap();
        let settings = reopened.get_settings();
        assert_eq!(settings.points_of_contact.len(), 1);
        assert_eq!(settings.default_contact, Some(poc.id));
        assert_eq!(
            settings.default_letter_body,
            "Please monitor the listed addresses."
        );
    }

    #[test]
    fn dangling_default_reference_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let err = store
            .put_settings(Settings {
                default_contact: Some(Uuid::new_v4()),
                ..Settings::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn fresh_store_has_empty_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let settings = store.get_settings();
        assert!(settings.points_of_contact.is_empty());
        assert!(settings.default_contact.is_none());
        assert!(settings.default_letter_body.is_empty());
    }
}
