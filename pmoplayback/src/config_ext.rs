//! Extension pour intégrer la configuration Cast dans pmoconfig
//!
//! Ce module fournit le trait `CastConfigExt` qui ajoute à `pmoconfig::Config`
//! la lecture et l'écriture des paramètres de l'adaptateur Cast.

use anyhow::{Result, anyhow};
use pmoconfig::Config;
use serde_yaml::Value;

use crate::cast::{AutoJoinPolicy, CUSTOM_MESSAGE_NAMESPACE, CastOptions, DEFAULT_RECEIVER_APP_ID};

const RECEIVER_APP_ID_PATH: &[&str] = &["cast", "receiver_app_id"];
const AUTO_JOIN_POLICY_PATH: &[&str] = &["cast", "auto_join_policy"];
const ANDROID_COMPATIBLE_PATH: &[&str] = &["cast", "android_receiver_compatible"];
const MESSAGE_NAMESPACE_PATH: &[&str] = &["cast", "message_namespace"];

/// Trait d'extension pour gérer la configuration Cast dans pmoconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::get_config;
/// use pmoplayback::{CastConfigExt, CastPlayer};
///
/// let config = get_config()?;
/// let mut player = CastPlayer::with_namespace(framework, config.get_cast_message_namespace()?);
/// player.initialize(config.get_cast_options()?);
/// ```
pub trait CastConfigExt {
    /// Identifiant de l'application réceptrice (défaut : `67338B81`)
    fn get_cast_receiver_app_id(&self) -> Result<String>;

    fn set_cast_receiver_app_id(&self, app_id: &str) -> Result<()>;

    /// Politique de connexion automatique aux sessions existantes
    ///
    /// # Errors
    ///
    /// Retourne une erreur si la valeur configurée n'est pas une politique connue
    fn get_cast_auto_join_policy(&self) -> Result<AutoJoinPolicy>;

    fn set_cast_auto_join_policy(&self, policy: AutoJoinPolicy) -> Result<()>;

    /// Compatibilité avec les récepteurs Android
    fn get_cast_android_receiver_compatible(&self) -> Result<bool>;

    fn set_cast_android_receiver_compatible(&self, compatible: bool) -> Result<()>;

    /// Espace de noms des messages personnalisés
    fn get_cast_message_namespace(&self) -> Result<String>;

    fn set_cast_message_namespace(&self, namespace: &str) -> Result<()>;

    /// Construit les options d'initialisation de l'adaptateur Cast
    fn get_cast_options(&self) -> Result<CastOptions>;
}

impl CastConfigExt for Config {
    fn get_cast_receiver_app_id(&self) -> Result<String> {
        match self.get_value(RECEIVER_APP_ID_PATH) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_RECEIVER_APP_ID.to_string()),
        }
    }

    fn set_cast_receiver_app_id(&self, app_id: &str) -> Result<()> {
        self.set_value(RECEIVER_APP_ID_PATH, Value::String(app_id.to_string()))
    }

    fn get_cast_auto_join_policy(&self) -> Result<AutoJoinPolicy> {
        match self.get_value(AUTO_JOIN_POLICY_PATH) {
            Ok(Value::String(s)) => s.parse(),
            Ok(other) => Err(anyhow!("Invalid cast auto join policy: {:?}", other)),
            Err(_) => Ok(AutoJoinPolicy::default()),
        }
    }

    fn set_cast_auto_join_policy(&self, policy: AutoJoinPolicy) -> Result<()> {
        self.set_value(AUTO_JOIN_POLICY_PATH, Value::String(policy.as_str().to_string()))
    }

    fn get_cast_android_receiver_compatible(&self) -> Result<bool> {
        match self.get_value(ANDROID_COMPATIBLE_PATH) {
            Ok(Value::Bool(b)) => Ok(b),
            Ok(other) => Err(anyhow!(
                "Invalid cast android_receiver_compatible value: {:?}",
                other
            )),
            Err(_) => Ok(true),
        }
    }

    fn set_cast_android_receiver_compatible(&self, compatible: bool) -> Result<()> {
        self.set_value(ANDROID_COMPATIBLE_PATH, Value::Bool(compatible))
    }

    fn get_cast_message_namespace(&self) -> Result<String> {
        match self.get_value(MESSAGE_NAMESPACE_PATH) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(CUSTOM_MESSAGE_NAMESPACE.to_string()),
        }
    }

    fn set_cast_message_namespace(&self, namespace: &str) -> Result<()> {
        self.set_value(MESSAGE_NAMESPACE_PATH, Value::String(namespace.to_string()))
    }

    fn get_cast_options(&self) -> Result<CastOptions> {
        Ok(CastOptions {
            receiver_application_id: self.get_cast_receiver_app_id()?,
            auto_join_policy: self.get_cast_auto_join_policy()?,
            android_receiver_compatible: self.get_cast_android_receiver_compatible()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(dir: &tempfile::TempDir) -> Config {
        Config::load_config(&dir.path().to_string_lossy()).unwrap()
    }

    #[test]
    fn test_defaults_from_embedded_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir);

        assert_eq!(config.get_cast_options().unwrap(), CastOptions::default());
        assert_eq!(
            config.get_cast_message_namespace().unwrap(),
            CUSTOM_MESSAGE_NAMESPACE
        );
    }

    #[test]
    fn test_setters_persist() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir);
        config.set_cast_receiver_app_id("CC1AD845").unwrap();
        config
            .set_cast_auto_join_policy(AutoJoinPolicy::PageScoped)
            .unwrap();
        config.set_cast_android_receiver_compatible(false).unwrap();
        config.set_cast_message_namespace("urn:x-cast:test").unwrap();

        let reloaded = load(&dir);
        let options = reloaded.get_cast_options().unwrap();
        assert_eq!(options.receiver_application_id, "CC1AD845");
        assert_eq!(options.auto_join_policy, AutoJoinPolicy::PageScoped);
        assert!(!options.android_receiver_compatible);
        assert_eq!(
            reloaded.get_cast_message_namespace().unwrap(),
            "urn:x-cast:test"
        );
    }

    #[test]
    fn test_invalid_policy_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir);
        config
            .set_value(AUTO_JOIN_POLICY_PATH, Value::String("everywhere".into()))
            .unwrap();
        assert!(config.get_cast_auto_join_policy().is_err());
        assert!(config.get_cast_options().is_err());
    }
}
