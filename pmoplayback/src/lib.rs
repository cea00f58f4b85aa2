//! # pmoplayback - Contrôle de lecture locale et Cast pour PMOPlayer
//!
//! Ce crate normalise le pilotage de la lecture et les événements d'état pour
//! l'interface du lecteur, quelle que soit la cible :
//!
//! - [`LocalPlayer`] : adaptateur au-dessus d'un élément média natif ([`MediaElement`])
//! - [`CastPlayer`] : adaptateur au-dessus d'un SDK Cast ([`CastFramework`])
//! - [`MediaController`] : façade unique sur l'une ou l'autre cible
//!
//! Les accesseurs ne paniquent jamais : tant que l'adaptateur n'est pas prêt,
//! ils renvoient une valeur par défaut et les commandes sont ignorées ou
//! rejetées avec une [`PlaybackError`].
//!
//! ## Événements
//!
//! Chaque adaptateur expose un registre d'écouteurs ([`ListenerRegistry`])
//! indexé par catégorie (`timeUpdate`, `connectionChanged`, ...).
//!
//! ```rust,ignore
//! use pmoplayback::{LocalEventKind, LocalPlayer, listener};
//!
//! let mut player = LocalPlayer::new();
//! player.initialize(Some(element));
//! player.on(LocalEventKind::TimeUpdate, listener(|event| println!("{:?}", event)));
//! ```

pub mod cast;
pub mod config_ext;
pub mod controller;
pub mod errors;
pub mod events;
pub mod local;
pub mod logging;
pub mod model;

pub use cast::{CastEvent, CastEventKind, CastFramework, CastOptions, CastPlayer, LoadOptions};
pub use config_ext::CastConfigExt;
pub use controller::{MediaController, PlaybackTarget};
pub use errors::{Deferred, PlaybackError, Result};
pub use events::{EventKind, Listener, ListenerRegistry, PlayerEvent, listener};
pub use local::{LocalEvent, LocalEventKind, LocalPlayer, MediaElement};
pub use logging::init_logging;
pub use model::{VolumeState, clamp_volume};
