/// Utilitaires partagés par les crates PMOPlayer.
///
/// Ce crate regroupe les fonctions pures utilisées par l'interface du lecteur,
/// sans dépendance vers les adaptateurs de lecture.
///
/// # Fonctions principales
///
/// - [`format_time`] : position ou durée au format `HH:MM:SS`
/// - [`format_clock_time`] : horodatage epoch en heure murale sur 12 heures
/// - [`parse_time_flexible`] : conversion inverse vers des secondes
///
/// # Examples
///
/// ```
/// use pmoutils::format_time;
///
/// assert_eq!(format_time(Some(75.0)).as_deref(), Some("00:01:15"));
/// ```
pub mod time_utils;

pub use time_utils::{
    DEFAULT_CLOCK_TIME, format_clock_time, format_clock_time_in, format_time, parse_time_flexible,
};
