//! Operator Preferences
//!
//! Small settings kept in `localStorage` so they survive a reload.

const SOUND_KEY: &str = "kitchen_sound_enabled";
const ACTOR_KEY: &str = "kitchen_actor_name";
const DEFAULT_ACTOR: &str = "Operario";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    storage()?.get_item(key).ok()?
}

fn write(key: &str, value: &str) {
    let Some(storage) = storage() else {
        return;
    };
    if storage.set_item(key, value).is_err() {
        log::warn!("[PREFS] could not persist {}", key);
    }
}

/// Sound is on unless explicitly stored as "0"
fn parse_sound_flag(raw: Option<&str>) -> bool {
    raw != Some("0")
}

fn parse_actor(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_ACTOR)
        .to_string()
}

pub fn load_sound_enabled() -> bool {
    parse_sound_flag(read(SOUND_KEY).as_deref())
}

pub fn save_sound_enabled(enabled: bool) {
    write(SOUND_KEY, if enabled { "1" } else { "0" });
}

pub fn load_actor_name() -> String {
    parse_actor(read(ACTOR_KEY).as_deref())
}

pub fn save_actor_name(name: &str) {
    write(ACTOR_KEY, name.trim());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_defaults_on() {
        assert!(parse_sound_flag(None));
        assert!(parse_sound_flag(Some("1")));
        assert!(!parse_sound_flag(Some("0")));
    }

    #[test]
    fn test_actor_falls_back_when_blank() {
        assert_eq!(parse_actor(None), "Operario");
        assert_eq!(parse_actor(Some("   ")), "Operario");
        assert_eq!(parse_actor(Some(" Camila ")), "Camila");
    }
}
