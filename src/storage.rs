//! Best-effort key/value persistence, scoped by profile.
//!
//! Native builds keep one file per key under the local data directory;
//! wasm builds fall back to a process-lifetime in-memory map. Reads fail
//! open (missing or unreadable values are `None`), writes report errors to
//! the caller so they can be logged and absorbed.

#[cfg(target_arch = "wasm32")]
use once_cell::sync::Lazy;
#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
#[cfg(target_arch = "wasm32")]
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

/// In-memory storage for WASM builds
#[cfg(target_arch = "wasm32")]
static PROFILE_STORAGE: Lazy<Mutex<HashMap<String, HashMap<String, String>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Storage directory for a specific profile
#[cfg(not(target_arch = "wasm32"))]
fn profile_dir(profile: &str) -> PathBuf {
    let safe = sanitize(profile);

    if let Some(data_dir) = dirs::data_local_dir() {
        return data_dir.join("parakeet").join(safe);
    }

    PathBuf::from("cache").join("parakeet").join(safe)
}

/// Sanitize a profile or key for filesystem use
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get(profile: &str, key: &str) -> Option<String> {
    let path = profile_dir(profile).join(format!("{}.json", sanitize(key)));
    fs::read_to_string(path).ok()
}

#[cfg(target_arch = "wasm32")]
pub fn get(profile: &str, key: &str) -> Option<String> {
    let storage = PROFILE_STORAGE.lock().ok()?;
    storage.get(profile)?.get(key).cloned()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set(profile: &str, key: &str, value: &str) -> Result<(), String> {
    let dir = profile_dir(profile);
    fs::create_dir_all(&dir).map_err(|e| format!("failed to create storage directory: {}", e))?;
    let path = dir.join(format!("{}.json", sanitize(key)));
    fs::write(path, value).map_err(|e| format!("failed to write to storage: {}", e))
}

#[cfg(target_arch = "wasm32")]
pub fn set(profile: &str, key: &str, value: &str) -> Result<(), String> {
    let mut storage = PROFILE_STORAGE.lock().map_err(|e| e.to_string())?;
    let entries = storage.entry(profile.to_string()).or_default();
    entries.insert(key.to_string(), value.to_string());
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove(profile: &str, key: &str) -> Result<(), String> {
    let path = profile_dir(profile).join(format!("{}.json", sanitize(key)));
    if path.exists() {
        fs::remove_file(path).map_err(|e| format!("failed to delete from storage: {}", e))?;
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn remove(profile: &str, key: &str) -> Result<(), String> {
    let mut storage = PROFILE_STORAGE.lock().map_err(|e| e.to_string())?;
    if let Some(entries) = storage.get_mut(profile) {
        entries.remove(key);
    }
    Ok(())
}

/// Drop every value stored for a profile
#[cfg(not(target_arch = "wasm32"))]
pub fn clear_profile(profile: &str) -> Result<(), String> {
    let dir = profile_dir(profile);
    if dir.exists() {
        fs::remove_dir_all(&dir).map_err(|e| format!("failed to clear storage: {}", e))?;
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn clear_profile(profile: &str) -> Result<(), String> {
    let mut storage = PROFILE_STORAGE.lock().map_err(|e| e.to_string())?;
    storage.remove(profile);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("default"), "default");
        assert_eq!(sanitize("user:theme"), "user_theme");
        assert_eq!(sanitize("my profile!"), "my_profile_");
    }

    #[test]
    fn test_set_get_remove_roundtrip() {
        let profile = "test-storage-roundtrip";
        set(profile, "greeting", "hello").expect("set failed");
        assert_eq!(get(profile, "greeting"), Some("hello".to_string()));

        remove(profile, "greeting").expect("remove failed");
        assert_eq!(get(profile, "greeting"), None);

        clear_profile(profile).expect("clear failed");
    }
}
