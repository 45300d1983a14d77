use std::collections::HashMap;
use std::ffi::{c_char, CStr, CString};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::error::GlossError;
use crate::ir::GlossToken;
use crate::pipeline::GlossConfig;
use crate::progress::ConsoleProgress;
use crate::service::{self, GlossService};

static LAST_ERROR: Lazy<Mutex<Option<CString>>> = Lazy::new(|| Mutex::new(None));
static LAST_RESULT: Lazy<Mutex<Option<CString>>> = Lazy::new(|| Mutex::new(None));

// One service per config file, so a neural model is loaded once per process.
static SERVICES: Lazy<Mutex<HashMap<PathBuf, Arc<GlossService>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn set_slot(slot: &Mutex<Option<CString>>, msg: &str) {
    let c = CString::new(msg.replace('\0', " ")).ok();
    let mut guard = slot.lock().unwrap_or_else(|e| e.into_inner());
    *guard = c;
}

fn set_last_error(msg: &str) {
    set_slot(&LAST_ERROR, msg);
}

fn slot_ptr(slot: &Mutex<Option<CString>>) -> *const c_char {
    let guard = slot.lock().unwrap_or_else(|e| e.into_inner());
    match guard.as_ref() {
        Some(s) => s.as_ptr(),
        None => std::ptr::null(),
    }
}

fn take_cstr(ptr: *const c_char, name: &str) -> Result<String, String> {
    if ptr.is_null() {
        return Err(format!("{name} is null"));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(|s| s.to_string())
        .map_err(|_| format!("{name} is not valid UTF-8"))
}

/// A null pointer selects the process-wide defaults.
fn optional_cstr(ptr: *const c_char, name: &str) -> Result<Option<String>, String> {
    if ptr.is_null() {
        return Ok(None);
    }
    take_cstr(ptr, name).map(Some)
}

fn service_for(config_path: &str) -> anyhow::Result<Arc<GlossService>> {
    let key = PathBuf::from(config_path);
    let mut services = SERVICES.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(svc) = services.get(&key) {
        return Ok(Arc::clone(svc));
    }
    let cfg = GlossConfig::from_paths_and_args(Some(key.clone()), false, None)?;
    let svc = Arc::new(GlossService::from_config(&cfg, ConsoleProgress::new(false))?);
    services.insert(key, Arc::clone(&svc));
    Ok(svc)
}

fn publish(result: Result<Vec<GlossToken>, GlossError>) -> i32 {
    let gloss = match result {
        Ok(v) => v,
        Err(err) => {
            set_last_error(&err.to_string());
            return 11;
        }
    };
    match serde_json::to_string(&gloss) {
        Ok(json) => {
            set_slot(&LAST_RESULT, &json);
            0
        }
        Err(err) => {
            set_last_error(&format!("encode result: {err}"));
            12
        }
    }
}

fn run_text(
    config_path: *const c_char,
    text: *const c_char,
    default_op: fn(&str) -> Result<Vec<GlossToken>, GlossError>,
    service_op: fn(&GlossService, &str) -> Result<Vec<GlossToken>, GlossError>,
) -> i32 {
    let cfg = match optional_cstr(config_path, "config_path") {
        Ok(v) => v,
        Err(e) => {
            set_last_error(&e);
            return 2;
        }
    };
    let text = match take_cstr(text, "text") {
        Ok(v) => v,
        Err(e) => {
            set_last_error(&e);
            return 3;
        }
    };

    match cfg {
        None => publish(default_op(&text)),
        Some(path) => match service_for(&path) {
            Ok(svc) => publish(service_op(&svc, &text)),
            Err(err) => {
                set_last_error(&format!("{err:#}"));
                10
            }
        },
    }
}

/// Rule-based gloss of `text`. `config_path` may be null for the defaults.
///
/// Returns 0 on success with the gloss available from `isl_last_result_utf8()` as a
/// JSON array; non-zero on failure (see `isl_last_error_utf8()`).
#[no_mangle]
pub extern "C" fn isl_rule_based_gloss(config_path: *const c_char, text: *const c_char) -> i32 {
    run_text(
        config_path,
        text,
        service::generate_rule_based_gloss,
        GlossService::generate_rule_based,
    )
}

/// Neural gloss of `text`; same conventions as `isl_rule_based_gloss`.
#[no_mangle]
pub extern "C" fn isl_neural_gloss(config_path: *const c_char, text: *const c_char) -> i32 {
    run_text(
        config_path,
        text,
        service::generate_neural_gloss,
        GlossService::generate_neural,
    )
}

/// Maps a JSON array of words to gloss tokens with the built-in lexicon.
#[no_mangle]
pub extern "C" fn isl_map_tokens(tokens_json: *const c_char) -> i32 {
    let raw = match take_cstr(tokens_json, "tokens_json") {
        Ok(v) => v,
        Err(e) => {
            set_last_error(&e);
            return 3;
        }
    };
    let tokens: Vec<String> = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(err) => {
            set_last_error(&format!("tokens_json: {err}"));
            return 4;
        }
    };
    publish(Ok(service::map_tokens_to_gloss(&tokens)))
}

/// Returns the last successful result as a UTF-8 JSON array pointer (or null if none).
/// The pointer is valid until the next successful call.
#[no_mangle]
pub extern "C" fn isl_last_result_utf8() -> *const c_char {
    slot_ptr(&LAST_RESULT)
}

/// Returns the last error message as a UTF-8 C string pointer (or null if none).
/// The pointer is valid until the next failing call.
#[no_mangle]
pub extern "C" fn isl_last_error_utf8() -> *const c_char {
    slot_ptr(&LAST_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The result and error slots are process-wide.
    static ABI_LOCK: Mutex<()> = Mutex::new(());

    fn last(slot: extern "C" fn() -> *const c_char) -> String {
        let p = slot();
        assert!(!p.is_null());
        unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned()
    }

    #[test]
    fn map_tokens_round_trips_through_the_abi() {
        let _g = ABI_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let input = CString::new(r#"["hello", "xyz"]"#).expect("cstr");
        assert_eq!(isl_map_tokens(input.as_ptr()), 0);
        assert_eq!(last(isl_last_result_utf8), r#"["HELLO","XYZ"]"#);
    }

    #[test]
    fn bad_arguments_report_errors() {
        let _g = ABI_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(isl_map_tokens(std::ptr::null()), 3);
        let input = CString::new("not json").expect("cstr");
        assert_eq!(isl_map_tokens(input.as_ptr()), 4);
        assert!(last(isl_last_error_utf8).starts_with("tokens_json"));
    }

    #[test]
    fn configured_rule_based_gloss() {
        let _g = ABI_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = dir.path().join("isl-gloss.toml");
        std::fs::write(&cfg, "[corpus]\nenabled = false\n").expect("write");
        let cfg = CString::new(cfg.to_string_lossy().into_owned()).expect("cstr");
        let text = CString::new("I will not go to school today").expect("cstr");

        assert_eq!(isl_rule_based_gloss(cfg.as_ptr(), text.as_ptr()), 0);
        assert_eq!(
            last(isl_last_result_utf8),
            r#"["TODAY","I","WILL","SCHOOL","GO","NOT"]"#
        );
    }

    #[test]
    fn missing_config_file_is_reported() {
        let _g = ABI_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = CString::new(dir.path().join("absent.toml").to_string_lossy().into_owned())
            .expect("cstr");
        let text = CString::new("hello").expect("cstr");
        assert_eq!(isl_rule_based_gloss(cfg.as_ptr(), text.as_ptr()), 10);
        assert!(last(isl_last_error_utf8).contains("absent.toml"));
    }
}
