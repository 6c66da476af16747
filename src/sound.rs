//! New Ticket Beep
//!
//! Short sine tone through Web Audio; no asset to load. One `AudioContext`
//! is created on first use and kept for the life of the page, since
//! browsers cap how many may be open at once.

use std::cell::RefCell;

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

const FREQUENCY_HZ: f32 = 880.0;
const VOLUME: f32 = 0.15;
const DURATION_S: f64 = 0.25;

thread_local! {
    static AUDIO: RefCell<Option<AudioContext>> = const { RefCell::new(None) };
}

/// Play the alert. Browsers may refuse audio before a user gesture; that
/// is logged and otherwise ignored.
pub fn play_new_ticket_beep() {
    if let Err(err) = beep() {
        log::warn!("[SOUND] beep failed: {:?}", err);
    }
}

fn beep() -> Result<(), JsValue> {
    let ctx = AUDIO.with(|slot| reuse_or_create(slot, AudioContext::new))?;
    // A context created before any user gesture starts out suspended
    if let Err(err) = ctx.resume() {
        log::debug!("[SOUND] resume refused: {:?}", err);
    }

    let oscillator = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    oscillator.set_type(OscillatorType::Sine);
    oscillator.frequency().set_value(FREQUENCY_HZ);
    gain.gain().set_value(VOLUME);

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    oscillator.start()?;
    oscillator.stop_with_when(ctx.current_time() + DURATION_S)?;
    Ok(())
}

/// Return the value held in `slot`, creating and storing it on first use.
/// A failed creation leaves the slot empty so the next call retries.
fn reuse_or_create<T: Clone, E>(
    slot: &RefCell<Option<T>>,
    create: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    if let Some(existing) = slot.borrow().as_ref() {
        return Ok(existing.clone());
    }
    let created = create()?;
    *slot.borrow_mut() = Some(created.clone());
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_context_is_created_once_and_reused() {
        let slot = RefCell::new(None);
        let created = Cell::new(0);
        let create = || -> Result<u32, ()> {
            created.set(created.get() + 1);
            Ok(created.get())
        };

        for _ in 0..5 {
            assert_eq!(reuse_or_create(&slot, create), Ok(1));
        }
        assert_eq!(created.get(), 1);
    }

    #[test]
    fn test_failed_creation_is_retried() {
        let slot: RefCell<Option<u32>> = RefCell::new(None);
        assert_eq!(reuse_or_create(&slot, || Err("blocked")), Err("blocked"));
        assert!(slot.borrow().is_none());

        assert_eq!(reuse_or_create(&slot, || Ok::<_, &str>(7)), Ok(7));
        assert_eq!(reuse_or_create(&slot, || Err("unused")), Ok(7));
    }
}
