use wasm_bindgen::prelude::*;

use crate::domain::config::{ColorVariant, TagFieldConfig};
use crate::systems::tags::TagId;

use super::FieldCore;

/// JS-facing handle on the tag field.
///
/// Creation is deferred while the container has no layout size yet: the
/// first non-zero `set_viewport` builds the world and spawns any tag list
/// supplied in the meantime.
#[wasm_bindgen]
pub struct TagField {
    core: Option<FieldCore>,
    config: TagFieldConfig,
    pending_labels: Vec<String>,
    on_remove: Option<js_sys::Function>,
    destroyed: bool,
}

#[wasm_bindgen]
impl TagField {
    /// Create a new field. Pass zero for either dimension to defer world
    /// creation until the layout size is known.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, config_json: Option<String>) -> Result<TagField, JsValue> {
        let config = match config_json {
            Some(json) => TagFieldConfig::from_json(&json).map_err(|e| JsValue::from_str(&e))?,
            None => TagFieldConfig::default(),
        };

        let mut field = TagField {
            core: None,
            config,
            pending_labels: Vec::new(),
            on_remove: None,
            destroyed: false,
        };
        if width > 0.0 && height > 0.0 {
            field.build(width, height)?;
        }
        Ok(field)
    }

    /// Whether the world exists (false while creation is deferred)
    #[wasm_bindgen(getter)]
    pub fn ready(&self) -> bool {
        self.core.is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 {
        self.core.as_ref().map(|c| c.width()).unwrap_or(0.0)
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 {
        self.core.as_ref().map(|c| c.height()).unwrap_or(0.0)
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.core.as_ref().map(|c| c.frame()).unwrap_or(0)
    }

    #[wasm_bindgen(getter)]
    pub fn tag_count(&self) -> u32 {
        self.core.as_ref().map(|c| c.tag_count() as u32).unwrap_or(0)
    }

    /// Color variant for the host's tag styling
    #[wasm_bindgen(getter)]
    pub fn variant(&self) -> String {
        match self.config.variant {
            ColorVariant::Default => "default",
            ColorVariant::Green => "green",
            ColorVariant::Blue => "blue",
            ColorVariant::Purple => "purple",
        }
        .to_string()
    }

    /// Message the host shows when no tags are tracked
    #[wasm_bindgen(getter, js_name = emptyMessage)]
    pub fn empty_message(&self) -> String {
        self.config.empty_message.clone()
    }

    /// Apply a (new) layout size. First call with a non-zero size resolves
    /// deferred creation; later size changes rebuild the world from scratch
    /// and respawn every tracked tag.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        if self.destroyed || width <= 0.0 || height <= 0.0 {
            return Ok(());
        }

        if let Some(core) = self.core.as_mut() {
            if core.width() == width && core.height() == height {
                return Ok(());
            }
            return core
                .rebuild(width, height)
                .map_err(|e| JsValue::from_str(&e.to_string()));
        }
        self.build(width, height)
    }

    /// Reconcile against a new ordered label list. Remembered and applied
    /// on creation if the world is still deferred.
    #[wasm_bindgen(js_name = setTags)]
    pub fn set_tags(&mut self, labels: Vec<String>) -> Result<(), JsValue> {
        if self.destroyed {
            return Ok(());
        }
        if let Some(core) = self.core.as_mut() {
            return core
                .set_tags(&labels)
                .map_err(|e| JsValue::from_str(&e.to_string()));
        }
        self.pending_labels = labels;
        Ok(())
    }

    /// Callback invoked with the dismissed label's index in the latest
    /// `setTags` list
    #[wasm_bindgen(js_name = setRemoveCallback)]
    pub fn set_remove_callback(&mut self, callback: js_sys::Function) {
        self.on_remove = Some(callback);
    }

    /// Dismiss one tag by identity. Returns the label's index in the latest
    /// label list and fires the registered removal callback with it.
    pub fn dismiss(&mut self, id: u64) -> Option<u32> {
        let core = self.core.as_mut()?;
        let index = core.dismiss(TagId(id))? as u32;

        if let Some(callback) = &self.on_remove {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from(index)) {
                web_sys::console::error_2(&"tagdrop: remove callback failed".into(), &err);
            }
        }
        Some(index)
    }

    /// Advance the physics clock to `now_ms` (performance.now())
    pub fn pump(&mut self, now_ms: f64) {
        if let Some(core) = self.core.as_mut() {
            core.pump(now_ms);
        }
    }

    /// Refresh the snapshot transfer buffers; returns the published tag count
    pub fn sample(&mut self) -> u32 {
        self.core.as_mut().map(|c| c.sample() as u32).unwrap_or(0)
    }

    /// Pointer to `sample()`'s id buffer (one u64 per published tag)
    #[wasm_bindgen(js_name = idsPtr)]
    pub fn ids_ptr(&self) -> *const u64 {
        self.core.as_ref().map(|c| c.ids_ptr()).unwrap_or(std::ptr::null())
    }

    /// Pointer to `sample()`'s transform buffer ([x, y, rotation] f32 per tag)
    #[wasm_bindgen(js_name = transformsPtr)]
    pub fn transforms_ptr(&self) -> *const f32 {
        self.core.as_ref().map(|c| c.transforms_ptr()).unwrap_or(std::ptr::null())
    }

    /// Number of tags currently in the transfer buffers
    #[wasm_bindgen(js_name = publishedCount)]
    pub fn published_count(&self) -> u32 {
        self.core.as_ref().map(|c| c.published_count() as u32).unwrap_or(0)
    }

    /// Current snapshot as JSON (debugging convenience; the render path
    /// reads the flat buffers instead)
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.core
            .as_ref()
            .map(|c| c.snapshot_json())
            .unwrap_or_else(|| String::from("{\"tags\":[]}"))
    }

    /// Wake every body so the pile resettles
    #[wasm_bindgen(js_name = wakeAll)]
    pub fn wake_all(&mut self) {
        if let Some(core) = self.core.as_mut() {
            core.wake_all();
        }
    }

    /// Stop stepping and release all bodies. Terminal: no later viewport or
    /// tag list revives the field. Safe to call repeatedly or before the
    /// world was ever created.
    pub fn destroy(&mut self) {
        if let Some(core) = self.core.as_mut() {
            core.destroy();
        }
        self.pending_labels.clear();
        self.destroyed = true;
    }
}

impl TagField {
    fn build(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        let mut core = FieldCore::new(width, height, self.config.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        if !self.pending_labels.is_empty() {
            let labels = std::mem::take(&mut self.pending_labels);
            core.set_tags(&labels)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        }

        self.core = Some(core);
        Ok(())
    }
}
