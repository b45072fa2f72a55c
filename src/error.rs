//! Start-up errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no browser window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("surface reports no usable texture format")]
    NoSurfaceFormat,
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SceneError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SceneError::Dom(format!("{value:?}"))
    }
}
