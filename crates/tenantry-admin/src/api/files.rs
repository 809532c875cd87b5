//! Browser file access

use js_sys::{ArrayBuffer, Promise, Uint8Array};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader};

use tenantry_core::picker::PickedFile;
use tenantry_core::types::FilePayload;

/// A `File` from a browse dialog or a drop, with its metadata cached.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserFile {
    file: File,
    name: String,
    mime_type: String,
    size: u64,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self {
            name: file.name(),
            mime_type: file.type_(),
            size: file.size() as u64,
            file,
        }
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    /// Read the whole file into a payload for the storage service.
    pub async fn to_payload(&self) -> Result<FilePayload, JsValue> {
        let buffer = JsFuture::from(self.file.array_buffer()).await?;
        let buffer: ArrayBuffer = buffer.unchecked_into();
        let bytes = Uint8Array::new(&buffer).to_vec();
        Ok(FilePayload::new(self.name.clone(), self.mime_type.clone(), bytes))
    }
}

impl PickedFile for BrowserFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// Read a file as a `data:` URL. Read failures come back as the
/// `FileReader` error event.
pub async fn read_as_data_url(file: &File) -> Result<String, JsValue> {
    let reader = FileReader::new()?;

    let promise = Promise::new(&mut |resolve, reject| {
        let failing = reject.clone();
        let loaded = reader.clone();
        let on_load = Closure::once_into_js(move |_: JsValue| {
            let outcome = match loaded.result() {
                Ok(value) => resolve.call1(&JsValue::NULL, &value),
                Err(err) => reject.call1(&JsValue::NULL, &err),
            };
            if let Err(err) = outcome {
                log::error!("FileReader callback failed: {:?}", err);
            }
        });
        let on_error = Closure::once_into_js(move |event: JsValue| {
            let _ = failing.call1(&JsValue::NULL, &event);
        });
        reader.set_onload(Some(on_load.unchecked_ref()));
        reader.set_onerror(Some(on_error.unchecked_ref()));
    });

    reader.read_as_data_url(file)?;
    JsFuture::from(promise)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("FileReader did not produce a string"))
}

/// Read a text file, e.g. a CSV upload.
pub async fn read_as_text(file: &File) -> Result<String, JsValue> {
    JsFuture::from(file.text())
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("file content is not text"))
}
