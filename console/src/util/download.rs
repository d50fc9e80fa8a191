//! Browser file downloads for exported data.

#[cfg(test)]
#[path = "download_test.rs"]
mod download_test;

use iam::Timestamp;

/// `users-2024-06-01.csv`.
#[must_use]
pub fn export_filename(prefix: &str, now: Timestamp) -> String {
    format!("{prefix}-{}.csv", now.format("%Y-%m-%d"))
}

/// Offer `content` as a file download. No-op outside the browser.
pub fn save_text(filename: &str, mime: &str, content: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(content));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime);
        let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options) else {
            log::warn!("could not build download blob for {filename}");
            return;
        };
        let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
            return;
        };
        let anchor = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.create_element("a").ok())
            .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok());
        if let Some(anchor) = anchor {
            anchor.set_href(&url);
            anchor.set_download(filename);
            anchor.click();
        }
        let _ = web_sys::Url::revoke_object_url(&url);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (filename, mime, content);
    }
}
