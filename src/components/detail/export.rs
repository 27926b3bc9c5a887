use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// File name for a node's CSV export: label characters outside
/// `[A-Za-z0-9_-]` become `_`.
pub fn csv_file_name(label: &str) -> String {
	let stem: String = label
		.trim()
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
		.collect();
	if stem.is_empty() {
		"sample.csv".to_string()
	} else {
		format!("{stem}.csv")
	}
}

/// Hand `csv` to the browser as a download named `file_name`.
pub fn download_csv(file_name: &str, csv: &str) -> Result<(), JsValue> {
	let parts = js_sys::Array::of1(&JsValue::from_str(csv));
	let props = BlobPropertyBag::new();
	props.set_type("text/csv;charset=utf-8");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &props)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into().map_err(JsValue::from)?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	Url::revoke_object_url(&url)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn file_name_is_sanitized() {
		assert_eq!(csv_file_name("Lab Data (Central/Local)"), "Lab_Data__Central_Local_.csv");
		assert_eq!(csv_file_name("CPID_EDC_Metrics"), "CPID_EDC_Metrics.csv");
		assert_eq!(csv_file_name("   "), "sample.csv");
	}
}
