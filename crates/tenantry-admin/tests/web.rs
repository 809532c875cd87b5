//! Browser tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Uint8Array};
use wasm_bindgen_test::*;
use web_sys::{File, FilePropertyBag};

use tenantry_admin::api::{read_as_data_url, read_as_text, BrowserFile};
use tenantry_core::picker::PickedFile;
use tenantry_core::utils::{class_if, encode_data_url, merge_classes, parse_csv};

wasm_bindgen_test_configure!(run_in_browser);

fn file(name: &str, mime_type: &str, bytes: &[u8]) -> File {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let options = FilePropertyBag::new();
    options.set_type(mime_type);
    File::new_with_u8_array_sequence_and_options(&parts, name, &options).unwrap()
}

#[wasm_bindgen_test]
async fn test_data_url_matches_core_encoder() {
    let bytes = [137u8, 80, 78, 71, 13, 10, 26, 10];
    let url = read_as_data_url(&file("logo.png", "image/png", &bytes))
        .await
        .unwrap();
    assert_eq!(url, encode_data_url("image/png", &bytes));
}

#[wasm_bindgen_test]
async fn test_browser_file_payload() {
    let picked = BrowserFile::new(file("logo.png", "image/png", &[1, 2, 3]));
    assert_eq!(picked.name(), "logo.png");
    assert_eq!(picked.size(), 3);
    assert!(picked.is_image());

    let payload = picked.to_payload().await.unwrap();
    assert_eq!(payload.bytes, vec![1, 2, 3]);
    assert_eq!(payload.extension(), "png");
}

#[wasm_bindgen_test]
async fn test_read_csv_text() {
    let csv = "email,name\nann@acme.com,Ann\n";
    let text = read_as_text(&file("users.csv", "text/csv", csv.as_bytes()))
        .await
        .unwrap();
    assert_eq!(text, csv);
}

#[wasm_bindgen_test]
async fn test_uploaded_csv_parses_into_rows() {
    let csv = "\"email\",name,role\r\nann@acme.com,Ann,staff\r\n\r\nbob@acme.com\r\n";
    let text = read_as_text(&file("users.csv", "text/csv", csv.as_bytes()))
        .await
        .unwrap();
    let table = parse_csv(&text);

    assert_eq!(table.headers, vec!["email", "name", "role"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0]["name"], "Ann");
    assert_eq!(table.rows[1]["email"], "bob@acme.com");
    assert_eq!(table.rows[1]["role"], "");
}

#[wasm_bindgen_test]
fn test_drop_zone_classes() {
    let dragging = true;
    let classes = merge_classes([
        "border-2 border-dashed border-gray-600",
        class_if(dragging, "border-blue-500 border-dashed"),
        class_if(!dragging, "hover:border-gray-500"),
    ]);
    assert_eq!(classes, "border-2 border-gray-600 border-blue-500 border-dashed");
}
