use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_order-export"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn manifest_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(rel)
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

#[test]
fn test_seller_variant() {
    setup();
    let output_file = "test-seller.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-O", "tests/fixtures/order.json",
            "-v", "seller",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small, likely empty or corrupt");
}

#[test]
fn test_admin_variant() {
    setup();
    let output_file = "test-admin.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-O", "tests/fixtures/order.json",
            "-v", "admin",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small");
}

#[test]
fn test_default_output_name_uses_order_id() {
    setup();
    cleanup_file("order_ORD-1001.pdf");

    let order_file = manifest_path("tests/fixtures/order.json");
    let output = cargo_bin()
        .current_dir(manifest_path("tests/output"))
        .args(["-O", order_file.to_str().expect("fixture path")])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join("order_ORD-1001.pdf");
    assert!(path.exists(), "Default-named PDF was not created");

    cleanup_file("order_ORD-1001.pdf");
}

#[test]
fn test_unreachable_images_still_render() {
    setup();
    let output_file = "test-broken-image.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-O", "tests/fixtures/order_broken_image.json",
            "-v", "admin",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Broken images should degrade to a warning, not abort: {:?}",
        output
    );

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small");
}

#[test]
fn test_with_real_images() {
    setup();
    let output_file = "test-with-images.pdf";
    cleanup_file(output_file);

    // Generate a swatch on the fly so no binary fixture is checked in.
    let swatch = output_dir().join("swatch.png");
    let img = image::RgbImage::from_pixel(320, 200, image::Rgb([180u8, 40, 40]));
    img.save(&swatch).expect("Failed to write swatch");

    let swatch_path = manifest_path("tests/output/swatch.png");
    let order_file = output_dir().join("order-with-images.json");
    let json = format!(
        r#"{{
  "id": "ORD-3003",
  "product_name": "Cabin 42",
  "client_name": "Acme Corp",
  "seller_name": "Jane Doe",
  "seller_email": "jane@example.com",
  "status": "confirmed",
  "total": 140000.0,
  "tax": 9500.0,
  "comments": "",
  "created_at": "2025-08-01",
  "options": [],
  "colors": [{{ "name": "Barn Red", "code": "BR-2", "image_url": "{0}" }}],
  "designs": [{{ "design_type": "Facade", "name": "North elevation", "image_url": "{0}" }}],
  "floor_plans": [{{ "name": "Ground floor", "image_url": "{0}" }}],
  "signature_url": "{0}"
}}"#,
        swatch_path.display()
    );
    fs::write(&order_file, json).expect("Failed to write order file");

    let output = cargo_bin()
        .args([
            "-O", order_file.to_str().expect("order path"),
            "-v", "admin",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small");
}

#[test]
fn test_missing_order_file() {
    let output = cargo_bin()
        .args([
            "-O", "nonexistent.json",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing order file");
}

#[test]
fn test_invalid_order_json() {
    setup();
    let bad_file = output_dir().join("bad-order.json");
    fs::write(&bad_file, "{ not valid json").expect("Failed to write bad order file");

    let output = cargo_bin()
        .args([
            "-O", bad_file.to_str().expect("bad path"),
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for invalid JSON");
}
