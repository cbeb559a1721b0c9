use std::process::Command;

fn huebook() -> Command {
    Command::new(env!("CARGO_BIN_EXE_huebook"))
}

#[test]
fn test_help_exits_zero() {
    let output = huebook().arg("--help").output().expect("failed to run");
    assert!(output.status.success(), "huebook --help should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Color palette reference"),
        "help should contain description"
    );
}

#[test]
fn test_version_exits_zero() {
    let output = huebook().arg("--version").output().expect("failed to run");
    assert!(output.status.success(), "huebook --version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("huebook"),
        "version output should contain crate name"
    );
}

#[test]
fn test_colors_with_nonexistent_documents() {
    let output = huebook()
        .args([
            "--colors",
            "/tmp/huebook_test_nonexistent_colors.json",
            "--swatches",
            "/tmp/huebook_test_nonexistent_swatches.json",
            "colors",
        ])
        .output()
        .expect("failed to run");

    // Degrades to an empty catalog, must not panic
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked"),
        "should not panic on missing documents"
    );
    assert!(output.status.success());
}

#[test]
fn test_scan_single_color_image() {
    let tmp = std::env::temp_dir().join("huebook_integration_scan");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();

    // Mid-gray so the brightness filter keeps every pixel
    let img = image::RgbImage::from_fn(10, 10, |_, _| image::Rgb([128, 128, 128]));
    let path = tmp.join("gray.png");
    img.save(&path).unwrap();

    let output = huebook()
        .args(["scan", path.to_str().unwrap()])
        .output()
        .expect("failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "scan should not panic: {}", stderr);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("100.0%"),
        "uniform image should yield one full-coverage color, got: {}",
        stdout
    );

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn test_scan_missing_image_fails() {
    let output = huebook()
        .args(["scan", "/tmp/huebook_test_no_such_image.png"])
        .output()
        .expect("failed to run");

    assert!(!output.status.success(), "scan of missing file should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "should error, not panic");
}

#[test]
fn test_pick_letterbox_margin() {
    let tmp = std::env::temp_dir().join("huebook_integration_pick");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();

    // Wide image in a square viewport leaves letterbox bands top and bottom
    let img = image::RgbImage::from_fn(20, 10, |_, _| image::Rgb([0, 0, 255]));
    let path = tmp.join("wide.png");
    img.save(&path).unwrap();

    let output = huebook()
        .args([
            "pick",
            path.to_str().unwrap(),
            "--viewport",
            "100x100",
            "-y",
            "0.05",
        ])
        .output()
        .expect("failed to run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("letterbox"),
        "point in the margin should report the letterbox, got: {}",
        stdout
    );

    let center = huebook()
        .args(["pick", path.to_str().unwrap(), "--viewport", "100x100"])
        .output()
        .expect("failed to run");

    assert!(center.status.success());
    let stdout = String::from_utf8_lossy(&center.stdout);
    assert!(
        stdout.contains("#0000FF"),
        "center of the image should sample blue, got: {}",
        stdout
    );

    let _ = std::fs::remove_dir_all(&tmp);
}
