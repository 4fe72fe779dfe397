//! CLI integration tests
//!
//! Run the real binary against files in a temporary directory.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MENU: &str = r#"{
  "entradas": [
    { "nombre": "Guacamole", "precio": 95, "descripcion": "Con totopos", "slug": "guacamole", "emoji": "🥑" }
  ],
  "principales": [
    { "nombre": "Mole poblano", "precio": 210, "descripcion": "Pollo en mole", "slug": "mole-poblano",
      "imagen": "/images/mole.jpg", "gallery": ["/images/mole-2.jpg"] }
  ],
  "bebidas": [
    { "nombre": "Horchata", "precio": 40, "descripcion": "Agua fresca", "slug": "horchata" }
  ],
  "postres": []
}"#;

fn kalaa() -> Command {
    Command::cargo_bin("kalaa").expect("kalaa binary builds")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn png_count(dir: &Path) -> usize {
    fs::read_dir(dir)
        .expect("output dir exists")
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "png"))
        .count()
}

#[test]
fn test_fire_render_writes_frames() {
    let dir = TempDir::new().expect("temp dir");
    let out = dir.path().join("frames");

    kalaa()
        .args(["fire", "render", "--width", "96", "--height", "64"])
        .args(["--frames", "10", "--every", "5", "--seed", "7", "--quiet"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(png_count(&out), 2);
    assert!(out.join("frame_00005.png").exists());
    assert!(out.join("frame_00010.png").exists());
}

#[test]
fn test_fire_render_with_background() {
    let dir = TempDir::new().expect("temp dir");
    let out = dir.path().join("frames");

    kalaa()
        .args(["fire", "render", "--width", "32", "--height", "32", "--frames", "3"])
        .args(["--seed", "1", "--background", "#1a0a05"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 3 frames"));

    assert_eq!(png_count(&out), 3);
}

#[test]
fn test_fire_render_rejects_zero_every() {
    let dir = TempDir::new().expect("temp dir");
    kalaa()
        .args(["fire", "render", "--every", "0", "--out"])
        .arg(dir.path())
        .assert()
        .failure();
}

#[test]
fn test_fire_simulate_reports_pool() {
    kalaa()
        .args(["fire", "simulate", "--width", "300", "--height", "100"])
        .args(["--frames", "30", "--report-every", "10", "--seed", "3"])
        .args(["--resize-at", "15", "--resize-to", "600x500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initial pool: 10 embers"))
        .stdout(predicate::str::contains("Final pool: 100 embers"))
        .stdout(predicate::str::contains("600x500"));
}

#[test]
fn test_fire_trace_json() {
    let output = kalaa()
        .args(["fire", "trace", "--width", "300", "--height", "300", "--json"])
        .output()
        .expect("trace runs");
    assert!(output.status.success());

    let commands: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("trace is JSON");
    let commands = commands.as_array().expect("array of commands");
    assert_eq!(commands[0]["op"], "clear");
    // 30 embers, six commands each, after the clear
    assert_eq!(commands.len(), 1 + 30 * 6);
}

#[test]
fn test_fire_config_defaults_and_override() {
    kalaa()
        .args(["fire", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"density_divisor\": 3000.0"));

    let dir = TempDir::new().expect("temp dir");
    let config = write(&dir, "fire.yaml", "min_embers: 42\n");
    kalaa()
        .args(["fire", "config", "--format", "yaml"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("min_embers: 42"));
}

#[test]
fn test_fire_invalid_config_fails() {
    let dir = TempDir::new().expect("temp dir");
    let config = write(&dir, "fire.json", r#"{ "base_palette": [] }"#);
    kalaa()
        .args(["fire", "simulate", "--frames", "1", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_palette"));
}

#[test]
fn test_menu_info() {
    let dir = TempDir::new().expect("temp dir");
    let menu = write(&dir, "menu.json", MENU);
    kalaa()
        .args(["menu", "info"])
        .arg(&menu)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total items: 3"))
        .stdout(predicate::str::contains("Price range: $40.00 - $210.00"));
}

#[test]
fn test_menu_validate() {
    let dir = TempDir::new().expect("temp dir");
    let menu = write(&dir, "menu.json", MENU);
    kalaa()
        .args(["menu", "validate", "--strict"])
        .arg(&menu)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Menu is valid (3 items)"));

    let broken = write(
        &dir,
        "broken.json",
        &MENU.replace("\"precio\": 40", "\"precio\": -40"),
    );
    kalaa()
        .args(["menu", "validate"])
        .arg(&broken)
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid price -40"));
}

#[test]
fn test_menu_validate_strict_warnings() {
    let dir = TempDir::new().expect("temp dir");
    let menu = write(
        &dir,
        "menu.json",
        &MENU.replace(", \"slug\": \"horchata\"", ""),
    );

    kalaa().args(["menu", "validate"]).arg(&menu).assert().success();
    kalaa()
        .args(["menu", "validate", "--strict"])
        .arg(&menu)
        .assert()
        .failure();
}

#[test]
fn test_menu_show_category_json() {
    let dir = TempDir::new().expect("temp dir");
    let menu = write(&dir, "menu.json", MENU);
    let output = kalaa()
        .args(["menu", "show", "--category", "mains", "--format", "json"])
        .arg(&menu)
        .output()
        .expect("show runs");
    assert!(output.status.success());

    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON menu");
    assert_eq!(shown["principales"][0]["nombre"], "Mole poblano");
    assert_eq!(shown["entradas"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_menu_find() {
    let dir = TempDir::new().expect("temp dir");
    let menu = write(&dir, "menu.json", MENU);
    kalaa()
        .args(["menu", "find"])
        .arg(&menu)
        .arg("mole-poblano")
        .assert()
        .success()
        .stdout(predicate::str::contains("Section: Mains (principales)"))
        .stdout(predicate::str::contains("Gallery: /images/mole-2.jpg"));

    kalaa()
        .args(["menu", "find"])
        .arg(&menu)
        .arg("pozole")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No item with slug 'pozole'"));
}

#[test]
fn test_completions() {
    kalaa()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kalaa"));
}
