use assert_cmd::Command;
use cairo::{Context, Format, ImageSurface};
use predicates::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tempfile::TempDir;

fn pagescribe_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pagescribe").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", temp.path());
    cmd
}

fn write_page(dir: &Path, name: &str) {
    let surface = ImageSurface::create(Format::ARgb32, 120, 160).unwrap();
    {
        let ctx = Context::new(&surface).unwrap();
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint().unwrap();
    }
    let mut file = File::create(dir.join(name)).unwrap();
    surface.write_to_png(&mut file).unwrap();
}

#[test]
fn pagescribe_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    pagescribe_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand ink annotation for multi-page documents",
        ));
}

#[test]
fn missing_document_is_an_error() {
    let temp = TempDir::new().unwrap();
    pagescribe_cmd(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No document given"));
}

#[test]
fn unreadable_pages_directory_fails() {
    let temp = TempDir::new().unwrap();
    pagescribe_cmd(&temp)
        .arg("--pages")
        .arg(temp.path().join("does-not-exist"))
        .arg("--output")
        .arg(temp.path().join("out.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load pages"));
}

#[test]
fn empty_pages_directory_fails() {
    let temp = TempDir::new().unwrap();
    let pages = temp.path().join("pages");
    fs::create_dir_all(&pages).unwrap();

    pagescribe_cmd(&temp)
        .arg("--pages")
        .arg(&pages)
        .arg("--output")
        .arg(temp.path().join("out.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no pages"));
}

#[test]
fn script_annotates_pages_and_exports_pdf() {
    let temp = TempDir::new().unwrap();
    let pages = temp.path().join("pages");
    fs::create_dir_all(&pages).unwrap();
    write_page(&pages, "page-01.png");
    write_page(&pages, "page-02.png");

    let script = temp.path().join("events.toml");
    fs::write(
        &script,
        r#"
        [[events]]
        type = "stroke"
        page = 1
        points = [[20.0, 20.0], [80.0, 40.0], [120.0, 90.0]]

        [[events]]
        type = "set-mode"
        mode = "highlighter"

        [[events]]
        type = "stroke"
        page = 2
        points = [[10.0, 50.0], [150.0, 50.0]]

        [[events]]
        type = "active-page"
        page = 2

        [[events]]
        type = "key"
        combo = "Ctrl+Z"

        [[events]]
        type = "key"
        combo = "Ctrl+Y"
        "#,
    )
    .unwrap();

    let output = temp.path().join("exports").join("annotated.pdf");
    pagescribe_cmd(&temp)
        .arg("--pages")
        .arg(&pages)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("annotated.pdf"));

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn blank_pages_use_export_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    let export_dir = temp.path().join("out");
    fs::write(
        &config,
        format!(
            "[export]\ndirectory = {:?}\nfilename_template = \"blank-notes\"\n",
            export_dir.to_string_lossy()
        ),
    )
    .unwrap();

    pagescribe_cmd(&temp)
        .arg("--blank")
        .arg("2")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("blank-notes.pdf"));

    assert!(export_dir.join("blank-notes.pdf").is_file());
}

#[test]
fn invalid_script_fails_before_export() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("bad.toml");
    fs::write(&script, "[[events]]\ntype = \"teleport\"\n").unwrap();
    let output = temp.path().join("out.pdf");

    pagescribe_cmd(&temp)
        .args(["--blank", "1"])
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse script"));

    assert!(!output.exists());
}

#[test]
fn init_config_writes_once() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("nested").join("config.toml");

    pagescribe_cmd(&temp)
        .arg("--init-config")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
    let written = fs::read_to_string(&config).unwrap();
    assert!(written.contains("[keybindings]"));

    pagescribe_cmd(&temp)
        .arg("--init-config")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn dump_config_schema_prints_sections() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("render_scale"))
        .stdout(predicate::str::contains("stroke_hit_radius"));
}
